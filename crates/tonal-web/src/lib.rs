//! HTTP endpoint for tonal-rs sentiment analysis.
//!
//! `tonal-web` exposes one route, `POST /analyze-sentiment`, over axum. The
//! model handle is built once by the caller and injected here; the server
//! never constructs or reloads it.
//!
//! # Quick start
//!
//! ```ignore
//! use std::sync::Arc;
//! use tonal_rs::{LocalModelClient, SentimentAnalyzer};
//! use tonal_web::{WebConfig, spawn_web};
//!
//! let client = LocalModelClient::new("http://127.0.0.1:8080", "google/flan-t5-base")?;
//! let analyzer = SentimentAnalyzer::new(Arc::new(client));
//!
//! let addr = spawn_web(analyzer, WebConfig::default()).await?;
//! println!("Listening on http://{addr}");
//! ```
//!
//! # Contract
//!
//! | Outcome | Status | Body |
//! |---------|--------|------|
//! | Success | 200 | `{"result": {"raw_output": "...", "note": "..."}}` |
//! | Malformed body (bad JSON, wrong content type, missing or mistyped `text`) | 422 | `{"detail": "..."}` |
//! | Inference failure | 500 | `{"detail": "<error message>"}` |

mod api;
mod server;

pub use api::{AnalyzeRequest, ApiError, ErrorBody};
pub use server::{build_router, run_server, start_server};

use std::future::Future;
use std::net::SocketAddr;

use tonal_rs::SentimentAnalyzer;

/// Default port.
pub const DEFAULT_PORT: u16 = 8000;

/// Configuration for the web server.
#[derive(Debug, Clone)]
pub struct WebConfig {
    /// Address to bind to. Default: `0.0.0.0:8000`.
    pub bind_addr: SocketAddr,
    /// Allow cross-origin requests from any origin. Default: `true`.
    pub cors: bool,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)),
            cors: true,
        }
    }
}

/// Spawn the web server on a Tokio task.
///
/// Returns the bound address. The server runs until the Tokio runtime shuts
/// down.
pub async fn spawn_web(analyzer: SentimentAnalyzer, config: WebConfig) -> Result<SocketAddr, String> {
    let router = build_router(analyzer, config.cors);
    start_server(router, config.bind_addr).await
}

/// Serve in the foreground until `shutdown` resolves.
pub async fn serve_web(
    analyzer: SentimentAnalyzer,
    config: WebConfig,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), String> {
    let router = build_router(analyzer, config.cors);
    run_server(router, config.bind_addr, shutdown).await
}
