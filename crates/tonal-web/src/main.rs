//! Sentiment analysis HTTP server.
//!
//! Connects to a local text-generation-inference server once at startup,
//! then serves `POST /analyze-sentiment` until Ctrl-C.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p tonal-web
//! cargo run -p tonal-web -- --port 9000
//! cargo run -p tonal-web -- --endpoint http://127.0.0.1:8081
//! ```
//!
//! ```bash
//! curl -s localhost:8000/analyze-sentiment \
//!   -H 'content-type: application/json' \
//!   -d '{"text": "I love this!"}'
//! ```

use std::net::{IpAddr, SocketAddr};

use clap::Parser;
use tonal_rs::ServiceConfig;
use tonal_rs::client::DEFAULT_MAX_NEW_TOKENS;
use tonal_rs::logging::init_tracing;
use tonal_web::{DEFAULT_PORT, WebConfig, serve_web};
use tracing::{info, warn};

/// Sentiment analysis HTTP server.
#[derive(Parser)]
#[command(about = "Serve sentiment analysis backed by a local model")]
struct Args {
    /// Interface to bind.
    #[arg(long, default_value = "0.0.0.0")]
    host: IpAddr,

    /// Port to listen on.
    #[arg(long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Model server base URL (defaults to $TONAL_ENDPOINT, then http://127.0.0.1:8080).
    #[arg(long)]
    endpoint: Option<String>,

    /// Maximum tokens to generate per request.
    #[arg(long, default_value_t = DEFAULT_MAX_NEW_TOKENS)]
    max_new_tokens: u32,

    /// Start serving without waiting for the model server to report healthy.
    #[arg(long)]
    skip_health_check: bool,

    /// Disable permissive CORS headers.
    #[arg(long)]
    no_cors: bool,

    /// Enable debug logging.
    #[arg(long, short)]
    verbose: bool,
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}

#[tokio::main]
async fn main() -> Result<(), String> {
    let args = Args::parse();
    init_tracing(args.verbose);

    // 1. The model handle, built once.
    let config = ServiceConfig {
        max_new_tokens: args.max_new_tokens,
        ..ServiceConfig::from_env()
    }
    .with_endpoint_override(args.endpoint);

    info!(
        "Loading local AI model ({})... this happens once.",
        config.model
    );
    let client = config.build_client()?;
    if args.skip_health_check {
        warn!("Skipping model health check");
    } else {
        client.health_check().await?;
        info!("Model server ready at {}", config.endpoint);
    }

    // 2. Inject it into the router and serve.
    let analyzer = tonal_rs::SentimentAnalyzer::new(std::sync::Arc::new(client));
    info!("Serving with generator {}", analyzer.generator_name());
    let web_config = WebConfig {
        bind_addr: SocketAddr::new(args.host, args.port),
        cors: !args.no_cors,
    };
    serve_web(analyzer, web_config, shutdown_signal()).await
}
