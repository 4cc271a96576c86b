//! Axum server setup and router construction.

use std::future::Future;
use std::net::SocketAddr;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use tonal_rs::SentimentAnalyzer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::api::{self, AppState};

/// Build the full axum router.
///
/// The router serves `POST /analyze-sentiment`; everything else is 404.
/// Request bodies are not size-capped: `text` has no length limit.
pub fn build_router(analyzer: SentimentAnalyzer, cors: bool) -> Router {
    let app_state = AppState { analyzer };

    let mut router = Router::new()
        .route("/analyze-sentiment", post(api::analyze_sentiment))
        .with_state(app_state)
        .layer(DefaultBodyLimit::disable())
        .layer(TraceLayer::new_for_http());

    // Browser clients on other origins.
    if cors {
        router = router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    router
}

/// Bind `bind_addr`, serve `router` on a background task, and return the
/// bound address.
pub async fn start_server(router: Router, bind_addr: SocketAddr) -> Result<SocketAddr, String> {
    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .map_err(|e| format!("failed to bind {bind_addr}: {e}"))?;
    let addr = listener
        .local_addr()
        .map_err(|e| format!("failed to read bound address: {e}"))?;

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router).await {
            warn!("server stopped: {e}");
        }
    });

    Ok(addr)
}

/// Bind `bind_addr` and serve `router` until `shutdown` resolves.
pub async fn run_server(
    router: Router,
    bind_addr: SocketAddr,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), String> {
    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .map_err(|e| format!("failed to bind {bind_addr}: {e}"))?;
    let addr = listener
        .local_addr()
        .map_err(|e| format!("failed to read bound address: {e}"))?;
    info!("Listening on http://{addr}");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| format!("server error: {e}"))
}
