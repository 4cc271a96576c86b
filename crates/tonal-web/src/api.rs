//! REST endpoint handlers.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use tonal_rs::{Envelope, SentimentAnalyzer};
use tracing::{debug, warn};

/// Shared application state passed to all handlers via axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: SentimentAnalyzer,
}

/// Request body for POST /analyze-sentiment.
#[derive(Deserialize, Debug)]
pub struct AnalyzeRequest {
    pub text: String,
}

/// Error body: `{"detail": "..."}`.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct ErrorBody {
    pub detail: String,
}

/// Everything a handler can fail with.
#[derive(Debug)]
pub enum ApiError {
    /// The body did not match the request shape. Always 422, whatever the
    /// extractor's own status (bad syntax, wrong content type, missing field).
    Rejected(JsonRejection),
    /// Inference (or anything after validation) failed.
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::Rejected(rejection) => {
                (StatusCode::UNPROCESSABLE_ENTITY, rejection.body_text())
            }
            ApiError::Internal(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };
        (status, Json(ErrorBody { detail })).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Rejected(rejection)
    }
}

/// POST /analyze-sentiment — Analyze one piece of text.
///
/// Returns 200 with the result envelope, 422 if the body is malformed (the
/// model is not called), or 500 with the failure message verbatim.
pub async fn analyze_sentiment(
    State(app): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<Envelope>, ApiError> {
    let Json(body) = payload.inspect_err(|e| debug!("Rejected request body: {e}"))?;

    app.analyzer
        .analyze(&body.text)
        .await
        .map(Json)
        .map_err(|e| {
            warn!("analyze-sentiment failed: {e}");
            ApiError::Internal(e)
        })
}
