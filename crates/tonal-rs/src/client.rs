//! HTTP client for a locally hosted text-generation server.
//!
//! Speaks the text-generation-inference `/generate` protocol, which serves
//! seq2seq models such as `google/flan-t5-base`. Decoding is greedy
//! (`do_sample: false`), the equivalent of temperature 0.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::generate::{GenerateFuture, TextGenerator};

/// Default model server address.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8080";

/// Default cap on generated tokens.
pub const DEFAULT_MAX_NEW_TOKENS: u32 = 512;

// ── Wire types ─────────────────────────────────────────────────────

/// Request body for `POST /generate`.
#[derive(Serialize, Debug)]
pub struct GenerateRequest<'a> {
    pub inputs: &'a str,
    pub parameters: GenerateParameters,
}

/// Generation parameters.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct GenerateParameters {
    pub max_new_tokens: u32,
    pub do_sample: bool,
}

impl Default for GenerateParameters {
    fn default() -> Self {
        Self {
            max_new_tokens: DEFAULT_MAX_NEW_TOKENS,
            do_sample: false,
        }
    }
}

#[derive(Deserialize, Debug)]
struct GenerateResponse {
    generated_text: String,
}

#[derive(Deserialize, Debug)]
struct ServerError {
    error: String,
}

// ── Client ─────────────────────────────────────────────────────────

/// Async client for the model server.
///
/// Built without a request timeout: generation takes as long as it takes.
#[derive(Debug, Clone)]
pub struct LocalModelClient {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    parameters: GenerateParameters,
}

impl LocalModelClient {
    /// Create a client for the server at `endpoint` serving `model`.
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Result<Self, String> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("tonal-rs/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| format!("failed to build HTTP client: {e}"))?;
        Ok(Self {
            client,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            model: model.into(),
            parameters: GenerateParameters::default(),
        })
    }

    /// Override the generated-token cap.
    pub fn with_max_new_tokens(mut self, max_new_tokens: u32) -> Self {
        self.parameters.max_new_tokens = max_new_tokens;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn parameters(&self) -> &GenerateParameters {
        &self.parameters
    }

    /// Check that the model server is up and has its weights loaded.
    pub async fn health_check(&self) -> Result<(), String> {
        let url = format!("{}/health", self.endpoint);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| format!("model server unreachable at {}: {e}", self.endpoint))?;
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(format!("model server health check failed: HTTP {status}"))
        }
    }

    /// Run one generation.
    pub async fn complete(&self, prompt: &str) -> Result<String, String> {
        let body = GenerateRequest {
            inputs: prompt,
            parameters: self.parameters.clone(),
        };
        debug!(
            "Model request: model={}, prompt={} chars, max_new_tokens={}",
            self.model,
            prompt.chars().count(),
            self.parameters.max_new_tokens,
        );
        trace!("Model prompt: {prompt}");

        let start = Instant::now();

        let resp = self
            .client
            .post(format!("{}/generate", self.endpoint))
            .json(&body)
            .send()
            .await
            .map_err(|e| format!("request failed: {e}"))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| format!("failed to read response: {e}"))?;

        debug!(
            "Model response: HTTP {} in {:.1}s ({} bytes)",
            status,
            start.elapsed().as_secs_f64(),
            text.len()
        );

        parse_generate_response(status, &text)
    }
}

/// Turn a `/generate` response into output text or an error message.
fn parse_generate_response(status: reqwest::StatusCode, body: &str) -> Result<String, String> {
    if !status.is_success() {
        return Err(match serde_json::from_str::<ServerError>(body) {
            Ok(err) => err.error,
            Err(_) => format!("model server HTTP {status}: {body}"),
        });
    }

    // TGI answers with an object; some builds wrap it in a one-element array.
    let parsed = serde_json::from_str::<GenerateResponse>(body).or_else(|_| {
        serde_json::from_str::<Vec<GenerateResponse>>(body)
            .map_err(|e| format!("failed to parse response: {e}"))?
            .into_iter()
            .next()
            .ok_or_else(|| "model server returned no generations".to_string())
    })?;

    trace!("Model output: {}", parsed.generated_text);
    Ok(parsed.generated_text)
}

impl TextGenerator for LocalModelClient {
    fn name(&self) -> &str {
        &self.model
    }

    fn generate(&self, prompt: &str) -> GenerateFuture<'_> {
        let prompt = prompt.to_string();
        Box::pin(async move { self.complete(&prompt).await })
    }
}
