//! Service configuration with sensible defaults.
//!
//! [`ServiceConfig`] captures what a tonal process needs to reach its model
//! and converts it into a ready client via
//! [`build_client`](ServiceConfig::build_client) or a full pipeline via
//! [`build_analyzer`](ServiceConfig::build_analyzer).

use std::sync::Arc;

use crate::analyzer::SentimentAnalyzer;
use crate::client::{DEFAULT_ENDPOINT, DEFAULT_MAX_NEW_TOKENS, LocalModelClient};

/// Model id served by the default deployment.
pub const DEFAULT_MODEL: &str = "google/flan-t5-base";

/// Environment variable that overrides the default endpoint.
pub const ENDPOINT_ENV: &str = "TONAL_ENDPOINT";

/// Configuration for the inference side of the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Model server base URL. Default: `"http://127.0.0.1:8080"`.
    pub endpoint: String,
    /// Model id, for logging. Default: `"google/flan-t5-base"`.
    pub model: String,
    /// Cap on generated tokens. Default: `512`.
    pub max_new_tokens: u32,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_new_tokens: DEFAULT_MAX_NEW_TOKENS,
        }
    }
}

impl ServiceConfig {
    /// Defaults, with the endpoint taken from `TONAL_ENDPOINT` when set.
    pub fn from_env() -> Self {
        Self::default().with_endpoint_override(std::env::var(ENDPOINT_ENV).ok())
    }

    /// Replace the endpoint if `endpoint` is a non-empty value.
    pub fn with_endpoint_override(mut self, endpoint: Option<String>) -> Self {
        if let Some(endpoint) = endpoint.filter(|e| !e.trim().is_empty()) {
            self.endpoint = endpoint;
        }
        self
    }

    pub fn build_client(&self) -> Result<LocalModelClient, String> {
        Ok(LocalModelClient::new(&self.endpoint, &self.model)?
            .with_max_new_tokens(self.max_new_tokens))
    }

    pub fn build_analyzer(&self) -> Result<SentimentAnalyzer, String> {
        Ok(SentimentAnalyzer::new(Arc::new(self.build_client()?)))
    }
}
