//! Sentiment analysis over a locally hosted text-generation model.
//!
//! `tonal-rs` is the core of the tonal service: it turns free-form text into
//! a fixed instruction prompt, hands the prompt to a model, and wraps whatever
//! the model returned in a constant JSON envelope. The model output is passed
//! through unparsed; [`parse::parse_sentiment`] is available as an opt-in
//! extra for callers that want structure.
//!
//! # Getting started
//!
//! ```ignore
//! use std::sync::Arc;
//! use tonal_rs::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), String> {
//!     // Connect to a local text-generation-inference server once.
//!     let client = LocalModelClient::new("http://127.0.0.1:8080", "google/flan-t5-base")?;
//!     client.health_check().await?;
//!
//!     let analyzer = SentimentAnalyzer::new(Arc::new(client));
//!     let envelope = analyzer.analyze("I love this!").await?;
//!     println!("{}", envelope.result.raw_output);
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`prompt`] | The constant sentiment template and [`format_prompt`](prompt::format_prompt) |
//! | [`envelope`] | [`Envelope`](envelope::Envelope) and [`wrap`](envelope::wrap) |
//! | [`generate`] | [`TextGenerator`](generate::TextGenerator) trait and [`FnGenerator`](generate::FnGenerator) |
//! | [`client`] | [`LocalModelClient`](client::LocalModelClient) for a local `/generate` server |
//! | [`analyzer`] | [`SentimentAnalyzer`](analyzer::SentimentAnalyzer), the format → generate → wrap pipeline |
//! | [`parse`] | Best-effort `Sentiment:` / `Explanation:` parser |
//! | [`config`] | [`ServiceConfig`](config::ServiceConfig) defaults |
//! | [`logging`] | Tracing subscriber setup for binaries |

pub mod analyzer;
pub mod client;
pub mod config;
pub mod envelope;
pub mod generate;
pub mod logging;
pub mod parse;
pub mod prelude;
pub mod prompt;

pub use analyzer::SentimentAnalyzer;
pub use client::LocalModelClient;
pub use config::{DEFAULT_MODEL, ServiceConfig};
pub use envelope::{AnalysisResult, Envelope, MODEL_NOTE, wrap};
pub use generate::{FnGenerator, GenerateFuture, TextGenerator};
pub use parse::{ParsedSentiment, SentimentLabel, parse_sentiment};
pub use prompt::{PromptTemplate, format_prompt};
