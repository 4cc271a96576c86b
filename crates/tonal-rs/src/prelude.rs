//! Convenience re-exports for common `tonal-rs` types.
//!
//! ```ignore
//! use tonal_rs::prelude::*;
//! ```

pub use crate::analyzer::SentimentAnalyzer;
pub use crate::client::LocalModelClient;
pub use crate::config::ServiceConfig;
pub use crate::envelope::{Envelope, MODEL_NOTE, wrap};
pub use crate::generate::{FnGenerator, GenerateFuture, TextGenerator};
pub use crate::parse::{SentimentLabel, parse_sentiment};
pub use crate::prompt::format_prompt;
