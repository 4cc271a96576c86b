//! The request pipeline: format → generate → wrap.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::envelope::{Envelope, wrap};
use crate::generate::TextGenerator;
use crate::prompt::PromptTemplate;

/// Runs sentiment analysis against an injected [`TextGenerator`].
///
/// Cheap to clone; the generator is shared. Holds no mutable state, so one
/// instance serves any number of concurrent requests.
#[derive(Clone)]
pub struct SentimentAnalyzer {
    generator: Arc<dyn TextGenerator>,
    template: PromptTemplate,
}

impl SentimentAnalyzer {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator,
            template: PromptTemplate::sentiment(),
        }
    }

    /// Name of the underlying generator.
    pub fn generator_name(&self) -> &str {
        self.generator.name()
    }

    /// The prompt that [`analyze`](Self::analyze) would send for `text`.
    pub fn prompt_for(&self, text: &str) -> String {
        self.template.render(text)
    }

    /// Analyze `text`. Any generator failure is returned as-is.
    pub async fn analyze(&self, text: &str) -> Result<Envelope, String> {
        let prompt = self.prompt_for(text);
        debug!(
            "Analyzing {} chars with {}",
            text.chars().count(),
            self.generator.name()
        );

        let start = Instant::now();
        let raw = match self.generator.generate(&prompt).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Inference failed after {:.1}s: {e}", start.elapsed().as_secs_f64());
                return Err(e);
            }
        };
        info!(
            "Inference finished in {:.1}s ({} chars)",
            start.elapsed().as_secs_f64(),
            raw.chars().count()
        );

        Ok(wrap(raw))
    }
}

impl std::fmt::Debug for SentimentAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentimentAnalyzer")
            .field("generator", &self.generator.name())
            .finish()
    }
}
