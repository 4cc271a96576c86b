//! Prompt template for sentiment analysis.
//!
//! The template is a constant instruction block with a single `{text}`
//! placeholder. [`format_prompt`] inserts the caller's text verbatim — no
//! escaping, no re-substitution — so the same input always produces the same
//! prompt bytes.

/// Instruction text before the caller's text.
const SENTIMENT_PREFIX: &str = "
Analyze the sentiment of this text: \"";

/// Instruction text after the caller's text.
///
/// Asks the model for one of three labels plus a one-sentence explanation,
/// and shows the expected two-line output shape. The format request is
/// advisory: nothing downstream enforces it.
const SENTIMENT_SUFFIX: &str = "\".
Determine if it is \"Positive\", \"Negative\", or \"Neutral\".
Explain why in one short sentence.

Format the output exactly like this example:
Sentiment: Positive
Explanation: The user expressed great joy.

Now analyze:
";

/// The sentiment template, held as the two halves around the `{text}` slot.
///
/// Rendering is a plain concatenation, so text that itself contains `{text}`
/// or quotes is left alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptTemplate {
    prefix: &'static str,
    suffix: &'static str,
}

impl PromptTemplate {
    /// The built-in sentiment template.
    pub const fn sentiment() -> Self {
        Self {
            prefix: SENTIMENT_PREFIX,
            suffix: SENTIMENT_SUFFIX,
        }
    }

    /// Insert `text` at the placeholder.
    pub fn render(&self, text: &str) -> String {
        let mut out = String::with_capacity(self.prefix.len() + text.len() + self.suffix.len());
        out.push_str(self.prefix);
        out.push_str(text);
        out.push_str(self.suffix);
        out
    }
}

/// Format the sentiment prompt for `text`.
pub fn format_prompt(text: &str) -> String {
    PromptTemplate::sentiment().render(text)
}
