//! The fixed JSON envelope returned to callers.

use serde::{Deserialize, Serialize};

/// Informational note attached to every result.
///
/// Hardcoded: it names the model the service was built around and does not
/// follow the model actually configured at runtime.
pub const MODEL_NOTE: &str = "Processed locally with Flan-T5-Base (Free)";

/// `{ "result": { "raw_output": ..., "note": ... } }`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub result: AnalysisResult,
}

/// Inner body of an [`Envelope`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AnalysisResult {
    /// Model output exactly as returned, unparsed.
    pub raw_output: String,
    pub note: String,
}

/// Wrap raw model output in the response envelope.
pub fn wrap(raw_output: impl Into<String>) -> Envelope {
    Envelope {
        result: AnalysisResult {
            raw_output: raw_output.into(),
            note: MODEL_NOTE.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_serializes_to_fixed_shape() {
        let env = wrap("Sentiment: Neutral\nExplanation: It is a fact.");
        let json = serde_json::to_value(&env).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "result": {
                    "raw_output": "Sentiment: Neutral\nExplanation: It is a fact.",
                    "note": "Processed locally with Flan-T5-Base (Free)"
                }
            })
        );
    }

    #[test]
    fn note_never_varies() {
        for raw in ["", "Positive", "garbage {\"json\": 1}", "Sentiment: Negative"] {
            assert_eq!(wrap(raw).result.note, MODEL_NOTE);
        }
    }

    #[test]
    fn raw_output_is_untouched() {
        let raw = "  leading spaces\r\nand CRLF\t";
        assert_eq!(wrap(raw).result.raw_output, raw);
    }
}
