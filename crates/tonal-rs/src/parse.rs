//! Best-effort parsing of model output.
//!
//! Additive only: the HTTP envelope always carries the raw text. This helper
//! exists for callers (the CLI's `--parse`, embedders) that want the label
//! and explanation the prompt asks for, when the model actually produced
//! them.

use std::fmt;
use std::str::FromStr;

/// One of the three labels the prompt asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl FromStr for SentimentLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().trim_end_matches('.').trim_matches('"');
        if s.eq_ignore_ascii_case("positive") {
            Ok(SentimentLabel::Positive)
        } else if s.eq_ignore_ascii_case("negative") {
            Ok(SentimentLabel::Negative)
        } else if s.eq_ignore_ascii_case("neutral") {
            Ok(SentimentLabel::Neutral)
        } else {
            Err(format!("unknown sentiment label: {s}"))
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SentimentLabel::Positive => write!(f, "Positive"),
            SentimentLabel::Negative => write!(f, "Negative"),
            SentimentLabel::Neutral => write!(f, "Neutral"),
        }
    }
}

/// Label and explanation recovered from raw output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSentiment {
    pub label: SentimentLabel,
    pub explanation: Option<String>,
}

/// Try to recover `Sentiment:` / `Explanation:` fields from `raw`.
///
/// Keys match case-insensitively. If no `Sentiment:` line is present but the
/// whole output is a bare label (common with small seq2seq models), that
/// label is returned without an explanation. `None` when nothing matches.
pub fn parse_sentiment(raw: &str) -> Option<ParsedSentiment> {
    let mut label = None;
    let mut explanation = None;

    for line in raw.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim();
        let value = value.trim();
        if key.eq_ignore_ascii_case("sentiment") && label.is_none() {
            label = value.parse::<SentimentLabel>().ok();
        } else if key.eq_ignore_ascii_case("explanation") && explanation.is_none() && !value.is_empty() {
            explanation = Some(value.to_string());
        }
    }

    let label = match label {
        Some(l) => l,
        None => raw.parse::<SentimentLabel>().ok()?,
    };

    Some(ParsedSentiment { label, explanation })
}
