use std::fmt;

use serde::Serialize;

/// Result of one modifier step on one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Outcome {
    Success,
    NotFound,
    Error(String),
    MatchCount(u64),
}

impl Outcome {
    pub fn error(message: impl fmt::Display) -> Self {
        Self::Error(message.to_string())
    }

    /// Counters accumulate across files; everything else is a status.
    pub fn is_counter(&self) -> bool {
        matches!(self, Self::MatchCount(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => f.write_str("Success"),
            Self::NotFound => f.write_str("Not found in source"),
            Self::Error(message) => write!(f, "Error: {message}"),
            Self::MatchCount(count) => write!(f, "{count}"),
        }
    }
}

/// A labelled outcome produced by a modifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionLog {
    pub label: String,
    pub outcome: Outcome,
}

impl ActionLog {
    pub fn new(label: impl Into<String>, outcome: Outcome) -> Self {
        Self {
            label: label.into(),
            outcome,
        }
    }
}

impl fmt::Display for ActionLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.label, self.outcome)
    }
}
