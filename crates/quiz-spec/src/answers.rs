use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::spec::RightAnswer;

/// Outcome of a scored evaluation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Correctness {
    Yes,
    No,
}

/// Stored state for one question's answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredAnswer")]
pub struct AnswerRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct: Option<Correctness>,
    #[serde(
        default,
        rename = "rightAnswer",
        skip_serializing_if = "Option::is_none"
    )]
    pub right_answer: Option<RightAnswer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revealed: Option<bool>,
}

impl AnswerRecord {
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn trimmed_value(&self) -> &str {
        self.value.as_deref().map(str::trim).unwrap_or_default()
    }

    pub fn has_value(&self) -> bool {
        !self.trimmed_value().is_empty()
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed == Some(true)
    }
}

/// Answers keyed by question id.
pub type AnswerMap = BTreeMap<String, AnswerRecord>;

/// Live edit coming from the consumer: typed text or a flashcard flip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerInput {
    Text(String),
    Reveal(bool),
}

impl From<&str> for AnswerInput {
    fn from(value: &str) -> Self {
        AnswerInput::Text(value.to_string())
    }
}

impl From<String> for AnswerInput {
    fn from(value: String) -> Self {
        AnswerInput::Text(value)
    }
}

impl From<bool> for AnswerInput {
    fn from(revealed: bool) -> Self {
        AnswerInput::Reveal(revealed)
    }
}

// Older clients stored a bare string per question id.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredAnswer {
    Legacy(String),
    Record(StoredRecord),
}

#[derive(Deserialize)]
struct StoredRecord {
    #[serde(default)]
    value: Option<String>,
    #[serde(default)]
    correct: Option<Correctness>,
    #[serde(default, rename = "rightAnswer")]
    right_answer: Option<RightAnswer>,
    #[serde(default)]
    revealed: Option<bool>,
}

impl From<StoredAnswer> for AnswerRecord {
    fn from(stored: StoredAnswer) -> Self {
        match stored {
            StoredAnswer::Legacy(value) => AnswerRecord::with_value(value),
            StoredAnswer::Record(record) => AnswerRecord {
                value: record.value,
                correct: record.correct,
                right_answer: record.right_answer,
                revealed: record.revealed,
            },
        }
    }
}
