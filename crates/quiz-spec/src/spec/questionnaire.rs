use serde::{Deserialize, Serialize};
use std::fmt;

use crate::resolve::resolve_mode;
use crate::spec::question::Question;

/// Behavioral mode of a questionnaire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum QuestionnaireMode {
    /// Free navigation, no scoring.
    #[default]
    #[serde(rename = "question")]
    Plain,
    /// Answers are checked against accepted values.
    #[serde(rename = "test")]
    ScoredTest,
    /// Front/back reveal, no right/wrong scoring.
    #[serde(rename = "flashcard")]
    Flashcard,
}

impl QuestionnaireMode {
    /// Parses a declared type tag; unknown tags yield `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "question" => Some(Self::Plain),
            "test" => Some(Self::ScoredTest),
            "flashcard" => Some(Self::Flashcard),
            _ => None,
        }
    }

    pub fn as_tag(self) -> &'static str {
        match self {
            Self::Plain => "question",
            Self::ScoredTest => "test",
            Self::Flashcard => "flashcard",
        }
    }
}

impl fmt::Display for QuestionnaireMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

/// Questionnaire as delivered by remote sources, before its mode is resolved.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionnaireDoc {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, rename = "type")]
    pub declared_type: Option<String>,
    #[serde(default)]
    pub questionnaire_type: Option<String>,
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl QuestionnaireDoc {
    /// `questionnaireType` wins over `type` when both are present.
    pub fn declared_tag(&self) -> Option<&str> {
        self.questionnaire_type
            .as_deref()
            .or(self.declared_type.as_deref())
    }
}

/// A named, ordered set of questions with one resolved mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "QuestionnaireDoc")]
pub struct Questionnaire {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub mode: QuestionnaireMode,
    pub questions: Vec<Question>,
}

impl From<QuestionnaireDoc> for Questionnaire {
    fn from(doc: QuestionnaireDoc) -> Self {
        let mode = resolve_mode(doc.declared_tag(), &doc.questions);
        Self {
            id: doc.id,
            title: doc.title,
            description: doc.description,
            mode,
            questions: doc.questions,
        }
    }
}

impl Questionnaire {
    /// Builds a questionnaire, resolving the mode from `declared` and the questions.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        declared: Option<&str>,
        questions: Vec<Question>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            mode: resolve_mode(declared, &questions),
            questions,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn question(&self, question_id: &str) -> Option<&Question> {
        self.questions
            .iter()
            .find(|question| question.id == question_id)
    }

    pub fn last_index(&self) -> usize {
        self.questions.len().saturating_sub(1)
    }
}
