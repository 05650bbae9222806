use serde::{Deserialize, Serialize};

/// Supported input kinds for a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestionKind {
    #[serde(rename = "text")]
    Text,
    #[serde(rename = "multichoice")]
    MultiChoice,
    #[serde(rename = "scale")]
    Scale,
}

/// Accepted answer(s) for a question; doubles as the back face of a flashcard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RightAnswer {
    Single(String),
    Many(Vec<String>),
}

impl RightAnswer {
    pub fn candidates(&self) -> &[String] {
        match self {
            RightAnswer::Single(value) => std::slice::from_ref(value),
            RightAnswer::Many(values) => values,
        }
    }

    /// True when at least one candidate is non-blank.
    pub fn has_content(&self) -> bool {
        self.candidates()
            .iter()
            .any(|candidate| !candidate.trim().is_empty())
    }

    /// Case- and whitespace-insensitive match against any candidate.
    pub fn accepts(&self, value: &str) -> bool {
        let submitted = normalize(value);
        self.candidates()
            .iter()
            .any(|candidate| normalize(candidate) == submitted)
    }
}

fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Definition of a single prompt inside a questionnaire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale_max: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right_answer: Option<RightAnswer>,
}

impl Question {
    pub fn text(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            kind: QuestionKind::Text,
            options: None,
            scale_max: None,
            right_answer: None,
        }
    }

    pub fn choice(id: impl Into<String>, text: impl Into<String>, options: Vec<String>) -> Self {
        Self {
            kind: QuestionKind::MultiChoice,
            options: Some(options),
            ..Self::text(id, text)
        }
    }

    pub fn scale(id: impl Into<String>, text: impl Into<String>, scale_max: u32) -> Self {
        Self {
            kind: QuestionKind::Scale,
            scale_max: Some(scale_max),
            ..Self::text(id, text)
        }
    }

    pub fn with_right_answer(mut self, right_answer: RightAnswer) -> Self {
        self.right_answer = Some(right_answer);
        self
    }

    /// Free-text prompt without options or scale, the shape flashcards share.
    pub fn is_plain_text(&self) -> bool {
        self.kind == QuestionKind::Text
            && self.options.as_ref().is_none_or(Vec::is_empty)
            && self.scale_max.is_none()
    }

    pub fn has_right_answer(&self) -> bool {
        self.right_answer
            .as_ref()
            .is_some_and(RightAnswer::has_content)
    }
}

impl From<&str> for RightAnswer {
    fn from(value: &str) -> Self {
        RightAnswer::Single(value.to_string())
    }
}

impl From<Vec<&str>> for RightAnswer {
    fn from(values: Vec<&str>) -> Self {
        RightAnswer::Many(values.into_iter().map(str::to_string).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ignores_case_and_padding() {
        let answer = RightAnswer::from("Paris");
        assert!(answer.accepts("  paris "));
        assert!(!answer.accepts("London"));
    }

    #[test]
    fn blank_candidates_have_no_content() {
        assert!(!RightAnswer::from(vec!["", "   "]).has_content());
        assert!(RightAnswer::from(vec!["", "cat"]).has_content());
    }

    #[test]
    fn empty_options_still_count_as_plain_text() {
        let mut question = Question::text("q1", "Front");
        question.options = Some(Vec::new());
        assert!(question.is_plain_text());
        assert!(!Question::scale("q2", "Rate", 5).is_plain_text());
    }
}
