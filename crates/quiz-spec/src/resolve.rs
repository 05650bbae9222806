use crate::spec::{Question, QuestionnaireMode};

/// Infers the questionnaire mode.
///
/// A known declared tag always wins. Without one, a questionnaire made only of
/// plain free-text prompts where at least one prompt carries right-answer
/// content is treated as a flashcard deck; everything else is a plain
/// question set.
pub fn resolve_mode(declared: Option<&str>, questions: &[Question]) -> QuestionnaireMode {
    if let Some(mode) = declared.and_then(QuestionnaireMode::from_tag) {
        return mode;
    }

    let all_plain_text = questions.iter().all(Question::is_plain_text);
    let any_back_face = questions.iter().any(Question::has_right_answer);
    if all_plain_text && any_back_face {
        QuestionnaireMode::Flashcard
    } else {
        QuestionnaireMode::Plain
    }
}
