use crate::answers::{AnswerInput, AnswerRecord, Correctness};
use crate::spec::{Question, QuestionnaireMode};

/// Produces the canonical stored record for one answer.
///
/// `question` may be absent when the question list no longer carries the id;
/// the previously snapshotted right answer is kept in that case. Correctness
/// is only computed for scored tests when `should_evaluate` is set and the
/// value is non-blank. Otherwise an earlier verdict is carried over unless the
/// incoming text replaced the value it was computed for.
pub fn evaluate_record(
    question: Option<&Question>,
    incoming: Option<AnswerInput>,
    previous: Option<&AnswerRecord>,
    should_evaluate: bool,
    mode: QuestionnaireMode,
) -> AnswerRecord {
    let previous_value = previous.and_then(|record| record.value.clone());
    let previous_revealed = previous.and_then(|record| record.revealed);

    let (value, revealed, overwritten) = match incoming {
        Some(AnswerInput::Text(text)) => {
            let overwritten = previous_value.as_deref() != Some(text.as_str());
            (Some(text), previous_revealed, overwritten)
        }
        Some(AnswerInput::Reveal(flag)) => (previous_value, Some(flag), false),
        None => (previous_value, previous_revealed, false),
    };

    let right_answer = question
        .and_then(|question| question.right_answer.clone())
        .or_else(|| previous.and_then(|record| record.right_answer.clone()));

    let mut record = AnswerRecord {
        value,
        correct: None,
        right_answer,
        revealed,
    };

    if mode != QuestionnaireMode::ScoredTest || !record.has_value() {
        return record;
    }

    record.correct = if should_evaluate {
        let accepted = record
            .right_answer
            .as_ref()
            .is_some_and(|right| right.accepts(record.trimmed_value()));
        Some(if accepted {
            Correctness::Yes
        } else {
            Correctness::No
        })
    } else if overwritten {
        None
    } else {
        previous.and_then(|record| record.correct)
    };

    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::RightAnswer;

    fn capital() -> Question {
        Question::text("q1", "Capital of France?").with_right_answer(RightAnswer::from("Paris"))
    }

    #[test]
    fn edit_without_evaluation_leaves_correct_unset() {
        let record = evaluate_record(
            Some(&capital()),
            Some("Paris".into()),
            None,
            false,
            QuestionnaireMode::ScoredTest,
        );
        assert_eq!(record.correct, None);
        assert_eq!(record.right_answer, Some(RightAnswer::from("Paris")));
    }

    #[test]
    fn blank_value_is_never_scored() {
        let record = evaluate_record(
            Some(&capital()),
            Some("   ".into()),
            None,
            true,
            QuestionnaireMode::ScoredTest,
        );
        assert_eq!(record.correct, None);
    }

    #[test]
    fn reveal_keeps_value_and_sets_flag() {
        let previous = AnswerRecord::with_value("draft");
        let record = evaluate_record(
            None,
            Some(true.into()),
            Some(&previous),
            false,
            QuestionnaireMode::Flashcard,
        );
        assert_eq!(record.value.as_deref(), Some("draft"));
        assert!(record.is_revealed());
    }

    #[test]
    fn changed_text_drops_stale_verdict() {
        let scored = evaluate_record(
            Some(&capital()),
            Some("Paris".into()),
            None,
            true,
            QuestionnaireMode::ScoredTest,
        );
        assert_eq!(scored.correct, Some(Correctness::Yes));

        let same = evaluate_record(
            Some(&capital()),
            Some("Paris".into()),
            Some(&scored),
            false,
            QuestionnaireMode::ScoredTest,
        );
        assert_eq!(same.correct, Some(Correctness::Yes));

        let edited = evaluate_record(
            Some(&capital()),
            Some("Lyon".into()),
            Some(&scored),
            false,
            QuestionnaireMode::ScoredTest,
        );
        assert_eq!(edited.correct, None);
    }
}
