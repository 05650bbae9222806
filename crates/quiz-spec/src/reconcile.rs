use std::collections::HashMap;

use crate::answers::AnswerMap;
use crate::evaluate::evaluate_record;
use crate::spec::{Question, QuestionnaireMode};

/// Refreshes right-answer snapshots of stored answers against the latest questions.
///
/// User values, reveal flags and earlier verdicts survive; correctness is never
/// recomputed here. Entries whose question disappeared keep their snapshot.
pub fn attach_right_answers(
    raw: AnswerMap,
    questions: &[Question],
    mode: QuestionnaireMode,
) -> AnswerMap {
    if raw.is_empty() {
        return raw;
    }

    let by_id: HashMap<&str, &Question> = questions
        .iter()
        .map(|question| (question.id.as_str(), question))
        .collect();

    raw.into_iter()
        .map(|(question_id, record)| {
            let question = by_id.get(question_id.as_str()).copied();
            let refreshed = evaluate_record(question, None, Some(&record), false, mode);
            (question_id, refreshed)
        })
        .collect()
}
