use serde::Serialize;

use crate::answers::{AnswerMap, Correctness};
use crate::spec::{Question, QuestionnaireMode};

/// Completion predicate gating submission.
///
/// Flashcard decks are complete once every card was revealed; other modes once
/// every question holds a non-blank value.
pub fn is_completed(questions: &[Question], mode: QuestionnaireMode, answers: &AnswerMap) -> bool {
    questions.iter().all(|question| {
        let record = answers.get(&question.id);
        match mode {
            QuestionnaireMode::Flashcard => record.is_some_and(|record| record.is_revealed()),
            _ => record.is_some_and(|record| record.has_value()),
        }
    })
}

/// Per-question badge state shown in progress and result views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerState {
    Pending,
    Correct,
    Incorrect,
}

pub fn answer_states(
    questions: &[Question],
    mode: QuestionnaireMode,
    answers: &AnswerMap,
) -> Vec<AnswerState> {
    questions
        .iter()
        .map(|question| {
            let Some(record) = answers.get(&question.id) else {
                return AnswerState::Pending;
            };
            if mode == QuestionnaireMode::Flashcard {
                return if record.is_revealed() {
                    AnswerState::Correct
                } else {
                    AnswerState::Pending
                };
            }
            if !record.has_value() {
                return AnswerState::Pending;
            }
            match record.correct {
                Some(Correctness::Yes) => AnswerState::Correct,
                Some(Correctness::No) => AnswerState::Incorrect,
                None => AnswerState::Pending,
            }
        })
        .collect()
}

/// Result summary; for flashcards `correct` counts reviewed cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub mode: QuestionnaireMode,
    pub states: Vec<AnswerState>,
    pub correct: usize,
    pub incorrect: usize,
    pub total: usize,
    pub score_percent: u32,
}

impl Summary {
    pub fn remaining(&self) -> usize {
        self.total - self.correct
    }
}

pub fn summarize(questions: &[Question], mode: QuestionnaireMode, answers: &AnswerMap) -> Summary {
    let states = answer_states(questions, mode, answers);
    let correct = states
        .iter()
        .filter(|state| **state == AnswerState::Correct)
        .count();
    let incorrect = states
        .iter()
        .filter(|state| **state == AnswerState::Incorrect)
        .count();
    let total = questions.len();
    let score_percent = if total == 0 {
        0
    } else {
        ((correct * 100) as f64 / total as f64).round() as u32
    };

    Summary {
        mode,
        states,
        correct,
        incorrect,
        total,
        score_percent,
    }
}
