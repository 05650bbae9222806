use proptest::prelude::*;

use quiz_spec::{
    AnswerMap, AnswerRecord, Correctness, Question, QuestionnaireMode, RightAnswer,
    attach_right_answers,
};

fn questions() -> Vec<Question> {
    vec![
        Question::text("q1", "Capital of France?").with_right_answer(RightAnswer::from("Paris")),
        Question::text("q2", "Pet").with_right_answer(RightAnswer::from(vec!["cat", "feline"])),
        Question::scale("q3", "Confidence", 10),
    ]
}

#[test]
fn empty_map_is_returned_untouched() {
    let result = attach_right_answers(AnswerMap::new(), &questions(), QuestionnaireMode::ScoredTest);
    assert!(result.is_empty());
}

#[test]
fn values_survive_and_snapshots_are_attached() {
    let mut raw = AnswerMap::new();
    raw.insert("q1".into(), AnswerRecord::with_value("paris"));
    raw.insert("q3".into(), AnswerRecord::with_value("7"));

    let result = attach_right_answers(raw, &questions(), QuestionnaireMode::ScoredTest);

    assert_eq!(result["q1"].value.as_deref(), Some("paris"));
    assert_eq!(result["q1"].right_answer, Some(RightAnswer::from("Paris")));
    assert_eq!(result["q1"].correct, None);
    assert_eq!(result["q3"].right_answer, None);
}

#[test]
fn orphaned_entries_keep_their_snapshot() {
    let mut raw = AnswerMap::new();
    raw.insert(
        "gone".into(),
        AnswerRecord {
            value: Some("42".into()),
            correct: Some(Correctness::Yes),
            right_answer: Some(RightAnswer::from("42")),
            revealed: None,
        },
    );

    let result = attach_right_answers(raw.clone(), &questions(), QuestionnaireMode::ScoredTest);
    assert_eq!(result, raw);
}

#[test]
fn verdicts_from_other_modes_are_dropped() {
    let mut raw = AnswerMap::new();
    raw.insert(
        "q1".into(),
        AnswerRecord {
            value: Some("Paris".into()),
            correct: Some(Correctness::Yes),
            right_answer: None,
            revealed: None,
        },
    );

    let result = attach_right_answers(raw, &questions(), QuestionnaireMode::Plain);
    assert_eq!(result["q1"].correct, None);
}

fn record_strategy() -> impl Strategy<Value = AnswerRecord> {
    (
        proptest::option::of("[ a-zA-Z]{0,8}"),
        proptest::option::of(prop_oneof![Just(Correctness::Yes), Just(Correctness::No)]),
        proptest::option::of("[a-z]{1,6}"),
        proptest::option::of(any::<bool>()),
    )
        .prop_map(|(value, correct, right, revealed)| AnswerRecord {
            value,
            correct,
            right_answer: right.map(RightAnswer::Single),
            revealed,
        })
}

fn mode_strategy() -> impl Strategy<Value = QuestionnaireMode> {
    prop_oneof![
        Just(QuestionnaireMode::Plain),
        Just(QuestionnaireMode::ScoredTest),
        Just(QuestionnaireMode::Flashcard),
    ]
}

proptest! {
    #[test]
    fn reconciliation_is_idempotent(
        entries in proptest::collection::btree_map("q[1-5]", record_strategy(), 0..5),
        mode in mode_strategy(),
    ) {
        let once = attach_right_answers(entries, &questions(), mode);
        let twice = attach_right_answers(once.clone(), &questions(), mode);
        prop_assert_eq!(once, twice);
    }
}
