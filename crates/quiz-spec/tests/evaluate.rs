use quiz_spec::{
    AnswerRecord, Correctness, Question, QuestionnaireMode, RightAnswer, evaluate_record,
};

fn paris() -> Question {
    Question::text("q1", "Capital of France?").with_right_answer(RightAnswer::from("Paris"))
}

fn cat() -> Question {
    Question::text("q2", "A small domestic animal").with_right_answer(RightAnswer::from(vec![
        "cat", "feline",
    ]))
}

fn finalize(question: &Question, value: &str) -> AnswerRecord {
    let edited = evaluate_record(
        Some(question),
        Some(value.into()),
        None,
        false,
        QuestionnaireMode::ScoredTest,
    );
    evaluate_record(
        Some(question),
        None,
        Some(&edited),
        true,
        QuestionnaireMode::ScoredTest,
    )
}

#[test]
fn padded_lowercase_answer_is_correct() {
    assert_eq!(finalize(&paris(), " paris ").correct, Some(Correctness::Yes));
}

#[test]
fn wrong_answer_is_incorrect() {
    assert_eq!(finalize(&paris(), "London").correct, Some(Correctness::No));
}

#[test]
fn any_candidate_of_many_is_accepted() {
    assert_eq!(finalize(&cat(), "Feline").correct, Some(Correctness::Yes));
    assert_eq!(finalize(&cat(), "dog").correct, Some(Correctness::No));
}

#[test]
fn question_without_right_answer_scores_incorrect() {
    let question = Question::text("q3", "Anything");
    assert_eq!(finalize(&question, "something").correct, Some(Correctness::No));
}

#[test]
fn non_test_modes_never_score() {
    for mode in [QuestionnaireMode::Plain, QuestionnaireMode::Flashcard] {
        let record = evaluate_record(Some(&paris()), Some("Paris".into()), None, true, mode);
        assert_eq!(record.correct, None, "mode {mode}");
    }
}

#[test]
fn snapshot_falls_back_to_previous_when_question_is_missing() {
    let previous = AnswerRecord {
        value: Some("Paris".into()),
        correct: Some(Correctness::Yes),
        right_answer: Some(RightAnswer::from("Paris")),
        revealed: None,
    };
    let record = evaluate_record(None, None, Some(&previous), false, QuestionnaireMode::ScoredTest);
    assert_eq!(record, previous);
}

#[test]
fn live_question_snapshot_replaces_stale_one() {
    let previous = AnswerRecord {
        value: Some("Paris".into()),
        correct: None,
        right_answer: Some(RightAnswer::from("Lutetia")),
        revealed: None,
    };
    let record = evaluate_record(
        Some(&paris()),
        None,
        Some(&previous),
        false,
        QuestionnaireMode::ScoredTest,
    );
    assert_eq!(record.right_answer, Some(RightAnswer::from("Paris")));
}

#[test]
fn reevaluation_is_not_downgraded_without_request() {
    let scored = finalize(&paris(), "London");
    let again = evaluate_record(
        Some(&paris()),
        None,
        Some(&scored),
        false,
        QuestionnaireMode::ScoredTest,
    );
    assert_eq!(again.correct, Some(Correctness::No));
}
