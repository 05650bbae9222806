use serde_json::json;

use quiz_spec::{
    AnswerMap, Correctness, QuestionKind, Questionnaire, QuestionnaireMode, RightAnswer,
    default_questionnaire,
};

#[test]
fn questionnaire_type_tag_takes_precedence_over_type() {
    let questionnaire: Questionnaire = serde_json::from_value(json!({
        "id": "history-test",
        "title": "History",
        "description": "Quiz",
        "type": "question",
        "questionnaireType": "test",
        "questions": [
            { "id": "q1", "text": "Year?", "type": "text", "rightAnswer": "1918" }
        ]
    }))
    .expect("questionnaire parses");

    assert_eq!(questionnaire.mode, QuestionnaireMode::ScoredTest);
    assert_eq!(
        questionnaire.questions[0].right_answer,
        Some(RightAnswer::from("1918"))
    );
}

#[test]
fn untagged_cards_are_resolved_on_parse() {
    let questionnaire: Questionnaire = serde_json::from_value(json!({
        "id": "rivers-flashcard",
        "title": "Rivers",
        "description": "",
        "questions": [
            { "id": "c1", "text": "Longest river in Czechia?", "type": "text", "rightAnswer": ["Vltava"] },
            { "id": "c2", "text": "Where does it flow?", "type": "text" }
        ]
    }))
    .expect("questionnaire parses");

    assert_eq!(questionnaire.mode, QuestionnaireMode::Flashcard);
}

#[test]
fn serialized_questionnaire_reads_back_with_same_mode() {
    let original = default_questionnaire();
    let value = serde_json::to_value(&original).expect("serializes");
    assert_eq!(value["type"], "question");
    assert_eq!(value["questions"][2]["scaleMax"], 10);

    let parsed: Questionnaire = serde_json::from_value(value).expect("parses");
    assert_eq!(parsed, original);
    assert_eq!(parsed.questions[1].kind, QuestionKind::MultiChoice);
}

#[test]
fn legacy_string_answers_are_read_as_values() {
    let answers: AnswerMap = serde_json::from_value(json!({
        "nickname": "Ada",
        "q1": { "value": "Paris", "correct": "yes", "rightAnswer": "Paris" },
        "c1": { "revealed": true }
    }))
    .expect("answers parse");

    assert_eq!(answers["nickname"].value.as_deref(), Some("Ada"));
    assert_eq!(answers["q1"].correct, Some(Correctness::Yes));
    assert!(answers["c1"].is_revealed());
    assert_eq!(answers["c1"].value, None);
}

#[test]
fn unset_fields_are_omitted_when_serialized() {
    let answers: AnswerMap = serde_json::from_value(json!({ "q1": "Paris" })).expect("parses");
    let value = serde_json::to_value(&answers).expect("serializes");
    assert_eq!(value, json!({ "q1": { "value": "Paris" } }));
}
