use crate::spec::{Question, Questionnaire};

pub const DEFAULT_QUESTIONNAIRE_ID: &str = "getting-to-know-you";

/// Built-in questionnaire used until (or instead of) remote data.
pub fn default_questionnaire() -> Questionnaire {
    let options = |values: &[&str]| -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    };
    Questionnaire::new(
        DEFAULT_QUESTIONNAIRE_ID,
        "Getting to Know You",
        None,
        vec![
            Question::text("nickname", "What nickname do you like to use?"),
            Question::choice(
                "favSubject",
                "Which subject do you enjoy most?",
                options(&["Math", "Science", "History", "Art", "Sports"]),
            ),
            Question::scale(
                "confidence",
                "How confident do you feel about school this year?",
                10,
            ),
            Question::text("hobby", "What hobby makes you lose track of time?"),
            Question::choice(
                "studyStyle",
                "Pick a study style you prefer.",
                options(&[
                    "Quiet reading",
                    "Group discussion",
                    "Hands-on projects",
                    "Watching videos",
                ]),
            ),
        ],
    )
    .with_description("Answer the following to personalize your learning path.")
}
