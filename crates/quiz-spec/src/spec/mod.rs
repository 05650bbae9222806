pub mod question;
pub mod questionnaire;

pub use question::{Question, QuestionKind, RightAnswer};
pub use questionnaire::{Questionnaire, QuestionnaireDoc, QuestionnaireMode};
