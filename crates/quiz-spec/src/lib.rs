#![allow(missing_docs)]

pub mod answers;
pub mod defaults;
pub mod evaluate;
pub mod progress;
pub mod reconcile;
pub mod resolve;
pub mod spec;

pub use answers::{AnswerInput, AnswerMap, AnswerRecord, Correctness};
pub use defaults::{DEFAULT_QUESTIONNAIRE_ID, default_questionnaire};
pub use evaluate::evaluate_record;
pub use progress::{AnswerState, Summary, answer_states, is_completed, summarize};
pub use reconcile::attach_right_answers;
pub use resolve::resolve_mode;
pub use spec::{
    Question, QuestionKind, Questionnaire, QuestionnaireDoc, QuestionnaireMode, RightAnswer,
};
