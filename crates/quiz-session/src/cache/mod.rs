mod fs;
mod memory;

pub use fs::FileCache;
pub use memory::MemoryCache;

use quiz_spec::AnswerMap;
use uuid::Uuid;

use crate::error::CacheError;

/// Local answer cache with one slot per questionnaire id.
///
/// Reads never fail: a missing or unreadable slot is an empty map.
pub trait AnswerCache: Send + Sync {
    fn load(&self, questionnaire_id: &str) -> AnswerMap;
    fn save(&self, questionnaire_id: &str, answers: &AnswerMap) -> Result<(), CacheError>;
    fn clear(&self, questionnaire_id: &str) -> Result<(), CacheError>;
    /// Anonymous user id, generated on first use and reused afterwards.
    fn user_id(&self) -> Result<String, CacheError>;
}

pub(crate) fn decode_answers(questionnaire_id: &str, raw: &str) -> AnswerMap {
    match serde_json::from_str(raw) {
        Ok(answers) => answers,
        Err(err) => {
            tracing::warn!(
                questionnaire_id,
                error = %err,
                "ignoring malformed cached answers"
            );
            AnswerMap::new()
        }
    }
}

pub(crate) fn generate_user_id() -> String {
    format!("user-{}", Uuid::new_v4().simple())
}
