use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use quiz_spec::AnswerMap;

use super::{AnswerCache, decode_answers, generate_user_id};
use crate::error::CacheError;

/// Process-local cache holding serialized slots, like browser storage would.
#[derive(Debug, Default)]
pub struct MemoryCache {
    inner: Mutex<MemorySlots>,
}

#[derive(Debug, Default)]
struct MemorySlots {
    answers: HashMap<String, String>,
    user_id: Option<String>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a slot with raw serialized content, malformed or not.
    pub fn insert_raw(&self, questionnaire_id: &str, raw: impl Into<String>) {
        self.slots()
            .answers
            .insert(questionnaire_id.to_string(), raw.into());
    }

    pub fn contains(&self, questionnaire_id: &str) -> bool {
        self.slots().answers.contains_key(questionnaire_id)
    }

    fn slots(&self) -> MutexGuard<'_, MemorySlots> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl AnswerCache for MemoryCache {
    fn load(&self, questionnaire_id: &str) -> AnswerMap {
        match self.slots().answers.get(questionnaire_id) {
            Some(raw) => decode_answers(questionnaire_id, raw),
            None => AnswerMap::new(),
        }
    }

    fn save(&self, questionnaire_id: &str, answers: &AnswerMap) -> Result<(), CacheError> {
        let raw = serde_json::to_string(answers)?;
        self.slots()
            .answers
            .insert(questionnaire_id.to_string(), raw);
        Ok(())
    }

    fn clear(&self, questionnaire_id: &str) -> Result<(), CacheError> {
        self.slots().answers.remove(questionnaire_id);
        Ok(())
    }

    fn user_id(&self) -> Result<String, CacheError> {
        Ok(self
            .slots()
            .user_id
            .get_or_insert_with(generate_user_id)
            .clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_spec::AnswerRecord;

    #[test]
    fn malformed_slot_reads_as_empty() {
        let cache = MemoryCache::new();
        cache.insert_raw("broken", "{not json");
        assert!(cache.load("broken").is_empty());
    }

    #[test]
    fn save_clear_roundtrip() {
        let cache = MemoryCache::new();
        let mut answers = AnswerMap::new();
        answers.insert("q1".into(), AnswerRecord::with_value("Paris"));

        cache.save("quiz", &answers).expect("save");
        assert_eq!(cache.load("quiz"), answers);

        cache.clear("quiz").expect("clear");
        assert!(!cache.contains("quiz"));
    }

    #[test]
    fn user_id_is_stable() {
        let cache = MemoryCache::new();
        let first = cache.user_id().expect("user id");
        assert!(first.starts_with("user-"));
        assert_eq!(cache.user_id().expect("user id"), first);
    }
}
