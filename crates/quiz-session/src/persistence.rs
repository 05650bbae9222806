use std::sync::Arc;

use quiz_spec::{AnswerMap, Questionnaire};

use crate::cache::{AnswerCache, FileCache};
use crate::config::ClientConfig;
use crate::error::{RemoteError, SessionError};
use crate::remote::{AnswerSubmission, HttpRemoteStore, RemoteStore};

/// Capability object the session persists through: a keyed local cache and a
/// remote store, bound to one anonymous user id.
#[derive(Clone)]
pub struct Persistence {
    cache: Arc<dyn AnswerCache>,
    remote: Arc<dyn RemoteStore>,
    user_id: String,
}

impl Persistence {
    pub fn new(
        cache: Arc<dyn AnswerCache>,
        remote: Arc<dyn RemoteStore>,
    ) -> Result<Self, SessionError> {
        let user_id = cache.user_id()?;
        Ok(Self {
            cache,
            remote,
            user_id,
        })
    }

    /// File cache under `cache_dir` plus the HTTP store at `api_base`.
    pub fn from_config(config: &ClientConfig) -> Result<Self, SessionError> {
        let cache = Arc::new(FileCache::new(&config.cache_dir));
        let remote = Arc::new(HttpRemoteStore::new(config)?);
        Self::new(cache, remote)
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn load_local(&self, questionnaire_id: &str) -> AnswerMap {
        self.cache.load(questionnaire_id)
    }

    /// Local writes never fail the caller; the in-memory state stays authoritative.
    pub fn save_local(&self, questionnaire_id: &str, answers: &AnswerMap) {
        if let Err(err) = self.cache.save(questionnaire_id, answers) {
            tracing::warn!(questionnaire_id, error = %err, "failed to cache answers");
        }
    }

    pub fn clear_local(&self, questionnaire_id: &str) {
        if let Err(err) = self.cache.clear(questionnaire_id) {
            tracing::warn!(questionnaire_id, error = %err, "failed to clear cached answers");
        }
    }

    pub async fn sync_remote(
        &self,
        questionnaire_id: &str,
        answers: AnswerMap,
    ) -> Result<(), RemoteError> {
        let submission = AnswerSubmission {
            user_id: self.user_id.clone(),
            questionnaire_id: questionnaire_id.to_string(),
            answers,
        };
        self.remote.submit_answers(&submission).await
    }

    pub async fn fetch_remote_answers(&self, questionnaire_id: &str) -> Option<AnswerMap> {
        self.remote
            .fetch_answers(questionnaire_id, &self.user_id)
            .await
    }

    pub async fn list_questionnaires(&self) -> Vec<Questionnaire> {
        self.remote.list_questionnaires().await
    }

    pub async fn fetch_questionnaire(&self, questionnaire_id: Option<&str>) -> Option<Questionnaire> {
        self.remote.fetch_questionnaire(questionnaire_id).await
    }
}
