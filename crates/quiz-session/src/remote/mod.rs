mod http;
mod memory;

pub use http::HttpRemoteStore;
pub use memory::MemoryRemote;

use async_trait::async_trait;
use quiz_spec::{AnswerMap, Questionnaire};
use serde::{Deserialize, Serialize};

use crate::error::RemoteError;

/// Body posted when answers are pushed to the remote store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerSubmission {
    pub user_id: String,
    pub questionnaire_id: String,
    pub answers: AnswerMap,
}

/// Stored answers as returned by the remote store.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StoredAnswers {
    #[serde(default)]
    pub answers: AnswerMap,
}

/// Remote questionnaire and answer storage.
///
/// Read paths absorb transport failures and report "no data"; only
/// submission reports errors.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    async fn list_questionnaires(&self) -> Vec<Questionnaire>;

    /// Fetches one questionnaire by id, or the server's default one for `None`.
    async fn fetch_questionnaire(&self, questionnaire_id: Option<&str>) -> Option<Questionnaire>;

    async fn fetch_answers(&self, questionnaire_id: &str, user_id: &str) -> Option<AnswerMap>;

    async fn submit_answers(&self, submission: &AnswerSubmission) -> Result<(), RemoteError>;
}
