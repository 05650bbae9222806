use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use quiz_spec::{AnswerMap, Questionnaire};

use super::{AnswerSubmission, RemoteStore};
use crate::error::RemoteError;

/// In-memory remote store for offline use and deterministic tests.
#[derive(Debug, Default)]
pub struct MemoryRemote {
    inner: Mutex<MemoryRemoteState>,
}

#[derive(Debug, Default)]
struct MemoryRemoteState {
    questionnaires: Vec<Questionnaire>,
    fallback: Option<Questionnaire>,
    answers: HashMap<(String, String), AnswerMap>,
    submissions: Vec<AnswerSubmission>,
    offline: bool,
}

impl MemoryRemote {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_questionnaires(questionnaires: Vec<Questionnaire>) -> Self {
        let remote = Self::new();
        remote.set_questionnaires(questionnaires);
        remote
    }

    pub fn set_questionnaires(&self, questionnaires: Vec<Questionnaire>) {
        self.state().questionnaires = questionnaires;
    }

    /// Questionnaire served by the single-questionnaire endpoint.
    pub fn set_fallback(&self, questionnaire: Option<Questionnaire>) {
        self.state().fallback = questionnaire;
    }

    pub fn store_answers(&self, questionnaire_id: &str, user_id: &str, answers: AnswerMap) {
        self.state().answers.insert(
            (questionnaire_id.to_string(), user_id.to_string()),
            answers,
        );
    }

    pub fn stored_answers(&self, questionnaire_id: &str, user_id: &str) -> Option<AnswerMap> {
        self.state()
            .answers
            .get(&(questionnaire_id.to_string(), user_id.to_string()))
            .cloned()
    }

    /// While offline every read yields no data and every submission fails.
    pub fn set_offline(&self, offline: bool) {
        self.state().offline = offline;
    }

    pub fn submissions(&self) -> Vec<AnswerSubmission> {
        self.state().submissions.clone()
    }

    fn state(&self) -> MutexGuard<'_, MemoryRemoteState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl RemoteStore for MemoryRemote {
    async fn list_questionnaires(&self) -> Vec<Questionnaire> {
        let state = self.state();
        if state.offline {
            return Vec::new();
        }
        state.questionnaires.clone()
    }

    async fn fetch_questionnaire(&self, questionnaire_id: Option<&str>) -> Option<Questionnaire> {
        let state = self.state();
        if state.offline {
            return None;
        }
        match questionnaire_id {
            Some(id) => state
                .questionnaires
                .iter()
                .chain(state.fallback.iter())
                .find(|questionnaire| questionnaire.id == id)
                .cloned(),
            None => state.fallback.clone(),
        }
    }

    async fn fetch_answers(&self, questionnaire_id: &str, user_id: &str) -> Option<AnswerMap> {
        let state = self.state();
        if state.offline {
            return None;
        }
        state
            .answers
            .get(&(questionnaire_id.to_string(), user_id.to_string()))
            .cloned()
    }

    async fn submit_answers(&self, submission: &AnswerSubmission) -> Result<(), RemoteError> {
        let mut state = self.state();
        if state.offline {
            return Err(RemoteError::Unavailable);
        }
        state.answers.insert(
            (
                submission.questionnaire_id.clone(),
                submission.user_id.clone(),
            ),
            submission.answers.clone(),
        );
        state.submissions.push(submission.clone());
        Ok(())
    }
}
