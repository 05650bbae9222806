use async_trait::async_trait;
use quiz_spec::{AnswerMap, Questionnaire};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use url::Url;

use super::{AnswerSubmission, RemoteStore, StoredAnswers};
use crate::config::ClientConfig;
use crate::error::RemoteError;

/// Remote store backed by the questionnaire REST API.
#[derive(Debug, Clone)]
pub struct HttpRemoteStore {
    client: reqwest::Client,
    base: Url,
}

impl HttpRemoteStore {
    pub fn new(config: &ClientConfig) -> Result<Self, RemoteError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        tracing::debug!(api_base = %config.api_base, "using questionnaire API");
        Ok(Self {
            client,
            base: config.api_base.clone(),
        })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Appends percent-encoded segments to the base url, keeping any path prefix.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, RemoteError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| RemoteError::InvalidBase(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// GETs JSON; a 404 is `Ok(None)`, other non-2xx statuses are errors.
    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<Option<T>, RemoteError> {
        let url = self.endpoint(segments)?;
        tracing::debug!(%url, "sending request");
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(RemoteError::Status {
                status: status.as_u16(),
            });
        }
        Ok(Some(response.json().await?))
    }
}

#[async_trait]
impl RemoteStore for HttpRemoteStore {
    async fn list_questionnaires(&self) -> Vec<Questionnaire> {
        match self.get_json(&["api", "questionnaires"]).await {
            Ok(Some(list)) => list,
            Ok(None) => Vec::new(),
            Err(err) => {
                tracing::warn!(error = %err, "failed to list questionnaires");
                Vec::new()
            }
        }
    }

    async fn fetch_questionnaire(&self, questionnaire_id: Option<&str>) -> Option<Questionnaire> {
        let result = match questionnaire_id {
            Some(id) => self.get_json(&["api", "questionnaires", id]).await,
            None => self.get_json(&["api", "questionnaire"]).await,
        };
        result.unwrap_or_else(|err| {
            tracing::warn!(?questionnaire_id, error = %err, "failed to fetch questionnaire");
            None
        })
    }

    async fn fetch_answers(&self, questionnaire_id: &str, user_id: &str) -> Option<AnswerMap> {
        let segments = ["api", "questionnaires", questionnaire_id, "answers", user_id];
        match self.get_json::<StoredAnswers>(&segments).await {
            Ok(Some(stored)) => Some(stored.answers),
            Ok(None) => {
                tracing::debug!(questionnaire_id, "no stored answers yet");
                None
            }
            Err(err) => {
                tracing::warn!(questionnaire_id, error = %err, "stored answers not available");
                None
            }
        }
    }

    async fn submit_answers(&self, submission: &AnswerSubmission) -> Result<(), RemoteError> {
        let url = self.endpoint(&[
            "api",
            "questionnaires",
            submission.questionnaire_id.as_str(),
            "answers",
        ])?;
        tracing::debug!(
            %url,
            questionnaire_id = %submission.questionnaire_id,
            answers = submission.answers.len(),
            "posting answers"
        );
        let response = self.client.post(url).json(submission).send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(RemoteError::Status {
                status: status.as_u16(),
            })
        }
    }
}
