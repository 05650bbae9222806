use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use quiz_spec::AnswerMap;

use super::{AnswerCache, decode_answers, generate_user_id};
use crate::error::CacheError;

const USER_ID_FILE: &str = "user-id";

/// Cache storing one JSON file per questionnaire under a directory.
#[derive(Debug, Clone)]
pub struct FileCache {
    root: PathBuf,
}

impl FileCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn slot_path(&self, questionnaire_id: &str) -> PathBuf {
        let encoded = utf8_percent_encode(questionnaire_id, NON_ALPHANUMERIC).to_string();
        self.root.join(format!("answers-{encoded}.json"))
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), CacheError> {
        fs::create_dir_all(&self.root).map_err(|source| CacheError::Io {
            path: self.root.clone(),
            source,
        })?;
        fs::write(path, contents).map_err(|source| CacheError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl AnswerCache for FileCache {
    fn load(&self, questionnaire_id: &str) -> AnswerMap {
        let path = self.slot_path(questionnaire_id);
        match fs::read_to_string(&path) {
            Ok(raw) => decode_answers(questionnaire_id, &raw),
            Err(err) if err.kind() == ErrorKind::NotFound => AnswerMap::new(),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "failed to read cached answers");
                AnswerMap::new()
            }
        }
    }

    fn save(&self, questionnaire_id: &str, answers: &AnswerMap) -> Result<(), CacheError> {
        let raw = serde_json::to_string(answers)?;
        self.write(&self.slot_path(questionnaire_id), &raw)
    }

    fn clear(&self, questionnaire_id: &str) -> Result<(), CacheError> {
        let path = self.slot_path(questionnaire_id);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(CacheError::Io { path, source }),
        }
    }

    fn user_id(&self) -> Result<String, CacheError> {
        let path = self.root.join(USER_ID_FILE);
        match fs::read_to_string(&path) {
            Ok(raw) if !raw.trim().is_empty() => return Ok(raw.trim().to_string()),
            Ok(_) => {}
            Err(err) if err.kind() == ErrorKind::NotFound => {}
            Err(source) => return Err(CacheError::Io { path, source }),
        }
        let user_id = generate_user_id();
        self.write(&path, &user_id)?;
        tracing::debug!(%user_id, "generated anonymous user id");
        Ok(user_id)
    }
}
