use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use url::Url;

use crate::error::ConfigError;

pub const BACKEND_URL_ENV: &str = "QUIZ_BACKEND_URL";
pub const API_BASE_URL_ENV: &str = "QUIZ_API_BASE_URL";
pub const CACHE_DIR_ENV: &str = "QUIZ_CACHE_DIR";
pub const REQUEST_TIMEOUT_ENV: &str = "QUIZ_REQUEST_TIMEOUT_SECS";

pub const DEFAULT_API_BASE: &str = "http://localhost:8000";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Settings for the persistence collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub api_base: Url,
    pub cache_dir: PathBuf,
    pub request_timeout: Duration,
}

impl ClientConfig {
    pub fn new(api_base: Url, cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            api_base,
            cache_dir: cache_dir.into(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let (key, raw_base) = [BACKEND_URL_ENV, API_BASE_URL_ENV]
            .into_iter()
            .find_map(|key| get(key).map(|value| (key, value)))
            .unwrap_or((BACKEND_URL_ENV, DEFAULT_API_BASE.to_string()));
        let api_base = parse_base(key, &raw_base)?;

        let cache_dir = get(CACHE_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(default_cache_dir);

        let request_timeout = match get(REQUEST_TIMEOUT_ENV) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| ConfigError::InvalidTimeout {
                    key: REQUEST_TIMEOUT_ENV,
                    value: raw,
                })?,
            None => DEFAULT_REQUEST_TIMEOUT,
        };

        Ok(Self {
            api_base,
            cache_dir,
            request_timeout,
        })
    }
}

// Url::join drops the last path segment unless the base ends with '/'.
fn parse_base(key: &'static str, raw: &str) -> Result<Url, ConfigError> {
    let trimmed = raw.trim();
    let normalized = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    };
    Url::parse(&normalized).map_err(|source| ConfigError::InvalidUrl {
        key,
        value: raw.to_string(),
        source,
    })
}

fn default_cache_dir() -> PathBuf {
    ProjectDirs::from("", "", "quiz-session")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| std::env::temp_dir().join("quiz-session"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = ClientConfig::from_lookup(lookup(&[])).expect("config");
        assert_eq!(config.api_base.as_str(), "http://localhost:8000/");
        assert_eq!(config.request_timeout, DEFAULT_REQUEST_TIMEOUT);
    }

    #[test]
    fn backend_url_wins_over_api_base() {
        let config = ClientConfig::from_lookup(lookup(&[
            (BACKEND_URL_ENV, "https://quiz.example/backend"),
            (API_BASE_URL_ENV, "https://ignored.example"),
        ]))
        .expect("config");
        assert_eq!(config.api_base.as_str(), "https://quiz.example/backend/");
    }

    #[test]
    fn blank_backend_url_falls_through() {
        let config = ClientConfig::from_lookup(lookup(&[
            (BACKEND_URL_ENV, "  "),
            (API_BASE_URL_ENV, "https://api.example"),
            (CACHE_DIR_ENV, "/tmp/quiz-cache"),
            (REQUEST_TIMEOUT_ENV, "3"),
        ]))
        .expect("config");
        assert_eq!(config.api_base.as_str(), "https://api.example/");
        assert_eq!(config.cache_dir, PathBuf::from("/tmp/quiz-cache"));
        assert_eq!(config.request_timeout, Duration::from_secs(3));
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = ClientConfig::from_lookup(lookup(&[(BACKEND_URL_ENV, "not a url")]))
            .expect_err("invalid url");
        assert!(matches!(err, ConfigError::InvalidUrl { .. }));

        let err = ClientConfig::from_lookup(lookup(&[(REQUEST_TIMEOUT_ENV, "soon")]))
            .expect_err("invalid timeout");
        assert!(matches!(err, ConfigError::InvalidTimeout { .. }));
    }
}
