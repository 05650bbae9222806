use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by local answer caches.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("failed to access cache entry {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode answers: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Errors raised by remote stores on write paths.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned an error: {status}")]
    Status { status: u16 },
    #[error("base url '{0}' cannot carry path segments")]
    InvalidBase(String),
    #[error("remote store unavailable")]
    Unavailable,
}

/// Errors raised while reading client configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value '{value}' for {key}: {source}")]
    InvalidUrl {
        key: &'static str,
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("invalid value '{value}' for {key}: expected whole seconds")]
    InvalidTimeout { key: &'static str, value: String },
}

/// Errors surfaced by session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("questionnaire '{0}' is not available")]
    UnknownQuestionnaire(String),
    #[error("questionnaires are still loading")]
    NotReady,
    #[error("failed to submit answers: {0}")]
    Submit(#[source] RemoteError),
    #[error(transparent)]
    Cache(#[from] CacheError),
    #[error(transparent)]
    Remote(#[from] RemoteError),
}
