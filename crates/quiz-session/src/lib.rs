#![allow(missing_docs)]

pub mod cache;
pub mod config;
pub mod error;
pub mod persistence;
pub mod remote;
pub mod session;
pub mod state;
pub mod telemetry;

pub use cache::{AnswerCache, FileCache, MemoryCache};
pub use config::ClientConfig;
pub use error::{CacheError, ConfigError, RemoteError, SessionError};
pub use persistence::Persistence;
pub use remote::{AnswerSubmission, HttpRemoteStore, MemoryRemote, RemoteStore, StoredAnswers};
pub use session::{
    BootstrapReport, HydrateOutcome, HydrateTicket, LOAD_FAILED_NOTICE, QuestionnaireSession,
    QuestionnaireSource, SessionSnapshot,
};
pub use state::{Cursor, SessionState};
pub use telemetry::init_tracing;
