//! Crate error type
//!
//! Every failure here is a caller mistake (bad action, missing reset, bad
//! config file). Nothing is retried.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnvError {
    /// Raw action outside the discrete action set
    #[error("invalid action {0}: expected 0 (no-op) or 1 (jump)")]
    InvalidAction(i64),

    /// `step`/`observation`/`render` called before the first `reset`
    #[error("environment not initialized: call reset() first")]
    NotInitialized,

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EnvError>;
