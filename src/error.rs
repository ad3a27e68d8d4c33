//! Error taxonomy.
//!
//! None of these are fatal: math errors put the display into its error
//! state, persistence errors are logged (and only shown for actions the
//! user asked for explicitly), auth errors abort the action with a notice.

use thiserror::Error;

/// A calculation produced NaN or an infinity.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum MathDomainError {
    #[error("result is not a finite number ({value})")]
    NonFinite { value: f64 },
}

/// A read or write against the persistence adapter failed.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("stored data is malformed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("backend rejected the request: {0}")]
    Backend(String),
}

/// Errors surfaced by a calculator session.
#[derive(Debug, Error)]
pub enum CalcError {
    #[error(transparent)]
    MathDomain(#[from] MathDomainError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error("sign in to use {action}")]
    AuthRequired { action: &'static str },
}
