use thiserror::Error;

#[cfg(feature = "sqlite")]
use rusqlite;

/// Errors produced by the valet and its driver adapters.
///
/// Only the contract variants (`InvalidRequest`, `NoConnection`) cross the
/// public boundary as `Err`; anything the store throws at runtime is caught at
/// the operation boundary and reported as [`crate::QueryOutcome::Failed`].
#[derive(Debug, Error)]
pub enum SqlValetError {
    #[cfg(feature = "sqlite")]
    #[error(transparent)]
    SqliteError(#[from] rusqlite::Error),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("SQL execution error: {0}")]
    ExecutionError(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("No open connection")]
    NoConnection,

    #[error("Other database error: {0}")]
    Other(String),
}
