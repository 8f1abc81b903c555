//! Error types for jobrelay.

use thiserror::Error;

use crate::job::JobStatus;

#[derive(Debug, Error)]
pub enum Error {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("job {id} is {status}, only pending jobs can be run")]
    InvalidState { id: String, status: JobStatus },

    #[error("execution failed: {0}")]
    ExecutionFailed(String),

    #[error("store error: {0}")]
    Store(String),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;
