//! Lifecycle error types

use crate::db::repository::RepoError;
use crate::utils::AppError;
use thiserror::Error;

/// Errors surfaced by the order lifecycle controller
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(#[from] RepoError),
}

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::NotFound(msg) => AppError::NotFound(msg),
            OrderError::Validation(msg) => AppError::Validation(msg),
            OrderError::Storage(e) => e.into(),
        }
    }
}

/// Result type for lifecycle operations
pub type OrderResult<T> = Result<T, OrderError>;
