//! Storage error types.

use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Put failed: {0}")]
    PutFailed(String),

    #[error("Copy failed: {0}")]
    CopyFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),
}

impl StorageError {
    pub fn not_found(key: impl Into<String>) -> Self {
        Self::NotFound(key.into())
    }

    pub fn put_failed(msg: impl Into<String>) -> Self {
        Self::PutFailed(msg.into())
    }

    pub fn copy_failed(msg: impl Into<String>) -> Self {
        Self::CopyFailed(msg.into())
    }

    pub fn delete_failed(msg: impl Into<String>) -> Self {
        Self::DeleteFailed(msg.into())
    }
}
