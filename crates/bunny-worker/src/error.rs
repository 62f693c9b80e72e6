//! Worker error types.

use thiserror::Error;

pub type WorkerResult<T> = Result<T, WorkerError>;

#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Pipeline not found: {0}")]
    PipelineNotFound(String),

    #[error("No output policy resolved to a preset for job {0}")]
    NoResolvableOutputs(String),

    #[error("Malformed message: {0}")]
    MalformedMessage(#[from] serde_json::Error),

    #[error("Invalid request: {0}")]
    Request(#[from] bunny_models::RequestError),

    #[error("Reconciliation failed: {0}")]
    Reconcile(#[from] crate::reconcile::ReconcileError),

    #[error("Queue error: {0}")]
    Queue(#[from] bunny_queue::QueueError),

    #[error("Storage error: {0}")]
    Storage(#[from] bunny_storage::StorageError),

    #[error("Transcoder error: {0}")]
    Transcoder(#[from] bunny_transcoder::TranscoderError),
}

impl WorkerError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
