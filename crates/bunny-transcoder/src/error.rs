//! Transcoder error types.

use thiserror::Error;

/// Result type for transcoder operations.
pub type TranscoderResult<T> = Result<T, TranscoderError>;

/// Errors that can occur talking to the transcoding service.
#[derive(Debug, Error)]
pub enum TranscoderError {
    #[error("Failed to list presets: {0}")]
    PresetListFailed(String),

    #[error("Failed to list pipelines: {0}")]
    PipelineListFailed(String),

    #[error("Job submission failed: {0}")]
    SubmissionFailed(String),

    #[error("Job submission returned no job id")]
    MissingJobId,

    #[error("Failed to read job {0}: {1}")]
    JobReadFailed(String, String),

    #[error("Job not found: {0}")]
    JobNotFound(String),
}

impl TranscoderError {
    pub fn submission_failed(msg: impl Into<String>) -> Self {
        Self::SubmissionFailed(msg.into())
    }
}
