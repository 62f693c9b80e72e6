//! Aggregated result types published on the response queue.

use serde::{Deserialize, Serialize};

/// Job-level status aggregated across all outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultStatus {
    /// Every output transcoded successfully
    Success,
    /// At least one output succeeded and at least one failed
    Partial,
    /// No output succeeded
    None,
}

impl ResultStatus {
    /// Aggregate per-output counts into the job-level status.
    ///
    /// `none` when nothing succeeded, `success` when nothing failed,
    /// `partial` otherwise.
    pub fn aggregate(success_count: usize, error_count: usize) -> Self {
        if success_count == 0 {
            ResultStatus::None
        } else if error_count > 0 {
            ResultStatus::Partial
        } else {
            ResultStatus::Success
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResultStatus::Success => "success",
            ResultStatus::Partial => "partial",
            ResultStatus::None => "none",
        }
    }
}

impl std::fmt::Display for ResultStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status of a single output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputStatus {
    Success,
    Error,
}

impl OutputStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, OutputStatus::Success)
    }
}

/// Normalized per-output result.
///
/// `destination` is the promoted final key; it is empty when the output
/// errored and no promotion happened. Detail fields come from the provider's
/// per-output job data and may be absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultOutput {
    pub destination: String,
    pub transcode_policy: Option<String>,
    pub status: OutputStatus,
    pub detail: Option<String>,
    pub size: Option<i64>,
    pub duration: Option<i64>,
    pub width: Option<i32>,
    pub height: Option<i32>,
}
