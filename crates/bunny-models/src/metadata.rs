//! Job correlation metadata.
//!
//! Passed opaquely to the transcoding service as user metadata and echoed
//! back verbatim in the completion notification. This is the sole
//! correlation mechanism between submission and completion; there is no
//! local store.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("Invalid startTime in job metadata: {0}")]
    InvalidStartTime(String),
}

/// Correlation identifiers carried through the provider.
///
/// All values travel as strings because the provider's user-metadata map is
/// string-to-string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobMetadata {
    /// Caller-supplied job identifier
    pub job_id: String,
    /// Caller-supplied correlation identifier
    pub dlcs_id: String,
    /// Submission timestamp, epoch milliseconds as a decimal string
    pub start_time: String,
}

impl JobMetadata {
    /// Create metadata for a job submitted at `started_at_millis`.
    pub fn new(
        job_id: impl Into<String>,
        dlcs_id: impl Into<String>,
        started_at_millis: i64,
    ) -> Self {
        Self {
            job_id: job_id.into(),
            dlcs_id: dlcs_id.into(),
            start_time: started_at_millis.to_string(),
        }
    }

    /// Submission timestamp in epoch milliseconds.
    pub fn start_time_millis(&self) -> Result<i64, MetadataError> {
        self.start_time
            .parse()
            .map_err(|_| MetadataError::InvalidStartTime(self.start_time.clone()))
    }

    /// Flatten into the provider's string-to-string user metadata map.
    pub fn to_user_metadata(&self) -> HashMap<String, String> {
        HashMap::from([
            ("jobId".to_string(), self.job_id.clone()),
            ("dlcsId".to_string(), self.dlcs_id.clone()),
            ("startTime".to_string(), self.start_time.clone()),
        ])
    }
}
