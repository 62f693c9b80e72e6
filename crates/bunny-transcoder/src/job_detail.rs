//! SDK-free per-output job detail.
//!
//! `read_job` responses are mapped into these types so the completion
//! handler can reconcile outputs and archive the job document without
//! depending on provider SDK types. Field names serialize PascalCase to
//! match the provider's own job document shape.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Detail for a single output of a job.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OutputDetail {
    /// Staging key the output was written to
    pub key: String,
    pub preset_id: Option<String>,
    pub status: Option<String>,
    pub status_detail: Option<String>,
    pub file_size: Option<i64>,
    pub duration_millis: Option<i64>,
    pub width: Option<i32>,
    pub height: Option<i32>,
}

/// Full per-output detail for one provider job.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct JobDetail {
    pub id: String,
    pub outputs: Vec<OutputDetail>,
}

impl JobDetail {
    /// Index outputs by their (staging) key for reconciliation lookups.
    pub fn outputs_by_key(&self) -> HashMap<&str, &OutputDetail> {
        self.outputs.iter().map(|o| (o.key.as_str(), o)).collect()
    }

    /// Serialize for archival in the job-data bucket.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
