//! Worker configuration.
//!
//! Everything comes from the environment. Required settings abort startup
//! before the poll loop ever runs; only poll tuning and the policy alias
//! table have defaults.

use bunny_models::PolicyMap;

use crate::error::{WorkerError, WorkerResult};

/// Worker configuration shared by both consumer roles.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// AWS region all clients talk to
    pub region: String,
    /// Queue carrying `event::call-bunny` requests
    pub input_queue: String,
    /// Queue receiving bodies of messages that failed processing
    pub error_queue: String,
    /// Queue carrying provider completion notifications
    pub notification_queue: String,
    /// Queue receiving `event::bunny-output` results
    pub response_queue: String,
    /// Transcoder pipeline name, resolved to an id at startup
    pub pipeline: String,
    /// Bucket the transcoder writes outputs into
    pub output_bucket: String,
    /// Bucket archiving raw job detail documents
    pub job_data_bucket: String,
    /// Bucket holding job-in-progress marker objects
    pub metadata_bucket: String,
    /// Long-poll wait per receive, seconds (SQS caps this at 20)
    pub poll_interval: i32,
    /// Messages fetched per receive
    pub messages_per_fetch: i32,
    /// Policy name to preset name alias table
    pub policy_aliases: PolicyMap,
}

impl WorkerConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> WorkerResult<Self> {
        Ok(Self {
            region: required("BUNNY_AWS_REGION")?,
            input_queue: required("BUNNY_INPUT_QUEUE")?,
            error_queue: required("BUNNY_ERROR_QUEUE")?,
            notification_queue: required("BUNNY_NOTIFICATION_QUEUE")?,
            response_queue: required("BUNNY_RESPONSE_QUEUE")?,
            pipeline: required("BUNNY_PIPELINE")?,
            output_bucket: required("BUNNY_OUTPUT_BUCKET")?,
            job_data_bucket: required("BUNNY_JOB_DATA_BUCKET")?,
            metadata_bucket: required("BUNNY_METADATA_BUCKET")?,
            poll_interval: std::env::var("BUNNY_POLL_INTERVAL")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(20),
            messages_per_fetch: std::env::var("BUNNY_MESSAGES_PER_FETCH")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(5),
            policy_aliases: match std::env::var("BUNNY_POLICY_ALIASES") {
                Ok(json) => PolicyMap::from_json(&json).map_err(|e| {
                    WorkerError::config(format!("BUNNY_POLICY_ALIASES is not a JSON object: {}", e))
                })?,
                Err(_) => PolicyMap::default(),
            },
        })
    }
}

fn required(name: &str) -> WorkerResult<String> {
    std::env::var(name).map_err(|_| WorkerError::config(format!("{} not set", name)))
}
