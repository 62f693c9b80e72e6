//! Provider completion notifications.
//!
//! Elastic Transcoder publishes job-state changes through SNS, so the SQS
//! body is an envelope whose `Message` field holds the notification JSON as
//! a string. Decoding is therefore two-step.

use serde::Deserialize;

use crate::metadata::JobMetadata;

/// Provider status string that marks a finished output.
pub const PROVIDER_STATUS_COMPLETE: &str = "Complete";

/// SNS delivery envelope around the notification payload.
#[derive(Debug, Deserialize)]
pub struct SnsEnvelope {
    #[serde(rename = "Message")]
    pub message: String,
}

/// One output as reported by the completion notification.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotifiedOutput {
    /// Staging key the output was written to
    pub key: String,
    pub preset_id: String,
    pub status: String,
}

impl NotifiedOutput {
    pub fn is_complete(&self) -> bool {
        self.status == PROVIDER_STATUS_COMPLETE
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NotifiedInput {
    pub key: String,
}

/// A decoded completion notification.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionNotification {
    /// Provider-assigned job id
    pub job_id: String,
    /// Correlation metadata echoed back from submission
    pub user_metadata: JobMetadata,
    pub input: NotifiedInput,
    pub outputs: Vec<NotifiedOutput>,
}

impl CompletionNotification {
    /// Decode from a raw SQS message body (SNS envelope, then payload).
    pub fn from_sqs_body(body: &str) -> Result<Self, serde_json::Error> {
        let envelope: SnsEnvelope = serde_json::from_str(body)?;
        serde_json::from_str(&envelope.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notification_json() -> String {
        serde_json::json!({
            "state": "COMPLETED",
            "jobId": "1111111111111-aaaaaa",
            "pipelineId": "2222222222222-bbbbbb",
            "input": { "key": "sample.mp4" },
            "outputs": [
                {
                    "key": "x/0423/videos/mp4/filename.mp4",
                    "presetId": "1351620000001-100070",
                    "status": "Complete"
                },
                {
                    "key": "x/0423/videos/webm/filename.webm",
                    "presetId": "9999999999999-200010",
                    "status": "Error"
                }
            ],
            "userMetadata": {
                "jobId": "c7b7f9a2-3be2-4a0a-a196-9a6c2ba0ab44",
                "dlcsId": "7/3/ae32f1b2",
                "startTime": "1700000000000"
            }
        })
        .to_string()
    }

    #[test]
    fn test_decode_from_sns_envelope() {
        let body = serde_json::json!({
            "Type": "Notification",
            "Message": notification_json(),
        })
        .to_string();

        let notification = CompletionNotification::from_sqs_body(&body).unwrap();
        assert_eq!(notification.job_id, "1111111111111-aaaaaa");
        assert_eq!(notification.input.key, "sample.mp4");
        assert_eq!(notification.user_metadata.dlcs_id, "7/3/ae32f1b2");
        assert_eq!(notification.outputs.len(), 2);
        assert!(notification.outputs[0].is_complete());
        assert!(!notification.outputs[1].is_complete());
    }

    #[test]
    fn test_missing_user_metadata_is_rejected() {
        let inner = serde_json::json!({
            "jobId": "1111111111111-aaaaaa",
            "input": { "key": "sample.mp4" },
            "outputs": []
        })
        .to_string();
        let body = serde_json::json!({ "Message": inner }).to_string();
        assert!(CompletionNotification::from_sqs_body(&body).is_err());
    }

    #[test]
    fn test_plain_body_without_envelope_is_rejected() {
        assert!(CompletionNotification::from_sqs_body(&notification_json()).is_err());
    }
}
