//! Event envelope carried on the input and response queues.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::result::{ResultOutput, ResultStatus};

/// Message type of an inbound transcode request.
pub const CALL_BUNNY: &str = "event::call-bunny";
/// Message type of an outbound aggregated result.
pub const BUNNY_OUTPUT: &str = "event::bunny-output";

/// Generic inbound envelope.
///
/// Only `message` and `params` matter for dispatch; `_type` and `_created`
/// are carried by well-behaved producers but not required, so an unknown
/// message type can still be recognized and skipped.
#[derive(Debug, Clone, Deserialize)]
pub struct EventEnvelope {
    #[serde(rename = "_type", default)]
    pub event_type: Option<String>,
    #[serde(rename = "_created", default)]
    pub created: Option<String>,
    pub message: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

impl EventEnvelope {
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }
}

/// Params of an outbound `event::bunny-output` result.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultParams {
    pub job_id: String,
    pub et_job_id: String,
    pub dlcs_id: String,
    pub status: ResultStatus,
    /// Wall-clock milliseconds from submission to completion handling
    pub clock_time: i64,
    pub source: String,
    /// base64-encoded JSON array of [`ResultOutput`]
    pub outputs: String,
}

/// Outbound result event, fully formed.
#[derive(Debug, Clone, Serialize)]
pub struct ResultEvent {
    #[serde(rename = "_type")]
    pub event_type: String,
    #[serde(rename = "_created")]
    pub created: String,
    pub message: String,
    pub params: ResultParams,
}

impl ResultEvent {
    /// Build a result event stamped at `created`.
    pub fn new(params: ResultParams, created: DateTime<Utc>) -> Self {
        Self {
            event_type: "event".to_string(),
            created: created.to_rfc3339_opts(SecondsFormat::Micros, true),
            message: BUNNY_OUTPUT.to_string(),
            params,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Pack result outputs the way the response consumers expect them.
pub fn encode_outputs(outputs: &[ResultOutput]) -> String {
    let json = serde_json::to_vec(outputs).expect("outputs serialize");
    BASE64.encode(json)
}

/// Unpack a base64-encoded result output list.
pub fn decode_outputs(encoded: &str) -> Result<Vec<ResultOutput>, DecodeOutputsError> {
    let bytes = BASE64.decode(encoded)?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[derive(Debug, thiserror::Error)]
pub enum DecodeOutputsError {
    #[error("Invalid base64 in outputs field: {0}")]
    Encoding(#[from] base64::DecodeError),
    #[error("Invalid JSON in outputs field: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::OutputStatus;

    #[test]
    fn test_envelope_dispatch_fields() {
        let body = serde_json::json!({
            "_type": "event",
            "_created": "2016-05-18T23:27:04.4538202+00:00",
            "message": CALL_BUNNY,
            "params": { "jobId": "abc" }
        })
        .to_string();

        let envelope = EventEnvelope::from_json(&body).unwrap();
        assert_eq!(envelope.message, CALL_BUNNY);
        assert_eq!(envelope.params["jobId"], "abc");
    }

    #[test]
    fn test_envelope_without_message_is_rejected() {
        assert!(EventEnvelope::from_json(r#"{"params": {}}"#).is_err());
    }

    #[test]
    fn test_result_event_shape() {
        let outputs = vec![ResultOutput {
            destination: "videos/mp4/a.mp4".into(),
            transcode_policy: Some("Welcome Standard MP4".into()),
            status: OutputStatus::Success,
            detail: None,
            size: Some(1024),
            duration: Some(9000),
            width: Some(640),
            height: Some(360),
        }];

        let params = ResultParams {
            job_id: "job-1".into(),
            et_job_id: "1111111111111-aaaaaa".into(),
            dlcs_id: "7/3/ae32f1b2".into(),
            status: ResultStatus::Success,
            clock_time: 5000,
            source: "sample.mp4".into(),
            outputs: encode_outputs(&outputs),
        };
        let created = DateTime::parse_from_rfc3339("2026-08-28T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);

        let event = ResultEvent::new(params, created);
        let value: serde_json::Value =
            serde_json::from_str(&event.to_json().unwrap()).unwrap();

        assert_eq!(value["_type"], "event");
        assert_eq!(value["message"], BUNNY_OUTPUT);
        assert_eq!(value["params"]["status"], "success");
        assert_eq!(value["params"]["clockTime"], 5000);
        assert_eq!(value["params"]["etJobId"], "1111111111111-aaaaaa");

        let decoded =
            decode_outputs(value["params"]["outputs"].as_str().unwrap()).unwrap();
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].destination, "videos/mp4/a.mp4");
    }
}
