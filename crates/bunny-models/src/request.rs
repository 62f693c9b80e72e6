//! Inbound transcode request.
//!
//! Carried as the params of an `event::call-bunny` envelope. The `formats`
//! field travels as base64-encoded JSON to survive intermediaries that
//! mangle nested structures.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("Invalid request params: {0}")]
    Params(#[source] serde_json::Error),

    #[error("Invalid base64 in formats field: {0}")]
    FormatsEncoding(#[from] base64::DecodeError),

    #[error("Invalid JSON in formats field: {0}")]
    FormatsJson(#[source] serde_json::Error),
}

/// One requested output: where it should land and which policy shapes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputFormat {
    pub destination: String,
    pub transcode_policy: String,
}

/// A fully decoded transcode request.
#[derive(Debug, Clone)]
pub struct TranscodeRequest {
    pub job_id: String,
    pub dlcs_id: String,
    pub source: String,
    pub formats: Vec<OutputFormat>,
}

/// Wire shape of the request params before the formats field is unpacked.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RequestParams {
    job_id: String,
    dlcs_id: String,
    source: String,
    formats: String,
}

impl TranscodeRequest {
    /// Decode from the params value of an event envelope, rejecting any
    /// message missing a required field.
    pub fn from_params(params: &serde_json::Value) -> Result<Self, RequestError> {
        let raw: RequestParams =
            serde_json::from_value(params.clone()).map_err(RequestError::Params)?;
        let formats = decode_formats(&raw.formats)?;
        Ok(Self {
            job_id: raw.job_id,
            dlcs_id: raw.dlcs_id,
            source: raw.source,
            formats,
        })
    }
}

/// Decode the base64-packed JSON array of output formats.
pub fn decode_formats(encoded: &str) -> Result<Vec<OutputFormat>, RequestError> {
    let bytes = BASE64.decode(encoded)?;
    serde_json::from_slice(&bytes).map_err(RequestError::FormatsJson)
}

/// Encode a format list the way callers pack it.
pub fn encode_formats(formats: &[OutputFormat]) -> String {
    let json = serde_json::to_vec(formats).expect("formats serialize");
    BASE64.encode(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn packed_formats() -> String {
        encode_formats(&[
            OutputFormat {
                destination: "videos/mp4/filename.mp4".into(),
                transcode_policy: "Welcome Standard MP4".into(),
            },
            OutputFormat {
                destination: "videos/webm/filename.webm".into(),
                transcode_policy: "System preset: Generic 320x240".into(),
            },
        ])
    }

    #[test]
    fn test_request_from_params() {
        let params = json!({
            "dlcsId": "7/3/ae32f1b2",
            "jobId": "c7b7f9a2-3be2-4a0a-a196-9a6c2ba0ab44",
            "source": "sample.mp4",
            "formats": packed_formats(),
        });

        let request = TranscodeRequest::from_params(&params).unwrap();
        assert_eq!(request.dlcs_id, "7/3/ae32f1b2");
        assert_eq!(request.source, "sample.mp4");
        assert_eq!(request.formats.len(), 2);
        assert_eq!(request.formats[0].destination, "videos/mp4/filename.mp4");
        assert_eq!(
            request.formats[1].transcode_policy,
            "System preset: Generic 320x240"
        );
    }

    #[test]
    fn test_request_missing_field_is_rejected() {
        let params = json!({
            "jobId": "abc",
            "source": "sample.mp4",
            "formats": packed_formats(),
        });
        assert!(matches!(
            TranscodeRequest::from_params(&params),
            Err(RequestError::Params(_))
        ));
    }

    #[test]
    fn test_bad_base64_is_rejected() {
        assert!(matches!(
            decode_formats("%%%not base64%%%"),
            Err(RequestError::FormatsEncoding(_))
        ));
    }

    #[test]
    fn test_bad_inner_json_is_rejected() {
        let encoded = BASE64.encode(b"{not json");
        assert!(matches!(
            decode_formats(&encoded),
            Err(RequestError::FormatsJson(_))
        ));
    }
}
