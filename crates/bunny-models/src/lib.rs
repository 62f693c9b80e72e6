//! Shared data models for the bunny transcode pipeline.
//!
//! This crate provides Serde-serializable types for:
//! - The event envelope carried on the input and response queues
//! - Transcode requests and their base64-packed format lists
//! - Provider completion notifications (SNS envelope over SQS)
//! - Job correlation metadata passed through the transcoding service
//! - Aggregated results and per-output statuses
//! - Staging-key generation and final-key promotion rules

pub mod event;
pub mod key;
pub mod metadata;
pub mod notification;
pub mod policy;
pub mod request;
pub mod result;

// Re-export common types
pub use event::{
    decode_outputs, encode_outputs, EventEnvelope, ResultEvent, ResultParams, BUNNY_OUTPUT,
    CALL_BUNNY,
};
pub use key::{final_key, KeyError, StagingPrefix, STAGING_SEGMENTS};
pub use metadata::{JobMetadata, MetadataError};
pub use notification::{
    CompletionNotification, NotifiedInput, NotifiedOutput, SnsEnvelope, PROVIDER_STATUS_COMPLETE,
};
pub use policy::{PolicyMap, PresetCatalog};
pub use request::{
    decode_formats, encode_formats, OutputFormat, RequestError, TranscodeRequest,
};
pub use result::{OutputStatus, ResultOutput, ResultStatus};
