//! Elastic Transcoder client.
//!
//! This crate provides:
//! - Preset catalog loading (paginated)
//! - Pipeline id lookup by name
//! - Job submission with opaque correlation metadata
//! - Per-output job detail reads, mapped to SDK-free types

pub mod client;
pub mod error;
pub mod job_detail;

pub use client::{OutputSpec, TranscoderClient};
pub use error::{TranscoderError, TranscoderResult};
pub use job_detail::{JobDetail, OutputDetail};
