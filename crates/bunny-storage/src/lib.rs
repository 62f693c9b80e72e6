//! S3 object store client.
//!
//! This crate provides:
//! - Small-object writes (job markers, archived job data)
//! - Object deletion (staging-key clearing)
//! - Copy-then-delete moves (staging to final key promotion)

pub mod client;
pub mod error;

pub use client::{Bucket, ObjectStore};
pub use error::{StorageError, StorageResult};
