//! Staging-key generation and promotion rules.
//!
//! The transcoding service writes outputs while a job is in flight, so a
//! final destination key must never point at a half-written artifact. Each
//! requested destination key is prefixed with a randomized staging prefix
//! before submission; on success the object is promoted by stripping the
//! prefix again.

use rand::Rng;
use thiserror::Error;

/// Number of path segments occupied by the staging prefix.
pub const STAGING_SEGMENTS: usize = 2;

/// Errors from object-key operations.
#[derive(Debug, Error)]
pub enum KeyError {
    #[error("Key has no staging prefix to strip: {0}")]
    MissingStagingPrefix(String),
}

/// A randomized staging prefix, e.g. `x/0423/`.
///
/// Two path segments: a fixed `x` marker and a zero-padded random number.
/// Low collision probability is enough here; the prefix only has to avoid
/// clashing with a previous run's in-flight export at the same key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagingPrefix(String);

impl StagingPrefix {
    /// Generate a new random staging prefix.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self(format!("x/{:04}/", rng.gen_range(0..=1000)))
    }

    /// Prepend this prefix to a destination key.
    pub fn apply(&self, destination: &str) -> String {
        format!("{}{}", self.0, destination)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StagingPrefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Compute the final key for a staged object by dropping exactly the first
/// [`STAGING_SEGMENTS`] slash-delimited segments.
///
/// A key with nothing left after the prefix is rejected rather than mapped
/// to the empty string.
pub fn final_key(staging_key: &str) -> Result<String, KeyError> {
    let parts: Vec<&str> = staging_key.split('/').collect();
    if parts.len() <= STAGING_SEGMENTS {
        return Err(KeyError::MissingStagingPrefix(staging_key.to_string()));
    }
    Ok(parts[STAGING_SEGMENTS..].join("/"))
}
