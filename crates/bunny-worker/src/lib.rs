//! Transcode submission and completion workers.
//!
//! Two binaries share this crate:
//! - `bunny-input` consumes transcode requests and submits provider jobs
//! - `bunny-response` consumes completion notifications, promotes outputs
//!   and publishes aggregated results

pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod reconcile;
pub mod respond;
pub mod runner;
pub mod submit;

pub use config::WorkerConfig;
pub use context::{ResponderContext, SubmitterContext};
pub use error::{WorkerError, WorkerResult};
pub use reconcile::{reconcile, Promotion, ReconcileError, Reconciliation};
pub use runner::{Disposition, MessageProcessor};
