//! SQS message queue client.
//!
//! This crate provides:
//! - Queue resolution by name
//! - Long-poll message receipt
//! - Message send and acknowledge (delete)

pub mod error;
pub mod queue;

pub use error::{QueueError, QueueResult};
pub use queue::{Queue, QueueClient, ReceivedMessage};
