//! SQS queue client.

use aws_sdk_sqs::Client;
use tracing::{debug, warn};

use crate::error::{QueueError, QueueResult};

/// SQS long-poll wait cap, in seconds.
const MAX_WAIT_SECONDS: i32 = 20;
/// SQS receive batch limit; requests outside 1..=10 are rejected outright.
const MAX_BATCH_SIZE: i32 = 10;

fn clamp_wait(seconds: i32) -> i32 {
    seconds.clamp(0, MAX_WAIT_SECONDS)
}

fn clamp_batch(count: i32) -> i32 {
    count.clamp(1, MAX_BATCH_SIZE)
}

/// Entry point for resolving named queues.
#[derive(Clone)]
pub struct QueueClient {
    client: Client,
}

impl QueueClient {
    /// Create a client from a shared AWS SDK configuration.
    pub fn new(sdk_config: &aws_config::SdkConfig) -> Self {
        Self {
            client: Client::new(sdk_config),
        }
    }

    /// Resolve a queue handle by queue name.
    pub async fn queue_by_name(&self, name: &str) -> QueueResult<Queue> {
        let response = self
            .client
            .get_queue_url()
            .queue_name(name)
            .send()
            .await
            .map_err(|e| QueueError::not_found(format!("{}: {}", name, e)))?;

        let url = response
            .queue_url()
            .ok_or_else(|| QueueError::not_found(name))?
            .to_string();

        debug!("Resolved queue {} to {}", name, url);
        Ok(Queue {
            client: self.client.clone(),
            name: name.to_string(),
            url,
        })
    }
}

/// A message received from a queue.
///
/// The receipt handle is needed to acknowledge (delete) the message once it
/// has been fully processed.
#[derive(Debug, Clone)]
pub struct ReceivedMessage {
    pub body: String,
    pub receipt_handle: String,
}

/// Handle to one resolved SQS queue.
#[derive(Clone)]
pub struct Queue {
    client: Client,
    name: String,
    url: String,
}

impl Queue {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Receive up to `max_messages`, long-polling for up to `wait_seconds`.
    ///
    /// An empty result is normal, not an error.
    pub async fn receive(
        &self,
        wait_seconds: i32,
        max_messages: i32,
    ) -> QueueResult<Vec<ReceivedMessage>> {
        let response = self
            .client
            .receive_message()
            .queue_url(&self.url)
            .wait_time_seconds(clamp_wait(wait_seconds))
            .max_number_of_messages(clamp_batch(max_messages))
            .send()
            .await
            .map_err(|e| QueueError::receive_failed(e.to_string()))?;

        let mut messages = Vec::new();
        for message in response.messages.unwrap_or_default() {
            match (message.body, message.receipt_handle) {
                (Some(body), Some(receipt_handle)) => {
                    messages.push(ReceivedMessage {
                        body,
                        receipt_handle,
                    });
                }
                _ => {
                    // SQS should always populate both; skip rather than fail the batch
                    warn!("Dropping message without body or receipt handle from {}", self.name);
                }
            }
        }

        if !messages.is_empty() {
            debug!("Received {} messages from {}", messages.len(), self.name);
        }
        Ok(messages)
    }

    /// Send a message body to the queue.
    pub async fn send(&self, body: &str) -> QueueResult<()> {
        self.client
            .send_message()
            .queue_url(&self.url)
            .message_body(body)
            .send()
            .await
            .map_err(|e| QueueError::send_failed(e.to_string()))?;

        debug!("Sent message to {}", self.name);
        Ok(())
    }

    /// Acknowledge a processed message by deleting it.
    pub async fn delete(&self, message: &ReceivedMessage) -> QueueResult<()> {
        self.client
            .delete_message()
            .queue_url(&self.url)
            .receipt_handle(&message.receipt_handle)
            .send()
            .await
            .map_err(|e| QueueError::delete_failed(e.to_string()))?;

        debug!("Deleted message from {}", self.name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receive_parameters_stay_within_sqs_limits() {
        assert_eq!(clamp_wait(-1), 0);
        assert_eq!(clamp_wait(20), 20);
        assert_eq!(clamp_wait(300), MAX_WAIT_SECONDS);

        assert_eq!(clamp_batch(0), 1);
        assert_eq!(clamp_batch(5), 5);
        assert_eq!(clamp_batch(20), MAX_BATCH_SIZE);
    }
}
