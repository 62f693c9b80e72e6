//! Queue poll loop with cooperative shutdown.
//!
//! One sequential consumer per process. Each received message is processed
//! to completion before it is acknowledged; a processing failure routes the
//! original body to the error queue and the message is still acknowledged,
//! so nothing is redelivered. The shutdown flag is checked once per poll
//! iteration and never interrupts an in-flight message.

use tokio::sync::watch;
use tracing::{debug, error, info};

use bunny_queue::Queue;

use crate::config::WorkerConfig;
use crate::error::WorkerResult;

/// How a message was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Recognized and fully processed
    Handled,
    /// Not for this consumer; acknowledged without effect
    Ignored,
}

/// A consumer role: processes one message body at a time.
pub trait MessageProcessor {
    fn process(
        &self,
        body: &str,
    ) -> impl std::future::Future<Output = WorkerResult<Disposition>> + Send;

    /// Queue receiving the bodies of messages that failed processing.
    fn error_queue(&self) -> &Queue;
}

/// Run the poll loop until the shutdown flag flips.
pub async fn run<P: MessageProcessor>(
    processor: &P,
    queue: &Queue,
    config: &WorkerConfig,
    mut shutdown: watch::Receiver<bool>,
) -> WorkerResult<()> {
    info!("Polling {}", queue.name());

    while !*shutdown.borrow() {
        let messages = tokio::select! {
            _ = shutdown.changed() => continue,
            result = queue.receive(config.poll_interval, config.messages_per_fetch) => result?,
        };

        for message in messages {
            match processor.process(&message.body).await {
                Ok(Disposition::Handled) => {
                    debug!("Message processed");
                }
                Ok(Disposition::Ignored) => {
                    debug!("Message ignored");
                }
                Err(e) => {
                    error!("Error processing message: {}", e);
                    if let Err(send_err) = processor.error_queue().send(&message.body).await {
                        error!("Failed to forward message to error queue: {}", send_err);
                    }
                }
            }

            // Acknowledge regardless of outcome; failures live on the
            // error queue, not here.
            if let Err(e) = queue.delete(&message).await {
                error!("Failed to delete message from {}: {}", queue.name(), e);
            }
        }
    }

    info!("Poll loop for {} stopped", queue.name());
    Ok(())
}

/// Flag flipped by SIGINT/SIGTERM, checked once per poll iteration.
pub fn shutdown_signal() -> watch::Receiver<bool> {
    let (tx, rx) = watch::channel(false);

    tokio::spawn(async move {
        #[cfg(unix)]
        {
            let mut term =
                tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
                    .expect("install SIGTERM handler");
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {}
                _ = term.recv() => {}
            }
        }
        #[cfg(not(unix))]
        {
            tokio::signal::ctrl_c().await.ok();
        }

        info!("Caught shutdown signal");
        tx.send(true).ok();
    });

    rx
}
