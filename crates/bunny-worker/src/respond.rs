//! Completion processing.
//!
//! Consumes provider completion notifications: fetches full job detail,
//! archives it, reconciles outputs, promotes successful objects out of
//! their staging keys and publishes the aggregated result.

use chrono::Utc;
use tracing::info;

use bunny_models::{CompletionNotification, ResultEvent};

use crate::context::ResponderContext;
use crate::error::WorkerResult;
use crate::reconcile::reconcile;
use crate::runner::{Disposition, MessageProcessor};

/// Process one message from the notification queue.
pub async fn process_message(ctx: &ResponderContext, body: &str) -> WorkerResult<Disposition> {
    let notification = CompletionNotification::from_sqs_body(body)?;
    info!(
        "Completion notification for transcoder job {} (jobId {})",
        notification.job_id, notification.user_metadata.job_id
    );

    let detail = ctx.transcoder.read_job(&notification.job_id).await?;

    // Archive the raw job document before touching any object, so a
    // promotion failure still leaves the evidence behind.
    ctx.job_data_bucket
        .put_string(&notification.user_metadata.dlcs_id, detail.to_json()?)
        .await?;

    let outcome = reconcile(
        &notification,
        &detail,
        &ctx.catalog,
        &ctx.policies,
        Utc::now().timestamp_millis(),
    )?;

    for promotion in &outcome.promotions {
        ctx.output_bucket
            .move_object(&promotion.from, &promotion.to)
            .await?;
    }

    let event = ResultEvent::new(outcome.params, Utc::now());
    ctx.response_queue.send(&event.to_json()?).await?;

    info!(
        "Published result for jobId {}: {}",
        event.params.job_id, event.params.status
    );
    Ok(Disposition::Handled)
}

impl MessageProcessor for ResponderContext {
    async fn process(&self, body: &str) -> WorkerResult<Disposition> {
        process_message(self, body).await
    }

    fn error_queue(&self) -> &bunny_queue::Queue {
        &self.error_queue
    }
}
