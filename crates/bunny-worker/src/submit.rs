//! Submission processing.
//!
//! Turns an `event::call-bunny` request into a provider transcode job:
//! resolves policies to presets, stages the destination keys, clears stale
//! staging objects and submits the job with correlation metadata attached.

use chrono::Utc;
use rand::Rng;
use tracing::{info, warn};

use bunny_models::{
    EventEnvelope, JobMetadata, OutputFormat, PolicyMap, PresetCatalog, StagingPrefix,
    TranscodeRequest, CALL_BUNNY,
};
use bunny_transcoder::OutputSpec;

use crate::context::SubmitterContext;
use crate::error::{WorkerError, WorkerResult};
use crate::runner::{Disposition, MessageProcessor};

/// Planned submission outputs.
#[derive(Debug)]
pub struct OutputPlan {
    /// Staged outputs to submit
    pub outputs: Vec<OutputSpec>,
    /// Policies that resolved to no preset
    pub skipped: Vec<String>,
}

/// Stage each requested destination behind a fresh random prefix and
/// resolve its policy to a preset id.
///
/// A policy that resolves to nothing is skipped, not failed; the remaining
/// outputs still go through.
pub fn plan_outputs<R: Rng>(
    rng: &mut R,
    catalog: &PresetCatalog,
    policies: &PolicyMap,
    formats: &[OutputFormat],
) -> OutputPlan {
    let mut outputs = Vec::with_capacity(formats.len());
    let mut skipped = Vec::new();

    for format in formats {
        match catalog.resolve(policies, &format.transcode_policy) {
            Some(preset_id) => {
                let prefix = StagingPrefix::random(rng);
                outputs.push(OutputSpec {
                    key: prefix.apply(&format.destination),
                    preset_id: preset_id.to_string(),
                });
            }
            None => skipped.push(format.transcode_policy.clone()),
        }
    }

    OutputPlan { outputs, skipped }
}

/// Decode a request from an input-queue body.
///
/// `None` means the envelope carries a message type this consumer does not
/// handle; the caller acknowledges it without effect. A malformed body or
/// malformed params is still an error.
pub fn decode_request(body: &str) -> WorkerResult<Option<TranscodeRequest>> {
    let envelope = EventEnvelope::from_json(body)?;
    if envelope.message != CALL_BUNNY {
        info!("Unknown message type received: {}", envelope.message);
        return Ok(None);
    }
    Ok(Some(TranscodeRequest::from_params(&envelope.params)?))
}

/// Process one message from the input queue.
pub async fn process_message(ctx: &SubmitterContext, body: &str) -> WorkerResult<Disposition> {
    let Some(request) = decode_request(body)? else {
        return Ok(Disposition::Ignored);
    };
    info!(
        "Transcoding for jobId {} ({} formats)",
        request.job_id,
        request.formats.len()
    );

    let plan = {
        let mut rng = rand::thread_rng();
        plan_outputs(&mut rng, &ctx.catalog, &ctx.policies, &request.formats)
    };
    for policy in &plan.skipped {
        warn!(
            "No preset for policy '{}' on job {}; skipping output",
            policy, request.job_id
        );
    }
    if plan.outputs.is_empty() {
        return Err(WorkerError::NoResolvableOutputs(request.job_id));
    }

    // A retried submission may leave a half-written object at the staging
    // key; clear it so the next read cannot see stale data. The final key
    // is left untouched.
    for output in &plan.outputs {
        ctx.output_bucket.delete_object(&output.key).await?;
    }

    let metadata = JobMetadata::new(
        &request.job_id,
        &request.dlcs_id,
        Utc::now().timestamp_millis(),
    );
    let et_job_id = ctx
        .transcoder
        .create_job(
            &ctx.pipeline_id,
            &request.source,
            &plan.outputs,
            metadata.to_user_metadata(),
        )
        .await?;

    ctx.metadata_bucket
        .put_string(
            &format!("{}/metadata", request.dlcs_id),
            job_in_progress_marker(&et_job_id),
        )
        .await?;

    info!(
        "Submitted job {} as transcoder job {}",
        request.job_id, et_job_id
    );
    Ok(Disposition::Handled)
}

/// Marker document consumers poll while the job is in flight.
fn job_in_progress_marker(et_job_id: &str) -> String {
    format!(
        "<JobInProgress><ElasticTranscoderJob>{}</ElasticTranscoderJob></JobInProgress>",
        et_job_id
    )
}

impl MessageProcessor for SubmitterContext {
    async fn process(&self, body: &str) -> WorkerResult<Disposition> {
        process_message(self, body).await
    }

    fn error_queue(&self) -> &bunny_queue::Queue {
        &self.error_queue
    }
}
