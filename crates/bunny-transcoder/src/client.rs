//! Elastic Transcoder client.

use std::collections::HashMap;

use aws_sdk_elastictranscoder::types::JobInput;
use aws_sdk_elastictranscoder::Client;
use tracing::{debug, info};

use bunny_models::PresetCatalog;

use crate::error::{TranscoderError, TranscoderResult};
use crate::job_detail::{JobDetail, OutputDetail};

/// One output to request from the provider: staging key plus preset id.
#[derive(Debug, Clone)]
pub struct OutputSpec {
    pub key: String,
    pub preset_id: String,
}

/// Elastic Transcoder service client.
#[derive(Clone)]
pub struct TranscoderClient {
    client: Client,
}

impl TranscoderClient {
    /// Create a client from a shared AWS SDK configuration.
    pub fn new(sdk_config: &aws_config::SdkConfig) -> Self {
        Self {
            client: Client::new(sdk_config),
        }
    }

    /// Fetch the full preset catalog, following pagination.
    pub async fn preset_catalog(&self) -> TranscoderResult<PresetCatalog> {
        let mut entries = Vec::new();

        let mut pages = self.client.list_presets().into_paginator().send();
        while let Some(page) = pages.next().await {
            let page = page.map_err(|e| TranscoderError::PresetListFailed(e.to_string()))?;
            for preset in page.presets() {
                if let (Some(name), Some(id)) = (preset.name(), preset.id()) {
                    entries.push((name.to_string(), id.to_string()));
                }
            }
        }

        let catalog = PresetCatalog::from_entries(entries);
        info!("Loaded {} presets from transcoder", catalog.len());
        Ok(catalog)
    }

    /// Look up a pipeline id by pipeline name, following pagination.
    pub async fn pipeline_id_by_name(&self, name: &str) -> TranscoderResult<Option<String>> {
        let mut pages = self.client.list_pipelines().into_paginator().send();
        while let Some(page) = pages.next().await {
            let page = page.map_err(|e| TranscoderError::PipelineListFailed(e.to_string()))?;
            for pipeline in page.pipelines() {
                if pipeline.name() == Some(name) {
                    return Ok(pipeline.id().map(str::to_string));
                }
            }
        }
        Ok(None)
    }

    /// Submit a transcode job.
    ///
    /// Input parameters are all "auto": the provider detects frame rate,
    /// resolution, aspect ratio, interlacing and container from the source.
    /// `user_metadata` is passed through opaquely and echoed back in the
    /// completion notification.
    pub async fn create_job(
        &self,
        pipeline_id: &str,
        source: &str,
        outputs: &[OutputSpec],
        user_metadata: HashMap<String, String>,
    ) -> TranscoderResult<String> {
        debug!("Submitting job for {} with {} outputs", source, outputs.len());

        let input = JobInput::builder()
            .key(source)
            .frame_rate("auto")
            .resolution("auto")
            .aspect_ratio("auto")
            .interlaced("auto")
            .container("auto")
            .build();

        let mut request = self
            .client
            .create_job()
            .pipeline_id(pipeline_id)
            .input(input)
            .set_user_metadata(Some(user_metadata));

        for output in outputs {
            request = request.outputs(
                aws_sdk_elastictranscoder::types::CreateJobOutput::builder()
                    .key(&output.key)
                    .preset_id(&output.preset_id)
                    .build(),
            );
        }

        let response = request
            .send()
            .await
            .map_err(|e| TranscoderError::submission_failed(e.to_string()))?;

        let job_id = response
            .job()
            .and_then(|job| job.id())
            .ok_or(TranscoderError::MissingJobId)?
            .to_string();

        info!("Submitted transcode job {}", job_id);
        Ok(job_id)
    }

    /// Read full per-output detail for a job.
    pub async fn read_job(&self, job_id: &str) -> TranscoderResult<JobDetail> {
        debug!("Reading job {}", job_id);

        let response = self
            .client
            .read_job()
            .id(job_id)
            .send()
            .await
            .map_err(|e| TranscoderError::JobReadFailed(job_id.to_string(), e.to_string()))?;

        let job = response
            .job()
            .ok_or_else(|| TranscoderError::JobNotFound(job_id.to_string()))?;

        let outputs = job
            .outputs()
            .iter()
            .filter_map(|output| {
                output.key().map(|key| OutputDetail {
                    key: key.to_string(),
                    preset_id: output.preset_id().map(str::to_string),
                    status: output.status().map(str::to_string),
                    status_detail: output.status_detail().map(str::to_string),
                    file_size: output.file_size(),
                    duration_millis: output.duration_millis(),
                    width: output.width(),
                    height: output.height(),
                })
            })
            .collect();

        Ok(JobDetail {
            id: job.id().unwrap_or(job_id).to_string(),
            outputs,
        })
    }
}
