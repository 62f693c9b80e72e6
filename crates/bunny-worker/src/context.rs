//! Worker contexts.
//!
//! Each consumer role gets an explicit context constructed once at startup
//! and passed to every processing call: resolved queues, bucket handles,
//! the transcoder client and the preset catalog. There is no module-level
//! state.

use aws_config::{BehaviorVersion, Region};
use tracing::info;

use bunny_models::{PolicyMap, PresetCatalog};
use bunny_queue::{Queue, QueueClient};
use bunny_storage::{Bucket, ObjectStore};
use bunny_transcoder::TranscoderClient;

use crate::config::WorkerConfig;
use crate::error::{WorkerError, WorkerResult};

async fn load_sdk_config(region: &str) -> aws_config::SdkConfig {
    aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(region.to_string()))
        .load()
        .await
}

/// Context for the submission consumer.
pub struct SubmitterContext {
    pub config: WorkerConfig,
    pub input_queue: Queue,
    pub error_queue: Queue,
    pub transcoder: TranscoderClient,
    pub output_bucket: Bucket,
    pub metadata_bucket: Bucket,
    /// Pipeline id resolved from the configured pipeline name
    pub pipeline_id: String,
    pub policies: PolicyMap,
    pub catalog: PresetCatalog,
}

impl SubmitterContext {
    /// Resolve queues, the pipeline and the preset catalog.
    pub async fn from_config(config: WorkerConfig) -> WorkerResult<Self> {
        let sdk_config = load_sdk_config(&config.region).await;

        let queues = QueueClient::new(&sdk_config);
        let input_queue = queues.queue_by_name(&config.input_queue).await?;
        let error_queue = queues.queue_by_name(&config.error_queue).await?;

        let store = ObjectStore::new(&sdk_config);
        let output_bucket = store.bucket(&config.output_bucket);
        let metadata_bucket = store.bucket(&config.metadata_bucket);

        let transcoder = TranscoderClient::new(&sdk_config);
        let pipeline_id = transcoder
            .pipeline_id_by_name(&config.pipeline)
            .await?
            .ok_or_else(|| WorkerError::PipelineNotFound(config.pipeline.clone()))?;
        let catalog = transcoder.preset_catalog().await?;

        info!(
            "Submitter ready: pipeline {} ({}), {} presets",
            config.pipeline,
            pipeline_id,
            catalog.len()
        );

        Ok(Self {
            policies: config.policy_aliases.clone(),
            config,
            input_queue,
            error_queue,
            transcoder,
            output_bucket,
            metadata_bucket,
            pipeline_id,
            catalog,
        })
    }
}

/// Context for the completion consumer.
pub struct ResponderContext {
    pub config: WorkerConfig,
    pub notification_queue: Queue,
    pub response_queue: Queue,
    pub error_queue: Queue,
    pub transcoder: TranscoderClient,
    pub output_bucket: Bucket,
    pub job_data_bucket: Bucket,
    pub policies: PolicyMap,
    pub catalog: PresetCatalog,
}

impl ResponderContext {
    /// Resolve queues and the preset catalog.
    pub async fn from_config(config: WorkerConfig) -> WorkerResult<Self> {
        let sdk_config = load_sdk_config(&config.region).await;

        let queues = QueueClient::new(&sdk_config);
        let notification_queue = queues.queue_by_name(&config.notification_queue).await?;
        let response_queue = queues.queue_by_name(&config.response_queue).await?;
        let error_queue = queues.queue_by_name(&config.error_queue).await?;

        let store = ObjectStore::new(&sdk_config);
        let output_bucket = store.bucket(&config.output_bucket);
        let job_data_bucket = store.bucket(&config.job_data_bucket);

        let transcoder = TranscoderClient::new(&sdk_config);
        let catalog = transcoder.preset_catalog().await?;

        info!("Responder ready: {} presets", catalog.len());

        Ok(Self {
            policies: config.policy_aliases.clone(),
            config,
            notification_queue,
            response_queue,
            error_queue,
            transcoder,
            output_bucket,
            job_data_bucket,
            catalog,
        })
    }
}
