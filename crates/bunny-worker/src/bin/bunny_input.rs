//! Transcode submission worker binary.

use tracing::{error, info};

use bunny_worker::{logging, runner, SubmitterContext, WorkerConfig};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    logging::init();

    info!("Starting bunny-input");

    let config = match WorkerConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let ctx = match SubmitterContext::from_config(config).await {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("Failed to start submitter: {}", e);
            std::process::exit(1);
        }
    };

    let shutdown = runner::shutdown_signal();

    if let Err(e) = runner::run(&ctx, &ctx.input_queue, &ctx.config, shutdown).await {
        error!("Submitter failed: {}", e);
        std::process::exit(1);
    }

    info!("bunny-input shutdown complete");
}
