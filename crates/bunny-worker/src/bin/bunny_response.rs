//! Completion handler worker binary.

use tracing::{error, info};

use bunny_worker::{logging, runner, ResponderContext, WorkerConfig};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    logging::init();

    info!("Starting bunny-response");

    let config = match WorkerConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let ctx = match ResponderContext::from_config(config).await {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("Failed to start completion handler: {}", e);
            std::process::exit(1);
        }
    };

    let shutdown = runner::shutdown_signal();

    if let Err(e) = runner::run(&ctx, &ctx.notification_queue, &ctx.config, shutdown).await {
        error!("Completion handler failed: {}", e);
        std::process::exit(1);
    }

    info!("bunny-response shutdown complete");
}
