use chrono::Utc;
use std::path::PathBuf;

use stackslurp_daemon::{config::Config, logging::init_logging};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Optional explicit config file as first argument
    let path = std::env::args().nth(1).map(PathBuf::from);

    let config = Config::load(path.as_deref())
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    init_logging(&config.logging);

    tracing::info!("Starting up at {}", Utc::now().format("%Y-%m-%d %H:%M"));

    config.validate()?;
    tracing::info!(
        sites = ?config.sites,
        queue = %config.queue,
        wait_time = config.wait_time,
        "Config loaded"
    );

    let mut slurper = config.into_builder().build()?;
    tracing::info!(since = slurper.watermark().as_secs(), "Slurping");

    slurper.run_until(shutdown_signal()).await;

    tracing::info!("Stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
