//! Stagehand headless runner entry point.

use std::error::Error;

use stagehand_runner::config::RunnerConfig;
use stagehand_runner::driver;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting Stagehand runner");

    // Read configuration from environment.
    let config = RunnerConfig::from_env()?;
    tracing::info!(
        script = %config.script.display(),
        sequence = config.sequence.as_deref().unwrap_or("<default>"),
        frame_hz = config.frame_hz,
        autopilot = config.autopilot,
        "runner configured"
    );

    let summary = driver::run(config).await?;
    if !summary.completed {
        return Err(format!(
            "sequence {} of {} did not complete",
            summary.sequence, summary.activity_id
        )
        .into());
    }

    Ok(())
}
