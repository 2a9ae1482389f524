//! Debt recovery worker
//!
//! Runs one offline job and exits:
//! - `train`: fit on JSON-lines sourced records and publish the bundle
//! - `score`: score JSON-lines feature maps against the published bundle
//!
//! The job comes from the first argument, falling back to the configured
//! `job`.

pub mod config;
pub mod jobs;

use crate::config::{JobKind, WorkerConfig};
use anyhow::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    init_tracing()?;

    // Load configuration
    let mut config = WorkerConfig::load()?;
    if let Some(job) = std::env::args().nth(1) {
        config.job = job.parse::<JobKind>()?;
    }
    info!("Loaded configuration: {:?}", config);

    match config.job {
        JobKind::Train => {
            jobs::run_train(&config).await?;
        }
        JobKind::Score => {
            jobs::run_score(&config).await?;
        }
    }

    Ok(())
}

/// Initialize tracing subscriber
fn init_tracing() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "recovery_worker=info,recovery_sdk=info,recovery_runtime=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    Ok(())
}
