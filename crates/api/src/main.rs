//! Diabetes Risk Predictor - Main Entry Point

use anyhow::Context;
use api::{init_logging, run_server, AppConfig};
use std::path::PathBuf;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = AppConfig::load(config_path.as_deref()).context("loading configuration")?;

    init_logging(&config.logging)?;

    info!("=== Diabetes Risk Predictor v{} ===", env!("CARGO_PKG_VERSION"));
    info!(
        "Threshold {} with scaler={} model={}",
        config.classification.threshold,
        config.artifacts.scaler_path.display(),
        config.artifacts.model_path.display()
    );

    run_server(config).await.context("running API server")?;

    Ok(())
}
