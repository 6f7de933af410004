use std::sync::Arc;

use anyhow::Context;
use gpxcrawl::{CrawlConfig, Runner, config_path, init_logging};
use gpxcrawl_fetch::TracingLogger;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let path = config_path();
    let config = CrawlConfig::load_or_default(&path)
        .with_context(|| format!("loading configuration from {}", path.display()))?;

    let _guard = init_logging(&config.log_file).context("initializing logging")?;

    let region = config.region()?;
    tracing::info!(
        "Starting crawl of region ({}, {}, {}, {}) with step {}",
        region.min_lon,
        region.min_lat,
        region.max_lon,
        region.max_lat,
        config.step
    );

    let runner = Runner::from_config(&config, Arc::new(TracingLogger))?;
    let summary = runner.run(&region, config.step).await.inspect_err(|e| {
        tracing::error!("Crawl aborted: {e}");
    })?;

    tracing::info!(
        run_dir = %summary.run_dir.display(),
        tiles = summary.tiles,
        pages = summary.pages_saved,
        bytes = summary.bytes_saved,
        failed = summary.failed_tiles,
        "Crawl finished"
    );
    Ok(())
}
