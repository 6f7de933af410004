//! Whole-region crawl: tile, drain, summarize.

use std::path::{Path, PathBuf};
use std::pin::pin;
use std::sync::Arc;

use futures_util::stream::{self, StreamExt};
use gpxcrawl_fetch::{
    DrainSummary, Logger, PageFetcher, PaginationDriver, RateGate, Region, RetryingFetcher,
    ReqwestClient, StopReason, Tile, tiles,
};
use gpxcrawl_fetch::{log_error, log_info};

use crate::config::{CrawlConfig, OutputConfig};
use crate::error::{Error, Result};

/// Totals for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub run_dir:       PathBuf,
    pub tiles:         u64,
    pub pages_saved:   u64,
    pub bytes_saved:   u64,
    /// Tiles abandoned after a page exhausted its retries.
    pub failed_tiles:  u64,
    /// Tiles cut short by the page ceiling.
    pub limited_tiles: u64,
}

impl RunSummary {
    pub fn new(run_dir: PathBuf) -> Self {
        Self {
            run_dir,
            tiles: 0,
            pages_saved: 0,
            bytes_saved: 0,
            failed_tiles: 0,
            limited_tiles: 0,
        }
    }

    fn record(&mut self, drained: &DrainSummary) {
        self.tiles += 1;
        self.pages_saved += u64::from(drained.pages_saved);
        self.bytes_saved += drained.bytes_saved;
        match drained.stop {
            StopReason::Exhausted => {},
            StopReason::Failed => self.failed_tiles += 1,
            StopReason::PageLimit => self.limited_tiles += 1,
        }
    }
}

/// Drives every tile of a region through one [`PaginationDriver`].
///
/// Up to `workers` tiles are drained at once; each tile belongs to exactly
/// one of them, so a tile's pages land in its file in page order. Request
/// pacing is left to the fetcher's rate gate.
pub struct Runner<F: PageFetcher> {
    driver:  PaginationDriver<F>,
    output:  OutputConfig,
    workers: usize,
    logger:  Arc<dyn Logger>,
}

impl Runner<RetryingFetcher<ReqwestClient>> {
    /// Production wiring: reqwest client, one shared rate gate.
    pub fn from_config(config: &CrawlConfig, logger: Arc<dyn Logger>) -> Result<Self> {
        config.validate()?;
        let client = ReqwestClient::new(config.request_timeout()?)?;
        let gate = Arc::new(RateGate::new(config.max_in_flight, config.pre_request_delay()));
        let fetcher = RetryingFetcher::new(client, gate, config.fetch_options()?, logger.clone());
        let driver = PaginationDriver::new(fetcher, logger.clone()).max_pages(config.max_pages);

        Ok(Self::new(driver, config.output.clone(), logger).workers(config.workers))
    }
}

impl<F: PageFetcher> Runner<F> {
    pub fn new(driver: PaginationDriver<F>, output: OutputConfig, logger: Arc<dyn Logger>) -> Self {
        Self {
            driver,
            output,
            workers: 1,
            logger,
        }
    }

    /// Number of tiles drained concurrently. Zero is treated as one.
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Crawl `region` in `step`-degree tiles into a fresh run directory.
    ///
    /// Failed tiles are counted and skipped. The first local I/O error stops
    /// the run; tiles still in flight are dropped.
    pub async fn run(&self, region: &Region, step: f64) -> Result<RunSummary> {
        let tiles = tiles(region, step)?;
        let total = tiles.total();

        let run_dir = create_run_dir(&self.output).await?;
        log_info!(
            self.logger,
            "Crawling {total} tiles of {step} degrees into {} with {} worker(s)",
            run_dir.display(),
            self.workers
        );

        let prefix = self.output.file_prefix.as_str();
        let dir = run_dir.as_path();
        let mut drains = pin!(
            stream::iter(tiles)
                .map(|tile| {
                    let destination = tile_path(dir, prefix, &tile);
                    async move { self.driver.drain_tile(tile, &destination).await }
                })
                .buffer_unordered(self.workers)
        );

        let mut summary = RunSummary::new(run_dir.clone());
        while let Some(result) = drains.next().await {
            match result {
                Ok(drained) => summary.record(&drained),
                Err(e) => {
                    log_error!(self.logger, "Aborting run after {} tiles: {e}", summary.tiles);
                    return Err(e.into());
                },
            }
        }

        log_info!(
            self.logger,
            "Completed pulling all traces: {} tiles, {} pages, {} bytes, {} failed tiles",
            summary.tiles,
            summary.pages_saved,
            summary.bytes_saved,
            summary.failed_tiles
        );
        Ok(summary)
    }
}

async fn create_run_dir(output: &OutputConfig) -> Result<PathBuf> {
    let parent = output.parent_dir.clone();
    let base = output.base_name.clone();
    let dir = tokio::task::spawn_blocking(move || gpxcrawl_fs::create_unique_dir(&parent, &base))
        .await
        .map_err(|e| Error::Task(e.to_string()))??;
    Ok(dir)
}

/// Tile file path inside a run directory.
pub fn tile_path(run_dir: &Path, prefix: &str, tile: &Tile) -> PathBuf {
    run_dir.join(tile.file_name(prefix))
}
