use std::path::Path;
use std::sync::Arc;

use bytes::Bytes;

use crate::data::{DrainSummary, FetchResult, StopReason, Tile};
use crate::effects::fetcher::PageFetcher;
use crate::error::{Error, Result};
use crate::log::Logger;
use crate::{log_info, log_warn};

/// Pages through one tile until the API runs dry or a page fails.
///
/// Each page with trace points is appended to the tile's destination and
/// synced before the next page is requested. There is no page ceiling unless
/// one is configured with [`max_pages`](Self::max_pages); without it a tile
/// whose results never end keeps paginating.
pub struct PaginationDriver<F: PageFetcher> {
    fetcher:   F,
    max_pages: Option<u32>,
    logger:    Arc<dyn Logger>,
}

impl<F: PageFetcher> PaginationDriver<F> {
    pub fn new(fetcher: F, logger: Arc<dyn Logger>) -> Self {
        Self {
            fetcher,
            max_pages: None,
            logger,
        }
    }

    pub fn max_pages(mut self, max_pages: Option<u32>) -> Self {
        self.max_pages = max_pages;
        self
    }

    pub fn fetcher(&self) -> &F { &self.fetcher }

    /// Drive pages 0, 1, 2, ... of `tile`, appending each non-empty page to
    /// `destination`.
    ///
    /// A failed fetch ends the tile but is not an error. A failed append is,
    /// and nothing further is requested for this tile.
    pub async fn drain_tile(&self, tile: Tile, destination: &Path) -> Result<DrainSummary> {
        let mut summary = DrainSummary::new(tile);
        let mut page: u32 = 0;

        loop {
            if self.max_pages.is_some_and(|limit| page >= limit) {
                log_warn!(
                    self.logger,
                    "Page limit reached for bbox: {tile} after {page} pages"
                );
                summary.stop = StopReason::PageLimit;
                break;
            }

            log_info!(self.logger, "Fetching GPS traces for bbox: {tile}, page: {page}");

            match self.fetcher.fetch(tile, page).await {
                FetchResult::Content { body, length } => {
                    let saved = body.len() as u64;
                    append(destination, body).await?;
                    summary.pages_saved += 1;
                    summary.bytes_saved += saved;
                    log_info!(
                        self.logger,
                        "Saved traces for bbox: {tile}, page: {page} ({length} bytes) to {}",
                        destination.display()
                    );
                },
                FetchResult::Empty => {
                    log_info!(self.logger, "No traces for bbox: {tile}, page {page}");
                    summary.stop = StopReason::Exhausted;
                    break;
                },
                FetchResult::Failed => {
                    log_warn!(
                        self.logger,
                        "Stopping bbox: {tile} at page {page} after failed fetch"
                    );
                    summary.stop = StopReason::Failed;
                    break;
                },
            }

            page = match page.checked_add(1) {
                Some(next) => next,
                None => {
                    summary.stop = StopReason::PageLimit;
                    break;
                },
            };
        }

        Ok(summary)
    }
}

async fn append(destination: &Path, body: Bytes) -> Result<()> {
    let path = destination.to_path_buf();
    tokio::task::spawn_blocking(move || gpxcrawl_fs::append_bytes(&path, &body))
        .await
        .map_err(|e| Error::Task(e.to_string()))??;
    Ok(())
}
