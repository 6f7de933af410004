use std::future::Future;
use std::sync::Arc;

use crate::core::{
    Backoff, Failure, backoff_for, classify, content_length_or_body, has_track_points, trackpoints_url,
};
use crate::data::{FetchOptions, FetchResult, Tile};
use crate::effects::gate::RateGate;
use crate::effects::http::{HttpClient, HttpResponse};
use crate::log::Logger;
use crate::{log_debug, log_error, log_warn};

/// Source of pages for one tile.
///
/// [`RetryingFetcher`] is the production implementation; the trait is the
/// seam [`PaginationDriver`](crate::PaginationDriver) is tested through.
pub trait PageFetcher: Send + Sync {
    fn fetch(&self, tile: Tile, page: u32) -> impl Future<Output = FetchResult> + Send;
}

/// Fetches one (tile, page) pair, retrying within a bounded budget.
///
/// Network errors never escape: every outcome is folded into a
/// [`FetchResult`], and every attempt is reported to the logger.
pub struct RetryingFetcher<C: HttpClient> {
    client:  C,
    gate:    Arc<RateGate>,
    options: FetchOptions,
    logger:  Arc<dyn Logger>,
}

impl<C: HttpClient> RetryingFetcher<C> {
    pub fn new(client: C, gate: Arc<RateGate>, options: FetchOptions, logger: Arc<dyn Logger>) -> Self {
        Self {
            client,
            gate,
            options,
            logger,
        }
    }

    /// Request `page` of `tile`.
    ///
    /// - 200 with trace points: [`FetchResult::Content`]
    /// - 200 without: [`FetchResult::Empty`]
    /// - 429: the shared gate backs off, one attempt is consumed
    /// - any other status, a timeout or a transport error: one attempt is
    ///   consumed, then a flat local backoff
    ///
    /// After `max_retries` attempts without a 200 the pair is abandoned with
    /// [`FetchResult::Failed`]. The local backoff is skipped after the last
    /// attempt; a 429 on the last attempt still pushes the gate back, since
    /// the next request from any caller would hit the same limit.
    pub async fn fetch(&self, tile: Tile, page: u32) -> FetchResult {
        let url = trackpoints_url(&self.options.base_url, &tile, page);
        let max = self.options.max_retries;

        for attempt in 1..=max {
            let result = {
                let _permit = match self.gate.acquire().await {
                    Ok(permit) => permit,
                    Err(e) => {
                        log_error!(self.logger, "Cannot request bbox {tile} page {page}: {e}");
                        return FetchResult::Failed;
                    },
                };
                self.client.get(&url).await
            };

            let failure = match classify(result) {
                Ok(response) => return self.accept(tile, page, attempt, response),
                Err(failure) => failure,
            };

            match &failure {
                Failure::RateLimited => log_warn!(
                    self.logger,
                    "Error: HTTP 429 (HIT REQUEST LIMIT) for bbox {tile} page {page} (Attempt {attempt}/{max})"
                ),
                Failure::Status(status) => log_warn!(
                    self.logger,
                    "Error: HTTP {status} for bbox {tile} page {page} (Attempt {attempt}/{max})"
                ),
                Failure::Timeout => log_warn!(
                    self.logger,
                    "Timeout occurred for bbox {tile} page {page}. Retrying... (Attempt {attempt}/{max})"
                ),
                Failure::Transport(reason) => log_warn!(
                    self.logger,
                    "An error occurred for bbox {tile} page {page}: {reason}. Retrying... (Attempt {attempt}/{max})"
                ),
            }

            match backoff_for(&failure, &self.options) {
                Backoff::Shared(delay) => self.gate.back_off(delay),
                Backoff::Local(delay) if attempt < max => tokio::time::sleep(delay).await,
                Backoff::Local(_) => {},
            }
        }

        log_warn!(self.logger, "Max retries reached for bbox {tile} page {page}.");
        FetchResult::Failed
    }

    fn accept(&self, tile: Tile, page: u32, attempt: u32, response: HttpResponse) -> FetchResult {
        let max = self.options.max_retries;
        let marker = &self.options.track_point_marker;
        let length = content_length_or_body(response.content_length, &response.body);

        if has_track_points(&response.body, marker) {
            log_debug!(
                self.logger,
                "HTTP 200 for bbox {tile} page {page} ({length} bytes, attempt {attempt}/{max})"
            );
            FetchResult::Content {
                body: response.body,
                length,
            }
        } else {
            log_debug!(
                self.logger,
                "HTTP 200 without {marker} for bbox {tile} page {page} ({} body bytes)",
                response.body.len()
            );
            FetchResult::Empty
        }
    }
}

impl<C: HttpClient> PageFetcher for RetryingFetcher<C> {
    fn fetch(&self, tile: Tile, page: u32) -> impl Future<Output = FetchResult> + Send {
        RetryingFetcher::fetch(self, tile, page)
    }
}
