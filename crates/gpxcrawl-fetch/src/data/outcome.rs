use bytes::Bytes;

use super::region::Tile;

/// Outcome of one (tile, page) request after retries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchResult {
    /// HTTP 200 with at least one trace point. `length` is the declared
    /// `Content-Length`, or the body length when the header is missing.
    Content { body: Bytes, length: u64 },

    /// HTTP 200 without any trace point: the end of this tile's pages.
    Empty,

    /// Every attempt failed.
    Failed,
}

impl FetchResult {
    pub fn is_content(&self) -> bool { matches!(self, FetchResult::Content { .. }) }
}

/// Why pagination of a tile stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// A page came back without trace points.
    Exhausted,
    /// A page could not be fetched within the retry budget.
    Failed,
    /// The configured page ceiling was reached.
    PageLimit,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrainSummary {
    pub tile:        Tile,
    pub pages_saved: u32,
    pub bytes_saved: u64,
    pub stop:        StopReason,
}

impl DrainSummary {
    pub fn new(tile: Tile) -> Self {
        Self {
            tile,
            pages_saved: 0,
            bytes_saved: 0,
            stop: StopReason::Exhausted,
        }
    }
}
