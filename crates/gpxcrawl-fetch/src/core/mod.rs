//! Pure transformations for crawling.
//!
//! Nothing here performs I/O: tiling a region, building request URLs,
//! classifying a response and choosing the delay before the next attempt.

mod classify;
mod retry;
mod tiles;
mod url;

pub use classify::{Failure, classify, content_length_or_body, has_track_points};
pub use retry::{Backoff, backoff_for};
pub use tiles::{MAX_AXIS_TILES, Tiles, axis_count, tiles};
pub use url::trackpoints_url;
