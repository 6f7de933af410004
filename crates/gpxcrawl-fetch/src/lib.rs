//! Tiled, paginated fetching of GPS trackpoints with bounded retries.
//!
//! # Architecture
//!
//! This crate follows the three-layer pattern:
//! - [`data`] - Immutable configuration and types
//! - [`core`] - Pure transformations (tiling, URLs, response classification)
//! - [`effects`] - I/O operations with trait abstraction
//!
//! # Key Features
//!
//! - **Deterministic tiling**: a region always yields the same tile sequence
//! - **Absorbed failures**: network errors never escape [`RetryingFetcher`];
//!   callers only see [`FetchResult`]
//! - **Shared rate gate**: one [`RateGate`] paces every request, and a 429 seen
//!   by any caller delays all of them
//! - **Append before advance**: [`PaginationDriver`] persists a page before it
//!   asks for the next one

pub mod core;
pub mod data;
pub mod effects;
pub mod log;

mod error;

pub use self::core::{Tiles, tiles, trackpoints_url};
pub use self::data::{DrainSummary, FetchOptions, FetchResult, Region, StopReason, Tile};
pub use self::effects::{
    GatePermit, HttpClient, HttpResponse, PageFetcher, PaginationDriver, RateGate,
    RetryingFetcher,
};
pub use self::error::{Error, Result};
pub use self::log::{LogLevel, Logger, MemoryLogger, NoOpLogger, TracingLogger};

#[cfg(feature = "reqwest")]
pub use self::effects::ReqwestClient;
