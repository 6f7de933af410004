//! Data layer: immutable types for regions, fetch configuration and outcomes.

pub mod options;
pub mod outcome;
pub mod region;

pub use options::FetchOptions;
pub use outcome::{DrainSummary, FetchResult, StopReason};
pub use region::{Region, Tile};
