//! Error types for gpxcrawl-fetch.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid region: {0}")]
    InvalidRegion(String),

    #[error("invalid tile step {0}: must be finite and positive")]
    InvalidStep(f64),

    #[error("request timeout")]
    Timeout,

    #[error("network error: {0}")]
    Network(String),

    #[error("failed to build HTTP client: {0}")]
    Client(String),

    #[error("rate gate closed")]
    GateClosed,

    #[error("background task failed: {0}")]
    Task(String),

    #[error(transparent)]
    Fs(#[from] gpxcrawl_fs::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
