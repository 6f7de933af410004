//! Error types for gpxcrawl.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read config {path}")]
    ConfigIo {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}")]
    ConfigParse {
        path:   PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("failed to set up logging: {0}")]
    Logging(String),

    #[error("background task failed: {0}")]
    Task(String),

    #[error(transparent)]
    Fetch(#[from] gpxcrawl_fetch::Error),

    #[error(transparent)]
    Fs(#[from] gpxcrawl_fs::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
