//! Crawl publicly shared GPS traces of a region into per-tile files.
//!
//! The region is cut into square tiles, each tile is paged until the API
//! returns a page without trace points, and every page is appended to the
//! tile's file before the next one is requested. Configuration comes from a
//! TOML file (see [`config`]); events go through [`gpxcrawl_fetch::Logger`].

pub mod config;
pub mod logging;
pub mod runner;

mod error;

pub use config::{CONFIG_ENV, CrawlConfig, DEFAULT_CONFIG_FILE, OutputConfig, RegionConfig, config_path};
pub use error::{Error, Result};
pub use logging::{LoggingGuard, init_logging};
pub use runner::{RunSummary, Runner};
