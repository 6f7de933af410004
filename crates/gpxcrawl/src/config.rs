//! Crawl configuration.
//!
//! Loaded from a TOML file whose path comes from `GPXCRAWL_CONFIG`, falling
//! back to `gpxcrawl.toml` in the working directory. Every key is optional;
//! a missing file means "all defaults", which crawl Florida in 0.25° tiles.
//!
//! ```toml
//! step = 0.5
//! workers = 2
//! max_pages = 200
//!
//! [region]
//! min_lon = -87.6349
//! min_lat = 24.3963
//! max_lon = -79.9743
//! max_lat = 31.0009
//!
//! [output]
//! parent_dir = "data"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use gpxcrawl_fetch::data::options::{DEFAULT_BASE_URL, DEFAULT_TRACK_POINT_MARKER};
use gpxcrawl_fetch::{FetchOptions, Region};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const CONFIG_ENV: &str = "GPXCRAWL_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "gpxcrawl.toml";

/// Upper bound for every millisecond delay key: one day.
pub const MAX_DELAY_MS: u64 = 86_400_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegionConfig {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl Default for RegionConfig {
    fn default() -> Self {
        Self {
            min_lon: -87.6349,
            min_lat: 24.3963,
            max_lon: -79.9743,
            max_lat: 31.0009,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Directory the run directory is created in.
    pub parent_dir:  PathBuf,
    /// Run directory name; `name(1)`, `name(2)`, ... on collision.
    pub base_name:   String,
    /// Prefix of each tile file name.
    pub file_prefix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            parent_dir:  PathBuf::from("."),
            base_name:   "gps_traces".to_string(),
            file_prefix: "gps_traces".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CrawlConfig {
    pub region:                RegionConfig,
    /// Tile side in degrees.
    pub step:                  f64,
    pub max_retries:           u32,
    pub request_timeout_secs:  f64,
    pub pre_request_delay_ms:  u64,
    pub retry_backoff_ms:      u64,
    pub rate_limit_backoff_ms: u64,
    /// Optional ceiling on pages per tile.
    pub max_pages:             Option<u32>,
    /// Tiles drained concurrently.
    pub workers:               usize,
    /// Requests in flight across all workers.
    pub max_in_flight:         usize,
    pub base_url:              String,
    pub track_point_marker:    String,
    pub output:                OutputConfig,
    pub log_file:              PathBuf,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            region:                RegionConfig::default(),
            step:                  0.25,
            max_retries:           5,
            request_timeout_secs:  60.0,
            pre_request_delay_ms:  1_000,
            retry_backoff_ms:      2_000,
            rate_limit_backoff_ms: 10_000,
            max_pages:             None,
            workers:               1,
            max_in_flight:         1,
            base_url:              DEFAULT_BASE_URL.to_string(),
            track_point_marker:    DEFAULT_TRACK_POINT_MARKER.to_string(),
            output:                OutputConfig::default(),
            log_file:              PathBuf::from("gps_traces_log.txt"),
        }
    }
}

/// Config path from `GPXCRAWL_CONFIG`, or `gpxcrawl.toml`.
pub fn config_path() -> PathBuf {
    std::env::var_os(CONFIG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

impl CrawlConfig {
    pub fn from_toml_str(text: &str, origin: &Path) -> Result<Self> {
        let config: Self = toml::from_str(text).map_err(|e| Error::ConfigParse {
            path:   origin.to_path_buf(),
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| Error::ConfigIo {
            path:   path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml_str(&text, path)
    }

    /// Like [`load`](Self::load), but a missing file yields the defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() { Self::load(path) } else { Ok(Self::default()) }
    }

    pub fn validate(&self) -> Result<()> {
        self.region()?;
        if !self.step.is_finite() || self.step <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "step must be a positive number of degrees, got {}",
                self.step
            )));
        }
        if self.max_retries == 0 {
            return Err(Error::InvalidConfig("max_retries must be at least 1".into()));
        }
        self.request_timeout()?;
        for (key, value) in [
            ("pre_request_delay_ms", self.pre_request_delay_ms),
            ("retry_backoff_ms", self.retry_backoff_ms),
            ("rate_limit_backoff_ms", self.rate_limit_backoff_ms),
        ] {
            if value > MAX_DELAY_MS {
                return Err(Error::InvalidConfig(format!(
                    "{key} must be at most {MAX_DELAY_MS}, got {value}"
                )));
            }
        }
        if self.workers == 0 {
            return Err(Error::InvalidConfig("workers must be at least 1".into()));
        }
        if self.max_in_flight == 0 {
            return Err(Error::InvalidConfig("max_in_flight must be at least 1".into()));
        }
        if self.max_pages == Some(0) {
            return Err(Error::InvalidConfig("max_pages must be at least 1 when set".into()));
        }
        if self.track_point_marker.is_empty() {
            return Err(Error::InvalidConfig("track_point_marker must not be empty".into()));
        }
        if self.output.base_name.is_empty() {
            return Err(Error::InvalidConfig("output.base_name must not be empty".into()));
        }
        Ok(())
    }

    pub fn region(&self) -> Result<Region> {
        let r = &self.region;
        Ok(Region::new(r.min_lon, r.min_lat, r.max_lon, r.max_lat)?)
    }

    /// `request_timeout_secs` as a duration; it must be positive and fit one.
    pub fn request_timeout(&self) -> Result<Duration> {
        let secs = self.request_timeout_secs;
        match Duration::try_from_secs_f64(secs) {
            Ok(timeout) if !timeout.is_zero() => Ok(timeout),
            _ => Err(Error::InvalidConfig(format!(
                "request_timeout_secs must be a positive number of seconds, got {secs}"
            ))),
        }
    }

    pub fn pre_request_delay(&self) -> Duration { Duration::from_millis(self.pre_request_delay_ms) }

    pub fn fetch_options(&self) -> Result<FetchOptions> {
        Ok(FetchOptions::default()
            .max_retries(self.max_retries)
            .request_timeout(self.request_timeout()?)
            .pre_request_delay(self.pre_request_delay())
            .retry_backoff(Duration::from_millis(self.retry_backoff_ms))
            .rate_limit_backoff(Duration::from_millis(self.rate_limit_backoff_ms))
            .base_url(self.base_url.clone())
            .track_point_marker(self.track_point_marker.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn parse(text: &str) -> Result<CrawlConfig> { CrawlConfig::from_toml_str(text, Path::new("test.toml")) }

    #[test]
    fn test_defaults_are_valid() {
        let config = CrawlConfig::default();
        config.validate().unwrap();
        assert_eq!(config.step, 0.25);
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.request_timeout().unwrap(), Duration::from_secs(60));
        assert_eq!(config.workers, 1);
        assert_eq!(config.max_pages, None);
        assert_eq!(config.output.base_name, "gps_traces");
    }

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(parse("").unwrap(), CrawlConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = parse(
            r#"
            step = 0.5
            workers = 4
            max_in_flight = 2
            max_pages = 100

            [region]
            min_lon = 0.0
            min_lat = 0.0
            max_lon = 1.0
            max_lat = 1.0

            [output]
            parent_dir = "data"
            "#,
        )
        .unwrap();
        assert_eq!(config.step, 0.5);
        assert_eq!(config.workers, 4);
        assert_eq!(config.max_pages, Some(100));
        assert_eq!(config.region().unwrap(), Region::new(0.0, 0.0, 1.0, 1.0).unwrap());
        assert_eq!(config.output.parent_dir, PathBuf::from("data"));
        assert_eq!(config.output.base_name, "gps_traces");
        assert_eq!(config.max_retries, 5);
    }

    #[test]
    fn test_fetch_options_mapping() {
        let config = parse(
            r#"
            max_retries = 3
            request_timeout_secs = 12.5
            pre_request_delay_ms = 250
            retry_backoff_ms = 500
            rate_limit_backoff_ms = 30000
            base_url = "http://localhost:9000/tp"
            "#,
        )
        .unwrap();
        let options = config.fetch_options().unwrap();
        assert_eq!(options.max_retries, 3);
        assert_eq!(options.request_timeout, Duration::from_millis(12_500));
        assert_eq!(options.pre_request_delay, Duration::from_millis(250));
        assert_eq!(options.retry_backoff, Duration::from_millis(500));
        assert_eq!(options.rate_limit_backoff, Duration::from_secs(30));
        assert_eq!(options.base_url, "http://localhost:9000/tp");
        assert_eq!(options.track_point_marker, "trkpt");
    }

    #[test]
    fn test_rejects_invalid_values() {
        for text in [
            "step = 0.0",
            "step = -1.0",
            "max_retries = 0",
            "workers = 0",
            "max_in_flight = 0",
            "max_pages = 0",
            "request_timeout_secs = 0.0",
            "request_timeout_secs = -3.0",
            "request_timeout_secs = 1e30",
            "rate_limit_backoff_ms = 100000000000",
            "retry_backoff_ms = 86400001",
            "track_point_marker = \"\"",
        ] {
            assert!(
                matches!(parse(text), Err(Error::InvalidConfig(_))),
                "{text} should be rejected"
            );
        }
    }

    #[test]
    fn test_unvalidated_timeout_is_an_error() {
        let config = CrawlConfig {
            request_timeout_secs: f64::INFINITY,
            ..CrawlConfig::default()
        };
        assert!(matches!(config.request_timeout(), Err(Error::InvalidConfig(_))));
        assert!(matches!(config.fetch_options(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_inverted_region() {
        let err = parse("[region]\nmin_lon = 2.0\nmax_lon = 1.0").unwrap_err();
        assert!(matches!(err, Error::Fetch(gpxcrawl_fetch::Error::InvalidRegion(_))));
    }

    #[test]
    fn test_rejects_unknown_keys() {
        assert!(matches!(parse("stepp = 0.5"), Err(Error::ConfigParse { .. })));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempdir().unwrap();
        let config = CrawlConfig::load_or_default(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, CrawlConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gpxcrawl.toml");
        std::fs::write(&path, "step = 1.0\nlog_file = \"crawl.log\"\n").unwrap();
        let config = CrawlConfig::load(&path).unwrap();
        assert_eq!(config.step, 1.0);
        assert_eq!(config.log_file, PathBuf::from("crawl.log"));
    }

    #[test]
    fn test_load_missing_file_errors() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            CrawlConfig::load(dir.path().join("absent.toml")),
            Err(Error::ConfigIo { .. })
        ));
    }
}
