use std::time::Duration;

/// Trackpoints endpoint of the OpenStreetMap API.
pub const DEFAULT_BASE_URL: &str = "https://api.openstreetmap.org/api/0.6/trackpoints";

/// Substring whose presence marks a page that carries at least one trace point.
pub const DEFAULT_TRACK_POINT_MARKER: &str = "trkpt";

/// Configuration for [`RetryingFetcher`](crate::RetryingFetcher).
///
/// # Examples
///
/// ```
/// use gpxcrawl_fetch::FetchOptions;
/// use std::time::Duration;
///
/// let options = FetchOptions::default()
///     .max_retries(3)
///     .retry_backoff(Duration::from_millis(500));
/// assert_eq!(options.max_retries, 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FetchOptions {
    /// Attempts per (tile, page) before giving up. Rate-limited attempts
    /// count against the same budget.
    ///
    /// Default: 5
    pub max_retries: u32,

    /// Per-request timeout, applied by the HTTP client.
    ///
    /// Default: 60s
    pub request_timeout: Duration,

    /// Minimum spacing between the start of two requests, shared by every
    /// caller of the same [`RateGate`](crate::RateGate).
    ///
    /// Default: 1s
    pub pre_request_delay: Duration,

    /// Flat delay after a timeout, transport error or unexpected status.
    ///
    /// Default: 2s
    pub retry_backoff: Duration,

    /// Delay imposed on every caller after an HTTP 429.
    ///
    /// Default: 10s
    pub rate_limit_backoff: Duration,

    /// Endpoint receiving the `bbox` and `page` query parameters.
    pub base_url: String,

    /// See [`DEFAULT_TRACK_POINT_MARKER`].
    pub track_point_marker: String,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            max_retries: 5,
            request_timeout: Duration::from_secs(60),
            pre_request_delay: Duration::from_secs(1),
            retry_backoff: Duration::from_secs(2),
            rate_limit_backoff: Duration::from_secs(10),
            base_url: DEFAULT_BASE_URL.to_string(),
            track_point_marker: DEFAULT_TRACK_POINT_MARKER.to_string(),
        }
    }
}

impl FetchOptions {
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn pre_request_delay(mut self, delay: Duration) -> Self {
        self.pre_request_delay = delay;
        self
    }

    pub fn retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff = backoff;
        self
    }

    pub fn rate_limit_backoff(mut self, backoff: Duration) -> Self {
        self.rate_limit_backoff = backoff;
        self
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn track_point_marker(mut self, marker: impl Into<String>) -> Self {
        self.track_point_marker = marker.into();
        self
    }
}
