use crate::effects::HttpResponse;
use crate::error::{Error, Result};

/// Why a single HTTP attempt did not produce a 200.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    /// HTTP 429.
    RateLimited,
    /// Any other non-200 status code.
    Status(u16),
    /// The request did not complete within the timeout.
    Timeout,
    /// DNS, connection or body read failure.
    Transport(String),
}

/// Split the outcome of one GET into the 200 response or the reason it
/// failed.
pub fn classify(result: Result<HttpResponse>) -> std::result::Result<HttpResponse, Failure> {
    match result {
        Ok(response) => match response.status {
            200 => Ok(response),
            429 => Err(Failure::RateLimited),
            status => Err(Failure::Status(status)),
        },
        Err(Error::Timeout) => Err(Failure::Timeout),
        Err(e) => Err(Failure::Transport(e.to_string())),
    }
}

/// Whether `body` carries at least one trace point.
///
/// This is a raw substring test. A truncated or malformed 200 body without the
/// marker is indistinguishable from a genuine "no more results" page.
pub fn has_track_points(body: &[u8], marker: &str) -> bool {
    let marker = marker.as_bytes();
    if marker.is_empty() {
        return true;
    }
    body.windows(marker.len()).any(|w| w == marker)
}

/// Declared size of a response, falling back to the bytes actually received.
pub fn content_length_or_body(declared: Option<u64>, body: &[u8]) -> u64 {
    declared.unwrap_or(body.len() as u64)
}
