use std::time::Duration;

use super::classify::Failure;
use crate::data::FetchOptions;

/// What to do between a failed attempt and the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backoff {
    /// Sleep locally before retrying.
    Local(Duration),
    /// Push back every caller sharing the rate gate.
    Shared(Duration),
}

/// Delay policy for a failed attempt.
///
/// Rate limiting is treated as a signal about the whole client, so it delays
/// all in-flight work. Everything else uses the same flat local backoff.
pub fn backoff_for(failure: &Failure, options: &FetchOptions) -> Backoff {
    match failure {
        Failure::RateLimited => Backoff::Shared(options.rate_limit_backoff),
        Failure::Status(_) | Failure::Timeout | Failure::Transport(_) => {
            Backoff::Local(options.retry_backoff)
        },
    }
}
