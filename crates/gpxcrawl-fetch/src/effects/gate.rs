//! Shared request pacing.
//!
//! Every request of a run passes through one [`RateGate`]. The gate enforces
//! three things at once:
//!
//! - a ceiling on requests in flight (semaphore)
//! - a minimum spacing between request starts
//! - a common "resume at" instant, pushed forward by any HTTP 429
//!
//! A rate-limit response observed by one worker therefore delays every other
//! worker's next request as well, instead of being local to one retry loop.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::{Semaphore, SemaphorePermit};
use tokio::time::Instant;

use crate::error::{Error, Result};

#[derive(Debug, Default)]
struct GateState {
    next_start: Option<Instant>,
    resume_at:  Option<Instant>,
}

#[derive(Debug)]
pub struct RateGate {
    permits:      Semaphore,
    min_interval: Duration,
    state:        Mutex<GateState>,
}

/// Held for the duration of one request; dropping it frees the slot.
#[derive(Debug)]
pub struct GatePermit<'a> {
    _permit: SemaphorePermit<'a>,
}

impl RateGate {
    /// # Panics
    ///
    /// Panics if `max_in_flight` is 0.
    pub fn new(max_in_flight: usize, min_interval: Duration) -> Self {
        assert!(max_in_flight > 0, "max_in_flight must be > 0");
        Self {
            permits: Semaphore::new(max_in_flight),
            min_interval,
            state: Mutex::new(GateState::default()),
        }
    }

    /// A gate with a single slot and no spacing.
    #[cfg(test)]
    pub(crate) fn unlimited() -> Self { Self::new(1, Duration::ZERO) }

    #[cfg(test)]
    fn available(&self) -> usize { self.permits.available_permits() }

    /// Wait for a free slot and for the pacing schedule, then claim the next
    /// start time.
    pub async fn acquire(&self) -> Result<GatePermit<'_>> {
        let permit = self.permits.acquire().await.map_err(|_| Error::GateClosed)?;

        loop {
            let wait_until = {
                let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
                let now = Instant::now();
                let ready_at = state.next_start.max(state.resume_at);
                match ready_at {
                    Some(at) if at > now => at,
                    _ => {
                        state.next_start = Some(now + self.min_interval);
                        break;
                    },
                }
            };
            tokio::time::sleep_until(wait_until).await;
        }

        Ok(GatePermit { _permit: permit })
    }

    /// Hold back every caller for at least `delay` from now.
    pub fn back_off(&self, delay: Duration) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let until = Instant::now() + delay;
        state.resume_at = state.resume_at.max(Some(until));
    }

    /// Instant before which no request will start because of a 429, if any.
    pub fn resume_at(&self) -> Option<Instant> {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .resume_at
    }
}
