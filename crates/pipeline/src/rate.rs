//! Rate budget and the limiter that enforces it.
//!
//! NationStates allows 50 requests per 30 seconds per client. The budget is
//! configured as requests per 30-second window and capped at 45 to leave
//! headroom for anything else the operator runs.

use std::time::Duration;
use thiserror::Error;
use tokio::time::{Interval, MissedTickBehavior, interval};

/// Fixed length of the rate window
pub const WINDOW: Duration = Duration::from_secs(30);
pub const MIN_REQUESTS_PER_WINDOW: i64 = 1;
pub const MAX_REQUESTS_PER_WINDOW: i64 = 45;
pub const DEFAULT_REQUESTS_PER_WINDOW: i64 = 30;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RateError {
    #[error("request rate must be between {min} and {max}, got {value}")]
    OutOfRange { value: i64, min: i64, max: i64 },
}

/// A validated number of requests per [`WINDOW`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateBudget {
    requests: u32,
}

impl RateBudget {
    /// Validate `requests` per 30-second window.
    pub fn per_window(requests: i64) -> Result<Self, RateError> {
        if !(MIN_REQUESTS_PER_WINDOW..=MAX_REQUESTS_PER_WINDOW).contains(&requests) {
            return Err(RateError::OutOfRange {
                value: requests,
                min: MIN_REQUESTS_PER_WINDOW,
                max: MAX_REQUESTS_PER_WINDOW,
            });
        }
        Ok(Self {
            requests: requests as u32,
        })
    }

    pub fn requests(&self) -> u32 {
        self.requests
    }

    /// Minimum spacing between two checks: window / requests.
    pub fn delay(&self) -> Duration {
        WINDOW / self.requests
    }

    /// Build a limiter enforcing this budget, starting now.
    pub fn limiter(&self) -> RateLimiter {
        RateLimiter::new(self.delay())
    }
}

impl Default for RateBudget {
    fn default() -> Self {
        Self {
            requests: DEFAULT_REQUESTS_PER_WINDOW as u32,
        }
    }
}

/// Token bucket with a capacity of one.
///
/// The first permit is granted immediately, each later one no sooner than
/// `delay` after the previous. Time spent doing the work counts toward the
/// wait, so a slow request does not stretch the gap to the next one.
#[derive(Debug)]
pub struct RateLimiter {
    ticks: Interval,
}

impl RateLimiter {
    pub fn new(delay: Duration) -> Self {
        let mut ticks = interval(delay);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self { ticks }
    }

    /// Wait for the next permit.
    pub async fn acquire(&mut self) {
        self.ticks.tick().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[test]
    fn test_delay_for_thirty_requests() {
        let budget = RateBudget::per_window(30).unwrap();
        assert_eq!(budget.delay(), Duration::from_secs(1));
    }

    #[test]
    fn test_delay_for_forty_five_requests() {
        let budget = RateBudget::per_window(45).unwrap();
        assert!((budget.delay().as_secs_f64() - 2.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_out_of_range_rates_rejected() {
        for value in [0, -1, -30, 46, 1000] {
            assert_eq!(
                RateBudget::per_window(value),
                Err(RateError::OutOfRange { value, min: 1, max: 45 })
            );
        }
        assert!(RateBudget::per_window(1).is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_limiter_spaces_permits() {
        let mut limiter = RateBudget::per_window(30).unwrap().limiter();
        let start = Instant::now();

        limiter.acquire().await;
        assert_eq!(start.elapsed(), Duration::ZERO);

        limiter.acquire().await;
        limiter.acquire().await;
        assert_eq!(start.elapsed(), Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_limiter_absorbs_slow_work() {
        let mut limiter = RateLimiter::new(Duration::from_secs(1));
        let start = Instant::now();

        limiter.acquire().await;
        tokio::time::sleep(Duration::from_secs(3)).await;
        limiter.acquire().await;

        // the missed permit is granted right away, not a second later
        assert_eq!(start.elapsed(), Duration::from_secs(3));
    }
}
