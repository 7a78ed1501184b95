//! Process-wide spacing of outbound registry calls

use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

/// Enforces a minimum interval between request start times.
///
/// Each caller reserves the next free slot under a short lock and then
/// sleeps outside it, so concurrent callers are spaced out without the lock
/// being held across an await.
#[derive(Debug)]
pub struct RateLimiter {
    next_slot: Mutex<Option<Instant>>,
    min_interval: Duration,
}

impl RateLimiter {
    /// Create a limiter with the given minimum spacing
    pub fn new(min_interval: Duration) -> Self {
        Self {
            next_slot: Mutex::new(None),
            min_interval,
        }
    }

    /// Configured minimum spacing
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Wait until this caller may issue a request
    pub async fn wait(&self) {
        if self.min_interval.is_zero() {
            return;
        }

        let now = Instant::now();
        let slot = {
            let mut next = self.next_slot.lock().unwrap_or_else(|e| e.into_inner());
            let slot = match *next {
                Some(at) if at > now => at,
                _ => now,
            };
            *next = Some(slot + self.min_interval);
            slot
        };

        if slot > now {
            debug!("Rate limiting: waiting {:?}", slot - now);
            tokio::time::sleep_until(slot).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_first_request_does_not_wait() {
        let limiter = RateLimiter::new(Duration::from_millis(500));
        let start = Instant::now();
        limiter.wait().await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sequential_requests_are_spaced() {
        let limiter = RateLimiter::new(Duration::from_millis(500));
        let start = Instant::now();
        limiter.wait().await;
        limiter.wait().await;
        limiter.wait().await;
        assert!(start.elapsed() >= Duration::from_millis(1000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_requests_get_distinct_slots() {
        let limiter = RateLimiter::new(Duration::from_millis(200));
        let limiter = &limiter;
        let start = Instant::now();
        let waits = (0..3).map(|_| async move {
            limiter.wait().await;
            start.elapsed()
        });
        let mut finished = futures::future::join_all(waits).await;
        finished.sort();
        assert_eq!(finished[0], Duration::ZERO);
        assert!(finished[1] >= Duration::from_millis(200));
        assert!(finished[2] >= Duration::from_millis(400));
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_period_resets_spacing() {
        let limiter = RateLimiter::new(Duration::from_millis(100));
        limiter.wait().await;
        tokio::time::advance(Duration::from_secs(1)).await;
        let start = Instant::now();
        limiter.wait().await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test]
    async fn test_zero_interval_never_waits() {
        let limiter = RateLimiter::new(Duration::ZERO);
        for _ in 0..5 {
            limiter.wait().await;
        }
        assert_eq!(limiter.min_interval(), Duration::ZERO);
    }
}
