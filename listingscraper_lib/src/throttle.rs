//! Minimum-spacing throttle for outbound requests.

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::{sleep, Instant};

/// Default spacing between two outbound requests.
pub const DEFAULT_THROTTLE_DELAY: Duration = Duration::from_secs(5);

/// Enforces a minimum delay between any two requests made through it.
///
/// The lock is held across the sleep, so callers sharing one throttle are
/// serialized and the spacing holds for the whole fetcher rather than per
/// caller or per host.
pub struct Throttle {
    delay: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl Throttle {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            last_request: Mutex::new(None),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Waits until `delay` has passed since the previous acquire, then
    /// records now as the new request time. The first acquire never waits.
    pub async fn acquire(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(last_time) = *last {
            let elapsed = last_time.elapsed();
            if elapsed < self.delay {
                let wait = self.delay - elapsed;
                tracing::debug!("throttling: sleeping for {:.2}s", wait.as_secs_f64());
                sleep(wait).await;
            }
        }
        *last = Some(Instant::now());
    }
}

impl Default for Throttle {
    fn default() -> Self {
        Self::new(DEFAULT_THROTTLE_DELAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn first_acquire_does_not_wait() {
        let throttle = Throttle::new(Duration::from_secs(5));
        let start = Instant::now();
        throttle.acquire().await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn back_to_back_acquires_are_spaced() {
        let throttle = Throttle::new(Duration::from_secs(5));
        let start = Instant::now();

        throttle.acquire().await;
        throttle.acquire().await;
        throttle.acquire().await;

        assert!(start.elapsed() >= Duration::from_secs(10));
    }

    #[tokio::test(start_paused = true)]
    async fn every_gap_meets_the_delay() {
        let delay = Duration::from_secs(5);
        let throttle = Throttle::new(delay);

        let mut issued = Vec::new();
        for _ in 0..4 {
            throttle.acquire().await;
            issued.push(Instant::now());
            tokio::time::advance(Duration::from_secs(1)).await;
        }

        for pair in issued.windows(2) {
            assert!(pair[1] - pair[0] >= delay);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn only_remaining_delay_is_slept() {
        let throttle = Throttle::new(Duration::from_secs(5));
        throttle.acquire().await;

        tokio::time::advance(Duration::from_secs(3)).await;
        let start = Instant::now();
        throttle.acquire().await;

        let waited = start.elapsed();
        assert!(waited >= Duration::from_secs(2));
        assert!(waited < Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn no_wait_once_delay_has_passed() {
        let throttle = Throttle::new(Duration::from_secs(5));
        throttle.acquire().await;

        tokio::time::advance(Duration::from_secs(6)).await;
        let start = Instant::now();
        throttle.acquire().await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[test]
    fn default_delay_is_five_seconds() {
        assert_eq!(Throttle::default().delay(), Duration::from_secs(5));
    }
}
