//! Sliding-window rate limiting for outbound API calls

use std::collections::VecDeque;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::{sleep, Instant};

/// Admits at most `max_requests` starts per rolling `window`; callers
/// wait until a slot frees up
pub struct RateLimiter {
    window: Duration,
    max_requests: usize,
    timestamps: Mutex<VecDeque<Instant>>,
}

impl RateLimiter {
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            window,
            max_requests,
            timestamps: Mutex::new(VecDeque::new()),
        }
    }

    /// Wait for a request slot
    pub async fn acquire(&self) {
        loop {
            let wait = {
                let mut stamps = self.timestamps.lock().await;
                let now = Instant::now();

                // A slot is held for exactly one window
                while stamps
                    .front()
                    .map_or(false, |&t| now.duration_since(t) >= self.window)
                {
                    stamps.pop_front();
                }

                if stamps.len() < self.max_requests {
                    stamps.push_back(now);
                    return;
                }

                let Some(&oldest) = stamps.front() else {
                    stamps.push_back(now);
                    return;
                };
                self.window.saturating_sub(now.duration_since(oldest))
            };

            sleep(wait).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_requests_within_limit_are_immediate() {
        let limiter = RateLimiter::new(3, Duration::from_secs(60));
        let start = Instant::now();

        for _ in 0..3 {
            limiter.acquire().await;
        }

        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_excess_request_waits_for_window() {
        let limiter = RateLimiter::new(2, Duration::from_secs(60));
        let start = Instant::now();

        limiter.acquire().await;
        limiter.acquire().await;
        // Third caller has to wait for the oldest slot to expire
        limiter.acquire().await;

        assert!(start.elapsed() >= Duration::from_secs(60));
    }

    #[tokio::test(start_paused = true)]
    async fn test_slots_free_up_after_window() {
        let limiter = RateLimiter::new(1, Duration::from_secs(10));

        limiter.acquire().await;
        tokio::time::advance(Duration::from_secs(11)).await;

        let start = Instant::now();
        limiter.acquire().await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }
}
