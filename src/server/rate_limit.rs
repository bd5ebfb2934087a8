// Fixed-window rate limiting per client

use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time;

/// Request count for one client in the current window
#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    count: u32,
}

/// Concurrent fixed-window limiter keyed by client address
pub struct RateLimiter {
    windows: Arc<DashMap<String, Window>>,
    max_requests: u32,
    window: Duration,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            windows: Arc::new(DashMap::new()),
            max_requests,
            window,
        }
    }

    /// Record a request; `Err(retry_after_secs)` when the client is over limit
    pub fn check(&self, client: &str) -> Result<(), u64> {
        self.check_at(client, Instant::now())
    }

    fn check_at(&self, client: &str, now: Instant) -> Result<(), u64> {
        let mut entry = self.windows.entry(client.to_string()).or_insert(Window {
            started: now,
            count: 0,
        });

        if now.duration_since(entry.started) >= self.window {
            entry.started = now;
            entry.count = 0;
        }

        if entry.count >= self.max_requests {
            let remaining = self.window.saturating_sub(now.duration_since(entry.started));
            // Round up so clients never retry before the window resets
            let retry_after = remaining.as_secs() + u64::from(remaining.subsec_nanos() > 0);
            return Err(retry_after.max(1));
        }

        entry.count += 1;
        Ok(())
    }

    /// Number of clients with a tracked window
    pub fn tracked_clients(&self) -> usize {
        self.windows.len()
    }

    /// Start background task dropping windows that have expired
    pub fn start_cleanup_task(&self) {
        let windows = Arc::clone(&self.windows);
        let window = self.window;

        tokio::spawn(async move {
            let mut interval = time::interval(Duration::from_secs(60));

            loop {
                interval.tick().await;

                let before = windows.len();
                windows.retain(|_, w| w.started.elapsed() < window);
                let removed = before.saturating_sub(windows.len());

                if removed > 0 {
                    tracing::debug!(
                        removed = removed,
                        active = windows.len(),
                        "Cleaned up expired rate limit windows"
                    );
                }
            }
        });
    }
}
