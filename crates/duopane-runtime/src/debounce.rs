//! Trailing debounce for viewport resize bursts.
//!
//! Time is supplied by the host as a monotonic [`Duration`] since an
//! arbitrary origin, so behavior is deterministic under test.

use std::time::Duration;

/// Coalesces a burst of viewport widths into the last one, released once
/// the burst has been quiet for the configured window.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeDebouncer {
    window: Duration,
    pending: Option<Pending>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Pending {
    deadline: Duration,
    width: f64,
}

impl ResizeDebouncer {
    #[must_use]
    pub const fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    #[must_use]
    pub const fn window(&self) -> Duration {
        self.window
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Record a resize observed at `now`. Restarts the quiet window.
    pub fn push(&mut self, now: Duration, width: f64) {
        self.pending = Some(Pending {
            deadline: now.saturating_add(self.window),
            width,
        });
    }

    /// Release the latest width if the window has elapsed by `now`.
    pub fn poll(&mut self, now: Duration) -> Option<f64> {
        match self.pending {
            Some(pending) if now >= pending.deadline => {
                self.pending = None;
                Some(pending.width)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: fn(u64) -> Duration = Duration::from_millis;

    #[test]
    fn burst_coalesces_to_last_width() {
        let mut debouncer = ResizeDebouncer::new(MS(250));
        debouncer.push(MS(0), 1200.0);
        debouncer.push(MS(100), 900.0);
        debouncer.push(MS(200), 700.0);
        assert_eq!(debouncer.poll(MS(400)), None);
        assert_eq!(debouncer.poll(MS(450)), Some(700.0));
        assert_eq!(debouncer.poll(MS(900)), None);
    }

    #[test]
    fn zero_window_fires_on_same_tick() {
        let mut debouncer = ResizeDebouncer::new(Duration::ZERO);
        debouncer.push(MS(10), 500.0);
        assert!(debouncer.is_pending());
        assert_eq!(debouncer.poll(MS(10)), Some(500.0));
        assert!(!debouncer.is_pending());
    }
}
