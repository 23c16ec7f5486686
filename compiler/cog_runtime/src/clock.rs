//! Time source for timers.
//!
//! Timer expiry is only checked between ticks, so the clock just needs
//! to say how much time has passed since the runtime started. Tests use
//! a manual clock and move it forward by hand.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

#[derive(Clone, Debug)]
pub struct Clock(ClockKind);

#[derive(Clone, Debug)]
enum ClockKind {
    Monotonic(Instant),
    Manual(Arc<Mutex<Duration>>),
}

impl Clock {
    /// Wall time since creation.
    pub fn monotonic() -> Self {
        Clock(ClockKind::Monotonic(Instant::now()))
    }

    /// Starts at zero and only moves through [`Clock::advance`]. Clones
    /// share the same reading.
    pub fn manual() -> Self {
        Clock(ClockKind::Manual(Arc::new(Mutex::new(Duration::ZERO))))
    }

    pub fn now(&self) -> Duration {
        match &self.0 {
            ClockKind::Monotonic(start) => start.elapsed(),
            ClockKind::Manual(now) => *now.lock(),
        }
    }

    /// Move a manual clock forward. Returns `false` for a monotonic clock,
    /// which cannot be moved.
    pub fn advance(&self, by: Duration) -> bool {
        match &self.0 {
            ClockKind::Monotonic(_) => false,
            ClockKind::Manual(now) => {
                let mut now = now.lock();
                *now = now.saturating_add(by);
                true
            }
        }
    }
}

impl Default for Clock {
    fn default() -> Self {
        Clock::monotonic()
    }
}
