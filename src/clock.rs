//! Clock abstraction
//!
//! Scheduling decisions (random publish delays, seeder expiry, availability
//! checks) all read the current time through the `Clock` trait instead of
//! calling `SystemTime::now()` directly, so tests can pin time exactly.

use std::sync::Mutex;
use std::time::{Duration, SystemTime};

/// Source of wall-clock time
pub trait Clock: Send + Sync {
    /// Get the current time
    fn now(&self) -> SystemTime;
}

/// Real system clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

/// Manually driven clock for tests and simulations
///
/// Time only moves when `advance()` or `set()` is called.
pub struct ManualClock {
    now: Mutex<SystemTime>,
}

impl ManualClock {
    /// Create a clock pinned at the given instant
    pub fn new(start: SystemTime) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    /// Create a clock pinned at the current system time
    pub fn starting_now() -> Self {
        Self::new(SystemTime::now())
    }

    /// Move the clock forward
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now += by;
    }

    /// Pin the clock to a specific instant
    pub fn set(&self, to: SystemTime) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now = to;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> SystemTime {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}
