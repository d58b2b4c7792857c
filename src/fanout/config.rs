//! Fan-out configuration

use std::time::Duration;

/// Fan-out engine configuration options
#[derive(Debug, Clone)]
pub struct FanoutConfig {
    /// Minimum publish delay applied to a new task
    pub min_delay: Duration,

    /// Maximum publish delay applied to a new task (inclusive); a value
    /// below `min_delay` is treated as equal to it
    pub max_delay: Duration,
}

impl Default for FanoutConfig {
    fn default() -> Self {
        Self {
            min_delay: Duration::from_secs(60),
            max_delay: Duration::from_secs(30 * 60),
        }
    }
}

impl FanoutConfig {
    /// Set the delay window
    pub fn delay_window(mut self, min: Duration, max: Duration) -> Self {
        self.min_delay = min;
        self.max_delay = max.max(min);
        self
    }
}
