//! Delivery statistics

use std::sync::atomic::{AtomicU64, Ordering};

/// Snapshot of delivery counters
#[derive(Debug, Clone, Default)]
pub struct DeliveryStats {
    /// Number of completed poll passes
    pub passes: u64,
    /// Tasks successfully delivered and marked sent
    pub delivered: u64,
    /// Failed publish attempts (each leaves its task available for retry)
    pub publish_failures: u64,
}

/// Atomic counters backing [`DeliveryStats`]
#[derive(Debug, Default)]
pub(crate) struct DeliveryCounters {
    passes: AtomicU64,
    delivered: AtomicU64,
    publish_failures: AtomicU64,
}

impl DeliveryCounters {
    pub(crate) fn record_pass(&self) {
        self.passes.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_delivered(&self) {
        self.delivered.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_failure(&self) {
        self.publish_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> DeliveryStats {
        DeliveryStats {
            passes: self.passes.load(Ordering::Relaxed),
            delivered: self.delivered.load(Ordering::Relaxed),
            publish_failures: self.publish_failures.load(Ordering::Relaxed),
        }
    }
}
