//! Delivery task types

use std::time::SystemTime;

use crate::registry::SeederId;
use crate::update::UpdateId;

/// Unique identifier for a delivery task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(pub u64);

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "task-{}", self.0)
    }
}

/// The unit of scheduled, at-most-once delivery of one update to one seeder
#[derive(Debug, Clone)]
pub struct DeliveryTask {
    /// Store-assigned identifier
    pub id: TaskId,

    /// Target seeder
    pub seeder: SeederId,

    /// Update to rebroadcast
    pub update: UpdateId,

    /// When the task becomes eligible for delivery; set once at creation,
    /// never recomputed
    pub scheduled_at: SystemTime,

    /// Whether the task has been delivered; flips `false` to `true` exactly
    /// once and never back
    pub sent: bool,

    /// Claimed by a poller pass; excluded from claiming and from the
    /// pending-work query while held
    pub(super) in_flight: bool,
}

impl DeliveryTask {
    /// The availability predicate: due and not yet sent
    pub fn is_available(&self, now: SystemTime) -> bool {
        !self.sent && self.scheduled_at <= now
    }
}

/// Specification for a task about to be inserted
///
/// The store assigns the `TaskId` on insertion.
#[derive(Debug, Clone)]
pub struct TaskSpec {
    /// Target seeder
    pub seeder: SeederId,
    /// Update to rebroadcast
    pub update: UpdateId,
    /// Randomized publish time
    pub scheduled_at: SystemTime,
}
