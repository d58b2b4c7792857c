//! Fan-out error types

use crate::registry::SeederId;
use crate::update::UpdateId;

/// Error type for fan-out operations
#[derive(Debug, Clone)]
pub enum FanoutError {
    /// A task already exists for this (update, seeder) pair
    DuplicateTask {
        /// The update being fanned out
        update: UpdateId,
        /// The seeder that already has a task for it
        seeder: SeederId,
    },
}

impl std::fmt::Display for FanoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FanoutError::DuplicateTask { update, seeder } => {
                write!(f, "Delivery task already exists for {} / {}", update, seeder)
            }
        }
    }
}

impl std::error::Error for FanoutError {}
