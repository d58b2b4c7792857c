//! Fan-out engine and delivery task store
//!
//! When an update is created, the engine expands it into one delivery task
//! per active seeder, each with an independently randomized future publish
//! time. The task store is the shared surface between the engine (insert)
//! and the poller (claim + mark sent).
//!
//! ```text
//!   fan_out(update, seeders)
//!         │  one TaskSpec per active seeder,
//!         │  scheduled_at = now + rand(min_delay..=max_delay)
//!         ▼
//!   [TaskStore] ── insert_batch: all-or-nothing, one task per
//!         │        (update, seeder) pair, ever
//!         │
//!         ├─ available(now)        read-only pending-work query
//!         ├─ claim_available(now)  atomic: due + unsent + unclaimed
//!         ├─ mark_sent(id)         conditional, exactly once
//!         └─ release(id)           failed publish, retry next pass
//! ```
//!
//! The claim step is what keeps two concurrent pollers from sending the same
//! task twice: a task flips to in-flight under the store's write lock, and
//! the losing claimer simply sees nothing to take.

pub mod config;
pub mod engine;
pub mod error;
pub mod store;
pub mod task;

pub use config::FanoutConfig;
pub use engine::FanoutEngine;
pub use error::FanoutError;
pub use store::TaskStore;
pub use task::{DeliveryTask, TaskId, TaskSpec};
