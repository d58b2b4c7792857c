//! Delivery scheduler and publisher boundary
//!
//! The poller runs single passes on a fixed cadence: claim due tasks, post
//! each one through the external `Publisher`, mark successes sent
//! immediately, release failures for the next pass. One failing task never
//! aborts the rest of a pass.

pub mod config;
pub mod poller;
pub mod publisher;
pub mod stats;

pub use config::DeliveryConfig;
pub use poller::DeliveryPoller;
pub use publisher::{PublishError, Publisher};
pub use stats::DeliveryStats;
