//! Update store
//!
//! Source updates authored by an authorized account. Updates are immutable
//! after creation; creating one is the single event that triggers fan-out,
//! which happens exactly once, in the service layer.

pub mod error;
pub mod store;

pub use error::UpdateError;
pub use store::{Update, UpdateId, UpdateStore, MAX_UPDATE_LEN};
