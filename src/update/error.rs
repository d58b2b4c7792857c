//! Update store error types

use super::store::{UpdateId, MAX_UPDATE_LEN};

/// Error type for update operations
#[derive(Debug, Clone)]
pub enum UpdateError {
    /// Update text exceeds the maximum length
    TextTooLong(usize),
    /// Update not found
    UpdateNotFound(UpdateId),
}

impl std::fmt::Display for UpdateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UpdateError::TextTooLong(len) => {
                write!(f, "Update text too long: {} chars (max {})", len, MAX_UPDATE_LEN)
            }
            UpdateError::UpdateNotFound(id) => write!(f, "Update not found: {}", id),
        }
    }
}

impl std::error::Error for UpdateError {}
