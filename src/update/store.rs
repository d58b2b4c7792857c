//! Update store implementation

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::SystemTime;

use tokio::sync::RwLock;

use crate::registry::AccountId;

use super::error::UpdateError;

/// Maximum update text length, in characters
pub const MAX_UPDATE_LEN: usize = 140;

/// Unique identifier for an update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UpdateId(pub u64);

impl std::fmt::Display for UpdateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "update-{}", self.0)
    }
}

/// A single piece of original content authored by an account
///
/// Immutable after creation; there is no edit operation.
#[derive(Debug, Clone)]
pub struct Update {
    /// Store-assigned identifier
    pub id: UpdateId,

    /// The authoring account (exclusive)
    pub posted_by: AccountId,

    /// Original text, at most [`MAX_UPDATE_LEN`] characters
    pub text: String,

    /// When the update was created
    pub created_at: SystemTime,
}

/// Insert-only store of updates
pub struct UpdateStore {
    updates: RwLock<HashMap<UpdateId, Update>>,
    next_id: AtomicU64,
}

impl UpdateStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            updates: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Create a new update
    ///
    /// Validates the text length; the caller is responsible for triggering
    /// fan-out exactly once with the returned update.
    pub async fn create(
        &self,
        posted_by: AccountId,
        text: impl Into<String>,
        now: SystemTime,
    ) -> Result<Update, UpdateError> {
        let text = text.into();
        let len = text.chars().count();
        if len > MAX_UPDATE_LEN {
            return Err(UpdateError::TextTooLong(len));
        }

        let id = UpdateId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let update = Update {
            id,
            posted_by,
            text,
            created_at: now,
        };

        let mut updates = self.updates.write().await;
        updates.insert(id, update.clone());

        tracing::info!(update = %id, account = %posted_by, chars = len, "Update created");

        Ok(update)
    }

    /// Look up an update
    pub async fn get(&self, id: UpdateId) -> Option<Update> {
        self.updates.read().await.get(&id).cloned()
    }

    /// Total number of stored updates
    pub async fn len(&self) -> usize {
        self.updates.read().await.len()
    }

    /// Whether the store is empty
    pub async fn is_empty(&self) -> bool {
        self.updates.read().await.is_empty()
    }
}

impl Default for UpdateStore {
    fn default() -> Self {
        Self::new()
    }
}
