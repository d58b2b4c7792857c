//! Authorized account types

use std::time::SystemTime;

/// Unique identifier for an authorized account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccountId(pub u64);

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "account-{}", self.0)
    }
}

/// A principal who owns an original content stream
///
/// Created once per registration and never mutated afterwards, except a
/// one-time backfill of the external network identifier.
#[derive(Debug, Clone)]
pub struct AuthorizedAccount {
    /// Registry-assigned identifier
    pub id: AccountId,

    /// External network identifier (e.g. the network's user id)
    pub network_id: Option<String>,

    /// When the account was registered
    pub created_at: SystemTime,
}

impl AuthorizedAccount {
    /// Create a new account record
    pub fn new(id: AccountId, network_id: Option<String>, created_at: SystemTime) -> Self {
        Self {
            id,
            network_id,
            created_at,
        }
    }
}
