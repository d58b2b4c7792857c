//! Seeder identity and expiration types

use std::time::{Duration, SystemTime};

use super::account::AccountId;
use super::error::RegistryError;

const SECS_PER_DAY: u64 = 60 * 60 * 24;

/// Unique identifier for a seeder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SeederId(pub u64);

impl std::fmt::Display for SeederId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "seeder-{}", self.0)
    }
}

/// One OAuth token/secret pair attached to a seeder
///
/// A seeder may hold more than one credential set (multiple linked tokens);
/// delivery invokes the publisher once per credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    /// OAuth access token
    pub token: String,
    /// OAuth token secret
    pub secret: String,
}

impl Credential {
    /// Create a new credential pair
    pub fn new(token: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            secret: secret.into(),
        }
    }
}

/// A delegated destination identity authorized to receive rebroadcasts
/// on behalf of one account
#[derive(Debug, Clone)]
pub struct Seeder {
    /// Registry-assigned identifier
    pub id: SeederId,

    /// External network identity/username of the seeder
    pub network_identity: String,

    /// The account this seeder rebroadcasts for (exclusive)
    pub authorized_for: AccountId,

    /// When the authorization expires; always set (defaults to 30 days
    /// from creation)
    pub expires_on: SystemTime,

    /// OAuth credential sets for posting as this seeder
    pub credentials: Vec<Credential>,
}

impl Seeder {
    /// Check whether the seeder's authorization is still active
    pub fn is_active(&self, now: SystemTime) -> bool {
        self.expires_on > now
    }

    /// Set the expiration to `days` from `now`
    ///
    /// Accepts anything convertible to [`DaySpan`], so both integers and
    /// numeric strings work. Negative day counts move the expiration into
    /// the past, expiring the seeder immediately.
    pub fn set_expires_in_days(
        &mut self,
        days: impl Into<DaySpan>,
        now: SystemTime,
    ) -> Result<SystemTime, RegistryError> {
        self.expires_on = offset_days(now, days.into().resolve()?)?;
        Ok(self.expires_on)
    }
}

/// A day count supplied either as an integer or a numeric string
///
/// The admin interface receives expiration durations from untyped sources
/// (form fields, command arguments), so `"7"` must behave exactly like `7`.
/// Genuinely non-numeric input resolves to an `InvalidDuration` error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DaySpan {
    /// Literal day count
    Days(i64),
    /// Day count that still needs parsing
    Text(String),
}

impl DaySpan {
    /// Resolve to a concrete day count
    pub fn resolve(&self) -> Result<i64, RegistryError> {
        match self {
            DaySpan::Days(n) => Ok(*n),
            DaySpan::Text(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|_| RegistryError::InvalidDuration(s.clone())),
        }
    }
}

impl From<i64> for DaySpan {
    fn from(n: i64) -> Self {
        DaySpan::Days(n)
    }
}

impl From<i32> for DaySpan {
    fn from(n: i32) -> Self {
        DaySpan::Days(n.into())
    }
}

impl From<&str> for DaySpan {
    fn from(s: &str) -> Self {
        DaySpan::Text(s.to_owned())
    }
}

impl From<String> for DaySpan {
    fn from(s: String) -> Self {
        DaySpan::Text(s)
    }
}

/// Compute `now` offset by a signed number of days
///
/// Negative offsets saturate at the epoch. A day count too large to
/// represent as a timestamp is rejected as an invalid duration rather
/// than panicking.
pub(crate) fn offset_days(now: SystemTime, days: i64) -> Result<SystemTime, RegistryError> {
    let magnitude = Duration::from_secs(days.unsigned_abs().saturating_mul(SECS_PER_DAY));
    if days >= 0 {
        now.checked_add(magnitude)
            .ok_or_else(|| RegistryError::InvalidDuration(days.to_string()))
    } else {
        Ok(now.checked_sub(magnitude).unwrap_or(SystemTime::UNIX_EPOCH))
    }
}
