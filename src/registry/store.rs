//! Account registry implementation
//!
//! The central store for authorized accounts and their seeders. Creation
//! paths are the trigger surface for the excluded web/OAuth layers: a
//! completed OAuth callback becomes `authorize_seeder`, an admin action
//! becomes `set_seeder_expiration`.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::SystemTime;

use tokio::sync::RwLock;

use super::account::{AccountId, AuthorizedAccount};
use super::config::RegistryConfig;
use super::error::RegistryError;
use super::seeder::{offset_days, Credential, DaySpan, Seeder, SeederId};

/// Central registry for accounts and seeders
///
/// Thread-safe via `RwLock`. Fan-out reads the active seeder set far more
/// often than registrations happen, so reads stay concurrent.
pub struct AccountRegistry {
    /// Accounts by id
    accounts: RwLock<HashMap<AccountId, AuthorizedAccount>>,

    /// Seeders by id
    seeders: RwLock<HashMap<SeederId, Seeder>>,

    next_account_id: AtomicU64,
    next_seeder_id: AtomicU64,

    /// Configuration
    config: RegistryConfig,
}

impl AccountRegistry {
    /// Create a new registry with default configuration
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Create a new registry with custom configuration
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            accounts: RwLock::new(HashMap::new()),
            seeders: RwLock::new(HashMap::new()),
            next_account_id: AtomicU64::new(1),
            next_seeder_id: AtomicU64::new(1),
            config,
        }
    }

    /// Get the registry configuration
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Register a new authorized account
    pub async fn create_account(
        &self,
        network_id: Option<String>,
        now: SystemTime,
    ) -> AuthorizedAccount {
        let id = AccountId(self.next_account_id.fetch_add(1, Ordering::Relaxed));
        let account = AuthorizedAccount::new(id, network_id, now);

        let mut accounts = self.accounts.write().await;
        accounts.insert(id, account.clone());

        tracing::info!(
            account = %id,
            network_id = ?account.network_id,
            "Account registered"
        );

        account
    }

    /// Backfill an account's external network identifier
    ///
    /// Only fills an unset identifier; an already-set identifier is kept.
    pub async fn backfill_network_id(
        &self,
        id: AccountId,
        network_id: impl Into<String>,
    ) -> Result<(), RegistryError> {
        let mut accounts = self.accounts.write().await;
        let account = accounts
            .get_mut(&id)
            .ok_or(RegistryError::AccountNotFound(id))?;

        if account.network_id.is_some() {
            tracing::warn!(account = %id, "Network id already set, backfill ignored");
            return Ok(());
        }

        account.network_id = Some(network_id.into());
        Ok(())
    }

    /// Look up an account
    pub async fn account(&self, id: AccountId) -> Option<AuthorizedAccount> {
        self.accounts.read().await.get(&id).cloned()
    }

    /// Return the single designated fallback account
    ///
    /// Resolution is driven by the configured network identifier, never by
    /// insertion order, so the result is deterministic even if multiple
    /// accounts exist.
    pub async fn default_account(&self) -> Result<AuthorizedAccount, RegistryError> {
        let network_id = self
            .config
            .default_network_id
            .as_deref()
            .ok_or(RegistryError::NoDefaultConfigured)?;

        let accounts = self.accounts.read().await;
        accounts
            .values()
            .find(|a| a.network_id.as_deref() == Some(network_id))
            .cloned()
            .ok_or_else(|| RegistryError::DefaultAccountMissing(network_id.to_owned()))
    }

    /// Authorize a new seeder for an account
    ///
    /// `expires_in` is a day count (integer or numeric string); when absent
    /// the configured default lifetime applies.
    pub async fn authorize_seeder(
        &self,
        account: AccountId,
        network_identity: impl Into<String>,
        credentials: Vec<Credential>,
        expires_in: Option<DaySpan>,
        now: SystemTime,
    ) -> Result<Seeder, RegistryError> {
        if !self.accounts.read().await.contains_key(&account) {
            return Err(RegistryError::AccountNotFound(account));
        }

        let expires_on = match expires_in {
            Some(span) => offset_days(now, span.resolve()?)?,
            None => now + self.config.default_seeder_lifetime,
        };

        let id = SeederId(self.next_seeder_id.fetch_add(1, Ordering::Relaxed));
        let seeder = Seeder {
            id,
            network_identity: network_identity.into(),
            authorized_for: account,
            expires_on,
            credentials,
        };

        let mut seeders = self.seeders.write().await;
        seeders.insert(id, seeder.clone());

        tracing::info!(
            seeder = %id,
            account = %account,
            identity = %seeder.network_identity,
            "Seeder authorized"
        );

        Ok(seeder)
    }

    /// Attach an additional credential set to a seeder
    pub async fn attach_credential(
        &self,
        id: SeederId,
        credential: Credential,
    ) -> Result<(), RegistryError> {
        let mut seeders = self.seeders.write().await;
        let seeder = seeders
            .get_mut(&id)
            .ok_or(RegistryError::SeederNotFound(id))?;

        seeder.credentials.push(credential);

        tracing::debug!(
            seeder = %id,
            credentials = seeder.credentials.len(),
            "Credential attached"
        );

        Ok(())
    }

    /// Look up a seeder
    pub async fn seeder(&self, id: SeederId) -> Option<Seeder> {
        self.seeders.read().await.get(&id).cloned()
    }

    /// Set a seeder's expiration to `days` from `now`
    ///
    /// Returns the new expiration timestamp.
    pub async fn set_seeder_expiration(
        &self,
        id: SeederId,
        days: DaySpan,
        now: SystemTime,
    ) -> Result<SystemTime, RegistryError> {
        let mut seeders = self.seeders.write().await;
        let seeder = seeders
            .get_mut(&id)
            .ok_or(RegistryError::SeederNotFound(id))?;

        let expires_on = seeder.set_expires_in_days(days, now)?;

        tracing::info!(seeder = %id, expires_on = ?expires_on, "Seeder expiration updated");

        Ok(expires_on)
    }

    /// Get all seeders belonging to an account, expired or not
    pub async fn seeders_for_account(&self, account: AccountId) -> Vec<Seeder> {
        self.seeders
            .read()
            .await
            .values()
            .filter(|s| s.authorized_for == account)
            .cloned()
            .collect()
    }

    /// Get the non-expired seeders belonging to an account
    pub async fn active_seeders(&self, account: AccountId, now: SystemTime) -> Vec<Seeder> {
        self.seeders
            .read()
            .await
            .values()
            .filter(|s| s.authorized_for == account && s.is_active(now))
            .cloned()
            .collect()
    }

    /// Total number of registered seeders
    pub async fn seeder_count(&self) -> usize {
        self.seeders.read().await.len()
    }
}

impl Default for AccountRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    const SECS_PER_DAY: u64 = 60 * 60 * 24;

    fn fixed_now() -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000)
    }

    #[tokio::test]
    async fn test_seeder_expires_in_30_days_by_default() {
        let registry = AccountRegistry::new();
        let now = fixed_now();
        let account = registry.create_account(None, now).await;

        let seeder = registry
            .authorize_seeder(account.id, "seeder_one", vec![], None, now)
            .await
            .unwrap();

        assert_eq!(seeder.expires_on, now + Duration::from_secs(30 * SECS_PER_DAY));
    }

    #[tokio::test]
    async fn test_requested_duration_overrides_default() {
        let registry = AccountRegistry::new();
        let now = fixed_now();
        let account = registry.create_account(None, now).await;

        let seeder = registry
            .authorize_seeder(account.id, "seeder_one", vec![], Some(7.into()), now)
            .await
            .unwrap();

        assert_eq!(seeder.expires_on, now + Duration::from_secs(7 * SECS_PER_DAY));
    }

    #[tokio::test]
    async fn test_set_expiration_accepts_numeric_string() {
        let registry = AccountRegistry::new();
        let now = fixed_now();
        let account = registry.create_account(None, now).await;
        let seeder = registry
            .authorize_seeder(account.id, "seeder_one", vec![], None, now)
            .await
            .unwrap();

        let expires_on = registry
            .set_seeder_expiration(seeder.id, "7".into(), now)
            .await
            .unwrap();

        assert_eq!(expires_on, now + Duration::from_secs(7 * SECS_PER_DAY));
        let stored = registry.seeder(seeder.id).await.unwrap();
        assert_eq!(stored.expires_on, expires_on);
    }

    #[tokio::test]
    async fn test_set_expiration_rejects_garbage() {
        let registry = AccountRegistry::new();
        let now = fixed_now();
        let account = registry.create_account(None, now).await;
        let seeder = registry
            .authorize_seeder(account.id, "seeder_one", vec![], None, now)
            .await
            .unwrap();

        let result = registry
            .set_seeder_expiration(seeder.id, "soon".into(), now)
            .await;

        assert!(matches!(result, Err(RegistryError::InvalidDuration(_))));
    }

    #[tokio::test]
    async fn test_set_expiration_rejects_overflowing_day_count() {
        let registry = AccountRegistry::new();
        let now = fixed_now();
        let account = registry.create_account(None, now).await;
        let seeder = registry
            .authorize_seeder(account.id, "seeder_one", vec![], None, now)
            .await
            .unwrap();

        let result = registry
            .set_seeder_expiration(seeder.id, "99999999999999999".into(), now)
            .await;

        assert!(matches!(result, Err(RegistryError::InvalidDuration(_))));
        let stored = registry.seeder(seeder.id).await.unwrap();
        assert_eq!(stored.expires_on, seeder.expires_on);
    }

    #[tokio::test]
    async fn test_active_seeders_excludes_expired() {
        let registry = AccountRegistry::new();
        let now = fixed_now();
        let account = registry.create_account(None, now).await;

        let fresh = registry
            .authorize_seeder(account.id, "fresh", vec![], None, now)
            .await
            .unwrap();
        let stale = registry
            .authorize_seeder(account.id, "stale", vec![], None, now)
            .await
            .unwrap();
        registry
            .set_seeder_expiration(stale.id, (-1).into(), now)
            .await
            .unwrap();

        let active = registry.active_seeders(account.id, now).await;
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, fresh.id);

        assert_eq!(registry.seeders_for_account(account.id).await.len(), 2);
    }

    #[tokio::test]
    async fn test_default_account_lookup() {
        let config = RegistryConfig::default().default_network_id("10001");
        let registry = AccountRegistry::with_config(config);
        let now = fixed_now();

        // Decoy registered first; lookup must not depend on order.
        registry.create_account(Some("99999".into()), now).await;
        let wanted = registry.create_account(Some("10001".into()), now).await;

        let found = registry.default_account().await.unwrap();
        assert_eq!(found.id, wanted.id);
    }

    #[tokio::test]
    async fn test_default_account_unconfigured() {
        let registry = AccountRegistry::new();
        let result = registry.default_account().await;
        assert!(matches!(result, Err(RegistryError::NoDefaultConfigured)));
    }

    #[tokio::test]
    async fn test_default_account_missing() {
        let config = RegistryConfig::default().default_network_id("10001");
        let registry = AccountRegistry::with_config(config);
        registry.create_account(Some("99999".into()), fixed_now()).await;

        let result = registry.default_account().await;
        assert!(matches!(result, Err(RegistryError::DefaultAccountMissing(_))));
    }

    #[tokio::test]
    async fn test_authorize_seeder_requires_account() {
        let registry = AccountRegistry::new();
        let result = registry
            .authorize_seeder(AccountId(42), "ghost", vec![], None, fixed_now())
            .await;
        assert!(matches!(result, Err(RegistryError::AccountNotFound(_))));
    }

    #[tokio::test]
    async fn test_backfill_keeps_existing_network_id() {
        let registry = AccountRegistry::new();
        let now = fixed_now();
        let account = registry.create_account(Some("10001".into()), now).await;

        registry
            .backfill_network_id(account.id, "20002")
            .await
            .unwrap();

        let stored = registry.account(account.id).await.unwrap();
        assert_eq!(stored.network_id.as_deref(), Some("10001"));
    }

    #[tokio::test]
    async fn test_attach_credential() {
        let registry = AccountRegistry::new();
        let now = fixed_now();
        let account = registry.create_account(None, now).await;
        let seeder = registry
            .authorize_seeder(
                account.id,
                "seeder_one",
                vec![Credential::new("tok-1", "sec-1")],
                None,
                now,
            )
            .await
            .unwrap();

        registry
            .attach_credential(seeder.id, Credential::new("tok-2", "sec-2"))
            .await
            .unwrap();

        let stored = registry.seeder(seeder.id).await.unwrap();
        assert_eq!(stored.credentials.len(), 2);
    }
}
