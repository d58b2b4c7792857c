//! Registry configuration

use std::time::Duration;

const SECS_PER_DAY: u64 = 60 * 60 * 24;

/// Registry configuration options
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// External network identifier of the designated fallback account,
    /// used by the OAuth-completion trigger when no explicit account is
    /// given. Lookup fails until this is configured.
    pub default_network_id: Option<String>,

    /// Authorization lifetime applied to new seeders when none is requested
    pub default_seeder_lifetime: Duration,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            default_network_id: None,
            default_seeder_lifetime: Duration::from_secs(30 * SECS_PER_DAY),
        }
    }
}

impl RegistryConfig {
    /// Set the default account's network identifier
    pub fn default_network_id(mut self, id: impl Into<String>) -> Self {
        self.default_network_id = Some(id.into());
        self
    }

    /// Set the default seeder lifetime
    pub fn default_seeder_lifetime(mut self, lifetime: Duration) -> Self {
        self.default_seeder_lifetime = lifetime;
        self
    }
}
