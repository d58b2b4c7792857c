//! Registry error types

use super::account::AccountId;
use super::seeder::SeederId;

/// Error type for registry operations
#[derive(Debug, Clone)]
pub enum RegistryError {
    /// Account not found
    AccountNotFound(AccountId),
    /// Seeder not found
    SeederNotFound(SeederId),
    /// No default-account network identifier configured
    NoDefaultConfigured,
    /// A default network identifier is configured but no account carries it
    DefaultAccountMissing(String),
    /// Expiration duration could not be parsed as a day count
    InvalidDuration(String),
}

impl std::fmt::Display for RegistryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryError::AccountNotFound(id) => write!(f, "Account not found: {}", id),
            RegistryError::SeederNotFound(id) => write!(f, "Seeder not found: {}", id),
            RegistryError::NoDefaultConfigured => {
                write!(f, "No default account network identifier configured")
            }
            RegistryError::DefaultAccountMissing(network_id) => {
                write!(f, "No account registered for default network id: {}", network_id)
            }
            RegistryError::InvalidDuration(input) => {
                write!(f, "Invalid expiration duration: {:?}", input)
            }
        }
    }
}

impl std::error::Error for RegistryError {}
