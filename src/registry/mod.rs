//! Account and seeder registry
//!
//! Holds authorized accounts and their delegated seeder identities. Each
//! seeder carries an expiration timestamp and zero or more OAuth credential
//! sets; only non-expired seeders participate in fan-out.
//!
//! The registry is insert-oriented: accounts are never mutated after creation
//! (except a one-time network-identifier backfill) and seeders are never
//! deleted by the core, only expired.

pub mod account;
pub mod config;
pub mod error;
pub mod seeder;
pub mod store;

pub use account::{AccountId, AuthorizedAccount};
pub use config::RegistryConfig;
pub use error::RegistryError;
pub use seeder::{Credential, DaySpan, Seeder, SeederId};
pub use store::AccountRegistry;
