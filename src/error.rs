//! Crate-level error type
//!
//! Each area defines its own error enum; this module wraps them into a single
//! `Error` so callers can use one `Result` alias across the crate.

use crate::delivery::PublishError;
use crate::fanout::FanoutError;
use crate::registry::RegistryError;
use crate::update::UpdateError;

/// Convenience result type used throughout the crate
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Top-level error type
#[derive(Debug, Clone)]
pub enum Error {
    /// Account/seeder registry error
    Registry(RegistryError),
    /// Update store error
    Update(UpdateError),
    /// Fan-out engine error
    Fanout(FanoutError),
    /// Publisher error
    Publish(PublishError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Registry(e) => write!(f, "Registry error: {}", e),
            Error::Update(e) => write!(f, "Update error: {}", e),
            Error::Fanout(e) => write!(f, "Fan-out error: {}", e),
            Error::Publish(e) => write!(f, "Publish error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Registry(e) => Some(e),
            Error::Update(e) => Some(e),
            Error::Fanout(e) => Some(e),
            Error::Publish(e) => Some(e),
        }
    }
}

impl From<RegistryError> for Error {
    fn from(e: RegistryError) -> Self {
        Error::Registry(e)
    }
}

impl From<UpdateError> for Error {
    fn from(e: UpdateError) -> Self {
        Error::Update(e)
    }
}

impl From<FanoutError> for Error {
    fn from(e: FanoutError) -> Self {
        Error::Fanout(e)
    }
}

impl From<PublishError> for Error {
    fn from(e: PublishError) -> Self {
        Error::Publish(e)
    }
}
