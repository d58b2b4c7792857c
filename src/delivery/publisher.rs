//! Publisher boundary
//!
//! The actual network post (OAuth signing, HTTP, the social-network API) is
//! an external collaborator behind this trait. The core only decides *when*
//! to post and *that* it posted.

use async_trait::async_trait;

use crate::registry::Credential;

/// External collaborator that performs a network post as a seeder
///
/// The poller invokes `post` once per credential set of the target seeder.
/// Implementations should be cheap to share behind an `Arc`.
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Post `text` to the network using one credential set
    async fn post(&self, text: &str, credential: &Credential) -> Result<(), PublishError>;
}

/// Error type for publish attempts
///
/// All variants are recoverable from the poller's point of view: the task
/// stays unsent and is retried on the next pass.
#[derive(Debug, Clone)]
pub enum PublishError {
    /// Network-level failure reaching the external service
    Network(String),
    /// The credential was rejected
    Auth(String),
    /// The service refused the post itself
    Rejected(String),
    /// The publish call exceeded the configured timeout
    TimedOut,
}

impl std::fmt::Display for PublishError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PublishError::Network(msg) => write!(f, "Network failure: {}", msg),
            PublishError::Auth(msg) => write!(f, "Credential rejected: {}", msg),
            PublishError::Rejected(msg) => write!(f, "Post rejected: {}", msg),
            PublishError::TimedOut => write!(f, "Publish call timed out"),
        }
    }
}

impl std::error::Error for PublishError {}
