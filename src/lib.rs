//! Seeder: delayed fan-out rebroadcast engine
//!
//! A primary account holder collects "seeder" accounts (delegated identities
//! authorized via OAuth) and automatically rebroadcasts the holder's posted
//! updates through each seeder account, staggered by a small random delay,
//! once per seeder, exactly once.
//!
//! # Architecture
//!
//! ```text
//!   post_update(account, text)
//!         │
//!         ▼
//!   [UpdateStore] ──► [FanoutEngine] ── one DeliveryTask per active seeder,
//!                           │            scheduled_at = now + rand(60s..30min)
//!                           ▼
//!                      [TaskStore]
//!                           │  claim due + unsent (atomic)
//!                           ▼
//!                   [DeliveryPoller] ──► Publisher::post(text, credential)
//!                           │                  │ success
//!                           └── mark sent ◄────┘
//! ```
//!
//! The poller runs on a fixed cadence. Tasks whose publish fails stay unsent
//! and are retried on the next pass; tasks marked sent are never sent again.
//!
//! # Example
//! ```no_run
//! use std::sync::Arc;
//! use seeder::{Credential, PublishError, Publisher, SeederService};
//!
//! struct NetworkPublisher;
//!
//! #[async_trait::async_trait]
//! impl Publisher for NetworkPublisher {
//!     async fn post(&self, text: &str, _credential: &Credential) -> Result<(), PublishError> {
//!         println!("posting: {text}");
//!         Ok(())
//!     }
//! }
//!
//! # async fn example() -> seeder::Result<()> {
//! let service = SeederService::new(Arc::new(NetworkPublisher));
//!
//! let account = service.register_account(Some("10001".into())).await;
//! service
//!     .registry()
//!     .authorize_seeder(account.id, "seeder_one", vec![], None, std::time::SystemTime::now())
//!     .await?;
//!
//! service.post_update(account.id, "Hello from Seeder!").await?;
//! let _poller = service.spawn_poller();
//! # Ok(())
//! # }
//! ```

pub mod clock;
pub mod delivery;
pub mod error;
pub mod fanout;
pub mod registry;
pub mod service;
pub mod update;

pub use clock::{Clock, ManualClock, SystemClock};
pub use delivery::{DeliveryConfig, DeliveryPoller, DeliveryStats, PublishError, Publisher};
pub use error::{Error, Result};
pub use fanout::{DeliveryTask, FanoutConfig, FanoutEngine, FanoutError, TaskId, TaskStore};
pub use registry::{
    AccountId, AccountRegistry, AuthorizedAccount, Credential, DaySpan, RegistryConfig,
    RegistryError, Seeder, SeederId,
};
pub use service::{SeederService, ServiceConfig};
pub use update::{Update, UpdateError, UpdateId, UpdateStore, MAX_UPDATE_LEN};
