//! Service façade
//!
//! `SeederService` wires the registry, update store, fan-out engine and
//! delivery poller behind the external trigger interfaces: post an update,
//! complete a seeder authorization, adjust an expiration, run a poll pass.
//! The excluded web and OAuth layers call into these methods and nothing
//! else.

use std::sync::Arc;
use std::time::SystemTime;

use crate::clock::{Clock, SystemClock};
use crate::delivery::{DeliveryConfig, DeliveryPoller, DeliveryStats, Publisher};
use crate::error::Result;
use crate::fanout::{DeliveryTask, FanoutConfig, FanoutEngine, TaskStore};
use crate::registry::{
    AccountId, AccountRegistry, AuthorizedAccount, Credential, DaySpan, RegistryConfig,
    RegistryError, Seeder, SeederId,
};
use crate::update::{Update, UpdateStore};

/// Combined configuration for a service instance
#[derive(Debug, Clone, Default)]
pub struct ServiceConfig {
    /// Registry configuration (default account, seeder lifetime)
    pub registry: RegistryConfig,
    /// Fan-out configuration (delay window)
    pub fanout: FanoutConfig,
    /// Delivery configuration (poll cadence, publish timeout, template)
    pub delivery: DeliveryConfig,
}

/// The assembled seeder service
pub struct SeederService {
    registry: Arc<AccountRegistry>,
    updates: Arc<UpdateStore>,
    tasks: Arc<TaskStore>,
    engine: FanoutEngine,
    poller: Arc<DeliveryPoller>,
    clock: Arc<dyn Clock>,
}

impl SeederService {
    /// Create a service with default configuration and the system clock
    pub fn new(publisher: Arc<dyn Publisher>) -> Self {
        Self::with_config(ServiceConfig::default(), publisher)
    }

    /// Create a service with custom configuration
    pub fn with_config(config: ServiceConfig, publisher: Arc<dyn Publisher>) -> Self {
        Self::with_clock(config, publisher, Arc::new(SystemClock))
    }

    /// Create a service with an explicit clock
    ///
    /// Pass a [`crate::clock::ManualClock`] to drive time from tests.
    pub fn with_clock(
        config: ServiceConfig,
        publisher: Arc<dyn Publisher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let registry = Arc::new(AccountRegistry::with_config(config.registry));
        let updates = Arc::new(UpdateStore::new());
        let tasks = Arc::new(TaskStore::new());

        let engine = FanoutEngine::with_config(Arc::clone(&tasks), Arc::clone(&clock), config.fanout);
        let poller = Arc::new(DeliveryPoller::with_config(
            Arc::clone(&registry),
            Arc::clone(&updates),
            Arc::clone(&tasks),
            publisher,
            Arc::clone(&clock),
            config.delivery,
        ));

        Self {
            registry,
            updates,
            tasks,
            engine,
            poller,
            clock,
        }
    }

    /// Get the account and seeder registry
    pub fn registry(&self) -> &Arc<AccountRegistry> {
        &self.registry
    }

    /// Get the update store
    pub fn updates(&self) -> &Arc<UpdateStore> {
        &self.updates
    }

    /// Get the delivery task store
    pub fn tasks(&self) -> &Arc<TaskStore> {
        &self.tasks
    }

    /// Register a new authorized account
    pub async fn register_account(&self, network_id: Option<String>) -> AuthorizedAccount {
        self.registry
            .create_account(network_id, self.clock.now())
            .await
    }

    /// Create a new update and fan it out
    ///
    /// This is the only path through which an update enters the system, so
    /// fan-out runs exactly once per update, at creation time. A fan-out
    /// rejection is surfaced to the caller rather than silently dropping
    /// seeders.
    pub async fn post_update(&self, account: AccountId, text: impl Into<String>) -> Result<Update> {
        let now = self.clock.now();

        if self.registry.account(account).await.is_none() {
            return Err(RegistryError::AccountNotFound(account).into());
        }

        let update = self.updates.create(account, text, now).await?;
        let seeders = self.registry.seeders_for_account(account).await;
        self.engine.fan_out(&update, &seeders).await?;

        Ok(update)
    }

    /// Complete a seeder authorization against the default account
    ///
    /// The OAuth-completion trigger: the callback layer hands over the
    /// seeder's network identity, its freshly issued credentials and an
    /// optional requested duration in days. The target account comes from
    /// the configured default; an unconfigured or missing default is a
    /// configuration error surfaced to the caller.
    pub async fn authorize_seeder(
        &self,
        network_identity: impl Into<String>,
        credentials: Vec<Credential>,
        expires_in: Option<DaySpan>,
    ) -> Result<Seeder> {
        let account = self.registry.default_account().await?;
        let seeder = self
            .registry
            .authorize_seeder(
                account.id,
                network_identity,
                credentials,
                expires_in,
                self.clock.now(),
            )
            .await?;
        Ok(seeder)
    }

    /// Set a seeder's expiration to `days` from now
    ///
    /// Admin interface; `days` may be an integer or a numeric string.
    pub async fn set_seeder_expiration(
        &self,
        seeder: SeederId,
        days: impl Into<DaySpan>,
    ) -> Result<SystemTime> {
        let expires_on = self
            .registry
            .set_seeder_expiration(seeder, days.into(), self.clock.now())
            .await?;
        Ok(expires_on)
    }

    /// Run one delivery pass, returning the number of tasks delivered
    pub async fn run_poll_pass(&self) -> usize {
        self.poller.run_once().await
    }

    /// Spawn the background poller on its configured interval
    pub fn spawn_poller(&self) -> tokio::task::JoinHandle<()> {
        self.poller.spawn()
    }

    /// List tasks currently eligible for delivery
    pub async fn available_tasks(&self) -> Vec<DeliveryTask> {
        self.tasks.available(self.clock.now()).await
    }

    /// Snapshot the delivery counters
    pub fn delivery_stats(&self) -> DeliveryStats {
        self.poller.stats()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;
    use tokio::sync::Mutex;

    use super::*;
    use crate::clock::ManualClock;
    use crate::delivery::PublishError;
    use crate::error::Error;
    use crate::fanout::FanoutError;

    struct RecordingPublisher {
        posts: Mutex<Vec<String>>,
    }

    impl RecordingPublisher {
        fn new() -> Self {
            Self {
                posts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Publisher for RecordingPublisher {
        async fn post(&self, text: &str, _credential: &Credential) -> Result<(), PublishError> {
            self.posts.lock().await.push(text.to_owned());
            Ok(())
        }
    }

    fn fixed_now() -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000)
    }

    fn service() -> (SeederService, Arc<RecordingPublisher>, Arc<ManualClock>) {
        let publisher = Arc::new(RecordingPublisher::new());
        let clock = Arc::new(ManualClock::new(fixed_now()));
        let config = ServiceConfig {
            registry: RegistryConfig::default().default_network_id("10001"),
            ..Default::default()
        };
        let service = SeederService::with_clock(config, publisher.clone(), clock.clone());
        (service, publisher, clock)
    }

    #[tokio::test]
    async fn test_post_update_fans_out_to_active_seeders_only() {
        let (service, _publisher, clock) = service();
        let now = clock.now();

        let account = service.register_account(Some("10001".into())).await;
        for i in 1..=3 {
            service
                .registry()
                .authorize_seeder(
                    account.id,
                    format!("active_{i}"),
                    vec![Credential::new("tok", "sec")],
                    None,
                    now,
                )
                .await
                .unwrap();
        }
        let expired = service
            .registry()
            .authorize_seeder(account.id, "expired", vec![], None, now)
            .await
            .unwrap();
        service
            .set_seeder_expiration(expired.id, -1)
            .await
            .unwrap();

        let update = service
            .post_update(account.id, "Hello from Seeder!")
            .await
            .unwrap();

        let tasks = service.tasks().tasks_for_update(update.id).await;
        assert_eq!(tasks.len(), 3);
        assert!(tasks.iter().all(|t| t.seeder != expired.id));
        // Nothing is due yet: all delays are at least 60s out
        assert!(service.available_tasks().await.is_empty());
    }

    #[tokio::test]
    async fn test_full_delivery_cycle() {
        let (service, publisher, clock) = service();

        let account = service.register_account(Some("10001".into())).await;
        service
            .registry()
            .authorize_seeder(
                account.id,
                "seeder_one",
                vec![Credential::new("tok", "sec")],
                None,
                clock.now(),
            )
            .await
            .unwrap();

        service
            .post_update(account.id, "Hello from Seeder!")
            .await
            .unwrap();

        // Not due yet
        assert_eq!(service.run_poll_pass().await, 0);

        // Past the maximum delay everything is due
        clock.advance(Duration::from_secs(1801));
        assert_eq!(service.available_tasks().await.len(), 1);
        assert_eq!(service.run_poll_pass().await, 1);
        assert_eq!(*publisher.posts.lock().await, vec!["Hello from Seeder!"]);

        // Exactly once
        assert_eq!(service.run_poll_pass().await, 0);
        assert_eq!(publisher.posts.lock().await.len(), 1);
        assert_eq!(service.delivery_stats().delivered, 1);
    }

    #[tokio::test]
    async fn test_authorize_seeder_uses_default_account() {
        let (service, _publisher, _clock) = service();
        let account = service.register_account(Some("10001".into())).await;

        let seeder = service
            .authorize_seeder("seeder_one", vec![Credential::new("t", "s")], Some("7".into()))
            .await
            .unwrap();

        assert_eq!(seeder.authorized_for, account.id);
        assert_eq!(
            seeder.expires_on,
            _clock.now() + Duration::from_secs(7 * 24 * 60 * 60)
        );
    }

    #[tokio::test]
    async fn test_authorize_seeder_without_default_account_fails() {
        let publisher = Arc::new(RecordingPublisher::new());
        let service = SeederService::new(publisher);

        let result = service.authorize_seeder("seeder_one", vec![], None).await;
        assert!(matches!(
            result,
            Err(Error::Registry(RegistryError::NoDefaultConfigured))
        ));
    }

    #[tokio::test]
    async fn test_post_update_requires_known_account() {
        let (service, _publisher, _clock) = service();

        let result = service.post_update(AccountId(42), "hello").await;
        assert!(matches!(
            result,
            Err(Error::Registry(RegistryError::AccountNotFound(_)))
        ));
    }

    #[tokio::test]
    async fn test_each_update_fans_out_independently() {
        let (service, publisher, clock) = service();

        let account = service.register_account(Some("10001".into())).await;
        service
            .registry()
            .authorize_seeder(
                account.id,
                "seeder_one",
                vec![Credential::new("tok", "sec")],
                None,
                clock.now(),
            )
            .await
            .unwrap();

        service.post_update(account.id, "first").await.unwrap();
        service.post_update(account.id, "second").await.unwrap();
        assert_eq!(service.tasks().len().await, 2);

        clock.advance(Duration::from_secs(1801));
        assert_eq!(service.run_poll_pass().await, 2);

        let mut posts = publisher.posts.lock().await.clone();
        posts.sort();
        assert_eq!(posts, ["first", "second"]);
    }

    #[tokio::test]
    async fn test_fanout_rejection_surfaces_to_caller() {
        let (service, _publisher, clock) = service();
        let now = clock.now();

        let account = service.register_account(Some("10001".into())).await;
        let seeder = service
            .registry()
            .authorize_seeder(account.id, "seeder_one", vec![], None, now)
            .await
            .unwrap();

        let update = service.post_update(account.id, "hello").await.unwrap();

        // Force a duplicate (update, seeder) pair through the engine
        let result = service
            .engine
            .fan_out(&update, &[service.registry().seeder(seeder.id).await.unwrap()])
            .await;

        assert!(matches!(result, Err(FanoutError::DuplicateTask { .. })));
    }
}
