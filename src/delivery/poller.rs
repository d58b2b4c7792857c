//! Delivery poller implementation
//!
//! Runs single delivery passes over the task store: claim what is due,
//! publish each task through every credential of its seeder, mark successes
//! sent immediately, release failures for the next pass.

use std::sync::Arc;

use tokio::time::timeout;

use crate::clock::Clock;
use crate::error::Error;
use crate::fanout::{DeliveryTask, TaskId, TaskStore};
use crate::registry::{AccountRegistry, RegistryError};
use crate::update::{UpdateError, UpdateStore};

use super::config::DeliveryConfig;
use super::publisher::{PublishError, Publisher};
use super::stats::{DeliveryCounters, DeliveryStats};

/// Periodic worker that sends due delivery tasks
pub struct DeliveryPoller {
    registry: Arc<AccountRegistry>,
    updates: Arc<UpdateStore>,
    tasks: Arc<TaskStore>,
    publisher: Arc<dyn Publisher>,
    clock: Arc<dyn Clock>,
    config: DeliveryConfig,
    counters: DeliveryCounters,
}

impl DeliveryPoller {
    /// Create a poller with default configuration
    pub fn new(
        registry: Arc<AccountRegistry>,
        updates: Arc<UpdateStore>,
        tasks: Arc<TaskStore>,
        publisher: Arc<dyn Publisher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self::with_config(
            registry,
            updates,
            tasks,
            publisher,
            clock,
            DeliveryConfig::default(),
        )
    }

    /// Create a poller with custom configuration
    pub fn with_config(
        registry: Arc<AccountRegistry>,
        updates: Arc<UpdateStore>,
        tasks: Arc<TaskStore>,
        publisher: Arc<dyn Publisher>,
        clock: Arc<dyn Clock>,
        config: DeliveryConfig,
    ) -> Self {
        Self {
            registry,
            updates,
            tasks,
            publisher,
            clock,
            config,
            counters: DeliveryCounters::default(),
        }
    }

    /// Get the poller configuration
    pub fn config(&self) -> &DeliveryConfig {
        &self.config
    }

    /// Snapshot the delivery counters
    pub fn stats(&self) -> DeliveryStats {
        self.counters.snapshot()
    }

    /// Run one delivery pass
    ///
    /// Claims every currently due task and attempts delivery for each.
    /// A task is marked sent immediately after its publish succeeds, never
    /// batched, so an interrupted pass leaves only not-yet-attempted tasks
    /// unsent. A pass with nothing due is a no-op. Returns the number of
    /// tasks delivered in this pass.
    pub async fn run_once(&self) -> usize {
        let now = self.clock.now();
        let claimed = self.tasks.claim_available(now).await;
        let mut guard = ClaimGuard::new(
            Arc::clone(&self.tasks),
            claimed.iter().map(|t| t.id).collect(),
        );

        let mut delivered = 0;
        for task in claimed {
            match self.deliver(&task).await {
                Ok(()) => {
                    if self.tasks.mark_sent(task.id).await {
                        self.counters.record_delivered();
                        delivered += 1;
                    }
                }
                Err(e) => {
                    tracing::warn!(
                        task = %task.id,
                        seeder = %task.seeder,
                        error = %e,
                        "Delivery failed, task stays available"
                    );
                    self.counters.record_failure();
                    self.tasks.release(task.id).await;
                }
            }
            guard.settle(task.id);
        }

        self.counters.record_pass();
        if delivered > 0 {
            tracing::info!(delivered, "Delivery pass complete");
        }

        delivered
    }

    /// Publish one task through every credential of its seeder
    ///
    /// Any single credential's failure fails the whole task; a seeder with
    /// no credentials completes vacuously.
    async fn deliver(&self, task: &DeliveryTask) -> Result<(), Error> {
        let seeder = self
            .registry
            .seeder(task.seeder)
            .await
            .ok_or(RegistryError::SeederNotFound(task.seeder))?;
        let update = self
            .updates
            .get(task.update)
            .await
            .ok_or(UpdateError::UpdateNotFound(task.update))?;

        let text = self.config.render(&update.text);

        if seeder.credentials.is_empty() {
            tracing::warn!(
                task = %task.id,
                seeder = %seeder.id,
                "Seeder has no credentials, nothing to post"
            );
            return Ok(());
        }

        for credential in &seeder.credentials {
            match timeout(
                self.config.publish_timeout,
                self.publisher.post(&text, credential),
            )
            .await
            {
                Ok(Ok(())) => {}
                Ok(Err(e)) => return Err(e.into()),
                Err(_) => return Err(PublishError::TimedOut.into()),
            }
        }

        tracing::debug!(
            task = %task.id,
            seeder = %seeder.id,
            credentials = seeder.credentials.len(),
            "Task published"
        );

        Ok(())
    }

    /// Spawn a background task polling on the configured interval
    ///
    /// Returns a handle that can be used to abort the task. Claims held by
    /// an aborted pass are released, so no task stays invisible to later
    /// passes.
    pub fn spawn(self: &Arc<Self>) -> tokio::task::JoinHandle<()> {
        let poller = Arc::clone(self);
        let interval = poller.config.poll_interval;

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                poller.run_once().await;
            }
        })
    }
}

/// Claims held by an in-progress pass
///
/// If the pass is dropped mid-delivery (the spawned poller was aborted),
/// any claim not yet settled by `mark_sent` or `release` would leave its
/// task in-flight forever. Dropping the guard releases those claims from a
/// spawned task, since `Drop` cannot await the store lock directly.
struct ClaimGuard {
    tasks: Arc<TaskStore>,
    pending: Vec<TaskId>,
}

impl ClaimGuard {
    fn new(tasks: Arc<TaskStore>, pending: Vec<TaskId>) -> Self {
        Self { tasks, pending }
    }

    /// Record that the pass has resolved this claim itself
    fn settle(&mut self, id: TaskId) {
        self.pending.retain(|p| *p != id);
    }
}

impl Drop for ClaimGuard {
    fn drop(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => return,
        };

        let tasks = Arc::clone(&self.tasks);
        let pending = std::mem::take(&mut self.pending);
        tracing::warn!(count = pending.len(), "Pass dropped mid-delivery, releasing claims");

        handle.spawn(async move {
            for id in pending {
                tasks.release(id).await;
            }
        });
    }
}
