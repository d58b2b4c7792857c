//! Fan-out engine implementation
//!
//! Expands a newly created update into one delivery task per active seeder.
//! The clock and the random source are injected collaborators so tests can
//! assert exact scheduled-time bounds.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

use tokio::sync::Mutex;

use crate::clock::Clock;
use crate::registry::Seeder;
use crate::update::Update;

use super::config::FanoutConfig;
use super::error::FanoutError;
use super::store::TaskStore;
use super::task::{TaskId, TaskSpec};

/// Expands new updates into randomized-delay delivery tasks
pub struct FanoutEngine {
    store: Arc<TaskStore>,
    clock: Arc<dyn Clock>,
    rng: Mutex<StdRng>,
    config: FanoutConfig,
}

impl FanoutEngine {
    /// Create an engine with default configuration and an entropy-seeded RNG
    pub fn new(store: Arc<TaskStore>, clock: Arc<dyn Clock>) -> Self {
        Self::with_config(store, clock, FanoutConfig::default())
    }

    /// Create an engine with custom configuration
    pub fn with_config(store: Arc<TaskStore>, clock: Arc<dyn Clock>, config: FanoutConfig) -> Self {
        Self::with_rng(store, clock, config, StdRng::from_entropy())
    }

    /// Create an engine with an explicit random source
    ///
    /// Seed the RNG to make scheduled times reproducible.
    pub fn with_rng(
        store: Arc<TaskStore>,
        clock: Arc<dyn Clock>,
        config: FanoutConfig,
        rng: StdRng,
    ) -> Self {
        Self {
            store,
            clock,
            rng: Mutex::new(rng),
            config,
        }
    }

    /// Get the engine configuration
    pub fn config(&self) -> &FanoutConfig {
        &self.config
    }

    /// Materialize one delivery task per active seeder for a new update
    ///
    /// The active set is evaluated once, up front, against a single `now`;
    /// seeders expiring mid-processing are unaffected. Each task draws an
    /// independent delay in `[min_delay, max_delay]`. The batch is inserted
    /// all-or-nothing, so a rejected batch is surfaced to the caller rather
    /// than silently fanning out partially.
    pub async fn fan_out(
        &self,
        update: &Update,
        seeders: &[Seeder],
    ) -> Result<Vec<TaskId>, FanoutError> {
        let now = self.clock.now();

        let active: Vec<&Seeder> = seeders.iter().filter(|s| s.is_active(now)).collect();
        let skipped = seeders.len() - active.len();
        if skipped > 0 {
            tracing::debug!(update = %update.id, skipped, "Skipping expired seeders");
        }

        let mut specs = Vec::with_capacity(active.len());
        {
            let mut rng = self.rng.lock().await;
            for seeder in &active {
                let delay = self.random_delay(&mut rng);
                specs.push(TaskSpec {
                    seeder: seeder.id,
                    update: update.id,
                    scheduled_at: now + delay,
                });
            }
        }

        let ids = self.store.insert_batch(specs).await?;

        tracing::info!(
            update = %update.id,
            account = %update.posted_by,
            tasks = ids.len(),
            "Fan-out complete"
        );

        Ok(ids)
    }

    fn random_delay(&self, rng: &mut StdRng) -> Duration {
        let min = self.config.min_delay.as_secs();
        // A hand-built config can carry an inverted window; collapse it to
        // min rather than handing gen_range an empty range.
        let max = self.config.max_delay.as_secs().max(min);
        Duration::from_secs(rng.gen_range(min..=max))
    }
}
