//! Delivery task store implementation
//!
//! Shared between the fan-out engine (insert-only) and the delivery poller
//! (claim + single-field update). All state transitions happen under the
//! store's write lock, which is what makes concurrent poller passes safe:
//! claiming flips a task to in-flight atomically, so a second claimer can
//! never take the same task.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::SystemTime;

use tokio::sync::RwLock;

use crate::registry::SeederId;
use crate::update::UpdateId;

use super::error::FanoutError;
use super::task::{DeliveryTask, TaskId, TaskSpec};

struct Inner {
    tasks: HashMap<TaskId, DeliveryTask>,
    /// Pair-uniqueness index: one task per (update, seeder), ever
    pairs: HashSet<(UpdateId, SeederId)>,
}

/// Store of pending and sent delivery tasks
pub struct TaskStore {
    inner: RwLock<Inner>,
    next_id: AtomicU64,
}

impl TaskStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                tasks: HashMap::new(),
                pairs: HashSet::new(),
            }),
            next_id: AtomicU64::new(1),
        }
    }

    /// Insert a batch of tasks, all-or-nothing
    ///
    /// Every (update, seeder) pair is validated before anything is inserted,
    /// so a rejected batch leaves the store untouched and partial fan-out
    /// cannot occur. Returns the assigned task ids.
    pub async fn insert_batch(&self, specs: Vec<TaskSpec>) -> Result<Vec<TaskId>, FanoutError> {
        let mut inner = self.inner.write().await;

        let mut batch_pairs = HashSet::new();
        for spec in &specs {
            let pair = (spec.update, spec.seeder);
            if inner.pairs.contains(&pair) || !batch_pairs.insert(pair) {
                return Err(FanoutError::DuplicateTask {
                    update: spec.update,
                    seeder: spec.seeder,
                });
            }
        }

        let mut ids = Vec::with_capacity(specs.len());
        for spec in specs {
            let id = TaskId(self.next_id.fetch_add(1, Ordering::Relaxed));
            inner.pairs.insert((spec.update, spec.seeder));
            inner.tasks.insert(
                id,
                DeliveryTask {
                    id,
                    seeder: spec.seeder,
                    update: spec.update,
                    scheduled_at: spec.scheduled_at,
                    sent: false,
                    in_flight: false,
                },
            );
            ids.push(id);
        }

        Ok(ids)
    }

    /// List tasks that are due, unsent and not currently claimed
    ///
    /// The sole query surface for pending work; safe for diagnostics since
    /// it takes no claims.
    pub async fn available(&self, now: SystemTime) -> Vec<DeliveryTask> {
        self.inner
            .read()
            .await
            .tasks
            .values()
            .filter(|t| t.is_available(now) && !t.in_flight)
            .cloned()
            .collect()
    }

    /// Atomically claim every due, unsent, unclaimed task
    ///
    /// Claimed tasks are invisible to other claimers until marked sent or
    /// released. No ordering is guaranteed across the returned tasks.
    pub async fn claim_available(&self, now: SystemTime) -> Vec<DeliveryTask> {
        let mut inner = self.inner.write().await;
        let mut claimed = Vec::new();

        for task in inner.tasks.values_mut() {
            if task.is_available(now) && !task.in_flight {
                task.in_flight = true;
                claimed.push(task.clone());
            }
        }

        if !claimed.is_empty() {
            tracing::debug!(count = claimed.len(), "Tasks claimed for delivery");
        }

        claimed
    }

    /// Mark a claimed task as sent
    ///
    /// Conditional: succeeds only for an in-flight, unsent task, so a task
    /// can never be marked sent twice. Returns whether the flip happened.
    pub async fn mark_sent(&self, id: TaskId) -> bool {
        let mut inner = self.inner.write().await;

        match inner.tasks.get_mut(&id) {
            Some(task) if task.in_flight && !task.sent => {
                task.sent = true;
                task.in_flight = false;
                tracing::info!(task = %id, "Task marked sent");
                true
            }
            Some(task) => {
                tracing::warn!(
                    task = %id,
                    sent = task.sent,
                    in_flight = task.in_flight,
                    "Ignoring mark_sent for task not claimed-and-unsent"
                );
                false
            }
            None => {
                tracing::warn!(task = %id, "Ignoring mark_sent for unknown task");
                false
            }
        }
    }

    /// Release a claimed task without marking it sent
    ///
    /// The task stays available and is retried on the next pass.
    pub async fn release(&self, id: TaskId) {
        let mut inner = self.inner.write().await;

        if let Some(task) = inner.tasks.get_mut(&id) {
            task.in_flight = false;
            tracing::debug!(task = %id, "Task released for retry");
        }
    }

    /// Look up a task
    pub async fn task(&self, id: TaskId) -> Option<DeliveryTask> {
        self.inner.read().await.tasks.get(&id).cloned()
    }

    /// Get all tasks created for one update
    pub async fn tasks_for_update(&self, update: UpdateId) -> Vec<DeliveryTask> {
        self.inner
            .read()
            .await
            .tasks
            .values()
            .filter(|t| t.update == update)
            .cloned()
            .collect()
    }

    /// Total number of tasks, sent or not
    pub async fn len(&self) -> usize {
        self.inner.read().await.tasks.len()
    }

    /// Whether the store is empty
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.tasks.is_empty()
    }
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}
