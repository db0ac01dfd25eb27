//! Mutation Scheduler
//!
//! Applies bulk actions against the persistence collaborator without
//! exceeding its rate limits: the target set is split into fixed-size
//! batches, a batch's calls run concurrently, and the scheduler sleeps
//! between batches. At most one batch is in flight at a time, which bounds
//! outstanding remote calls to the batch size. One failed call never blocks
//! or rolls back its siblings.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinSet;

use crate::persistence::BoardPersistence;

pub const DEFAULT_BATCH_SIZE: usize = 5;
pub const DEFAULT_BATCH_DELAY: Duration = Duration::from_millis(400);

/// Batch size and inter-batch delay for bulk operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerConfig {
    pub batch_size: usize,
    pub batch_delay: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            batch_delay: DEFAULT_BATCH_DELAY,
        }
    }
}

/// Result of a bulk operation; failures are per-target, not global
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BulkOutcome {
    /// Ids deleted remotely
    pub deleted: Vec<String>,
    /// Ids whose deletion failed; they stay in local state
    pub failed: Vec<String>,
}

/// Rate-limited runner for bulk mutations
#[derive(Debug, Clone)]
pub struct MutationScheduler {
    config: SchedulerConfig,
}

impl MutationScheduler {
    pub fn new(config: SchedulerConfig) -> Self {
        let config = SchedulerConfig {
            batch_size: config.batch_size.max(1),
            ..config
        };
        Self { config }
    }

    pub fn config(&self) -> SchedulerConfig {
        self.config
    }

    /// Delete the given items in rate-limited batches.
    ///
    /// Within a batch all deletions run concurrently; failures are logged
    /// and reported in the outcome. The delay runs between batches, not
    /// after the last one.
    pub async fn bulk_delete<P>(&self, persistence: &Arc<P>, ids: &[String]) -> BulkOutcome
    where
        P: BoardPersistence + 'static,
    {
        let mut outcome = BulkOutcome::default();
        let batches: Vec<&[String]> = ids.chunks(self.config.batch_size).collect();
        let batch_count = batches.len();

        for (batch_no, batch) in batches.into_iter().enumerate() {
            let mut calls = JoinSet::new();
            for id in batch {
                let persistence = Arc::clone(persistence);
                let id = id.clone();
                calls.spawn(async move {
                    let result = persistence.delete_item(&id).await;
                    (id, result)
                });
            }
            while let Some(joined) = calls.join_next().await {
                match joined {
                    Ok((id, Ok(()))) => outcome.deleted.push(id),
                    Ok((id, Err(e))) => {
                        log::warn!("bulk delete: item {} failed: {}", id, e);
                        outcome.failed.push(id);
                    }
                    Err(e) => {
                        log::error!("bulk delete: task join failed: {}", e);
                    }
                }
            }
            if batch_no + 1 < batch_count {
                tokio::time::sleep(self.config.batch_delay).await;
            }
        }
        outcome
    }
}
