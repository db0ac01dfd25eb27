//! Test Support
//!
//! A failure-injecting persistence wrapper shared by the scheduler and
//! controller tests. Delegates to `MemoryPersistence` and records delete
//! timings against the tokio clock so paused-time tests can assert batching.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{Board, DomainError, DomainResult, Item};
use crate::persistence::{BoardPatch, BoardPersistence, ItemPatch, MemoryPersistence};

#[derive(Default)]
pub struct FlakyPersistence {
    memory: MemoryPersistence,
    fail_deletes: Mutex<HashSet<String>>,
    fail_item_updates: AtomicBool,
    fail_board_updates: AtomicBool,
    started: Mutex<Option<tokio::time::Instant>>,
    delete_log: Mutex<Vec<(String, Duration)>>,
}

impl FlakyPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn memory(&self) -> &MemoryPersistence {
        &self.memory
    }

    pub async fn fail_delete(&self, id: &str) {
        self.fail_deletes.lock().await.insert(id.to_string());
    }

    pub fn fail_item_updates(&self, fail: bool) {
        self.fail_item_updates.store(fail, Ordering::SeqCst);
    }

    pub fn fail_board_updates(&self, fail: bool) {
        self.fail_board_updates.store(fail, Ordering::SeqCst);
    }

    /// Delete calls as (id, offset from the first recorded call)
    pub async fn delete_offsets(&self) -> Vec<(String, Duration)> {
        self.delete_log.lock().await.clone()
    }

    async fn record_delete(&self, id: &str) {
        let now = tokio::time::Instant::now();
        let start = *self.started.lock().await.get_or_insert(now);
        self.delete_log
            .lock()
            .await
            .push((id.to_string(), now - start));
    }
}

#[async_trait]
impl BoardPersistence for FlakyPersistence {
    async fn load_board(&self, id: &str) -> DomainResult<Option<Board>> {
        self.memory.load_board(id).await
    }

    async fn load_items(&self, board_id: &str, order_by: &str) -> DomainResult<Vec<Item>> {
        self.memory.load_items(board_id, order_by).await
    }

    async fn create_item(&self, draft: &Item) -> DomainResult<Item> {
        self.memory.create_item(draft).await
    }

    async fn update_item(&self, id: &str, patch: &ItemPatch) -> DomainResult<()> {
        if self.fail_item_updates.load(Ordering::SeqCst) {
            return Err(DomainError::Persistence("injected update failure".to_string()));
        }
        self.memory.update_item(id, patch).await
    }

    async fn delete_item(&self, id: &str) -> DomainResult<()> {
        self.record_delete(id).await;
        if self.fail_deletes.lock().await.contains(id) {
            return Err(DomainError::Persistence(format!(
                "injected delete failure for {}",
                id
            )));
        }
        self.memory.delete_item(id).await
    }

    async fn update_board(&self, id: &str, patch: &BoardPatch) -> DomainResult<()> {
        if self.fail_board_updates.load(Ordering::SeqCst) {
            return Err(DomainError::Persistence("injected board failure".to_string()));
        }
        self.memory.update_board(id, patch).await
    }
}
