//! In-Memory Persistence
//!
//! Complete `BoardPersistence` implementation over in-process maps. Plays
//! the role an in-memory database plays in tests, and works as a real
//! adapter for embedders that persist elsewhere.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{Board, DomainError, DomainResult, Item};

use super::{BoardPatch, BoardPersistence, ItemPatch};

#[derive(Default)]
struct Inner {
    boards: HashMap<String, Board>,
    items: HashMap<String, Item>,
    next_id: u64,
}

/// In-memory board/item storage behind a tokio mutex
#[derive(Default)]
pub struct MemoryPersistence {
    inner: Mutex<Inner>,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_board(&self, board: Board) {
        self.inner.lock().await.boards.insert(board.id.clone(), board);
    }

    /// Seed an item with a caller-chosen id (tests and imports)
    pub async fn insert_item(&self, item: Item) {
        self.inner.lock().await.items.insert(item.id.clone(), item);
    }

    pub async fn item(&self, id: &str) -> Option<Item> {
        self.inner.lock().await.items.get(id).cloned()
    }

    pub async fn item_count(&self, board_id: &str) -> usize {
        self.inner
            .lock()
            .await
            .items
            .values()
            .filter(|i| i.board_id == board_id)
            .count()
    }
}

#[async_trait]
impl BoardPersistence for MemoryPersistence {
    async fn load_board(&self, id: &str) -> DomainResult<Option<Board>> {
        Ok(self.inner.lock().await.boards.get(id).cloned())
    }

    async fn load_items(&self, board_id: &str, order_by: &str) -> DomainResult<Vec<Item>> {
        let inner = self.inner.lock().await;
        let mut items: Vec<Item> = inner
            .items
            .values()
            .filter(|i| i.board_id == board_id)
            .cloned()
            .collect();
        match order_by {
            "created_at" => items.sort_by(|a, b| {
                a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id))
            }),
            _ => items.sort_by(|a, b| {
                a.order_index.cmp(&b.order_index).then_with(|| a.id.cmp(&b.id))
            }),
        }
        Ok(items)
    }

    async fn create_item(&self, draft: &Item) -> DomainResult<Item> {
        let mut inner = self.inner.lock().await;
        inner.next_id += 1;
        let mut item = draft.clone();
        item.id = format!("item-{}", inner.next_id);
        item.created_at = Some(chrono::Utc::now().timestamp_millis());
        item.updated_at = item.created_at;
        inner.items.insert(item.id.clone(), item.clone());
        Ok(item)
    }

    async fn update_item(&self, id: &str, patch: &ItemPatch) -> DomainResult<()> {
        let mut inner = self.inner.lock().await;
        let item = inner
            .items
            .get_mut(id)
            .ok_or_else(|| DomainError::NotFound(format!("item {}", id)))?;
        if let Some(title) = &patch.title {
            item.title = title.clone();
        }
        if let Some(order_index) = patch.order_index {
            item.order_index = order_index;
        }
        if let Some(data) = &patch.data {
            item.data = data.clone();
        }
        item.touch();
        Ok(())
    }

    async fn delete_item(&self, id: &str) -> DomainResult<()> {
        let mut inner = self.inner.lock().await;
        inner
            .items
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| DomainError::NotFound(format!("item {}", id)))
    }

    async fn update_board(&self, id: &str, patch: &BoardPatch) -> DomainResult<()> {
        let mut inner = self.inner.lock().await;
        let board = inner
            .boards
            .get_mut(id)
            .ok_or_else(|| DomainError::NotFound(format!("board {}", id)))?;
        if let Some(title) = &patch.title {
            board.title = title.clone();
        }
        if let Some(columns) = &patch.columns {
            board.columns = columns.clone();
        }
        if let Some(groups) = &patch.groups {
            board.groups = groups.clone();
        }
        Ok(())
    }
}
