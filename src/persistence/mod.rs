//! Persistence Layer - Collaborator Contract
//!
//! The abstract interface the grid engine persists through. Every call is
//! async and fallible; the engine never assumes response ordering across
//! concurrent calls. Implementations can target a remote API, SQLite, or
//! the in-memory adapter in [`memory`].

mod memory;

pub use memory::MemoryPersistence;

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{Board, Column, DomainResult, Group, Item};

/// Partial item update; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_index: Option<i64>,
    /// Full replacement of the value map when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<HashMap<String, Value>>,
}

impl ItemPatch {
    pub fn title(title: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            ..Default::default()
        }
    }

    pub fn order_index(order_index: i64) -> Self {
        Self {
            order_index: Some(order_index),
            ..Default::default()
        }
    }

    pub fn data(data: HashMap<String, Value>) -> Self {
        Self {
            data: Some(data),
            ..Default::default()
        }
    }
}

/// Partial board update; used for title renames and column-schema changes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<Column>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<Group>>,
}

impl BoardPatch {
    pub fn columns(columns: Vec<Column>) -> Self {
        Self {
            columns: Some(columns),
            ..Default::default()
        }
    }
}

/// Remote persistence collaborator for boards and their items
#[async_trait]
pub trait BoardPersistence: Send + Sync {
    /// Fetch a board by id; `None` when absent
    async fn load_board(&self, id: &str) -> DomainResult<Option<Board>>;

    /// Fetch a board's items ordered by the given field
    async fn load_items(&self, board_id: &str, order_by: &str) -> DomainResult<Vec<Item>>;

    /// Create an item; the implementation assigns the id
    async fn create_item(&self, draft: &Item) -> DomainResult<Item>;

    async fn update_item(&self, id: &str, patch: &ItemPatch) -> DomainResult<()>;

    async fn delete_item(&self, id: &str) -> DomainResult<()>;

    async fn update_board(&self, id: &str, patch: &BoardPatch) -> DomainResult<()>;
}
