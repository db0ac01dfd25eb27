//! Item Entity
//!
//! A single row of a board: a title plus a schema-less map of column values.
//! `data` is keyed by column id and holds raw JSON values; the cell layer
//! interprets them per column type. The title is authoritative and is never
//! duplicated inside `data` (the `task` column reads and writes it directly).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single row/task belonging to a board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier (assigned by the persistence layer)
    pub id: String,
    pub board_id: String,
    /// Task name; the `task` column maps here, not into `data`
    pub title: String,
    /// Display position within the board, unique per board
    pub order_index: i64,
    /// column_id -> raw value; must only hold keys of existing non-task columns
    #[serde(default)]
    pub data: HashMap<String, Value>,
    pub created_at: Option<i64>,
    pub updated_at: Option<i64>,
}

impl Item {
    pub fn new(id: &str, board_id: &str, title: &str, order_index: i64) -> Self {
        Self {
            id: id.to_string(),
            board_id: board_id.to_string(),
            title: title.to_string(),
            order_index,
            data: HashMap::new(),
            created_at: None,
            updated_at: None,
        }
    }

    /// Raw stored value for a column, if any
    pub fn value(&self, column_id: &str) -> Option<&Value> {
        self.data.get(column_id)
    }

    /// Bump the modification timestamp
    pub fn touch(&mut self) {
        self.updated_at = Some(chrono::Utc::now().timestamp_millis());
    }
}
