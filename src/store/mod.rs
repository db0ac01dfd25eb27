//! Item Store
//!
//! Canonical in-memory items and column schema for one board. Owns the
//! `order_index` invariant (unique, ascending display order) together with
//! the ordering operations in [`ordering`]. All mutation is synchronous;
//! persistence is the controller's concern.

mod ordering;

pub use ordering::OrderingOps;

use std::collections::HashMap;

use serde_json::Value;

use crate::cells;
use crate::domain::{Board, Column, DomainError, DomainResult, Item, TASK_COLUMN_ID};

/// Canonical state for one loaded board
#[derive(Debug, Clone)]
pub struct ItemStore {
    board: Board,
    /// Sorted by `order_index` ascending
    items: Vec<Item>,
    /// Bumped on every reload; guards against stale async responses
    generation: u64,
}

impl ItemStore {
    pub fn new(board: Board, mut items: Vec<Item>) -> Self {
        items.sort_by(|a, b| a.order_index.cmp(&b.order_index).then_with(|| a.id.cmp(&b.id)));
        Self {
            board,
            items,
            generation: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item(&self, item_id: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.id == item_id)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Swap in freshly loaded state, invalidating in-flight responses
    pub fn replace(&mut self, board: Board, items: Vec<Item>) {
        let generation = self.generation + 1;
        *self = Self::new(board, items);
        self.generation = generation;
    }

    /// Type-correct default `data` for a newly created item
    pub fn new_item_defaults(&self) -> HashMap<String, Value> {
        self.board
            .columns
            .iter()
            .filter(|c| !c.is_task())
            .map(|c| {
                let default = cells::handler(c.column_type).default_value(&c.options);
                (c.id.clone(), default)
            })
            .collect()
    }

    /// Append an item at the end of the display order
    pub fn insert(&mut self, mut item: Item) {
        item.order_index = self.next_order_index();
        self.items.push(item);
        self.items.sort_by(|a, b| a.order_index.cmp(&b.order_index));
    }

    /// Replace exactly one value of one item; the task column routes to the
    /// title. Unknown item or column ids are reported, never a panic.
    pub fn update_cell(&mut self, item_id: &str, column_id: &str, raw: Value) -> DomainResult<()> {
        if !self.board.has_column(column_id) {
            return Err(DomainError::NotFound(format!("column {}", column_id)));
        }
        let item = self
            .items
            .iter_mut()
            .find(|i| i.id == item_id)
            .ok_or_else(|| DomainError::NotFound(format!("item {}", item_id)))?;
        if column_id == TASK_COLUMN_ID {
            match raw {
                Value::String(title) => item.title = title,
                other => {
                    return Err(DomainError::InvalidInput(format!(
                        "task column expects a string, got {}",
                        other
                    )))
                }
            }
        } else {
            item.data.insert(column_id.to_string(), raw);
        }
        item.touch();
        Ok(())
    }

    /// Add a column to the schema and seed every item with its default value
    pub fn add_column(&mut self, column: Column) -> DomainResult<()> {
        if self.board.has_column(&column.id) {
            return Err(DomainError::InvalidInput(format!(
                "column {} already exists",
                column.id
            )));
        }
        let mut candidate = self.board.clone();
        candidate.columns.push(column.clone());
        candidate.validate()?;

        let default = cells::handler(column.column_type).default_value(&column.options);
        for item in &mut self.items {
            item.data.insert(column.id.clone(), default.clone());
            item.touch();
        }
        self.board = candidate;
        Ok(())
    }

    /// Replace a column definition (rename, width, options). The task column
    /// may only be renamed.
    pub fn update_column(&mut self, column: Column) -> DomainResult<()> {
        let Some(pos) = self.board.columns.iter().position(|c| c.id == column.id) else {
            return Err(DomainError::NotFound(format!("column {}", column.id)));
        };
        if column.id == TASK_COLUMN_ID && column.column_type != self.board.columns[pos].column_type
        {
            return Err(DomainError::InvalidInput(
                "the task column cannot change type".to_string(),
            ));
        }
        let mut candidate = self.board.clone();
        candidate.columns[pos] = column;
        candidate.validate()?;
        self.board = candidate;
        Ok(())
    }

    /// Remove a column from the schema and its key from every item's data.
    /// Synchronous, so schema and items can never be observed out of step.
    pub fn delete_column(&mut self, column_id: &str) -> DomainResult<()> {
        if column_id == TASK_COLUMN_ID {
            return Err(DomainError::InvalidInput(
                "the task column cannot be deleted".to_string(),
            ));
        }
        if !self.board.has_column(column_id) {
            return Err(DomainError::NotFound(format!("column {}", column_id)));
        }
        self.board.columns.retain(|c| c.id != column_id);
        for item in &mut self.items {
            if item.data.remove(column_id).is_some() {
                item.touch();
            }
        }
        Ok(())
    }

    /// Remove the given items; returns how many were present
    pub fn remove_items(&mut self, ids: &[String]) -> usize {
        let before = self.items.len();
        self.items.retain(|i| !ids.contains(&i.id));
        before - self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Choice, ColumnOptions, ColumnType};
    use serde_json::json;

    fn board() -> Board {
        let mut board = Board::new("b1", "Roadmap");
        let status_options = ColumnOptions {
            choices: vec![
                Choice::new("not_started", "Not Started", "#c4c4c4"),
                Choice::new("done", "Done", "#00c875"),
            ],
            ..Default::default()
        };
        board
            .columns
            .push(Column::new("status", "Status", ColumnType::Status).with_options(status_options));
        board
            .columns
            .push(Column::new("budget", "Budget", ColumnType::Budget));
        board
    }

    fn store_with(titles: &[&str]) -> ItemStore {
        let mut store = ItemStore::new(board(), Vec::new());
        for (i, title) in titles.iter().enumerate() {
            let mut item = Item::new(&format!("i{}", i + 1), "b1", title, 0);
            item.data = store.new_item_defaults();
            store.insert(item);
        }
        store
    }

    #[test]
    fn test_insert_appends_with_max_plus_one() {
        let store = store_with(&["A", "B", "C"]);
        let indices: Vec<i64> = store.items().iter().map(|i| i.order_index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_new_item_defaults_cover_non_task_columns() {
        let store = store_with(&[]);
        let defaults = store.new_item_defaults();
        assert_eq!(defaults.len(), 2);
        assert_eq!(defaults["status"], json!(""));
        assert_eq!(defaults["budget"], Value::Null);
        assert!(!defaults.contains_key(TASK_COLUMN_ID));
    }

    #[test]
    fn test_update_cell_touches_exactly_one_item() {
        let mut store = store_with(&["A", "B"]);
        store.update_cell("i1", "status", json!("Done")).unwrap();
        assert_eq!(store.item("i1").unwrap().data["status"], json!("Done"));
        assert_eq!(store.item("i2").unwrap().data["status"], json!(""));
    }

    #[test]
    fn test_update_cell_task_column_routes_to_title() {
        let mut store = store_with(&["A"]);
        store
            .update_cell("i1", TASK_COLUMN_ID, json!("Renamed"))
            .unwrap();
        let item = store.item("i1").unwrap();
        assert_eq!(item.title, "Renamed");
        assert!(!item.data.contains_key(TASK_COLUMN_ID));
    }

    #[test]
    fn test_update_cell_unknown_targets_are_reported() {
        let mut store = store_with(&["A"]);
        assert!(matches!(
            store.update_cell("nope", "status", json!("Done")),
            Err(DomainError::NotFound(_))
        ));
        assert!(matches!(
            store.update_cell("i1", "ghost", json!("x")),
            Err(DomainError::NotFound(_))
        ));
    }

    #[test]
    fn test_add_column_seeds_every_item() {
        let mut store = store_with(&["A", "B"]);
        store
            .add_column(Column::new("done", "Done?", ColumnType::Checkbox))
            .unwrap();
        for item in store.items() {
            assert_eq!(item.data["done"], json!(false));
        }
        assert!(store.board().has_column("done"));
    }

    #[test]
    fn test_delete_column_strips_schema_and_every_item() {
        let mut store = store_with(&["A", "B", "C"]);
        store.delete_column("status").unwrap();
        assert!(!store.board().has_column("status"));
        for item in store.items() {
            assert!(!item.data.contains_key("status"));
        }
    }

    #[test]
    fn test_task_column_cannot_be_deleted() {
        let mut store = store_with(&["A"]);
        assert!(matches!(
            store.delete_column(TASK_COLUMN_ID),
            Err(DomainError::InvalidInput(_))
        ));
        assert!(store.board().has_column(TASK_COLUMN_ID));
    }

    #[test]
    fn test_update_column_renames() {
        let mut store = store_with(&["A"]);
        let mut renamed = store.board().column("status").unwrap().clone();
        renamed.title = "Stage".to_string();
        store.update_column(renamed).unwrap();
        assert_eq!(store.board().column("status").unwrap().title, "Stage");
    }

    #[test]
    fn test_replace_bumps_generation() {
        let mut store = store_with(&["A"]);
        let generation = store.generation();
        store.replace(board(), Vec::new());
        assert_eq!(store.generation(), generation + 1);
        assert!(store.is_empty());
    }
}
