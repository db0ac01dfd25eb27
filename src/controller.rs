//! Grid Controller
//!
//! Composes the store, cell registry, pipeline and scheduler, and is the
//! only component that talks to the persistence collaborator. Local state
//! is the source of truth for rendering: every mutation is applied to the
//! store synchronously before any persistence call is issued. Tolerated
//! failures (single-cell updates) are logged and the optimistic value
//! stands; failures on reorders and schema changes trigger a full reload
//! to resynchronize.

use std::sync::Arc;

use serde_json::Value;
use tokio::task::JoinSet;

use crate::cells::{self, CellCommit, CellDisplay, CellDraft};
use crate::domain::{Board, Column, DomainError, DomainResult, Item, TASK_COLUMN_ID};
use crate::persistence::{BoardPatch, BoardPersistence, ItemPatch};
use crate::pipeline::{self, GridQuery};
use crate::scheduler::{BulkOutcome, MutationScheduler, SchedulerConfig};
use crate::store::{ItemStore, OrderingOps};

/// One board's grid: canonical state plus its persistence wiring
pub struct GridController<P: BoardPersistence + 'static> {
    persistence: Arc<P>,
    store: ItemStore,
    scheduler: MutationScheduler,
}

impl<P: BoardPersistence + 'static> std::fmt::Debug for GridController<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GridController")
            .field("store", &self.store)
            .field("scheduler", &self.scheduler)
            .finish_non_exhaustive()
    }
}

impl<P: BoardPersistence + 'static> GridController<P> {
    /// Load a board and its items; `NotFound` when the board is absent
    pub async fn load(persistence: Arc<P>, board_id: &str) -> DomainResult<Self> {
        Self::load_with_config(persistence, board_id, SchedulerConfig::default()).await
    }

    pub async fn load_with_config(
        persistence: Arc<P>,
        board_id: &str,
        config: SchedulerConfig,
    ) -> DomainResult<Self> {
        let board = persistence
            .load_board(board_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("board {}", board_id)))?;
        board.validate()?;
        let items = persistence.load_items(board_id, "order_index").await?;
        Ok(Self {
            persistence,
            store: ItemStore::new(board, items),
            scheduler: MutationScheduler::new(config),
        })
    }

    pub fn board(&self) -> &Board {
        self.store.board()
    }

    pub fn items(&self) -> &[Item] {
        self.store.items()
    }

    pub fn item(&self, item_id: &str) -> Option<&Item> {
        self.store.item(item_id)
    }

    /// The displayed (filtered, sorted) sequence
    pub fn display(&self, query: &GridQuery) -> Vec<Item> {
        pipeline::apply(self.store.items(), query)
    }

    /// Re-fetch board and items from the source of truth
    pub async fn reload(&mut self) -> DomainResult<()> {
        let board_id = self.store.board().id.clone();
        let board = self
            .persistence
            .load_board(&board_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("board {}", board_id)))?;
        let items = self.persistence.load_items(&board_id, "order_index").await?;
        self.store.replace(board, items);
        Ok(())
    }

    /// Create an item at the end of the display order, pre-populated with
    /// type-correct defaults for every non-task column.
    pub async fn create_item(&mut self, title: &str) -> DomainResult<Item> {
        let mut draft = Item::new(
            "",
            &self.store.board().id,
            title,
            self.store.next_order_index(),
        );
        draft.data = self.store.new_item_defaults();

        let generation = self.store.generation();
        let created = self.persistence.create_item(&draft).await?;
        // drop the response if a reload superseded this operation
        if self.store.generation() == generation {
            self.store.insert(created.clone());
        }
        Ok(created)
    }

    /// Display representation of one cell
    pub fn render_cell(&self, item_id: &str, column_id: &str) -> DomainResult<CellDisplay> {
        let column = self.column(column_id)?;
        let item = self
            .store
            .item(item_id)
            .ok_or_else(|| DomainError::NotFound(format!("item {}", item_id)))?;
        let raw = self.cell_raw(item, column_id);
        Ok(cells::handler(column.column_type).render(&raw, &column.options))
    }

    /// Optimistic single-cell write: local state first, then persistence.
    /// A persistence failure is logged and the local value stands.
    pub async fn set_cell(
        &mut self,
        item_id: &str,
        column_id: &str,
        raw: Value,
    ) -> DomainResult<()> {
        self.store.update_cell(item_id, column_id, raw)?;
        let item = self
            .store
            .item(item_id)
            .ok_or_else(|| DomainError::NotFound(format!("item {}", item_id)))?;
        let patch = if column_id == TASK_COLUMN_ID {
            ItemPatch::title(&item.title)
        } else {
            ItemPatch::data(item.data.clone())
        };
        let item_id = item.id.clone();
        if let Err(e) = self.persistence.update_item(&item_id, &patch).await {
            log::warn!("cell update for item {} not persisted: {}", item_id, e);
        }
        Ok(())
    }

    /// Commit an edit draft through the column's cell handler. Returns
    /// whether the value changed; invalid input is discarded silently, the
    /// prior value retained.
    pub async fn commit_cell(
        &mut self,
        item_id: &str,
        column_id: &str,
        draft: &CellDraft,
    ) -> DomainResult<bool> {
        let (column_type, options) = {
            let column = self.column(column_id)?;
            (column.column_type, column.options.clone())
        };
        let item = self
            .store
            .item(item_id)
            .ok_or_else(|| DomainError::NotFound(format!("item {}", item_id)))?;
        let prior = self.cell_raw(item, column_id);
        match cells::handler(column_type).commit(draft, &prior, &options) {
            CellCommit::Unchanged => Ok(false),
            CellCommit::Value(raw) => {
                self.set_cell(item_id, column_id, raw).await?;
                Ok(true)
            }
        }
    }

    /// Toggle one person in a people cell
    pub async fn toggle_person(
        &mut self,
        item_id: &str,
        column_id: &str,
        person: &str,
    ) -> DomainResult<()> {
        let options = self.column(column_id)?.options.clone();
        let item = self
            .store
            .item(item_id)
            .ok_or_else(|| DomainError::NotFound(format!("item {}", item_id)))?;
        let raw = self.cell_raw(item, column_id);
        let toggled = cells::toggle_person(&raw, person, &options);
        self.set_cell(item_id, column_id, toggled).await
    }

    /// Move the item at display position `source` to `destination`. The
    /// renumbering is applied locally before any persistence call, so later
    /// edits always see the renumbered state. Changed indices persist in
    /// parallel; any failure re-fetches everything.
    pub async fn reorder(&mut self, source: usize, destination: usize) -> DomainResult<()> {
        let changed = self.store.reorder(source, destination)?;
        if changed.is_empty() {
            return Ok(());
        }
        let mut calls = JoinSet::new();
        for (item_id, order_index) in changed {
            let persistence = Arc::clone(&self.persistence);
            calls.spawn(async move {
                persistence
                    .update_item(&item_id, &ItemPatch::order_index(order_index))
                    .await
            });
        }
        let mut failed = false;
        while let Some(joined) = calls.join_next().await {
            match joined {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    log::warn!("reorder persistence failed: {}", e);
                    failed = true;
                }
                Err(e) => {
                    log::error!("reorder task join failed: {}", e);
                    failed = true;
                }
            }
        }
        if failed {
            self.reload().await?;
        }
        Ok(())
    }

    /// Add a column: schema is persisted first, then local state and item
    /// data are updated to match.
    pub async fn add_column(&mut self, column: Column) -> DomainResult<()> {
        let mut candidate = self.store.board().clone();
        if candidate.has_column(&column.id) {
            return Err(DomainError::InvalidInput(format!(
                "column {} already exists",
                column.id
            )));
        }
        candidate.columns.push(column.clone());
        candidate.validate()?;

        self.persist_schema(&candidate).await?;
        self.store.add_column(column)?;
        self.sync_all_item_data().await
    }

    /// Update a column definition; item data is unaffected
    pub async fn update_column(&mut self, column: Column) -> DomainResult<()> {
        let mut candidate = self.store.board().clone();
        let pos = candidate
            .columns
            .iter()
            .position(|c| c.id == column.id)
            .ok_or_else(|| DomainError::NotFound(format!("column {}", column.id)))?;
        candidate.columns[pos] = column.clone();
        candidate.validate()?;

        self.persist_schema(&candidate).await?;
        self.store.update_column(column)
    }

    /// Delete a column from the schema and from every item's data. The
    /// schema change persists first; the local co-update is synchronous;
    /// item persistence failures trigger a reload so the store is
    /// reconciled from the source of truth.
    pub async fn delete_column(&mut self, column_id: &str) -> DomainResult<()> {
        if column_id == TASK_COLUMN_ID {
            return Err(DomainError::InvalidInput(
                "the task column cannot be deleted".to_string(),
            ));
        }
        let mut candidate = self.store.board().clone();
        if !candidate.has_column(column_id) {
            return Err(DomainError::NotFound(format!("column {}", column_id)));
        }
        candidate.columns.retain(|c| c.id != column_id);

        self.persist_schema(&candidate).await?;
        self.store.delete_column(column_id)?;
        self.sync_all_item_data().await
    }

    /// Delete many items through the rate-limited scheduler. Only remotely
    /// deleted items are removed locally; failures stay visible.
    pub async fn delete_items(&mut self, ids: &[String]) -> BulkOutcome {
        let outcome = self.scheduler.bulk_delete(&self.persistence, ids).await;
        self.store.remove_items(&outcome.deleted);
        outcome
    }

    fn column(&self, column_id: &str) -> DomainResult<&Column> {
        self.store
            .board()
            .column(column_id)
            .ok_or_else(|| DomainError::NotFound(format!("column {}", column_id)))
    }

    /// Raw stored value for one cell; the task column reads the title
    fn cell_raw(&self, item: &Item, column_id: &str) -> Value {
        if column_id == TASK_COLUMN_ID {
            Value::String(item.title.clone())
        } else {
            item.value(column_id).cloned().unwrap_or(Value::Null)
        }
    }

    async fn persist_schema(&self, candidate: &Board) -> DomainResult<()> {
        self.persistence
            .update_board(&candidate.id, &BoardPatch::columns(candidate.columns.clone()))
            .await
    }

    /// Push every item's data map after a schema change; reload on failure
    async fn sync_all_item_data(&mut self) -> DomainResult<()> {
        let mut calls = JoinSet::new();
        for item in self.store.items() {
            let persistence = Arc::clone(&self.persistence);
            let item_id = item.id.clone();
            let patch = ItemPatch::data(item.data.clone());
            calls.spawn(async move { persistence.update_item(&item_id, &patch).await });
        }
        let mut failed = false;
        while let Some(joined) = calls.join_next().await {
            match joined {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    log::warn!("item data sync failed: {}", e);
                    failed = true;
                }
                Err(e) => {
                    log::error!("item data sync join failed: {}", e);
                    failed = true;
                }
            }
        }
        if failed {
            self.reload().await?;
        }
        Ok(())
    }
}
