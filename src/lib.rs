//! boardgrid - typed-column task board grid engine
//!
//! Headless core of a board dashboard: each board is a grid of items with
//! user-definable, typed columns (status, date, people, budget, ...).
//!
//! Layered architecture:
//! - domain: core entities (Board, Column, Item) and business rules
//! - cells: per-column-type render/edit capabilities and the dispatch registry
//! - store: canonical in-memory items plus the ordering engine
//! - pipeline: pure filter/sort derivation of the displayed sequence
//! - scheduler: rate-limited bulk mutations
//! - persistence: the async collaborator contract (and an in-memory adapter)
//! - controller: orchestration, optimistic updates and reconciliation
//!
//! The UI layer is an external collaborator: it renders [`cells::CellDisplay`]
//! values, drives [`cells::CellEditor`] state machines per cell, and calls the
//! [`controller::GridController`] entry points.

pub mod cells;
pub mod controller;
pub mod domain;
pub mod persistence;
pub mod pipeline;
pub mod scheduler;
pub mod store;

#[cfg(test)]
mod testutil;

pub use cells::{CellCommit, CellDisplay, CellDraft, CellEditor, CellValue};
pub use controller::GridController;
pub use domain::{
    Board, Choice, Column, ColumnOptions, ColumnType, DomainError, DomainResult, Item,
    TASK_COLUMN_ID,
};
pub use persistence::{BoardPatch, BoardPersistence, ItemPatch, MemoryPersistence};
pub use pipeline::{GridQuery, SortDirection, SortSpec};
pub use scheduler::{BulkOutcome, MutationScheduler, SchedulerConfig};
pub use store::{ItemStore, OrderingOps};
