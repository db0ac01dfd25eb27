//! Domain Layer
//!
//! Core entities and business rules: boards with typed column schemas,
//! items with schema-less value maps, and the shared error types.

mod board;
mod error;
mod item;

pub use board::{
    Board, Choice, Column, ColumnOptions, ColumnType, Group, NumberFormat, TASK_COLUMN_ID,
};
pub use error::{DomainError, DomainResult};
pub use item::Item;
