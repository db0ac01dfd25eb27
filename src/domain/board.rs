//! Board Entity
//!
//! A board is a named collection of items with a user-defined column schema.
//! Columns are unique by id; the `task` column is privileged: it is always
//! present, maps to an item's title, and can only be renamed, never deleted.

use serde::{Deserialize, Serialize};

use super::error::{DomainError, DomainResult};

/// Column id reserved for the item title
pub const TASK_COLUMN_ID: &str = "task";

/// Column type determines cell behavior and value shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    #[default]
    Text,
    Status,
    Date,
    People,
    Number,
    Budget,
    Checkbox,
    Dropdown,
    Priority,
    Tags,
}

impl ColumnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Text => "text",
            ColumnType::Status => "status",
            ColumnType::Date => "date",
            ColumnType::People => "people",
            ColumnType::Number => "number",
            ColumnType::Budget => "budget",
            ColumnType::Checkbox => "checkbox",
            ColumnType::Dropdown => "dropdown",
            ColumnType::Priority => "priority",
            ColumnType::Tags => "tags",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "status" => ColumnType::Status,
            "date" => ColumnType::Date,
            "people" => ColumnType::People,
            "number" => ColumnType::Number,
            "budget" => ColumnType::Budget,
            "checkbox" => ColumnType::Checkbox,
            "dropdown" => ColumnType::Dropdown,
            "priority" => ColumnType::Priority,
            "tags" => ColumnType::Tags,
            _ => ColumnType::Text,
        }
    }
}

/// One selectable option of a status/dropdown/priority column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub value: String,
    pub label: String,
    #[serde(default)]
    pub color: String,
}

impl Choice {
    pub fn new(value: &str, label: &str, color: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
            color: color.to_string(),
        }
    }
}

/// Display format for number columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NumberFormat {
    #[default]
    Plain,
    Percent,
}

/// Type-specific column configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ColumnOptions {
    /// Choices for status/dropdown/priority columns
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<Choice>,
    /// People column: multi-select (defaults to true when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiple: Option<bool>,
    /// Number column display format
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<NumberFormat>,
}

impl ColumnOptions {
    /// Effective multi-select flag for people columns
    pub fn is_multiple(&self) -> bool {
        self.multiple.unwrap_or(true)
    }
}

/// A typed field definition applied uniformly across all items of a board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Stable id, unique within the board
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    pub width: u32,
    #[serde(default)]
    pub options: ColumnOptions,
}

impl Column {
    pub const DEFAULT_WIDTH: u32 = 140;

    pub fn new(id: &str, title: &str, column_type: ColumnType) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            column_type,
            width: Self::DEFAULT_WIDTH,
            options: ColumnOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ColumnOptions) -> Self {
        self.options = options;
        self
    }

    /// The privileged title column every board carries
    pub fn task(title: &str) -> Self {
        Self::new(TASK_COLUMN_ID, title, ColumnType::Text)
    }

    pub fn is_task(&self) -> bool {
        self.id == TASK_COLUMN_ID
    }
}

/// A display-only item grouping; the engine carries it as plain data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub color: String,
}

/// A named collection of items with a user-defined column schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub id: String,
    pub title: String,
    pub columns: Vec<Column>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<Group>,
}

impl Board {
    /// Create a board with only the privileged task column
    pub fn new(id: &str, title: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            columns: vec![Column::task("Task")],
            groups: Vec::new(),
        }
    }

    pub fn column(&self, column_id: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == column_id)
    }

    pub fn has_column(&self, column_id: &str) -> bool {
        self.column(column_id).is_some()
    }

    /// Schema invariants: task column present, column ids unique,
    /// choice values unique per column.
    pub fn validate(&self) -> DomainResult<()> {
        if !self.has_column(TASK_COLUMN_ID) {
            return Err(DomainError::InvalidInput(format!(
                "board {} is missing the task column",
                self.id
            )));
        }
        for (i, column) in self.columns.iter().enumerate() {
            if self.columns[..i].iter().any(|c| c.id == column.id) {
                return Err(DomainError::InvalidInput(format!(
                    "duplicate column id: {}",
                    column.id
                )));
            }
            for (j, choice) in column.options.choices.iter().enumerate() {
                if column.options.choices[..j].iter().any(|c| c.value == choice.value) {
                    return Err(DomainError::InvalidInput(format!(
                        "duplicate choice value {} in column {}",
                        choice.value, column.id
                    )));
                }
            }
        }
        Ok(())
    }
}
