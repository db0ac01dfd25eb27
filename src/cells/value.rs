//! Parsed Cell Values
//!
//! `CellValue` is the tagged union behind the schema-less `data` map: one
//! variant per column type, each carrying its own value shape. Parsing is
//! tolerant — a stored value that does not fit its column's shape yields
//! `None` and the cell layer degrades to a placeholder instead of failing.

use chrono::NaiveDate;
use serde_json::Value;

use crate::domain::{ColumnOptions, ColumnType};

/// ISO date format used for stored date values
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A stored value interpreted under its column's type
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Status(String),
    Dropdown(String),
    Priority(String),
    Date(Option<NaiveDate>),
    People(Vec<String>),
    Number(Option<f64>),
    Budget(Option<f64>),
    Checkbox(bool),
    Tags(Vec<String>),
}

impl CellValue {
    /// Interpret a raw stored value under a column type.
    ///
    /// Returns `None` for a malformed value (wrong JSON shape, unparseable
    /// date, ...). Checkbox never fails: the value is coerced to a boolean.
    pub fn from_raw(column_type: ColumnType, raw: &Value) -> Option<CellValue> {
        match column_type {
            ColumnType::Text => string_like(raw).map(CellValue::Text),
            ColumnType::Status => string_like(raw).map(CellValue::Status),
            ColumnType::Dropdown => string_like(raw).map(CellValue::Dropdown),
            ColumnType::Priority => string_like(raw).map(CellValue::Priority),
            ColumnType::Date => match raw {
                Value::Null => Some(CellValue::Date(None)),
                Value::String(s) if s.is_empty() => Some(CellValue::Date(None)),
                Value::String(s) => NaiveDate::parse_from_str(s, DATE_FORMAT)
                    .ok()
                    .map(|d| CellValue::Date(Some(d))),
                _ => None,
            },
            ColumnType::People => match raw {
                Value::Null => Some(CellValue::People(Vec::new())),
                Value::String(s) if s.is_empty() => Some(CellValue::People(Vec::new())),
                Value::String(s) => Some(CellValue::People(vec![s.clone()])),
                Value::Array(entries) => string_entries(entries).map(CellValue::People),
                _ => None,
            },
            ColumnType::Number => numeric(raw).map(CellValue::Number),
            ColumnType::Budget => numeric(raw).map(CellValue::Budget),
            ColumnType::Checkbox => Some(CellValue::Checkbox(coerce_bool(raw))),
            ColumnType::Tags => match raw {
                Value::Null => Some(CellValue::Tags(Vec::new())),
                Value::String(s) if s.is_empty() => Some(CellValue::Tags(Vec::new())),
                Value::String(s) => Some(CellValue::Tags(vec![s.clone()])),
                Value::Array(entries) => string_entries(entries).map(|t| CellValue::Tags(dedup(t))),
                _ => None,
            },
        }
    }

    /// Encode back to the raw stored representation.
    ///
    /// `options` decides whether a people value is stored as a single
    /// identifier or an array.
    pub fn into_raw(self, options: &ColumnOptions) -> Value {
        match self {
            CellValue::Text(s)
            | CellValue::Status(s)
            | CellValue::Dropdown(s)
            | CellValue::Priority(s) => Value::String(s),
            CellValue::Date(None) => Value::Null,
            CellValue::Date(Some(d)) => Value::String(d.format(DATE_FORMAT).to_string()),
            CellValue::People(people) => {
                if options.is_multiple() {
                    Value::Array(people.into_iter().map(Value::String).collect())
                } else {
                    match people.into_iter().next() {
                        Some(p) => Value::String(p),
                        None => Value::Null,
                    }
                }
            }
            CellValue::Number(n) | CellValue::Budget(n) => encode_number(n),
            CellValue::Checkbox(b) => Value::Bool(b),
            CellValue::Tags(tags) => {
                Value::Array(dedup(tags).into_iter().map(Value::String).collect())
            }
        }
    }
}

fn string_like(raw: &Value) -> Option<String> {
    match raw {
        Value::Null => Some(String::new()),
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}

fn string_entries(entries: &[Value]) -> Option<Vec<String>> {
    entries
        .iter()
        .map(|v| v.as_str().map(str::to_string))
        .collect()
}

fn numeric(raw: &Value) -> Option<Option<f64>> {
    match raw {
        Value::Null => Some(None),
        Value::Number(n) => n.as_f64().map(Some),
        Value::String(s) if s.is_empty() => Some(None),
        _ => None,
    }
}

fn encode_number(n: Option<f64>) -> Value {
    match n.and_then(serde_json::Number::from_f64) {
        Some(num) => Value::Number(num),
        None => Value::Null,
    }
}

/// Checkbox coercion: truthiness in the source data model
fn coerce_bool(raw: &Value) -> bool {
    match raw {
        Value::Bool(b) => *b,
        Value::Null => false,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Deduplicate by exact string, preserving first occurrence order
pub fn dedup(tags: Vec<String>) -> Vec<String> {
    let mut seen = Vec::with_capacity(tags.len());
    for tag in tags {
        if !seen.contains(&tag) {
            seen.push(tag);
        }
    }
    seen
}
