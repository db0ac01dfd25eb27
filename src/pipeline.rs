//! Filter/Sort Pipeline
//!
//! Pure derivation of the displayed item sequence: free-text query against
//! titles, structured filters over the value map (AND across attributes, OR
//! within an attribute's accepted set), and a stable single-field sort.
//! Inputs are never mutated.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::Item;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Single-field sort: an item attribute (`order_index`, `title`, ...) or a
/// `data` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            field: "order_index".to_string(),
            direction: SortDirection::Asc,
        }
    }
}

/// Full display query; `Default` is the identity ordering
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GridQuery {
    /// Case-insensitive substring match against the title only
    #[serde(default)]
    pub query: String,
    /// attribute -> accepted values; empty accepted sets are ignored
    #[serde(default)]
    pub filters: BTreeMap<String, Vec<Value>>,
    #[serde(default)]
    pub sort: SortSpec,
}

/// Derive the displayed sequence from a snapshot of the items
pub fn apply(items: &[Item], query: &GridQuery) -> Vec<Item> {
    let needle = query.query.to_lowercase();
    let mut displayed: Vec<Item> = items
        .iter()
        .filter(|item| needle.is_empty() || item.title.to_lowercase().contains(&needle))
        .filter(|item| passes_filters(item, &query.filters))
        .cloned()
        .collect();

    // Vec::sort_by is stable: equal keys keep their relative order
    displayed.sort_by(|a, b| {
        let ordering = compare_values(
            &field_value(a, &query.sort.field),
            &field_value(b, &query.sort.field),
        );
        match query.sort.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
    displayed
}

fn passes_filters(item: &Item, filters: &BTreeMap<String, Vec<Value>>) -> bool {
    filters.iter().all(|(attribute, accepted)| {
        if accepted.is_empty() {
            return true;
        }
        let value = field_value(item, attribute);
        accepted.contains(&value)
    })
}

/// Resolve a field to a comparable value; item-level attributes first,
/// then the data map, then null.
fn field_value(item: &Item, field: &str) -> Value {
    match field {
        "order_index" => Value::from(item.order_index),
        "title" | "task" => Value::String(item.title.clone()),
        "id" => Value::String(item.id.clone()),
        "created_at" => item.created_at.map(Value::from).unwrap_or(Value::Null),
        "updated_at" => item.updated_at.map(Value::from).unwrap_or(Value::Null),
        _ => item.data.get(field).cloned().unwrap_or(Value::Null),
    }
}

/// Numbers compare numerically; everything else as case-sensitive strings
/// with null/missing as the empty string.
fn compare_values(a: &Value, b: &Value) -> Ordering {
    if let (Value::Number(x), Value::Number(y)) = (a, b) {
        let (x, y) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
        return x.partial_cmp(&y).unwrap_or(Ordering::Equal);
    }
    string_form(a).cmp(&string_form(b))
}

fn string_form(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
