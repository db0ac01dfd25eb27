//! People Cell
//!
//! Stored as a single identifier or an array depending on the column's
//! `multiple` option (default true). The picker toggles membership; a
//! single-select column collapses to the most recently toggled person.

use serde_json::Value;

use super::{CellCommit, CellDisplay, CellDraft, CellHandler, CellValue};
use crate::domain::{ColumnOptions, ColumnType};

/// Toggle one person in a stored value, honoring the column's multiple flag
pub fn toggle_person(raw: &Value, person: &str, options: &ColumnOptions) -> Value {
    let mut people = match CellValue::from_raw(ColumnType::People, raw) {
        Some(CellValue::People(p)) => p,
        _ => Vec::new(),
    };
    match people.iter().position(|p| p == person) {
        Some(pos) => {
            people.remove(pos);
        }
        None => people.push(person.to_string()),
    }
    if !options.is_multiple() {
        // collapse to the newest selection (or none)
        people = people.pop().into_iter().collect();
    }
    CellValue::People(people).into_raw(options)
}

pub struct PeopleCell;

impl CellHandler for PeopleCell {
    fn render(&self, raw: &Value, _options: &ColumnOptions) -> CellDisplay {
        match CellValue::from_raw(ColumnType::People, raw) {
            Some(CellValue::People(people)) if !people.is_empty() => CellDisplay::People(people),
            _ => CellDisplay::Placeholder,
        }
    }

    fn begin_edit(&self, raw: &Value, _options: &ColumnOptions) -> CellDraft {
        match CellValue::from_raw(ColumnType::People, raw) {
            Some(CellValue::People(people)) => CellDraft::People(people),
            _ => CellDraft::People(Vec::new()),
        }
    }

    fn commit(&self, draft: &CellDraft, prior: &Value, options: &ColumnOptions) -> CellCommit {
        let CellDraft::People(people) = draft else {
            return CellCommit::Unchanged;
        };
        let next = CellValue::People(people.clone()).into_raw(options);
        let prior_norm = match CellValue::from_raw(ColumnType::People, prior) {
            Some(v) => v.into_raw(options),
            None => Value::Null,
        };
        if next == prior_norm {
            return CellCommit::Unchanged;
        }
        CellCommit::Value(next)
    }

    fn default_value(&self, options: &ColumnOptions) -> Value {
        if options.is_multiple() {
            Value::Array(Vec::new())
        } else {
            Value::Null
        }
    }
}
