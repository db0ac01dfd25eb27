//! Checkbox Cell
//!
//! The stored value is coerced to a boolean on read, so a checkbox cell
//! always renders and never shows a placeholder.

use serde_json::Value;

use super::{CellCommit, CellDisplay, CellDraft, CellHandler, CellValue};
use crate::domain::{ColumnOptions, ColumnType};

fn coerced(raw: &Value) -> bool {
    match CellValue::from_raw(ColumnType::Checkbox, raw) {
        Some(CellValue::Checkbox(b)) => b,
        _ => false,
    }
}

pub struct CheckboxCell;

impl CellHandler for CheckboxCell {
    fn render(&self, raw: &Value, _options: &ColumnOptions) -> CellDisplay {
        CellDisplay::Checkbox(coerced(raw))
    }

    fn begin_edit(&self, raw: &Value, _options: &ColumnOptions) -> CellDraft {
        CellDraft::Checkbox(coerced(raw))
    }

    fn commit(&self, draft: &CellDraft, prior: &Value, _options: &ColumnOptions) -> CellCommit {
        let CellDraft::Checkbox(checked) = draft else {
            return CellCommit::Unchanged;
        };
        if *checked == coerced(prior) {
            return CellCommit::Unchanged;
        }
        CellCommit::Value(Value::Bool(*checked))
    }

    fn default_value(&self, _options: &ColumnOptions) -> Value {
        Value::Bool(false)
    }
}
