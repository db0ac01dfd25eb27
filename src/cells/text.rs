//! Text Cell

use serde_json::Value;

use super::{CellCommit, CellDisplay, CellDraft, CellHandler, CellValue};
use crate::domain::{ColumnOptions, ColumnType};

pub struct TextCell;

impl CellHandler for TextCell {
    fn render(&self, raw: &Value, _options: &ColumnOptions) -> CellDisplay {
        match CellValue::from_raw(ColumnType::Text, raw) {
            Some(CellValue::Text(s)) if !s.is_empty() => CellDisplay::Text(s),
            _ => CellDisplay::Placeholder,
        }
    }

    fn begin_edit(&self, raw: &Value, _options: &ColumnOptions) -> CellDraft {
        let current = match CellValue::from_raw(ColumnType::Text, raw) {
            Some(CellValue::Text(s)) => s,
            _ => String::new(),
        };
        CellDraft::Text(current)
    }

    fn commit(&self, draft: &CellDraft, prior: &Value, _options: &ColumnOptions) -> CellCommit {
        let CellDraft::Text(text) = draft else {
            return CellCommit::Unchanged;
        };
        if prior.as_str() == Some(text.as_str()) {
            return CellCommit::Unchanged;
        }
        CellCommit::Value(Value::String(text.clone()))
    }

    fn default_value(&self, _options: &ColumnOptions) -> Value {
        Value::String(String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_empty_and_null_as_placeholder() {
        let options = ColumnOptions::default();
        assert_eq!(TextCell.render(&json!(""), &options), CellDisplay::Placeholder);
        assert_eq!(TextCell.render(&Value::Null, &options), CellDisplay::Placeholder);
        assert_eq!(
            TextCell.render(&json!("note"), &options),
            CellDisplay::Text("note".to_string())
        );
    }

    #[test]
    fn test_commit_changed_text() {
        let options = ColumnOptions::default();
        let committed = TextCell.commit(
            &CellDraft::Text("new".to_string()),
            &json!("old"),
            &options,
        );
        assert_eq!(committed, CellCommit::Value(json!("new")));
    }
}
