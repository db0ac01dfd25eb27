//! Tags Cell
//!
//! Stored as an array of strings, deduplicated by exact match. Chip colors
//! are derived from a tag's first character and never persisted.

use serde_json::Value;

use super::{dedup, CellCommit, CellDisplay, CellDraft, CellHandler, CellValue, TagChip};
use crate::domain::{ColumnOptions, ColumnType};

const TAG_PALETTE: &[&str] = &[
    "#ff5ac4", "#ff642e", "#fdab3d", "#00c875", "#0086c0", "#a25ddc", "#037f4c", "#579bfc",
    "#cab641", "#e2445c",
];

/// Deterministic chip color from the tag's first character
pub fn tag_color(tag: &str) -> &'static str {
    let first = tag.chars().next().unwrap_or('\0');
    TAG_PALETTE[first as usize % TAG_PALETTE.len()]
}

pub struct TagsCell;

impl CellHandler for TagsCell {
    fn render(&self, raw: &Value, _options: &ColumnOptions) -> CellDisplay {
        match CellValue::from_raw(ColumnType::Tags, raw) {
            Some(CellValue::Tags(tags)) if !tags.is_empty() => CellDisplay::Tags(
                tags.into_iter()
                    .map(|label| {
                        let color = tag_color(&label).to_string();
                        TagChip { label, color }
                    })
                    .collect(),
            ),
            _ => CellDisplay::Placeholder,
        }
    }

    fn begin_edit(&self, raw: &Value, _options: &ColumnOptions) -> CellDraft {
        match CellValue::from_raw(ColumnType::Tags, raw) {
            Some(CellValue::Tags(tags)) => CellDraft::Tags(tags),
            _ => CellDraft::Tags(Vec::new()),
        }
    }

    fn commit(&self, draft: &CellDraft, prior: &Value, options: &ColumnOptions) -> CellCommit {
        let CellDraft::Tags(tags) = draft else {
            return CellCommit::Unchanged;
        };
        let next = CellValue::Tags(dedup(tags.clone())).into_raw(options);
        let prior_norm = match CellValue::from_raw(ColumnType::Tags, prior) {
            Some(v) => v.into_raw(options),
            None => Value::Array(Vec::new()),
        };
        if next == prior_norm {
            return CellCommit::Unchanged;
        }
        CellCommit::Value(next)
    }

    fn default_value(&self, _options: &ColumnOptions) -> Value {
        Value::Array(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_color_is_deterministic_per_first_char() {
        assert_eq!(tag_color("alpha"), tag_color("avocado"));
        assert_eq!(tag_color(""), TAG_PALETTE[0]);
    }

    #[test]
    fn test_commit_dedups() {
        let committed = TagsCell.commit(
            &CellDraft::Tags(vec!["a".to_string(), "b".to_string(), "a".to_string()]),
            &json!([]),
            &ColumnOptions::default(),
        );
        assert_eq!(committed, CellCommit::Value(json!(["a", "b"])));
    }

    #[test]
    fn test_render_chips() {
        let display = TagsCell.render(&json!(["urgent"]), &ColumnOptions::default());
        let CellDisplay::Tags(chips) = display else {
            panic!("expected tag chips");
        };
        assert_eq!(chips.len(), 1);
        assert_eq!(chips[0].label, "urgent");
        assert_eq!(chips[0].color, tag_color("urgent"));
    }
}
