//! Status / Dropdown / Priority Cells
//!
//! All three render one choice from the column's configured list. Status
//! matches the stored value against choice *labels*; dropdown and priority
//! match against choice *values*. The asymmetry is observed source behavior
//! and is kept as-is. A stored value matching no choice renders as a
//! colorless fallback chip, never an error.

use serde_json::Value;

use super::{CellCommit, CellDisplay, CellDraft, CellHandler, CellValue};
use crate::domain::{Choice, ColumnOptions, ColumnType};

/// Which choice field the stored value is matched against
#[derive(Clone, Copy)]
enum ChoiceKey {
    Label,
    Value,
}

fn find_choice<'a>(choices: &'a [Choice], stored: &str, key: ChoiceKey) -> Option<&'a Choice> {
    choices.iter().find(|c| match key {
        ChoiceKey::Label => c.label == stored,
        ChoiceKey::Value => c.value == stored,
    })
}

fn render_choice(
    column_type: ColumnType,
    raw: &Value,
    options: &ColumnOptions,
    key: ChoiceKey,
) -> CellDisplay {
    let stored = match CellValue::from_raw(column_type, raw) {
        Some(CellValue::Status(s))
        | Some(CellValue::Dropdown(s))
        | Some(CellValue::Priority(s)) => s,
        _ => return CellDisplay::Placeholder,
    };
    if stored.is_empty() {
        return CellDisplay::Placeholder;
    }
    match find_choice(&options.choices, &stored, key) {
        Some(choice) => CellDisplay::Choice {
            label: choice.label.clone(),
            color: Some(choice.color.clone()),
        },
        // unknown stored value: show it, uncolored
        None => CellDisplay::Choice {
            label: stored,
            color: None,
        },
    }
}

fn begin_choice_edit(column_type: ColumnType, raw: &Value) -> CellDraft {
    match CellValue::from_raw(column_type, raw) {
        Some(CellValue::Status(s))
        | Some(CellValue::Dropdown(s))
        | Some(CellValue::Priority(s))
            if !s.is_empty() =>
        {
            CellDraft::Selection(Some(s))
        }
        _ => CellDraft::Selection(None),
    }
}

fn commit_choice(draft: &CellDraft, prior: &Value) -> CellCommit {
    let CellDraft::Selection(selection) = draft else {
        return CellCommit::Unchanged;
    };
    let next = selection.clone().unwrap_or_default();
    let prior_str = prior.as_str().unwrap_or_default();
    if next == prior_str {
        return CellCommit::Unchanged;
    }
    CellCommit::Value(Value::String(next))
}

/// Status cell: keyed by choice label
pub struct StatusCell;

impl CellHandler for StatusCell {
    fn render(&self, raw: &Value, options: &ColumnOptions) -> CellDisplay {
        render_choice(ColumnType::Status, raw, options, ChoiceKey::Label)
    }

    fn begin_edit(&self, raw: &Value, _options: &ColumnOptions) -> CellDraft {
        begin_choice_edit(ColumnType::Status, raw)
    }

    fn commit(&self, draft: &CellDraft, prior: &Value, _options: &ColumnOptions) -> CellCommit {
        commit_choice(draft, prior)
    }

    fn default_value(&self, _options: &ColumnOptions) -> Value {
        Value::String(String::new())
    }
}

/// Dropdown cell: keyed by choice value
pub struct DropdownCell;

impl CellHandler for DropdownCell {
    fn render(&self, raw: &Value, options: &ColumnOptions) -> CellDisplay {
        render_choice(ColumnType::Dropdown, raw, options, ChoiceKey::Value)
    }

    fn begin_edit(&self, raw: &Value, _options: &ColumnOptions) -> CellDraft {
        begin_choice_edit(ColumnType::Dropdown, raw)
    }

    fn commit(&self, draft: &CellDraft, prior: &Value, _options: &ColumnOptions) -> CellCommit {
        commit_choice(draft, prior)
    }

    fn default_value(&self, _options: &ColumnOptions) -> Value {
        Value::String(String::new())
    }
}

/// Priority cell: keyed by choice value
pub struct PriorityCell;

impl CellHandler for PriorityCell {
    fn render(&self, raw: &Value, options: &ColumnOptions) -> CellDisplay {
        render_choice(ColumnType::Priority, raw, options, ChoiceKey::Value)
    }

    fn begin_edit(&self, raw: &Value, _options: &ColumnOptions) -> CellDraft {
        begin_choice_edit(ColumnType::Priority, raw)
    }

    fn commit(&self, draft: &CellDraft, prior: &Value, _options: &ColumnOptions) -> CellCommit {
        commit_choice(draft, prior)
    }

    fn default_value(&self, _options: &ColumnOptions) -> Value {
        Value::String(String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn status_options() -> ColumnOptions {
        ColumnOptions {
            choices: vec![
                Choice::new("not_started", "Not Started", "#c4c4c4"),
                Choice::new("done", "Done", "#00c875"),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_status_matches_by_label() {
        let display = StatusCell.render(&json!("Done"), &status_options());
        assert_eq!(
            display,
            CellDisplay::Choice {
                label: "Done".to_string(),
                color: Some("#00c875".to_string())
            }
        );
    }

    #[test]
    fn test_dropdown_matches_by_value() {
        let display = DropdownCell.render(&json!("done"), &status_options());
        assert_eq!(
            display,
            CellDisplay::Choice {
                label: "Done".to_string(),
                color: Some("#00c875".to_string())
            }
        );
        // a label is not a dropdown key
        let fallback = DropdownCell.render(&json!("Done"), &status_options());
        assert_eq!(
            fallback,
            CellDisplay::Choice {
                label: "Done".to_string(),
                color: None
            }
        );
    }

    #[test]
    fn test_unknown_status_renders_fallback_and_can_be_overwritten() {
        let options = status_options();
        let display = StatusCell.render(&json!("Archived"), &options);
        assert_eq!(
            display,
            CellDisplay::Choice {
                label: "Archived".to_string(),
                color: None
            }
        );

        let committed = StatusCell.commit(
            &CellDraft::Selection(Some("Done".to_string())),
            &json!("Archived"),
            &options,
        );
        assert_eq!(committed, CellCommit::Value(json!("Done")));
    }

    #[test]
    fn test_clearing_selection() {
        let committed = StatusCell.commit(
            &CellDraft::Selection(None),
            &json!("Done"),
            &status_options(),
        );
        assert_eq!(committed, CellCommit::Value(json!("")));
        // clearing an already-empty cell is a no-op
        let noop = StatusCell.commit(&CellDraft::Selection(None), &json!(""), &status_options());
        assert_eq!(noop, CellCommit::Unchanged);
    }
}
