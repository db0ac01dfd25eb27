//! Cell Type Registry
//!
//! Maps a column type to its capability set: render the current value, begin
//! and commit a local edit, and produce the default value for a new item.
//! One handler per column type; dispatch is a static table keyed by
//! `ColumnType`. Rendering never fails — malformed stored values degrade to
//! `CellDisplay::Placeholder`.

mod checkbox;
mod choice;
mod date;
mod number;
mod people;
mod tags;
mod text;
mod value;

pub use checkbox::CheckboxCell;
pub use choice::{DropdownCell, PriorityCell, StatusCell};
pub use date::{classify_date, DateCell, DateStatus};
pub use number::{budget_level, format_currency, BudgetCell, BudgetLevel, NumberCell};
pub use people::{toggle_person, PeopleCell};
pub use tags::{tag_color, TagsCell};
pub use text::TextCell;
pub use value::{dedup, CellValue, DATE_FORMAT};

use chrono::NaiveDate;
use serde_json::Value;

use crate::domain::{ColumnOptions, ColumnType};

/// Display representation of one cell, ready for a UI layer to style
#[derive(Debug, Clone, PartialEq)]
pub enum CellDisplay {
    /// Empty or malformed value; the UI chooses the placeholder glyph
    Placeholder,
    Text(String),
    /// Resolved (or fallback) choice of a status/dropdown/priority cell
    Choice {
        label: String,
        /// None when the stored value matched no configured choice
        color: Option<String>,
    },
    Date {
        text: String,
        status: DateStatus,
    },
    Number(String),
    Budget {
        text: String,
        level: BudgetLevel,
    },
    Checkbox(bool),
    People(Vec<String>),
    /// Tag chips with derived (never persisted) colors
    Tags(Vec<TagChip>),
}

/// One rendered tag with its derived color
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagChip {
    pub label: String,
    pub color: String,
}

/// Editable draft produced by `begin_edit`, consumed by `commit`
#[derive(Debug, Clone, PartialEq)]
pub enum CellDraft {
    /// Free text input (text, number and budget cells)
    Text(String),
    /// Chosen option of a status/dropdown/priority cell
    Selection(Option<String>),
    Date(Option<NaiveDate>),
    People(Vec<String>),
    Checkbox(bool),
    Tags(Vec<String>),
}

/// Outcome of committing a draft
#[derive(Debug, Clone, PartialEq)]
pub enum CellCommit {
    /// Store this raw value
    Value(Value),
    /// Keep the prior value (no-op edit or invalid input)
    Unchanged,
}

/// Capability set of one column type
pub trait CellHandler: Send + Sync {
    /// Display representation; must tolerate any stored value
    fn render(&self, raw: &Value, options: &ColumnOptions) -> CellDisplay;

    /// Editable draft seeded from the current value
    fn begin_edit(&self, raw: &Value, options: &ColumnOptions) -> CellDraft;

    /// Commit a draft against the prior value
    fn commit(&self, draft: &CellDraft, prior: &Value, options: &ColumnOptions) -> CellCommit;

    /// Type-correct value for a newly created item or column
    fn default_value(&self, options: &ColumnOptions) -> Value;
}

/// Resolve the handler for a column type
pub fn handler(column_type: ColumnType) -> &'static dyn CellHandler {
    match column_type {
        ColumnType::Text => &TextCell,
        ColumnType::Status => &StatusCell,
        ColumnType::Date => &DateCell,
        ColumnType::People => &PeopleCell,
        ColumnType::Number => &NumberCell,
        ColumnType::Budget => &BudgetCell,
        ColumnType::Checkbox => &CheckboxCell,
        ColumnType::Dropdown => &DropdownCell,
        ColumnType::Priority => &PriorityCell,
        ColumnType::Tags => &TagsCell,
    }
}

/// Per-cell edit state machine: viewing -> editing -> viewing.
///
/// Each cell instance owns its editor; entering edit on one cell never
/// affects another (no process-wide "current editor").
#[derive(Debug, Clone, Default)]
pub struct CellEditor {
    draft: Option<CellDraft>,
}

impl CellEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_editing(&self) -> bool {
        self.draft.is_some()
    }

    /// Enter the editing state, seeding the draft from the current value
    pub fn begin(&mut self, handler: &dyn CellHandler, raw: &Value, options: &ColumnOptions) {
        self.draft = Some(handler.begin_edit(raw, options));
    }

    /// Mutable access to the in-progress draft
    pub fn draft_mut(&mut self) -> Option<&mut CellDraft> {
        self.draft.as_mut()
    }

    /// Leave editing without committing
    pub fn cancel(&mut self) {
        self.draft = None;
    }

    /// Commit the draft and return to viewing
    pub fn commit(
        &mut self,
        handler: &dyn CellHandler,
        prior: &Value,
        options: &ColumnOptions,
    ) -> CellCommit {
        match self.draft.take() {
            Some(draft) => handler.commit(&draft, prior, options),
            None => CellCommit::Unchanged,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ColumnType;
    use serde_json::json;

    /// No-op edit is idempotent for every type
    #[test]
    fn test_unmodified_edit_roundtrip() {
        let options = ColumnOptions::default();
        let cases = vec![
            (ColumnType::Text, json!("hello")),
            (ColumnType::Status, json!("Done")),
            (ColumnType::Dropdown, json!("opt-a")),
            (ColumnType::Priority, json!("high")),
            (ColumnType::Date, json!("2026-01-05")),
            (ColumnType::People, json!(["alice", "bob"])),
            (ColumnType::Number, json!(42.5)),
            (ColumnType::Budget, json!(12000.0)),
            (ColumnType::Checkbox, json!(true)),
            (ColumnType::Tags, json!(["red", "blue"])),
        ];
        for (column_type, raw) in cases {
            let h = handler(column_type);
            let draft = h.begin_edit(&raw, &options);
            assert_eq!(
                h.commit(&draft, &raw, &options),
                CellCommit::Unchanged,
                "type {:?}",
                column_type
            );
        }
    }

    #[test]
    fn test_editor_state_machine_is_local() {
        let options = ColumnOptions::default();
        let h = handler(ColumnType::Text);
        let mut a = CellEditor::new();
        let mut b = CellEditor::new();
        a.begin(h, &json!("one"), &options);
        assert!(a.is_editing());
        assert!(!b.is_editing());

        b.begin(h, &json!("two"), &options);
        a.cancel();
        assert!(!a.is_editing());
        assert!(b.is_editing());
    }

    #[test]
    fn test_editor_commit_clears_state() {
        let options = ColumnOptions::default();
        let h = handler(ColumnType::Text);
        let mut editor = CellEditor::new();
        editor.begin(h, &json!("old"), &options);
        if let Some(CellDraft::Text(text)) = editor.draft_mut() {
            *text = "new".to_string();
        }
        assert_eq!(
            editor.commit(h, &json!("old"), &options),
            CellCommit::Value(json!("new"))
        );
        assert!(!editor.is_editing());
    }

    #[test]
    fn test_malformed_values_render_placeholder_for_all_types() {
        let options = ColumnOptions::default();
        let bad = json!({"unexpected": true});
        for column_type in [
            ColumnType::Text,
            ColumnType::Status,
            ColumnType::Date,
            ColumnType::People,
            ColumnType::Number,
            ColumnType::Budget,
            ColumnType::Dropdown,
            ColumnType::Priority,
            ColumnType::Tags,
        ] {
            assert_eq!(
                handler(column_type).render(&bad, &options),
                CellDisplay::Placeholder,
                "type {:?}",
                column_type
            );
        }
        // checkbox coerces instead
        assert_eq!(
            handler(ColumnType::Checkbox).render(&bad, &options),
            CellDisplay::Checkbox(true)
        );
    }
}
