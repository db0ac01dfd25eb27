//! Date Cell
//!
//! Stored as an ISO `YYYY-MM-DD` string or null. Rendering classifies the
//! date relative to today purely for styling; the stored value is untouched.

use chrono::{Duration, NaiveDate};
use serde_json::Value;

use super::{CellCommit, CellDisplay, CellDraft, CellHandler, CellValue, DATE_FORMAT};
use crate::domain::{ColumnOptions, ColumnType};

/// Styling class of a rendered date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStatus {
    Today,
    Overdue,
    /// Within the next 3 days
    Upcoming,
    Future,
}

/// Classify a date against a reference day
pub fn classify_date(date: NaiveDate, today: NaiveDate) -> DateStatus {
    if date == today {
        DateStatus::Today
    } else if date < today {
        DateStatus::Overdue
    } else if date < today + Duration::days(3) {
        DateStatus::Upcoming
    } else {
        DateStatus::Future
    }
}

pub struct DateCell;

impl CellHandler for DateCell {
    fn render(&self, raw: &Value, _options: &ColumnOptions) -> CellDisplay {
        match CellValue::from_raw(ColumnType::Date, raw) {
            Some(CellValue::Date(Some(date))) => {
                let today = chrono::Local::now().date_naive();
                CellDisplay::Date {
                    text: date.format(DATE_FORMAT).to_string(),
                    status: classify_date(date, today),
                }
            }
            _ => CellDisplay::Placeholder,
        }
    }

    fn begin_edit(&self, raw: &Value, _options: &ColumnOptions) -> CellDraft {
        match CellValue::from_raw(ColumnType::Date, raw) {
            Some(CellValue::Date(date)) => CellDraft::Date(date),
            _ => CellDraft::Date(None),
        }
    }

    fn commit(&self, draft: &CellDraft, prior: &Value, _options: &ColumnOptions) -> CellCommit {
        let CellDraft::Date(date) = draft else {
            return CellCommit::Unchanged;
        };
        let prior_date = match CellValue::from_raw(ColumnType::Date, prior) {
            Some(CellValue::Date(d)) => d,
            _ => None,
        };
        if *date == prior_date {
            return CellCommit::Unchanged;
        }
        match date {
            Some(d) => CellCommit::Value(Value::String(d.format(DATE_FORMAT).to_string())),
            None => CellCommit::Value(Value::Null),
        }
    }

    fn default_value(&self, _options: &ColumnOptions) -> Value {
        Value::Null
    }
}
