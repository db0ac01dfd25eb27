//! Number and Budget Cells
//!
//! Both share the numeric commit rules: the input is stripped down to digits
//! plus one decimal point, an empty input clears the value to null, and
//! input with no usable digits is discarded (prior value retained). Budget
//! additionally renders as currency with a three-bucket visual level; the
//! bucket never affects the stored value.

use serde_json::Value;

use super::{CellCommit, CellDisplay, CellDraft, CellHandler, CellValue};
use crate::domain::{ColumnOptions, ColumnType, NumberFormat};

/// Budget display bucket, styling only
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetLevel {
    /// >= 10_000
    High,
    /// >= 1_000
    Medium,
    Low,
}

pub fn budget_level(amount: f64) -> BudgetLevel {
    if amount >= 10_000.0 {
        BudgetLevel::High
    } else if amount >= 1_000.0 {
        BudgetLevel::Medium
    } else {
        BudgetLevel::Low
    }
}

/// Result of sanitizing free-text numeric input
#[derive(Debug, Clone, Copy, PartialEq)]
enum NumericEdit {
    /// Empty input: clear to null
    Cleared,
    Valid(f64),
    /// Nothing numeric left after stripping: keep the prior value
    Invalid,
}

/// Strip non-numeric characters, keeping at most one decimal point
fn sanitize_numeric(input: &str) -> NumericEdit {
    if input.trim().is_empty() {
        return NumericEdit::Cleared;
    }
    let mut cleaned = String::with_capacity(input.len());
    let mut seen_point = false;
    for ch in input.chars() {
        if ch.is_ascii_digit() {
            cleaned.push(ch);
        } else if ch == '.' && !seen_point {
            seen_point = true;
            cleaned.push(ch);
        }
    }
    match cleaned.parse::<f64>() {
        Ok(n) => NumericEdit::Valid(n),
        Err(_) => NumericEdit::Invalid,
    }
}

/// Plain numeric display: integral values drop the fraction
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// Currency display with comma grouping and two decimals
pub fn format_currency(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;
    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{}${}.{:02}", sign, grouped, frac)
}

fn parse_numeric(column_type: ColumnType, raw: &Value) -> Option<Option<f64>> {
    match CellValue::from_raw(column_type, raw) {
        Some(CellValue::Number(n)) | Some(CellValue::Budget(n)) => Some(n),
        _ => None,
    }
}

fn begin_numeric_edit(column_type: ColumnType, raw: &Value) -> CellDraft {
    let text = match parse_numeric(column_type, raw) {
        Some(Some(n)) => format_number(n),
        _ => String::new(),
    };
    CellDraft::Text(text)
}

fn commit_numeric(column_type: ColumnType, draft: &CellDraft, prior: &Value) -> CellCommit {
    let CellDraft::Text(input) = draft else {
        return CellCommit::Unchanged;
    };
    let prior_value = parse_numeric(column_type, prior).flatten();
    match sanitize_numeric(input) {
        NumericEdit::Cleared => {
            if prior_value.is_none() {
                CellCommit::Unchanged
            } else {
                CellCommit::Value(Value::Null)
            }
        }
        NumericEdit::Valid(n) => {
            if prior_value == Some(n) {
                CellCommit::Unchanged
            } else {
                CellCommit::Value(CellValue::Number(Some(n)).into_raw(&ColumnOptions::default()))
            }
        }
        NumericEdit::Invalid => CellCommit::Unchanged,
    }
}

pub struct NumberCell;

impl CellHandler for NumberCell {
    fn render(&self, raw: &Value, options: &ColumnOptions) -> CellDisplay {
        match parse_numeric(ColumnType::Number, raw) {
            Some(Some(n)) => match options.format {
                Some(NumberFormat::Percent) => CellDisplay::Number(format!("{}%", format_number(n))),
                _ => CellDisplay::Number(format_number(n)),
            },
            _ => CellDisplay::Placeholder,
        }
    }

    fn begin_edit(&self, raw: &Value, _options: &ColumnOptions) -> CellDraft {
        begin_numeric_edit(ColumnType::Number, raw)
    }

    fn commit(&self, draft: &CellDraft, prior: &Value, _options: &ColumnOptions) -> CellCommit {
        commit_numeric(ColumnType::Number, draft, prior)
    }

    fn default_value(&self, _options: &ColumnOptions) -> Value {
        Value::Null
    }
}

pub struct BudgetCell;

impl CellHandler for BudgetCell {
    fn render(&self, raw: &Value, _options: &ColumnOptions) -> CellDisplay {
        match parse_numeric(ColumnType::Budget, raw) {
            Some(Some(n)) => CellDisplay::Budget {
                text: format_currency(n),
                level: budget_level(n),
            },
            _ => CellDisplay::Placeholder,
        }
    }

    fn begin_edit(&self, raw: &Value, _options: &ColumnOptions) -> CellDraft {
        begin_numeric_edit(ColumnType::Budget, raw)
    }

    fn commit(&self, draft: &CellDraft, prior: &Value, _options: &ColumnOptions) -> CellCommit {
        commit_numeric(ColumnType::Budget, draft, prior)
    }

    fn default_value(&self, _options: &ColumnOptions) -> Value {
        Value::Null
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn commit_text(input: &str, prior: Value) -> CellCommit {
        NumberCell.commit(
            &CellDraft::Text(input.to_string()),
            &prior,
            &ColumnOptions::default(),
        )
    }

    #[test]
    fn test_messy_input_is_stripped() {
        assert_eq!(commit_text("1,234.5abc", Value::Null), CellCommit::Value(json!(1234.5)));
    }

    #[test]
    fn test_empty_input_clears() {
        assert_eq!(commit_text("", json!(7)), CellCommit::Value(Value::Null));
        assert_eq!(commit_text("", Value::Null), CellCommit::Unchanged);
    }

    #[test]
    fn test_invalid_input_keeps_prior() {
        assert_eq!(commit_text("abc", json!(7)), CellCommit::Unchanged);
    }

    #[test]
    fn test_second_decimal_point_dropped() {
        assert_eq!(commit_text("1.2.3", Value::Null), CellCommit::Value(json!(1.23)));
    }

    #[test]
    fn test_percent_format() {
        let options = ColumnOptions {
            format: Some(NumberFormat::Percent),
            ..Default::default()
        };
        assert_eq!(
            NumberCell.render(&json!(42.0), &options),
            CellDisplay::Number("42%".to_string())
        );
    }

    #[test]
    fn test_currency_formatting() {
        assert_eq!(format_currency(1234.5), "$1,234.50");
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(1_000_000.0), "$1,000,000.00");
    }

    #[test]
    fn test_budget_levels() {
        assert_eq!(budget_level(10_000.0), BudgetLevel::High);
        assert_eq!(budget_level(9_999.99), BudgetLevel::Medium);
        assert_eq!(budget_level(999.99), BudgetLevel::Low);
    }

    #[test]
    fn test_budget_render_carries_level() {
        assert_eq!(
            BudgetCell.render(&json!(12000.0), &ColumnOptions::default()),
            CellDisplay::Budget {
                text: "$12,000.00".to_string(),
                level: BudgetLevel::High
            }
        );
    }
}
