//! FILENAME: engine/src/value.rs
//! PURPOSE: Defines the dynamically-typed field value and its total order.
//! CONTEXT: Records are schemaless, so every field read produces a
//! `FieldValue`. Sorting and grouping rely on `compare_values` giving a
//! total order across all variants, including mixed-type columns.

use std::cmp::Ordering;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// The value stored in a single record field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    Empty,
    Number(f64),
    Text(String),
    Boolean(bool),
    Date(NaiveDateTime),
}

impl FieldValue {
    pub fn text(s: impl Into<String>) -> Self {
        FieldValue::Text(s.into())
    }

    /// Returns true if the value is `Empty`.
    pub fn is_empty(&self) -> bool {
        matches!(self, FieldValue::Empty)
    }

    /// Returns the display text of the value as a String.
    /// This is what free-text search matches against and what grouping
    /// uses as the bucket key.
    pub fn display_value(&self) -> String {
        match self {
            FieldValue::Empty => String::new(),
            FieldValue::Number(n) => {
                // Format without unnecessary decimal places
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{:.0}", n)
                } else {
                    format!("{}", n)
                }
            }
            FieldValue::Text(s) => s.clone(),
            FieldValue::Boolean(b) => {
                if *b { "TRUE" } else { "FALSE" }.to_string()
            }
            FieldValue::Date(d) => d.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Empty
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}

/// Total order over field values.
///
/// `Empty` (including reads of missing fields) is the minimal value, so it
/// sorts first ascending. Numbers compare numerically (NaN ties as Equal),
/// dates chronologically, text lexically, booleans false before true.
/// Cross-type comparisons fall back to a fixed variant rank
/// (Empty < Number < Date < Text < Boolean) so mixed columns still order
/// deterministically.
pub fn compare_values(a: &FieldValue, b: &FieldValue) -> Ordering {
    match (a, b) {
        (FieldValue::Empty, FieldValue::Empty) => Ordering::Equal,
        (FieldValue::Empty, _) => Ordering::Less,
        (_, FieldValue::Empty) => Ordering::Greater,

        (FieldValue::Number(na), FieldValue::Number(nb)) => {
            na.partial_cmp(nb).unwrap_or(Ordering::Equal)
        }
        (FieldValue::Number(_), _) => Ordering::Less,
        (_, FieldValue::Number(_)) => Ordering::Greater,

        (FieldValue::Date(da), FieldValue::Date(db)) => da.cmp(db),
        (FieldValue::Date(_), _) => Ordering::Less,
        (_, FieldValue::Date(_)) => Ordering::Greater,

        (FieldValue::Text(ta), FieldValue::Text(tb)) => ta.cmp(tb),
        (FieldValue::Text(_), _) => Ordering::Less,
        (_, FieldValue::Text(_)) => Ordering::Greater,

        (FieldValue::Boolean(ba), FieldValue::Boolean(bb)) => ba.cmp(bb),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn empty_is_minimal() {
        assert_eq!(
            compare_values(&FieldValue::Empty, &FieldValue::Number(-1e9)),
            Ordering::Less
        );
        assert_eq!(
            compare_values(&FieldValue::text(""), &FieldValue::Empty),
            Ordering::Greater
        );
    }

    #[test]
    fn numbers_compare_numerically() {
        assert_eq!(
            compare_values(&FieldValue::Number(2.0), &FieldValue::Number(10.0)),
            Ordering::Less
        );
        // NaN ties instead of poisoning the order
        assert_eq!(
            compare_values(&FieldValue::Number(f64::NAN), &FieldValue::Number(1.0)),
            Ordering::Equal
        );
    }

    #[test]
    fn dates_compare_chronologically() {
        let early = FieldValue::Date(
            NaiveDate::from_ymd_opt(2023, 1, 15).unwrap().and_hms_opt(0, 0, 0).unwrap(),
        );
        let late = FieldValue::Date(
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap().and_hms_opt(0, 0, 0).unwrap(),
        );
        assert_eq!(compare_values(&early, &late), Ordering::Less);
    }

    #[test]
    fn cross_type_rank_is_fixed() {
        let number = FieldValue::Number(99.0);
        let text = FieldValue::text("abc");
        let boolean = FieldValue::Boolean(false);
        assert_eq!(compare_values(&number, &text), Ordering::Less);
        assert_eq!(compare_values(&text, &boolean), Ordering::Less);
        assert_eq!(compare_values(&boolean, &number), Ordering::Greater);
    }

    #[test]
    fn display_value_trims_integral_numbers() {
        assert_eq!(FieldValue::Number(42.0).display_value(), "42");
        assert_eq!(FieldValue::Number(1.5).display_value(), "1.5");
        assert_eq!(FieldValue::Boolean(true).display_value(), "TRUE");
        assert_eq!(FieldValue::Empty.display_value(), "");
    }
}
