//! Mapping rules shared by the source mappings
//!
//! Lookup tables are fixed and baked into the engineer. Raw column access is
//! tolerant: an absent, null or non-numeric column reads as `None` and the
//! caller falls back to the field's declared default.

use recovery_core::{RawRecord, Value};

/// Loan grade to approximate credit score
pub const GRADE_SCORES: &[(&str, f64)] = &[
    ("A", 720.0),
    ("B", 680.0),
    ("C", 640.0),
    ("D", 600.0),
    ("E", 560.0),
    ("F", 520.0),
    ("G", 480.0),
];

/// Sub-grade digit (last character) to score adjustment
pub const SUB_GRADE_ADJUSTMENTS: &[(char, f64)] = &[
    ('1', 10.0),
    ('2', 5.0),
    ('3', 0.0),
    ('4', -5.0),
    ('5', -10.0),
];

/// Loan status to estimated days past due; unmapped statuses count as 0
pub const LOAN_STATUS_DAYS: &[(&str, f64)] = &[
    ("Current", 0.0),
    ("Fully Paid", 0.0),
    ("In Grace Period", 15.0),
    ("Late (16-30 days)", 23.0),
    ("Late (31-120 days)", 75.0),
    ("Default", 150.0),
    ("Charged Off", 180.0),
];

/// Loan statuses that count as recovered
pub const RECOVERED_STATUSES: &[&str] = &["Fully Paid", "Current"];

/// Loan statuses that count as not recovered
pub const NOT_RECOVERED_STATUSES: &[&str] = &["Charged Off", "Default", "Late (31-120 days)"];

pub(crate) fn lookup<V: Copy>(table: &[(&str, V)], key: &str) -> Option<V> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

/// Numeric value of a source column
pub(crate) fn number(raw: &RawRecord, column: &str) -> Option<f64> {
    raw.get(column).and_then(Value::as_f64)
}

/// First numeric value among candidate columns
pub(crate) fn first_number(raw: &RawRecord, columns: &[&str]) -> Option<f64> {
    columns.iter().find_map(|column| number(raw, column))
}

/// Text value of a source column
pub(crate) fn text<'a>(raw: &'a RawRecord, column: &str) -> Option<&'a str> {
    raw.get(column).and_then(Value::as_str)
}

/// Numeric values of every candidate column present in the record
pub(crate) fn present_numbers(raw: &RawRecord, columns: &[&str]) -> Vec<f64> {
    columns.iter().filter_map(|column| number(raw, column)).collect()
}

/// Ratio with the zero-denominator policy applied.
///
/// A zero denominator is replaced by 1 before dividing, and the result is
/// clipped to `[min, max]`, so the output is always finite.
pub fn guarded_ratio(numerator: f64, denominator: f64, min: f64, max: f64) -> f64 {
    let denominator = if denominator == 0.0 { 1.0 } else { denominator };
    let ratio = numerator / denominator;
    if ratio.is_nan() {
        return min;
    }
    ratio.clamp(min, max)
}
