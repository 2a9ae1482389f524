//! Categorical encoding
//!
//! Each categorical column gets a [`CodeTable`] assigning its distinct
//! values integer codes in sorted order. Values never seen at fit time map
//! to [`UNSEEN_CODE`].

use crate::error::Result;
use recovery_core::{Column, Frame, Value};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Code reserved for values absent from the fitted table
pub const UNSEEN_CODE: i64 = -1;

/// Learned value-to-code mapping for one column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeTable {
    codes: BTreeMap<String, i64>,
    unseen: i64,
}

impl CodeTable {
    /// Assign codes to the distinct values, in sorted order of their keys
    pub fn fit(values: &[Value]) -> Self {
        let distinct: BTreeSet<String> = values.iter().map(Value::category_key).collect();
        let codes = distinct
            .into_iter()
            .enumerate()
            .map(|(code, key)| (key, code as i64))
            .collect();
        Self {
            codes,
            unseen: UNSEEN_CODE,
        }
    }

    pub fn code(&self, value: &Value) -> i64 {
        self.codes
            .get(&value.category_key())
            .copied()
            .unwrap_or(self.unseen)
    }

    pub fn transform(&self, values: &[Value]) -> Vec<i64> {
        values.iter().map(|v| self.code(v)).collect()
    }

    pub fn unseen_code(&self) -> i64 {
        self.unseen
    }

    pub fn codes(&self) -> &BTreeMap<String, i64> {
        &self.codes
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

/// Code tables for every categorical column of a fitted frame
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoricalEncoder {
    tables: BTreeMap<String, CodeTable>,
}

impl CategoricalEncoder {
    /// Fit a table for each categorical column among `columns`
    pub fn fit<S: AsRef<str>>(frame: &Frame, columns: &[S]) -> Self {
        let tables = columns
            .iter()
            .filter_map(|name| frame.column(name.as_ref()))
            .filter(|column| column.is_categorical())
            .map(|column| (column.name.clone(), CodeTable::fit(&column.values)))
            .collect();
        Self { tables }
    }

    pub fn tables(&self) -> &BTreeMap<String, CodeTable> {
        &self.tables
    }

    pub fn table(&self, column: &str) -> Option<&CodeTable> {
        self.tables.get(column)
    }

    pub fn is_categorical(&self, column: &str) -> bool {
        self.tables.contains_key(column)
    }

    /// Replace every fitted categorical column with its codes
    pub fn transform(&self, frame: &Frame) -> Result<Frame> {
        let mut encoded = frame.clone();
        for (name, table) in &self.tables {
            let Some(column) = frame.column(name) else {
                continue;
            };
            let codes = table
                .transform(&column.values)
                .into_iter()
                .map(|code| Value::Number(code as f64))
                .collect();
            encoded.insert_column(Column::new(name.clone(), codes))?;
        }
        Ok(encoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(v: &[&str]) -> Vec<Value> {
        v.iter().map(|s| Value::from(*s)).collect()
    }

    #[test]
    fn test_codes_follow_sorted_order() {
        let table = CodeTable::fit(&values(&["RENT", "OWN", "MORTGAGE", "RENT"]));
        assert_eq!(table.len(), 3);
        assert_eq!(table.code(&Value::from("MORTGAGE")), 0);
        assert_eq!(table.code(&Value::from("OWN")), 1);
        assert_eq!(table.code(&Value::from("RENT")), 2);
    }

    #[test]
    fn test_fit_is_reproducible_across_input_order() {
        let a = CodeTable::fit(&values(&["b", "a", "c"]));
        let b = CodeTable::fit(&values(&["c", "b", "a", "a"]));
        assert_eq!(a, b);
    }

    #[test]
    fn test_unseen_value_maps_to_sentinel() {
        let table = CodeTable::fit(&values(&["A", "B"]));
        assert_eq!(table.code(&Value::from("Z")), UNSEEN_CODE);
        assert_eq!(table.code(&Value::Number(3.0)), UNSEEN_CODE);
        assert_eq!(table.unseen_code(), UNSEEN_CODE);
    }

    #[test]
    fn test_numeric_request_value_matches_text_key() {
        let table = CodeTable::fit(&[Value::from("1"), Value::from("2")]);
        assert_eq!(table.code(&Value::Number(2.0)), 1);
    }

    #[test]
    fn test_encoder_only_fits_categorical_columns() {
        let frame = Frame::from_columns(
            2,
            vec![
                Column::new("home_ownership", values(&["OWN", "RENT"])),
                Column::numeric("debt_amount", [1.0, 2.0]),
            ],
        )
        .unwrap();

        let encoder = CategoricalEncoder::fit(&frame, &["home_ownership", "debt_amount"]);
        assert!(encoder.is_categorical("home_ownership"));
        assert!(!encoder.is_categorical("debt_amount"));

        let encoded = encoder.transform(&frame).unwrap();
        assert_eq!(
            encoded.column("home_ownership").unwrap().values,
            vec![Value::Number(0.0), Value::Number(1.0)]
        );
        assert_eq!(encoded.column("debt_amount"), frame.column("debt_amount"));
    }
}
