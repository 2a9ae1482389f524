//! Column-major feature frames
//!
//! A `Frame` is an ordered set of named columns of equal length. The row
//! count is stored explicitly so a frame without columns still knows how
//! many rows it describes (a serving request with no recognised fields is a
//! one-row, zero-column frame).

use super::record::{CanonicalRecord, LabeledRecord};
use super::schema::{CanonicalField, TARGET_COLUMN};
use super::value::Value;
use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// A named column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub values: Vec<Value>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Numeric column from plain numbers
    pub fn numeric(name: impl Into<String>, values: impl IntoIterator<Item = f64>) -> Self {
        Self::new(name, values.into_iter().map(Value::Number).collect())
    }

    /// A column is categorical when any of its cells holds text
    pub fn is_categorical(&self) -> bool {
        self.values.iter().any(|v| matches!(v, Value::String(_)))
    }

    /// Numeric view of every cell; `None` for missing or non-numeric cells
    pub fn numeric_values(&self) -> Vec<Option<f64>> {
        self.values.iter().map(Value::as_f64).collect()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Ordered collection of equal-length columns
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Frame {
    n_rows: usize,
    columns: Vec<Column>,
}

impl Frame {
    /// Frame with `n_rows` rows and no columns
    pub fn new(n_rows: usize) -> Self {
        Self {
            n_rows,
            columns: Vec::new(),
        }
    }

    /// Build a frame from columns, checking that all lengths agree
    pub fn from_columns(n_rows: usize, columns: Vec<Column>) -> Result<Self> {
        let mut frame = Self::new(n_rows);
        for column in columns {
            frame.insert_column(column)?;
        }
        Ok(frame)
    }

    /// One-row frame from a partial feature map.
    ///
    /// Columns are ordered by name so that frames built from equal maps are
    /// identical regardless of map iteration order.
    pub fn from_feature_map(features: &HashMap<String, f64>) -> Self {
        let names: BTreeSet<&String> = features.keys().collect();
        let columns = names
            .into_iter()
            .map(|name| Column::new(name.clone(), vec![Value::Number(features[name])]))
            .collect();
        Self { n_rows: 1, columns }
    }

    /// Frame with one canonical column per field, in canonical order
    pub fn from_records(records: &[CanonicalRecord]) -> Self {
        let columns = CanonicalField::ALL
            .iter()
            .map(|field| Column::numeric(field.name(), records.iter().map(|r| r.get(*field))))
            .collect();
        Self {
            n_rows: records.len(),
            columns,
        }
    }

    /// Canonical frame plus the label column (`Null` for unlabeled rows)
    pub fn from_labeled_records(records: &[LabeledRecord]) -> Self {
        let canonical: Vec<CanonicalRecord> = records.iter().map(|r| r.record.clone()).collect();
        let mut frame = Self::from_records(&canonical);
        frame.columns.push(Column::new(
            TARGET_COLUMN,
            records.iter().map(|r| r.label.to_value()).collect(),
        ));
        frame
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Insert a column, replacing an existing column of the same name in place
    pub fn insert_column(&mut self, column: Column) -> Result<()> {
        if column.len() != self.n_rows {
            return Err(CoreError::LengthMismatch {
                column: column.name,
                expected: self.n_rows,
                actual: column.values.len(),
            });
        }

        match self.columns.iter_mut().find(|c| c.name == column.name) {
            Some(existing) => *existing = column,
            None => self.columns.push(column),
        }
        Ok(())
    }

    pub fn remove_column(&mut self, name: &str) -> Option<Column> {
        let position = self.columns.iter().position(|c| c.name == name)?;
        Some(self.columns.remove(position))
    }

    /// Frame with exactly the named columns, in order.
    ///
    /// Columns absent from `self` are filled with `fill`; columns not named
    /// are left out.
    pub fn reindex<S: AsRef<str>>(&self, names: &[S], fill: &Value) -> Frame {
        let columns = names
            .iter()
            .map(|name| match self.column(name.as_ref()) {
                Some(column) => column.clone(),
                None => Column::new(name.as_ref(), vec![fill.clone(); self.n_rows]),
            })
            .collect();
        Frame {
            n_rows: self.n_rows,
            columns,
        }
    }

    /// Keep only the given rows, in the given order
    pub fn select_rows(&self, indices: &[usize]) -> Frame {
        let columns = self
            .columns
            .iter()
            .map(|c| {
                Column::new(
                    c.name.clone(),
                    indices.iter().map(|&i| c.values[i].clone()).collect(),
                )
            })
            .collect();
        Frame {
            n_rows: indices.len(),
            columns,
        }
    }

    /// Stack frames vertically.
    ///
    /// The result has the union of all column names (first-seen order);
    /// cells of a column absent from one input frame are `Null`.
    pub fn concat(frames: &[Frame]) -> Frame {
        let mut names: Vec<String> = Vec::new();
        for frame in frames {
            for column in &frame.columns {
                if !names.contains(&column.name) {
                    names.push(column.name.clone());
                }
            }
        }

        let n_rows = frames.iter().map(|f| f.n_rows).sum();
        let columns = names
            .into_iter()
            .map(|name| {
                let mut values = Vec::with_capacity(n_rows);
                for frame in frames {
                    match frame.column(&name) {
                        Some(column) => values.extend(column.values.iter().cloned()),
                        None => values.extend(std::iter::repeat(Value::Null).take(frame.n_rows)),
                    }
                }
                Column::new(name, values)
            })
            .collect();

        Frame { n_rows, columns }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::record::Label;

    #[test]
    fn test_insert_rejects_wrong_length() {
        let mut frame = Frame::new(2);
        let err = frame
            .insert_column(Column::numeric("debt_amount", [1.0]))
            .unwrap_err();
        assert!(matches!(err, CoreError::LengthMismatch { expected: 2, actual: 1, .. }));
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut frame = Frame::new(1);
        frame.insert_column(Column::numeric("a", [1.0])).unwrap();
        frame.insert_column(Column::numeric("b", [2.0])).unwrap();
        frame.insert_column(Column::numeric("a", [3.0])).unwrap();

        assert_eq!(frame.column_names(), vec!["a", "b"]);
        assert_eq!(frame.column("a").unwrap().values[0], Value::Number(3.0));
    }

    #[test]
    fn test_from_feature_map_is_sorted() {
        let mut features = HashMap::new();
        features.insert("days_past_due".to_string(), 45.0);
        features.insert("credit_score".to_string(), 650.0);

        let frame = Frame::from_feature_map(&features);
        assert_eq!(frame.n_rows(), 1);
        assert_eq!(frame.column_names(), vec!["credit_score", "days_past_due"]);
    }

    #[test]
    fn test_from_labeled_records_adds_target() {
        let records = vec![
            LabeledRecord::new(CanonicalRecord::default(), Label::Recovered),
            LabeledRecord::new(CanonicalRecord::default(), Label::Unlabeled),
        ];
        let frame = Frame::from_labeled_records(&records);

        assert_eq!(frame.n_cols(), CanonicalField::COUNT + 1);
        let target = frame.column(TARGET_COLUMN).unwrap();
        assert_eq!(target.values, vec![Value::Number(1.0), Value::Null]);
    }

    #[test]
    fn test_concat_unions_columns() {
        let a = Frame::from_columns(1, vec![Column::numeric("x", [1.0])]).unwrap();
        let b = Frame::from_columns(2, vec![Column::numeric("y", [2.0, 3.0])]).unwrap();

        let merged = Frame::concat(&[a, b]);
        assert_eq!(merged.n_rows(), 3);
        assert_eq!(
            merged.column("x").unwrap().values,
            vec![Value::Number(1.0), Value::Null, Value::Null]
        );
        assert_eq!(
            merged.column("y").unwrap().values,
            vec![Value::Null, Value::Number(2.0), Value::Number(3.0)]
        );
    }

    #[test]
    fn test_select_rows() {
        let frame = Frame::from_columns(3, vec![Column::numeric("x", [1.0, 2.0, 3.0])]).unwrap();
        let picked = frame.select_rows(&[2, 0]);
        assert_eq!(picked.n_rows(), 2);
        assert_eq!(
            picked.column("x").unwrap().values,
            vec![Value::Number(3.0), Value::Number(1.0)]
        );
    }

    #[test]
    fn test_categorical_detection() {
        let col = Column::new("grade", vec![Value::from("A"), Value::Null]);
        assert!(col.is_categorical());
        assert!(!Column::numeric("x", [1.0]).is_categorical());
    }
}
