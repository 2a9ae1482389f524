//! Canonical feature records

use super::schema::CanonicalField;
use super::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// A raw record from a source dataset, keyed by source column name
pub type RawRecord = HashMap<String, Value>;

/// Fixed-schema feature record.
///
/// Always exposes every canonical field; fields a source cannot supply hold
/// the field's declared default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalRecord {
    values: [f64; CanonicalField::COUNT],
}

impl CanonicalRecord {
    /// Record with every field at its declared default
    pub fn with_defaults() -> Self {
        let mut values = [0.0; CanonicalField::COUNT];
        for field in CanonicalField::ALL {
            values[field.index()] = field.default_value();
        }
        Self { values }
    }

    pub fn get(&self, field: CanonicalField) -> f64 {
        self.values[field.index()]
    }

    pub fn set(&mut self, field: CanonicalField, value: f64) {
        self.values[field.index()] = value;
    }

    /// Builder-style setter
    pub fn with(mut self, field: CanonicalField, value: f64) -> Self {
        self.set(field, value);
        self
    }

    /// Fields and values in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (CanonicalField, f64)> + '_ {
        CanonicalField::ALL
            .iter()
            .map(move |field| (*field, self.values[field.index()]))
    }

    /// Column name to value map
    pub fn to_feature_map(&self) -> BTreeMap<String, f64> {
        self.iter()
            .map(|(field, value)| (field.name().to_string(), value))
            .collect()
    }
}

impl Default for CanonicalRecord {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Training outcome of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Label {
    Recovered,
    NotRecovered,
    /// Borderline status with no defined outcome; excluded from training
    Unlabeled,
}

impl Label {
    /// Numeric target (1 recovered, 0 not recovered); `None` when unlabeled
    pub fn target(self) -> Option<f64> {
        match self {
            Label::Recovered => Some(1.0),
            Label::NotRecovered => Some(0.0),
            Label::Unlabeled => None,
        }
    }

    /// Frame cell for the label column
    pub fn to_value(self) -> Value {
        self.target().map(Value::Number).unwrap_or(Value::Null)
    }
}

/// Canonical record plus its training label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledRecord {
    pub record: CanonicalRecord,
    pub label: Label,
}

impl LabeledRecord {
    pub fn new(record: CanonicalRecord, label: Label) -> Self {
        Self { record, label }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_follow_field_policy() {
        let record = CanonicalRecord::with_defaults();
        for field in CanonicalField::ALL {
            assert_eq!(record.get(field), field.default_value());
        }
        assert_eq!(record.get(CanonicalField::CreditScore), 650.0);
    }

    #[test]
    fn test_record_exposes_every_field() {
        let record = CanonicalRecord::default().with(CanonicalField::DebtAmount, 5000.0);
        let map = record.to_feature_map();
        assert_eq!(map.len(), CanonicalField::COUNT);
        assert_eq!(map["debt_amount"], 5000.0);
    }

    #[test]
    fn test_label_targets() {
        assert_eq!(Label::Recovered.target(), Some(1.0));
        assert_eq!(Label::NotRecovered.target(), Some(0.0));
        assert_eq!(Label::Unlabeled.target(), None);
        assert_eq!(Label::Unlabeled.to_value(), Value::Null);
    }
}
