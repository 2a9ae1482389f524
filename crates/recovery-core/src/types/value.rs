//! Raw value types for source records
//!
//! The `Value` enum represents a single cell of a raw dataset record or of
//! a feature frame. Source datasets mix numbers, grade letters and status
//! strings, so records are kept untyped until the feature engineer maps
//! them onto the canonical schema.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Raw cell value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Missing value
    Null,
    /// Boolean value
    Bool(bool),
    /// Number value (f64 for simplicity, handles both int and float)
    Number(f64),
    /// String value
    String(String),
    /// Array of values
    Array(Vec<Value>),
    /// Object (key-value map)
    Object(HashMap<String, Value>),
}

impl Value {
    /// Numeric view of the value.
    ///
    /// Booleans count as 1/0. Strings, arrays and objects have no numeric view,
    /// and neither does a non-finite number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) if n.is_finite() => Some(*n),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            _ => None,
        }
    }

    /// String view of the value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Key used by the categorical encoder.
    ///
    /// Every value kind has a stable textual key so that a categorical column
    /// can be encoded even when a serving request supplies it as a number.
    pub fn category_key(&self) -> String {
        match self {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "{}", s),
            Value::Array(_) | Value::Object(_) => {
                let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
                write!(f, "{}", json)
            }
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_number() {
        let val = Value::Number(42.0);
        assert_eq!(val.as_f64(), Some(42.0));
        assert_eq!(val.as_str(), None);
    }

    #[test]
    fn test_value_non_finite_has_no_numeric_view() {
        assert_eq!(Value::Number(f64::NAN).as_f64(), None);
        assert_eq!(Value::Number(f64::INFINITY).as_f64(), None);
    }

    #[test]
    fn test_value_bool_numeric_view() {
        assert_eq!(Value::Bool(true).as_f64(), Some(1.0));
        assert_eq!(Value::Bool(false).as_f64(), Some(0.0));
    }

    #[test]
    fn test_value_string() {
        let val = Value::from("B3");
        assert_eq!(val.as_str(), Some("B3"));
        assert_eq!(val.as_f64(), None);
        assert!(!val.is_null());
    }

    #[test]
    fn test_category_key() {
        assert_eq!(Value::from("RENT").category_key(), "RENT");
        assert_eq!(Value::Number(2.0).category_key(), "2");
        assert_eq!(Value::Number(2.5).category_key(), "2.5");
        assert_eq!(Value::Null.category_key(), "null");
    }

    #[test]
    fn test_value_serde_json() {
        let mut map = HashMap::new();
        map.insert("grade".to_string(), Value::from("A"));
        map.insert("loan_amnt".to_string(), Value::Number(12000.0));
        map.insert("emp_length".to_string(), Value::Null);
        let val = Value::Object(map);

        let json = serde_json::to_string(&val).unwrap();
        assert!(json.contains("loan_amnt"));
        assert!(json.contains("12000"));

        let deserialized: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(val, deserialized);
    }
}
