//! Recovery Core - Core types for the debt recovery scoring pipeline
//!
//! This crate provides the fundamental types shared by every other crate:
//! - Raw value type for heterogeneous source records
//! - Canonical feature schema and its per-field default policy
//! - Column-major frames used by training and serving
//! - Risk decision types
//! - Error types

pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::{CoreError, Result};
pub use types::{
    CanonicalField, CanonicalRecord, Column, DerivedField, FieldGroup, Frame, Label,
    LabeledRecord, RawRecord, RecommendedStrategy, RiskCategory, RiskDecision, Value,
    API_FIELDS, TARGET_COLUMN,
};
