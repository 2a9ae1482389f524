//! Type definitions for the recovery pipeline

pub mod decision;
pub mod frame;
pub mod record;
pub mod schema;
pub mod value;

pub use decision::{RecommendedStrategy, RiskCategory, RiskDecision};
pub use frame::{Column, Frame};
pub use record::{CanonicalRecord, Label, LabeledRecord, RawRecord};
pub use schema::{CanonicalField, DerivedField, FieldGroup, API_FIELDS, TARGET_COLUMN};
pub use value::Value;
