//! Feature engineering
//!
//! Source-specific mappings onto the canonical schema plus the derived
//! cross-field pass shared by training and serving.

pub mod derived;
pub mod engineer;
pub mod lending_club;
pub mod rules;
pub mod uci_credit_card;

pub use derived::{add_derived_features, aging_bucket};
pub use engineer::{FeatureEngineer, SourceDescriptor, SourceMapping, SourcedRecord};
pub use lending_club::LendingClubMapping;
pub use rules::guarded_ratio;
pub use uci_credit_card::UciCreditCardMapping;
