//! Canonical feature schema
//!
//! Every source dataset is mapped onto the same fixed set of fields. The
//! field list, its grouping and the default used when a source cannot
//! supply a field are declared once here, in [`FIELD_DEFS`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of the training label column
pub const TARGET_COLUMN: &str = "recovered";

/// Feature group a canonical field belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldGroup {
    Debtor,
    Case,
    Behavioral,
}

/// Canonical feature field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalField {
    // Debtor
    CreditScore,
    IncomeLevel,
    EmploymentStatus,
    DebtToIncomeRatio,
    PreviousDefaults,
    // Case
    DebtAmount,
    DaysPastDue,
    OriginalAmount,
    PaymentAttempts,
    CommunicationCount,
    // Behavioral
    ResponseRate,
    PromiseToPayCount,
    PartialPaymentHistory,
    CommunicationPreference,
}

/// Static description of a canonical field
#[derive(Debug, Clone, Copy)]
pub struct FieldDef {
    pub field: CanonicalField,
    pub name: &'static str,
    pub group: FieldGroup,
    /// Value used when a source record cannot supply the field
    pub default: f64,
}

/// Per-field default policy, in canonical order.
pub const FIELD_DEFS: [FieldDef; CanonicalField::COUNT] = [
    FieldDef { field: CanonicalField::CreditScore, name: "credit_score", group: FieldGroup::Debtor, default: 650.0 },
    FieldDef { field: CanonicalField::IncomeLevel, name: "income_level", group: FieldGroup::Debtor, default: 0.0 },
    FieldDef { field: CanonicalField::EmploymentStatus, name: "employment_status", group: FieldGroup::Debtor, default: 1.0 },
    FieldDef { field: CanonicalField::DebtToIncomeRatio, name: "debt_to_income_ratio", group: FieldGroup::Debtor, default: 0.5 },
    FieldDef { field: CanonicalField::PreviousDefaults, name: "previous_defaults", group: FieldGroup::Debtor, default: 0.0 },
    FieldDef { field: CanonicalField::DebtAmount, name: "debt_amount", group: FieldGroup::Case, default: 0.0 },
    FieldDef { field: CanonicalField::DaysPastDue, name: "days_past_due", group: FieldGroup::Case, default: 0.0 },
    FieldDef { field: CanonicalField::OriginalAmount, name: "original_amount", group: FieldGroup::Case, default: 0.0 },
    FieldDef { field: CanonicalField::PaymentAttempts, name: "payment_attempts", group: FieldGroup::Case, default: 0.0 },
    FieldDef { field: CanonicalField::CommunicationCount, name: "communication_count", group: FieldGroup::Case, default: 0.0 },
    FieldDef { field: CanonicalField::ResponseRate, name: "response_rate", group: FieldGroup::Behavioral, default: 0.5 },
    FieldDef { field: CanonicalField::PromiseToPayCount, name: "promise_to_pay_count", group: FieldGroup::Behavioral, default: 0.0 },
    FieldDef { field: CanonicalField::PartialPaymentHistory, name: "partial_payment_history", group: FieldGroup::Behavioral, default: 0.3 },
    FieldDef { field: CanonicalField::CommunicationPreference, name: "communication_preference", group: FieldGroup::Behavioral, default: 0.0 },
];

/// Fields exposed by the serving API
pub const API_FIELDS: [CanonicalField; 5] = [
    CanonicalField::DebtAmount,
    CanonicalField::DaysPastDue,
    CanonicalField::CreditScore,
    CanonicalField::PaymentAttempts,
    CanonicalField::CommunicationCount,
];

impl CanonicalField {
    pub const COUNT: usize = 14;

    /// All fields in canonical order
    pub const ALL: [CanonicalField; Self::COUNT] = [
        CanonicalField::CreditScore,
        CanonicalField::IncomeLevel,
        CanonicalField::EmploymentStatus,
        CanonicalField::DebtToIncomeRatio,
        CanonicalField::PreviousDefaults,
        CanonicalField::DebtAmount,
        CanonicalField::DaysPastDue,
        CanonicalField::OriginalAmount,
        CanonicalField::PaymentAttempts,
        CanonicalField::CommunicationCount,
        CanonicalField::ResponseRate,
        CanonicalField::PromiseToPayCount,
        CanonicalField::PartialPaymentHistory,
        CanonicalField::CommunicationPreference,
    ];

    /// Position in canonical order
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn def(self) -> &'static FieldDef {
        &FIELD_DEFS[self.index()]
    }

    /// Column name of the field
    pub fn name(self) -> &'static str {
        self.def().name
    }

    pub fn group(self) -> FieldGroup {
        self.def().group
    }

    /// Default used when a source cannot supply the field
    pub fn default_value(self) -> f64 {
        self.def().default
    }

    /// Look a field up by column name
    pub fn from_name(name: &str) -> Option<Self> {
        FIELD_DEFS.iter().find(|def| def.name == name).map(|def| def.field)
    }

    /// Canonical column names in canonical order
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|field| field.name()).collect()
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Cross-field aggregates added by the derived-features pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DerivedField {
    /// Mean of response rate and partial payment history
    PaymentConsistency,
    /// Three-bucket aging category from days past due
    DebtAgingCategory,
    /// Blend of previous defaults and debt-to-income ratio
    RiskTrend,
}

impl DerivedField {
    pub const ALL: [DerivedField; 3] = [
        DerivedField::PaymentConsistency,
        DerivedField::DebtAgingCategory,
        DerivedField::RiskTrend,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DerivedField::PaymentConsistency => "payment_consistency",
            DerivedField::DebtAgingCategory => "debt_aging_category",
            DerivedField::RiskTrend => "risk_trend",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_defs_are_in_canonical_order() {
        for (i, field) in CanonicalField::ALL.iter().enumerate() {
            assert_eq!(field.index(), i);
            assert_eq!(FIELD_DEFS[i].field, *field);
        }
    }

    #[test]
    fn test_field_names_are_unique() {
        let mut names = CanonicalField::names();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), CanonicalField::COUNT);
    }

    #[test]
    fn test_from_name_round_trip() {
        for field in CanonicalField::ALL {
            assert_eq!(CanonicalField::from_name(field.name()), Some(field));
        }
        assert_eq!(CanonicalField::from_name("recovered"), None);
    }

    #[test]
    fn test_field_groups() {
        assert_eq!(CanonicalField::CreditScore.group(), FieldGroup::Debtor);
        assert_eq!(CanonicalField::DaysPastDue.group(), FieldGroup::Case);
        assert_eq!(CanonicalField::ResponseRate.group(), FieldGroup::Behavioral);
    }

    #[test]
    fn test_api_fields_are_canonical() {
        assert_eq!(API_FIELDS.len(), 5);
        assert!(API_FIELDS.contains(&CanonicalField::CreditScore));
    }

    #[test]
    fn test_serde_uses_column_names() {
        let json = serde_json::to_string(&CanonicalField::DebtToIncomeRatio).unwrap();
        assert_eq!(json, "\"debt_to_income_ratio\"");
        let json = serde_json::to_string(&DerivedField::DebtAgingCategory).unwrap();
        assert_eq!(json, "\"debt_aging_category\"");
    }
}
