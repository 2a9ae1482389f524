//! Installment-loan ledger mapping

use super::engineer::SourceMapping;
use super::rules::{
    first_number, guarded_ratio, lookup, number, text, GRADE_SCORES, LOAN_STATUS_DAYS,
    NOT_RECOVERED_STATUSES, RECOVERED_STATUSES, SUB_GRADE_ADJUSTMENTS,
};
use recovery_core::{CanonicalField, CanonicalRecord, Label, RawRecord, Value};

/// Maps Lending Club loan records onto the canonical schema
#[derive(Debug, Default, Clone, Copy)]
pub struct LendingClubMapping;

impl LendingClubMapping {
    pub const ID: &'static str = "lending_club";

    fn credit_score(raw: &RawRecord) -> f64 {
        let Some(grade) = raw.get("grade") else {
            return CanonicalField::CreditScore.default_value();
        };

        let base = grade
            .as_str()
            .and_then(|g| lookup(GRADE_SCORES, g))
            .unwrap_or(CanonicalField::CreditScore.default_value());

        let adjustment = text(raw, "sub_grade")
            .and_then(|s| s.chars().last())
            .and_then(|digit| {
                SUB_GRADE_ADJUSTMENTS
                    .iter()
                    .find(|(d, _)| *d == digit)
                    .map(|(_, adj)| *adj)
            })
            .unwrap_or(0.0);

        base + adjustment
    }

    fn employment_status(raw: &RawRecord) -> f64 {
        let Some(emp_length) = raw.get("emp_length") else {
            return CanonicalField::EmploymentStatus.default_value();
        };
        if emp_length.is_null() {
            return 0.0;
        }

        let key = emp_length.category_key();
        if key == "n/a" {
            0.0
        } else if key.contains("10+") {
            2.0
        } else if key.chars().any(|c| ('1'..='9').contains(&c)) {
            1.0
        } else {
            0.0
        }
    }

    fn days_past_due(raw: &RawRecord) -> f64 {
        text(raw, "loan_status")
            .and_then(|status| lookup(LOAN_STATUS_DAYS, status))
            .unwrap_or(0.0)
    }

    /// Share of the funded amount covered by `numerator_column`
    fn funded_share(raw: &RawRecord, numerator_column: &str, field: CanonicalField) -> f64 {
        match number(raw, numerator_column) {
            Some(paid) => {
                let funded = number(raw, "funded_amnt").unwrap_or(1.0);
                guarded_ratio(paid, funded, 0.0, 1.0)
            }
            None => field.default_value(),
        }
    }

    fn or_default(raw: &RawRecord, column: &str, field: CanonicalField) -> f64 {
        number(raw, column).unwrap_or(field.default_value())
    }
}

impl SourceMapping for LendingClubMapping {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn map(&self, raw: &RawRecord) -> CanonicalRecord {
        use CanonicalField::*;

        let mut record = CanonicalRecord::with_defaults();

        // Debtor
        record.set(CreditScore, Self::credit_score(raw));
        record.set(IncomeLevel, Self::or_default(raw, "annual_inc", IncomeLevel));
        record.set(EmploymentStatus, Self::employment_status(raw));
        if let Some(dti) = number(raw, "dti") {
            record.set(DebtToIncomeRatio, dti / 100.0);
        }
        record.set(PreviousDefaults, Self::or_default(raw, "delinq_2yrs", PreviousDefaults));

        // Case
        record.set(
            DebtAmount,
            first_number(raw, &["out_prncp", "loan_amnt"]).unwrap_or(DebtAmount.default_value()),
        );
        record.set(DaysPastDue, Self::days_past_due(raw));
        record.set(
            OriginalAmount,
            first_number(raw, &["funded_amnt", "loan_amnt"])
                .unwrap_or(OriginalAmount.default_value()),
        );
        record.set(PaymentAttempts, Self::or_default(raw, "total_acc", PaymentAttempts));
        record.set(
            CommunicationCount,
            Self::or_default(raw, "inq_last_6mths", CommunicationCount),
        );

        // Behavioral
        record.set(ResponseRate, Self::funded_share(raw, "total_pymnt", ResponseRate));
        record.set(PromiseToPayCount, Self::or_default(raw, "pub_rec", PromiseToPayCount));
        record.set(
            PartialPaymentHistory,
            Self::funded_share(raw, "total_rec_prncp", PartialPaymentHistory),
        );

        record
    }

    fn label(&self, raw: &RawRecord) -> Label {
        match raw.get("loan_status").and_then(Value::as_str) {
            Some(status) if RECOVERED_STATUSES.contains(&status) => Label::Recovered,
            Some(status) if NOT_RECOVERED_STATUSES.contains(&status) => Label::NotRecovered,
            _ => Label::Unlabeled,
        }
    }
}
