//! Revolving-credit statement mapping

use super::engineer::SourceMapping;
use super::rules::{guarded_ratio, number, present_numbers};
use recovery_core::{CanonicalField, CanonicalRecord, Label, RawRecord};

const REPAYMENT_STATUS_COLUMNS: [&str; 6] = ["PAY_0", "PAY_2", "PAY_3", "PAY_4", "PAY_5", "PAY_6"];
const BILL_COLUMNS: [&str; 6] = [
    "BILL_AMT1", "BILL_AMT2", "BILL_AMT3", "BILL_AMT4", "BILL_AMT5", "BILL_AMT6",
];
const PAYMENT_COLUMNS: [&str; 6] = [
    "PAY_AMT1", "PAY_AMT2", "PAY_AMT3", "PAY_AMT4", "PAY_AMT5", "PAY_AMT6",
];
const DEFAULT_FLAG_COLUMN: &str = "default payment next month";

/// Contact count assumed for every statement; the source has no contact log
const ASSUMED_COMMUNICATION_COUNT: f64 = 5.0;

/// Maps UCI credit-card default records onto the canonical schema
#[derive(Debug, Default, Clone, Copy)]
pub struct UciCreditCardMapping;

impl UciCreditCardMapping {
    pub const ID: &'static str = "uci_credit_card";

    fn credit_score(limit: Option<f64>) -> f64 {
        match limit {
            Some(limit) => 300.0 + (limit / 1000.0).clamp(0.0, 550.0),
            None => CanonicalField::CreditScore.default_value(),
        }
    }

    fn debt_to_income(bills: &[f64], limit: Option<f64>) -> f64 {
        if bills.is_empty() {
            return CanonicalField::DebtToIncomeRatio.default_value();
        }
        let mean_bill = bills.iter().sum::<f64>() / bills.len() as f64;
        guarded_ratio(mean_bill, limit.unwrap_or(1.0), 0.0, 2.0)
    }

    fn response_rate(payments: &[f64], bills: &[f64]) -> f64 {
        if payments.is_empty() || bills.is_empty() {
            return CanonicalField::ResponseRate.default_value();
        }
        guarded_ratio(payments.iter().sum(), bills.iter().sum(), 0.0, 1.0)
    }

    fn months_with_payment(payments: &[f64]) -> usize {
        payments.iter().filter(|p| **p > 0.0).count()
    }
}

impl SourceMapping for UciCreditCardMapping {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn map(&self, raw: &RawRecord) -> CanonicalRecord {
        use CanonicalField::*;

        let limit = number(raw, "LIMIT_BAL");
        let statuses = present_numbers(raw, &REPAYMENT_STATUS_COLUMNS);
        let bills = present_numbers(raw, &BILL_COLUMNS);
        let payments = present_numbers(raw, &PAYMENT_COLUMNS);

        let mut record = CanonicalRecord::with_defaults();

        // Debtor
        record.set(CreditScore, Self::credit_score(limit));
        record.set(IncomeLevel, limit.unwrap_or(IncomeLevel.default_value()));
        if let Some(education) = number(raw, "EDUCATION") {
            record.set(EmploymentStatus, education);
        }
        record.set(DebtToIncomeRatio, Self::debt_to_income(&bills, limit));
        if let Some(worst) = statuses.iter().copied().reduce(f64::max) {
            record.set(PreviousDefaults, worst);
        }

        // Case
        if let Some(latest_bill) = bills.first() {
            record.set(DebtAmount, *latest_bill);
        }
        if let Some(delay_months) = number(raw, "PAY_0") {
            record.set(DaysPastDue, (delay_months * 30.0).max(0.0));
        }
        record.set(OriginalAmount, limit.unwrap_or(OriginalAmount.default_value()));
        record.set(PaymentAttempts, Self::months_with_payment(&payments) as f64);
        record.set(CommunicationCount, ASSUMED_COMMUNICATION_COUNT);

        // Behavioral
        record.set(ResponseRate, Self::response_rate(&payments, &bills));
        if !payments.is_empty() {
            record.set(
                PartialPaymentHistory,
                Self::months_with_payment(&payments) as f64 / payments.len() as f64,
            );
        }

        record
    }

    fn label(&self, raw: &RawRecord) -> Label {
        match number(raw, DEFAULT_FLAG_COLUMN) {
            Some(flag) if flag == 0.0 => Label::Recovered,
            Some(flag) if flag == 1.0 => Label::NotRecovered,
            _ => Label::Unlabeled,
        }
    }
}
