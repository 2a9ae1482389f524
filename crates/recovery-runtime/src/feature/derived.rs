//! Derived cross-field features
//!
//! Each derived column is recomputed from its base columns and replaces any
//! existing column of the same name, so running the pass twice yields the
//! same frame. A derived column is only produced when all of its inputs are
//! present; a row with a missing input gets a `Null` cell.

use crate::error::Result;
use recovery_core::{CanonicalField, Column, DerivedField, Frame, Value};

/// Aging bucket for days past due: up to 30 days is 0, up to 90 is 1, beyond is 2
pub fn aging_bucket(days_past_due: f64) -> f64 {
    if days_past_due <= 30.0 {
        0.0
    } else if days_past_due <= 90.0 {
        1.0
    } else {
        2.0
    }
}

/// Add the derived columns to a frame
pub fn add_derived_features(frame: &mut Frame) -> Result<()> {
    let response = numeric(frame, CanonicalField::ResponseRate);
    let partial = numeric(frame, CanonicalField::PartialPaymentHistory);
    if let (Some(response), Some(partial)) = (response, partial) {
        let values = combine(&response, &partial, |r, p| (r + p) / 2.0);
        frame.insert_column(Column::new(DerivedField::PaymentConsistency.name(), values))?;
    }

    if let Some(days) = numeric(frame, CanonicalField::DaysPastDue) {
        let values = days
            .iter()
            .map(|d| d.map(aging_bucket).map(Value::Number).unwrap_or(Value::Null))
            .collect();
        frame.insert_column(Column::new(DerivedField::DebtAgingCategory.name(), values))?;
    }

    let defaults = numeric(frame, CanonicalField::PreviousDefaults);
    let dti = numeric(frame, CanonicalField::DebtToIncomeRatio);
    if let (Some(defaults), Some(dti)) = (defaults, dti) {
        let values = combine(&defaults, &dti, |d, r| 0.5 * d + 0.5 * r);
        frame.insert_column(Column::new(DerivedField::RiskTrend.name(), values))?;
    }

    Ok(())
}

fn numeric(frame: &Frame, field: CanonicalField) -> Option<Vec<Option<f64>>> {
    frame.column(field.name()).map(Column::numeric_values)
}

fn combine(
    left: &[Option<f64>],
    right: &[Option<f64>],
    f: impl Fn(f64, f64) -> f64,
) -> Vec<Value> {
    left.iter()
        .zip(right)
        .map(|(l, r)| match (l, r) {
            (Some(l), Some(r)) => Value::Number(f(*l, *r)),
            _ => Value::Null,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aging_boundaries() {
        assert_eq!(aging_bucket(0.0), 0.0);
        assert_eq!(aging_bucket(30.0), 0.0);
        assert_eq!(aging_bucket(30.5), 1.0);
        assert_eq!(aging_bucket(90.0), 1.0);
        assert_eq!(aging_bucket(91.0), 2.0);
        assert_eq!(aging_bucket(5000.0), 2.0);
    }

    #[test]
    fn test_payment_consistency_and_risk_trend() {
        let mut frame = Frame::from_columns(
            1,
            vec![
                Column::numeric("response_rate", [0.8]),
                Column::numeric("partial_payment_history", [0.4]),
                Column::numeric("previous_defaults", [2.0]),
                Column::numeric("debt_to_income_ratio", [0.6]),
            ],
        )
        .unwrap();

        add_derived_features(&mut frame).unwrap();

        let consistency = frame.column("payment_consistency").unwrap().numeric_values();
        assert!((consistency[0].unwrap() - 0.6).abs() < 1e-12);
        let trend = frame.column("risk_trend").unwrap().numeric_values();
        assert!((trend[0].unwrap() - 1.3).abs() < 1e-12);
        assert!(!frame.contains("debt_aging_category"));
    }

    #[test]
    fn test_missing_inputs_skip_column() {
        let mut frame =
            Frame::from_columns(1, vec![Column::numeric("response_rate", [0.8])]).unwrap();
        add_derived_features(&mut frame).unwrap();
        assert_eq!(frame.column_names(), vec!["response_rate"]);
    }

    #[test]
    fn test_null_input_cell_gives_null() {
        let mut frame = Frame::from_columns(
            2,
            vec![Column::new("days_past_due", vec![Value::Number(45.0), Value::Null])],
        )
        .unwrap();
        add_derived_features(&mut frame).unwrap();
        assert_eq!(
            frame.column("debt_aging_category").unwrap().values,
            vec![Value::Number(1.0), Value::Null]
        );
    }
}
