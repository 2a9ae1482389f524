//! Unit tests for recovery-core types

use recovery_core::{
    CanonicalField, CanonicalRecord, Column, Frame, Label, LabeledRecord, Value, TARGET_COLUMN,
};
use std::collections::HashMap;

#[test]
fn test_canonical_frame_has_fixed_field_set() {
    let records = vec![
        CanonicalRecord::default().with(CanonicalField::DebtAmount, 1000.0),
        CanonicalRecord::default().with(CanonicalField::DebtAmount, 2500.0),
    ];
    let frame = Frame::from_records(&records);

    assert_eq!(frame.n_rows(), 2);
    assert_eq!(frame.column_names(), CanonicalField::names());
    assert_eq!(
        frame.column("debt_amount").unwrap().values,
        vec![Value::Number(1000.0), Value::Number(2500.0)]
    );
}

#[test]
fn test_labeled_frame_keeps_unlabeled_rows_as_null() {
    let records = vec![
        LabeledRecord::new(CanonicalRecord::default(), Label::NotRecovered),
        LabeledRecord::new(CanonicalRecord::default(), Label::Unlabeled),
        LabeledRecord::new(CanonicalRecord::default(), Label::Recovered),
    ];
    let frame = Frame::from_labeled_records(&records);
    let target = frame.column(TARGET_COLUMN).unwrap();

    assert_eq!(target.numeric_values(), vec![Some(0.0), None, Some(1.0)]);
}

#[test]
fn test_empty_feature_map_is_one_row_without_columns() {
    let frame = Frame::from_feature_map(&HashMap::new());
    assert_eq!(frame.n_rows(), 1);
    assert_eq!(frame.n_cols(), 0);
}

#[test]
fn test_frame_round_trips_through_json() {
    let frame = Frame::from_columns(
        2,
        vec![
            Column::numeric("credit_score", [640.0, 700.0]),
            Column::new("grade", vec![Value::from("C"), Value::Null]),
        ],
    )
    .unwrap();

    let json = serde_json::to_string(&frame).unwrap();
    let restored: Frame = serde_json::from_str(&json).unwrap();
    assert_eq!(frame, restored);
}
