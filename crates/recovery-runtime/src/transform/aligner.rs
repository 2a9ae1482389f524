//! Schema alignment
//!
//! Reshapes a frame to exactly the columns a fitted transform expects.
//! Alignment is total: missing columns are zero-filled, unexpected columns
//! are dropped, and nothing about the input shape is an error.

use recovery_core::{Frame, Value};

/// Neutral value for a column the input frame does not supply
pub const MISSING_COLUMN_FILL: f64 = 0.0;

/// Frame with exactly `expected` columns, in that order
pub fn align<S: AsRef<str>>(frame: &Frame, expected: &[S]) -> Frame {
    let zero_filled = expected
        .iter()
        .filter(|name| !frame.contains(name.as_ref()))
        .count();
    let dropped = frame
        .column_names()
        .into_iter()
        .filter(|name| !expected.iter().any(|e| e.as_ref() == *name))
        .count();

    if zero_filled > 0 || dropped > 0 {
        tracing::debug!(zero_filled, dropped, "Aligned frame to expected columns");
    }

    frame.reindex(expected, &Value::Number(MISSING_COLUMN_FILL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use recovery_core::Column;

    fn expected() -> Vec<&'static str> {
        vec!["credit_score", "days_past_due", "debt_amount"]
    }

    #[test]
    fn test_align_fills_and_drops() {
        let frame = Frame::from_columns(
            2,
            vec![
                Column::numeric("debt_amount", [100.0, 200.0]),
                Column::numeric("favourite_colour", [1.0, 2.0]),
                Column::numeric("credit_score", [600.0, 700.0]),
            ],
        )
        .unwrap();

        let aligned = align(&frame, &expected());
        assert_eq!(aligned.column_names(), expected());
        assert_eq!(
            aligned.column("days_past_due").unwrap().values,
            vec![Value::Number(0.0), Value::Number(0.0)]
        );
        assert_eq!(
            aligned.column("credit_score").unwrap().values,
            vec![Value::Number(600.0), Value::Number(700.0)]
        );
    }

    #[test]
    fn test_align_empty_frame_is_all_zeros() {
        let aligned = align(&Frame::new(1), &expected());
        assert_eq!(aligned.n_rows(), 1);
        assert_eq!(aligned.column_names(), expected());
        for column in aligned.columns() {
            assert_eq!(column.values, vec![Value::Number(0.0)]);
        }
    }

    #[test]
    fn test_align_to_nothing() {
        let frame = Frame::from_columns(1, vec![Column::numeric("x", [1.0])]).unwrap();
        let aligned = align::<&str>(&frame, &[]);
        assert_eq!(aligned.n_cols(), 0);
        assert_eq!(aligned.n_rows(), 1);
    }
}
