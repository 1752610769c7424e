//! Derived income fields
//!
//! Pure calculation of the per-shift income figures. The owner's hourly
//! rate is an explicit argument; resolving the owner is the caller's job.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Calculation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IncomeError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// The four computed income figures attached to a shift.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedFields {
    pub total_tips: f64,
    pub base_income: f64,
    pub total_income: f64,
    pub adjusted_hourly_rate: f64,
}

/// Compute the derived income fields for one shift.
///
/// `hours_worked` must be a positive finite number; it divides the total
/// income for the adjusted rate. No rounding is applied.
pub fn calculate(
    hours_worked: f64,
    cash_tips: f64,
    card_tips: f64,
    hourly_rate: f64,
) -> Result<DerivedFields, IncomeError> {
    if !hours_worked.is_finite() || hours_worked <= 0.0 {
        return Err(IncomeError::InvalidInput(format!(
            "hours worked must be greater than zero, got {hours_worked}"
        )));
    }

    let total_tips = cash_tips + card_tips;
    let base_income = hours_worked * hourly_rate;
    let total_income = base_income + total_tips;

    Ok(DerivedFields {
        total_tips,
        base_income,
        total_income,
        adjusted_hourly_rate: total_income / hours_worked,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_derived_fields() {
        let derived = calculate(8.0, 20.0, 10.0, 15.0).unwrap();

        assert_eq!(derived.total_tips, 30.0);
        assert_eq!(derived.base_income, 120.0);
        assert_eq!(derived.total_income, 150.0);
        assert_eq!(derived.adjusted_hourly_rate, 18.75);
    }

    #[test]
    fn test_calculate_without_tips() {
        let derived = calculate(5.0, 0.0, 0.0, 12.0).unwrap();

        assert_eq!(derived.total_tips, 0.0);
        assert_eq!(derived.total_income, 60.0);
        assert_eq!(derived.adjusted_hourly_rate, 12.0);
    }

    #[test]
    fn test_calculate_rejects_zero_hours() {
        let result = calculate(0.0, 20.0, 10.0, 15.0);

        assert!(matches!(result, Err(IncomeError::InvalidInput(_))));
    }

    #[test]
    fn test_calculate_rejects_negative_hours() {
        let result = calculate(-3.0, 20.0, 10.0, 15.0);

        assert!(matches!(result, Err(IncomeError::InvalidInput(_))));
    }

    #[test]
    fn test_calculate_is_deterministic() {
        let first = calculate(7.5, 12.25, 3.75, 16.0).unwrap();
        let second = calculate(7.5, 12.25, 3.75, 16.0).unwrap();

        assert_eq!(first, second);
    }
}
