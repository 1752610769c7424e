//! Shift tracking models
//!
//! Domain models for shifts and their owning users.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::income::{self, DerivedFields, IncomeError};

/// A single recorded work shift with tips.
///
/// The four derived fields are recomputed from the raw fields and the
/// owner's hourly rate before every save; they are never set directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shift {
    pub id: Option<i64>,
    /// Owning user, immutable after creation
    pub user_id: String,
    /// Calendar day the shift occurred
    pub date: NaiveDate,
    pub hours_worked: f64,
    pub cash_tips: f64,
    pub card_tips: f64,
    pub total_tips: f64,
    pub base_income: f64,
    pub total_income: f64,
    pub adjusted_hourly_rate: f64,
    pub created_at: Option<DateTime<Utc>>,
}

impl Shift {
    /// Create a new shift with zeroed derived fields.
    pub fn new(
        user_id: String,
        date: NaiveDate,
        hours_worked: f64,
        cash_tips: f64,
        card_tips: f64,
    ) -> Self {
        Self {
            id: None,
            user_id,
            date,
            hours_worked,
            cash_tips,
            card_tips,
            total_tips: 0.0,
            base_income: 0.0,
            total_income: 0.0,
            adjusted_hourly_rate: 0.0,
            created_at: None,
        }
    }

    /// Recompute the derived fields from the current raw fields and the
    /// owner's current hourly rate.
    pub fn recalculate(&mut self, hourly_rate: f64) -> Result<(), IncomeError> {
        let derived =
            income::calculate(self.hours_worked, self.cash_tips, self.card_tips, hourly_rate)?;
        self.apply(derived);
        Ok(())
    }

    fn apply(&mut self, derived: DerivedFields) {
        self.total_tips = derived.total_tips;
        self.base_income = derived.base_income;
        self.total_income = derived.total_income;
        self.adjusted_hourly_rate = derived.adjusted_hourly_rate;
    }
}

/// Editable fields of a shift as submitted by a client.
///
/// Used for creation and for full replacement on update. Omitted tips
/// default to zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftDraft {
    pub date: String,
    pub hours_worked: f64,
    #[serde(default)]
    pub cash_tips: f64,
    #[serde(default)]
    pub card_tips: f64,
}

/// Owning user, managed outside this service.
///
/// Only the fields the income calculation needs are modeled here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub hourly_rate: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recalculate_writes_derived_fields() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let mut shift = Shift::new("user1".to_string(), date, 8.0, 20.0, 10.0);

        shift.recalculate(15.0).unwrap();

        assert_eq!(shift.total_tips, 30.0);
        assert_eq!(shift.base_income, 120.0);
        assert_eq!(shift.total_income, 150.0);
        assert_eq!(shift.adjusted_hourly_rate, 18.75);
    }

    #[test]
    fn test_draft_tips_default_to_zero() {
        let draft: ShiftDraft =
            serde_json::from_str(r#"{"date":"2024-01-15","hoursWorked":8}"#).unwrap();

        assert_eq!(draft.hours_worked, 8.0);
        assert_eq!(draft.cash_tips, 0.0);
        assert_eq!(draft.card_tips, 0.0);
    }

    #[test]
    fn test_shift_serializes_camel_case() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let mut shift = Shift::new("user1".to_string(), date, 8.0, 20.0, 10.0);
        shift.recalculate(15.0).unwrap();

        let value = serde_json::to_value(&shift).unwrap();
        assert_eq!(value["hoursWorked"], 8.0);
        assert_eq!(value["adjustedHourlyRate"], 18.75);
        assert_eq!(value["userId"], "user1");
    }
}
