//! Shift statistics
//!
//! Single-pass aggregation over a user's shifts. The tax rate is a
//! parameter so deployments can match their jurisdiction.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::Shift;

/// Reference tax deduction applied to total income.
pub const DEFAULT_TAX_RATE: f64 = 0.08;

/// Largest tip seen for one payment kind, with the day it happened.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighestTip {
    pub amount: f64,
    pub date: Option<NaiveDate>,
}

/// Summary statistics over a set of shifts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftStats {
    pub total_shifts: usize,
    pub total_income: f64,
    pub total_cash_tips: f64,
    pub total_card_tips: f64,
    pub total_combined_tips: f64,
    pub average_hourly_rate: f64,
    pub average_cash_tips_per_shift: f64,
    pub average_card_tips_per_shift: f64,
    pub highest_cash_tips: HighestTip,
    pub highest_card_tips: HighestTip,
    pub total_income_after_tax: f64,
    pub total_hours_worked: f64,
}

/// Aggregate statistics over shifts in a single pass.
///
/// Accepts any finite sequence, including an empty one. Averages guard
/// their divisors and report 0 rather than dividing by zero. Exact ties
/// for the highest tips keep the first shift in input order.
pub fn aggregate(shifts: &[Shift], tax_rate: f64) -> ShiftStats {
    let mut stats = ShiftStats {
        total_shifts: shifts.len(),
        ..ShiftStats::default()
    };

    for shift in shifts {
        stats.total_income += shift.total_income;
        stats.total_cash_tips += shift.cash_tips;
        stats.total_card_tips += shift.card_tips;
        stats.total_hours_worked += shift.hours_worked;

        if shift.cash_tips > stats.highest_cash_tips.amount {
            stats.highest_cash_tips = HighestTip {
                amount: shift.cash_tips,
                date: Some(shift.date),
            };
        }
        if shift.card_tips > stats.highest_card_tips.amount {
            stats.highest_card_tips = HighestTip {
                amount: shift.card_tips,
                date: Some(shift.date),
            };
        }
    }

    stats.total_combined_tips = stats.total_cash_tips + stats.total_card_tips;
    if stats.total_shifts > 0 {
        stats.average_cash_tips_per_shift = stats.total_cash_tips / stats.total_shifts as f64;
        stats.average_card_tips_per_shift = stats.total_card_tips / stats.total_shifts as f64;
    }
    if stats.total_hours_worked > 0.0 {
        stats.average_hourly_rate = stats.total_income / stats.total_hours_worked;
    }
    stats.total_income_after_tax = stats.total_income * (1.0 - tax_rate);

    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shift(date: NaiveDate, hours: f64, cash: f64, card: f64, rate: f64) -> Shift {
        let mut shift = Shift::new("user1".to_string(), date, hours, cash, card);
        shift.recalculate(rate).unwrap();
        shift
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn test_aggregate_empty() {
        let stats = aggregate(&[], DEFAULT_TAX_RATE);

        assert_eq!(stats.total_shifts, 0);
        assert_eq!(stats.total_income, 0.0);
        assert_eq!(stats.total_hours_worked, 0.0);
        assert_eq!(stats.average_hourly_rate, 0.0);
        assert_eq!(stats.average_cash_tips_per_shift, 0.0);
        assert_eq!(stats.average_card_tips_per_shift, 0.0);
        assert_eq!(stats.highest_cash_tips, HighestTip::default());
        assert_eq!(stats.highest_card_tips, HighestTip::default());
        assert_eq!(stats.total_income_after_tax, 0.0);
    }

    #[test]
    fn test_aggregate_two_shifts() {
        let shifts = vec![
            shift(day(15), 8.0, 20.0, 10.0, 15.0),
            shift(day(16), 5.0, 5.0, 0.0, 15.0),
        ];

        let stats = aggregate(&shifts, DEFAULT_TAX_RATE);

        assert_eq!(stats.total_shifts, 2);
        assert_eq!(stats.total_income, 230.0);
        assert_eq!(stats.total_cash_tips, 25.0);
        assert_eq!(stats.total_card_tips, 10.0);
        assert_eq!(stats.total_combined_tips, 35.0);
        assert_eq!(stats.total_hours_worked, 13.0);
        assert!((stats.average_hourly_rate - 230.0 / 13.0).abs() < 1e-9);
        assert_eq!(stats.average_cash_tips_per_shift, 12.5);
        assert_eq!(stats.average_card_tips_per_shift, 5.0);
        assert_eq!(stats.highest_cash_tips.amount, 20.0);
        assert_eq!(stats.highest_cash_tips.date, Some(day(15)));
        assert_eq!(stats.highest_card_tips.amount, 10.0);
        assert_eq!(stats.highest_card_tips.date, Some(day(15)));
        assert!((stats.total_income_after_tax - 211.6).abs() < 1e-9);
    }

    #[test]
    fn test_aggregate_tax_rate_is_parameterized() {
        let shifts = vec![shift(day(15), 8.0, 20.0, 10.0, 15.0)];

        let untaxed = aggregate(&shifts, 0.0);
        assert_eq!(untaxed.total_income_after_tax, untaxed.total_income);

        let taxed = aggregate(&shifts, 0.25);
        assert!((taxed.total_income_after_tax - 150.0 * 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_aggregate_tie_keeps_first_shift() {
        let shifts = vec![
            shift(day(15), 8.0, 20.0, 5.0, 15.0),
            shift(day(16), 6.0, 20.0, 5.0, 15.0),
        ];

        let stats = aggregate(&shifts, DEFAULT_TAX_RATE);

        assert_eq!(stats.highest_cash_tips.date, Some(day(15)));
        assert_eq!(stats.highest_card_tips.date, Some(day(15)));
    }

    #[test]
    fn test_aggregate_sums_are_order_independent() {
        let mut shifts = vec![
            shift(day(15), 8.0, 20.0, 10.0, 15.0),
            shift(day(16), 5.0, 5.0, 0.0, 15.0),
            shift(day(17), 6.5, 12.0, 8.0, 15.0),
        ];
        let forward = aggregate(&shifts, DEFAULT_TAX_RATE);
        shifts.reverse();
        let backward = aggregate(&shifts, DEFAULT_TAX_RATE);

        assert_eq!(forward.total_shifts, backward.total_shifts);
        assert_eq!(forward.total_income, backward.total_income);
        assert_eq!(forward.total_cash_tips, backward.total_cash_tips);
        assert_eq!(forward.total_hours_worked, backward.total_hours_worked);
        assert_eq!(forward.highest_cash_tips, backward.highest_cash_tips);
    }

    #[test]
    fn test_aggregate_guards_zero_hours_total() {
        // Hand-built record: the service never persists zero hours, but
        // the aggregator must not divide by a zero hours total.
        let zero_hours = Shift::new("user1".to_string(), day(15), 0.0, 10.0, 0.0);

        let stats = aggregate(&[zero_hours], DEFAULT_TAX_RATE);

        assert_eq!(stats.total_hours_worked, 0.0);
        assert_eq!(stats.average_hourly_rate, 0.0);
    }

    #[test]
    fn test_stats_serialize_camel_case() {
        let stats = aggregate(&[shift(day(15), 8.0, 20.0, 10.0, 15.0)], DEFAULT_TAX_RATE);

        let value = serde_json::to_value(&stats).unwrap();
        assert_eq!(value["totalShifts"], 1);
        assert_eq!(value["totalCombinedTips"], 30.0);
        assert!(value["highestCashTips"]["date"].is_string());
        assert!(value.get("totalIncomeAfterTax").is_some());
    }
}
