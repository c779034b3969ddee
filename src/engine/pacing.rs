// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Budget pacing: how much is left, and how much can be spent per day.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

/// Where a month sits relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MonthPosition {
    Past,
    /// `day` is today's day of month, 1-based.
    Current { day: u32 },
    Future,
}

impl MonthPosition {
    /// `month` must be a `YYYY-MM` key; keys compare lexically.
    pub fn of(month: &str, today: NaiveDate) -> Self {
        let current = today.format("%Y-%m").to_string();
        if month == current {
            MonthPosition::Current { day: today.day() }
        } else if month > current.as_str() {
            MonthPosition::Future
        } else {
            MonthPosition::Past
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PaceStatus {
    Under,
    On,
    Over,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ToDatePace {
    pub recommended_to_today: Decimal,
    pub spent_to_today: Decimal,
    /// Positive when spending is behind the recommended line.
    pub diff: Decimal,
}

impl ToDatePace {
    pub fn status(&self) -> PaceStatus {
        if self.diff > Decimal::ZERO {
            PaceStatus::Under
        } else if self.diff < Decimal::ZERO {
            PaceStatus::Over
        } else {
            PaceStatus::On
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PacingResult {
    pub remaining_budget: Option<Decimal>,
    pub remaining_days: u32,
    pub recommended_per_day: Decimal,
    pub to_date: Option<ToDatePace>,
}

impl PacingResult {
    fn unset() -> Self {
        Self {
            remaining_budget: None,
            remaining_days: 0,
            recommended_per_day: Decimal::ZERO,
            to_date: None,
        }
    }
}

/// Days still open for spending. Today counts as a remaining day.
pub fn remaining_days(days_in_month: u32, position: MonthPosition) -> u32 {
    match position {
        MonthPosition::Current { day } => (days_in_month + 1).saturating_sub(day),
        MonthPosition::Future => days_in_month,
        MonthPosition::Past => 0,
    }
}

/// Whole-unit share of `amount` per day, zero when nothing is left to share.
pub fn per_day(amount: Decimal, days: u32) -> Decimal {
    if days == 0 || amount <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    (amount / Decimal::from(days)).floor()
}

/// `spent_to_today` only matters for the current month.
pub fn pace(
    budget: Decimal,
    expense_so_far: Decimal,
    spent_to_today: Decimal,
    days_in_month: u32,
    position: MonthPosition,
) -> PacingResult {
    if budget <= Decimal::ZERO {
        return PacingResult::unset();
    }

    let remaining_budget = (budget - expense_so_far).max(Decimal::ZERO);
    let days_left = remaining_days(days_in_month, position);

    let to_date = match position {
        MonthPosition::Current { day } if days_in_month > 0 => {
            let (day, days) = (Decimal::from(day), Decimal::from(days_in_month));
            let recommended = budget
                .checked_mul(day)
                .map(|scaled| scaled / days)
                .unwrap_or_else(|| (budget / days).saturating_mul(day))
                .floor();
            Some(ToDatePace {
                recommended_to_today: recommended,
                spent_to_today,
                diff: recommended - spent_to_today,
            })
        }
        _ => None,
    };

    PacingResult {
        remaining_budget: Some(remaining_budget),
        remaining_days: days_left,
        recommended_per_day: per_day(remaining_budget, days_left),
        to_date,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(v: i64) -> Decimal {
        Decimal::from(v)
    }

    #[test]
    fn position_relative_to_today() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        assert_eq!(
            MonthPosition::of("2025-06", today),
            MonthPosition::Current { day: 15 }
        );
        assert_eq!(MonthPosition::of("2025-07", today), MonthPosition::Future);
        assert_eq!(MonthPosition::of("2026-01", today), MonthPosition::Future);
        assert_eq!(MonthPosition::of("2025-05", today), MonthPosition::Past);
    }

    #[test]
    fn zero_budget_produces_no_guidance() {
        let p = pace(d(0), d(50_000), d(50_000), 30, MonthPosition::Current { day: 10 });
        assert_eq!(p.remaining_budget, None);
        assert_eq!(p.remaining_days, 0);
        assert!(p.recommended_per_day.is_zero());
        assert!(p.to_date.is_none());

        let p = pace(d(-5), d(0), d(0), 30, MonthPosition::Future);
        assert_eq!(p, PacingResult::unset());
    }

    #[test]
    fn current_month_counts_today() {
        // 30-day month, day 21 => 10 days left including today
        let p = pace(
            d(300_000),
            d(250_000),
            d(250_000),
            30,
            MonthPosition::Current { day: 21 },
        );
        assert_eq!(p.remaining_budget, Some(d(50_000)));
        assert_eq!(p.remaining_days, 10);
        assert_eq!(p.recommended_per_day, d(5_000));
    }

    #[test]
    fn to_date_pace_is_floored() {
        let p = pace(
            d(100_000),
            d(40_000),
            d(30_000),
            31,
            MonthPosition::Current { day: 10 },
        );
        let to_date = p.to_date.unwrap();
        // 100000 * 10 / 31 = 32258.06..
        assert_eq!(to_date.recommended_to_today, d(32_258));
        assert_eq!(to_date.spent_to_today, d(30_000));
        assert_eq!(to_date.diff, d(2_258));
        assert_eq!(to_date.status(), PaceStatus::Under);
    }

    #[test]
    fn overspent_to_date_is_negative_diff() {
        let p = pace(d(30_000), d(20_000), d(20_000), 30, MonthPosition::Current { day: 10 });
        let to_date = p.to_date.unwrap();
        assert_eq!(to_date.recommended_to_today, d(10_000));
        assert_eq!(to_date.diff, d(-10_000));
        assert_eq!(to_date.status(), PaceStatus::Over);
    }

    #[test]
    fn future_month_spreads_over_whole_month() {
        let p = pace(d(310_000), d(0), d(0), 31, MonthPosition::Future);
        assert_eq!(p.remaining_days, 31);
        assert_eq!(p.recommended_per_day, d(10_000));
        assert!(p.to_date.is_none());
    }

    #[test]
    fn past_month_has_no_days_left() {
        let p = pace(d(300_000), d(100_000), d(100_000), 30, MonthPosition::Past);
        assert_eq!(p.remaining_budget, Some(d(200_000)));
        assert_eq!(p.remaining_days, 0);
        assert!(p.recommended_per_day.is_zero());
        assert!(p.to_date.is_none());
    }

    #[test]
    fn overspending_floors_remaining_budget_at_zero() {
        let p = pace(d(100_000), d(180_000), d(180_000), 30, MonthPosition::Current { day: 5 });
        assert_eq!(p.remaining_budget, Some(d(0)));
        assert!(p.recommended_per_day.is_zero());
    }

    #[test]
    fn never_negative() {
        for budget in [0i64, 1, 1_000, 300_000] {
            for spent in [0i64, 999, 300_000, 1_000_000] {
                for position in [
                    MonthPosition::Past,
                    MonthPosition::Future,
                    MonthPosition::Current { day: 1 },
                    MonthPosition::Current { day: 31 },
                    MonthPosition::Current { day: 40 },
                ] {
                    let p = pace(d(budget), d(spent), d(spent), 31, position);
                    assert!(p.remaining_budget.unwrap_or_default() >= Decimal::ZERO);
                    assert!(p.recommended_per_day >= Decimal::ZERO);
                }
            }
        }
        assert_eq!(remaining_days(30, MonthPosition::Current { day: 45 }), 0);
    }

    #[test]
    fn per_day_guards_zero_days() {
        assert!(per_day(d(1_000), 0).is_zero());
        assert!(per_day(d(-1_000), 3).is_zero());
        assert_eq!(per_day(d(1_000), 3), d(333));
    }

    #[test]
    fn huge_budget_does_not_overflow_to_date_line() {
        let p = pace(Decimal::MAX, d(0), d(0), 30, MonthPosition::Current { day: 2 });
        let to_date = p.to_date.unwrap();
        assert!(to_date.recommended_to_today > Decimal::ZERO);
        assert!(to_date.recommended_to_today < Decimal::MAX);
        assert_eq!(to_date.status(), PaceStatus::Under);
        assert_eq!(p.remaining_budget, Some(Decimal::MAX));
        assert_eq!(p.remaining_days, 29);
    }
}
