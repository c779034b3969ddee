// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use super::aggregate::{CategoryTotal, MonthlyAggregate};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayExpense {
    pub date: NaiveDate,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthInsights {
    pub net: Decimal,
    pub top_major: Option<CategoryTotal>,
    pub biggest_day: Option<DayExpense>,
    pub avg_daily_expense: Decimal,
    /// Expense over the monthly budget, capped at 1.
    pub budget_usage: Option<Decimal>,
    /// Expense over income, capped at 1.
    pub income_usage: Option<Decimal>,
}

fn capped_ratio(used: Decimal, total: Decimal) -> Option<Decimal> {
    if total <= Decimal::ZERO {
        return None;
    }
    Some(used.checked_div(total).map_or(Decimal::ONE, |r| r.min(Decimal::ONE)))
}

pub fn insights(agg: &MonthlyAggregate, budget: Decimal, days_in_month: u32) -> MonthInsights {
    // first strictly positive maximum wins, so ties go to the earlier key
    let mut top_major: Option<CategoryTotal> = None;
    for (name, amount) in &agg.by_major {
        if *amount > top_major.as_ref().map_or(Decimal::ZERO, |t| t.amount) {
            top_major = Some(CategoryTotal {
                name: name.clone(),
                amount: *amount,
            });
        }
    }

    let mut biggest_day: Option<DayExpense> = None;
    for (date, totals) in &agg.by_date {
        if totals.expense > biggest_day.as_ref().map_or(Decimal::ZERO, |b| b.amount) {
            biggest_day = Some(DayExpense {
                date: *date,
                amount: totals.expense,
            });
        }
    }

    let avg_daily_expense = if days_in_month > 0 {
        (agg.expense / Decimal::from(days_in_month))
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
    } else {
        Decimal::ZERO
    };

    MonthInsights {
        net: agg.net(),
        top_major,
        biggest_day,
        avg_daily_expense,
        budget_usage: capped_ratio(agg.expense, budget),
        income_usage: capped_ratio(agg.expense, agg.income),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthComparison {
    pub month: String,
    pub previous_month: String,
    pub income: Decimal,
    pub expense: Decimal,
    pub previous_income: Decimal,
    pub previous_expense: Decimal,
    pub income_change_pct: Decimal,
    pub expense_change_pct: Decimal,
}

/// Percentage change from `prev` to `curr`. Growth from nothing reads as 100%.
pub fn change_pct(curr: Decimal, prev: Decimal) -> Decimal {
    if prev.is_zero() {
        return if curr.is_zero() {
            Decimal::ZERO
        } else {
            Decimal::ONE_HUNDRED
        };
    }
    (curr - prev)
        .checked_div(prev)
        .map_or(Decimal::MAX, |r| r.saturating_mul(Decimal::ONE_HUNDRED))
}

pub fn compare(current: &MonthlyAggregate, previous: &MonthlyAggregate) -> MonthComparison {
    MonthComparison {
        month: current.month.clone(),
        previous_month: previous.month.clone(),
        income: current.income,
        expense: current.expense,
        previous_income: previous.income,
        previous_expense: previous.expense,
        income_change_pct: change_pct(current.income, previous.income),
        expense_change_pct: change_pct(current.expense, previous.expense),
    }
}
