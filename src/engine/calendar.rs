// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::aggregate::MonthlyAggregate;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    fn offset(&self, first: NaiveDate) -> usize {
        match self {
            WeekStart::Sunday => first.weekday().num_days_from_sunday() as usize,
            WeekStart::Monday => first.weekday().num_days_from_monday() as usize,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub income: Decimal,
    pub expense: Decimal,
}

pub type Week = [Option<CalendarDay>; 7];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarMonth {
    pub month: String,
    pub weeks: Vec<Week>,
}

/// Lays the month out in weeks; cells before day 1 and after the last day
/// are empty.
pub fn calendar(
    agg: &MonthlyAggregate,
    first_day: NaiveDate,
    days_in_month: u32,
    week_start: WeekStart,
) -> CalendarMonth {
    let mut cells: Vec<Option<CalendarDay>> = vec![None; week_start.offset(first_day)];
    for n in 0..days_in_month {
        let date = first_day + Duration::days(i64::from(n));
        let totals = agg.by_date.get(&date).copied().unwrap_or_default();
        cells.push(Some(CalendarDay {
            date,
            income: totals.income,
            expense: totals.expense,
        }));
    }

    let weeks = cells
        .chunks(7)
        .map(|chunk| {
            let mut week: Week = Default::default();
            for (slot, cell) in week.iter_mut().zip(chunk) {
                *slot = cell.clone();
            }
            week
        })
        .collect();

    CalendarMonth {
        month: agg.month.clone(),
        weeks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::aggregate::aggregate;
    use crate::engine::resolver::CategoryResolver;
    use crate::models::{Transaction, TxType};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn june_2025_starts_on_sunday() {
        let agg = aggregate(&[], "2025-06", &CategoryResolver::default());
        let cal = calendar(&agg, day(2025, 6, 1), 30, WeekStart::Sunday);
        assert_eq!(cal.weeks.len(), 5);
        assert_eq!(cal.weeks[0][0].as_ref().unwrap().date, day(2025, 6, 1));
        // 30th is a Monday
        assert_eq!(cal.weeks[4][1].as_ref().unwrap().date, day(2025, 6, 30));
        assert!(cal.weeks[4][2].is_none());
    }

    #[test]
    fn monday_start_shifts_offset() {
        let agg = aggregate(&[], "2025-06", &CategoryResolver::default());
        let cal = calendar(&agg, day(2025, 6, 1), 30, WeekStart::Monday);
        assert!(cal.weeks[0][..6].iter().all(Option::is_none));
        assert_eq!(cal.weeks[0][6].as_ref().unwrap().date, day(2025, 6, 1));
        assert_eq!(cal.weeks.len(), 6);
    }

    #[test]
    fn cells_carry_day_totals() {
        let txs = vec![
            Transaction {
                id: "a".into(),
                date: day(2025, 7, 3),
                r#type: TxType::Expense,
                category: Some("버스".into()),
                memo: None,
                amount: Decimal::from(1_450),
            },
            Transaction {
                id: "b".into(),
                date: day(2025, 7, 3),
                r#type: TxType::Income,
                category: None,
                memo: None,
                amount: Decimal::from(50_000),
            },
        ];
        let agg = aggregate(&txs, "2025-07", &CategoryResolver::default());
        // 2025-07-01 is a Tuesday
        let cal = calendar(&agg, day(2025, 7, 1), 31, WeekStart::Sunday);
        let cell = cal.weeks[0][4].as_ref().unwrap();
        assert_eq!(cell.date, day(2025, 7, 3));
        assert_eq!(cell.expense, Decimal::from(1_450));
        assert_eq!(cell.income, Decimal::from(50_000));
        let empty = cal.weeks[0][2].as_ref().unwrap();
        assert!(empty.expense.is_zero() && empty.income.is_zero());
    }
}
