// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Monthly folding of transactions into totals, per-day and per-category sums.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use super::resolver::CategoryResolver;
use crate::models::Transaction;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DayTotals {
    pub income: Decimal,
    pub expense: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub name: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyAggregate {
    pub month: String,
    pub income: Decimal,
    pub expense: Decimal,
    pub by_date: BTreeMap<NaiveDate, DayTotals>,
    pub by_major: BTreeMap<String, Decimal>,
}

impl MonthlyAggregate {
    pub fn net(&self) -> Decimal {
        self.income - self.expense
    }

    pub fn ranked_majors(&self) -> Vec<CategoryTotal> {
        rank(&self.by_major)
    }

    /// Expense booked on or before `day` within this month.
    pub fn expense_through(&self, day: NaiveDate) -> Decimal {
        self.by_date
            .range(..=day)
            .fold(Decimal::ZERO, |acc, (_, t)| acc.saturating_add(t.expense))
    }

    pub fn spend_for(&self, major: &str) -> Decimal {
        self.by_major.get(major).copied().unwrap_or(Decimal::ZERO)
    }
}

/// Negative amounts never contribute to a total.
pub fn sanitize_amount(amount: Decimal) -> Decimal {
    if amount > Decimal::ZERO {
        amount
    } else {
        Decimal::ZERO
    }
}

/// Month keys are `YYYY-MM`; a transaction belongs to the month its ISO date
/// starts with.
pub fn in_month(tx: &Transaction, month: &str) -> bool {
    tx.date.to_string().starts_with(month)
}

pub fn aggregate(
    transactions: &[Transaction],
    month: &str,
    resolver: &CategoryResolver,
) -> MonthlyAggregate {
    let mut agg = MonthlyAggregate {
        month: month.to_string(),
        income: Decimal::ZERO,
        expense: Decimal::ZERO,
        by_date: BTreeMap::new(),
        by_major: BTreeMap::new(),
    };

    for tx in transactions.iter().filter(|t| in_month(t, month)) {
        let amount = sanitize_amount(tx.amount);
        let day = agg.by_date.entry(tx.date).or_default();
        if tx.is_income() {
            agg.income = agg.income.saturating_add(amount);
            day.income = day.income.saturating_add(amount);
            continue;
        }
        agg.expense = agg.expense.saturating_add(amount);
        day.expense = day.expense.saturating_add(amount);

        let major = resolver.resolve(tx.category.as_deref()).major;
        let slot = agg.by_major.entry(major).or_insert(Decimal::ZERO);
        *slot = slot.saturating_add(amount);
    }
    agg
}

/// Expense of `month` within one major category, keyed by sub-category.
pub fn sub_aggregate(
    transactions: &[Transaction],
    month: &str,
    selected_major: &str,
    resolver: &CategoryResolver,
) -> BTreeMap<String, Decimal> {
    let mut subs: BTreeMap<String, Decimal> = BTreeMap::new();
    for tx in transactions
        .iter()
        .filter(|t| t.is_expense() && in_month(t, month))
    {
        let resolved = resolver.resolve(tx.category.as_deref());
        if resolved.major != selected_major {
            continue;
        }
        let slot = subs.entry(resolved.sub).or_insert(Decimal::ZERO);
        *slot = slot.saturating_add(sanitize_amount(tx.amount));
    }
    subs
}

/// Largest first; equal amounts keep the map's name order.
pub fn rank(totals: &BTreeMap<String, Decimal>) -> Vec<CategoryTotal> {
    let mut items: Vec<CategoryTotal> = totals
        .iter()
        .map(|(name, amount)| CategoryTotal {
            name: name.clone(),
            amount: *amount,
        })
        .collect();
    items.sort_by(|a, b| b.amount.cmp(&a.amount));
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TxType;

    fn tx(date: &str, kind: TxType, category: Option<&str>, amount: i64) -> Transaction {
        Transaction {
            id: format!("{}-{}", date, amount),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            r#type: kind,
            category: category.map(String::from),
            memo: None,
            amount: Decimal::from(amount),
        }
    }

    fn sample() -> Vec<Transaction> {
        vec![
            tx("2025-06-01", TxType::Expense, Some("버스"), 10_000),
            tx("2025-06-02", TxType::Expense, Some("택시"), 5_000),
            tx("2025-06-02", TxType::Expense, Some("식비 > 외식"), 23_000),
            tx("2025-06-03", TxType::Expense, None, 4_000),
            tx("2025-06-03", TxType::Income, Some("급여"), 3_000_000),
            tx("2025-05-31", TxType::Expense, Some("버스"), 1_450),
            tx("2025-07-01", TxType::Expense, Some("버스"), 1_450),
        ]
    }

    #[test]
    fn transport_scenario() {
        let r = CategoryResolver::default();
        let txs = vec![
            tx("2025-06-01", TxType::Expense, Some("버스"), 10_000),
            tx("2025-06-02", TxType::Expense, Some("택시"), 5_000),
        ];
        let agg = aggregate(&txs, "2025-06", &r);
        assert_eq!(agg.by_major.len(), 1);
        assert_eq!(agg.by_major["교통"], Decimal::from(15_000));

        let subs = sub_aggregate(&txs, "2025-06", "교통", &r);
        assert_eq!(subs.len(), 2);
        assert_eq!(subs["버스"], Decimal::from(10_000));
        assert_eq!(subs["택시"], Decimal::from(5_000));
    }

    #[test]
    fn totals_only_cover_selected_month() {
        let agg = aggregate(&sample(), "2025-06", &CategoryResolver::default());
        assert_eq!(agg.income, Decimal::from(3_000_000));
        assert_eq!(agg.expense, Decimal::from(42_000));
        assert_eq!(agg.net(), Decimal::from(2_958_000));
        assert_eq!(agg.by_major["Other"], Decimal::from(4_000));
        assert_eq!(agg.by_major["식비"], Decimal::from(23_000));
    }

    #[test]
    fn income_never_lands_in_categories() {
        let agg = aggregate(&sample(), "2025-06", &CategoryResolver::default());
        assert!(!agg.by_major.contains_key("급여"));
        let day = agg.by_date[&NaiveDate::from_ymd_opt(2025, 6, 3).unwrap()];
        assert_eq!(day.income, Decimal::from(3_000_000));
        assert_eq!(day.expense, Decimal::from(4_000));
    }

    #[test]
    fn conservation_across_groupings() {
        let agg = aggregate(&sample(), "2025-06", &CategoryResolver::default());
        let by_major: Decimal = agg.by_major.values().copied().sum();
        let by_date: Decimal = agg.by_date.values().map(|d| d.expense).sum();
        assert_eq!(by_major, agg.expense);
        assert_eq!(by_date, agg.expense);
    }

    #[test]
    fn negative_amounts_count_as_zero() {
        let mut txs = sample();
        txs.push(tx("2025-06-04", TxType::Expense, Some("버스"), -9_999));
        txs.push(tx("2025-06-04", TxType::Income, None, -1));
        let agg = aggregate(&txs, "2025-06", &CategoryResolver::default());
        assert_eq!(agg.expense, Decimal::from(42_000));
        assert_eq!(agg.income, Decimal::from(3_000_000));
        assert_eq!(agg.by_major["교통"], Decimal::from(15_000));
    }

    #[test]
    fn aggregate_is_idempotent() {
        let txs = sample();
        let r = CategoryResolver::default();
        assert_eq!(aggregate(&txs, "2025-06", &r), aggregate(&txs, "2025-06", &r));
    }

    #[test]
    fn empty_month_is_all_zero() {
        let agg = aggregate(&sample(), "2024-01", &CategoryResolver::default());
        assert!(agg.income.is_zero());
        assert!(agg.expense.is_zero());
        assert!(agg.by_date.is_empty());
        assert!(agg.by_major.is_empty());
        assert!(agg.ranked_majors().is_empty());
    }

    #[test]
    fn ranking_breaks_ties_by_name() {
        let mut totals = BTreeMap::new();
        totals.insert("b".to_string(), Decimal::from(5));
        totals.insert("a".to_string(), Decimal::from(5));
        totals.insert("c".to_string(), Decimal::from(9));
        let names: Vec<_> = rank(&totals).into_iter().map(|c| c.name).collect();
        assert_eq!(names, ["c", "a", "b"]);
    }

    #[test]
    fn expense_through_day_is_inclusive() {
        let agg = aggregate(&sample(), "2025-06", &CategoryResolver::default());
        let through = agg.expense_through(NaiveDate::from_ymd_opt(2025, 6, 2).unwrap());
        assert_eq!(through, Decimal::from(38_000));
    }

    #[test]
    fn sub_aggregate_of_unknown_major_is_empty() {
        let subs = sub_aggregate(&sample(), "2025-06", "여행", &CategoryResolver::default());
        assert!(subs.is_empty());
    }
}
