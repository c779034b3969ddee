// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Budget usage thresholds and the alerts derived from them.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use super::pacing::per_day;

/// 80% used.
pub fn warn_ratio() -> Decimal {
    Decimal::new(8, 1)
}

/// 100% used.
pub fn danger_ratio() -> Decimal {
    Decimal::ONE
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertLevel {
    Warn,
    Danger,
}

impl AlertLevel {
    pub fn classify(ratio: Decimal) -> Option<Self> {
        if ratio >= danger_ratio() {
            Some(AlertLevel::Danger)
        } else if ratio >= warn_ratio() {
            Some(AlertLevel::Warn)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AlertLevel::Warn => "warn",
            AlertLevel::Danger => "danger",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetAlert {
    /// `None` for the whole-month budget.
    pub category: Option<String>,
    pub level: AlertLevel,
    pub budget_amount: Decimal,
    pub spent_amount: Decimal,
    pub usage_ratio: Decimal,
    pub remaining_days: u32,
    pub recommended_daily_spend: Decimal,
}

fn usage_ratio(spent: Decimal, limit: Decimal) -> Option<Decimal> {
    if limit <= Decimal::ZERO {
        return None;
    }
    // only overflow makes the quotient unrepresentable; that is maximal usage
    Some(spent.checked_div(limit).unwrap_or(Decimal::MAX))
}

fn alert_for(
    category: Option<String>,
    limit: Decimal,
    spent: Decimal,
    remaining_days: u32,
) -> Option<BudgetAlert> {
    let ratio = usage_ratio(spent, limit)?;
    let level = AlertLevel::classify(ratio)?;
    Some(BudgetAlert {
        category,
        level,
        budget_amount: limit,
        spent_amount: spent,
        usage_ratio: ratio,
        remaining_days,
        recommended_daily_spend: per_day(limit - spent, remaining_days),
    })
}

/// Every category at or above the warn threshold, highest usage first.
///
/// Spend is looked up by exact name, so a budget whose name is not a major
/// category sees zero spend and never alerts.
pub fn evaluate(
    category_budgets: &BTreeMap<String, Decimal>,
    category_spend: &BTreeMap<String, Decimal>,
    remaining_days: u32,
) -> Vec<BudgetAlert> {
    let mut alerts: Vec<BudgetAlert> = category_budgets
        .iter()
        .filter_map(|(name, limit)| {
            let spent = category_spend.get(name).copied().unwrap_or(Decimal::ZERO);
            alert_for(Some(name.clone()), *limit, spent, remaining_days)
        })
        .collect();
    alerts.sort_by(|a, b| b.usage_ratio.cmp(&a.usage_ratio));
    alerts
}

pub fn evaluate_total(
    total_budget: Decimal,
    total_expense: Decimal,
    remaining_days: u32,
) -> Option<BudgetAlert> {
    alert_for(None, total_budget, total_expense, remaining_days)
}

pub fn top(alerts: &[BudgetAlert], n: usize) -> &[BudgetAlert] {
    &alerts[..alerts.len().min(n)]
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryBudgetStatus {
    pub name: String,
    pub budget: Decimal,
    pub spent: Decimal,
    pub usage_pct: Option<Decimal>,
    pub level: Option<AlertLevel>,
}

/// One row per configured category budget, in name order.
pub fn category_budget_status(
    category_budgets: &BTreeMap<String, Decimal>,
    category_spend: &BTreeMap<String, Decimal>,
) -> Vec<CategoryBudgetStatus> {
    category_budgets
        .iter()
        .map(|(name, limit)| {
            let spent = category_spend.get(name).copied().unwrap_or(Decimal::ZERO);
            let ratio = usage_ratio(spent, *limit);
            CategoryBudgetStatus {
                name: name.clone(),
                budget: *limit,
                spent,
                usage_pct: ratio.map(|r| r.saturating_mul(Decimal::ONE_HUNDRED)),
                level: ratio.and_then(AlertLevel::classify),
            }
        })
        .collect()
}
