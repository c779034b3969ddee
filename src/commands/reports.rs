// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Monthly reports: everything here is recomputed from stored records on
//! every call.

use std::collections::BTreeMap;

use crate::config::Settings;
use crate::engine::aggregate::{rank, CategoryTotal};
use crate::engine::alerts::{self, category_budget_status, CategoryBudgetStatus};
use crate::engine::calendar::{calendar, CalendarMonth, WeekStart};
use crate::engine::insights::{compare, insights, MonthComparison, MonthInsights};
use crate::engine::pacing::PaceStatus;
use crate::engine::{aggregate, evaluate, evaluate_total, pace, sub_aggregate};
use crate::engine::{BudgetAlert, MonthPosition, MonthlyAggregate, PacingResult};
use crate::store::{budgets, transactions};
use crate::utils::{
    days_in_month, fmt_money, fmt_pct, maybe_print_json, month_start, parse_month, previous_month,
    pretty_table, required, today_or,
};
use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

pub fn handle(conn: &Connection, settings: &Settings, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(conn, settings, sub)?,
        Some(("categories", sub)) => categories(conn, settings, sub)?,
        Some(("calendar", sub)) => calendar_cmd(conn, settings, sub)?,
        Some(("compare", sub)) => compare_cmd(conn, settings, sub)?,
        Some(("alerts", sub)) => alerts_cmd(conn, settings, sub)?,
        _ => {}
    }
    Ok(())
}

fn month_of(sub: &clap::ArgMatches) -> Result<String> {
    parse_month(required(sub, "month")?)
}

fn load_aggregate(conn: &Connection, settings: &Settings, month: &str) -> Result<MonthlyAggregate> {
    let txs = transactions::list_month(conn, month)?;
    let agg = aggregate(&txs, month, &settings.resolver());
    debug!(month, rows = txs.len(), majors = agg.by_major.len(), "aggregated month");
    Ok(agg)
}

#[derive(Debug, Serialize)]
pub struct SummaryReport {
    pub month: String,
    pub income: Decimal,
    pub expense: Decimal,
    pub net: Decimal,
    pub budget: Option<Decimal>,
    pub pacing: PacingResult,
    pub pace_status: Option<PaceStatus>,
    pub insights: MonthInsights,
    pub budget_alert: Option<BudgetAlert>,
    /// The most urgent category alerts only.
    pub alerts: Vec<BudgetAlert>,
}

pub fn summary_report(
    conn: &Connection,
    settings: &Settings,
    month: &str,
    today: NaiveDate,
) -> Result<SummaryReport> {
    let agg = load_aggregate(conn, settings, month)?;
    let budget = budgets::monthly_budget(conn, month)?;
    let days = days_in_month(month)?;
    let position = MonthPosition::of(month, today);

    let pacing = pace(
        budget,
        agg.expense,
        agg.expense_through(today),
        days,
        position,
    );
    // alerts share the pacing horizon, which is empty without a monthly budget
    let days_left = pacing.remaining_days;
    let all_alerts = evaluate(&budgets::category_budgets(conn, month)?, &agg.by_major, days_left);

    Ok(SummaryReport {
        month: month.to_string(),
        income: agg.income,
        expense: agg.expense,
        net: agg.net(),
        budget: (budget > Decimal::ZERO).then_some(budget),
        pace_status: pacing.to_date.map(|t| t.status()),
        pacing,
        insights: insights(&agg, budget, days),
        budget_alert: evaluate_total(budget, agg.expense, days_left),
        alerts: alerts::top(&all_alerts, settings.alert_top_n).to_vec(),
    })
}

fn alert_rows(list: &[BudgetAlert], unit: &str) -> Vec<Vec<String>> {
    list.iter()
        .map(|a| {
            vec![
                a.category.clone().unwrap_or_else(|| "(month)".to_string()),
                a.level.as_str().to_string(),
                fmt_money(&a.spent_amount, unit),
                fmt_money(&a.budget_amount, unit),
                fmt_pct(&a.usage_ratio.saturating_mul(Decimal::ONE_HUNDRED)),
                a.remaining_days.to_string(),
                fmt_money(&a.recommended_daily_spend, unit),
            ]
        })
        .collect()
}

const ALERT_HEADERS: [&str; 7] = [
    "Budget", "Level", "Spent", "Limit", "Used", "Days left", "Per day",
];

fn summary(conn: &Connection, settings: &Settings, sub: &clap::ArgMatches) -> Result<()> {
    let month = month_of(sub)?;
    let today = today_or(sub.get_one::<String>("today"))?;
    let report = summary_report(conn, settings, &month, today)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &report)? {
        return Ok(());
    }
    let unit = settings.currency_label.as_str();
    let mut rows = vec![
        vec!["Income".to_string(), fmt_money(&report.income, unit)],
        vec!["Expense".to_string(), fmt_money(&report.expense, unit)],
        vec!["Net".to_string(), fmt_money(&report.net, unit)],
    ];
    match report.budget {
        Some(b) => {
            rows.push(vec!["Budget".to_string(), fmt_money(&b, unit)]);
            if let Some(left) = report.pacing.remaining_budget {
                rows.push(vec!["Remaining".to_string(), fmt_money(&left, unit)]);
            }
            rows.push(vec![
                "Days left".to_string(),
                report.pacing.remaining_days.to_string(),
            ]);
            rows.push(vec![
                "Per day".to_string(),
                fmt_money(&report.pacing.recommended_per_day, unit),
            ]);
            if let Some(to_date) = report.pacing.to_date {
                let verdict = match to_date.status() {
                    PaceStatus::Under => "under",
                    PaceStatus::On => "on track",
                    PaceStatus::Over => "over",
                };
                rows.push(vec![
                    "Pace".to_string(),
                    format!(
                        "{} of {} recommended so far ({})",
                        fmt_money(&to_date.spent_to_today, unit),
                        fmt_money(&to_date.recommended_to_today, unit),
                        verdict
                    ),
                ]);
            }
        }
        None => rows.push(vec!["Budget".to_string(), "unset".to_string()]),
    }
    let ins = &report.insights;
    if let Some(top) = &ins.top_major {
        rows.push(vec![
            "Top category".to_string(),
            format!("{} ({})", top.name, fmt_money(&top.amount, unit)),
        ]);
    }
    if let Some(day) = &ins.biggest_day {
        rows.push(vec![
            "Biggest day".to_string(),
            format!("{} ({})", day.date, fmt_money(&day.amount, unit)),
        ]);
    }
    rows.push(vec![
        "Avg per day".to_string(),
        fmt_money(&ins.avg_daily_expense, unit),
    ]);
    if let Some(u) = ins.income_usage {
        rows.push(vec![
            "Of income spent".to_string(),
            fmt_pct(&u.saturating_mul(Decimal::ONE_HUNDRED)),
        ]);
    }
    println!("{}", pretty_table(&["", &report.month], rows));

    let shown: Vec<BudgetAlert> = report
        .budget_alert
        .iter()
        .chain(report.alerts.iter())
        .cloned()
        .collect();
    if !shown.is_empty() {
        println!("{}", pretty_table(&ALERT_HEADERS, alert_rows(&shown, unit)));
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct CategoryReport {
    pub month: String,
    pub major: Option<String>,
    pub totals: Vec<CategoryTotal>,
    pub budgets: Vec<CategoryBudgetStatus>,
}

/// Ranked expense by major category, or by sub-category within `major`.
pub fn category_report(
    conn: &Connection,
    settings: &Settings,
    month: &str,
    major: Option<&str>,
) -> Result<CategoryReport> {
    let report = match major.map(str::trim).filter(|m| !m.is_empty()) {
        Some(major) => {
            let txs = transactions::list_month(conn, month)?;
            let subs = sub_aggregate(&txs, month, major, &settings.resolver());
            CategoryReport {
                month: month.to_string(),
                major: Some(major.to_string()),
                totals: rank(&subs),
                budgets: Vec::new(),
            }
        }
        None => {
            let agg = load_aggregate(conn, settings, month)?;
            let limits = budgets::category_budgets(conn, month)?;
            CategoryReport {
                month: month.to_string(),
                major: None,
                totals: agg.ranked_majors(),
                budgets: category_budget_status(&limits, &agg.by_major),
            }
        }
    };
    Ok(report)
}

fn share(amount: Decimal, total: Decimal) -> String {
    if total <= Decimal::ZERO {
        return "-".to_string();
    }
    amount
        .checked_div(total)
        .map(|r| fmt_pct(&r.saturating_mul(Decimal::ONE_HUNDRED)))
        .unwrap_or_else(|| "-".to_string())
}

fn categories(conn: &Connection, settings: &Settings, sub: &clap::ArgMatches) -> Result<()> {
    let month = month_of(sub)?;
    let major = sub.get_one::<String>("major").map(String::as_str);
    let report = category_report(conn, settings, &month, major)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &report)? {
        return Ok(());
    }
    let unit = settings.currency_label.as_str();
    let total = report
        .totals
        .iter()
        .fold(Decimal::ZERO, |acc, t| acc.saturating_add(t.amount));
    let rows = report
        .totals
        .iter()
        .map(|t| vec![t.name.clone(), fmt_money(&t.amount, unit), share(t.amount, total)])
        .collect();
    let header = match &report.major {
        Some(m) => format!("{} >", m),
        None => "Category".to_string(),
    };
    println!("{}", pretty_table(&[header.as_str(), "Spent", "Share"], rows));

    if !report.budgets.is_empty() {
        let rows = report
            .budgets
            .iter()
            .map(|b| {
                vec![
                    b.name.clone(),
                    fmt_money(&b.spent, unit),
                    fmt_money(&b.budget, unit),
                    b.usage_pct.as_ref().map(fmt_pct).unwrap_or_default(),
                    b.level.map(|l| l.as_str()).unwrap_or("ok").to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Budget", "Spent", "Limit", "Used", "Status"], rows)
        );
    }
    Ok(())
}

pub fn calendar_report(
    conn: &Connection,
    settings: &Settings,
    month: &str,
) -> Result<CalendarMonth> {
    let agg = load_aggregate(conn, settings, month)?;
    Ok(calendar(
        &agg,
        month_start(month)?,
        days_in_month(month)?,
        settings.week_starts_on,
    ))
}

fn calendar_cmd(conn: &Connection, settings: &Settings, sub: &clap::ArgMatches) -> Result<()> {
    let month = month_of(sub)?;
    let cal = calendar_report(conn, settings, &month)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &cal)? {
        return Ok(());
    }
    let headers: [&str; 7] = match settings.week_starts_on {
        WeekStart::Sunday => ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"],
        WeekStart::Monday => ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"],
    };
    let rows = cal
        .weeks
        .iter()
        .map(|week| {
            week.iter()
                .map(|cell| match cell {
                    None => String::new(),
                    Some(day) => {
                        let mut text = day.date.day().to_string();
                        if !day.income.is_zero() {
                            text.push_str(&format!("\n+{}", day.income));
                        }
                        if !day.expense.is_zero() {
                            text.push_str(&format!("\n-{}", day.expense));
                        }
                        text
                    }
                })
                .collect()
        })
        .collect();
    println!("{}", pretty_table(&headers, rows));
    Ok(())
}

pub fn compare_report(
    conn: &Connection,
    settings: &Settings,
    month: &str,
) -> Result<MonthComparison> {
    let prev = previous_month(month)?;
    let current = load_aggregate(conn, settings, month)?;
    let previous = load_aggregate(conn, settings, &prev)?;
    Ok(compare(&current, &previous))
}

fn compare_cmd(conn: &Connection, settings: &Settings, sub: &clap::ArgMatches) -> Result<()> {
    let month = month_of(sub)?;
    let cmp = compare_report(conn, settings, &month)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &cmp)? {
        return Ok(());
    }
    let unit = settings.currency_label.as_str();
    let rows = vec![
        vec![
            "Income".to_string(),
            fmt_money(&cmp.previous_income, unit),
            fmt_money(&cmp.income, unit),
            fmt_pct(&cmp.income_change_pct),
        ],
        vec![
            "Expense".to_string(),
            fmt_money(&cmp.previous_expense, unit),
            fmt_money(&cmp.expense, unit),
            fmt_pct(&cmp.expense_change_pct),
        ],
    ];
    println!(
        "{}",
        pretty_table(&["", &cmp.previous_month, &cmp.month, "Change"], rows)
    );
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct AlertReport {
    pub month: String,
    pub remaining_days: u32,
    pub budget_alert: Option<BudgetAlert>,
    pub alerts: Vec<BudgetAlert>,
}

/// Every alert for `month`, category alerts ranked by usage.
pub fn alert_report(
    conn: &Connection,
    settings: &Settings,
    month: &str,
    today: NaiveDate,
) -> Result<AlertReport> {
    let agg = load_aggregate(conn, settings, month)?;
    let budget = budgets::monthly_budget(conn, month)?;
    let pacing = pace(
        budget,
        agg.expense,
        agg.expense_through(today),
        days_in_month(month)?,
        MonthPosition::of(month, today),
    );
    let days_left = pacing.remaining_days;
    let limits: BTreeMap<String, Decimal> = budgets::category_budgets(conn, month)?;
    Ok(AlertReport {
        month: month.to_string(),
        remaining_days: days_left,
        budget_alert: evaluate_total(budget, agg.expense, days_left),
        alerts: evaluate(&limits, &agg.by_major, days_left),
    })
}

fn alerts_cmd(conn: &Connection, settings: &Settings, sub: &clap::ArgMatches) -> Result<()> {
    let month = month_of(sub)?;
    let today = today_or(sub.get_one::<String>("today"))?;
    let report = alert_report(conn, settings, &month, today)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &report)? {
        return Ok(());
    }
    let shown: Vec<BudgetAlert> = report
        .budget_alert
        .iter()
        .chain(report.alerts.iter())
        .cloned()
        .collect();
    if shown.is_empty() {
        println!("No budget alerts for {}", report.month);
        return Ok(());
    }
    println!(
        "{}",
        pretty_table(&ALERT_HEADERS, alert_rows(&shown, &settings.currency_label))
    );
    Ok(())
}
