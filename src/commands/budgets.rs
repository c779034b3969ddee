// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;

use crate::store::budgets as store;
use crate::utils::{maybe_print_json, parse_decimal, parse_month, pretty_table, required};
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(conn, sub)?,
        Some(("category", sub)) => set_category(conn, sub)?,
        Some(("show", sub)) => show(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn set(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let month = parse_month(required(sub, "month")?)?;
    let amount = parse_decimal(required(sub, "amount")?)?;
    store::set_monthly_budget(conn, &month, amount)?;
    if amount > Decimal::ZERO {
        println!("Budget set for {} = {}", month, amount);
    } else {
        println!("Budget cleared for {}", month);
    }
    Ok(())
}

fn set_category(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let month = parse_month(required(sub, "month")?)?;
    let name = required(sub, "name")?;
    let amount = parse_decimal(required(sub, "amount")?)?;
    store::set_category_budget(conn, &month, name, amount)?;
    if amount > Decimal::ZERO {
        println!("Budget set for {} / {} = {}", month, name.trim(), amount);
    } else {
        println!("Budget cleared for {} / {}", month, name.trim());
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct BudgetView {
    pub month: String,
    /// Zero when unset.
    pub monthly: Decimal,
    pub categories: BTreeMap<String, Decimal>,
}

pub fn budget_view(conn: &Connection, month: &str) -> Result<BudgetView> {
    Ok(BudgetView {
        month: month.to_string(),
        monthly: store::monthly_budget(conn, month)?,
        categories: store::category_budgets(conn, month)?,
    })
}

fn show(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let month = parse_month(required(sub, "month")?)?;
    let view = budget_view(conn, &month)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &view)? {
        return Ok(());
    }
    let mut rows = vec![vec![
        "(month)".to_string(),
        if view.monthly.is_zero() {
            "unset".to_string()
        } else {
            view.monthly.to_string()
        },
    ]];
    rows.extend(
        view.categories
            .iter()
            .map(|(name, amount)| vec![name.clone(), amount.to_string()]),
    );
    println!("{}", pretty_table(&["Category", &format!("Budget {}", month)], rows));
    Ok(())
}
