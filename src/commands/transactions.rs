// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::catalog::compose_label;
use crate::engine::search::{search, signed_total, SearchFilter, TypeFilter};
use crate::models::{NewTransaction, Transaction, TxType};
use crate::store::transactions as store;
use crate::utils::{
    fmt_money, maybe_print_json, parse_date, parse_decimal, parse_month, pretty_table, required,
};
use anyhow::{Context, Result};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => {
            let id = required(sub, "id")?.trim();
            store::remove(conn, id)?;
            println!("Removed transaction {}", id);
        }
        _ => {}
    }
    Ok(())
}

/// Reads `tx add` arguments into a record ready for the store.
pub fn new_transaction(sub: &clap::ArgMatches) -> Result<NewTransaction> {
    let date = parse_date(required(sub, "date")?)?;
    let kind: TxType = required(sub, "type")?.parse()?;
    let amount_raw = required(sub, "amount")?;
    let amount = parse_decimal(amount_raw)
        .with_context(|| format!("Invalid amount '{}'", amount_raw))?;
    let category = compose_label(
        sub.get_one::<String>("major").map(String::as_str),
        sub.get_one::<String>("sub").map(String::as_str),
        sub.get_one::<String>("category").map(String::as_str),
    );
    Ok(NewTransaction {
        date,
        r#type: kind,
        category,
        memo: sub.get_one::<String>("memo").cloned(),
        amount,
    })
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let tx = store::add(conn, new_transaction(sub)?)?;
    println!(
        "Recorded {} {} on {} ({}) id={}",
        tx.r#type,
        tx.amount,
        tx.date,
        tx.category.as_deref().unwrap_or("-"),
        tx.id
    );
    Ok(())
}

pub fn filter_from(sub: &clap::ArgMatches) -> Result<SearchFilter> {
    let month = sub
        .get_one::<String>("month")
        .map(|m| parse_month(m))
        .transpose()?;
    let date = sub
        .get_one::<String>("date")
        .map(|d| parse_date(d))
        .transpose()?;
    let type_filter = match sub.get_one::<String>("type") {
        Some(t) => t.parse::<TypeFilter>()?,
        None => TypeFilter::All,
    };
    Ok(SearchFilter {
        month,
        date,
        type_filter,
        query: sub.get_one::<String>("query").cloned(),
    })
}

/// Transactions matching the `tx list` filters, newest first.
pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<Transaction>> {
    let filter = filter_from(sub)?;
    let all = match filter.month.as_deref() {
        Some(month) => store::list_month(conn, month)?,
        None => store::list(conn)?,
    };
    Ok(search(&all, &filter).into_iter().cloned().collect())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    if maybe_print_json(json_flag, jsonl_flag, &data)? {
        return Ok(());
    }
    let net = signed_total(&data);
    let rows: Vec<Vec<String>> = data
        .iter()
        .map(|t| {
            vec![
                t.date.to_string(),
                t.r#type.to_string(),
                t.category.clone().unwrap_or_default(),
                t.memo.clone().unwrap_or_default(),
                t.amount.to_string(),
                t.id.clone(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Date", "Type", "Category", "Memo", "Amount", "Id"], rows)
    );
    println!("{} transactions, net {}", data.len(), fmt_money(&net, ""));
    Ok(())
}
