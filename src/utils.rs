// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::{Datelike, Local, Months, NaiveDate};
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use rust_decimal::Decimal;

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_month(s: &str) -> Result<String> {
    let s = s.trim();
    month_start(s)?;
    Ok(s.to_string())
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

/// Required clap argument; the parser enforces presence, this keeps the
/// lookup free of panics.
pub fn required<'a>(m: &'a clap::ArgMatches, name: &str) -> Result<&'a str> {
    m.get_one::<String>(name)
        .map(String::as_str)
        .with_context(|| format!("Missing required argument --{}", name))
}

pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

pub fn month_start(month: &str) -> Result<NaiveDate> {
    // chrono accepts single-digit months, so check the shape first
    let well_formed = month.len() == 7 && month.as_bytes()[4] == b'-';
    NaiveDate::parse_from_str(&format!("{}-01", month), "%Y-%m-%d")
        .ok()
        .filter(|_| well_formed)
        .with_context(|| format!("Invalid month '{}', expected YYYY-MM", month))
}

pub fn month_end(month: &str) -> Result<NaiveDate> {
    let first = month_start(month)?;
    first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .with_context(|| format!("Invalid month '{}'", month))
}

pub fn days_in_month(month: &str) -> Result<u32> {
    Ok(month_end(month)?.day())
}

/// `2025-01` -> `2024-12`.
pub fn previous_month(month: &str) -> Result<String> {
    let first = month_start(month)?;
    let prev = first
        .checked_sub_months(Months::new(1))
        .with_context(|| format!("No month before '{}'", month))?;
    Ok(month_key(prev))
}

pub fn today_or(overridden: Option<&String>) -> Result<NaiveDate> {
    match overridden {
        Some(s) => parse_date(s),
        None => Ok(Local::now().date_naive()),
    }
}

pub fn fmt_money(d: &Decimal, unit: &str) -> String {
    format!("{}{}", d.round_dp(0), unit)
}

pub fn fmt_pct(d: &Decimal) -> String {
    format!("{}%", d.round_dp(1))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}
