// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::Path;

use crate::models::Transaction;
use crate::store::transactions as store;
use crate::utils::required;
use anyhow::{Context, Result};
use rusqlite::Connection;

pub const CSV_HEADER: [&str; 6] = ["id", "date", "type", "category", "memo", "amount"];

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(conn, sub),
        _ => Ok(()),
    }
}

fn export_transactions(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = required(sub, "format")?.to_lowercase();
    let out = Path::new(required(sub, "out")?.trim());

    // oldest first, the order they were entered in
    let mut rows = store::list(conn)?;
    rows.reverse();

    match fmt.as_str() {
        "csv" => write_csv(out, &rows)?,
        "json" => write_json(out, &rows)?,
        other => anyhow::bail!("Unknown format: {} (use csv|json)", other),
    }
    println!("Exported {} transactions to {}", rows.len(), out.display());
    Ok(())
}

pub fn write_csv(path: &Path, rows: &[Transaction]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("Create CSV {}", path.display()))?;
    wtr.write_record(CSV_HEADER)?;
    for t in rows {
        wtr.write_record([
            t.id.clone(),
            t.date.to_string(),
            t.r#type.to_string(),
            t.category.clone().unwrap_or_default(),
            t.memo.clone().unwrap_or_default(),
            t.amount.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json(path: &Path, rows: &[Transaction]) -> Result<()> {
    std::fs::write(path, serde_json::to_string_pretty(rows)?)
        .with_context(|| format!("Write JSON {}", path.display()))
}
