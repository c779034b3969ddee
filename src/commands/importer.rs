// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::Path;
use std::str::FromStr;

use crate::models::{Transaction, TxType};
use crate::store::transactions as store;
use crate::utils::{parse_date, required};
use anyhow::{Context, Result};
use csv::ReaderBuilder;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => import_transactions(conn, sub),
        _ => Ok(()),
    }
}

/// Amounts arrive as JSON numbers, numeric strings, or junk.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Number(serde_json::Number),
    Text(String),
    Other(serde_json::Value),
}

/// One record in the exported shape. Only `date` and `type` are mandatory.
/// CSV amounts are read as text so csv's number inference never rounds them.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "A: Deserialize<'de>"))]
struct ImportRecord<A = RawAmount> {
    #[serde(default)]
    id: Option<String>,
    date: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    memo: Option<String>,
    #[serde(default)]
    amount: Option<A>,
}

impl ImportRecord<String> {
    fn into_raw(self) -> ImportRecord {
        ImportRecord {
            id: self.id,
            date: self.date,
            kind: self.kind,
            category: self.category,
            memo: self.memo,
            amount: self.amount.map(RawAmount::Text),
        }
    }
}

fn parse_amount(raw: Option<&RawAmount>) -> Option<Decimal> {
    let text = match raw? {
        RawAmount::Number(n) => n.to_string(),
        RawAmount::Text(s) => s.trim().to_string(),
        RawAmount::Other(_) => return None,
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

fn non_blank(s: Option<String>) -> Option<String> {
    s.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn into_transaction(row: usize, rec: ImportRecord) -> Result<Transaction> {
    let date = parse_date(&rec.date).with_context(|| format!("Row {}: bad date", row))?;
    let kind = TxType::from_str(&rec.kind).with_context(|| format!("Row {}: bad type", row))?;
    let amount = parse_amount(rec.amount.as_ref()).unwrap_or_else(|| {
        warn!(row, "unreadable amount, importing as 0");
        Decimal::ZERO
    });
    Ok(Transaction {
        id: non_blank(rec.id).unwrap_or_else(|| Uuid::new_v4().to_string()),
        date,
        r#type: kind,
        category: non_blank(rec.category),
        memo: non_blank(rec.memo),
        amount,
    })
}

pub fn read_csv(path: &Path) -> Result<Vec<Transaction>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("Open CSV {}", path.display()))?;
    let mut out = Vec::new();
    for (i, result) in rdr.deserialize::<ImportRecord<String>>().enumerate() {
        // header is line 1
        let row = i + 2;
        let rec = result.with_context(|| format!("Row {}: unreadable record", row))?;
        out.push(into_transaction(row, rec.into_raw())?);
    }
    Ok(out)
}

pub fn read_json(path: &Path) -> Result<Vec<Transaction>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Open JSON {}", path.display()))?;
    let records: Vec<ImportRecord> = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid JSON in {}", path.display()))?;
    records
        .into_iter()
        .enumerate()
        .map(|(i, rec)| into_transaction(i + 1, rec))
        .collect()
}

/// Inserts every record or none of them.
pub fn import_all(conn: &mut Connection, rows: &[Transaction]) -> Result<usize> {
    let tx = conn.transaction()?;
    for t in rows {
        store::insert(&tx, t).with_context(|| format!("Insert transaction {}", t.id))?;
    }
    tx.commit()?;
    Ok(rows.len())
}

fn import_transactions(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let path = Path::new(required(sub, "path")?.trim());
    let rows = match required(sub, "format")?.to_lowercase().as_str() {
        "csv" => read_csv(path)?,
        "json" => read_json(path)?,
        other => anyhow::bail!("Unknown format: {} (use csv|json)", other),
    };
    let n = import_all(conn, &rows)?;
    info!(count = n, path = %path.display(), "import finished");
    println!("Imported {} transactions from {}", n, path.display());
    Ok(())
}
