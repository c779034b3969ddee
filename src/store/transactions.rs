// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::{params, Connection, Row};
use rust_decimal::Decimal;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::LedgerError;
use crate::models::{NewTransaction, Transaction, TxType};

struct RawRow {
    id: String,
    date: String,
    r#type: String,
    category: Option<String>,
    memo: Option<String>,
    amount: String,
}

fn raw_row(r: &Row<'_>) -> rusqlite::Result<RawRow> {
    Ok(RawRow {
        id: r.get(0)?,
        date: r.get(1)?,
        r#type: r.get(2)?,
        category: r.get(3)?,
        memo: r.get(4)?,
        amount: r.get(5)?,
    })
}

/// Stored records are normalized here so the engine only ever sees
/// well-formed values: an unreadable amount becomes zero, an unreadable date
/// or type drops the row.
fn into_transaction(raw: RawRow) -> Option<Transaction> {
    let date = match NaiveDate::parse_from_str(&raw.date, "%Y-%m-%d") {
        Ok(d) => d,
        Err(_) => {
            warn!(id = %raw.id, date = %raw.date, "skipping transaction with invalid date");
            return None;
        }
    };
    let kind = match raw.r#type.parse::<TxType>() {
        Ok(k) => k,
        Err(_) => {
            warn!(id = %raw.id, kind = %raw.r#type, "skipping transaction with invalid type");
            return None;
        }
    };
    let amount = raw.amount.trim().parse::<Decimal>().unwrap_or_else(|_| {
        warn!(id = %raw.id, amount = %raw.amount, "invalid stored amount, counting as 0");
        Decimal::ZERO
    });
    Some(Transaction {
        id: raw.id,
        date,
        r#type: kind,
        category: raw.category,
        memo: raw.memo,
        amount,
    })
}

fn query(conn: &Connection, sql: &str, month: Option<&str>) -> Result<Vec<Transaction>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = match month {
        Some(m) => stmt.query_map(params![m], raw_row)?,
        None => stmt.query_map([], raw_row)?,
    };
    let mut out = Vec::new();
    for row in rows {
        if let Some(tx) = into_transaction(row?) {
            out.push(tx);
        }
    }
    Ok(out)
}

/// All transactions, newest first.
pub fn list(conn: &Connection) -> Result<Vec<Transaction>> {
    let txs = query(
        conn,
        "SELECT id, date, type, category, memo, amount FROM transactions
         ORDER BY date DESC, rowid DESC",
        None,
    )?;
    debug!(count = txs.len(), "loaded transactions");
    Ok(txs)
}

pub fn list_month(conn: &Connection, month: &str) -> Result<Vec<Transaction>> {
    query(
        conn,
        "SELECT id, date, type, category, memo, amount FROM transactions
         WHERE substr(date,1,7)=?1
         ORDER BY date DESC, rowid DESC",
        Some(month),
    )
}

fn clean_text(s: Option<String>) -> Option<String> {
    s.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

pub fn add(conn: &Connection, new: NewTransaction) -> Result<Transaction> {
    if new.amount <= Decimal::ZERO {
        return Err(LedgerError::Validation(format!(
            "Amount must be greater than zero, got {}",
            new.amount
        ))
        .into());
    }
    let tx = Transaction {
        id: Uuid::new_v4().to_string(),
        date: new.date,
        r#type: new.r#type,
        category: clean_text(new.category),
        memo: clean_text(new.memo),
        amount: new.amount,
    };
    insert(conn, &tx)?;
    debug!(id = %tx.id, "added transaction");
    Ok(tx)
}

/// Stores a record as-is, keeping its id. Used by imports.
pub fn insert(conn: &Connection, tx: &Transaction) -> Result<()> {
    conn.execute(
        "INSERT INTO transactions(id, date, type, category, memo, amount)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            tx.id,
            tx.date.to_string(),
            tx.r#type.as_str(),
            tx.category,
            tx.memo,
            tx.amount.to_string()
        ],
    )?;
    Ok(())
}

pub fn remove(conn: &Connection, id: &str) -> Result<()> {
    let n = conn.execute("DELETE FROM transactions WHERE id=?1", params![id])?;
    if n == 0 {
        return Err(LedgerError::transaction_not_found(id).into());
    }
    debug!(id, "removed transaction");
    Ok(())
}
