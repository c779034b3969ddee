// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;

use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::error::LedgerError;

fn parse_stored(month: &str, what: &str, raw: &str) -> Option<Decimal> {
    match raw.trim().parse::<Decimal>() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!(month, what, amount = raw, "ignoring unreadable budget amount");
            None
        }
    }
}

/// Zero when no budget is set for `month`.
pub fn monthly_budget(conn: &Connection, month: &str) -> Result<Decimal> {
    let raw: Option<String> = conn
        .query_row(
            "SELECT amount FROM monthly_budgets WHERE month=?1",
            params![month],
            |r| r.get(0),
        )
        .optional()?;
    Ok(raw
        .and_then(|s| parse_stored(month, "monthly", &s))
        .unwrap_or(Decimal::ZERO))
}

/// A value of zero or less clears the month's budget.
pub fn set_monthly_budget(conn: &Connection, month: &str, value: Decimal) -> Result<()> {
    if value <= Decimal::ZERO {
        conn.execute("DELETE FROM monthly_budgets WHERE month=?1", params![month])?;
        debug!(month, "cleared monthly budget");
        return Ok(());
    }
    conn.execute(
        "INSERT INTO monthly_budgets(month, amount) VALUES (?1, ?2)
         ON CONFLICT(month) DO UPDATE SET amount=excluded.amount",
        params![month, value.to_string()],
    )?;
    Ok(())
}

pub fn category_budgets(conn: &Connection, month: &str) -> Result<BTreeMap<String, Decimal>> {
    let mut stmt =
        conn.prepare("SELECT category, amount FROM category_budgets WHERE month=?1")?;
    let rows = stmt.query_map(params![month], |r| {
        Ok((r.get::<_, String>(0)?, r.get::<_, String>(1)?))
    })?;
    let mut out = BTreeMap::new();
    for row in rows {
        let (name, raw) = row?;
        if let Some(v) = parse_stored(month, &name, &raw) {
            out.insert(name, v);
        }
    }
    Ok(out)
}

/// The name is trimmed and must not be empty. A value of zero or less
/// removes the category's budget.
pub fn set_category_budget(
    conn: &Connection,
    month: &str,
    name: &str,
    value: Decimal,
) -> Result<()> {
    let name = name.trim();
    if name.is_empty() {
        return Err(LedgerError::Validation("Category name must not be empty".into()).into());
    }
    if value <= Decimal::ZERO {
        conn.execute(
            "DELETE FROM category_budgets WHERE month=?1 AND category=?2",
            params![month, name],
        )?;
        debug!(month, category = name, "cleared category budget");
        return Ok(());
    }
    conn.execute(
        "INSERT INTO category_budgets(month, category, amount) VALUES (?1, ?2, ?3)
         ON CONFLICT(month, category) DO UPDATE SET amount=excluded.amount",
        params![month, name, value.to_string()],
    )?;
    Ok(())
}
