// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::warn;

use crate::error::LedgerError;
use crate::models::{Category, TxType};

pub fn list(conn: &Connection, kind: Option<TxType>) -> Result<Vec<Category>> {
    let mut stmt = conn.prepare(
        "SELECT id, kind, name, built_in FROM categories
         WHERE ?1 IS NULL OR kind=?1
         ORDER BY kind DESC, built_in DESC, id",
    )?;
    let rows = stmt.query_map(params![kind.map(|k| k.as_str())], |r| {
        Ok((
            r.get::<_, i64>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, bool>(3)?,
        ))
    })?;
    let mut out = Vec::new();
    for row in rows {
        let (id, kind_s, name, built_in) = row?;
        match kind_s.parse::<TxType>() {
            Ok(kind) => out.push(Category {
                id,
                kind,
                name,
                built_in,
            }),
            Err(_) => warn!(id, kind = %kind_s, "skipping category with invalid kind"),
        }
    }
    Ok(out)
}

pub fn add(conn: &Connection, kind: TxType, name: &str) -> Result<Category> {
    let name = name.trim();
    if name.is_empty() {
        return Err(LedgerError::Validation("Category name must not be empty".into()).into());
    }
    let inserted = conn.execute(
        "INSERT OR IGNORE INTO categories(kind, name, built_in) VALUES (?1, ?2, 0)",
        params![kind.as_str(), name],
    )?;
    if inserted == 0 {
        return Err(LedgerError::Validation(format!(
            "{} category '{}' already exists",
            kind, name
        ))
        .into());
    }
    Ok(Category {
        id: conn.last_insert_rowid(),
        kind,
        name: name.to_string(),
        built_in: false,
    })
}

/// Only user-added categories can be removed.
pub fn remove(conn: &Connection, kind: TxType, name: &str) -> Result<()> {
    let name = name.trim();
    let built_in: Option<bool> = conn
        .query_row(
            "SELECT built_in FROM categories WHERE kind=?1 AND name=?2",
            params![kind.as_str(), name],
            |r| r.get(0),
        )
        .optional()?;
    match built_in {
        None => Err(LedgerError::category_not_found(name).into()),
        Some(true) => Err(LedgerError::BuiltInCategory(name.to_string()).into()),
        Some(false) => {
            conn.execute(
                "DELETE FROM categories WHERE kind=?1 AND name=?2",
                params![kind.as_str(), name],
            )?;
            Ok(())
        }
    }
}
