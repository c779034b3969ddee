// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{params, Connection};
use std::fs;
use std::path::PathBuf;

use crate::catalog;
use crate::models::TxType;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.pocketledger", "Pocketledger", "pocketledger"));

pub const HOME_ENV: &str = "POCKETLEDGER_HOME";

pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os(HOME_ENV) {
        Some(custom) => PathBuf::from(custom),
        None => ProjectDirs::from(APP.0, APP.1, APP.2)
            .context("Could not determine platform-specific data dir")?
            .data_dir()
            .to_path_buf(),
    };
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create data dir {}", dir.display()))?;
    Ok(dir)
}

pub fn db_path() -> Result<PathBuf> {
    Ok(data_dir()?.join("pocketledger.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    let path = db_path()?;
    let conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&conn)?;
    tracing::debug!(path = %path.display(), "database ready");
    Ok(conn)
}

pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory().context("Open in-memory DB")?;
    init_schema(&conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS transactions(
        id TEXT PRIMARY KEY,
        date TEXT NOT NULL,
        type TEXT NOT NULL CHECK(type IN ('INCOME','EXPENSE')),
        category TEXT,
        memo TEXT,
        amount TEXT NOT NULL,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date);

    -- whole-month spending limit; absent = unset
    CREATE TABLE IF NOT EXISTS monthly_budgets(
        month TEXT PRIMARY KEY,
        amount TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS category_budgets(
        month TEXT NOT NULL,
        category TEXT NOT NULL,
        amount TEXT NOT NULL,
        PRIMARY KEY(month, category)
    );

    CREATE TABLE IF NOT EXISTS categories(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        kind TEXT NOT NULL CHECK(kind IN ('INCOME','EXPENSE')),
        name TEXT NOT NULL,
        built_in INTEGER NOT NULL DEFAULT 0,
        UNIQUE(kind, name)
    );
    "#,
    )?;
    seed_categories(conn)?;
    Ok(())
}

fn seed_categories(conn: &Connection) -> Result<()> {
    let mut stmt = conn.prepare_cached(
        "INSERT OR IGNORE INTO categories(kind, name, built_in) VALUES (?1, ?2, 1)",
    )?;
    for kind in [TxType::Expense, TxType::Income] {
        for name in catalog::builtin_labels(kind) {
            stmt.execute(params![kind.as_str(), name])?;
        }
    }
    Ok(())
}
