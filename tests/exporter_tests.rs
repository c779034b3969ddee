// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use pocketledger::models::{NewTransaction, TxType};
use pocketledger::{cli, commands::exporter, db, store};
use rusqlite::Connection;
use rust_decimal::Decimal;
use tempfile::tempdir;

fn seeded() -> Connection {
    let conn = db::open_in_memory().unwrap();
    for (date, kind, category, memo, amount) in [
        ("2025-06-02", TxType::Expense, Some("점심"), Some("김밥, 라면"), 12_000),
        ("2025-06-01", TxType::Income, Some("급여"), None, 2_000_000),
    ] {
        store::transactions::add(
            &conn,
            NewTransaction {
                date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
                r#type: kind,
                category: category.map(String::from),
                memo: memo.map(String::from),
                amount: Decimal::from(amount),
            },
        )
        .unwrap();
    }
    conn
}

fn export(conn: &Connection, format: &str, out: &str) {
    let matches = cli::build_cli().get_matches_from([
        "pocketledger",
        "export",
        "transactions",
        "--format",
        format,
        "--out",
        out,
    ]);
    if let Some(("export", export_m)) = matches.subcommand() {
        exporter::handle(conn, export_m).unwrap();
    } else {
        panic!("no export subcommand");
    }
}

#[test]
fn export_csv_writes_header_and_oldest_first() {
    let conn = seeded();
    let dir = tempdir().unwrap();
    let out = dir.path().join("tx.csv");
    export(&conn, "csv", out.to_str().unwrap());

    let mut rdr = csv::Reader::from_path(&out).unwrap();
    let headers: Vec<String> = rdr.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(headers, exporter::CSV_HEADER);
    let records: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(records.len(), 2);
    assert_eq!(&records[0][1], "2025-06-01");
    assert_eq!(&records[0][2], "INCOME");
    assert_eq!(&records[0][4], "");
    // embedded comma survives quoting
    assert_eq!(&records[1][4], "김밥, 라면");
    assert_eq!(&records[1][5], "12000");
}

#[test]
fn export_json_uses_storage_field_names() {
    let conn = seeded();
    let dir = tempdir().unwrap();
    let out = dir.path().join("tx.json");
    export(&conn, "json", out.to_str().unwrap());

    let body = std::fs::read_to_string(&out).unwrap();
    let v: serde_json::Value = serde_json::from_str(&body).unwrap();
    let items = v.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[1]["type"], "EXPENSE");
    assert_eq!(items[1]["category"], "점심");
    assert_eq!(items[1]["date"], "2025-06-02");
    assert!(items[0]["memo"].is_null());
    assert!(items[0]["id"].as_str().is_some_and(|id| !id.is_empty()));
}
