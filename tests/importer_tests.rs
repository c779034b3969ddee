// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use pocketledger::{cli, commands::importer, db, store};
use rusqlite::Connection;
use rust_decimal::Decimal;
use std::io::Write;
use tempfile::NamedTempFile;

fn import(conn: &mut Connection, format: &str, path: &str) -> anyhow::Result<()> {
    let matches = cli::build_cli().get_matches_from([
        "pocketledger",
        "import",
        "transactions",
        "--format",
        format,
        "--path",
        path,
    ]);
    if let Some(("import", import_m)) = matches.subcommand() {
        importer::handle(conn, import_m)
    } else {
        panic!("no import subcommand");
    }
}

fn count(conn: &Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM transactions", [], |r| r.get(0))
        .unwrap()
}

#[test]
fn csv_import_generates_missing_ids_and_zeroes_junk_amounts() {
    let mut conn = db::open_in_memory().unwrap();
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        "id,date,type,category,memo,amount\n\
         keep-me,2025-06-01,INCOME,급여,,2000000\n\
         ,2025-06-02,expense, 점심 ,김밥,12000.50\n\
         ,2025-06-03,EXPENSE,택시,,abc"
    )
    .unwrap();
    file.flush().unwrap();

    let padded = format!("  {}  ", file.path().to_str().unwrap());
    import(&mut conn, "csv", &padded).unwrap();

    let txs = store::transactions::list(&conn).unwrap();
    assert_eq!(txs.len(), 3);
    assert_eq!(txs[2].id, "keep-me");
    assert!(!txs[0].id.is_empty());
    assert_ne!(txs[0].id, txs[1].id);
    assert_eq!(txs[1].category.as_deref(), Some("점심"));
    assert_eq!(txs[1].amount, Decimal::new(1_200_050, 2));
    assert!(txs[0].amount.is_zero());
    assert_eq!(txs[2].memo, None);
}

#[test]
fn json_import_accepts_numbers_and_strings() {
    let mut conn = db::open_in_memory().unwrap();
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[
            {{"id":"a","date":"2025-06-01","type":"EXPENSE","category":"교통 > 버스","amount":1450}},
            {{"date":"2025-06-02","type":"INCOME","memo":"용돈","amount":"50000"}},
            {{"date":"2025-06-03","type":"EXPENSE","amount":null}}
        ]"#
    )
    .unwrap();
    file.flush().unwrap();

    import(&mut conn, "json", file.path().to_str().unwrap()).unwrap();
    let txs = store::transactions::list(&conn).unwrap();
    assert_eq!(txs.len(), 3);
    let bus = txs.iter().find(|t| t.id == "a").unwrap();
    assert_eq!(bus.amount, Decimal::from(1450));
    assert_eq!(bus.category.as_deref(), Some("교통 > 버스"));
    assert_eq!(txs[1].amount, Decimal::from(50_000));
    assert!(txs[0].amount.is_zero());
}

#[test]
fn bad_row_aborts_whole_import() {
    let mut conn = db::open_in_memory().unwrap();
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        "date,type,category,memo,amount\n\
         2025-06-01,EXPENSE,점심,,9000\n\
         2025-06-31,EXPENSE,저녁,,9000"
    )
    .unwrap();
    file.flush().unwrap();

    let err = import(&mut conn, "csv", file.path().to_str().unwrap()).unwrap_err();
    assert!(err.to_string().contains("Row 3"));
    assert_eq!(count(&conn), 0);
}

#[test]
fn duplicate_ids_roll_back() {
    let mut conn = db::open_in_memory().unwrap();
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[{{"id":"x","date":"2025-06-01","type":"EXPENSE","amount":1}},
            {{"id":"x","date":"2025-06-02","type":"EXPENSE","amount":2}}]"#
    )
    .unwrap();
    file.flush().unwrap();

    assert!(import(&mut conn, "json", file.path().to_str().unwrap()).is_err());
    assert_eq!(count(&conn), 0);
}

#[test]
fn csv_amounts_keep_full_precision() {
    let mut conn = db::open_in_memory().unwrap();
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        "date,type,category,memo,amount\n\
         2025-06-01,EXPENSE,여행,,12345678901234567890.12"
    )
    .unwrap();
    file.flush().unwrap();

    import(&mut conn, "csv", file.path().to_str().unwrap()).unwrap();
    let txs = store::transactions::list(&conn).unwrap();
    assert_eq!(
        txs[0].amount,
        Decimal::from_str_exact("12345678901234567890.12").unwrap()
    );
}
