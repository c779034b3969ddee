// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::catalog;
use crate::config::Settings;
use crate::models::TxType;
use crate::store::categories as store;
use crate::utils::{maybe_print_json, pretty_table, required};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, settings: &Settings, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => {
            let kind = sub
                .get_one::<String>("type")
                .map(|t| t.parse::<TxType>())
                .transpose()?;
            let data = store::list(conn, kind)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
                let rows = data
                    .iter()
                    .map(|c| {
                        let subs = catalog::sub_options(c.kind, &c.name).join(", ");
                        vec![
                            c.kind.to_string(),
                            c.name.clone(),
                            if c.built_in { "yes" } else { "" }.to_string(),
                            subs,
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["Type", "Category", "Built-in", "Sub-categories"], rows)
                );
            }
        }
        Some(("add", sub)) => {
            let kind: TxType = required(sub, "type")?.parse()?;
            let c = store::add(conn, kind, required(sub, "name")?)?;
            println!("Added {} category '{}'", c.kind, c.name);
        }
        Some(("rm", sub)) => {
            let kind: TxType = required(sub, "type")?.parse()?;
            let name = required(sub, "name")?;
            store::remove(conn, kind, name)?;
            println!("Removed {} category '{}'", kind, name.trim());
        }
        Some(("resolve", sub)) => {
            let label = required(sub, "label")?;
            let resolved = settings.resolver().resolve(Some(label));
            println!("{} -> {} > {}", label, resolved.major, resolved.sub);
        }
        _ => {}
    }
    Ok(())
}
