// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{crate_version, Arg, ArgAction, ArgGroup, Command};

fn month_arg() -> Arg {
    Arg::new("month")
        .long("month")
        .required(true)
        .help("Month as YYYY-MM")
}

fn today_arg() -> Arg {
    Arg::new("today")
        .long("today")
        .help("Pretend today is this YYYY-MM-DD date")
}

fn json_args() -> [Arg; 2] {
    [
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print pretty JSON"),
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    ]
}

fn kind_arg(required: bool) -> Arg {
    Arg::new("type")
        .long("type")
        .required(required)
        .value_parser(["income", "expense", "INCOME", "EXPENSE"])
        .help("income or expense")
}

fn format_arg() -> Arg {
    Arg::new("format")
        .long("format")
        .default_value("csv")
        .value_parser(["csv", "json"])
}

pub fn build_cli() -> Command {
    Command::new("pocketledger")
        .about("Personal income/expense ledger with budgets, pacing and alerts")
        .version(crate_version!())
        .subcommand(Command::new("init").about("Create the data directory and database"))
        .subcommand(
            Command::new("tx")
                .about("Record, search and delete transactions")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("date").long("date").required(true))
                        .arg(kind_arg(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .help("Free-form label, e.g. '식비 > 식사' or '버스'"),
                        )
                        .arg(Arg::new("major").long("major").help("Major category"))
                        .arg(
                            Arg::new("sub")
                                .long("sub")
                                .requires("major")
                                .help("Sub-category under --major"),
                        )
                        .group(
                            ArgGroup::new("label")
                                .args(["category", "major"])
                                .multiple(false),
                        )
                        .arg(Arg::new("memo").long("memo")),
                )
                .subcommand(
                    Command::new("list")
                        .arg(Arg::new("month").long("month"))
                        .arg(Arg::new("date").long("date"))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .default_value("all")
                                .value_parser(["all", "income", "expense"]),
                        )
                        .arg(
                            Arg::new("query")
                                .long("query")
                                .help("Substring of category or memo"),
                        )
                        .args(json_args()),
                )
                .subcommand(Command::new("rm").arg(Arg::new("id").long("id").required(true))),
        )
        .subcommand(
            Command::new("budget")
                .about("Monthly and per-category budgets")
                .subcommand(
                    Command::new("set")
                        .about("Set the whole-month budget; 0 clears it")
                        .arg(month_arg())
                        .arg(Arg::new("amount").long("amount").required(true)),
                )
                .subcommand(
                    Command::new("category")
                        .about("Set a major category's budget; 0 clears it")
                        .arg(month_arg())
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("amount").long("amount").required(true)),
                )
                .subcommand(Command::new("show").arg(month_arg()).args(json_args())),
        )
        .subcommand(
            Command::new("category")
                .about("Category vocabulary")
                .subcommand(Command::new("list").arg(kind_arg(false)).args(json_args()))
                .subcommand(
                    Command::new("add")
                        .arg(kind_arg(true))
                        .arg(Arg::new("name").long("name").required(true)),
                )
                .subcommand(
                    Command::new("rm")
                        .arg(kind_arg(true))
                        .arg(Arg::new("name").long("name").required(true)),
                )
                .subcommand(
                    Command::new("resolve")
                        .about("Show the major/sub pair a label is counted under")
                        .arg(Arg::new("label").required(true)),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Monthly statistics")
                .subcommand(
                    Command::new("summary")
                        .arg(month_arg())
                        .arg(today_arg())
                        .args(json_args()),
                )
                .subcommand(
                    Command::new("categories")
                        .arg(month_arg())
                        .arg(
                            Arg::new("major")
                                .long("major")
                                .help("Break one major category down by sub-category"),
                        )
                        .args(json_args()),
                )
                .subcommand(Command::new("calendar").arg(month_arg()).args(json_args()))
                .subcommand(Command::new("compare").arg(month_arg()).args(json_args()))
                .subcommand(
                    Command::new("alerts")
                        .arg(month_arg())
                        .arg(today_arg())
                        .args(json_args()),
                ),
        )
        .subcommand(
            Command::new("export").subcommand(
                Command::new("transactions")
                    .arg(format_arg())
                    .arg(Arg::new("out").long("out").required(true)),
            ),
        )
        .subcommand(
            Command::new("import").subcommand(
                Command::new("transactions")
                    .arg(format_arg())
                    .arg(Arg::new("path").long("path").required(true)),
            ),
        )
}
