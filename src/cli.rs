// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{crate_version, value_parser, Arg, ArgAction, ArgGroup, Command};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print as JSON lines"),
    )
}

fn type_arg(required: bool) -> Arg {
    Arg::new("type")
        .long("type")
        .short('t')
        .required(required)
        .value_parser(["income", "expense"])
        .help("income or expense")
}

fn months_arg() -> Arg {
    Arg::new("months")
        .long("months")
        .value_parser(value_parser!(usize))
        .default_value("6")
        .help("Trailing window: 6 or 12 months")
}

pub fn build_cli() -> Command {
    Command::new("financeflow")
        .about("Track income and expenses against a hosted backend; dashboards and reports")
        .version(crate_version!())
        .arg(
            Arg::new("url")
                .long("url")
                .global(true)
                .env("FINANCEFLOW_URL")
                .help("Backend project URL"),
        )
        .arg(
            Arg::new("api_key")
                .long("api-key")
                .global(true)
                .env("FINANCEFLOW_API_KEY")
                .hide_env_values(true)
                .help("Backend anon API key"),
        )
        .arg(
            Arg::new("token")
                .long("token")
                .global(true)
                .env("FINANCEFLOW_ACCESS_TOKEN")
                .hide_env_values(true)
                .help("Access token of the signed-in user"),
        )
        .arg(
            Arg::new("user")
                .long("user")
                .global(true)
                .env("FINANCEFLOW_USER_ID")
                .help("Owner identifier of the signed-in user"),
        )
        .subcommand(
            Command::new("config")
                .about("Local connection settings")
                .subcommand(Command::new("show"))
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("key").required(true))
                        .arg(Arg::new("value").required(true)),
                )
                .subcommand(Command::new("unset").arg(Arg::new("key").required(true))),
        )
        .subcommand(json_flags(
            Command::new("dashboard").about("Totals, last 6 months, expense breakdown, recent activity"),
        ))
        .subcommand(
            Command::new("tx")
                .about("Transactions")
                .subcommand(json_flags(
                    Command::new("list")
                        .arg(Arg::new("from").long("from").help("Start date YYYY-MM-DD"))
                        .arg(Arg::new("to").long("to").help("End date YYYY-MM-DD"))
                        .arg(type_arg(false))
                        .arg(Arg::new("category").long("category").short('c'))
                        .arg(Arg::new("search").long("search").short('s'))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(
                    Command::new("add")
                        .arg(type_arg(true))
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .short('a')
                                .required(true)
                                .allow_negative_numbers(true),
                        )
                        .arg(Arg::new("date").long("date").short('d').required(true))
                        .arg(Arg::new("category").long("category").short('c'))
                        .arg(Arg::new("description").long("description")),
                )
                .subcommand(
                    Command::new("edit")
                        .arg(Arg::new("id").required(true))
                        .arg(type_arg(false))
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .short('a')
                                .allow_negative_numbers(true),
                        )
                        .arg(Arg::new("date").long("date").short('d'))
                        .arg(Arg::new("category").long("category").short('c'))
                        .arg(
                            Arg::new("clear_category")
                                .long("clear-category")
                                .action(ArgAction::SetTrue),
                        )
                        .group(ArgGroup::new("cat").args(["category", "clear_category"]))
                        .arg(Arg::new("description").long("description")),
                )
                .subcommand(Command::new("rm").arg(Arg::new("id").required(true))),
        )
        .subcommand(
            Command::new("category")
                .about("Categories")
                .subcommand(json_flags(Command::new("list").arg(type_arg(false))))
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").required(true))
                        .arg(type_arg(true))
                        .arg(Arg::new("color").long("color"))
                        .arg(Arg::new("icon").long("icon")),
                )
                .subcommand(
                    Command::new("rm")
                        .arg(Arg::new("name").required(true))
                        .arg(type_arg(false)),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Monthly trends, category breakdowns and report export")
                .subcommand(
                    Command::new("show")
                        .arg(months_arg())
                        .arg(Arg::new("json").long("json").action(ArgAction::SetTrue)),
                )
                .subcommand(
                    Command::new("export")
                        .arg(months_arg())
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .default_value("text")
                                .help("text|json"),
                        )
                        .arg(Arg::new("out_dir").long("out-dir").default_value("."))
                        .arg(
                            Arg::new("rows_per_page")
                                .long("rows-per-page")
                                .value_parser(value_parser!(usize)),
                        ),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Export transactions")
                .subcommand(
                    Command::new("transactions")
                        .arg(Arg::new("format").long("format").required(true).help("csv|json"))
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
        .subcommand(
            Command::new("admin")
                .about("Administration (admin role only)")
                .subcommand(Command::new("users")),
        )
}
