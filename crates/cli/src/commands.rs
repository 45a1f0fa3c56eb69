//! Clap command tree definition.

use clap::{Arg, Command};

/// Build the complete CLI command tree.
pub fn build_cli() -> Command {
    Command::new("tablebridge")
        .about("Move query results between SQL databases as CSV over HTTP")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .help("Config file (default: tablebridge.toml)")
                .global(true),
        )
        .arg(
            Arg::new("db")
                .long("db")
                .help("Local SQLite database, overrides [database] path")
                .global(true),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .help("Log level, overrides [logging] level")
                .global(true),
        )
        .subcommand(build_serve())
        .subcommand(build_execute())
        .subcommand(build_push())
        .subcommand(build_pull())
}

fn remote_arg() -> Arg {
    Arg::new("remote")
        .long("remote")
        .help("Transfer endpoint URL, e.g. http://host:8080/transfer")
        .required(true)
}

fn table_arg() -> Arg {
    Arg::new("table")
        .long("table")
        .help("Table name")
        .required(true)
}

fn build_serve() -> Command {
    Command::new("serve").about("Serve the transfer endpoint over the local database")
}

fn build_execute() -> Command {
    Command::new("execute")
        .about("Run SQL on a remote endpoint and print the CSV result")
        .arg(remote_arg())
        .arg(Arg::new("sql").help("SQL statement").required(true))
}

fn build_push() -> Command {
    Command::new("push")
        .about("Upsert every row of a local table into the remote table")
        .arg(remote_arg())
        .arg(table_arg())
}

fn build_pull() -> Command {
    Command::new("pull")
        .about("Upsert every row of a remote table into the local table")
        .arg(remote_arg())
        .arg(table_arg())
}
