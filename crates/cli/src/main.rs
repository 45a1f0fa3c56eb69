//! tablebridge CLI
//!
//! - `serve`: host the transfer endpoint over the local database
//! - `execute`: run SQL on a remote endpoint, print the CSV result
//! - `push` / `pull`: copy a whole table to or from a remote endpoint

mod commands;
mod logging;

use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

use anyhow::Context;
use clap::ArgMatches;
use tablebridge_engine::{EngineConfig, SqliteAdapter, CONFIG_FILE_NAME};
use tablebridge_executor::Executor;
use tablebridge_wire::{pull_table, push_table, run_server, ClientConfig, RemoteTransferClient};

use commands::build_cli;

fn main() {
    let matches = build_cli().get_matches();
    if let Err(e) = run(&matches) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run(matches: &ArgMatches) -> anyhow::Result<()> {
    let serving = matches.subcommand_name() == Some("serve");
    let config = load_config(matches, serving)?;

    let level = matches
        .get_one::<String>("log-level")
        .cloned()
        .unwrap_or_else(|| config.logging.level.clone());
    logging::init_logging(&level)?;

    match matches.subcommand() {
        Some(("serve", _)) => serve(config),
        Some(("execute", sub)) => execute(&config, sub),
        Some(("push", sub)) => {
            let (client, table) = remote_table(&config, sub)?;
            let adapter = SqliteAdapter::new(&config.database);
            let rows = push_table(&adapter, &client, &table)?;
            tracing::debug!(table = %table, rows, "push finished");
            println!("pushed {} rows to {}", rows, client.endpoint());
            Ok(())
        }
        Some(("pull", sub)) => {
            let (client, table) = remote_table(&config, sub)?;
            let adapter = SqliteAdapter::new(&config.database);
            let rows = pull_table(&client, &adapter, &table)?;
            tracing::debug!(table = %table, rows, "pull finished");
            println!("pulled {} rows from {}", rows, client.endpoint());
            Ok(())
        }
        _ => {
            build_cli().print_help()?;
            Ok(())
        }
    }
}

/// Load the config file; `serve` writes a default one when it is missing,
/// client commands fall back to built-in defaults.
fn load_config(matches: &ArgMatches, serving: bool) -> anyhow::Result<EngineConfig> {
    let path = matches
        .get_one::<String>("config")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));

    let mut config = read_config(&path, serving)
        .with_context(|| format!("loading {}", path.display()))?;
    if let Some(db) = matches.get_one::<String>("db") {
        config.database.path = Some(PathBuf::from(db));
    }
    Ok(config)
}

fn read_config(path: &Path, serving: bool) -> tablebridge_core::Result<EngineConfig> {
    if serving {
        EngineConfig::load_or_init(path)
    } else if path.exists() {
        EngineConfig::from_file(path)
    } else {
        Ok(EngineConfig::default())
    }
}

fn serve(config: EngineConfig) -> anyhow::Result<()> {
    let adapter = Arc::new(SqliteAdapter::new(&config.database));
    let executor = Executor::new(adapter);
    actix_web::rt::System::new()
        .block_on(run_server(&config.server, executor))
        .context("transfer endpoint stopped")
}

fn client(config: &EngineConfig, sub: &ArgMatches) -> anyhow::Result<RemoteTransferClient> {
    let remote = sub
        .get_one::<String>("remote")
        .context("--remote is required")?;
    Ok(RemoteTransferClient::new(ClientConfig::from_defaults(
        remote.as_str(),
        &config.client,
    )))
}

fn remote_table(
    config: &EngineConfig,
    sub: &ArgMatches,
) -> anyhow::Result<(RemoteTransferClient, String)> {
    let table = sub
        .get_one::<String>("table")
        .context("--table is required")?
        .clone();
    Ok((client(config, sub)?, table))
}

fn execute(config: &EngineConfig, sub: &ArgMatches) -> anyhow::Result<()> {
    let sql = sub.get_one::<String>("sql").context("SQL is required")?;
    let client = client(config, sub)?;
    match client.execute(sql)? {
        Some(table) => print!("{}", tablebridge_codec::encode(&table)?),
        None => eprintln!("statement produced no result set"),
    }
    Ok(())
}
