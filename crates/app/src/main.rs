//! Courier - Main Entry Point

use std::io;
use std::process::ExitCode;

use anyhow::{Context, Result};
use courier::logging::init_logging;
use courier::{AppConfig, Cli, cli, commands};
use courier_application::VariableStore;
use courier_infrastructure::{FileKeyValueStore, KeyValueVariableStorage};
use tracing::debug;

fn main() -> ExitCode {
    let cli = cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = AppConfig::load(&cli.global)?;
    init_logging(&config.log_level)?;
    debug!(data_dir = %config.data_dir.display(), "starting courier");

    let storage = KeyValueVariableStorage::new(FileKeyValueStore::new(&config.data_dir));
    let mut store = VariableStore::load(storage).with_context(|| {
        format!(
            "failed to load variables from {}",
            config.data_dir.display()
        )
    })?;

    let mut out = io::stdout().lock();
    commands::execute(&mut store, &cli.command, &mut out)
}
