//! assetpipe CLI - front-end asset pipeline
//!
//! Usage: assetpipe [COMMAND]
//!
//! Commands:
//!   build         Full build, then inject HTML
//!   build-app     App-only build, then inject HTML
//!   watch         Full build, then rebuild the app on change (default)
//!   css, js, vendor, clean-app, clean-vendor
//!   tasks         List tasks and their prerequisites

mod commands;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use assetpipe::presentation::{Cli, Output};

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let command = cli.command();
    let result = commands::dispatch(&cli, command);
    if let Err(e) = &result {
        if cli.json {
            let name = command.task().map(|t| t.as_str()).unwrap_or("tasks");
            Output::new(true, name).failure(&format!("{e:#}"));
        }
    }
    result
}

fn setup_logging(verbose: u8) {
    let filter = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(EnvFilter::try_from_env("ASSETPIPE_LOG").unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();
}
