//! CLI Argument Parsing
//!
//! This module defines the CLI interface using clap.
//!
//! ## Design Notes
//!
//! - Global flags (--json, --verbose, --root, --config) are inherited by all subcommands
//! - Running without a subcommand starts `watch`, like the default task

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::value_objects::TaskName;

/// assetpipe - front-end asset pipeline
#[derive(Parser, Debug)]
#[command(name = "assetpipe")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Run 'assetpipe' without arguments to build and watch.")]
pub struct Cli {
    /// Output NDJSON events for CI
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Project root
    #[arg(short = 'C', long, global = true, value_name = "DIR", default_value = ".")]
    pub root: PathBuf,

    /// Configuration file (default: <root>/assetpipe.toml)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Full build: css, js and vendor, then inject HTML
    Build,

    /// App-only build: css and js, then inject HTML
    BuildApp,

    /// Full build, then rebuild the app on every source change
    Watch,

    /// Fingerprint the app stylesheet
    Css,

    /// Bundle the application scripts
    Js,

    /// Bundle vendor scripts and the normalize stylesheet
    Vendor,

    /// Delete app outputs from the build directory
    CleanApp,

    /// Delete vendor outputs from the build directory
    CleanVendor,

    /// List tasks and their prerequisites
    Tasks,
}

impl Commands {
    /// Task this subcommand runs; `None` for informational commands
    pub fn task(&self) -> Option<TaskName> {
        match self {
            Commands::Build => Some(TaskName::Build),
            Commands::BuildApp => Some(TaskName::BuildApp),
            Commands::Watch => Some(TaskName::Watch),
            Commands::Css => Some(TaskName::Css),
            Commands::Js => Some(TaskName::Js),
            Commands::Vendor => Some(TaskName::Vendor),
            Commands::CleanApp => Some(TaskName::CleanApp),
            Commands::CleanVendor => Some(TaskName::CleanVendor),
            Commands::Tasks => None,
        }
    }
}

impl Cli {
    /// Subcommand to run, defaulting to `watch`
    pub fn command(&self) -> Commands {
        self.command.unwrap_or(Commands::Watch)
    }
}
