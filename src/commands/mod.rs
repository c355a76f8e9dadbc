//! Subcommand handlers

mod run;
mod tasks;
mod watch;

use anyhow::{bail, Result};

use assetpipe::application::BuildContext;
use assetpipe::config::Config;
use assetpipe::infrastructure::LocalFs;
use assetpipe::presentation::{Cli, Commands, Output};

pub fn dispatch(cli: &Cli, command: Commands) -> Result<()> {
    match command {
        Commands::Tasks => tasks::cmd_tasks(cli.json),
        Commands::Watch => watch::cmd_watch(cli),
        other => match other.task() {
            Some(task) => run::cmd_run(cli, task),
            None => bail!("'{other:?}' does not run a task"),
        },
    }
}

/// Load configuration for the project and build the task context.
fn load_context(cli: &Cli, output: &Output) -> Result<(BuildContext<LocalFs>, Config)> {
    if !cli.root.is_dir() {
        bail!("project root {} is not a directory", cli.root.display());
    }

    let (config, warnings) = Config::discover(&cli.root, cli.config.as_deref())?;
    output.config_warnings(&warnings);

    let ctx = BuildContext::new(&cli.root, &config, LocalFs::new())?;
    tracing::debug!(build_dir = %ctx.paths().build_dir.display(), "project loaded");
    Ok((ctx, config))
}
