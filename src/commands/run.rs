use anyhow::Result;

use assetpipe::application::run_target;
use assetpipe::domain::value_objects::TaskName;
use assetpipe::presentation::{Cli, Output};

use super::load_context;

pub fn cmd_run(cli: &Cli, task: TaskName) -> Result<()> {
    let output = Output::new(cli.json, task.as_str());
    let (ctx, _config) = load_context(cli, &output)?;

    let report = run_target(&ctx, task, |event| output.task_event(event))?;
    tracing::info!(
        task = %report.target,
        tasks = report.records.len(),
        "build finished"
    );
    Ok(())
}
