use anyhow::Result;

use assetpipe::domain::services::TaskGraph;
use assetpipe::presentation::Output;

pub fn cmd_tasks(json: bool) -> Result<()> {
    Output::new(json, "tasks").task_list(&TaskGraph::standard());
    Ok(())
}
