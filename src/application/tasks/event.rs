//! Task outcomes and progress events

use serde::Serialize;

use crate::domain::value_objects::TaskName;

/// What a finished task did
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TaskOutcome {
    /// Outputs deleted from the build root
    Cleaned { deleted: Vec<String> },
    /// Fingerprinted outputs written
    Wrote { files: Vec<String> },
    /// HTML shell rewritten with asset references
    Injected { html: String, assets: Vec<String> },
    /// Nothing to do
    Noop,
}

impl TaskOutcome {
    /// One-line summary for text output
    pub fn summary(&self) -> String {
        match self {
            TaskOutcome::Cleaned { deleted } => format!("deleted {}", deleted.len()),
            TaskOutcome::Wrote { files } => files.join(", "),
            TaskOutcome::Injected { html, assets } => {
                format!("{} <- {} asset(s)", html, assets.len())
            }
            TaskOutcome::Noop => String::new(),
        }
    }
}

/// Lifecycle state of one task within a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum TaskState {
    Pending,
    Running,
    Done,
    Failed { message: String },
    /// Not run because a prerequisite failed or was skipped
    Skipped { blocked_by: TaskName },
}

/// Progress events for NDJSON output
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TaskEvent {
    /// Task started running
    TaskStarted { task: TaskName },
    /// Task completed successfully
    TaskFinished {
        task: TaskName,
        duration_ms: u64,
        outcome: TaskOutcome,
    },
    /// Task returned an error
    TaskFailed {
        task: TaskName,
        duration_ms: u64,
        error: String,
    },
    /// Task was not run
    TaskSkipped { task: TaskName, blocked_by: TaskName },
}

impl TaskEvent {
    pub fn task(&self) -> TaskName {
        match self {
            TaskEvent::TaskStarted { task }
            | TaskEvent::TaskFinished { task, .. }
            | TaskEvent::TaskFailed { task, .. }
            | TaskEvent::TaskSkipped { task, .. } => *task,
        }
    }

    /// Convert to JSON string with the given "command" field included
    pub fn to_json(&self, command: &str) -> String {
        let mut value =
            serde_json::to_value(self).unwrap_or_else(|_| serde_json::json!({"event": "error"}));
        if let Some(obj) = value.as_object_mut() {
            obj.insert("command".to_string(), serde_json::json!(command));
        }
        serde_json::to_string(&value).unwrap_or_else(|_| "{}".to_string())
    }
}
