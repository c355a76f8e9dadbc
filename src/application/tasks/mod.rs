//! Task execution
//!
//! - `executor` - concurrent DAG scheduling over any [`TaskRunner`]
//! - `runner` - the pipeline's task bodies
//! - `event` - outcomes, states and NDJSON progress events

mod event;
mod executor;
mod runner;

#[cfg(test)]
mod tests;

pub use event::{TaskEvent, TaskOutcome, TaskState};
pub use executor::{BuildReport, Executor, TaskRecord, TaskRunner};
pub use runner::{run_target, PipelineRunner};
