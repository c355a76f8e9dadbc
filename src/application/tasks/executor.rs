//! DAG executor
//!
//! Runs a target's prerequisite closure. Tasks whose prerequisites are all
//! done start immediately on scoped threads; completions come back over a
//! channel to the scheduling loop, which is the only place state changes
//! and events are emitted. A failure skips every transitive dependent while
//! independent branches already running finish normally.

use std::collections::BTreeMap;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crate::domain::services::TaskGraph;
use crate::domain::value_objects::TaskName;
use crate::error::{PipeError, PipeResult};

use super::event::{TaskEvent, TaskOutcome, TaskState};

/// Performs the work of a single task
pub trait TaskRunner: Sync {
    fn run(&self, task: TaskName) -> PipeResult<TaskOutcome>;
}

/// Final state of one task in a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRecord {
    pub task: TaskName,
    pub state: TaskState,
    pub duration: Duration,
    pub outcome: Option<TaskOutcome>,
}

/// Result of executing a target
#[derive(Debug)]
pub struct BuildReport {
    pub target: TaskName,
    /// Records in prerequisite-first order
    pub records: Vec<TaskRecord>,
    failures: Vec<(TaskName, PipeError)>,
}

impl BuildReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Build-root-relative files written by the run, in task order
    pub fn written_files(&self) -> Vec<String> {
        self.records
            .iter()
            .filter_map(|r| match &r.outcome {
                Some(TaskOutcome::Wrote { files }) => Some(files.iter().cloned()),
                _ => None,
            })
            .flatten()
            .collect()
    }

    /// `Err` for the first failure, the report otherwise.
    pub fn into_result(mut self) -> PipeResult<Self> {
        if self.failures.is_empty() {
            return Ok(self);
        }
        let (task, source) = self.failures.remove(0);
        Err(PipeError::TaskFailed {
            task,
            source: Box::new(source),
        })
    }
}

/// Schedules tasks of a [`TaskGraph`]
pub struct Executor<'g> {
    graph: &'g TaskGraph,
}

impl<'g> Executor<'g> {
    pub fn new(graph: &'g TaskGraph) -> Self {
        Self { graph }
    }

    /// Tasks a run of `target` executes, prerequisites first.
    ///
    /// A long-running target contributes only its prerequisites; the caller
    /// drives its own loop once they are done.
    pub fn plan(&self, target: TaskName) -> PipeResult<Vec<TaskName>> {
        let mut order = self.graph.closure(target)?;
        if target.is_long_running() {
            order.retain(|task| *task != target);
        }
        Ok(order)
    }

    /// Run `target`'s closure, reporting progress through `on_event`.
    pub fn execute<R, F>(&self, target: TaskName, runner: &R, mut on_event: F) -> PipeResult<BuildReport>
    where
        R: TaskRunner,
        F: FnMut(&TaskEvent),
    {
        let order = self.plan(target)?;
        let mut states: BTreeMap<TaskName, TaskState> = order
            .iter()
            .map(|task| (*task, TaskState::Pending))
            .collect();
        let mut durations: BTreeMap<TaskName, Duration> = BTreeMap::new();
        let mut outcomes: BTreeMap<TaskName, TaskOutcome> = BTreeMap::new();
        let mut failures = Vec::new();

        thread::scope(|scope| {
            let (tx, rx) = mpsc::channel();
            let mut running = 0usize;

            loop {
                // Order is prerequisites-first, so one pass propagates skips
                // through the whole closure.
                for task in &order {
                    if states[task] != TaskState::Pending {
                        continue;
                    }
                    if let Some(blocker) = self.blocked_by(*task, &states) {
                        let event = TaskEvent::TaskSkipped {
                            task: *task,
                            blocked_by: blocker,
                        };
                        states.insert(*task, TaskState::Skipped { blocked_by: blocker });
                        on_event(&event);
                    }
                }

                for task in &order {
                    if states[task] != TaskState::Pending || !self.is_ready(*task, &states) {
                        continue;
                    }
                    states.insert(*task, TaskState::Running);
                    on_event(&TaskEvent::TaskStarted { task: *task });
                    running += 1;

                    let tx = tx.clone();
                    let task = *task;
                    scope.spawn(move || {
                        let started = Instant::now();
                        let result = runner.run(task);
                        let _ = tx.send((task, result, started.elapsed()));
                    });
                }

                if running == 0 {
                    break;
                }

                let Ok((task, result, elapsed)) = rx.recv() else {
                    break;
                };
                running -= 1;
                durations.insert(task, elapsed);
                let duration_ms = elapsed.as_millis() as u64;

                match result {
                    Ok(outcome) => {
                        tracing::debug!(%task, duration_ms, "task finished");
                        states.insert(task, TaskState::Done);
                        outcomes.insert(task, outcome.clone());
                        on_event(&TaskEvent::TaskFinished {
                            task,
                            duration_ms,
                            outcome,
                        });
                    }
                    Err(error) => {
                        tracing::debug!(%task, %error, "task failed");
                        let message = error.to_string();
                        states.insert(task, TaskState::Failed {
                            message: message.clone(),
                        });
                        on_event(&TaskEvent::TaskFailed {
                            task,
                            duration_ms,
                            error: message,
                        });
                        failures.push((task, error));
                    }
                }
            }
        });

        let records = order
            .iter()
            .map(|task| TaskRecord {
                task: *task,
                state: states.remove(task).unwrap_or(TaskState::Pending),
                duration: durations.get(task).copied().unwrap_or_default(),
                outcome: outcomes.remove(task),
            })
            .collect();

        Ok(BuildReport {
            target,
            records,
            failures,
        })
    }

    fn is_ready(&self, task: TaskName, states: &BTreeMap<TaskName, TaskState>) -> bool {
        self.graph
            .prerequisites(task)
            .iter()
            .all(|p| states.get(p) == Some(&TaskState::Done))
    }

    fn blocked_by(&self, task: TaskName, states: &BTreeMap<TaskName, TaskState>) -> Option<TaskName> {
        self.graph.prerequisites(task).iter().copied().find(|p| {
            matches!(
                states.get(p),
                Some(TaskState::Failed { .. } | TaskState::Skipped { .. })
            )
        })
    }
}
