//! Tests for task execution

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use tempfile::tempdir;

use super::*;
use crate::application::context::BuildContext;
use crate::config::Config;
use crate::domain::ports::FileSystem;
use crate::domain::services::TaskGraph;
use crate::domain::value_objects::TaskName::{self, *};
use crate::error::{PipeError, PipeResult};
use crate::infrastructure::LocalFs;

/// Records calls; fails the tasks it is told to
#[derive(Default)]
struct FakeRunner {
    fail: BTreeSet<TaskName>,
    delay: Option<Duration>,
    calls: Mutex<Vec<TaskName>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl FakeRunner {
    fn failing(tasks: &[TaskName]) -> Self {
        Self {
            fail: tasks.iter().copied().collect(),
            ..Self::default()
        }
    }

    fn calls(&self) -> Vec<TaskName> {
        self.calls.lock().unwrap().clone()
    }
}

impl TaskRunner for FakeRunner {
    fn run(&self, task: TaskName) -> PipeResult<TaskOutcome> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            thread::sleep(delay);
        }
        self.calls.lock().unwrap().push(task);
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.fail.contains(&task) {
            Err(PipeError::MissingSource {
                path: format!("{task}.src").into(),
            })
        } else {
            Ok(TaskOutcome::Noop)
        }
    }
}

fn state(report: &BuildReport, task: TaskName) -> Option<&TaskState> {
    report.records.iter().find(|r| r.task == task).map(|r| &r.state)
}

fn position(calls: &[TaskName], task: TaskName) -> usize {
    calls.iter().position(|t| *t == task).unwrap()
}

#[test]
fn runs_each_task_once_after_its_prerequisites() {
    let graph = TaskGraph::standard();
    let runner = FakeRunner::default();

    let report = Executor::new(&graph)
        .execute(Build, &runner, |_| {})
        .unwrap();

    assert!(report.is_success());
    let calls = runner.calls();
    assert_eq!(calls.len(), 6);
    assert!(position(&calls, CleanApp) < position(&calls, Css));
    assert!(position(&calls, CleanApp) < position(&calls, Js));
    assert!(position(&calls, CleanVendor) < position(&calls, Vendor));
    for task in [Css, Js, Vendor] {
        assert!(position(&calls, task) < position(&calls, Build));
    }
}

#[test]
fn build_app_never_touches_vendor() {
    let graph = TaskGraph::standard();
    let runner = FakeRunner::default();

    Executor::new(&graph)
        .execute(BuildApp, &runner, |_| {})
        .unwrap();

    let calls: BTreeSet<_> = runner.calls().into_iter().collect();
    assert_eq!(calls, [CleanApp, Css, Js, BuildApp].into_iter().collect());
}

#[test]
fn independent_tasks_run_concurrently() {
    let graph = TaskGraph::standard();
    let runner = FakeRunner {
        delay: Some(Duration::from_millis(50)),
        ..FakeRunner::default()
    };

    Executor::new(&graph)
        .execute(Build, &runner, |_| {})
        .unwrap();

    assert!(runner.max_in_flight.load(Ordering::SeqCst) >= 2);
}

#[test]
fn failure_skips_dependents_but_not_independent_branches() {
    let graph = TaskGraph::standard();
    let runner = FakeRunner::failing(&[Js]);
    let mut events = Vec::new();

    let report = Executor::new(&graph)
        .execute(Build, &runner, |e| events.push(e.clone()))
        .unwrap();

    assert!(!report.is_success());
    let failed: Vec<_> = report
        .records
        .iter()
        .filter(|r| matches!(r.state, TaskState::Failed { .. }))
        .map(|r| r.task)
        .collect();
    assert_eq!(failed, vec![Js]);
    assert_eq!(state(&report, Css), Some(&TaskState::Done));
    assert_eq!(state(&report, Vendor), Some(&TaskState::Done));
    assert_eq!(
        state(&report, Build),
        Some(&TaskState::Skipped { blocked_by: Js })
    );
    assert!(!runner.calls().contains(&Build));
    assert!(events
        .iter()
        .any(|e| matches!(e, TaskEvent::TaskSkipped { task: Build, .. })));
}

#[test]
fn skips_propagate_transitively() {
    let graph = TaskGraph::standard();
    let runner = FakeRunner::failing(&[CleanApp]);

    let report = Executor::new(&graph)
        .execute(BuildApp, &runner, |_| {})
        .unwrap();

    assert_eq!(
        state(&report, Css),
        Some(&TaskState::Skipped {
            blocked_by: CleanApp
        })
    );
    assert_eq!(
        state(&report, BuildApp),
        Some(&TaskState::Skipped { blocked_by: Css })
    );
    assert_eq!(runner.calls(), vec![CleanApp]);
}

#[test]
fn into_result_reports_first_failure() {
    let graph = TaskGraph::standard();
    let runner = FakeRunner::failing(&[Css]);

    let err = Executor::new(&graph)
        .execute(BuildApp, &runner, |_| {})
        .unwrap()
        .into_result()
        .unwrap_err();

    assert!(matches!(err, PipeError::TaskFailed { task: Css, .. }));
    assert!(err.to_string().starts_with("task 'css' failed"));
}

#[test]
fn long_running_target_runs_only_prerequisites() {
    let graph = TaskGraph::standard();
    let executor = Executor::new(&graph);

    let plan = executor.plan(Watch).unwrap();
    assert_eq!(plan.last(), Some(&Build));

    let runner = FakeRunner::default();
    executor.execute(Watch, &runner, |_| {}).unwrap();
    assert!(!runner.calls().contains(&Watch));
}

#[test]
fn every_task_starts_before_it_finishes() {
    let graph = TaskGraph::standard();
    let runner = FakeRunner::default();
    let mut events = Vec::new();

    Executor::new(&graph)
        .execute(Build, &runner, |e| events.push(e.clone()))
        .unwrap();

    assert_eq!(events.len(), 12);
    for task in [CleanApp, CleanVendor, Css, Js, Vendor, Build] {
        let started = events
            .iter()
            .position(|e| matches!(e, TaskEvent::TaskStarted { task: t } if *t == task))
            .unwrap();
        let finished = events
            .iter()
            .position(|e| matches!(e, TaskEvent::TaskFinished { task: t, .. } if *t == task))
            .unwrap();
        assert!(started < finished);
    }
}

// === Pipeline runner over a real project tree ===

fn project() -> tempfile::TempDir {
    let dir = tempdir().unwrap();
    let fs = LocalFs::new();
    let files: &[(&str, &str)] = &[
        (
            "ui-src/index.html",
            "<head>\n  <!-- inject:css -->\n  <!-- endinject -->\n</head>\n<body>\n  <!-- inject:js -->\n  <!-- endinject -->\n</body>\n",
        ),
        ("ui-src/css/app.css", "body{color:red}"),
        (
            "ui-src/js/app.js",
            "var React = require('react');\nvar View = require('./view');\nReact.render(React.createElement(View), document.body);\n",
        ),
        (
            "ui-src/js/view.jsx",
            "module.exports = function () { return <main className=\"app\">ok</main>; };\n",
        ),
        ("node_modules/normalize.css/normalize.css", "html{margin:0}"),
        ("node_modules/react/index.js", "module.exports = {};"),
    ];
    for (rel, content) in files {
        fs.write(&dir.path().join(rel), content.as_bytes()).unwrap();
    }
    std::fs::write(
        dir.path().join("assetpipe.toml"),
        "[vendor]\nmodules = [\"react\"]\n",
    )
    .unwrap();
    dir
}

fn context(root: &std::path::Path) -> BuildContext<LocalFs> {
    let (config, _) = Config::discover(root, None).unwrap();
    BuildContext::new(root, &config, LocalFs::new()).unwrap()
}

fn outputs(ctx: &BuildContext<LocalFs>) -> Vec<String> {
    use crate::domain::ports::FileSystem;
    ctx.fs()
        .list_files(&ctx.paths().build_dir)
        .unwrap()
        .iter()
        .map(|p| crate::domain::value_objects::to_slash(p))
        .filter(|p| p.starts_with("css/") || p.starts_with("js/"))
        .collect()
}

#[test]
fn full_build_writes_and_references_every_output() {
    let dir = project();
    let ctx = context(dir.path());

    run_target(&ctx, Build, |_| {}).unwrap();

    let files = outputs(&ctx);
    assert_eq!(files.len(), 4, "{files:?}");
    let html = std::fs::read_to_string(ctx.paths().build_dir.join("index.html")).unwrap();
    for file in &files {
        assert!(html.contains(file.as_str()), "{file} not referenced");
    }
    let vendor_js = html.find("js/vendor-").unwrap();
    let app_js = html.find("js/app-").unwrap();
    assert!(vendor_js < app_js);
}

#[test]
fn repeated_build_is_stable() {
    let dir = project();
    let ctx = context(dir.path());

    run_target(&ctx, Build, |_| {}).unwrap();
    let first = outputs(&ctx);
    run_target(&ctx, Build, |_| {}).unwrap();

    assert_eq!(outputs(&ctx), first);
}

#[test]
fn build_app_replaces_app_outputs_and_keeps_vendor() {
    let dir = project();
    let ctx = context(dir.path());
    run_target(&ctx, Build, |_| {}).unwrap();
    let before = outputs(&ctx);

    std::fs::write(dir.path().join("ui-src/css/app.css"), "body{color:blue}").unwrap();
    run_target(&ctx, BuildApp, |_| {}).unwrap();
    let after = outputs(&ctx);

    let changed: Vec<_> = before.iter().filter(|f| !after.contains(f)).collect();
    assert_eq!(changed.len(), 1);
    assert!(changed[0].starts_with("css/app-"));
    assert_eq!(after.len(), 4);
}

#[test]
fn failed_task_fails_the_run() {
    let dir = project();
    std::fs::remove_file(dir.path().join("ui-src/css/app.css")).unwrap();
    let ctx = context(dir.path());

    let err = run_target(&ctx, BuildApp, |_| {}).unwrap_err();

    assert!(matches!(err, PipeError::TaskFailed { task: Css, .. }));
    assert!(!ctx.paths().build_dir.join("index.html").exists());
}
