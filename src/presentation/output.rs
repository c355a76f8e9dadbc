//! Output Rendering
//!
//! Gulp-style text lines or NDJSON events, chosen once per process.

use std::path::Path;

use chrono::Local;

use crate::application::{TaskEvent, WatchEvent};
use crate::config::ConfigWarning;
use crate::domain::services::TaskGraph;

/// Output format for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// Writes progress for one CLI command
#[derive(Debug, Clone)]
pub struct Output {
    format: OutputFormat,
    command: String,
}

impl Output {
    pub fn new(json: bool, command: &str) -> Self {
        Self {
            format: if json {
                OutputFormat::Json
            } else {
                OutputFormat::Text
            },
            command: command.to_string(),
        }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn task_event(&self, event: &TaskEvent) {
        match self.format {
            OutputFormat::Json => println!("{}", event.to_json(&self.command)),
            OutputFormat::Text => {
                let line = render_task_event(&timestamp(), event);
                match event {
                    TaskEvent::TaskFailed { .. } => eprintln!("{line}"),
                    _ => println!("{line}"),
                }
            }
        }
    }

    pub fn watch_event(&self, event: &WatchEvent) {
        match self.format {
            OutputFormat::Json => println!("{}", event.to_json()),
            OutputFormat::Text => {
                let line = render_watch_event(&timestamp(), event);
                match event {
                    WatchEvent::Error { .. } => eprintln!("{line}"),
                    _ => println!("{line}"),
                }
            }
        }
    }

    pub fn config_warnings(&self, warnings: &[ConfigWarning]) {
        for warning in warnings {
            match self.format {
                OutputFormat::Json => println!(
                    "{}",
                    serde_json::json!({
                        "event": "config_warning",
                        "command": self.command,
                        "key": warning.key,
                        "file": warning.file.display().to_string(),
                        "line": warning.line,
                        "suggestion": warning.suggestion,
                    })
                ),
                OutputFormat::Text => eprintln!("{}", render_config_warning(warning)),
            }
        }
    }

    /// Final failure line for the whole command
    pub fn failure(&self, message: &str) {
        match self.format {
            OutputFormat::Json => println!(
                "{}",
                serde_json::json!({
                    "event": "error",
                    "command": self.command,
                    "message": message,
                })
            ),
            OutputFormat::Text => eprintln!("[{}] Error: {message}", timestamp()),
        }
    }

    pub fn task_list(&self, graph: &TaskGraph) {
        match self.format {
            OutputFormat::Json => println!("{}", render_task_list_json(graph)),
            OutputFormat::Text => print!("{}", render_task_list(graph)),
        }
    }
}

fn timestamp() -> String {
    Local::now().format("%H:%M:%S").to_string()
}

/// One text line for a task event
pub fn render_task_event(timestamp: &str, event: &TaskEvent) -> String {
    match event {
        TaskEvent::TaskStarted { task } => format!("[{timestamp}] Starting '{task}'..."),
        TaskEvent::TaskFinished {
            task,
            duration_ms,
            outcome,
        } => {
            let summary = outcome.summary();
            if summary.is_empty() {
                format!("[{timestamp}] Finished '{task}' after {duration_ms} ms")
            } else {
                format!("[{timestamp}] Finished '{task}' after {duration_ms} ms ({summary})")
            }
        }
        TaskEvent::TaskFailed {
            task,
            duration_ms,
            error,
        } => format!("[{timestamp}] '{task}' errored after {duration_ms} ms: {error}"),
        TaskEvent::TaskSkipped { task, blocked_by } => {
            format!("[{timestamp}] Skipping '{task}' ('{blocked_by}' did not complete)")
        }
    }
}

/// One text line for a watch event
pub fn render_watch_event(timestamp: &str, event: &WatchEvent) -> String {
    match event {
        WatchEvent::WatchStarted {
            source,
            debounce_ms,
        } => format!("[{timestamp}] Watching {source} (debounce {debounce_ms} ms)"),
        WatchEvent::FileChanged { path } => format!("[{timestamp}] Changed {path}"),
        WatchEvent::RebuildStarted { changes } => {
            let noun = if *changes == 1 { "change" } else { "changes" };
            format!("[{timestamp}] Rebuilding app ({changes} {noun})")
        }
        WatchEvent::RebuildComplete { files, duration_ms } => {
            format!(
                "[{timestamp}] Rebuilt app in {duration_ms} ms: {}",
                files.join(", ")
            )
        }
        WatchEvent::Error { message } => format!("[{timestamp}] Rebuild failed: {message}"),
        WatchEvent::Shutdown => format!("[{timestamp}] Stopped watching"),
    }
}

pub fn render_config_warning(warning: &ConfigWarning) -> String {
    let location = match warning.line {
        Some(line) => format!("{}:{line}", display(&warning.file)),
        None => display(&warning.file),
    };
    match &warning.suggestion {
        Some(suggestion) => format!(
            "Warning: unknown config key '{}' in {location} (did you mean '{suggestion}'?)",
            warning.key
        ),
        None => format!("Warning: unknown config key '{}' in {location}", warning.key),
    }
}

fn display(path: &Path) -> String {
    path.display().to_string()
}

/// Aligned task listing, one task per line
pub fn render_task_list(graph: &TaskGraph) -> String {
    let width = graph
        .specs()
        .map(|spec| spec.name.as_str().len())
        .max()
        .unwrap_or(0);

    let mut out = String::from("Tasks\n");
    for spec in graph.specs() {
        let deps = if spec.prerequisites.is_empty() {
            String::new()
        } else {
            let names: Vec<&str> = spec.prerequisites.iter().map(|t| t.as_str()).collect();
            format!(" [{}]", names.join(", "))
        };
        out.push_str(&format!(
            "  {:<width$}  {}{}\n",
            spec.name.as_str(),
            spec.description,
            deps,
        ));
    }
    out
}

pub fn render_task_list_json(graph: &TaskGraph) -> String {
    let tasks: Vec<serde_json::Value> = graph
        .specs()
        .map(|spec| {
            serde_json::json!({
                "name": spec.name,
                "prerequisites": spec.prerequisites,
                "description": spec.description,
            })
        })
        .collect();
    serde_json::json!({
        "event": "tasks",
        "command": "tasks",
        "tasks": tasks,
    })
    .to_string()
}
