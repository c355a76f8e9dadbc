//! Watch event types and options

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Default debounce duration in milliseconds
pub const DEBOUNCE_MS: u64 = 100;

/// Watch options
#[derive(Debug, Clone)]
pub struct WatchOptions {
    /// Quiet period before a batch of changes triggers a rebuild
    pub debounce: Duration,
    /// How long the loop blocks on the event channel between checks
    pub poll_interval: Duration,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(DEBOUNCE_MS),
            poll_interval: Duration::from_millis(50),
        }
    }
}

impl WatchOptions {
    /// Set the debounce period
    pub fn with_debounce_ms(mut self, ms: u64) -> Self {
        self.debounce = Duration::from_millis(ms);
        self
    }
}

/// Watch event types for NDJSON output
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum WatchEvent {
    /// Initial build done, watching
    WatchStarted { source: String, debounce_ms: u64 },
    /// File changed
    FileChanged { path: String },
    /// App rebuild started for a batch of changes
    RebuildStarted { changes: usize },
    /// App rebuild completed
    RebuildComplete { files: Vec<String>, duration_ms: u64 },
    /// Error occurred; watching continues
    Error { message: String },
    /// Watch stopped
    Shutdown,
}

impl WatchEvent {
    /// Convert to JSON string with "command": "watch" field included
    pub fn to_json(&self) -> String {
        // Serialize to Value, add command field, then serialize to string
        let mut value =
            serde_json::to_value(self).unwrap_or_else(|_| serde_json::json!({"event": "error"}));
        if let Some(obj) = value.as_object_mut() {
            obj.insert("command".to_string(), serde_json::json!("watch"));
        }
        serde_json::to_string(&value).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Watcher state for debouncing
#[derive(Debug)]
pub struct WatcherState {
    debounce: Duration,
    pending_changes: BTreeSet<PathBuf>,
    last_change: Option<Instant>,
}

impl Default for WatcherState {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEBOUNCE_MS))
    }
}

impl WatcherState {
    /// Create a new watcher state
    pub fn new(debounce: Duration) -> Self {
        Self {
            debounce,
            pending_changes: BTreeSet::new(),
            last_change: None,
        }
    }

    /// Add a file change to pending changes; restarts the quiet period
    pub fn add_change(&mut self, path: PathBuf) {
        self.pending_changes.insert(path);
        self.last_change = Some(Instant::now());
    }

    /// Check if debounce period has passed and we have pending changes
    pub fn should_rebuild(&self) -> bool {
        if let Some(last) = self.last_change {
            !self.pending_changes.is_empty() && last.elapsed() >= self.debounce
        } else {
            false
        }
    }

    /// Take all pending changes, sorted, resetting state
    pub fn take_changes(&mut self) -> Vec<PathBuf> {
        let changes: Vec<_> = std::mem::take(&mut self.pending_changes)
            .into_iter()
            .collect();
        self.last_change = None;
        changes
    }
}
