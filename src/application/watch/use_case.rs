//! Watch Use Case implementation

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::channel;
use std::sync::Arc;
use std::time::Instant;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};

use crate::application::context::BuildContext;
use crate::application::tasks::{run_target, TaskEvent};
use crate::domain::ports::FileSystem;
use crate::domain::value_objects::{to_slash, ContentHash, TaskName};
use crate::error::{PipeError, PipeResult};

use super::event::{WatchEvent, WatchOptions, WatcherState};

/// Canonical roots used to compare notify paths
struct Roots {
    project: PathBuf,
    source: PathBuf,
    build: PathBuf,
}

impl Roots {
    fn resolve<FS: FileSystem>(ctx: &BuildContext<FS>) -> Self {
        let canonical = |p: &Path| p.canonicalize().unwrap_or_else(|_| p.to_path_buf());
        let paths = ctx.paths();
        Self {
            project: canonical(&paths.root),
            source: canonical(&paths.source_dir),
            build: canonical(&paths.build_dir),
        }
    }

    fn display(&self, path: &Path) -> String {
        to_slash(path.strip_prefix(&self.project).unwrap_or(path))
    }
}

/// Watch Use Case
///
/// Runs the full build once, then rebuilds the app subset whenever the
/// source tree changes. This is the entry point for `assetpipe watch`.
pub struct WatchUseCase<'a, FS: FileSystem> {
    ctx: &'a BuildContext<FS>,
    options: WatchOptions,
}

impl<'a, FS: FileSystem> WatchUseCase<'a, FS> {
    pub fn new(ctx: &'a BuildContext<FS>, options: WatchOptions) -> Self {
        Self { ctx, options }
    }

    /// Start watching (blocking)
    ///
    /// Returns an error only if the initial build or the watcher setup
    /// fails. Incremental rebuild failures are reported as
    /// [`WatchEvent::Error`] and the loop keeps running until `running` is
    /// cleared.
    pub fn start<F, G>(&self, running: Arc<AtomicBool>, mut on_event: F, mut on_task: G) -> PipeResult<()>
    where
        F: FnMut(WatchEvent),
        G: FnMut(&TaskEvent),
    {
        let (tx, rx) = channel();
        let mut watcher = RecommendedWatcher::new(
            move |res: Result<Event, notify::Error>| {
                if let Ok(event) = res {
                    for path in event.paths {
                        let _ = tx.send(path);
                    }
                }
            },
            Config::default(),
        )
        .map_err(|e| PipeError::Watch(e.to_string()))?;

        let source = &self.ctx.paths().source_dir;
        watcher
            .watch(source, RecursiveMode::Recursive)
            .map_err(|e| PipeError::Watch(format!("{}: {e}", source.display())))?;

        // Registered and snapshotted first, so edits made while the initial
        // build runs are queued for the first rebuild
        let roots = Roots::resolve(self.ctx);
        let mut hashes = self.snapshot(&roots)?;
        let mut state = WatcherState::new(self.options.debounce);

        run_target(self.ctx, TaskName::Watch, &mut on_task)?;

        on_event(WatchEvent::WatchStarted {
            source: roots.display(&roots.source),
            debounce_ms: self.options.debounce.as_millis() as u64,
        });

        while running.load(Ordering::SeqCst) {
            // Events queued while a rebuild ran land here and form the next batch
            if let Ok(path) = rx.recv_timeout(self.options.poll_interval) {
                self.observe(path, &roots, &mut hashes, &mut state);
                while let Ok(path) = rx.try_recv() {
                    self.observe(path, &roots, &mut hashes, &mut state);
                }
            }

            if state.should_rebuild() {
                let changes = state.take_changes();
                for path in &changes {
                    on_event(WatchEvent::FileChanged {
                        path: roots.display(path),
                    });
                }
                self.rebuild(changes.len(), &mut on_event, &mut on_task);
            }
        }

        drop(watcher);
        on_event(WatchEvent::Shutdown);
        Ok(())
    }

    /// Content hash of every file currently in the source tree
    fn snapshot(&self, roots: &Roots) -> PipeResult<HashMap<PathBuf, ContentHash>> {
        let mut hashes = HashMap::new();
        for rel in self.ctx.fs().list_files(&roots.source)? {
            let path = roots.source.join(rel);
            if let Ok(content) = self.ctx.fs().read(&path) {
                hashes.insert(path, ContentHash::from_bytes(&content));
            }
        }
        Ok(hashes)
    }

    /// Queue `path` if its content actually changed (or it was removed).
    fn observe(
        &self,
        path: PathBuf,
        roots: &Roots,
        hashes: &mut HashMap<PathBuf, ContentHash>,
        state: &mut WatcherState,
    ) {
        let path = canonical_event_path(path);
        if path.starts_with(&roots.build) || path.is_dir() {
            return;
        }

        match self.ctx.fs().read(&path) {
            Ok(content) => {
                let hash = ContentHash::from_bytes(&content);
                if hashes.get(&path) == Some(&hash) {
                    return;
                }
                hashes.insert(path.clone(), hash);
                state.add_change(path);
            }
            Err(_) => {
                if hashes.remove(&path).is_some() {
                    state.add_change(path);
                }
            }
        }
    }

    fn rebuild(
        &self,
        changes: usize,
        on_event: &mut impl FnMut(WatchEvent),
        on_task: &mut impl FnMut(&TaskEvent),
    ) {
        on_event(WatchEvent::RebuildStarted { changes });
        let started = Instant::now();

        match run_target(self.ctx, TaskName::BuildApp, &mut *on_task) {
            Ok(report) => on_event(WatchEvent::RebuildComplete {
                files: report.written_files(),
                duration_ms: started.elapsed().as_millis() as u64,
            }),
            Err(e) => {
                tracing::warn!(error = %e, "rebuild failed; still watching");
                on_event(WatchEvent::Error {
                    message: e.to_string(),
                });
            }
        }
    }
}

/// Canonical form of a notify path. Removed files no longer resolve, so
/// their parent directory is canonicalized instead.
fn canonical_event_path(path: PathBuf) -> PathBuf {
    if let Ok(canonical) = path.canonicalize() {
        return canonical;
    }
    let resolved = match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => parent.canonicalize().ok().map(|dir| dir.join(name)),
        _ => None,
    };
    resolved.unwrap_or(path)
}
