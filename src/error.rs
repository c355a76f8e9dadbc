//! Error types for assetpipe
//!
//! Uses `thiserror` for library errors; the binary wraps them in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ports::FsError;
use crate::domain::value_objects::{AssetCategory, TaskName};

/// Result type alias for pipeline operations
pub type PipeResult<T> = Result<T, PipeError>;

/// Main error type for pipeline operations
#[derive(Error, Debug)]
pub enum PipeError {
    /// A source file the task needs does not exist
    #[error("source file not found: {path}")]
    MissingSource { path: PathBuf },

    /// Configuration file could not be parsed
    #[error("invalid configuration in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// Glob pattern failed to compile
    #[error("invalid glob '{pattern}': {message}")]
    InvalidGlob { pattern: String, message: String },

    /// Canonical output name is not owned by exactly its own family
    #[error("{category} output '{name}' is not matched by the {category} glob only")]
    GlobPartition { category: AssetCategory, name: String },

    /// Vendor manifest failed validation
    #[error("invalid vendor manifest: {message}")]
    InvalidManifest { message: String },

    /// A `require` specifier could not be resolved
    #[error("cannot find module '{specifier}' from {from}")]
    UnresolvedModule { specifier: String, from: PathBuf },

    /// JSX transform failed
    #[error("transform error in {file}:{line}: {message}")]
    Transform {
        file: PathBuf,
        line: usize,
        message: String,
    },

    /// A prerequisite names a task the graph does not define
    #[error("task '{task}' is not defined")]
    UndefinedTask { task: TaskName },

    /// Task graph contains a cycle
    #[error("task graph cycle through '{task}'")]
    DependencyCycle { task: TaskName },

    /// A task failed; dependents were skipped
    #[error("task '{task}' failed: {source}")]
    TaskFailed {
        task: TaskName,
        #[source]
        source: Box<PipeError>,
    },

    /// Build lock could not be acquired
    #[error("cannot lock build directory {path}: {message}")]
    Lock { path: PathBuf, message: String },

    /// File watcher failed
    #[error("watcher error: {0}")]
    Watch(String),

    /// Filesystem port error
    #[error(transparent)]
    Fs(#[from] FsError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
