//! assetpipe - front-end asset pipeline
//!
//! Fingerprints stylesheets, bundles application and vendor scripts (with a
//! JSX transform), injects the resulting references into an HTML shell and
//! rebuilds the app on source changes. Work is organised as a graph of
//! named tasks run concurrently where prerequisites allow.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

// Re-exports for convenience
pub use application::{run_target, BuildContext, BuildReport, TaskEvent, WatchEvent};
pub use config::Config;
pub use domain::services::TaskGraph;
pub use domain::value_objects::{AssetCategory, TaskName};
pub use error::{PipeError, PipeResult};
