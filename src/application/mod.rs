//! Application Layer
//!
//! Use cases that orchestrate the build.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain build rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `CleanUseCase` - Delete one output family
//! - `StyleUseCase` - Fingerprint the app stylesheet
//! - `ScriptsUseCase` - Bundle the app scripts
//! - `VendorUseCase` - Normalize stylesheet and vendor bundle
//! - `InjectUseCase` - Rewrite the HTML shell
//! - `WatchUseCase` - Rebuild the app subset on change
//!
//! ## Execution
//!
//! - `tasks` - DAG executor and the task bodies of the standard graph

pub mod clean;
pub mod context;
pub mod inject;
pub mod scripts;
pub mod styles;
pub mod tasks;
pub mod vendor;
pub mod watch;

pub use clean::{CleanResult, CleanUseCase};
pub use context::{BuildContext, ProjectPaths};
pub use inject::{InjectResult, InjectUseCase};
pub use scripts::{ScriptsResult, ScriptsUseCase};
pub use styles::StyleUseCase;
pub use tasks::{
    run_target, BuildReport, Executor, PipelineRunner, TaskEvent, TaskOutcome, TaskRecord,
    TaskRunner, TaskState,
};
pub use vendor::{VendorResult, VendorUseCase};
pub use watch::{WatchEvent, WatchOptions, WatchUseCase, WatcherState};
