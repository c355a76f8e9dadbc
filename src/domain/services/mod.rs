//! Domain Services
//!
//! Build logic that operates on domain entities: module resolution,
//! JSX transform, bundling, HTML injection and the task graph.

pub mod bundler;
pub mod injector;
pub mod jsx;
pub mod lexer;
pub mod resolver;
pub mod task_graph;

pub use bundler::{Bundle, BundleEntry, BundleOptions, BundledModule, Bundler};
pub use injector::{inject, Injection};
pub use jsx::JsxTransform;
pub use resolver::{is_bare, normalize_path, ModuleResolver};
pub use task_graph::{TaskGraph, TaskSpec};
