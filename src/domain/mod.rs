//! Domain Layer
//!
//! Build rules with no knowledge of where files live:
//! - `value_objects` - hashes, categories, globs, task names
//! - `entities` - fingerprinted outputs and the vendor manifest
//! - `ports` - the filesystem boundary
//! - `services` - resolution, JSX, bundling, injection, the task graph

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
