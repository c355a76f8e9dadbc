//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - Local file system and the build root lock

pub mod fs;

// Re-export for convenience
pub use fs::{BuildLock, LocalFs};
