//! File System Infrastructure
//!
//! Disk-backed implementation of the FileSystem port and the build root lock.

mod local;
mod lock;

pub use local::LocalFs;
pub use lock::{BuildLock, LOCK_FILE_NAME};
