//! Build root lock
//!
//! An advisory exclusive lock on `<build>/.assetpipe.lock` keeps two
//! pipeline invocations from cleaning and writing the same build root at
//! once. The lock is released when the guard is dropped.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::error::{PipeError, PipeResult};

/// Lock file name inside the build root
pub const LOCK_FILE_NAME: &str = ".assetpipe.lock";

/// Held lock on a build root
#[derive(Debug)]
pub struct BuildLock {
    file: File,
    path: PathBuf,
}

impl BuildLock {
    /// Take the lock, failing immediately if another process holds it.
    pub fn acquire(build_dir: &Path) -> PipeResult<Self> {
        fs::create_dir_all(build_dir)?;
        let path = build_dir.join(LOCK_FILE_NAME);

        let file = File::create(&path).map_err(|e| PipeError::Lock {
            path: path.clone(),
            message: e.to_string(),
        })?;
        file.try_lock_exclusive().map_err(|_| PipeError::Lock {
            path: path.clone(),
            message: "another build is running on this directory".to_string(),
        })?;

        tracing::debug!(path = %path.display(), "acquired build lock");
        Ok(Self { file, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for BuildLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}
