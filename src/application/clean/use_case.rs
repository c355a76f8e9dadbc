//! Clean Use Case
//!
//! Orchestrates the file cleaning process.

use crate::application::context::BuildContext;
use crate::domain::ports::{FileSystem, FsError};
use crate::domain::value_objects::AssetCategory;
use crate::error::PipeResult;

use super::result::CleanResult;

/// Clean use case - removes every build output matching a family glob
pub struct CleanUseCase<'a, FS: FileSystem> {
    ctx: &'a BuildContext<FS>,
}

impl<'a, FS: FileSystem> CleanUseCase<'a, FS> {
    pub fn new(ctx: &'a BuildContext<FS>) -> Self {
        Self { ctx }
    }

    /// Delete all `category` outputs.
    ///
    /// A missing build root or an empty match set is not an error. Files
    /// that disappear between listing and removal are ignored; any other
    /// filesystem error aborts the clean.
    pub fn execute(&self, category: AssetCategory) -> PipeResult<CleanResult> {
        let mut result = CleanResult::new(category);
        let build_dir = &self.ctx.paths().build_dir;

        for rel in self.ctx.list_outputs(category)? {
            match self.ctx.fs().remove(&build_dir.join(&rel)) {
                Ok(()) | Err(FsError::NotFound(_)) => {}
                Err(e) => return Err(e.into()),
            }
            tracing::debug!(path = %rel.display(), %category, "deleted output");
            result.add_deleted(rel);
        }

        Ok(result)
    }
}
