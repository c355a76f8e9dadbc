//! Clean result types

use std::path::PathBuf;

use crate::domain::value_objects::AssetCategory;

/// Result of a clean operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanResult {
    /// Family that was cleaned
    pub category: AssetCategory,
    /// Build-root-relative paths that were deleted
    pub deleted: Vec<PathBuf>,
}

impl CleanResult {
    pub fn new(category: AssetCategory) -> Self {
        Self {
            category,
            deleted: Vec::new(),
        }
    }

    /// Add a deleted file
    pub fn add_deleted(&mut self, path: PathBuf) {
        self.deleted.push(path);
    }

    /// Whether anything was removed
    pub fn is_empty(&self) -> bool {
        self.deleted.is_empty()
    }
}
