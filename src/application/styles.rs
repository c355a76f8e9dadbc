//! Stylesheet build
//!
//! The app stylesheet is copied byte for byte; only its name changes.

use crate::application::context::BuildContext;
use crate::domain::entities::OutputFile;
use crate::domain::ports::FileSystem;
use crate::domain::value_objects::{AssetCategory, AssetKind};
use crate::error::{PipeError, PipeResult};

/// Logical name of the app outputs
pub const APP_STEM: &str = "app";

/// Fingerprints the app stylesheet into `css/app-<hash>.css`
pub struct StyleUseCase<'a, FS: FileSystem> {
    ctx: &'a BuildContext<FS>,
}

impl<'a, FS: FileSystem> StyleUseCase<'a, FS> {
    pub fn new(ctx: &'a BuildContext<FS>) -> Self {
        Self { ctx }
    }

    pub fn execute(&self) -> PipeResult<OutputFile> {
        let entry = &self.ctx.paths().css_entry;
        if !self.ctx.fs().is_file(entry) {
            return Err(PipeError::MissingSource {
                path: entry.clone(),
            });
        }

        let content = self.ctx.fs().read(entry)?;
        let output = OutputFile::fingerprinted(AssetCategory::App, AssetKind::Css, APP_STEM, content);
        self.ctx.write_output(&output)?;
        Ok(output)
    }
}
