//! App script bundle
//!
//! Bundles the application entry and everything it requires relatively.
//! Bare specifiers stay external and are served at runtime by the vendor
//! bundle's `require`.

use crate::application::context::BuildContext;
use crate::application::styles::APP_STEM;
use crate::domain::entities::OutputFile;
use crate::domain::ports::FileSystem;
use crate::domain::services::{Bundle, BundleEntry, BundleOptions, Bundler};
use crate::domain::value_objects::{AssetCategory, AssetKind};
use crate::error::PipeResult;

/// Modules with these extensions go through the JSX transform
pub const JSX_EXTENSIONS: &[&str] = &[".jsx"];

/// Result of bundling the app
#[derive(Debug, Clone)]
pub struct ScriptsResult {
    pub output: OutputFile,
    pub modules: usize,
    /// Bare specifiers left for the vendor bundle
    pub externals: Vec<String>,
}

/// Bundles the app entry into `js/app-<hash>.js`
pub struct ScriptsUseCase<'a, FS: FileSystem> {
    ctx: &'a BuildContext<FS>,
}

impl<'a, FS: FileSystem> ScriptsUseCase<'a, FS> {
    pub fn new(ctx: &'a BuildContext<FS>) -> Self {
        Self { ctx }
    }

    pub fn execute(&self) -> PipeResult<ScriptsResult> {
        let bundle = self.bundle()?;
        let output = OutputFile::fingerprinted(
            AssetCategory::App,
            AssetKind::Js,
            APP_STEM,
            bundle.render(),
        );
        self.ctx.write_output(&output)?;

        if !bundle.externals.is_empty() {
            tracing::debug!(externals = ?bundle.externals, "left external for the vendor bundle");
        }

        Ok(ScriptsResult {
            output,
            modules: bundle.modules.len(),
            externals: bundle.externals,
        })
    }

    fn bundle(&self) -> PipeResult<Bundle> {
        let resolver = self.ctx.resolver();
        let entry = resolver.resolve_entry(&self.ctx.paths().js_entry)?;
        let options = BundleOptions {
            bundle_external: false,
            transform_extensions: JSX_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        };
        Bundler::new(self.ctx.fs(), resolver, self.ctx.jsx(), options)
            .bundle(&[BundleEntry::main(entry)])
    }
}
