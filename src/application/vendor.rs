//! Vendor build
//!
//! Produces two independent outputs concurrently: the normalize stylesheet
//! and the bundle of allow-listed third-party modules. Each module is
//! registered under its exposed name so the app bundle can `require` it.

use std::thread;

use crate::application::context::BuildContext;
use crate::domain::entities::OutputFile;
use crate::domain::ports::FileSystem;
use crate::domain::services::{BundleEntry, BundleOptions, Bundler};
use crate::domain::value_objects::{AssetCategory, AssetKind};
use crate::error::{PipeError, PipeResult};

/// Logical name of the vendor script bundle
pub const VENDOR_STEM: &str = "vendor";

/// Outputs of the vendor task
#[derive(Debug, Clone)]
pub struct VendorResult {
    pub stylesheet: OutputFile,
    pub bundle: OutputFile,
    /// Names the bundle exposes, in manifest order
    pub exposed: Vec<String>,
}

pub struct VendorUseCase<'a, FS: FileSystem> {
    ctx: &'a BuildContext<FS>,
}

impl<'a, FS: FileSystem> VendorUseCase<'a, FS> {
    pub fn new(ctx: &'a BuildContext<FS>) -> Self {
        Self { ctx }
    }

    /// Build both outputs; the task completes only when both have.
    pub fn execute(&self) -> PipeResult<VendorResult> {
        let (stylesheet, bundle) = thread::scope(|scope| {
            let styles = scope.spawn(|| self.stylesheet());
            let bundle = self.bundle();
            let stylesheet = styles
                .join()
                .unwrap_or_else(|panic| std::panic::resume_unwind(panic));
            (stylesheet, bundle)
        });

        Ok(VendorResult {
            stylesheet: stylesheet?,
            bundle: bundle?,
            exposed: self
                .ctx
                .manifest()
                .entries()
                .iter()
                .map(|entry| entry.exposed_name().to_string())
                .collect(),
        })
    }

    fn stylesheet(&self) -> PipeResult<OutputFile> {
        let source = &self.ctx.paths().normalize;
        if !self.ctx.fs().is_file(source) {
            return Err(PipeError::MissingSource {
                path: source.clone(),
            });
        }

        let content = self.ctx.fs().read(source)?;
        let output = OutputFile::fingerprinted(
            AssetCategory::Vendor,
            AssetKind::Css,
            self.ctx.normalize_stem(),
            content,
        );
        self.ctx.write_output(&output)?;
        Ok(output)
    }

    fn bundle(&self) -> PipeResult<OutputFile> {
        let resolver = self.ctx.resolver();
        let dependency_dir = &self.ctx.paths().dependency_dir;

        let entries = self
            .ctx
            .manifest()
            .entries()
            .iter()
            .map(|module| {
                let path = resolver.resolve(&module.file, dependency_dir)?;
                Ok(BundleEntry::exposed(
                    path,
                    module.exposed_name(),
                    module.no_parse,
                ))
            })
            .collect::<PipeResult<Vec<_>>>()?;

        let options = BundleOptions {
            bundle_external: true,
            transform_extensions: Vec::new(),
        };
        let bundle =
            Bundler::new(self.ctx.fs(), resolver, self.ctx.jsx(), options).bundle(&entries)?;

        let output = OutputFile::fingerprinted(
            AssetCategory::Vendor,
            AssetKind::Js,
            VENDOR_STEM,
            bundle.render(),
        );
        self.ctx.write_output(&output)?;
        Ok(output)
    }
}
