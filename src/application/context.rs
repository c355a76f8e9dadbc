//! Build context
//!
//! Everything a task needs, resolved once per process from the configuration:
//! project paths, the glob partition, the vendor manifest and the filesystem.

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::domain::entities::{OutputFile, VendorManifest};
use crate::domain::ports::FileSystem;
use crate::domain::services::{JsxTransform, ModuleResolver};
use crate::domain::value_objects::{AssetCategory, GlobPartition};
use crate::error::PipeResult;

/// Project paths, each joined onto the root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPaths {
    pub root: PathBuf,
    pub source_dir: PathBuf,
    pub build_dir: PathBuf,
    pub dependency_dir: PathBuf,
    pub css_entry: PathBuf,
    pub js_entry: PathBuf,
    pub html_template: PathBuf,
    pub normalize: PathBuf,
}

impl ProjectPaths {
    pub fn resolve(root: &Path, config: &Config) -> Self {
        let dependency_dir = root.join(&config.paths.dependency_dir);
        Self {
            root: root.to_path_buf(),
            source_dir: root.join(&config.paths.source_dir),
            build_dir: root.join(&config.paths.build_dir),
            normalize: dependency_dir.join(&config.vendor.normalize),
            dependency_dir,
            css_entry: root.join(&config.entries.css),
            js_entry: root.join(&config.entries.js),
            html_template: root.join(&config.entries.html),
        }
    }
}

/// Shared, read-only state passed to every task
pub struct BuildContext<FS: FileSystem> {
    fs: FS,
    paths: ProjectPaths,
    partition: GlobPartition,
    manifest: VendorManifest,
    extensions: Vec<String>,
    jsx: JsxTransform,
    normalize_stem: String,
}

impl<FS: FileSystem> BuildContext<FS> {
    pub fn new(root: &Path, config: &Config, fs: FS) -> PipeResult<Self> {
        Ok(Self {
            fs,
            paths: ProjectPaths::resolve(root, config),
            partition: config.partition()?,
            manifest: config.vendor.modules.clone(),
            extensions: config.scripts.extensions.clone(),
            jsx: JsxTransform::new(&config.scripts.jsx_factory),
            normalize_stem: config.vendor.normalize_stem(),
        })
    }

    pub fn fs(&self) -> &FS {
        &self.fs
    }

    pub fn paths(&self) -> &ProjectPaths {
        &self.paths
    }

    pub fn partition(&self) -> &GlobPartition {
        &self.partition
    }

    pub fn manifest(&self) -> &VendorManifest {
        &self.manifest
    }

    pub fn jsx(&self) -> &JsxTransform {
        &self.jsx
    }

    pub fn normalize_stem(&self) -> &str {
        &self.normalize_stem
    }

    /// Resolver over the dependency cache with the configured extensions
    pub fn resolver(&self) -> ModuleResolver<'_> {
        ModuleResolver::new(&self.fs, &self.extensions, &self.paths.dependency_dir)
    }

    /// Build-root-relative paths owned by `category`, sorted.
    pub fn list_outputs(&self, category: AssetCategory) -> PipeResult<Vec<PathBuf>> {
        let glob = self.partition.glob(category);
        let files = self.fs.list_files(&self.paths.build_dir)?;
        Ok(files.into_iter().filter(|rel| glob.is_match(rel)).collect())
    }

    /// Write a fingerprinted output under the build root.
    pub fn write_output(&self, file: &OutputFile) -> PipeResult<PathBuf> {
        let path = self.paths.build_dir.join(file.rel_path());
        self.fs.write(&path, file.content())?;
        tracing::debug!(
            path = %file.href(),
            bytes = file.len(),
            category = %file.category(),
            "wrote output"
        );
        Ok(path)
    }
}
