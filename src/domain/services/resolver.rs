//! Module resolution
//!
//! Node-style lookup for `require` specifiers:
//! - relative specifiers (`./x`, `../x`) resolve against the requiring file;
//! - bare specifiers (`react`, `d3/d3.min`) resolve inside the dependency
//!   cache, first in the `node_modules` directories nested between the
//!   requiring file and the cache root, then at the top of the cache.
//!
//! A candidate is tried as a file, then with each configured extension
//! appended, then as a directory (`package.json` `browser`/`main`, then
//! `index` with each extension).

use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

use crate::domain::ports::FileSystem;
use crate::error::{PipeError, PipeResult};

/// Whether a specifier names a third-party package
pub fn is_bare(specifier: &str) -> bool {
    !(specifier == "."
        || specifier == ".."
        || specifier.starts_with("./")
        || specifier.starts_with("../")
        || specifier.starts_with('/'))
}

/// Resolves specifiers to files on disk.
pub struct ModuleResolver<'a> {
    fs: &'a dyn FileSystem,
    extensions: &'a [String],
    dependency_dir: &'a Path,
}

impl<'a> ModuleResolver<'a> {
    pub fn new(fs: &'a dyn FileSystem, extensions: &'a [String], dependency_dir: &'a Path) -> Self {
        Self {
            fs,
            extensions,
            dependency_dir,
        }
    }

    /// Resolve the pipeline's own entry path (extension optional).
    pub fn resolve_entry(&self, entry: &Path) -> PipeResult<PathBuf> {
        self.resolve_candidate(&normalize_path(entry))
            .ok_or_else(|| PipeError::MissingSource {
                path: entry.to_path_buf(),
            })
    }

    /// Resolve `specifier` as required from `from_file`.
    pub fn resolve(&self, specifier: &str, from_file: &Path) -> PipeResult<PathBuf> {
        let base = normalize_path(from_file.parent().unwrap_or_else(|| Path::new("")));
        let found = if is_bare(specifier) {
            self.package_candidates(&base, specifier)
                .iter()
                .find_map(|candidate| self.resolve_candidate(candidate))
        } else {
            self.resolve_candidate(&normalize_path(&base.join(specifier)))
        };

        found.ok_or_else(|| PipeError::UnresolvedModule {
            specifier: specifier.to_string(),
            from: from_file.to_path_buf(),
        })
    }

    /// `node_modules/<specifier>` under each ancestor of `base` inside the
    /// dependency cache, nearest first, then the top of the cache.
    fn package_candidates(&self, base: &Path, specifier: &str) -> Vec<PathBuf> {
        let cache = normalize_path(self.dependency_dir);
        let mut candidates: Vec<PathBuf> = base
            .ancestors()
            .take_while(|dir| dir.starts_with(&cache) && *dir != cache.as_path())
            .filter(|dir| dir.file_name().is_some_and(|name| name != "node_modules"))
            .map(|dir| normalize_path(&dir.join("node_modules").join(specifier)))
            .collect();
        candidates.push(normalize_path(&cache.join(specifier)));
        candidates
    }

    fn resolve_candidate(&self, candidate: &Path) -> Option<PathBuf> {
        self.resolve_file(candidate)
            .or_else(|| self.resolve_directory(candidate))
    }

    fn resolve_file(&self, candidate: &Path) -> Option<PathBuf> {
        if self.fs.is_file(candidate) {
            return Some(candidate.to_path_buf());
        }
        self.extensions
            .iter()
            .map(|ext| with_appended_extension(candidate, ext))
            .find(|path| self.fs.is_file(path))
    }

    fn resolve_directory(&self, dir: &Path) -> Option<PathBuf> {
        if let Some(main) = self.package_main(dir) {
            let target = normalize_path(&dir.join(main));
            if let Some(found) = self
                .resolve_file(&target)
                .or_else(|| self.resolve_index(&target))
            {
                return Some(found);
            }
        }
        self.resolve_index(dir)
    }

    fn resolve_index(&self, dir: &Path) -> Option<PathBuf> {
        self.resolve_file(&dir.join("index"))
    }

    /// Entry point declared by `package.json`, preferring the browser build.
    fn package_main(&self, dir: &Path) -> Option<String> {
        let manifest = dir.join("package.json");
        if !self.fs.is_file(&manifest) {
            return None;
        }
        let content = self.fs.read_to_string(&manifest).ok()?;
        let value: serde_json::Value = serde_json::from_str(&content).ok()?;
        ["browser", "main"]
            .iter()
            .find_map(|key| value.get(key).and_then(|v| v.as_str()))
            .map(str::to_string)
    }
}

fn with_appended_extension(path: &Path, ext: &str) -> PathBuf {
    let mut raw: OsString = path.as_os_str().to_owned();
    raw.push(ext);
    PathBuf::from(raw)
}

/// Lexically remove `.` and `..` components.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
