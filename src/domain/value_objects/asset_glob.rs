//! Category-scoped glob value object
//!
//! Globs are matched against paths relative to the build root, using `/` as
//! separator. `*` never crosses a directory boundary; `{a,b}` alternation is
//! supported.

use std::fmt;
use std::path::Path;

use globset::{GlobBuilder, GlobMatcher};

use crate::error::{PipeError, PipeResult};

use super::AssetCategory;

/// Default app family glob
pub const DEFAULT_APP_GLOB: &str = "{css,js}/app-*";

/// Default vendor family glob
pub const DEFAULT_VENDOR_GLOB: &str = "{css,js}/{normalize,vendor}-*";

/// Compiled glob for one output family.
#[derive(Debug, Clone)]
pub struct AssetGlob {
    pattern: String,
    matcher: GlobMatcher,
}

impl AssetGlob {
    /// Compile a pattern.
    pub fn new(pattern: &str) -> PipeResult<Self> {
        let glob = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .map_err(|e| PipeError::InvalidGlob {
                pattern: pattern.to_string(),
                message: e.kind().to_string(),
            })?;
        Ok(Self {
            pattern: pattern.to_string(),
            matcher: glob.compile_matcher(),
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Match a root-relative path.
    pub fn is_match(&self, rel_path: &Path) -> bool {
        self.matcher.is_match(to_slash(rel_path))
    }
}

impl fmt::Display for AssetGlob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

/// Render a relative path with `/` separators.
pub fn to_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// The app and vendor globs, checked against the fingerprint naming scheme.
#[derive(Debug, Clone)]
pub struct GlobPartition {
    app: AssetGlob,
    vendor: AssetGlob,
}

impl GlobPartition {
    /// Fingerprint used to check the naming convention
    const SAMPLE_FINGERPRINT: &'static str = "0123456789";

    /// Build and validate a partition.
    ///
    /// Every canonical output name must match its own family's glob and not
    /// the other one, otherwise cleaning or injection would cross families.
    pub fn new(app: AssetGlob, vendor: AssetGlob, normalize_stem: &str) -> PipeResult<Self> {
        let partition = Self { app, vendor };
        for (category, name) in partition.canonical_names(normalize_stem) {
            let path = Path::new(&name);
            let own = partition.glob(category).is_match(path);
            let other = partition.glob(category.other()).is_match(path);
            if !own || other {
                return Err(PipeError::GlobPartition { category, name });
            }
        }
        Ok(partition)
    }

    pub fn glob(&self, category: AssetCategory) -> &AssetGlob {
        match category {
            AssetCategory::App => &self.app,
            AssetCategory::Vendor => &self.vendor,
        }
    }

    fn canonical_names(&self, normalize_stem: &str) -> Vec<(AssetCategory, String)> {
        let fp = Self::SAMPLE_FINGERPRINT;
        vec![
            (AssetCategory::App, format!("css/app-{fp}.css")),
            (AssetCategory::App, format!("js/app-{fp}.js")),
            (AssetCategory::Vendor, format!("css/{normalize_stem}-{fp}.css")),
            (AssetCategory::Vendor, format!("js/vendor-{fp}.js")),
        ]
    }
}
