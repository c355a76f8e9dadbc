//! Asset category and kind
//!
//! Every generated file belongs to exactly one category. The category decides
//! which clean task deletes it and where it is injected in the HTML shell.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Output family a generated file belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetCategory {
    /// Application code and styles, rebuilt on every watch cycle
    App,
    /// Third-party code and the normalize stylesheet
    Vendor,
}

impl AssetCategory {
    /// Injection order: vendor assets load before app assets
    pub const INJECTION_ORDER: [AssetCategory; 2] = [AssetCategory::Vendor, AssetCategory::App];

    pub fn as_str(&self) -> &'static str {
        match self {
            AssetCategory::App => "app",
            AssetCategory::Vendor => "vendor",
        }
    }

    /// The other family
    pub fn other(&self) -> AssetCategory {
        match self {
            AssetCategory::App => AssetCategory::Vendor,
            AssetCategory::Vendor => AssetCategory::App,
        }
    }
}

impl fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of generated asset, decided by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Css,
    Js,
}

impl AssetKind {
    /// Output subdirectory under the build root
    pub fn dir(&self) -> &'static str {
        match self {
            AssetKind::Css => "css",
            AssetKind::Js => "js",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            AssetKind::Css => "css",
            AssetKind::Js => "js",
        }
    }

    /// Detect kind from a path's extension
    pub fn from_path(path: &std::path::Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("css") => Some(AssetKind::Css),
            Some("js") => Some(AssetKind::Js),
            _ => None,
        }
    }
}
