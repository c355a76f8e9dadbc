//! OutputFile entity - a fingerprinted build artifact
//!
//! The file name embeds the content fingerprint, so identical content always
//! lands at the same path and any change produces a new name.

use std::path::{Path, PathBuf};

use crate::domain::value_objects::{to_slash, AssetCategory, AssetKind, ContentHash};

/// A generated file ready to be written under the build root
#[derive(Debug, Clone, PartialEq)]
pub struct OutputFile {
    category: AssetCategory,
    kind: AssetKind,
    /// Path relative to the build root, e.g. `css/app-0a1b2c3d4e.css`
    rel_path: PathBuf,
    content: Vec<u8>,
}

impl OutputFile {
    /// Fingerprint `content` under the logical name `<stem>.<ext>`.
    pub fn fingerprinted(
        category: AssetCategory,
        kind: AssetKind,
        stem: &str,
        content: impl Into<Vec<u8>>,
    ) -> Self {
        let content = content.into();
        let hash = ContentHash::from_bytes(&content);
        let file_name = format!("{}-{}.{}", stem, hash.fingerprint(), kind.extension());
        Self {
            category,
            kind,
            rel_path: Path::new(kind.dir()).join(file_name),
            content,
        }
    }

    pub fn category(&self) -> AssetCategory {
        self.category
    }

    pub fn kind(&self) -> AssetKind {
        self.kind
    }

    /// Path relative to the build root
    pub fn rel_path(&self) -> &Path {
        &self.rel_path
    }

    /// Root-relative path with `/` separators, as referenced from HTML
    pub fn href(&self) -> String {
        to_slash(&self.rel_path)
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}
