//! Content Hash Value Object
//!
//! A validated, immutable hash of a file's bytes.
//! Used for output fingerprints and for watch-mode change detection.

use sha2::{Digest, Sha256};

/// Content hash value object
///
/// Wraps a SHA-256 hex digest with the `sha256:` prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentHash(String);

impl ContentHash {
    /// Prefix for SHA-256 hashes
    pub const PREFIX: &'static str = "sha256:";

    /// Number of hex digits embedded in fingerprinted filenames
    pub const FINGERPRINT_LEN: usize = 10;

    /// Create a ContentHash by computing SHA-256 of raw bytes
    pub fn from_bytes(content: &[u8]) -> Self {
        let hash = Sha256::digest(content);
        Self(format!("{}{:x}", Self::PREFIX, hash))
    }

    /// Create a ContentHash by computing SHA-256 of text
    pub fn from_content(content: &str) -> Self {
        Self::from_bytes(content.as_bytes())
    }

    /// Get the full hash string with prefix
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get just the hex part without prefix
    pub fn hex(&self) -> &str {
        self.0.strip_prefix(Self::PREFIX).unwrap_or(&self.0)
    }

    /// Short digest used in output filenames (`app-<fingerprint>.css`)
    pub fn fingerprint(&self) -> &str {
        let hex = self.hex();
        &hex[..hex.len().min(Self::FINGERPRINT_LEN)]
    }
}
