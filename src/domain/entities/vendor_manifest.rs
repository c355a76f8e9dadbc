//! Vendor manifest - the third-party allow-list
//!
//! Each entry names a module under the dependency cache and the public name
//! the app bundle uses to `require` it at runtime.
//!
//! Entries accept both a bare string and a table form:
//!
//! ```toml
//! [vendor]
//! modules = [
//!   "events",
//!   { file = "d3/d3.min", expose = "d3", no_parse = true },
//! ]
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{PipeError, PipeResult};

/// One allow-listed module
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleEntry {
    /// Specifier resolved against the dependency cache
    pub file: String,
    /// Stable public name; defaults to `file`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expose: Option<String>,
    /// Include verbatim without scanning for `require` calls
    #[serde(default)]
    pub no_parse: bool,
}

impl ModuleEntry {
    pub fn new(file: &str) -> Self {
        Self {
            file: file.to_string(),
            expose: None,
            no_parse: false,
        }
    }

    pub fn exposed(mut self, name: &str) -> Self {
        self.expose = Some(name.to_string());
        self
    }

    pub fn prebuilt(mut self) -> Self {
        self.no_parse = true;
        self
    }

    /// Name the module is registered under in the vendor bundle
    pub fn exposed_name(&self) -> &str {
        self.expose.as_deref().unwrap_or(&self.file)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum ModuleEntryDe {
    Bare(String),
    Table {
        file: String,
        #[serde(default)]
        expose: Option<String>,
        #[serde(default)]
        no_parse: bool,
    },
}

impl<'de> Deserialize<'de> for ModuleEntry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        match ModuleEntryDe::deserialize(deserializer)? {
            ModuleEntryDe::Bare(file) => Ok(Self {
                file,
                expose: None,
                no_parse: false,
            }),
            ModuleEntryDe::Table {
                file,
                expose,
                no_parse,
            } => Ok(Self {
                file,
                expose,
                no_parse,
            }),
        }
    }
}

/// Ordered vendor allow-list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VendorManifest {
    entries: Vec<ModuleEntry>,
}

impl Default for VendorManifest {
    fn default() -> Self {
        Self::new(vec![
            ModuleEntry::new("bluebird/js/browser/bluebird.min")
                .exposed("bluebird")
                .prebuilt(),
            ModuleEntry::new("d3/d3.min").exposed("d3").prebuilt(),
            ModuleEntry::new("events").prebuilt(),
            ModuleEntry::new("flux"),
            ModuleEntry::new("jquery/dist/jquery.min")
                .exposed("jquery")
                .prebuilt(),
            ModuleEntry::new("node-uuid").prebuilt(),
            ModuleEntry::new("react/dist/react.min")
                .exposed("react")
                .prebuilt(),
            ModuleEntry::new("react/lib/keyMirror"),
            ModuleEntry::new("react-router/umd/ReactRouter.min")
                .exposed("react-router")
                .prebuilt(),
        ])
    }
}

impl VendorManifest {
    pub fn new(entries: Vec<ModuleEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[ModuleEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check the allow-list before any build runs.
    pub fn validate(&self) -> PipeResult<()> {
        let mut files = HashSet::new();
        let mut names = HashSet::new();

        for entry in &self.entries {
            if entry.file.trim().is_empty() {
                return Err(invalid("module specifier must not be empty"));
            }
            if entry.file.starts_with('.') || entry.file.starts_with('/') {
                return Err(invalid(&format!(
                    "'{}' must be a package specifier, not a path",
                    entry.file
                )));
            }
            if matches!(entry.expose.as_deref(), Some(name) if name.trim().is_empty()) {
                return Err(invalid(&format!(
                    "exposed name for '{}' must not be empty",
                    entry.file
                )));
            }
            if !files.insert(entry.file.as_str()) {
                return Err(invalid(&format!("'{}' is listed twice", entry.file)));
            }
            if !names.insert(entry.exposed_name()) {
                return Err(invalid(&format!(
                    "exposed name '{}' is used by more than one module",
                    entry.exposed_name()
                )));
            }
        }
        Ok(())
    }
}

fn invalid(message: &str) -> PipeError {
    PipeError::InvalidManifest {
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Wrapper {
        modules: VendorManifest,
    }

    #[test]
    fn default_manifest_is_valid() {
        let manifest = VendorManifest::default();
        manifest.validate().unwrap();
        assert_eq!(manifest.len(), 9);
    }

    #[test]
    fn exposed_name_falls_back_to_file() {
        assert_eq!(ModuleEntry::new("events").exposed_name(), "events");
        assert_eq!(
            ModuleEntry::new("d3/d3.min").exposed("d3").exposed_name(),
            "d3"
        );
    }

    #[test]
    fn parses_bare_and_table_entries_in_order() {
        let toml = r#"
modules = [
  "events",
  { file = "react/dist/react.min", expose = "react", no_parse = true },
]
"#;
        let wrapper: Wrapper = toml::from_str(toml).unwrap();
        let entries = wrapper.modules.entries();
        assert_eq!(entries[0], ModuleEntry::new("events"));
        assert_eq!(
            entries[1],
            ModuleEntry::new("react/dist/react.min")
                .exposed("react")
                .prebuilt()
        );
    }

    #[test]
    fn duplicate_exposed_name_is_rejected() {
        let manifest = VendorManifest::new(vec![
            ModuleEntry::new("react/dist/react.min").exposed("react"),
            ModuleEntry::new("react"),
        ]);
        let err = manifest.validate().unwrap_err();
        assert!(err.to_string().contains("exposed name 'react'"));
    }

    #[test]
    fn duplicate_file_is_rejected() {
        let manifest = VendorManifest::new(vec![
            ModuleEntry::new("flux"),
            ModuleEntry::new("flux").exposed("flux2"),
        ]);
        assert!(manifest.validate().is_err());
    }

    #[test]
    fn relative_specifier_is_rejected() {
        let manifest = VendorManifest::new(vec![ModuleEntry::new("./local")]);
        assert!(manifest.validate().is_err());
    }

    #[test]
    fn empty_expose_is_rejected() {
        let manifest = VendorManifest::new(vec![ModuleEntry::new("flux").exposed(" ")]);
        assert!(manifest.validate().is_err());
    }
}
