//! Configuration type definitions

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::entities::VendorManifest;
use crate::domain::value_objects::{
    AssetGlob, GlobPartition, DEFAULT_APP_GLOB, DEFAULT_VENDOR_GLOB,
};
use crate::error::{PipeError, PipeResult};

use super::loader::{self, ConfigWarning};

/// Project directories, relative to the project root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Tree observed by `watch`
    #[serde(default = "default_source_dir")]
    pub source_dir: PathBuf,

    /// Output root; cleaned and written by every build
    #[serde(default = "default_build_dir")]
    pub build_dir: PathBuf,

    /// Third-party package cache
    #[serde(default = "default_dependency_dir")]
    pub dependency_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            source_dir: default_source_dir(),
            build_dir: default_build_dir(),
            dependency_dir: default_dependency_dir(),
        }
    }
}

fn default_source_dir() -> PathBuf {
    PathBuf::from("ui-src")
}

fn default_build_dir() -> PathBuf {
    PathBuf::from("webroot")
}

fn default_dependency_dir() -> PathBuf {
    PathBuf::from("node_modules")
}

/// Entry files, relative to the project root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntriesConfig {
    #[serde(default = "default_css_entry")]
    pub css: PathBuf,

    /// Script entry; the extension may be omitted
    #[serde(default = "default_js_entry")]
    pub js: PathBuf,

    #[serde(default = "default_html_entry")]
    pub html: PathBuf,
}

impl Default for EntriesConfig {
    fn default() -> Self {
        Self {
            css: default_css_entry(),
            js: default_js_entry(),
            html: default_html_entry(),
        }
    }
}

fn default_css_entry() -> PathBuf {
    PathBuf::from("ui-src/css/app.css")
}

fn default_js_entry() -> PathBuf {
    PathBuf::from("ui-src/js/app")
}

fn default_html_entry() -> PathBuf {
    PathBuf::from("ui-src/index.html")
}

/// Output family globs, relative to the build root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobsConfig {
    #[serde(default = "default_app_glob")]
    pub app: String,

    #[serde(default = "default_vendor_glob")]
    pub vendor: String,
}

impl Default for GlobsConfig {
    fn default() -> Self {
        Self {
            app: default_app_glob(),
            vendor: default_vendor_glob(),
        }
    }
}

fn default_app_glob() -> String {
    DEFAULT_APP_GLOB.to_string()
}

fn default_vendor_glob() -> String {
    DEFAULT_VENDOR_GLOB.to_string()
}

/// Script bundling options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptsConfig {
    /// Extensions tried when a specifier omits one, in order
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Function JSX elements compile to
    #[serde(default = "default_jsx_factory")]
    pub jsx_factory: String,
}

impl Default for ScriptsConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            jsx_factory: default_jsx_factory(),
        }
    }
}

fn default_extensions() -> Vec<String> {
    vec![".js".to_string(), ".jsx".to_string()]
}

fn default_jsx_factory() -> String {
    "React.createElement".to_string()
}

/// Vendor build inputs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VendorConfig {
    /// Base stylesheet, relative to the dependency cache
    #[serde(default = "default_normalize")]
    pub normalize: PathBuf,

    #[serde(default)]
    pub modules: VendorManifest,
}

impl Default for VendorConfig {
    fn default() -> Self {
        Self {
            normalize: default_normalize(),
            modules: VendorManifest::default(),
        }
    }
}

impl VendorConfig {
    /// Logical name of the normalize output (`normalize` for `normalize.css`)
    pub fn normalize_stem(&self) -> String {
        self.normalize
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "normalize".to_string())
    }
}

fn default_normalize() -> PathBuf {
    PathBuf::from("normalize.css/normalize.css")
}

/// Watch mode options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Quiet period before a batch of changes triggers a rebuild
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

fn default_debounce_ms() -> u64 {
    100
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub entries: EntriesConfig,

    #[serde(default)]
    pub globs: GlobsConfig,

    #[serde(default)]
    pub scripts: ScriptsConfig,

    #[serde(default)]
    pub vendor: VendorConfig,

    #[serde(default)]
    pub watch: WatchConfig,
}

impl Config {
    /// Default file name looked up in the project root
    pub const FILE_NAME: &'static str = "assetpipe.toml";

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> PipeResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> PipeResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Load from an explicit file, the project file, the user file, or defaults.
    ///
    /// Environment overrides are applied and the result is validated.
    pub fn discover(
        project_root: &Path,
        explicit: Option<&Path>,
    ) -> PipeResult<(Self, Vec<ConfigWarning>)> {
        loader::discover(project_root, explicit)
    }

    /// Apply environment variable overrides (ASSETPIPE_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }

    /// Compile both globs and check they partition the output names.
    pub fn partition(&self) -> PipeResult<GlobPartition> {
        GlobPartition::new(
            AssetGlob::new(&self.globs.app)?,
            AssetGlob::new(&self.globs.vendor)?,
            &self.vendor.normalize_stem(),
        )
    }

    /// Reject configurations no build could succeed with.
    pub fn validate(&self) -> PipeResult<()> {
        self.partition()?;
        self.vendor.modules.validate()?;

        if self.scripts.extensions.is_empty() {
            return Err(invalid("scripts.extensions must not be empty"));
        }
        if let Some(ext) = self
            .scripts
            .extensions
            .iter()
            .find(|ext| !ext.starts_with('.') || ext.len() < 2)
        {
            return Err(invalid(&format!(
                "scripts.extensions entry '{ext}' must look like '.js'"
            )));
        }
        if self.scripts.jsx_factory.trim().is_empty() {
            return Err(invalid("scripts.jsx_factory must not be empty"));
        }
        if self.paths.build_dir.as_os_str().is_empty() {
            return Err(invalid("paths.build_dir must not be empty"));
        }
        Ok(())
    }
}

fn invalid(message: &str) -> PipeError {
    PipeError::InvalidConfig {
        file: PathBuf::from(Config::FILE_NAME),
        message: message.to_string(),
    }
}
