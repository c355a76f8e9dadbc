//! Configuration module for assetpipe
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (ASSETPIPE_*)
//! 3. Project config (assetpipe.toml)
//! 4. User config (~/.config/assetpipe/config.toml)
//! 5. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::ConfigWarning;
pub use types::{
    Config, EntriesConfig, GlobsConfig, PathsConfig, ScriptsConfig, VendorConfig, WatchConfig,
};
