//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PipeError, PipeResult};

use super::types::Config;

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> PipeResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => PipeError::MissingSource {
            path: path.to_path_buf(),
        },
        _ => PipeError::Io(e),
    })?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| PipeError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Load from an explicit file, the project file, the user file, or defaults.
pub fn discover(
    project_root: &Path,
    explicit: Option<&Path>,
) -> PipeResult<(Config, Vec<ConfigWarning>)> {
    let source = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => candidate_files(project_root)
            .into_iter()
            .find(|path| path.is_file()),
    };

    let (config, warnings) = match &source {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading configuration");
            load_with_warnings(path)?
        }
        None => (Config::default(), Vec::new()),
    };

    let config = with_env_overrides(config);
    config.validate().map_err(|e| match (e, &source) {
        (PipeError::InvalidConfig { message, .. }, Some(path)) => PipeError::InvalidConfig {
            file: path.clone(),
            message,
        },
        (e, _) => e,
    })?;

    Ok((config, warnings))
}

/// Project file first, then the per-user file
fn candidate_files(project_root: &Path) -> Vec<PathBuf> {
    let mut files = vec![project_root.join(Config::FILE_NAME)];
    if let Some(user_config_dir) = dirs::config_dir() {
        files.push(user_config_dir.join("assetpipe/config.toml"));
    }
    files
}

/// Apply environment variable overrides (ASSETPIPE_* prefix)
pub fn with_env_overrides(mut config: Config) -> Config {
    // ASSETPIPE_BUILD_DIR
    if let Ok(dir) = std::env::var("ASSETPIPE_BUILD_DIR") {
        if !dir.is_empty() {
            config.paths.build_dir = PathBuf::from(dir);
        }
    }

    // ASSETPIPE_SOURCE_DIR
    if let Ok(dir) = std::env::var("ASSETPIPE_SOURCE_DIR") {
        if !dir.is_empty() {
            config.paths.source_dir = PathBuf::from(dir);
        }
    }

    // ASSETPIPE_DEBOUNCE_MS
    if let Ok(value) = std::env::var("ASSETPIPE_DEBOUNCE_MS") {
        match value.trim().parse::<u64>() {
            Ok(ms) => config.watch.debounce_ms = ms,
            Err(_) => tracing::warn!(%value, "ignoring non-numeric ASSETPIPE_DEBOUNCE_MS"),
        }
    }

    config
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "paths",
        "source_dir",
        "build_dir",
        "dependency_dir",
        "entries",
        "css",
        "js",
        "html",
        "globs",
        "app",
        "vendor",
        "scripts",
        "extensions",
        "jsx_factory",
        "normalize",
        "modules",
        "watch",
        "debounce_ms",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
