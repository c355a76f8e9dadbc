//! Custom assertion macros for CLI and scenario tests.

use std::path::Path;

/// List all files in a directory recursively (for failure messages)
pub fn list_all_files(dir: &Path) -> Vec<String> {
    let mut files = Vec::new();
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                files.extend(list_all_files(&path));
            } else {
                files.push(path.display().to_string());
            }
        }
    }
    files
}

/// Assert that an output exists under the build root.
///
/// # Example
/// ```ignore
/// assert_built!(env, "index.html");
/// ```
#[macro_export]
macro_rules! assert_built {
    ($env:expr, $path:expr) => {
        let full_path = $env.project_path("webroot").join($path);
        assert!(
            full_path.exists(),
            "Expected '{}' in the build root, but it doesn't exist.\nFiles found:\n  {}",
            $path,
            $crate::common::list_all_files(&$env.project_path("webroot")).join("\n  ")
        );
    };
}

/// Assert that an output does NOT exist under the build root.
#[macro_export]
macro_rules! assert_not_built {
    ($env:expr, $path:expr) => {
        let full_path = $env.project_path("webroot").join($path);
        assert!(
            !full_path.exists(),
            "Expected '{}' to NOT exist in the build root, but it does.",
            $path
        );
    };
}

/// Assert that command output contains a substring.
#[macro_export]
macro_rules! assert_output_contains {
    ($result:expr, $needle:expr) => {
        let combined = $result.combined_output();
        assert!(
            combined.contains($needle),
            "Expected output to contain '{}'.\nstdout:\n{}\nstderr:\n{}",
            $needle,
            $result.stdout,
            $result.stderr
        );
    };
}
