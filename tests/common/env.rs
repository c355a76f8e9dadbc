//! Test environment builder for isolated assetpipe testing.
//!
//! Provides `TestEnv` - a temp project tree plus helpers to run the
//! assetpipe CLI against it.

use std::path::PathBuf;
use std::process::{Child, Command, Stdio};

use tempfile::TempDir;

use super::fixtures::*;

/// Result of running an assetpipe CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }

    /// Parse stdout as NDJSON
    pub fn json_lines(&self) -> Vec<serde_json::Value> {
        self.stdout
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                serde_json::from_str(line)
                    .unwrap_or_else(|e| panic!("invalid JSON line {line:?}: {e}"))
            })
            .collect()
    }
}

/// Isolated project directory
pub struct TestEnv {
    pub project_root: TempDir,
}

impl TestEnv {
    pub fn builder() -> TestEnvBuilder {
        TestEnvBuilder::new()
    }

    /// A complete project: template, stylesheet, scripts and vendor modules
    pub fn standard() -> Self {
        Self::builder().standard_project().build()
    }

    pub fn project_path(&self, relative: &str) -> PathBuf {
        self.project_root.path().join(relative)
    }

    pub fn write(&self, relative: &str, content: &str) {
        let path = self.project_path(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }

    pub fn read(&self, relative: &str) -> String {
        std::fs::read_to_string(self.project_path(relative))
            .unwrap_or_else(|e| panic!("failed to read {relative}: {e}"))
    }

    /// Root-relative names of every file under `webroot/<dir>`, sorted
    pub fn built(&self, dir: &str) -> Vec<String> {
        let path = self.project_path("webroot").join(dir);
        let mut names: Vec<String> = std::fs::read_dir(&path)
            .map(|entries| {
                entries
                    .flatten()
                    .map(|e| format!("{dir}/{}", e.file_name().to_string_lossy()))
                    .collect()
            })
            .unwrap_or_default();
        names.sort();
        names
    }

    /// Every fingerprinted output, css first
    pub fn outputs(&self) -> Vec<String> {
        let mut all = self.built("css");
        all.extend(self.built("js"));
        all
    }

    pub fn run(&self, args: &[&str]) -> TestResult {
        let output = self
            .command(args)
            .output()
            .expect("failed to run assetpipe");
        TestResult {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }

    /// Start a long-running command with piped output
    pub fn spawn(&self, args: &[&str]) -> Child {
        self.command(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("failed to start assetpipe")
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_assetpipe"));
        cmd.args(args)
            .current_dir(self.project_root.path())
            .env_remove("ASSETPIPE_BUILD_DIR")
            .env_remove("ASSETPIPE_SOURCE_DIR")
            .env_remove("ASSETPIPE_DEBOUNCE_MS")
            .env_remove("ASSETPIPE_LOG");
        cmd
    }
}

/// Builder for `TestEnv`
pub struct TestEnvBuilder {
    files: Vec<(String, String)>,
}

impl TestEnvBuilder {
    pub fn new() -> Self {
        Self { files: Vec::new() }
    }

    pub fn with_file(mut self, relative: &str, content: &str) -> Self {
        self.files.push((relative.to_string(), content.to_string()));
        self
    }

    pub fn standard_project(self) -> Self {
        self.with_file("ui-src/index.html", INDEX_HTML)
            .with_file("ui-src/css/app.css", APP_CSS)
            .with_file("ui-src/js/app.js", APP_JS)
            .with_file("ui-src/js/view.jsx", VIEW_JSX)
            .with_file("node_modules/normalize.css/normalize.css", NORMALIZE_CSS)
            .with_file("node_modules/react/index.js", REACT_INDEX)
            .with_file("assetpipe.toml", CONFIG_TOML)
    }

    pub fn build(self) -> TestEnv {
        let env = TestEnv {
            project_root: tempfile::tempdir().expect("failed to create temp dir"),
        };
        for (relative, content) in &self.files {
            env.write(relative, content);
        }
        env
    }
}

impl Default for TestEnvBuilder {
    fn default() -> Self {
        Self::new()
    }
}
