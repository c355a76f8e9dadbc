//! Task name value object

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Named unit of work in the build graph.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum TaskName {
    /// Delete app-family outputs
    CleanApp,
    /// Delete vendor-family outputs
    CleanVendor,
    /// Fingerprint the app stylesheet
    Css,
    /// Bundle application scripts
    Js,
    /// Bundle vendor scripts and the normalize stylesheet
    Vendor,
    /// Full build, then HTML injection
    Build,
    /// App-only build, then HTML injection
    BuildApp,
    /// Full build, then rebuild the app subset on change
    #[default]
    Watch,
}

impl TaskName {
    pub const ALL: [TaskName; 8] = [
        TaskName::CleanApp,
        TaskName::CleanVendor,
        TaskName::Css,
        TaskName::Js,
        TaskName::Vendor,
        TaskName::Build,
        TaskName::BuildApp,
        TaskName::Watch,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskName::CleanApp => "clean-app",
            TaskName::CleanVendor => "clean-vendor",
            TaskName::Css => "css",
            TaskName::Js => "js",
            TaskName::Vendor => "vendor",
            TaskName::Build => "build",
            TaskName::BuildApp => "build-app",
            TaskName::Watch => "watch",
        }
    }

    /// Whether the task keeps running after its prerequisites complete
    pub fn is_long_running(&self) -> bool {
        matches!(self, TaskName::Watch)
    }
}

impl fmt::Display for TaskName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned for an unknown task name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTask(pub String);

impl fmt::Display for UnknownTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown task '{}'", self.0)
    }
}

impl std::error::Error for UnknownTask {}

impl FromStr for TaskName {
    type Err = UnknownTask;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TaskName::ALL
            .into_iter()
            .find(|task| task.as_str() == s)
            .ok_or_else(|| UnknownTask(s.to_string()))
    }
}
