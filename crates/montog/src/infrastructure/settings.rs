//! Runtime settings for the montog binary.
//!
//! montog has no settings file of its own; these values come from command
//! line flags and their environment-variable fallbacks.

use std::path::PathBuf;
use std::time::Duration;

use super::storage::config::default_search_paths;

/// Upper bound on a single `xrandr` invocation.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Program invoked for topology queries and display changes.
pub const DEFAULT_XRANDR_PROGRAM: &str = "xrandr";

/// Settings for one montog invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppSettings {
    /// Configuration document candidates, tried in order.
    pub search_paths: Vec<PathBuf>,
    /// Upper bound on each external command.
    pub timeout: Duration,
    /// Name or path of the `xrandr` executable.
    pub xrandr_program: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            search_paths: default_search_paths(),
            timeout: DEFAULT_TIMEOUT,
            xrandr_program: DEFAULT_XRANDR_PROGRAM.to_string(),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
