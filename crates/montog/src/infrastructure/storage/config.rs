//! TOML configuration document persistence.
//!
//! The document is looked up along a search path; the first candidate that
//! both opens and parses wins:
//!
//! 1. the path given with `--config` / `MONTOG_CONFIG`, if any
//! 2. `$XDG_CONFIG_HOME/montog-config.toml` (or `~/.config/montog-config.toml`)
//! 3. `./montog-config.toml`
//!
//! Example document:
//!
//! ```toml
//! [monitors.left]
//! id = "DP-1"
//! options = "--rotate left"
//!
//! [monitors.laptop]
//! id = "eDP-1"
//!
//! [arrangements."Desk"]
//! enabled = ["left", "laptop"]
//! primary = "laptop"
//! ```
//!
//! Tables keep the order they are written in, which is also the order the
//! arrangements are offered in.

use std::path::{Path, PathBuf};

use montog_core::{ConfigSource, Configuration};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::paths::config_home;
use crate::application::configuration::ConfigRepository;

/// File name of the configuration document in every search directory.
pub const CONFIG_FILE_NAME: &str = "montog-config.toml";

const DOCUMENT_HEADER: &str = "\
# montog configuration
#
# [monitors.<alias>]
#   id      = output name as printed by `xrandr --listmonitors`
#   options = extra xrandr arguments for this output, e.g. \"--rotate left\"
#
# [arrangements.\"<name>\"]
#   enabled = aliases to switch on, placed left to right in this order
#   primary = alias of the monitor that becomes primary
#
# Outputs declared under [monitors] but not enabled by an arrangement are
# switched off when that arrangement is chosen.

";

/// Error type for reading one candidate document.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    /// The file could not be read.
    #[error("I/O error reading config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl ConfigLoadError {
    fn is_not_found(&self) -> bool {
        matches!(self, ConfigLoadError::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}

/// Error type for writing the document with `init`.
#[derive(Debug, Error)]
pub enum ConfigWriteError {
    /// The search path is empty, so there is nowhere to write.
    #[error("no configuration path available; set HOME or pass --config")]
    NoSearchPath,

    /// The target exists and overwriting was not requested.
    #[error("{0} already exists; pass --force to overwrite it")]
    AlreadyExists(PathBuf),

    /// A file system I/O error occurred.
    #[error("I/O error writing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration could not be serialized to TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// The default search path, without any user-supplied path.
pub fn default_search_paths() -> Vec<PathBuf> {
    let mut paths = Vec::with_capacity(2);
    if let Some(dir) = config_home() {
        paths.push(dir.join(CONFIG_FILE_NAME));
    }
    paths.push(PathBuf::from(".").join(CONFIG_FILE_NAME));
    paths
}

/// The search path with `explicit` tried first.
pub fn search_paths(explicit: Option<PathBuf>) -> Vec<PathBuf> {
    explicit.into_iter().chain(default_search_paths()).collect()
}

/// Reads and parses the document at `path`, tagging it with its source.
///
/// # Errors
///
/// Returns [`ConfigLoadError::Io`] if the file cannot be read and
/// [`ConfigLoadError::Parse`] if the TOML is malformed.
pub fn read_config_file(path: &Path) -> Result<Configuration, ConfigLoadError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config: Configuration = toml::from_str(&content).map_err(|source| ConfigLoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(config.with_source(ConfigSource::File(path.to_path_buf())))
}

/// Renders `config` as the annotated document shown by `about` and written
/// by `init`.
///
/// # Errors
///
/// Returns [`toml::ser::Error`] if serialization fails.
pub fn render_document(config: &Configuration) -> Result<String, toml::ser::Error> {
    let body = toml::to_string_pretty(config)?;
    Ok(format!("{DOCUMENT_HEADER}{body}"))
}

/// Writes the annotated document for `config` to `path`.
///
/// Creates the parent directory if needed.
///
/// # Errors
///
/// Returns [`ConfigWriteError::AlreadyExists`] if `path` exists and `force`
/// is false, [`ConfigWriteError::Io`] for file-system failures, or
/// [`ConfigWriteError::Serialize`] if serialization fails.
pub fn write_document(path: &Path, config: &Configuration, force: bool) -> Result<(), ConfigWriteError> {
    if path.exists() && !force {
        return Err(ConfigWriteError::AlreadyExists(path.to_path_buf()));
    }

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|source| ConfigWriteError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let content = render_document(config)?;
    std::fs::write(path, content).map_err(|source| ConfigWriteError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), "configuration written");
    Ok(())
}

// ── Config repository ─────────────────────────────────────────────────────────

/// [`ConfigRepository`] backed by files on a search path.
#[derive(Debug, Clone)]
pub struct FileConfigStore {
    search_paths: Vec<PathBuf>,
}

impl FileConfigStore {
    pub fn new(search_paths: Vec<PathBuf>) -> Self {
        Self { search_paths }
    }

    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    /// Where `init` writes: the first candidate on the search path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigWriteError::NoSearchPath`] if the search path is empty.
    pub fn preferred_path(&self) -> Result<&Path, ConfigWriteError> {
        self.search_paths
            .first()
            .map(PathBuf::as_path)
            .ok_or(ConfigWriteError::NoSearchPath)
    }
}

impl ConfigRepository for FileConfigStore {
    fn load_first(&self) -> Option<Configuration> {
        for path in &self.search_paths {
            match read_config_file(path) {
                Ok(config) => return Some(config),
                Err(e) if e.is_not_found() => {
                    debug!(path = %path.display(), "no configuration file here")
                }
                Err(e) => warn!("skipping configuration candidate: {e}"),
            }
        }
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
