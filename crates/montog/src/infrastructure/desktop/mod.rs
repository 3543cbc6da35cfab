//! Freedesktop `.desktop` entries for montog.
//!
//! Two entries are managed, both named `montog.desktop`:
//!
//! - **autostart** in `$XDG_CONFIG_HOME/autostart/`, so the desktop session
//!   launches montog at login;
//! - **launcher** in `$XDG_DATA_HOME/applications/`, so montog shows up in
//!   the application menu.
//!
//! Enabling an entry that already exists leaves the file untouched.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use super::storage::paths::{config_home, data_home};

/// File name shared by both entries.
pub const DESKTOP_FILE_NAME: &str = "montog.desktop";

/// Error type for desktop entry operations.
#[derive(Debug, Error)]
pub enum DesktopEntryError {
    /// Neither the XDG variable nor `$HOME` is set.
    #[error("could not determine the {0} directory; set HOME")]
    NoPlatformDir(&'static str),

    /// A file system I/O error occurred.
    #[error("I/O error accessing desktop entry at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Which of the two entries to manage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Autostart,
    Launcher,
}

impl EntryKind {
    /// Full path of this entry's file.
    ///
    /// # Errors
    ///
    /// Returns [`DesktopEntryError::NoPlatformDir`] if the XDG base directory
    /// cannot be determined.
    pub fn location(self) -> Result<PathBuf, DesktopEntryError> {
        let dir = match self {
            EntryKind::Autostart => config_home()
                .map(|d| d.join("autostart"))
                .ok_or(DesktopEntryError::NoPlatformDir("config"))?,
            EntryKind::Launcher => data_home()
                .map(|d| d.join("applications"))
                .ok_or(DesktopEntryError::NoPlatformDir("data"))?,
        };
        Ok(dir.join(DESKTOP_FILE_NAME))
    }

    pub fn label(self) -> &'static str {
        match self {
            EntryKind::Autostart => "autostart",
            EntryKind::Launcher => "application menu entry",
        }
    }
}

/// Renders the `[Desktop Entry]` group launching `exec`.
pub fn render_desktop_file(exec: &Path) -> String {
    let name = env!("CARGO_PKG_NAME");
    format!(
        "[Desktop Entry]\n\
         Name={name}\n\
         Version={version}\n\
         GenericName={name}\n\
         Comment={comment}\n\
         Exec={exec}\n\
         Terminal=false\n\
         Type=Application\n\
         Icon=monitor\n",
        version = env!("CARGO_PKG_VERSION"),
        comment = env!("CARGO_PKG_DESCRIPTION"),
        exec = exec.display(),
    )
}

/// One desktop entry file and the contents it should hold.
#[derive(Debug, Clone)]
pub struct DesktopEntry {
    path: PathBuf,
    contents: String,
}

impl DesktopEntry {
    pub fn new(path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
        }
    }

    /// The entry of `kind` launching `exec`.
    ///
    /// # Errors
    ///
    /// Returns [`DesktopEntryError::NoPlatformDir`] if the entry's directory
    /// cannot be determined.
    pub fn for_kind(kind: EntryKind, exec: &Path) -> Result<Self, DesktopEntryError> {
        Ok(Self::new(kind.location()?, render_desktop_file(exec)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_present(&self) -> bool {
        self.path.is_file()
    }

    /// Writes the entry unless it already exists.
    ///
    /// Returns `true` if the file was written.
    ///
    /// # Errors
    ///
    /// Returns [`DesktopEntryError::Io`] if the directory or file cannot be
    /// written.
    pub fn enable(&self) -> Result<bool, DesktopEntryError> {
        if self.is_present() {
            return Ok(false);
        }
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir).map_err(|source| DesktopEntryError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(&self.path, &self.contents).map_err(|source| DesktopEntryError::Io {
            path: self.path.clone(),
            source,
        })?;
        info!(path = %self.path.display(), "desktop entry written");
        Ok(true)
    }

    /// Removes the entry if it exists.
    ///
    /// Returns `true` if a file was removed.
    ///
    /// # Errors
    ///
    /// Returns [`DesktopEntryError::Io`] if the file exists but cannot be
    /// removed.
    pub fn disable(&self) -> Result<bool, DesktopEntryError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                info!(path = %self.path.display(), "desktop entry removed");
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(DesktopEntryError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
