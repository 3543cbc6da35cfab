//! XDG base directory lookup.
//!
//! Only the two bases montog writes under are needed:
//! - config: `$XDG_CONFIG_HOME`, or `$HOME/.config`
//! - data:   `$XDG_DATA_HOME`, or `$HOME/.local/share`
//!
//! Empty variables are treated as unset.

use std::ffi::OsString;
use std::path::PathBuf;

/// The user's configuration base directory, if it can be determined.
pub fn config_home() -> Option<PathBuf> {
    base_dir(
        std::env::var_os("XDG_CONFIG_HOME"),
        std::env::var_os("HOME"),
        &[".config"],
    )
}

/// The user's data base directory, if it can be determined.
pub fn data_home() -> Option<PathBuf> {
    base_dir(
        std::env::var_os("XDG_DATA_HOME"),
        std::env::var_os("HOME"),
        &[".local", "share"],
    )
}

fn base_dir(xdg: Option<OsString>, home: Option<OsString>, fallback: &[&str]) -> Option<PathBuf> {
    if let Some(dir) = xdg.filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(dir));
    }
    let home = home.filter(|v| !v.is_empty())?;
    Some(fallback.iter().fold(PathBuf::from(home), |p, part| p.join(part)))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
