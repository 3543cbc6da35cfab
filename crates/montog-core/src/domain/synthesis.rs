//! Default configuration built from a probed topology.
//!
//! Used when no configuration document could be loaded.  Every connected
//! monitor gets an alias equal to its id, and the user is offered one
//! arrangement that enables everything plus one arrangement per monitor that
//! enables only that monitor.

use tracing::debug;

use super::config::{Arrangement, ConfigSource, Configuration, MonitorAlias};
use super::topology::TopologySnapshot;

/// Prefix added once per connected monitor to generated arrangement names.
pub const MONITOR_GLYPH: &str = "🖥️ ";

/// Suffix of the generated arrangement that enables every monitor.
pub const ALL_MONITORS_LABEL: &str = "All Monitors";

/// Builds a [`Configuration`] from `topology`.
///
/// The all-monitors arrangement enables the monitors in snapshot order
/// (enabled left to right, then disabled).  Its primary is the monitor the
/// tool flagged primary; when none is flagged, the first enabled monitor is
/// used, then the first connected one.  An empty topology yields an
/// all-monitors arrangement with nothing enabled and no primary.
pub fn synthesize(topology: &TopologySnapshot) -> Configuration {
    let mut config = Configuration::default().with_source(ConfigSource::Generated);

    for monitor in topology {
        config
            .monitors
            .insert(monitor.id.clone(), MonitorAlias::new(monitor.id.clone()));
    }

    let primary = fallback_primary(topology);
    let all_label = format!("{}{ALL_MONITORS_LABEL}", MONITOR_GLYPH.repeat(topology.len()));
    config.arrangements.insert(
        all_label,
        Arrangement::new(topology.iter().map(|m| m.id.clone()), primary),
    );

    for monitor in topology {
        config.arrangements.insert(
            format!("{MONITOR_GLYPH}{}", monitor.id),
            Arrangement::new([monitor.id.clone()], Some(monitor.id.as_str())),
        );
    }

    debug!(
        monitors = config.monitors.len(),
        arrangements = config.arrangements.len(),
        primary = ?primary,
        "synthesized configuration from topology"
    );
    config
}

fn fallback_primary(topology: &TopologySnapshot) -> Option<&str> {
    topology
        .primary()
        .or_else(|| topology.enabled().next())
        .or_else(|| topology.iter().next())
        .map(|m| m.id.as_str())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
