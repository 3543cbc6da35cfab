//! Display topology domain entity.
//!
//! A [`TopologySnapshot`] is a point-in-time record of the monitors that are
//! connected to the machine.  Enabled monitors come first, sorted left to
//! right by their horizontal offset; connected-but-disabled monitors follow
//! in the order the display-control tool reported them.
//!
//! Snapshots are built fresh on every query and never mutated.

use std::cmp::Ordering;
use std::collections::HashSet;

use serde::Serialize;
use tracing::warn;

/// A single connected monitor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Monitor {
    /// Stable hardware identifier (the xrandr output name, e.g. `"HDMI-1"`).
    pub id: String,
    /// Horizontal offset in pixels.  `None` when the monitor is disabled.
    pub position: Option<i32>,
    /// Whether the monitor is currently part of the desktop.
    pub enabled: bool,
    /// Whether the monitor is the primary one.  At most one per snapshot.
    pub primary: bool,
    /// Raw geometry string as printed by the tool (e.g. `1920/509x1080/286+0+0`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geometry: Option<String>,
}

impl Monitor {
    /// Creates an enabled monitor at the given horizontal offset.
    pub fn enabled(id: impl Into<String>, position: i32, primary: bool) -> Self {
        Self {
            id: id.into(),
            position: Some(position),
            enabled: true,
            primary,
            geometry: None,
        }
    }

    /// Creates a monitor that is connected but not part of the desktop.
    pub fn disabled(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            position: None,
            enabled: false,
            primary: false,
            geometry: None,
        }
    }

    /// Attaches the raw geometry string used as the sort tie-break.
    pub fn with_geometry(mut self, geometry: impl Into<String>) -> Self {
        self.geometry = Some(geometry.into());
        self
    }
}

/// Ordered, id-unique list of connected monitors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TopologySnapshot {
    monitors: Vec<Monitor>,
}

impl TopologySnapshot {
    /// Returns a snapshot with no monitors.
    ///
    /// Used when the probe fails: callers treat "nothing detected" and
    /// "detection failed" the same way.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a snapshot from the enabled monitors and the full list of
    /// connected output ids.
    ///
    /// `enabled` may arrive in any order; it is sorted by position ascending
    /// with the raw geometry string as tie-break.  Every id in `connected`
    /// that is not already enabled is appended as a disabled monitor, keeping
    /// the order of `connected`.  Duplicate ids are dropped.
    pub fn assemble<I, S>(mut enabled: Vec<Monitor>, connected: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        enabled.sort_by(compare_position);

        let mut seen = HashSet::new();
        let mut monitors = Vec::with_capacity(enabled.len());
        for monitor in enabled {
            if seen.insert(monitor.id.clone()) {
                monitors.push(monitor);
            } else {
                warn!(id = %monitor.id, "duplicate enabled monitor in topology, ignoring");
            }
        }

        for id in connected {
            let id = id.into();
            if seen.insert(id.clone()) {
                monitors.push(Monitor::disabled(id));
            }
        }

        Self { monitors }
    }

    /// All monitors, enabled first.
    pub fn monitors(&self) -> &[Monitor] {
        &self.monitors
    }

    pub fn iter(&self) -> impl Iterator<Item = &Monitor> {
        self.monitors.iter()
    }

    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }

    /// Only the monitors that are currently part of the desktop.
    pub fn enabled(&self) -> impl Iterator<Item = &Monitor> {
        self.monitors.iter().filter(|m| m.enabled)
    }

    /// The monitor flagged primary by the tool, if any.
    pub fn primary(&self) -> Option<&Monitor> {
        self.monitors.iter().find(|m| m.primary)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.monitors.iter().any(|m| m.id == id)
    }
}

impl<'a> IntoIterator for &'a TopologySnapshot {
    type Item = &'a Monitor;
    type IntoIter = std::slice::Iter<'a, Monitor>;

    fn into_iter(self) -> Self::IntoIter {
        self.monitors.iter()
    }
}

fn compare_position(a: &Monitor, b: &Monitor) -> Ordering {
    a.position
        .cmp(&b.position)
        .then_with(|| a.geometry.cmp(&b.geometry))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(snapshot: &TopologySnapshot) -> Vec<&str> {
        snapshot.iter().map(|m| m.id.as_str()).collect()
    }

    #[test]
    fn test_assemble_sorts_enabled_monitors_by_position() {
        // Arrange
        let enabled = vec![
            Monitor::enabled("DP-2", 3840, false),
            Monitor::enabled("HDMI-1", 0, true),
            Monitor::enabled("DP-1", 1920, false),
        ];

        // Act
        let snapshot = TopologySnapshot::assemble(enabled, Vec::<String>::new());

        // Assert
        assert_eq!(ids(&snapshot), vec!["HDMI-1", "DP-1", "DP-2"]);
    }

    #[test]
    fn test_assemble_orders_numerically_not_lexicographically() {
        let enabled = vec![
            Monitor::enabled("far", 10240, false),
            Monitor::enabled("near", 1920, false),
        ];

        let snapshot = TopologySnapshot::assemble(enabled, Vec::<String>::new());

        assert_eq!(ids(&snapshot), vec!["near", "far"]);
    }

    #[test]
    fn test_assemble_breaks_position_ties_by_geometry() {
        let enabled = vec![
            Monitor::enabled("B", 0, false).with_geometry("2560/600x1440/340+0+1080"),
            Monitor::enabled("A", 0, false).with_geometry("1920/509x1080/286+0+0"),
        ];

        let snapshot = TopologySnapshot::assemble(enabled, Vec::<String>::new());

        assert_eq!(ids(&snapshot), vec!["A", "B"]);
    }

    #[test]
    fn test_assemble_appends_disabled_monitors_in_discovery_order() {
        // Arrange
        let enabled = vec![Monitor::enabled("eDP-1", 0, true)];
        let connected = vec!["HDMI-2", "eDP-1", "DP-3"];

        // Act
        let snapshot = TopologySnapshot::assemble(enabled, connected);

        // Assert
        assert_eq!(ids(&snapshot), vec!["eDP-1", "HDMI-2", "DP-3"]);
        assert!(!snapshot.monitors()[1].enabled);
        assert_eq!(snapshot.monitors()[1].position, None);
        assert!(!snapshot.monitors()[2].primary);
    }

    #[test]
    fn test_assemble_drops_duplicate_ids() {
        let enabled = vec![
            Monitor::enabled("HDMI-1", 0, true),
            Monitor::enabled("HDMI-1", 1920, false),
        ];

        let snapshot = TopologySnapshot::assemble(enabled, vec!["HDMI-1"]);

        assert_eq!(snapshot.len(), 1);
        assert!(snapshot.contains("HDMI-1"));
    }

    #[test]
    fn test_empty_snapshot_has_no_primary() {
        let snapshot = TopologySnapshot::empty();
        assert!(snapshot.is_empty());
        assert!(snapshot.primary().is_none());
        assert_eq!(snapshot.enabled().count(), 0);
    }

    #[test]
    fn test_primary_returns_flagged_monitor() {
        let snapshot = TopologySnapshot::assemble(
            vec![
                Monitor::enabled("DP-1", 0, false),
                Monitor::enabled("HDMI-1", 1920, true),
            ],
            Vec::<String>::new(),
        );

        assert_eq!(snapshot.primary().map(|m| m.id.as_str()), Some("HDMI-1"));
    }
}
