//! `xrandr` output parsing and argument rendering.
//!
//! # Inbound: `xrandr --listmonitors`
//!
//! ```text
//! Monitors: 2
//!  0: +*HDMI-1 1920/509x1080/286+0+0  HDMI-1
//!  1: +DP-1 2560/597x1440/336+1920+0  DP-1
//! ```
//!
//! The header line is skipped.  In every entry the second token carries the
//! `+*` primary marker, the third is the geometry ending in the signed
//! horizontal and vertical offsets, and the fourth is the output id.
//!
//! # Inbound: `xrandr` (full status)
//!
//! ```text
//! Screen 0: minimum 320 x 200, current 4480 x 1440, maximum 16384 x 16384
//! HDMI-1 connected primary 1920x1080+0+0 (normal left inverted right x axis y axis) 509mm x 286mm
//!    1920x1080     60.00*+
//! eDP-1 connected (normal left inverted right x axis y axis)
//! DP-2 disconnected (normal left inverted right x axis y axis)
//! ```
//!
//! Only output lines whose second token is exactly `connected` matter.
//!
//! # Outbound: argument list
//!
//! Operations render to `--output <id> --off` or
//! `--output <id> --auto [options...] (--pos 0x0 | --right-of <prev>) [--primary]`,
//! grouped per monitor in operation order.

use tracing::warn;

use crate::domain::arrangement::{Operation, Placement};
use crate::domain::topology::{Monitor, TopologySnapshot};

/// Arguments that make `xrandr` list only the active monitors.
pub const LIST_MONITORS_ARGS: &[&str] = &["--listmonitors"];

/// Parses the output of `xrandr --listmonitors` into enabled monitors.
///
/// Malformed entries are logged and skipped.  The result is in the tool's
/// order; [`TopologySnapshot::assemble`] sorts it.
pub fn parse_list_monitors(output: &str) -> Vec<Monitor> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with("Monitors:"))
        .filter_map(|line| {
            let monitor = parse_monitor_entry(line);
            if monitor.is_none() {
                warn!(line, "unrecognised xrandr --listmonitors entry, skipping");
            }
            monitor
        })
        .collect()
}

fn parse_monitor_entry(line: &str) -> Option<Monitor> {
    let mut tokens = line.split_whitespace();
    let _index = tokens.next()?;
    let name = tokens.next()?;
    let geometry = tokens.next()?;
    let id = tokens.next()?;

    let x = horizontal_offset(geometry)?;

    Some(Monitor::enabled(id, x, name.starts_with("+*")).with_geometry(geometry))
}

/// Extracts `x` from `<w>/<mmw>x<h>/<mmh>+<x>+<y>`; offsets carry their own sign.
fn horizontal_offset(geometry: &str) -> Option<i32> {
    let is_sign = |c: char| c == '+' || c == '-';
    let y_start = geometry.rfind(is_sign)?;
    let head = &geometry[..y_start];
    let x_start = head.rfind(is_sign)?;
    head[x_start..].parse().ok()
}

/// Parses the full `xrandr` status listing into the ids of connected outputs,
/// in the order they were printed.
pub fn parse_connected_outputs(output: &str) -> Vec<String> {
    output
        .lines()
        .filter_map(|line| {
            let mut tokens = line.split_whitespace();
            let id = tokens.next()?;
            (tokens.next()? == "connected").then(|| id.to_string())
        })
        .collect()
}

/// Builds a [`TopologySnapshot`] from the two `xrandr` listings.
pub fn parse_topology(list_monitors_output: &str, status_output: &str) -> TopologySnapshot {
    TopologySnapshot::assemble(
        parse_list_monitors(list_monitors_output),
        parse_connected_outputs(status_output),
    )
}

/// Renders operations into the argument list passed to `xrandr`.
///
/// The program name itself is not included.
pub fn render_arguments(operations: &[Operation]) -> Vec<String> {
    let mut args = Vec::new();
    for op in operations {
        match op {
            Operation::Disable { monitor_id } => {
                args.extend(["--output".to_string(), monitor_id.clone(), "--off".to_string()]);
            }
            Operation::Enable {
                monitor_id,
                options,
                placement,
                is_primary,
            } => {
                args.extend(["--output".to_string(), monitor_id.clone(), "--auto".to_string()]);
                args.extend(options.iter().cloned());
                match placement {
                    Placement::Absolute { x, y } => {
                        args.extend(["--pos".to_string(), format!("{x}x{y}")]);
                    }
                    Placement::RightOf(previous) => {
                        args.extend(["--right-of".to_string(), previous.clone()]);
                    }
                }
                if *is_primary {
                    args.push("--primary".to_string());
                }
            }
        }
    }
    args
}

// ── Tests ─────────────────────────────────────────────────────────────────────
