//! Human-readable report of the detected monitors and the active
//! configuration.

use std::fmt;

use montog_core::{ConfigSource, Monitor, TopologySnapshot};

/// Everything the `about` command prints.
///
/// `document` is the configuration already rendered by the storage layer, so
/// the report shows exactly what `init` would write.
#[derive(Debug, Clone)]
pub struct AboutReport {
    pub topology: TopologySnapshot,
    pub source: ConfigSource,
    pub document: String,
}

impl AboutReport {
    pub fn new(topology: TopologySnapshot, source: ConfigSource, document: String) -> Self {
        Self {
            topology,
            source,
            document,
        }
    }
}

/// One line per monitor: id, state, x offset, geometry and primary flag.
pub struct MonitorTable<'a>(pub &'a TopologySnapshot);

impl fmt::Display for MonitorTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "  (none)");
        }
        for monitor in self.0 {
            write_monitor(f, monitor)?;
        }
        Ok(())
    }
}

fn write_monitor(f: &mut fmt::Formatter<'_>, monitor: &Monitor) -> fmt::Result {
    write!(f, "  {:<12}", monitor.id)?;
    if !monitor.enabled {
        return writeln!(f, " disabled");
    }
    write!(f, " enabled")?;
    if let Some(x) = monitor.position {
        write!(f, "  x={x}")?;
    }
    if let Some(geometry) = &monitor.geometry {
        write!(f, "  {geometry}")?;
    }
    if monitor.primary {
        write!(f, "  (primary)")?;
    }
    writeln!(f)
}

impl fmt::Display for AboutReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} {}",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION")
        )?;
        writeln!(f, "{}", env!("CARGO_PKG_DESCRIPTION"))?;
        writeln!(f)?;

        writeln!(f, "Detected monitors:")?;
        write!(f, "{}", MonitorTable(&self.topology))?;
        writeln!(f)?;

        writeln!(f, "Configuration ({}):", self.source)?;
        write!(f, "{}", self.document)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
