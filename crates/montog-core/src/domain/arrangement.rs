//! Arrangement resolution.
//!
//! [`resolve`] turns a [`Configuration`] and an arrangement name into the
//! ordered list of [`Operation`]s that produce exactly that arrangement:
//!
//! 1. Every configured monitor the arrangement does not enable is switched
//!    off, in the order the monitors are declared.
//! 2. Every enabled alias is switched on in declared order.  The first one is
//!    pinned at the origin and each following one is placed to the right of
//!    the one before it.
//!
//! Switching everything else off first means the result does not depend on
//! what was enabled before, and no two enabled monitors ever share a position
//! while the tool applies the change.

use std::collections::HashSet;

use thiserror::Error;
use tracing::warn;

use super::config::{Arrangement, Configuration};

/// Errors that can occur when resolving an arrangement.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolutionError {
    /// The arrangement would leave no monitor enabled.
    #[error("arrangement '{0}' would result in no enabled monitors")]
    EmptyArrangement(String),
}

/// Where an enabled monitor is placed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    /// Pinned at the given coordinates (always the origin for the first monitor).
    Absolute { x: i32, y: i32 },
    /// Placed immediately to the right of the monitor with this id.
    RightOf(String),
}

impl Placement {
    /// The placement of the leftmost monitor.
    pub fn origin() -> Self {
        Placement::Absolute { x: 0, y: 0 }
    }
}

/// One instruction targeted at a single monitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Switch the monitor off.
    Disable { monitor_id: String },
    /// Switch the monitor on at its preferred mode.
    Enable {
        monitor_id: String,
        /// Extra tool arguments, appended verbatim.
        options: Vec<String>,
        placement: Placement,
        is_primary: bool,
    },
}

impl Operation {
    pub fn monitor_id(&self) -> &str {
        match self {
            Operation::Disable { monitor_id } | Operation::Enable { monitor_id, .. } => monitor_id,
        }
    }

    pub fn is_enable(&self) -> bool {
        matches!(self, Operation::Enable { .. })
    }
}

/// Resolves `name` against `config` into an ordered operation list.
///
/// An unknown name resolves like an arrangement with nothing enabled.
/// Aliases in the enabled list that are not declared under `monitors` are
/// skipped.  Several aliases may name the same output: the output is enabled
/// once, by the first enabled alias that names it, and is never also
/// disabled.
///
/// # Errors
///
/// Returns [`ResolutionError::EmptyArrangement`] when no monitor would be
/// enabled.  Callers must not execute anything in that case.
pub fn resolve(config: &Configuration, name: &str) -> Result<Vec<Operation>, ResolutionError> {
    let empty = Arrangement::default();
    let arrangement = config.arrangement(name).unwrap_or_else(|| {
        warn!(arrangement = name, "unknown arrangement, treating it as empty");
        &empty
    });

    let enabled_ids: HashSet<&str> = arrangement
        .enabled
        .iter()
        .filter_map(|alias| config.monitor(alias))
        .map(|monitor| monitor.id.as_str())
        .collect();
    let primary_id = arrangement
        .primary
        .as_deref()
        .filter(|alias| arrangement.enables(alias))
        .and_then(|alias| config.monitor(alias))
        .map(|monitor| monitor.id.as_str());

    let mut disabled: HashSet<&str> = HashSet::new();
    let mut operations: Vec<Operation> = config
        .monitors
        .values()
        .map(|monitor| monitor.id.as_str())
        .filter(|id| !enabled_ids.contains(id) && disabled.insert(*id))
        .map(|id| Operation::Disable {
            monitor_id: id.to_string(),
        })
        .collect();

    let mut emitted: HashSet<&str> = HashSet::new();
    let mut previous: Option<&str> = None;
    for alias in &arrangement.enabled {
        let Some(monitor) = config.monitor(alias) else {
            warn!(arrangement = name, alias = %alias, "alias is not declared under monitors, skipping");
            continue;
        };
        if !emitted.insert(monitor.id.as_str()) {
            warn!(
                arrangement = name,
                alias = %alias,
                monitor = %monitor.id,
                "monitor is already enabled by an earlier alias, skipping"
            );
            continue;
        }

        let placement = match previous {
            None => Placement::origin(),
            Some(prev) => Placement::RightOf(prev.to_string()),
        };
        operations.push(Operation::Enable {
            monitor_id: monitor.id.clone(),
            options: monitor.options.clone(),
            placement,
            is_primary: primary_id == Some(monitor.id.as_str()),
        });
        previous = Some(monitor.id.as_str());
    }

    if previous.is_none() {
        return Err(ResolutionError::EmptyArrangement(name.to_string()));
    }
    Ok(operations)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
