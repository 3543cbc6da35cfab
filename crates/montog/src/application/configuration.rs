//! Load-or-synthesize policy for the active configuration.
//!
//! Each user action loads the configuration afresh: an edit to the document
//! on disk takes effect on the next `list` or `switch` without a restart.

use montog_core::{synthesize, Configuration};
use tracing::info;

use super::topology::{probe_or_empty, TopologyProbe};

/// Trait for reading user-written configuration documents.
///
/// The infrastructure implementation walks a list of candidate files; tests
/// hand back in-memory configurations.
pub trait ConfigRepository: Send + Sync {
    /// Returns the first document that loads successfully, tagged with where
    /// it came from, or `None` when no candidate is usable.
    ///
    /// Implementations log each unreadable or malformed candidate and move on
    /// to the next one.
    fn load_first(&self) -> Option<Configuration>;
}

/// Returns the active configuration.
///
/// The topology is only probed when no document could be loaded, in which
/// case the default configuration is synthesized from it.  The result is
/// therefore never an error, though its arrangements may enable nothing.
pub async fn current_configuration(
    repository: &dyn ConfigRepository,
    probe: &dyn TopologyProbe,
) -> Configuration {
    if let Some(config) = repository.load_first() {
        info!(source = %config.source, "configuration loaded");
        return config;
    }

    let topology = probe_or_empty(probe).await;
    let config = synthesize(&topology);
    info!(
        monitors = topology.len(),
        arrangements = config.arrangements.len(),
        "no configuration file found; using generated configuration"
    );
    config
}

// ── Tests ─────────────────────────────────────────────────────────────────────
