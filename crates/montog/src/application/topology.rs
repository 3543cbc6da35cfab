//! Topology probing: the trait and the failure policy.

use std::time::Duration;

use async_trait::async_trait;
use montog_core::TopologySnapshot;
use thiserror::Error;
use tracing::error;

/// Error type for topology queries.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProbeError {
    /// The display-control tool did not answer in time.
    #[error("display query timed out after {0:?}")]
    Timeout(Duration),

    /// The tool could not be started or exited unsuccessfully.
    #[error("display query failed: {0}")]
    Failed(String),
}

/// Trait for discovering the connected monitors.
///
/// The infrastructure implementation runs `xrandr`; tests return fixed
/// snapshots.
#[async_trait]
pub trait TopologyProbe: Send + Sync {
    /// Returns the current topology.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError`] when the display-control tool cannot be queried.
    async fn probe(&self) -> Result<TopologySnapshot, ProbeError>;
}

/// Probes the topology, logging a failure and returning an empty snapshot.
///
/// Probe failures are never fatal: an empty snapshot simply means there is
/// nothing to offer.
pub async fn probe_or_empty(probe: &dyn TopologyProbe) -> TopologySnapshot {
    match probe.probe().await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            error!("error querying display topology: {e}");
            TopologySnapshot::empty()
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
