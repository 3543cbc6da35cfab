//! SwitchArrangementUseCase: turns an arrangement name into a display change.
//!
//! The use case loads the active configuration, resolves the chosen
//! arrangement into operations and hands them to a [`DisplayController`] in
//! one batch.  The controller implementations live in the infrastructure
//! layer.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use montog_core::{resolve, Configuration, Operation, ResolutionError};
use thiserror::Error;
use tracing::{info, warn};

use super::configuration::{current_configuration, ConfigRepository};
use super::topology::TopologyProbe;

/// Error type for applying operations to the displays.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExecutionError {
    /// The display-control tool did not finish in time.
    #[error("display change timed out after {0:?}")]
    Timeout(Duration),

    /// The tool could not be started or exited unsuccessfully.
    #[error("display change failed: {0}")]
    Failed(String),
}

/// Error type for a complete switch request.
#[derive(Debug, Error)]
pub enum SwitchError {
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    #[error(transparent)]
    Execution(#[from] ExecutionError),
}

/// Trait for applying a resolved operation list to the displays.
#[async_trait]
pub trait DisplayController: Send + Sync {
    /// Applies all operations as a single atomic invocation.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutionError`] if the tool fails or times out.  Partial
    /// application is not rolled back.
    async fn apply(&self, operations: &[Operation]) -> Result<(), ExecutionError>;

    /// Returns the command line that [`apply`](Self::apply) would run, for
    /// dry runs and logs.
    fn command_line(&self, operations: &[Operation]) -> String;
}

/// The Switch Arrangement use case.
pub struct SwitchArrangementUseCase {
    repository: Arc<dyn ConfigRepository>,
    probe: Arc<dyn TopologyProbe>,
    controller: Arc<dyn DisplayController>,
}

impl SwitchArrangementUseCase {
    pub fn new(
        repository: Arc<dyn ConfigRepository>,
        probe: Arc<dyn TopologyProbe>,
        controller: Arc<dyn DisplayController>,
    ) -> Self {
        Self {
            repository,
            probe,
            controller,
        }
    }

    /// Loads the active configuration (see [`current_configuration`]).
    pub async fn configuration(&self) -> Configuration {
        current_configuration(self.repository.as_ref(), self.probe.as_ref()).await
    }

    /// Arrangement names in the order they should be offered to the user.
    pub async fn arrangement_names(&self) -> Vec<String> {
        self.configuration()
            .await
            .arrangement_names()
            .map(str::to_string)
            .collect()
    }

    /// Resolves `name` without touching the displays.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError`] if the arrangement would enable nothing.
    pub async fn plan(&self, name: &str) -> Result<Vec<Operation>, ResolutionError> {
        let config = self.configuration().await;
        resolve(&config, name)
    }

    /// The command line a switch to `name` would run.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError`] if the arrangement would enable nothing.
    pub async fn preview(&self, name: &str) -> Result<String, ResolutionError> {
        let operations = self.plan(name).await?;
        Ok(self.controller.command_line(&operations))
    }

    /// Resolves `name` and applies the result.
    ///
    /// Returns the operations that were applied.
    ///
    /// # Errors
    ///
    /// Returns [`SwitchError::Resolution`] without running anything if the
    /// arrangement would enable nothing, or [`SwitchError::Execution`] if the
    /// display-control tool fails.
    pub async fn switch(&self, name: &str) -> Result<Vec<Operation>, SwitchError> {
        let operations = match self.plan(name).await {
            Ok(operations) => operations,
            Err(e) => {
                warn!(arrangement = name, "refusing to switch: {e}");
                return Err(e.into());
            }
        };

        info!(
            arrangement = name,
            operations = operations.len(),
            "switching arrangement"
        );
        self.controller.apply(&operations).await?;
        Ok(operations)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use montog_core::{Arrangement, MonitorAlias, TopologySnapshot};

    use super::*;
    use crate::application::topology::ProbeError;

    struct FixedRepository(Configuration);

    impl ConfigRepository for FixedRepository {
        fn load_first(&self) -> Option<Configuration> {
            Some(self.0.clone())
        }
    }

    struct NoProbe;

    #[async_trait]
    impl TopologyProbe for NoProbe {
        async fn probe(&self) -> Result<TopologySnapshot, ProbeError> {
            Ok(TopologySnapshot::empty())
        }
    }

    #[derive(Default)]
    struct RecordingController {
        applied: Mutex<Vec<Vec<Operation>>>,
        fail_with: Option<ExecutionError>,
    }

    #[async_trait]
    impl DisplayController for RecordingController {
        async fn apply(&self, operations: &[Operation]) -> Result<(), ExecutionError> {
            self.applied.lock().unwrap().push(operations.to_vec());
            match &self.fail_with {
                Some(e) => Err(e.clone()),
                None => Ok(()),
            }
        }

        fn command_line(&self, operations: &[Operation]) -> String {
            format!("ops:{}", operations.len())
        }
    }

    fn two_monitor_config() -> Configuration {
        let mut config = Configuration::default();
        config.monitors.insert("left", MonitorAlias::new("HDMI-1"));
        config.monitors.insert("right", MonitorAlias::new("DP-1"));
        config
            .arrangements
            .insert("Both", Arrangement::new(["left", "right"], Some("left")));
        config
            .arrangements
            .insert("Right only", Arrangement::new(["right"], Some("right")));
        config.arrangements.insert("Nothing", Arrangement::default());
        config
    }

    fn build(controller: Arc<RecordingController>) -> SwitchArrangementUseCase {
        SwitchArrangementUseCase::new(
            Arc::new(FixedRepository(two_monitor_config())),
            Arc::new(NoProbe),
            controller,
        )
    }

    #[tokio::test]
    async fn test_arrangement_names_follow_document_order() {
        let use_case = build(Arc::new(RecordingController::default()));

        let names = use_case.arrangement_names().await;

        assert_eq!(names, vec!["Both", "Right only", "Nothing"]);
    }

    #[tokio::test]
    async fn test_switch_applies_resolved_operations_once() {
        // Arrange
        let controller = Arc::new(RecordingController::default());
        let use_case = build(controller.clone());

        // Act
        let operations = use_case.switch("Right only").await.unwrap();

        // Assert
        let applied = controller.applied.lock().unwrap();
        assert_eq!(applied.len(), 1, "exactly one invocation per switch");
        assert_eq!(applied[0], operations);
        assert_eq!(operations.len(), 2);
        assert!(!operations[0].is_enable());
        assert_eq!(operations[0].monitor_id(), "HDMI-1");
        assert!(operations[1].is_enable());
        assert_eq!(operations[1].monitor_id(), "DP-1");
    }

    #[tokio::test]
    async fn test_switch_refuses_empty_arrangement_without_running() {
        // Arrange
        let controller = Arc::new(RecordingController::default());
        let use_case = build(controller.clone());

        // Act
        let result = use_case.switch("Nothing").await;

        // Assert
        assert!(matches!(
            result,
            Err(SwitchError::Resolution(ResolutionError::EmptyArrangement(_)))
        ));
        assert!(controller.applied.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_switch_reports_execution_failure() {
        let controller = Arc::new(RecordingController {
            fail_with: Some(ExecutionError::Timeout(Duration::from_secs(10))),
            ..Default::default()
        });
        let use_case = build(controller.clone());

        let result = use_case.switch("Both").await;

        assert!(matches!(
            result,
            Err(SwitchError::Execution(ExecutionError::Timeout(_)))
        ));
        assert_eq!(controller.applied.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_preview_does_not_apply() {
        let controller = Arc::new(RecordingController::default());
        let use_case = build(controller.clone());

        let line = use_case.preview("Both").await.unwrap();

        assert_eq!(line, "ops:2");
        assert!(controller.applied.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_name_behaves_like_empty_arrangement() {
        let use_case = build(Arc::new(RecordingController::default()));

        let result = use_case.plan("Does not exist").await;

        assert!(matches!(result, Err(ResolutionError::EmptyArrangement(_))));
    }
}
