//! `xrandr` adapter: runs the tool and implements the application traits.
//!
//! # Layers
//!
//! - [`CommandRunner`] spawns a program and collects its output.  The real
//!   implementation, [`ProcessRunner`], uses `tokio::process` and bounds
//!   every call with a timeout; the child is killed if the timeout elapses.
//! - [`Xrandr`] turns topology queries and operation lists into runner
//!   calls, using the `montog_core::protocol::xrandr` codec for both
//!   directions.
//!
//! Tests swap the runner for [`mock::ScriptedRunner`], which replays canned
//! output and records every invocation.

pub mod mock;

use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use montog_core::protocol::xrandr::LIST_MONITORS_ARGS;
use montog_core::{parse_topology, render_arguments, Operation, TopologySnapshot};
use thiserror::Error;
use tokio::process::Command;
use tracing::debug;

use crate::application::switch_arrangement::{DisplayController, ExecutionError};
use crate::application::topology::{ProbeError, TopologyProbe};

/// Captured output of a successful command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn from_stdout(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }
}

/// Error type for running an external command.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommandError {
    /// The program could not be started (not installed, not executable).
    #[error("could not run {program}: {message}")]
    Spawn { program: String, message: String },

    /// The program did not exit within the timeout and was killed.
    #[error("{program} did not finish within {after:?}")]
    Timeout { program: String, after: Duration },

    /// The program exited unsuccessfully.
    #[error("{program} failed ({status}): {stderr}")]
    Failed {
        program: String,
        status: String,
        stderr: String,
    },
}

/// Runs external programs.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Runs `program` with `args` to completion and returns its output.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError`] if the program cannot be started, times out
    /// or exits with a non-zero status.
    async fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput, CommandError>;
}

/// [`CommandRunner`] backed by real child processes.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    timeout: Duration,
}

impl ProcessRunner {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput, CommandError> {
        let mut command = Command::new(program);
        command
            .args(args)
            .stdin(Stdio::null())
            .kill_on_drop(true);

        // Dropping the `output()` future on timeout drops the child, which
        // kill_on_drop turns into a SIGKILL.
        let output = match tokio::time::timeout(self.timeout, command.output()).await {
            Err(_) => {
                return Err(CommandError::Timeout {
                    program: program.to_string(),
                    after: self.timeout,
                })
            }
            Ok(Err(e)) => {
                return Err(CommandError::Spawn {
                    program: program.to_string(),
                    message: e.to_string(),
                })
            }
            Ok(Ok(output)) => output,
        };

        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        if !output.status.success() {
            return Err(CommandError::Failed {
                program: program.to_string(),
                status: output.status.to_string(),
                stderr: stderr.trim().to_string(),
            });
        }

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr,
        })
    }
}

/// Topology probe and display controller backed by `xrandr`.
pub struct Xrandr {
    program: String,
    runner: Arc<dyn CommandRunner>,
}

impl Xrandr {
    pub fn new(program: impl Into<String>, runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            program: program.into(),
            runner,
        }
    }

    async fn query(&self, args: &[&str]) -> Result<String, ProbeError> {
        let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        let output = self
            .runner
            .run(&self.program, &args)
            .await
            .map_err(|e| match e {
                CommandError::Timeout { after, .. } => ProbeError::Timeout(after),
                other => ProbeError::Failed(other.to_string()),
            })?;
        Ok(output.stdout)
    }
}

#[async_trait]
impl TopologyProbe for Xrandr {
    async fn probe(&self) -> Result<TopologySnapshot, ProbeError> {
        let list_monitors = self.query(LIST_MONITORS_ARGS).await?;
        let status = self.query(&[]).await?;
        let snapshot = parse_topology(&list_monitors, &status);
        debug!(
            monitors = snapshot.len(),
            enabled = snapshot.enabled().count(),
            "probed display topology"
        );
        Ok(snapshot)
    }
}

#[async_trait]
impl DisplayController for Xrandr {
    async fn apply(&self, operations: &[Operation]) -> Result<(), ExecutionError> {
        let args = render_arguments(operations);
        debug!(command = %self.command_line(operations), "running display change");
        self.runner
            .run(&self.program, &args)
            .await
            .map(|_| ())
            .map_err(|e| match e {
                CommandError::Timeout { after, .. } => ExecutionError::Timeout(after),
                other => ExecutionError::Failed(other.to_string()),
            })
    }

    fn command_line(&self, operations: &[Operation]) -> String {
        std::iter::once(self.program.clone())
            .chain(render_arguments(operations))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use montog_core::{Monitor, Placement};

    use super::mock::ScriptedRunner;
    use super::*;

    const LIST_MONITORS: &str = "\
Monitors: 2
 0: +*HDMI-1 1920/527x1080/296+0+0  HDMI-1
 1: +DP-1 2560/597x1440/336+1920+0  DP-1
";

    const STATUS: &str = "\
Screen 0: minimum 320 x 200, current 4480 x 1440, maximum 16384 x 16384
HDMI-1 connected primary 1920x1080+0+0 (normal left inverted right x axis y axis) 527mm x 296mm
   1920x1080     60.00*+
DP-1 connected 2560x1440+1920+0 (normal left inverted right x axis y axis) 597mm x 336mm
eDP-1 connected (normal left inverted right x axis y axis)
VGA-1 disconnected (normal left inverted right x axis y axis)
";

    fn scripted() -> Arc<ScriptedRunner> {
        Arc::new(
            ScriptedRunner::new()
                .with_response(&["--listmonitors"], LIST_MONITORS)
                .with_response(&[], STATUS),
        )
    }

    #[tokio::test]
    async fn test_probe_runs_list_monitors_then_status() {
        // Arrange
        let runner = scripted();
        let xrandr = Xrandr::new("xrandr", runner.clone());

        // Act
        let snapshot = xrandr.probe().await.unwrap();

        // Assert
        let ids: Vec<&str> = snapshot.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["HDMI-1", "DP-1", "eDP-1"]);
        assert_eq!(snapshot.primary().map(|m| m.id.as_str()), Some("HDMI-1"));
        assert_eq!(snapshot.monitors()[2], Monitor::disabled("eDP-1"));

        let calls = runner.invocations();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], vec!["xrandr", "--listmonitors"]);
        assert_eq!(calls[1], vec!["xrandr"]);
    }

    #[tokio::test]
    async fn test_probe_maps_timeout() {
        let runner = Arc::new(ScriptedRunner::new().failing_with(CommandError::Timeout {
            program: "xrandr".to_string(),
            after: Duration::from_secs(10),
        }));
        let xrandr = Xrandr::new("xrandr", runner);

        let result = xrandr.probe().await;

        assert_eq!(result, Err(ProbeError::Timeout(Duration::from_secs(10))));
    }

    #[tokio::test]
    async fn test_apply_runs_one_invocation_with_rendered_arguments() {
        // Arrange
        let runner = Arc::new(ScriptedRunner::new());
        let xrandr = Xrandr::new("xrandr", runner.clone());
        let operations = vec![
            Operation::Disable {
                monitor_id: "eDP-1".to_string(),
            },
            Operation::Enable {
                monitor_id: "HDMI-1".to_string(),
                options: vec![],
                placement: Placement::origin(),
                is_primary: true,
            },
        ];

        // Act
        xrandr.apply(&operations).await.unwrap();

        // Assert
        assert_eq!(
            runner.invocations(),
            vec![vec![
                "xrandr", "--output", "eDP-1", "--off", "--output", "HDMI-1", "--auto", "--pos",
                "0x0", "--primary"
            ]]
        );
    }

    #[tokio::test]
    async fn test_apply_maps_failure() {
        let runner = Arc::new(ScriptedRunner::new().failing_with(CommandError::Failed {
            program: "xrandr".to_string(),
            status: "exit status: 1".to_string(),
            stderr: "xrandr: cannot find output".to_string(),
        }));
        let xrandr = Xrandr::new("xrandr", runner);
        let operations = vec![Operation::Disable {
            monitor_id: "X".to_string(),
        }];

        let result = xrandr.apply(&operations).await;

        assert!(matches!(result, Err(ExecutionError::Failed(msg)) if msg.contains("cannot find output")));
    }

    #[test]
    fn test_command_line_joins_program_and_arguments() {
        let xrandr = Xrandr::new("/usr/bin/xrandr", Arc::new(ScriptedRunner::new()));
        let operations = vec![Operation::Enable {
            monitor_id: "DP-1".to_string(),
            options: vec!["--rotate".to_string(), "left".to_string()],
            placement: Placement::RightOf("HDMI-1".to_string()),
            is_primary: false,
        }];

        assert_eq!(
            xrandr.command_line(&operations),
            "/usr/bin/xrandr --output DP-1 --auto --rotate left --right-of HDMI-1"
        );
    }

    // ── ProcessRunner ─────────────────────────────────────────────────────────

    #[cfg(unix)]
    #[tokio::test]
    async fn test_process_runner_captures_stdout() {
        let runner = ProcessRunner::new(Duration::from_secs(5));

        let output = runner
            .run("sh", &["-c".to_string(), "echo connected".to_string()])
            .await
            .unwrap();

        assert_eq!(output.stdout, "connected\n");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_process_runner_reports_non_zero_exit() {
        let runner = ProcessRunner::new(Duration::from_secs(5));

        let result = runner
            .run("sh", &["-c".to_string(), "echo oops >&2; exit 3".to_string()])
            .await;

        assert!(matches!(
            result,
            Err(CommandError::Failed { ref stderr, .. }) if stderr == "oops"
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_process_runner_times_out() {
        let runner = ProcessRunner::new(Duration::from_millis(100));

        let result = runner
            .run("sh", &["-c".to_string(), "sleep 5".to_string()])
            .await;

        assert!(matches!(result, Err(CommandError::Timeout { .. })));
    }

    #[tokio::test]
    async fn test_process_runner_reports_missing_program() {
        let runner = ProcessRunner::new(Duration::from_secs(5));

        let result = runner.run("montog-no-such-program", &[]).await;

        assert!(matches!(result, Err(CommandError::Spawn { .. })));
    }
}
