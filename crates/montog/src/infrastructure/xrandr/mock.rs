//! Scripted command runner for tests.
//!
//! # Why a scripted runner?
//!
//! The real [`ProcessRunner`](super::ProcessRunner) spawns `xrandr`, which:
//!
//! - needs a running X server with real outputs attached;
//! - actually rearranges the monitors of the machine running the tests.
//!
//! `ScriptedRunner` replaces the process with a lookup table from argument
//! lists to canned stdout, and records every invocation so assertions can
//! check exactly which commands ran and in what order.  Argument lists with
//! no scripted response succeed with empty output.
//!
//! # Usage in tests
//!
//! ```ignore
//! let runner = Arc::new(
//!     ScriptedRunner::new()
//!         .with_response(&["--listmonitors"], LIST_MONITORS)
//!         .with_response(&[], STATUS),
//! );
//! let xrandr = Xrandr::new("xrandr", runner.clone());
//!
//! let snapshot = xrandr.probe().await?;
//! assert_eq!(runner.invocations().len(), 2);
//! ```
//!
//! # Failures
//!
//! [`failing_with`](ScriptedRunner::failing_with) makes every call return the
//! given error, to exercise timeout and exit-status handling in callers.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use super::{CommandError, CommandOutput, CommandRunner};

/// A runner that replays canned output without spawning processes.
#[derive(Default)]
pub struct ScriptedRunner {
    /// Each call as `[program, args...]`, in call order.
    calls: Mutex<Vec<Vec<String>>>,
    /// Canned stdout keyed by the exact argument list.
    responses: Vec<(Vec<String>, String)>,
    /// When set, every call records itself and then returns this error.
    failure: Option<CommandError>,
}

impl ScriptedRunner {
    /// Creates a runner with no scripted responses that always succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers calls whose arguments equal `args` with `stdout`.
    pub fn with_response(mut self, args: &[&str], stdout: &str) -> Self {
        let args = args.iter().map(|a| a.to_string()).collect();
        self.responses.push((args, stdout.to_string()));
        self
    }

    /// Makes every call fail with `error`.
    pub fn failing_with(mut self, error: CommandError) -> Self {
        self.failure = Some(error);
        self
    }

    /// Every recorded call as `[program, args...]`.
    pub fn invocations(&self) -> Vec<Vec<String>> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput, CommandError> {
        let mut call = Vec::with_capacity(args.len() + 1);
        call.push(program.to_string());
        call.extend(args.iter().cloned());
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);

        if let Some(error) = &self.failure {
            return Err(error.clone());
        }

        let stdout = self
            .responses
            .iter()
            .find(|(expected, _)| expected.as_slice() == args)
            .map(|(_, stdout)| stdout.clone())
            .unwrap_or_default();
        Ok(CommandOutput::from_stdout(stdout))
    }
}
