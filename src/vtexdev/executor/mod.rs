//! # Step Executors
//!
//! The orchestrator never spawns anything itself. It hands each [`Step`] to a
//! [`StepExecutor`] and interprets the [`StepOutcome`] it gets back.
//!
//! - [`process::ProcessExecutor`]: production, backed by `std::process`
//! - [`fake::FakeExecutor`]: records every step and replays scripted outcomes,
//!   so orchestration can be tested without docker or vtex installed
//!
//! Executors report what happened; deciding whether that counts as success
//! (`ok_codes`) is [`StepOutcome::succeeded`]'s job, so every executor agrees
//! on the rule.

use crate::error::Result;
use crate::plan::Step;

#[cfg(any(test, feature = "test_utils"))]
pub mod fake;
pub mod process;

/// What a single step produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepOutcome {
    /// Exit code, or `None` when the step never produced one (declined
    /// confirmation, killed by signal, failed health check).
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl StepOutcome {
    pub fn ok() -> Self {
        Self {
            code: Some(0),
            ..Self::default()
        }
    }

    pub fn exited(code: Option<i32>, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            code,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            code: None,
            stdout: String::new(),
            stderr: reason.into(),
        }
    }

    pub fn with_stdout(mut self, stdout: impl Into<String>) -> Self {
        self.stdout = stdout.into();
        self
    }

    pub fn succeeded(&self, step: &Step) -> bool {
        match (step, self.code) {
            (Step::RunProcess(inv), Some(code)) => inv.accepts(code),
            (_, Some(code)) => code == 0,
            (_, None) => false,
        }
    }
}

pub trait StepExecutor {
    /// Whether `program` can be launched. Checked for every program in a plan
    /// before its first step runs.
    fn locate(&self, program: &str) -> bool;

    /// Runs one step to completion. `Err` is reserved for problems outside the
    /// step itself (the program vanished, the terminal went away); a step that
    /// ran and failed is an `Ok` outcome with a failing code.
    fn execute(&mut self, step: &Step) -> Result<StepOutcome>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::Invocation;

    #[test]
    fn tolerated_codes_count_as_success() {
        let step = Step::RunProcess(Invocation::new("docker", ["stop", "c"]).tolerate(1));
        assert!(StepOutcome::exited(Some(1), "", "").succeeded(&step));
        assert!(!StepOutcome::exited(Some(125), "", "").succeeded(&step));
        assert!(!StepOutcome::exited(None, "", "").succeeded(&step));
    }

    #[test]
    fn non_process_steps_need_zero() {
        let step = Step::Confirm {
            prompt: "ok?".into(),
        };
        assert!(StepOutcome::ok().succeeded(&step));
        assert!(!StepOutcome::failed("declined").succeeded(&step));
        assert!(!StepOutcome::exited(Some(1), "", "").succeeded(&step));
    }
}
