//! # Orchestrator
//!
//! The single entry point for running a command, whatever UI sits on top.
//!
//! ## Role and Responsibilities
//!
//! - **Validates** the request against the command's option table
//! - **Plans** by dispatching to the matching `commands::*::plan` function
//! - **Runs** the plan one step at a time through a [`StepExecutor`]
//! - **Reports** a [`Summary`] on success or the first failure as an error
//!
//! ## What the Orchestrator Does NOT Do
//!
//! - **Retry**: the first failing step ends the run
//! - **Roll back**: resources created by earlier steps are left in place
//! - **Print**: it returns messages and captured output; the CLI decides how
//!   to show them
//!
//! ## Generic Over StepExecutor
//!
//! `Orchestrator<E: StepExecutor>`:
//! - Production: `Orchestrator<ProcessExecutor>`
//! - Testing: `Orchestrator<FakeExecutor>`
//!
//! ## Lifecycle of a Run
//!
//! ```text
//! request ──resolve──▶ options ──plan──▶ Plan ──preflight──▶ step 1 … step n
//!    │                    │                        │              │
//!    ▼                    ▼                        ▼              ▼
//! InvalidOption     (pure, no I/O)      ExternalToolMissing   StepFailed / Timeout
//! ```

use crate::commands::{self, CmdMessage, PlanContext};
use crate::error::{Result, VtexDevError};
use crate::executor::StepExecutor;
use crate::plan::{OutputMode, Plan, Step};
use crate::request::{CommandKind, CommandRequest};
use crate::session::Session;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// One step that ran to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    /// 1-based position in the plan.
    pub index: usize,
    pub description: String,
    /// Captured stdout, verbatim. Empty for streamed steps.
    pub stdout: String,
}

#[derive(Debug, Clone)]
pub struct Summary {
    pub command: CommandKind,
    pub steps: Vec<StepReport>,
    pub messages: Vec<CmdMessage>,
    /// Whether the run changed the session (the caller should persist it).
    pub session_changed: bool,
}

impl Summary {
    /// Raw stdout of the final step when it was captured and non-empty.
    pub fn output(&self) -> Option<&str> {
        self.steps
            .last()
            .map(|report| report.stdout.as_str())
            .filter(|out| !out.is_empty())
    }
}

pub struct Orchestrator<E: StepExecutor> {
    executor: E,
    context: PlanContext,
    deadline: Option<Duration>,
}

impl<E: StepExecutor> Orchestrator<E> {
    pub fn new(executor: E, context: PlanContext) -> Self {
        Self {
            executor,
            context,
            deadline: None,
        }
    }

    /// Fails with [`VtexDevError::Timeout`] once `limit` has elapsed. Checked
    /// before and after each step; a running process is not killed, but a run
    /// that overshoots the limit never reports success.
    pub fn with_deadline(mut self, limit: Duration) -> Self {
        self.deadline = Some(limit);
        self
    }

    /// Validates `request` and builds its plan without running anything.
    pub fn plan(&self, request: &CommandRequest) -> Result<Plan> {
        let options = request.resolve()?;
        Ok(commands::build_plan(&options, &self.context))
    }

    pub fn execute(&mut self, request: &CommandRequest) -> Result<Summary> {
        let started = Instant::now();
        let options = request.resolve()?;
        let plan = commands::build_plan(&options, &self.context);
        info!(command = %plan.command(), steps = plan.len(), "plan built");

        self.preflight(&plan)?;
        let steps = self.run_plan(&plan, started)?;

        let session_changed = self.context.session.record(&options);
        let summary = Summary {
            command: plan.command(),
            steps,
            messages: vec![commands::success_message(&options)],
            session_changed,
        };
        info!(command = %summary.command, "command completed");
        Ok(summary)
    }

    pub fn session(&self) -> &Session {
        &self.context.session
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    fn preflight(&self, plan: &Plan) -> Result<()> {
        for program in plan.programs() {
            if !self.executor.locate(program) {
                warn!(program, "required tool not found");
                return Err(VtexDevError::ExternalToolMissing {
                    program: program.to_string(),
                });
            }
        }
        Ok(())
    }

    fn run_plan(&mut self, plan: &Plan, started: Instant) -> Result<Vec<StepReport>> {
        let mut reports = Vec::with_capacity(plan.len());

        for (position, step) in plan.steps().iter().enumerate() {
            let index = position + 1;
            self.check_deadline(started, index)?;

            debug!(step = index, total = plan.len(), "running {}", step);
            let outcome = self.executor.execute(step)?;
            self.check_deadline(started, index)?;

            if !outcome.succeeded(step) {
                warn!(step = index, code = ?outcome.code, "step failed");
                return Err(VtexDevError::StepFailed {
                    index,
                    description: step.describe(),
                    status: outcome.code,
                    stderr: outcome.stderr,
                });
            }

            reports.push(StepReport {
                index,
                description: step.describe(),
                stdout: captured_stdout(step, outcome.stdout),
            });
        }

        Ok(reports)
    }

    fn check_deadline(&self, started: Instant, step: usize) -> Result<()> {
        let Some(limit) = self.deadline else {
            return Ok(());
        };
        let elapsed = started.elapsed();
        if elapsed >= limit {
            warn!(step, ?elapsed, ?limit, "deadline exceeded");
            return Err(VtexDevError::Timeout { elapsed, step });
        }
        Ok(())
    }
}

fn captured_stdout(step: &Step, stdout: String) -> String {
    match step {
        Step::RunProcess(inv) if inv.output == OutputMode::Capture => stdout,
        _ => String::new(),
    }
}
