//! # Execution Plans
//!
//! A [`Plan`] is the ordered list of [`Step`]s computed for one command request.
//! Steps only *describe* side effects; nothing here spawns a process or touches
//! the filesystem. Running a plan is the job of an
//! [`executor`](crate::executor) driven by the [`api`](crate::api) layer.
//!
//! Plans are immutable once built: the step list is private and exposed only
//! as a slice.

use crate::request::CommandKind;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Child inherits stdout/stderr; the user sees output live.
    Stream,
    /// Output is collected and returned to the caller.
    Capture,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub ok_codes: Vec<i32>,
    pub output: OutputMode,
}

impl Invocation {
    pub fn new<I, S>(program: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.to_string(),
            args: args.into_iter().map(Into::into).collect(),
            ok_codes: vec![0],
            output: OutputMode::Stream,
        }
    }

    pub fn captured(mut self) -> Self {
        self.output = OutputMode::Capture;
        self
    }

    /// Also treat `code` as success. Used where a non-zero exit means
    /// "already in that state" (network exists, container gone).
    pub fn tolerate(mut self, code: i32) -> Self {
        if !self.ok_codes.contains(&code) {
            self.ok_codes.push(code);
        }
        self
    }

    pub fn accepts(&self, code: i32) -> bool {
        self.ok_codes.contains(&code)
    }

    pub fn command_line(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                line.push_str(&format!("'{}'", arg));
            } else {
                line.push_str(arg);
            }
        }
        line
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    RunProcess(Invocation),
    StreamLogs {
        program: String,
        container: String,
    },
    WaitHealthy {
        program: String,
        container: String,
        probes: u32,
        interval: Duration,
    },
    Confirm {
        prompt: String,
    },
    WriteFile {
        path: PathBuf,
        contents: String,
    },
}

impl Step {
    pub fn describe(&self) -> String {
        match self {
            Step::RunProcess(inv) => inv.command_line(),
            Step::StreamLogs { program, container } => {
                format!("{} logs --follow {}", program, container)
            }
            Step::WaitHealthy {
                container, probes, ..
            } => format!("wait for {} to become healthy ({} probes)", container, probes),
            Step::Confirm { prompt } => format!("confirm: {}", prompt),
            Step::WriteFile { path, .. } => format!("write {}", path.display()),
        }
    }

    /// External program this step needs, if any.
    pub fn program(&self) -> Option<&str> {
        match self {
            Step::RunProcess(inv) => Some(inv.program.as_str()),
            Step::StreamLogs { program, .. } | Step::WaitHealthy { program, .. } => {
                Some(program.as_str())
            }
            Step::Confirm { .. } | Step::WriteFile { .. } => None,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    command: CommandKind,
    steps: Vec<Step>,
}

impl Plan {
    pub fn new(command: CommandKind, steps: Vec<Step>) -> Self {
        Self { command, steps }
    }

    pub fn command(&self) -> CommandKind {
        self.command
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Distinct programs named by the plan, in first-use order.
    pub fn programs(&self) -> Vec<&str> {
        let mut programs: Vec<&str> = Vec::new();
        for program in self.steps.iter().filter_map(Step::program) {
            if !programs.contains(&program) {
                programs.push(program);
            }
        }
        programs
    }
}

/// Collects steps while plan construction is in progress.
#[derive(Debug, Default)]
pub(crate) struct PlanBuilder {
    steps: Vec<Step>,
}

impl PlanBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn run(&mut self, invocation: Invocation) -> &mut Self {
        self.steps.push(Step::RunProcess(invocation));
        self
    }

    pub fn push(&mut self, step: Step) -> &mut Self {
        self.steps.push(step);
        self
    }

    pub fn finish(self, command: CommandKind) -> Plan {
        Plan::new(command, self.steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_line_quotes_arguments_with_spaces() {
        let inv = Invocation::new("docker", ["ps", "--format", "table {{.Names}}"]);
        assert_eq!(inv.command_line(), "docker ps --format 'table {{.Names}}'");
    }

    #[test]
    fn tolerate_adds_exit_code_once() {
        let inv = Invocation::new("docker", ["stop", "c"]).tolerate(1).tolerate(1);
        assert_eq!(inv.ok_codes, vec![0, 1]);
        assert!(inv.accepts(1));
        assert!(!inv.accepts(2));
    }

    #[test]
    fn programs_are_deduplicated_in_order() {
        let mut builder = PlanBuilder::new();
        builder
            .run(Invocation::new("vtex", ["whoami"]))
            .push(Step::Confirm {
                prompt: "go?".into(),
            })
            .run(Invocation::new("docker", ["ps"]))
            .run(Invocation::new("vtex", ["link"]));
        let plan = builder.finish(CommandKind::Link);
        assert_eq!(plan.programs(), vec!["vtex", "docker"]);
        assert_eq!(plan.len(), 4);
    }
}
