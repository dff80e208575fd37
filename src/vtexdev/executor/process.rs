use super::{StepExecutor, StepOutcome};
use crate::error::{Result, VtexDevError};
use crate::plan::{Invocation, OutputMode, Step};
use console::Term;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;
use std::time::Duration;
use tracing::{debug, trace};

const HEALTH_FORMAT: &str =
    "{{if .State.Health}}{{.State.Health.Status}}{{else}}{{.State.Status}}{{end}}";

/// Runs steps for real: spawns processes, prompts on the terminal, writes files.
#[derive(Debug, Default)]
pub struct ProcessExecutor {
    /// Answer every confirmation with "yes" without prompting.
    assume_yes: bool,
}

impl ProcessExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn assume_yes(mut self, yes: bool) -> Self {
        self.assume_yes = yes;
        self
    }

    fn run_process(&self, inv: &Invocation) -> Result<StepOutcome> {
        let mut command = Command::new(&inv.program);
        command.args(&inv.args);

        match inv.output {
            OutputMode::Stream => {
                let status = command
                    .stdin(Stdio::inherit())
                    .stdout(Stdio::inherit())
                    .stderr(Stdio::inherit())
                    .status()
                    .map_err(|e| spawn_error(&inv.program, e))?;
                Ok(StepOutcome::exited(status.code(), "", ""))
            }
            OutputMode::Capture => {
                let output = command
                    .stdin(Stdio::null())
                    .output()
                    .map_err(|e| spawn_error(&inv.program, e))?;
                Ok(StepOutcome::exited(
                    output.status.code(),
                    String::from_utf8_lossy(&output.stdout),
                    String::from_utf8_lossy(&output.stderr),
                ))
            }
        }
    }

    fn wait_healthy(
        &self,
        program: &str,
        container: &str,
        probes: u32,
        interval: Duration,
    ) -> Result<StepOutcome> {
        for probe in 1..=probes {
            let output = Command::new(program)
                .args(["inspect", "--format", HEALTH_FORMAT, container])
                .stdin(Stdio::null())
                .output()
                .map_err(|e| spawn_error(program, e))?;

            if !output.status.success() {
                return Ok(StepOutcome::exited(
                    output.status.code(),
                    "",
                    String::from_utf8_lossy(&output.stderr),
                ));
            }

            let state = String::from_utf8_lossy(&output.stdout).trim().to_string();
            trace!(container, probe, state = state.as_str(), "health probe");
            match state.as_str() {
                "healthy" | "running" => return Ok(StepOutcome::ok().with_stdout(state)),
                "unhealthy" | "exited" | "dead" => {
                    return Ok(StepOutcome::failed(format!(
                        "container {} is {}",
                        container, state
                    )))
                }
                _ => {}
            }

            if probe < probes {
                thread::sleep(interval);
            }
        }

        Ok(StepOutcome::failed(format!(
            "container {} did not become healthy after {} probes",
            container, probes
        )))
    }

    fn confirm(&self, prompt: &str) -> Result<StepOutcome> {
        if self.assume_yes {
            return Ok(StepOutcome::ok());
        }

        let term = Term::stderr();
        if !term.is_term() {
            return Ok(StepOutcome::failed(
                "confirmation needs an interactive terminal (pass --force to skip it)",
            ));
        }

        term.write_str(&format!("{} [y/N] ", prompt))?;
        let answer = term.read_line()?;
        if is_yes(&answer) {
            Ok(StepOutcome::ok())
        } else {
            Ok(StepOutcome::failed("cancelled by user"))
        }
    }

    fn write_file(&self, path: &Path, contents: &str) -> Result<StepOutcome> {
        if path.exists() {
            return Ok(StepOutcome::failed(format!(
                "{} already exists",
                path.display()
            )));
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, contents)?;
        Ok(StepOutcome::ok())
    }
}

impl StepExecutor for ProcessExecutor {
    fn locate(&self, program: &str) -> bool {
        find_program(program, env::var_os("PATH")).is_some()
    }

    fn execute(&mut self, step: &Step) -> Result<StepOutcome> {
        debug!(step = %step, "executing");
        match step {
            Step::RunProcess(inv) => self.run_process(inv),
            Step::StreamLogs { program, container } => {
                let logs = Invocation::new(program, ["logs", "--follow", container.as_str()]);
                self.run_process(&logs)
            }
            Step::WaitHealthy {
                program,
                container,
                probes,
                interval,
            } => self.wait_healthy(program, container, *probes, *interval),
            Step::Confirm { prompt } => self.confirm(prompt),
            Step::WriteFile { path, contents } => self.write_file(path, contents),
        }
    }
}

fn spawn_error(program: &str, err: io::Error) -> VtexDevError {
    if err.kind() == io::ErrorKind::NotFound {
        VtexDevError::ExternalToolMissing {
            program: program.to_string(),
        }
    } else {
        VtexDevError::Io(err)
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Resolves `program` the way a shell would: paths are checked directly, bare
/// names are searched for in `path_var`.
fn find_program(program: &str, path_var: Option<std::ffi::OsString>) -> Option<PathBuf> {
    let candidate = Path::new(program);
    if candidate.components().count() > 1 {
        return candidate.is_file().then(|| candidate.to_path_buf());
    }

    let path_var = path_var?;
    env::split_paths(&path_var).find_map(|dir| {
        let full = dir.join(program);
        if full.is_file() {
            return Some(full);
        }
        if cfg!(windows) {
            let exe = dir.join(format!("{}.exe", program));
            if exe.is_file() {
                return Some(exe);
            }
        }
        None
    })
}
