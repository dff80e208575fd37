use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VtexDevError {
    #[error("Invalid option --{option} for '{command}': {reason}")]
    InvalidOption {
        command: String,
        option: String,
        reason: String,
    },

    #[error("Required tool '{program}' was not found on PATH")]
    ExternalToolMissing { program: String },

    #[error("Step {index} failed ({description}): {}{}", exit_label(.status), diagnostics(.stderr))]
    StepFailed {
        index: usize,
        description: String,
        status: Option<i32>,
        stderr: String,
    },

    /// `step` is the step that was running, or about to start, when the
    /// deadline passed.
    #[error("Deadline exceeded at step {step} after {:.1}s", .elapsed.as_secs_f64())]
    Timeout { elapsed: Duration, step: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

fn exit_label(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("exit status {}", code),
        None => "no exit status".to_string(),
    }
}

fn diagnostics(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("\n{}", trimmed)
    }
}

impl VtexDevError {
    pub fn invalid_option(
        command: impl Into<String>,
        option: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidOption {
            command: command.into(),
            option: option.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, VtexDevError>;
