use crate::config::DevConfig;
use crate::plan::{Invocation, Plan};
use crate::request::{CommandKind, ResolvedOptions};
use crate::session::Session;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub mod build;
pub mod clean;
pub mod deploy;
pub mod dev;
pub mod init;
pub mod link;
pub mod login;
pub mod status;
pub mod unlink;

/// Everything plan construction may read besides the options themselves.
#[derive(Debug, Clone)]
pub struct PlanContext {
    pub config: DevConfig,
    pub session: Session,
    pub project_dir: PathBuf,
}

impl PlanContext {
    pub fn new(config: DevConfig, session: Session, project_dir: impl Into<PathBuf>) -> Self {
        Self {
            config,
            session,
            project_dir: project_dir.into(),
        }
    }

    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    pub(crate) fn project_dir_arg(&self) -> String {
        self.project_dir.display().to_string()
    }

    pub(crate) fn health_interval(&self) -> Duration {
        Duration::from_millis(self.config.health_interval_ms)
    }
}

/// `network create` exits 1 when the network already exists.
pub(crate) fn ensure_network(ctx: &PlanContext) -> Invocation {
    Invocation::new(
        &ctx.config.runtime,
        ["network", "create", ctx.config.network.as_str()],
    )
    .captured()
    .tolerate(1)
}

/// Maps validated options to the command's plan. Pure: reads only its inputs.
pub fn build_plan(options: &ResolvedOptions, ctx: &PlanContext) -> Plan {
    match options.command() {
        CommandKind::Init => init::plan(options, ctx),
        CommandKind::Dev => dev::plan(options, ctx),
        CommandKind::Build => build::plan(options, ctx),
        CommandKind::Deploy => deploy::plan(options, ctx),
        CommandKind::Clean => clean::plan(options, ctx),
        CommandKind::Login => login::plan(options, ctx),
        CommandKind::Link => link::plan(options, ctx),
        CommandKind::Unlink => unlink::plan(options, ctx),
        CommandKind::Status => status::plan(options, ctx),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// Headline printed before a command starts.
pub fn start_message(command: CommandKind) -> CmdMessage {
    match command {
        CommandKind::Init => CmdMessage::info("Initializing VTEX project..."),
        CommandKind::Dev => CmdMessage::info("Starting development environment..."),
        CommandKind::Build => CmdMessage::info("Building project..."),
        CommandKind::Deploy => CmdMessage::info("Starting deploy..."),
        CommandKind::Clean => CmdMessage::warning("Cleaning Docker environment..."),
        CommandKind::Login => CmdMessage::info("Logging in to VTEX..."),
        CommandKind::Link => CmdMessage::info("Linking project..."),
        CommandKind::Unlink => CmdMessage::warning("Unlinking project..."),
        CommandKind::Status => CmdMessage::info("Checking environment status..."),
    }
}

pub(crate) fn success_message(options: &ResolvedOptions) -> CmdMessage {
    match options.command() {
        CommandKind::Init => CmdMessage::success("Project initialized successfully!"),
        CommandKind::Dev if options.flag("detached") => CmdMessage::success(format!(
            "Development environment running in background on port {}",
            options.port("port").unwrap_or(crate::request::DEFAULT_PORT)
        )),
        CommandKind::Dev => CmdMessage::info(
            "Log stream ended; the container keeps running until `vtex-dev clean`.",
        ),
        CommandKind::Build => CmdMessage::success("Build completed successfully!"),
        CommandKind::Deploy => CmdMessage::success("Deploy completed successfully!"),
        CommandKind::Clean => CmdMessage::success("Cleanup completed!"),
        CommandKind::Login => CmdMessage::success("Logged in successfully!"),
        CommandKind::Link => CmdMessage::success("Link completed successfully!"),
        CommandKind::Unlink => CmdMessage::success("Unlink completed successfully!"),
        CommandKind::Status => CmdMessage::success("Status check completed."),
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::request::CommandRequest;

    #[test]
    fn planning_is_deterministic_for_every_command() {
        let ctx = context();
        for kind in CommandKind::ALL {
            let first = plan_for(CommandRequest::new(kind), &ctx);
            let second = plan_for(CommandRequest::new(kind), &ctx);
            assert_eq!(first, second, "{kind} plans differ");
            assert!(!first.is_empty(), "{kind} produced an empty plan");
            assert_eq!(first.command(), kind);
        }
    }

    #[test]
    fn attached_dev_does_not_claim_the_container_stopped() {
        let attached = CommandRequest::new(CommandKind::Dev).resolve().unwrap();
        let message = success_message(&attached);
        assert_eq!(message.level, MessageLevel::Info);
        assert!(message.content.contains("vtex-dev clean"));
        assert!(!message.content.contains("stopped"));

        let detached = CommandRequest::new(CommandKind::Dev)
            .with("detached", true)
            .resolve()
            .unwrap();
        assert!(success_message(&detached).content.contains("port 3000"));
    }
}
