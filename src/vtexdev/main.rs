use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use colored::*;
use directories::ProjectDirs;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use vtexdev::api::Orchestrator;
use vtexdev::commands::{start_message, CmdMessage, MessageLevel, PlanContext};
use vtexdev::config::{DevConfig, CONFIG_DIR};
use vtexdev::error::{Result, VtexDevError};
use vtexdev::executor::process::ProcessExecutor;
use vtexdev::plan::Plan;
use vtexdev::request::CommandRequest;
use vtexdev::session::Session;

mod args;
use args::Cli;

const HOME_ENV: &str = "VTEX_DEV_HOME";

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            std::process::exit(code);
        }
    };
    init_tracing(cli.verbose);

    let settings = RunSettings {
        timeout: cli.timeout.map(Duration::from_secs),
        dry_run: cli.dry_run,
    };
    let Some(command) = cli.command else {
        let _ = Cli::command().print_help();
        return;
    };

    let request = command.into_request();
    let kind = request.command;
    if let Err(e) = run(&settings, &request) {
        print_messages(&[CmdMessage::error(format!("Error in {}: {}", kind, e))]);
        std::process::exit(1);
    }
}

struct RunSettings {
    timeout: Option<Duration>,
    dry_run: bool,
}

struct AppContext {
    plan: PlanContext,
    session_dir: PathBuf,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .init();
}

fn init_context() -> Result<AppContext> {
    let project_dir = std::env::current_dir()?;
    let config = DevConfig::load(project_dir.join(CONFIG_DIR))?.with_env_overrides();

    let session_dir = match std::env::var_os(HOME_ENV) {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => ProjectDirs::from("io", "vtex", "vtex-dev")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or_else(|| {
                VtexDevError::Config(format!(
                    "Could not determine a data directory; set {}",
                    HOME_ENV
                ))
            })?,
    };
    let session = Session::load(&session_dir)?;

    Ok(AppContext {
        plan: PlanContext::new(config, session, project_dir),
        session_dir,
    })
}

fn run(settings: &RunSettings, request: &CommandRequest) -> Result<()> {
    let ctx = init_context()?;

    let mut orchestrator = Orchestrator::new(ProcessExecutor::new(), ctx.plan);
    if let Some(limit) = settings.timeout {
        orchestrator = orchestrator.with_deadline(limit);
    }

    if settings.dry_run {
        let plan = orchestrator.plan(request)?;
        print_plan(&plan);
        return Ok(());
    }

    print_messages(&[start_message(request.command)]);
    let summary = orchestrator.execute(request)?;

    if let Some(output) = summary.output() {
        print!("{}", output);
    }
    print_messages(&summary.messages);

    if summary.session_changed {
        orchestrator.session().save(&ctx.session_dir)?;
    }
    Ok(())
}

fn print_plan(plan: &Plan) {
    println!("{}", format!("Plan for {}:", plan.command()).bold());
    for (i, step) in plan.steps().iter().enumerate() {
        println!("  {} {}", format!("{}.", i + 1).dimmed(), step);
    }
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.blue()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => eprintln!("{}", message.content.red()),
        }
    }
}
