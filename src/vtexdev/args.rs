use clap::{ArgAction, Parser, Subcommand};
use vtexdev::request::{CommandKind, CommandRequest};

#[derive(Parser, Debug)]
#[command(name = "vtex-dev")]
#[command(version)]
#[command(about = "VTEX development tools with Docker", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Fail the command once it has run this many seconds (checked around each step)
    #[arg(long, value_name = "SECS", global = true)]
    pub timeout: Option<u64>,

    /// Print the steps that would run without running them
    #[arg(long, global = true)]
    pub dry_run: bool,
}

// Enumerated values are kept as plain strings here; the library validates
// them so every UI gets the same errors.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a VTEX project with Docker
    Init {
        /// Template type (basic, advanced)
        #[arg(short, long, default_value = "basic")]
        template: String,

        /// Project name
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Start the development environment
    Dev {
        /// Run in the background
        #[arg(short, long)]
        detached: bool,

        /// Server port
        #[arg(short, long, default_value = "3000")]
        port: String,
    },

    /// Build the project
    Build {
        /// Environment (staging, production)
        #[arg(short, long, default_value = "production")]
        env: String,

        /// Build without cache
        #[arg(long)]
        no_cache: bool,
    },

    /// Deploy the project
    Deploy {
        /// Environment (staging, production)
        #[arg(short, long, default_value = "staging")]
        env: String,

        /// VTEX workspace
        #[arg(short, long)]
        workspace: Option<String>,

        /// Skip the confirmation prompt
        #[arg(long)]
        force: bool,
    },

    /// Remove Docker containers and volumes
    Clean {
        /// Remove everything (containers, volumes, images)
        #[arg(short, long)]
        all: bool,

        /// Force removal
        #[arg(short, long)]
        force: bool,
    },

    /// Log in to VTEX
    Login {
        /// VTEX account
        #[arg(short, long)]
        account: Option<String>,
    },

    /// Link the project to a VTEX workspace
    Link {
        /// VTEX workspace
        #[arg(short, long)]
        workspace: Option<String>,
    },

    /// Unlink the project
    Unlink {
        /// Unlink every app
        #[arg(short, long)]
        all: bool,
    },

    /// Check environment status
    Status,
}

impl Commands {
    pub fn into_request(self) -> CommandRequest {
        match self {
            Commands::Init { template, name } => CommandRequest::new(CommandKind::Init)
                .with("template", template)
                .with_opt("name", name),
            Commands::Dev { detached, port } => CommandRequest::new(CommandKind::Dev)
                .with("detached", detached)
                .with("port", port),
            Commands::Build { env, no_cache } => CommandRequest::new(CommandKind::Build)
                .with("env", env)
                .with("no-cache", no_cache),
            Commands::Deploy {
                env,
                workspace,
                force,
            } => CommandRequest::new(CommandKind::Deploy)
                .with("env", env)
                .with_opt("workspace", workspace)
                .with("force", force),
            Commands::Clean { all, force } => CommandRequest::new(CommandKind::Clean)
                .with("all", all)
                .with("force", force),
            Commands::Login { account } => {
                CommandRequest::new(CommandKind::Login).with_opt("account", account)
            }
            Commands::Link { workspace } => {
                CommandRequest::new(CommandKind::Link).with_opt("workspace", workspace)
            }
            Commands::Unlink { all } => CommandRequest::new(CommandKind::Unlink).with("all", all),
            Commands::Status => CommandRequest::new(CommandKind::Status),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vtexdev::request::OptionValue;

    fn parse(args: &[&str]) -> CommandRequest {
        let cli = Cli::try_parse_from(args).unwrap();
        cli.command.unwrap().into_request()
    }

    #[test]
    fn build_forwards_raw_env() {
        let request = parse(&["vtex-dev", "build", "--env", "foo"]);
        assert_eq!(request.command, CommandKind::Build);
        assert_eq!(request.options["env"], OptionValue::from("foo"));
        assert_eq!(request.options["no-cache"], OptionValue::Bool(false));
    }

    #[test]
    fn deploy_short_flags() {
        let request = parse(&["vtex-dev", "deploy", "-e", "production", "-w", "main", "--force"]);
        assert_eq!(request.options["env"], OptionValue::from("production"));
        assert_eq!(request.options["workspace"], OptionValue::from("main"));
        assert_eq!(request.options["force"], OptionValue::Bool(true));
    }

    #[test]
    fn omitted_text_options_are_not_sent() {
        let request = parse(&["vtex-dev", "login"]);
        assert!(request.options.is_empty());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["vtex-dev", "status", "--dry-run", "-vv", "--timeout", "5"])
                .unwrap();
        assert!(cli.dry_run);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.timeout, Some(5));
    }
}
