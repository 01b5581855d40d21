mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "triage")]
#[command(about = "Role-based access control for the incident tracker")]
#[command(version)]
struct Cli {
    /// Path to the Triage config directory (default: ~/.triage)
    #[arg(long, global = true, env = "TRIAGE_CONFIG_DIR")]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default configuration file
    Init,

    /// Show current configuration
    Config,

    /// List the built-in roles and what they grant
    Roles {
        /// Show every permission of each role
        #[arg(long)]
        verbose: bool,
        /// JSON role listing from the backend; only its labels are used
        #[arg(long)]
        backend: Option<PathBuf>,
    },

    /// List the permission vocabulary
    Permissions,

    /// Check permissions for a role (exit status 1 when denied)
    Check {
        /// Role code, matched case-insensitively
        #[arg(long)]
        role: String,
        /// Require every permission instead of any one of them
        #[arg(long)]
        all: bool,
        /// Permission identifiers, e.g. incident-title-update
        #[arg(required = true)]
        permissions: Vec<String>,
    },

    /// Show which application routes a role may navigate to
    Routes {
        /// Role code, matched case-insensitively
        #[arg(long)]
        role: String,
    },

    /// Issue a session credential for development
    Token {
        #[arg(long)]
        user_id: String,
        #[arg(long)]
        username: String,
        #[arg(long)]
        role: Option<String>,
    },

    /// Decode a session credential and show its permissions
    Whoami {
        /// The bearer credential
        token: String,
    },

    /// Run the access decision service
    Serve,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("triage=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    let base_dir = match cli.config_dir {
        Some(ref dir) => dir.clone(),
        None => triage_core::TriageConfig::default_base_dir()?,
    };

    match cli.command {
        Commands::Init => commands::init::run(&base_dir),
        Commands::Config => commands::config::run(&base_dir),
        Commands::Roles {
            verbose,
            ref backend,
        } => commands::roles::run(verbose, backend.as_deref()),
        Commands::Permissions => commands::permissions::run(),
        Commands::Check {
            ref role,
            all,
            ref permissions,
        } => commands::check::run(role, all, permissions),
        Commands::Routes { ref role } => commands::routes::run(role, &base_dir),
        Commands::Token {
            ref user_id,
            ref username,
            ref role,
        } => commands::token::issue(user_id, username, role.as_deref(), &base_dir),
        Commands::Whoami { ref token } => commands::token::whoami(token, &base_dir),
        Commands::Serve => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(commands::serve::run(&base_dir))
        }
    }
}
