//! Cockpit CLI - console for the Agent Cockpit admin backend

mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use cockpit_core::FileStorage;
use cockpit_http::{ClientError, SessionStore, TypedClientBuilder};
use commands::{Commands, Context};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, error};

#[derive(Parser)]
#[command(name = "cockpit")]
#[command(about = "Console for the Agent Cockpit admin backend")]
#[command(version)]
struct Cli {
    /// Configuration file (TOML or YAML)
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    /// Backend origin, without the /api prefix
    #[arg(short = 's', long, global = true)]
    server: Option<String>,

    /// Directory holding the persisted session
    #[arg(short = 'd', long, global = true)]
    state_dir: Option<PathBuf>,

    /// Log filter used when RUST_LOG is not set
    #[arg(short = 'l', long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Prints client notifications to stderr
struct ConsoleNotifier;

impl cockpit_http::Notifier for ConsoleNotifier {
    fn error(&self, message: &str) {
        eprintln!("error: {message}");
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        // Client failures were already shown by the notifier
        if e.downcast_ref::<ClientError>().is_none() {
            eprintln!("error: {e:#}");
        }
        error!("Command failed: {e:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let settings = config::load_settings(
        cli.config.as_deref(),
        config::Overrides {
            server: cli.server,
            state_dir: cli.state_dir,
            log_level: cli.log_level,
        },
    )?;
    cockpit_core::tracing::init_tracing(&settings.logging)?;

    let state_dir = settings.storage.resolve_state_dir();
    let storage = FileStorage::open(&state_dir)?;
    debug!(path = %storage.path().display(), "Opened session storage");

    let session = Arc::new(SessionStore::load(Arc::new(storage))?);
    let client = TypedClientBuilder::from_settings(&settings)
        .notifier(Arc::new(ConsoleNotifier))
        .build_authenticated(session.clone())?;

    let ctx = Context {
        session,
        public: client.to_public(),
        client,
    };
    cli.command.execute(&ctx).await
}
