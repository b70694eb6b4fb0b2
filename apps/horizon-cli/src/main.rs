//! # horizon-cli
//!
//! Command-line interface for planning goals across time horizons:
//! - `horizon goal add/update/remove/list/show/parents/seed` — manage goals
//! - `horizon report show/export` — period reports and report files
//! - `horizon stats` — totals across every period
//! - `horizon backup` — checksummed snapshot of all goals
//! - `horizon sync <id>` — write a calendar entry for one goal

mod commands;
mod config;
mod session;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use config::HorizonConfig;
use session::Session;

/// Plan goals from daily to yearly horizons and report on progress.
#[derive(Parser)]
#[command(name = "horizon", version, about)]
struct Cli {
    /// Project root directory (defaults to current directory).
    #[arg(long, default_value = ".")]
    project_root: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage goals.
    Goal {
        #[command(subcommand)]
        command: commands::goal::GoalCommands,
    },
    /// Generate and export period reports.
    Report {
        #[command(subcommand)]
        command: commands::report::ReportCommands,
    },
    /// Show totals across every period.
    Stats,
    /// Write a backup of all goals.
    Backup {
        /// Backup file path (defaults to goals-backup.json next to the goals file).
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Write a calendar entry for a goal's deadline.
    Sync {
        /// Goal ID.
        id: String,
    },
}

const DEFAULT_LOG_FILTER: &str = "horizon_goal=info,horizon_report=info,horizon=info";

/// `RUST_LOG` replaces the default directives outright; an unparsable value
/// falls back to the defaults.
fn log_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .filter(|s| !s.trim().is_empty())
        .and_then(|s| EnvFilter::try_new(s).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they don't mix with command output.
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var("RUST_LOG").ok().as_deref()))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();
    let project_root = cli.project_root.canonicalize().unwrap_or(cli.project_root);
    let config = HorizonConfig::for_project(&project_root);
    let mut session = Session::open(&config)?;

    match &cli.command {
        Commands::Goal { command } => commands::goal::execute(command, &mut session)?,
        Commands::Report { command } => commands::report::execute(command, &session, &config)?,
        Commands::Stats => commands::report::stats(&session)?,
        Commands::Backup { out } => commands::backup::execute(&session, &config, out.as_deref())?,
        Commands::Sync { id } => commands::sync::execute(&session, &config, id)?,
    }

    session.save()
}
