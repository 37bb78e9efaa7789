//! # gt-cli
//!
//! Command-line interface for goaltrack.
//!
//! - `gt goal create/list/show/options` — work with the project's goals
//! - `gt serve` — start the HTTP API

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use gt_daemon::{GtConfig, ServeArgs};

/// goaltrack CLI — create and search goals.
#[derive(Parser)]
#[command(name = "gt", version, about)]
struct Cli {
    /// Project root directory (defaults to current directory).
    #[arg(long, default_value = ".")]
    project_root: PathBuf,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

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
    /// Start the goal API server.
    Serve(ServeArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    gt_daemon::logging::init(cli.log_json)?;

    let project_root = cli.project_root.canonicalize().unwrap_or(cli.project_root);
    let config = GtConfig::for_project(&project_root);

    match &cli.command {
        Commands::Goal { command } => commands::goal::execute(command, &config),
        Commands::Serve(args) => commands::serve::execute(&config, args),
    }
}
