//! # gt-daemon
//!
//! Serves the goal API for one project.
//!
//! ```text
//! gt-daemon --project-root . --port 3010
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use gt_daemon::{DaemonConfig, GtConfig, ServeArgs};

/// goaltrack HTTP API server.
#[derive(Parser)]
#[command(name = "gt-daemon", version, about = "goaltrack HTTP API server")]
struct Cli {
    /// Project root directory (defaults to current directory).
    #[arg(long, default_value = ".")]
    project_root: PathBuf,

    /// Emit logs as JSON lines.
    #[arg(long)]
    log_json: bool,

    #[command(flatten)]
    serve: ServeArgs,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    gt_daemon::logging::init(cli.log_json)?;

    let project_root = cli.project_root.canonicalize()?;
    tracing::info!("Project root: {}", project_root.display());

    let paths = GtConfig::for_project(&project_root);
    let mut config = DaemonConfig::load_or_default(&paths.daemon_config)?;
    config.apply(&cli.serve);

    gt_daemon::serve(paths, config).await?;
    Ok(())
}
