// error.rs — Error types for daemon startup and configuration.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DaemonError {
    /// The config file exists but could not be parsed.
    #[error("invalid config at {path}: {source}")]
    Config {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// An I/O operation failed (reading config, binding the listener).
    #[error("I/O error at {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// A CORS origin was not a valid header value.
    #[error("invalid CORS origin '{0}'")]
    InvalidOrigin(String),

    /// Building the goal store failed.
    #[error("goal error: {0}")]
    Goal(#[from] gt_goal::GoalError),
}
