// config.rs — Project layout and daemon configuration.
//
// GtConfig fixes where state lives under `.gt/` in the project root.
// DaemonConfig is read from `.gt/daemon.toml` when present; command-line
// flags (ServeArgs) override individual values.

use std::path::{Path, PathBuf};

use clap::Args;
use serde::{Deserialize, Serialize};

use crate::error::DaemonError;

/// On-disk layout for a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GtConfig {
    /// Root directory of the project.
    pub project_root: PathBuf,

    /// JSONL goal store.
    pub goals_file: PathBuf,

    /// Optional daemon settings file.
    pub daemon_config: PathBuf,
}

impl GtConfig {
    /// Standard `.gt/` layout for a project.
    pub fn for_project(project_root: impl AsRef<Path>) -> Self {
        let root = project_root.as_ref().to_path_buf();
        let gt_dir = root.join(".gt");
        Self {
            project_root: root,
            goals_file: gt_dir.join("goals.jsonl"),
            daemon_config: gt_dir.join("daemon.toml"),
        }
    }
}

/// Settings from `.gt/daemon.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DaemonConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Origins allowed to call the API from a browser. `"*"` allows any.
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: default_cors_origins(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// Append-only JSONL file under `.gt/`.
    #[default]
    File,
    /// Process memory; lost on exit.
    Memory,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3010
}

fn default_cors_origins() -> Vec<String> {
    vec!["http://localhost:3000".to_string()]
}

impl DaemonConfig {
    pub fn load(path: &Path) -> Result<Self, DaemonError> {
        let content = std::fs::read_to_string(path).map_err(|source| DaemonError::Io {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| DaemonError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Defaults when the file is absent; a malformed file is still an error.
    pub fn load_or_default(path: &Path) -> Result<Self, DaemonError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Apply command-line overrides.
    pub fn apply(&mut self, args: &ServeArgs) {
        if let Some(host) = &args.host {
            self.server.host = host.clone();
        }
        if let Some(port) = args.port {
            self.server.port = port;
        }
        if args.memory {
            self.storage.backend = StorageBackend::Memory;
        }
    }
}

/// Flags shared by `gt-daemon` and `gt serve`.
#[derive(Debug, Clone, Default, Args)]
pub struct ServeArgs {
    /// Address to bind (overrides daemon.toml).
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (overrides daemon.toml).
    #[arg(long)]
    pub port: Option<u16>,

    /// Keep goals in memory instead of `.gt/goals.jsonl`.
    #[arg(long)]
    pub memory: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn project_layout_under_gt_dir() {
        let config = GtConfig::for_project("/work/app");
        assert_eq!(config.goals_file, PathBuf::from("/work/app/.gt/goals.jsonl"));
        assert_eq!(config.daemon_config, PathBuf::from("/work/app/.gt/daemon.toml"));
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = DaemonConfig::load_or_default(&dir.path().join("daemon.toml")).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3010);
        assert_eq!(config.server.cors_origins, vec!["http://localhost:3000"]);
        assert_eq!(config.storage.backend, StorageBackend::File);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("daemon.toml");
        std::fs::write(&path, "[server]\nport = 4000\n\n[storage]\nbackend = \"memory\"\n").unwrap();

        let config = DaemonConfig::load_or_default(&path).unwrap();
        assert_eq!(config.server.port, 4000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.storage.backend, StorageBackend::Memory);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("daemon.toml");
        std::fs::write(&path, "[server]\nport = \"not a number\"\n").unwrap();

        let result = DaemonConfig::load_or_default(&path);
        assert!(matches!(result, Err(DaemonError::Config { .. })));
    }

    #[test]
    fn flags_override_file_values() {
        let mut config = DaemonConfig::default();
        config.apply(&ServeArgs {
            host: Some("0.0.0.0".to_string()),
            port: Some(8080),
            memory: true,
        });
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.storage.backend, StorageBackend::Memory);

        let mut untouched = DaemonConfig::default();
        untouched.apply(&ServeArgs::default());
        assert_eq!(untouched.server.port, 3010);
        assert_eq!(untouched.storage.backend, StorageBackend::File);
    }
}
