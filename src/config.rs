//! Server configuration
//!
//! Defaults can be replaced by a YAML file named in `DOCROOT_CONFIG`, and the
//! two most common settings can be overridden from the environment:
//!
//! ```yaml
//! server:
//!   listen_addr: "localhost:8080"
//!   max_request_bytes: 8192
//!   read_timeout_ms: 500
//! static_files:
//!   root: "www"
//! ```

use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable naming a YAML configuration file
pub const CONFIG_ENV: &str = "DOCROOT_CONFIG";
/// Environment variable overriding `server.listen_addr`
pub const LISTEN_ENV: &str = "LISTEN";
/// Environment variable overriding `static_files.root`
pub const DOCUMENT_ROOT_ENV: &str = "DOCUMENT_ROOT";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub static_files: StaticFilesConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the listener binds to
    pub listen_addr: String,
    /// Bytes buffered while waiting for the end of the request head
    pub max_request_bytes: usize,
    /// How long to wait for more of the head once the first bytes arrived
    pub read_timeout_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StaticFilesConfig {
    /// Document root; relative paths are taken from the working directory
    pub root: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "localhost:8080".to_string(),
            max_request_bytes: 8192,
            read_timeout_ms: 500,
        }
    }
}

impl ServerConfig {
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("www"),
        }
    }
}

impl Config {
    /// Loads the configuration for this process.
    pub fn load() -> anyhow::Result<Self> {
        let mut cfg = match std::env::var(CONFIG_ENV) {
            Ok(path) => Self::from_file(&path)?,
            Err(_) => Self::default(),
        };

        if let Ok(listen_addr) = std::env::var(LISTEN_ENV) {
            cfg.server.listen_addr = listen_addr;
        }

        if let Ok(root) = std::env::var(DOCUMENT_ROOT_ENV) {
            cfg.static_files.root = PathBuf::from(root);
        }

        if cfg.static_files.root.is_relative() {
            let cwd = std::env::current_dir()
                .context("Failed to read the working directory")?;
            cfg.static_files.root = cwd.join(&cfg.static_files.root);
        }

        Ok(cfg)
    }

    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        Self::from_yaml_str(&raw)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn from_yaml_str(raw: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(raw)?)
    }
}
