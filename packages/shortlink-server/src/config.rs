//! Server configuration
//!
//! Two layers, later wins:
//!
//! 1. YAML file (`--config shortlink.yaml`), schema v1:
//!
//! ```yaml
//! version: 1
//! server:
//!   index_path: /var/lib/shortlink/links.tantivy
//!   port: 9000
//!   service_host: go.example.com
//! ```
//!
//! 2. Command-line flags (`--indexfile`, `--templates`, `--port`,
//!    `--servicename`, `--servicehost`, `--bind`).
//!
//! Anything not set falls back to [`ServerConfig::default`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use serde::{Deserialize, Serialize};
use shortlink_core::IndexOptions;
use thiserror::Error;

const SUPPORTED_VERSIONS: &[u32] = &[1];

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Missing version field in YAML
    #[error("Missing 'version' field in configuration file. Add 'version: 1' to the top of your YAML file.")]
    MissingVersion,

    /// Unsupported version
    #[error("Unsupported configuration version {found}. Supported versions: {}", supported.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(", "))]
    UnsupportedVersion { found: u32, supported: Vec<u32> },

    /// Field value out of range
    #[error("Invalid value for '{field}': {reason}")]
    Invalid { field: String, reason: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl ConfigError {
    fn invalid(field: &str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

/// Configuration result type
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Runtime configuration of the shortlink server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Index directory; reuse the same path across restarts
    pub index_path: PathBuf,
    /// Directory holding `form.html` / `opensearch.xml`; embedded copies when unset
    pub templates_dir: Option<PathBuf>,
    pub bind_host: String,
    pub port: u16,
    /// Name shown in the form and the OpenSearch descriptor
    pub service_name: String,
    /// Public host name used in the OpenSearch search template
    pub service_host: String,
    pub max_results: usize,
    pub writer_heap_bytes: usize,
    /// GET attempts per description fetch
    pub fetch_attempts: u32,
    pub fetch_timeout_secs: u64,
    /// Default tracing filter; `RUST_LOG` takes precedence
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        let index = IndexOptions::default();
        Self {
            index_path: PathBuf::from("links.tantivy"),
            templates_dir: None,
            bind_host: "0.0.0.0".to_string(),
            port: 8080,
            service_name: "shortlink".to_string(),
            service_host: "localhost".to_string(),
            max_results: index.max_results,
            writer_heap_bytes: index.writer_heap_bytes,
            fetch_attempts: 3,
            fetch_timeout_secs: 10,
            log_level: "info".to_string(),
        }
    }
}

/// YAML Schema v1
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFileV1 {
    version: Option<u32>,
    #[serde(default)]
    server: ServerConfig,
}

impl ServerConfig {
    /// Load and validate a YAML configuration file.
    pub fn from_yaml(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let file: ConfigFileV1 = serde_yaml::from_str(content)?;

        match file.version {
            None => return Err(ConfigError::MissingVersion),
            Some(found) if !SUPPORTED_VERSIONS.contains(&found) => {
                return Err(ConfigError::UnsupportedVersion {
                    found,
                    supported: SUPPORTED_VERSIONS.to_vec(),
                })
            }
            Some(_) => {}
        }

        file.server.validate()?;
        Ok(file.server)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.index_path.as_os_str().is_empty() {
            return Err(ConfigError::invalid("index_path", "must not be empty"));
        }
        if self.port == 0 {
            return Err(ConfigError::invalid("port", "must be in 1..=65535"));
        }
        if self.max_results == 0 {
            return Err(ConfigError::invalid("max_results", "must be at least 1"));
        }
        if self.fetch_attempts == 0 {
            return Err(ConfigError::invalid("fetch_attempts", "must be at least 1"));
        }
        Ok(())
    }

    pub fn index_options(&self) -> IndexOptions {
        IndexOptions {
            max_results: self.max_results,
            writer_heap_bytes: self.writer_heap_bytes,
        }
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_host, self.port)
    }
}

/// Command-line interface.
#[derive(Debug, Parser)]
#[command(name = "shortlink", about = "Resolve short aliases to URLs")]
pub struct Cli {
    /// YAML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// The location of the index directory
    #[arg(long = "indexfile")]
    pub index_file: Option<PathBuf>,

    /// The location of the templates directory
    #[arg(long)]
    pub templates: Option<PathBuf>,

    /// The port to which to bind
    #[arg(long)]
    pub port: Option<u16>,

    /// The host address to bind
    #[arg(long)]
    pub bind: Option<String>,

    /// The name of this service
    #[arg(long = "servicename")]
    pub service_name: Option<String>,

    /// Where this service is hosted
    #[arg(long = "servicehost")]
    pub service_host: Option<String>,
}

impl Cli {
    /// Merge file (if any), flags and defaults into a validated config.
    pub fn resolve(&self) -> ConfigResult<ServerConfig> {
        let mut config = match &self.config {
            Some(path) => ServerConfig::from_yaml(path)?,
            None => ServerConfig::default(),
        };

        if let Some(index_file) = &self.index_file {
            config.index_path = index_file.clone();
        }
        if let Some(templates) = &self.templates {
            config.templates_dir = Some(templates.clone());
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(bind) = &self.bind {
            config.bind_host = bind.clone();
        }
        if let Some(name) = &self.service_name {
            config.service_name = name.clone();
        }
        if let Some(host) = &self.service_host {
            config.service_host = host.clone();
        }

        config.validate()?;
        Ok(config)
    }
}
