//! Server configuration with layered resolution
//!
//! Configuration is resolved from three layers, later layers overriding
//! earlier ones:
//!
//! 1. Built-in defaults
//! 2. TOML file passed with `--config` (a missing file is an error)
//! 3. Command-line flags
//!
//! ```toml
//! listen = "0.0.0.0:8080"
//! execution = "sequential"
//! deadline_ms = 30000
//! ```

use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use docval_core::runner::default_parallelism;
use docval_core::{ExecutionMode, Runner};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

pub const DEFAULT_LISTEN: &str = "127.0.0.1:8080";
pub const DEFAULT_ROUTE: &str = "/api/v1/validate";
pub const DEFAULT_BODY_LIMIT: usize = 10 * 1024 * 1024;
pub const DEFAULT_LOG_FILTER: &str = "docval=info,tower_http=info";

/// Effective server configuration after all layers are merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Socket address the HTTP listener binds to
    pub listen: SocketAddr,

    /// Path of the validation endpoint
    pub route: String,

    /// How checks within one request are executed
    pub execution: ExecutionMode,

    /// Upper bound on checks running at once (concurrent mode only)
    pub max_parallel: usize,

    /// Per-request deadline in milliseconds; `None` disables it
    pub deadline_ms: Option<u64>,

    /// Largest accepted request body
    pub body_limit_bytes: usize,

    /// Default `tracing` filter, overridden by `RUST_LOG`
    pub log_filter: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: SocketAddr::from(([127, 0, 0, 1], 8080)),
            route: DEFAULT_ROUTE.to_string(),
            execution: ExecutionMode::default(),
            max_parallel: default_parallelism(),
            deadline_ms: None,
            body_limit_bytes: DEFAULT_BODY_LIMIT,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

/// One configuration layer. Unset fields leave the lower layer untouched.
///
/// Doubles as the command-line flag set, so the CLI layer is parsed straight
/// into it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, clap::Args)]
#[serde(deny_unknown_fields)]
pub struct ConfigLayer {
    /// Address to listen on, e.g. 127.0.0.1:8080
    #[arg(long)]
    pub listen: Option<SocketAddr>,

    /// Path of the validation endpoint
    #[arg(long)]
    pub route: Option<String>,

    /// Check execution mode: sequential or concurrent
    #[arg(long)]
    pub execution: Option<ExecutionMode>,

    /// Maximum number of checks running at once
    #[arg(long)]
    pub max_parallel: Option<usize>,

    /// Per-request deadline in milliseconds
    #[arg(long)]
    pub deadline_ms: Option<u64>,

    /// Maximum request body size in bytes
    #[arg(long)]
    pub body_limit_bytes: Option<usize>,

    /// Default log filter (RUST_LOG takes precedence)
    #[arg(long)]
    pub log_filter: Option<String>,
}

impl ConfigLayer {
    /// Parse a layer from TOML text.
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load a layer from a file that must exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }
}

impl ServerConfig {
    /// Resolve the configuration from an optional file and CLI flags.
    pub fn resolve(file: Option<&Path>, flags: &ConfigLayer) -> Result<Self> {
        let mut config = Self::default();

        if let Some(path) = file {
            tracing::debug!(?path, "Loading config file");
            config.apply(&ConfigLayer::load(path)?);
        }
        config.apply(flags);

        config.validate()?;
        Ok(config)
    }

    /// Overlay every field set in `layer`.
    pub fn apply(&mut self, layer: &ConfigLayer) {
        if let Some(listen) = layer.listen {
            self.listen = listen;
        }
        if let Some(route) = &layer.route {
            self.route = route.clone();
        }
        if let Some(execution) = layer.execution {
            self.execution = execution;
        }
        if let Some(max_parallel) = layer.max_parallel {
            self.max_parallel = max_parallel;
        }
        if let Some(deadline_ms) = layer.deadline_ms {
            self.deadline_ms = Some(deadline_ms);
        }
        if let Some(limit) = layer.body_limit_bytes {
            self.body_limit_bytes = limit;
        }
        if let Some(filter) = &layer.log_filter {
            self.log_filter = filter.clone();
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.route.starts_with('/') {
            return Err(Error::InvalidConfig {
                message: format!("route '{}' must start with '/'", self.route),
            });
        }
        if self.max_parallel == 0 {
            return Err(Error::InvalidConfig {
                message: "max_parallel must be at least 1".to_string(),
            });
        }
        if self.body_limit_bytes == 0 {
            return Err(Error::InvalidConfig {
                message: "body_limit_bytes must be greater than 0".to_string(),
            });
        }
        if self.deadline_ms == Some(0) {
            return Err(Error::InvalidConfig {
                message: "deadline_ms must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.deadline_ms.map(Duration::from_millis)
    }

    pub fn runner(&self) -> Arc<dyn Runner> {
        self.execution.runner(self.max_parallel)
    }
}
