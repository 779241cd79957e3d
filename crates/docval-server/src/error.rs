//! Error types for the validation server

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for server operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while configuring or running the server
#[derive(Debug, Error)]
pub enum Error {
    /// Error from the validation core
    #[error(transparent)]
    Core(#[from] docval_core::Error),

    /// Explicitly requested configuration file does not exist
    #[error("configuration file not found: {}", path.display())]
    ConfigNotFound { path: PathBuf },

    /// Configuration values failed validation
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// TOML parse error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Listener could not be bound
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// Logging could not be initialised
    #[error("failed to initialise logging: {message}")]
    Logging { message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
