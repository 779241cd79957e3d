//! Error types for docval-core

use std::time::Duration;

/// Result type for docval-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building a catalog or running a validation
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The same check name appears twice within one source
    #[error("Duplicate check '{name}' in source '{source_name}'")]
    DuplicateCheck { source_name: String, name: String },

    /// A combination preset references a preset that does not exist
    #[error("Preset '{preset}' references unknown preset '{missing}'")]
    UnknownPreset { preset: String, missing: String },

    /// The runner did not finish before the request deadline
    #[error("Validation did not complete within {0:?}")]
    DeadlineExceeded(Duration),

    /// A worker task could not be joined
    #[error("Worker failure: {message}")]
    Worker { message: String },
}
