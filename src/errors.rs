// src/errors.rs

//! Crate-wide error type and result alias.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProviderError {
    /// Malformed executable identifier or archive location.
    #[error("Format error: {0}")]
    FormatError(String),

    /// The external command could not be launched.
    #[error("Failed to start process `{command}`: {source}")]
    ProcessStartError {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The run was interrupted before the child process exited.
    #[error("Interrupted while waiting for `{command}`")]
    InterruptedError { command: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// Wraps a runner failure surfaced through the provider lifecycle.
    #[error("Hadoop job execution failed: {0}")]
    ExecutionFailed(#[source] Box<ProviderError>),

    #[error("Hadoop job output processing failed: {0}")]
    OutputProcessingFailed(#[source] Box<ProviderError>),
}

pub type Result<T> = std::result::Result<T, ProviderError>;
