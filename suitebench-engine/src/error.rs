//! Error types for the engine.

use thiserror::Error;

/// Result type alias using the engine's error type.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors raised while building or configuring a suite.
///
/// Failures inside a timed function are not reported here: they are stored
/// on the benchmark as a [`BenchError`] and surfaced through suite events.
#[derive(Error, Debug)]
pub enum EngineError {
    /// A configuration value is out of range
    #[error("invalid configuration: {field} {reason}")]
    InvalidConfig {
        /// Name of the offending field
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },

    /// The configuration file could not be read
    #[error("failed to read configuration: {0}")]
    ConfigRead(#[from] std::io::Error),

    /// The configuration file is not valid TOML for [`crate::EngineConfig`]
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// The configuration could not be rendered as TOML
    #[error("failed to serialize configuration: {0}")]
    ConfigWrite(#[from] toml::ser::Error),
}

/// Failure of a single benchmark during its timing loop.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BenchError {
    /// The timed function panicked
    #[error("panicked: {0}")]
    Panicked(String),
}
