//! Error types for the PKV scheme.
//!
//! Generating and checking serials never fail; errors only arise at the
//! edges, when a scheme configuration or a user-supplied seed is read.

use thiserror::Error;

/// Scheme configuration and input errors.
#[derive(Debug, Error)]
pub enum PkvError {
    /// Scheme configuration is unusable.
    #[error("invalid scheme configuration: {0}")]
    InvalidConfig(String),

    /// Seed text is not a 32-bit hexadecimal value.
    #[error("invalid seed: {0}")]
    InvalidSeed(String),

    /// I/O error while reading a configuration file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file is not valid TOML for a scheme.
    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),
}

/// Result type for PKV operations.
pub type PkvResult<T> = Result<T, PkvError>;
