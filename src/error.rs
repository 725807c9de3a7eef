// src/error.rs

//! Error types for the fallible edges of the engine
//!
//! Comparison and classification are total and never produce these. Errors
//! only come from loading configuration, binding process-wide defaults, and
//! the opt-in strict version parser.

use thiserror::Error;

/// Errors produced by configuration loading and strict parsing
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration file could not be read
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// Configuration file is not valid TOML for `EngineConfig`
    #[error("Failed to parse configuration: {0}")]
    ConfigParseError(#[from] toml::de::Error),

    /// Configuration parsed but holds an unusable value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A process-wide default was already bound
    #[error("{0} is already bound for this process")]
    AlreadyBound(&'static str),

    /// Strict parsing rejected a version string
    #[error("Malformed version '{input}': {reason}")]
    MalformedVersion { input: String, reason: String },

    /// Generic parse failure (dependency expressions, CLI input)
    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, Error>;
