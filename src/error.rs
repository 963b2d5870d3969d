//! Error types for Fitbot
//!
//! This module defines the error types used by the ambient layers of the
//! application (configuration files, HTTP client setup, terminal I/O).
//! Failures of an individual completion call are not errors: they are
//! classified into [`crate::providers::CompletionOutcome`] instead.

use thiserror::Error;

/// Main error type for Fitbot operations
#[derive(Error, Debug)]
pub enum FitbotError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Provider construction errors (HTTP client setup, invalid endpoint)
    #[error("Provider error: {0}")]
    Provider(String),

    /// FAQ table errors (duplicate or empty questions)
    #[error("FAQ error: {0}")]
    Faq(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Line editor errors in the interactive shell
    #[error("Readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
}

/// Result type alias for Fitbot operations
///
/// Uses `anyhow::Error` so callers can attach context while still being able
/// to downcast to [`FitbotError`].
pub type Result<T> = anyhow::Result<T>;
