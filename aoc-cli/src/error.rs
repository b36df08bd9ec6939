//! Error types for the CLI

use thiserror::Error;

/// Main CLI error type
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Settings file or environment overrides are invalid
    #[error("Settings error: {0}")]
    Settings(#[from] aoc_dispatch::ConfigError),

    /// Registration error
    #[error("Registration error: {0}")]
    Registration(#[from] aoc_dispatch::RegistrationError),

    /// Dispatch error
    #[error(transparent)]
    Dispatch(#[from] aoc_dispatch::DispatchError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
