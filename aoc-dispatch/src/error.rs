//! Error types for resolution, registration and dispatch

use crate::key::PuzzleKey;
use crate::solution::Part;
use std::path::PathBuf;
use thiserror::Error;

/// Error raised by a unit while solving a part
#[derive(Debug, Error)]
pub enum SolveError {
    /// The input does not have the shape the unit expects
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// An error occurred while solving the part
    #[error("Solve failed: {0}")]
    SolveFailed(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Error type for registration failures
#[derive(Debug, Clone, Error)]
pub enum RegistrationError {
    /// A unit is already registered for this key; the first registration is kept
    #[error("Duplicate unit registration for {0}")]
    DuplicateUnit(PuzzleKey),
}

/// Error type for resolving configuration into a puzzle key
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No tier of the precedence chain produced a value
    #[error("Configuration incomplete: no value for `{field}`")]
    Incomplete { field: &'static str },

    /// The configured time zone is not a known IANA zone name
    #[error("Unknown time zone: {0}")]
    InvalidTimezone(String),

    /// The configuration file could not be read
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for the settings schema
    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// An environment override holds a value of the wrong type
    #[error("Invalid value for {name}: {value:?}")]
    InvalidEnv { name: &'static str, value: String },
}

/// Error raised by the rebuild collaborator
#[derive(Debug, Error)]
pub enum BuildError {
    /// The build tool could not be started
    #[error("Failed to run build: {0}")]
    Io(#[from] std::io::Error),

    /// The build tool ran and reported failure
    #[error("`{command}` failed with {status}")]
    Failed { command: String, status: String },
}

/// Error type for dispatcher operations
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The puzzle key could not be resolved
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// No unit was generated for the resolved key
    #[error("No unit for puzzle {0}")]
    UnitNotFound(PuzzleKey),

    /// The unit exists but does not implement the requested part
    #[error("Puzzle {key} does not implement {part}")]
    OperationNotImplemented { key: PuzzleKey, part: Part },

    /// The input or example file does not exist
    #[error("Missing artifact: {}", .path.display())]
    ArtifactMissing { path: PathBuf },

    /// The artifact exists but could not be read
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Rebuild failed; the stale unit is not used
    #[error("Rebuild failed: {0}")]
    Build(#[from] BuildError),

    /// The unit returned an error
    #[error("{key} {part}: {source}")]
    Solve {
        key: PuzzleKey,
        part: Part,
        #[source]
        source: SolveError,
    },

    /// Writing to the report sink failed
    #[error("Failed to write report: {0}")]
    Report(#[source] std::io::Error),
}

/// A doc example whose evaluation differs from its documented output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocExampleFailure {
    /// Line of the example within the unit's documentation (1-based)
    pub line: usize,
    pub part: Part,
    pub expected: String,
    /// The unit's answer, or the rendered error if it failed
    pub actual: String,
}

/// Error type for the test harness
#[derive(Debug, Error)]
pub enum HarnessError {
    /// The plugin registry could not be built
    #[error("Registration error: {0}")]
    Registration(#[from] RegistrationError),

    /// An artifact or dispatch operation failed
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    /// The harness was generated without linking its unit
    #[error("Harness for {0} is not linked to a unit")]
    NotLinked(PuzzleKey),

    /// A doc example line could not be parsed
    #[error("Malformed doc example on line {line}: {reason}")]
    MalformedDocExample { line: usize, reason: String },

    /// One or more doc examples evaluated to a different output
    #[error("{} doc example(s) failed for {key}: {}", .failures.len(), render_failures(.failures))]
    DocExampleMismatch {
        key: PuzzleKey,
        failures: Vec<DocExampleFailure>,
    },
}

fn render_failures(failures: &[DocExampleFailure]) -> String {
    failures
        .iter()
        .map(|f| {
            format!(
                "line {} {}: expected {:?}, got {:?}",
                f.line, f.part, f.expected, f.actual
            )
        })
        .collect::<Vec<_>>()
        .join("; ")
}
