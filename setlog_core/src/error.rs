//! Error types for the setlog_core library.

use std::io;
use std::path::PathBuf;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for setlog_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error (includes malformed routine documents)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A session operation was called while no session is active
    #[error("Routine is not in session")]
    NotInSession,

    /// The operation is not allowed while a session is active
    #[error("Routine is already in session")]
    AlreadyInSession,

    /// A session was started on a routine with no exercises
    #[error("Routine has no exercises")]
    EmptyRoutine,

    /// Exercise index outside of the routine
    #[error("Exercise index {index} out of range (routine has {len} exercises)")]
    IndexOutOfRange { index: usize, len: usize },

    /// No exercise with the given name
    #[error("Exercise not found: {0}")]
    ExerciseNotFound(String),

    /// A routine file already exists at the target path
    #[error("Routine already exists at {0:?}")]
    RoutineExists(PathBuf),

    /// Unrecognised equipment name
    #[error("Unknown equipment: {0}")]
    UnknownEquipment(String),
}
