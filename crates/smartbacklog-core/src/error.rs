//! Core error types for smartbacklog-core.
//!
//! Every operation that can fail returns [`CoreError`], which tells the caller
//! exactly which precondition failed so a precise message can be shown.

use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

use crate::task::TaskId;

/// Core error type for smartbacklog-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Malformed difficulty, size, date or subject
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] ValidationError),

    /// Backlog amount outside `1..=max`
    #[error("Invalid amount: total units must be between 1 and {max}, got {total_units}")]
    InvalidAmount { total_units: u32, max: u32 },

    /// Deadline not strictly after today
    #[error("Invalid deadline: {deadline} must be after {today}")]
    InvalidDeadline { deadline: NaiveDate, today: NaiveDate },

    /// No task with this id is visible to the caller
    #[error("Task not found: {0}")]
    TaskNotFound(TaskId),

    /// Operation requires administrative visibility
    #[error("Operation requires the admin role")]
    Forbidden,

    /// Task store failure, surfaced unchanged
    #[error("Store failure: {0}")]
    Store(#[from] StoreError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// Whether repeating the same call may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, CoreError::Store(err) if err.is_retryable())
    }
}

/// Task store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Migration failed
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Database is locked
    #[error("Database is locked")]
    Locked,

    /// A batch insert stopped part way and was rolled back
    #[error("Batch write interrupted after {written} of {expected} tasks")]
    PartialWrite { written: usize, expected: usize },

    /// Store lock poisoned by a panicking writer
    #[error("Store lock poisoned")]
    Poisoned,

    /// A persisted row could not be decoded
    #[error("Corrupt row for task {id}: {message}")]
    CorruptRow { id: TaskId, message: String },
}

impl StoreError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::Locked | StoreError::PartialWrite { .. })
    }
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the configuration
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// Home directory could not be determined
    #[error("Cannot determine data directory")]
    NoDataDir,
}

/// Validation errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// Difficulty outside 1..=10
    #[error("difficulty must be between 1 and 10, got {0}")]
    DifficultyOutOfRange(i64),

    /// Blank subject
    #[error("subject must not be empty")]
    EmptySubject,

    /// Task size of zero units
    #[error("size must be at least 1 unit")]
    ZeroSize,

    /// Invalid value
    #[error("invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl ValidationError {
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationError::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(failure, _msg) => {
                if failure.code == rusqlite::ErrorCode::DatabaseBusy
                    || failure.code == rusqlite::ErrorCode::DatabaseLocked
                {
                    StoreError::Locked
                } else {
                    StoreError::QueryFailed(err.to_string())
                }
            }
            _ => StoreError::QueryFailed(err.to_string()),
        }
    }
}

impl From<rusqlite::Error> for CoreError {
    fn from(err: rusqlite::Error) -> Self {
        CoreError::Store(err.into())
    }
}

impl<T> From<std::sync::PoisonError<T>> for StoreError {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        StoreError::Poisoned
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
