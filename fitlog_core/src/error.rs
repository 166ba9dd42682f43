//! Error types for the fitlog_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for fitlog_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// CSV error (reading reference tables or writing exports)
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Workout type has no calorie-burn rate (strict lookups only)
    #[error("Information not found for workout type {0:?}")]
    UnknownWorkout(String),

    /// Food item has no nutrition profile (strict lookups only)
    #[error("Information not found in food data for {0:?}")]
    UnknownFood(String),

    /// Date could not be parsed
    #[error("Invalid date {0:?}: expected DD-MM-YYYY")]
    Date(String),

    /// Chart rendering error
    #[error("Chart error: {0}")]
    Chart(String),
}
