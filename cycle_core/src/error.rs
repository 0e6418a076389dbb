//! Error types for the cycle_core library.
//!
//! The prediction engine itself never fails; these errors come from the
//! collaborators around it (history loaders, configuration, table setup).

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for cycle_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
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

    /// A period record broke its invariants or could not be parsed
    #[error("Invalid period record: {0}")]
    InvalidRecord(String),

    /// Milestone table failed validation
    #[error("Milestone table error: {0}")]
    MilestoneTable(String),

    /// Unparseable calendar date
    #[error("Invalid date: {0}")]
    InvalidDate(String),
}
