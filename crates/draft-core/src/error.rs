//! Error types for draft-core
//!
//! Only I/O, decoding and caller contract violations end up here. Anything
//! wrong with the *contents* of a draft board is recovered inside the
//! pipeline and shows up as fewer picks in the report instead.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in draft-core
#[derive(Debug, Error)]
pub enum Error {
    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV error from the csv crate
    #[error("CSV error in '{path}': {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Grid payload could not be decoded into cells
    #[error("failed to decode grid '{source_name}': {message}")]
    GridParse { source_name: String, message: String },

    /// Unsupported sheet file extension
    #[error("unsupported sheet format '{0}' (expected csv or json)")]
    UnsupportedFormat(String),

    /// The sequencer was handed fewer teams than the picks reference
    #[error("team count {team_count} cannot cover {teams} drafting teams")]
    InvalidTeamCount { team_count: usize, teams: usize },

    /// Configuration bounds are inconsistent
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Directory traversal error
    #[error("failed to traverse directory: {0}")]
    WalkDir(#[from] walkdir::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
