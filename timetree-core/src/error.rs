//! Error types for timetree-core.

use thiserror::Error;

/// Errors that can occur while normalizing or exporting TimeTree events.
///
/// Missing or unparseable optional fields are never errors; they surface as
/// absent fields in the exported record.
#[derive(Error, Debug)]
pub enum TimeTreeError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for timetree-core operations.
pub type TimeTreeResult<T> = Result<T, TimeTreeError>;
