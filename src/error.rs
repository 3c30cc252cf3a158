use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the library
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    #[error("Directory walk error: {0}")]
    Walk(#[from] jwalk::Error),

    #[error("CSV header is missing required column: {0}")]
    MissingColumn(String),

    #[error("Record {index} is missing required field: {field}")]
    MissingField { field: String, index: usize },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to read shard {}: {source}", .path.display())]
    Shard {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },
}
