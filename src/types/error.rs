use thiserror::Error;

/// roadbook error types
#[derive(Error, Debug)]
pub enum RoadbookError {
    /// Database could not be opened or the aggregation query failed
    #[error("data unavailable: {0}")]
    DataUnavailable(String),

    /// Tracing subscriber could not be installed
    #[error("logging setup failed: {0}")]
    Logging(String),

    /// File I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<rusqlite::Error> for RoadbookError {
    fn from(err: rusqlite::Error) -> Self {
        Self::DataUnavailable(err.to_string())
    }
}

/// Result type alias for roadbook
pub type Result<T> = std::result::Result<T, RoadbookError>;
