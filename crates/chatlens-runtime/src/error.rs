use thiserror::Error;

/// Result type for chatlens-runtime operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the runtime layer
#[derive(Debug, Error)]
pub enum Error {
    /// Database/index layer error
    #[error("Index error: {0}")]
    Index(#[from] chatlens_index::Error),

    /// Analysis engine error raised outside a batch item
    #[error("Analysis error: {0}")]
    Engine(#[from] chatlens_engine::Error),

    /// IO operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Input could not be read as JSON
    #[error("Invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV writer failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid operation or state
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}
