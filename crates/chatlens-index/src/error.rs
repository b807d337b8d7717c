use thiserror::Error;

/// Result type for chatlens-index operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the index layer
#[derive(Debug, Error)]
pub enum Error {
    /// Database operation failed
    #[error("{}", describe_database_error(.0))]
    Database(#[from] rusqlite::Error),

    /// IO operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored record JSON could not be encoded or decoded
    #[error("Record encoding error: {0}")]
    Encoding(#[from] serde_json::Error),

    /// A row with the same primary key already exists
    #[error("{kind} '{id}' already exists")]
    Duplicate { kind: &'static str, id: String },

    /// Query-specific error (invalid input, not found, etc.)
    #[error("Query error: {0}")]
    Query(String),
}

fn describe_database_error(err: &rusqlite::Error) -> String {
    let msg = err.to_string();
    // Stale schemas surface as missing tables/columns
    if msg.contains("no such column") || msg.contains("no such table") {
        format!(
            "Database schema mismatch: {}. Please restart the CLI to auto-migrate.",
            msg
        )
    } else {
        format!("Database error: {}", msg)
    }
}

pub(crate) fn is_constraint_violation(err: &rusqlite::Error) -> bool {
    err.sqlite_error_code() == Some(rusqlite::ErrorCode::ConstraintViolation)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_mismatch_error_message() {
        let sqlite_err = rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(1),
            Some("no such column: record_json".to_string()),
        );
        let msg = Error::Database(sqlite_err).to_string();

        assert!(msg.contains("Database schema mismatch"));
        assert!(msg.contains("Please restart the CLI to auto-migrate"));
    }

    #[test]
    fn test_regular_database_error_message() {
        let sqlite_err = rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(1),
            Some("disk I/O error".to_string()),
        );
        let msg = Error::Database(sqlite_err).to_string();

        assert!(msg.starts_with("Database error:"));
        assert!(!msg.contains("restart"));
    }

    #[test]
    fn test_duplicate_message() {
        let err = Error::Duplicate {
            kind: "session",
            id: "c1".to_string(),
        };
        assert_eq!(err.to_string(), "session 'c1' already exists");
    }
}
