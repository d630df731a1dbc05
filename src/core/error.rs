//! Error types and handling for the Shareloop marketplace core
//!
//! The taxonomy is deliberately small: a request either referenced an
//! entity that is not in the store, sent input that failed validation,
//! or tripped over something the caller cannot fix. The HTTP status
//! mapping for these lives in the API layer.

use thiserror::Error;

/// Main result type used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the Shareloop marketplace core
#[derive(Error, Debug)]
pub enum Error {
    /// Requested entity is absent from the store
    #[error("{0} not found")]
    NotFound(String),

    /// Input failed schema validation or a store invariant
    #[error("{0}")]
    Validation(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal system errors
    #[error("Internal error: {0}")]
    Internal(String),

    /// I/O errors from std
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Prometheus metrics errors
    #[error("Metrics error: {0}")]
    Metrics(#[from] prometheus::Error),
}

impl Error {
    /// Create a not found error; `entity` is the display name, e.g. "Item"
    pub fn not_found(entity: impl Into<String>) -> Self {
        Self::NotFound(entity.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Check if this is a client error (4xx equivalent)
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::NotFound(_) | Error::Validation(_))
    }

    /// Check if this is a server error (5xx equivalent)
    pub fn is_server_error(&self) -> bool {
        !self.is_client_error()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_reads_like_the_wire_message() {
        // Goal: the Display output is exactly what the API returns in `message`
        assert_eq!(Error::not_found("Item").to_string(), "Item not found");
        assert_eq!(
            Error::validation("missing required field 'title'").to_string(),
            "missing required field 'title'"
        );
    }

    #[test]
    fn classification_splits_client_and_server_errors() {
        // Goal: 4xx-equivalent variants never report as server errors
        assert!(Error::not_found("User").is_client_error());
        assert!(Error::validation("bad").is_client_error());
        assert!(Error::config("bad port").is_server_error());
        assert!(Error::internal("boom").is_server_error());
        assert!(!Error::internal("boom").is_client_error());
    }
}
