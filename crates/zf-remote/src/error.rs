//! Remote record service error types.

use thiserror::Error;

/// Errors that can occur when talking to the record service.
///
/// `Clone` so a failed mutation can hand its cause back to the caller after
/// the store has already logged it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    /// The service could not be reached or the request did not complete.
    #[error("connection error: {0}")]
    Connection(String),

    /// The service answered with a non-success status.
    #[error("query failed ({status}): {message}")]
    Query {
        /// HTTP status code returned by the service.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// The service rejected an insert payload.
    #[error("validation failed ({status}): {message}")]
    Validation {
        /// HTTP status code returned by the service.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// No record with the given id exists in the collection.
    #[error("record not found: {id}")]
    NotFound {
        /// Id that matched no record.
        id: String,
    },

    /// The response body could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for RemoteError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::Parse(e.to_string())
        } else {
            Self::Connection(e.to_string())
        }
    }
}

impl From<serde_json::Error> for RemoteError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e.to_string())
    }
}
