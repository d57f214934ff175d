//! Errors

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Message shown when the service fails in a way the caller should not see details of
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Message sent in place of file-system details when the document cannot be served
pub const DOCUMENT_ERROR_MESSAGE: &str = "Failed to load document";

/// Message sent when the PIN does not match
pub const INVALID_PIN_MESSAGE: &str = "Invalid PIN";

/// DocSign Error
#[derive(Debug, Error)]
pub enum Error {
    /// Missing or empty field, or a rejected input file
    #[error("{0}")]
    Validation(String),
    /// Rejected credentials, carrying the text to show the user
    #[error("{0}")]
    Auth(String),
    /// Transport failure before a response was received
    #[error("Network error: {0}")]
    Network(String),
    /// Non-success response not covered by another variant
    #[error("Server error ({status}): {message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Message returned by the server
        message: String,
    },
    /// Document could not be read
    #[error("Document unavailable: {0}")]
    Document(String),
    /// Uncaught failure inside a handler
    #[error("Internal server error")]
    Internal,
    /// Serde Json error
    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),
}

impl Error {
    /// Build a [`Error::Validation`]
    pub fn validation<S>(message: S) -> Self
    where
        S: Into<String>,
    {
        Self::Validation(message.into())
    }

    /// PIN does not match the configured secret
    pub fn invalid_pin() -> Self {
        Self::Auth(INVALID_PIN_MESSAGE.to_string())
    }
}

/// DocSign Error Response
///
/// Body of every non-success response of the signing service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human readable text
    pub error: String,
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl ErrorResponse {
    /// Create new [`ErrorResponse`]
    pub fn new<S>(error: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            error: error.into(),
        }
    }

    /// Error response from json
    ///
    /// Bodies that are not JSON at all are kept verbatim as the error text.
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Value>(json) {
            Ok(value) => Self::from_value(value),
            Err(_) => Self::new(json.trim()),
        }
    }

    /// Error response from json Value
    pub fn from_value(value: Value) -> Self {
        match serde_json::from_value::<ErrorResponse>(value.clone()) {
            Ok(res) => res,
            Err(_) => Self {
                error: value.to_string(),
            },
        }
    }
}

impl From<Error> for ErrorResponse {
    fn from(err: Error) -> ErrorResponse {
        match err {
            Error::Validation(message) | Error::Auth(message) => ErrorResponse::new(message),
            Error::Server { message, .. } => ErrorResponse::new(message),
            Error::Document(_) => ErrorResponse::new(DOCUMENT_ERROR_MESSAGE),
            Error::Internal => ErrorResponse::new(INTERNAL_ERROR_MESSAGE),
            _ => ErrorResponse::new(err.to_string()),
        }
    }
}
