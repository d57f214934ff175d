//! Signature request and response bodies

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Error;

/// Confirmation returned by the service for an accepted signature
pub const DEFAULT_SUCCESS_MESSAGE: &str = "Document signed successfully";

/// Signature request
///
/// Body of `POST /api/sign`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureRequest {
    /// Display name of the signer
    pub name: String,
    /// Shared secret confirming the signature
    pub pin: String,
}

impl fmt::Debug for SignatureRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignatureRequest")
            .field("name", &self.name)
            .field("pin", &"<redacted>")
            .finish()
    }
}

impl SignatureRequest {
    /// Create new [`SignatureRequest`]
    pub fn new<N, P>(name: N, pin: P) -> Self
    where
        N: Into<String>,
        P: Into<String>,
    {
        Self {
            name: name.into(),
            pin: pin.into(),
        }
    }

    /// Check that neither field is empty or whitespace only
    pub fn validate(&self) -> Result<(), Error> {
        if self.name.trim().is_empty() {
            return Err(Error::validation("Name is required"));
        }

        if self.pin.trim().is_empty() {
            return Err(Error::validation("PIN is required"));
        }

        Ok(())
    }

    /// Parse a request from an untrusted JSON value
    ///
    /// Unlike plain deserialization this reports which field is missing or
    /// has the wrong type, and rejects whitespace-only values.
    pub fn from_value(value: Value) -> Result<Self, Error> {
        let object = value
            .as_object()
            .ok_or_else(|| Error::validation("Request body must be a JSON object"))?;

        let name = required_string(object.get("name"), "Name")?;
        let pin = required_string(object.get("pin"), "PIN")?;

        let request = Self::new(name, pin);
        request.validate()?;

        Ok(request)
    }
}

fn required_string(value: Option<&Value>, field: &str) -> Result<String, Error> {
    match value {
        None | Some(Value::Null) => Err(Error::validation(format!("{field} is required"))),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(Error::validation(format!("{field} must be a string"))),
    }
}

/// Sign response
///
/// Body of a successful `POST /api/sign`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignResponse {
    /// Confirmation message
    pub message: String,
}

/// Status response
///
/// Body of `GET /api/status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Always `ok` when the service answers
    pub status: String,
}

impl Default for StatusResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

/// Outcome of a signature submission as seen by the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureResult {
    /// Whether the service accepted the signature
    pub success: bool,
    /// Server message, or an error text to show the user
    pub message: String,
}

impl SignatureResult {
    /// Accepted signature
    pub fn signed<S>(message: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            success: true,
            message: message.into(),
        }
    }

    /// Rejected or failed signature
    pub fn failed<S>(message: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_from_value_accepts_complete_request() {
        let request =
            SignatureRequest::from_value(json!({"name": "Alice", "pin": "1337"})).expect("valid");
        assert_eq!(request, SignatureRequest::new("Alice", "1337"));
    }

    #[test]
    fn test_from_value_keeps_surrounding_whitespace() {
        let request = SignatureRequest::from_value(json!({"name": " Alice ", "pin": "1337"}))
            .expect("valid");
        assert_eq!(request.name, " Alice ");
    }

    #[test]
    fn test_from_value_rejects_missing_fields() {
        let err = SignatureRequest::from_value(json!({"pin": "1337"})).expect_err("rejected");
        assert_eq!(err.to_string(), "Name is required");

        let err = SignatureRequest::from_value(json!({"name": "Alice", "pin": null}))
            .expect_err("rejected");
        assert_eq!(err.to_string(), "PIN is required");
    }

    #[test]
    fn test_from_value_rejects_non_strings() {
        let err = SignatureRequest::from_value(json!({"name": 42, "pin": "1337"}))
            .expect_err("rejected");
        assert_eq!(err.to_string(), "Name must be a string");

        let err = SignatureRequest::from_value(json!({"name": "Alice", "pin": 1337}))
            .expect_err("rejected");
        assert_eq!(err.to_string(), "PIN must be a string");
    }

    #[test]
    fn test_from_value_rejects_whitespace() {
        let err = SignatureRequest::from_value(json!({"name": "   ", "pin": "1337"}))
            .expect_err("rejected");
        assert!(matches!(err, Error::Validation(_)));

        let err = SignatureRequest::from_value(json!({"name": "Bob", "pin": "\t"}))
            .expect_err("rejected");
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_from_value_rejects_non_object() {
        let err = SignatureRequest::from_value(json!(["Alice", "1337"])).expect_err("rejected");
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_debug_redacts_pin() {
        let debug = format!("{:?}", SignatureRequest::new("Alice", "1337"));
        assert!(debug.contains("Alice"));
        assert!(!debug.contains("1337"));
    }

    #[test]
    fn test_request_wire_format() {
        let json = serde_json::to_value(SignatureRequest::new("Alice", "1337")).expect("json");
        assert_eq!(json, json!({"name": "Alice", "pin": "1337"}));
    }
}
