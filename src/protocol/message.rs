//! Request, response and event message types.
//!
//! Defines the wire envelope exchanged with the BiDi remote end.

// ============================================================================
// Imports
// ============================================================================

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::identifiers::CommandId;

use super::Command;

// ============================================================================
// Request
// ============================================================================

/// A command request from the local end to the remote end.
///
/// # Format
///
/// ```json
/// {
///   "id": 7,
///   "method": "module.methodName",
///   "params": { ... }
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct Request {
    /// Numeric identifier for request/response correlation.
    pub id: CommandId,

    /// Command with method and params.
    #[serde(flatten)]
    pub command: Command,
}

impl Request {
    /// Creates a new request with an auto-assigned id.
    #[inline]
    #[must_use]
    pub fn new(command: Command) -> Self {
        Self {
            id: CommandId::next(),
            command,
        }
    }
}

// ============================================================================
// Response
// ============================================================================

/// A command response from the remote end.
///
/// # Format
///
/// Success:
/// ```json
/// { "type": "success", "id": 7, "result": { ... } }
/// ```
///
/// Error:
/// ```json
/// { "type": "error", "id": 7, "error": "no such node", "message": "..." }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Response {
    /// Matches the command `id`.
    pub id: CommandId,

    /// Response type discriminator.
    #[serde(rename = "type")]
    pub response_type: ResponseType,

    /// Result data (if success).
    #[serde(default)]
    pub result: Option<Value>,

    /// Error code (if error).
    #[serde(default)]
    pub error: Option<String>,

    /// Error message (if error).
    #[serde(default)]
    pub message: Option<String>,
}

impl Response {
    /// Returns `true` if this is a success response.
    #[inline]
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.response_type == ResponseType::Success
    }

    /// Returns `true` if this is an error response.
    #[inline]
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.response_type == ResponseType::Error
    }

    /// Extracts the result value, converting an error response into
    /// [`Error::WebDriver`].
    pub fn into_result(self) -> Result<Value> {
        match self.response_type {
            ResponseType::Success => Ok(self.result.unwrap_or(Value::Null)),
            ResponseType::Error => {
                let code = self.error.unwrap_or_else(|| "unknown error".to_string());
                let message = self.message.unwrap_or_else(|| code.clone());
                Err(Error::webdriver(code, message))
            }
        }
    }
}

// ============================================================================
// ResponseType
// ============================================================================

/// Response type discriminator.
///
/// Messages with `"type": "event"` do not deserialize as [`Response`]
/// and are routed to [`Event`] parsing instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseType {
    /// Successful response.
    Success,
    /// Error response.
    Error,
}

// ============================================================================
// Event
// ============================================================================

/// An unsolicited event from the remote end.
///
/// This crate does not subscribe to any event channel; events that
/// arrive anyway (browser-initiated notifications) are traced and
/// dropped by the transport.
#[derive(Debug, Clone, Deserialize)]
pub struct Event {
    /// Event method, e.g. `browsingContext.load`.
    pub method: String,

    /// Event payload.
    #[serde(default)]
    pub params: Value,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifiers::BrowsingContextId;
    use crate::protocol::{BrowsingContextCommand, Readiness};

    #[test]
    fn test_request_serialization() {
        let command = Command::BrowsingContext(BrowsingContextCommand::Navigate {
            context: BrowsingContextId::new("ctx-1"),
            url: "http://printer.example.com/".to_string(),
            wait: Readiness::Complete,
        });

        let request = Request::new(command);
        let json = serde_json::to_value(&request).expect("serialize");

        assert_eq!(json["method"], "browsingContext.navigate");
        assert!(json["id"].is_u64());
        assert_eq!(json["params"]["url"], "http://printer.example.com/");
    }

    #[test]
    fn test_success_response() {
        let json_str = r#"{
            "type": "success",
            "id": 3,
            "result": {"contexts": []}
        }"#;

        let response: Response = serde_json::from_str(json_str).expect("parse");
        assert!(response.is_success());
        assert!(!response.is_error());

        let result = response.into_result().expect("success");
        assert!(result["contexts"].is_array());
    }

    #[test]
    fn test_error_response() {
        let json_str = r#"{
            "type": "error",
            "id": 4,
            "error": "no such node",
            "message": "node gone"
        }"#;

        let response: Response = serde_json::from_str(json_str).expect("parse");
        assert!(response.is_error());

        let err = response.into_result().unwrap_err();
        assert!(matches!(err, Error::WebDriver { .. }));
        assert!(err.to_string().contains("no such node"));
    }

    #[test]
    fn test_event_does_not_parse_as_response() {
        let json_str = r#"{
            "type": "event",
            "method": "browsingContext.load",
            "params": {"context": "ctx-1"}
        }"#;

        assert!(serde_json::from_str::<Response>(json_str).is_err());

        let event: Event = serde_json::from_str(json_str).expect("parse event");
        assert_eq!(event.method, "browsingContext.load");
        assert_eq!(event.params["context"], "ctx-1");
    }
}
