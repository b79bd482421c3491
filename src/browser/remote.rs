//! Helpers for interpreting remote values in command results.
//!
//! Script calls return an envelope (`type`: `success` or `exception`) around
//! a remote value (`{"type": "string", "value": ...}`), and node location
//! returns a list of node remote values. These helpers unpack both shapes.

// ============================================================================
// Imports
// ============================================================================

use serde_json::Value;

use crate::error::{Error, Result};
use crate::identifiers::NodeId;

// ============================================================================
// Script results
// ============================================================================

/// Unpacks a `script.evaluate` / `script.callFunction` result envelope.
///
/// Returns the remote value on success and maps thrown exceptions to
/// [`Error::ScriptError`].
pub(crate) fn unpack_script_result(result: Value) -> Result<Value> {
    match result.get("type").and_then(Value::as_str) {
        Some("success") => Ok(result.get("result").cloned().unwrap_or(Value::Null)),
        Some("exception") => {
            let text = result
                .pointer("/exceptionDetails/text")
                .and_then(Value::as_str)
                .unwrap_or("script threw an exception");
            Err(Error::script_error(text))
        }
        _ => Err(Error::protocol("Unexpected script result shape")),
    }
}

/// Extracts a string from a remote value, treating null/undefined as absent.
pub(crate) fn remote_string(remote: &Value) -> Option<String> {
    match remote.get("type").and_then(Value::as_str) {
        Some("string") => remote
            .get("value")
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    }
}

/// Extracts a boolean from a remote value.
pub(crate) fn remote_bool(remote: &Value) -> Option<bool> {
    match remote.get("type").and_then(Value::as_str) {
        Some("boolean") => remote.get("value").and_then(Value::as_bool),
        _ => None,
    }
}

// ============================================================================
// Node results
// ============================================================================

/// Extracts the shared ids from a `browsingContext.locateNodes` result.
pub(crate) fn node_ids_from_result(result: &Value) -> Vec<NodeId> {
    result
        .get("nodes")
        .and_then(Value::as_array)
        .map(|nodes| {
            nodes
                .iter()
                .filter_map(|node| node.get("sharedId").and_then(Value::as_str))
                .map(NodeId::new)
                .collect()
        })
        .unwrap_or_default()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unpack_success() {
        let result = json!({"type": "success", "result": {"type": "string", "value": "hi"}});
        let remote = unpack_script_result(result).unwrap();
        assert_eq!(remote_string(&remote), Some("hi".to_string()));
    }

    #[test]
    fn test_unpack_exception() {
        let result = json!({
            "type": "exception",
            "exceptionDetails": {"text": "ReferenceError: x is not defined"}
        });
        let err = unpack_script_result(result).unwrap_err();
        assert!(err.to_string().contains("ReferenceError"));
    }

    #[test]
    fn test_remote_string_null_is_none() {
        assert_eq!(remote_string(&json!({"type": "null"})), None);
    }

    #[test]
    fn test_remote_bool() {
        assert_eq!(remote_bool(&json!({"type": "boolean", "value": true})), Some(true));
        assert_eq!(remote_bool(&json!({"type": "string", "value": "true"})), None);
    }

    #[test]
    fn test_node_ids_from_result() {
        let result = json!({
            "nodes": [
                {"type": "node", "sharedId": "node-1"},
                {"type": "node", "sharedId": "node-2"}
            ]
        });
        let ids = node_ids_from_result(&result);
        assert_eq!(ids.len(), 2);
        assert_eq!(ids[0].as_str(), "node-1");
    }

    #[test]
    fn test_node_ids_empty_when_missing() {
        assert!(node_ids_from_result(&json!({})).is_empty());
    }
}
