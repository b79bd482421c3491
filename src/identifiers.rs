//! Type-safe identifiers.
//!
//! Newtype wrappers prevent mixing incompatible ids at compile time:
//! an address book slot is not a BiDi command id, and neither is a
//! browsing context.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// ============================================================================
// UserId
// ============================================================================

/// Smallest slot number the device accepts.
pub const MIN_USER_ID: u32 = 1;

/// Largest slot number the device accepts.
pub const MAX_USER_ID: u32 = 50_000;

/// An address book slot number in the range 1-50000.
///
/// The device addresses entries by a five-digit, zero-padded decimal
/// string; [`UserId::padded`] produces that external form.
///
/// ```
/// use ricoh_address_book::UserId;
///
/// let id = UserId::new(1)?;
/// assert_eq!(id.padded(), "00001");
/// # Ok::<(), ricoh_address_book::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(u32);

impl UserId {
    /// Creates a user id, rejecting values outside 1-50000.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUserId`] for 0 or anything above 50000.
    /// Passing such a value is a caller bug; there is no recovery path.
    pub fn new(value: u32) -> Result<Self> {
        if (MIN_USER_ID..=MAX_USER_ID).contains(&value) {
            Ok(Self(value))
        } else {
            Err(Error::invalid_user_id(value))
        }
    }

    /// Returns the raw slot number.
    #[inline]
    #[must_use]
    pub fn get(self) -> u32 {
        self.0
    }

    /// Renders the id as the device's fixed-width five-digit form.
    #[inline]
    #[must_use]
    pub fn padded(self) -> String {
        format!("{:05}", self.0)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:05}", self.0)
    }
}

impl TryFrom<u32> for UserId {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self> {
        Self::new(value)
    }
}

// ============================================================================
// CommandId
// ============================================================================

/// A BiDi command id used for request/response correlation.
///
/// Ids are assigned from a process-wide monotonically increasing
/// counter, matching the numeric `id` field of the wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommandId(u64);

/// Next command id to hand out. Starts at 1; 0 is never used.
static NEXT_COMMAND_ID: AtomicU64 = AtomicU64::new(1);

impl CommandId {
    /// Returns the next unused command id.
    #[inline]
    #[must_use]
    pub fn next() -> Self {
        Self(NEXT_COMMAND_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw id value.
    #[inline]
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for CommandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// ============================================================================
// BrowsingContextId
// ============================================================================

/// A BiDi browsing context id (a tab or frame).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BrowsingContextId(String);

impl BrowsingContextId {
    /// Creates a browsing context id from its wire representation.
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BrowsingContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// NodeId
// ============================================================================

/// A BiDi shared node id referencing a DOM element.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Creates a node id from its wire representation.
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_lower_bound() {
        let id = UserId::new(1).expect("1 is valid");
        assert_eq!(id.padded(), "00001");
        assert_eq!(id.get(), 1);
    }

    #[test]
    fn test_user_id_upper_bound() {
        let id = UserId::new(50_000).expect("50000 is valid");
        assert_eq!(id.padded(), "50000");
    }

    #[test]
    fn test_user_id_rejects_zero() {
        let err = UserId::new(0).unwrap_err();
        assert!(err.is_precondition());
    }

    #[test]
    fn test_user_id_rejects_over_max() {
        let err = UserId::new(50_001).unwrap_err();
        assert!(err.is_precondition());
    }

    #[test]
    fn test_user_id_padding_width() {
        for value in [1, 9, 10, 99, 100, 999, 1000, 9999, 10_000, 50_000] {
            let id = UserId::new(value).expect("in range");
            assert_eq!(id.padded().len(), 5, "value {value}");
        }
    }

    #[test]
    fn test_user_id_display_matches_padded() {
        let id = UserId::new(42).expect("in range");
        assert_eq!(id.to_string(), id.padded());
    }

    #[test]
    fn test_user_id_try_from() {
        assert!(UserId::try_from(123).is_ok());
        assert!(UserId::try_from(0).is_err());
    }

    #[test]
    fn test_command_ids_are_unique_and_increasing() {
        let a = CommandId::next();
        let b = CommandId::next();
        assert!(b.get() > a.get());
    }

    #[test]
    fn test_context_id_roundtrip() {
        let id = BrowsingContextId::new("ctx-1");
        assert_eq!(id.as_str(), "ctx-1");
        assert_eq!(id.to_string(), "ctx-1");
    }

    #[test]
    fn test_node_id_serde_transparent() {
        let id = NodeId::new("abc");
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, "\"abc\"");
    }
}
