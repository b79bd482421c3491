//! Address book entry data.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use crate::error::{Error, Result};
use crate::tag::TagBucket;

// ============================================================================
// Entry
// ============================================================================

/// An address book entry: a display name and a scan-to-email address.
///
/// The name must be non-empty; the email is carried verbatim, the
/// device does its own validation.
///
/// ```
/// use ricoh_address_book::Entry;
///
/// let entry = Entry::new("John Doe", "john.doe@example.com")?;
/// assert_eq!(entry.tag().map(|t| t.label()), Some("IJK"));
/// # Ok::<(), ricoh_address_book::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    name: String,
    email: String,
}

impl Entry {
    /// Creates an entry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyName`] if the display name is empty.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::EmptyName);
        }

        Ok(Self {
            name,
            email: email.into(),
        })
    }

    /// Returns the display name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the email address.
    #[inline]
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the tag bucket this entry files under, if any.
    ///
    /// `None` means the entry gets no tag on the device.
    #[inline]
    #[must_use]
    pub fn tag(&self) -> Option<TagBucket> {
        TagBucket::for_name(&self.name)
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_accessors() {
        let entry = Entry::new("John Doe", "john.doe@example.com").expect("valid");
        assert_eq!(entry.name(), "John Doe");
        assert_eq!(entry.email(), "john.doe@example.com");
    }

    #[test]
    fn test_empty_name_rejected() {
        let err = Entry::new("", "x@example.com").unwrap_err();
        assert!(matches!(err, Error::EmptyName));
    }

    #[test]
    fn test_email_is_not_validated() {
        // The device owns email validation; anything non-empty or empty passes.
        assert!(Entry::new("Kari", "not-an-email").is_ok());
        assert!(Entry::new("Kari", "").is_ok());
    }

    #[test]
    fn test_tag_follows_name() {
        let entry = Entry::new("Åse Berg", "aase@example.com").expect("valid");
        assert_eq!(entry.tag(), Some(TagBucket::Ab));

        let untagged = Entry::new("4H Club", "post@example.com").expect("valid");
        assert_eq!(untagged.tag(), None);
    }

    #[test]
    fn test_display() {
        let entry = Entry::new("Kari Nordmann", "kari@example.com").expect("valid");
        assert_eq!(entry.to_string(), "Kari Nordmann <kari@example.com>");
    }
}
