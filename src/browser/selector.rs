//! Element location strategies.
//!
//! [`By`] names an element the way automation code thinks about it (id, name,
//! link text) and lowers to the locator the wire protocol actually supports
//! (CSS, XPath, or rendered text).
//!
//! # Example
//!
//! ```
//! use ricoh_address_book::By;
//!
//! let by = By::name("entryNameIn");
//! let link = By::link_text("Address Book");
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use crate::protocol::Locator;

// ============================================================================
// By
// ============================================================================

/// An element location strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum By {
    /// CSS selector.
    Css(String),
    /// XPath expression.
    XPath(String),
    /// Element id attribute.
    Id(String),
    /// Element name attribute.
    Name(String),
    /// Tag name.
    Tag(String),
    /// Anchor with exactly this link text.
    LinkText(String),
    /// Anchor whose link text contains this substring.
    PartialLinkText(String),
    /// Element whose rendered text matches.
    Text(String),
}

// ============================================================================
// Constructors
// ============================================================================

impl By {
    /// Locates by CSS selector.
    #[inline]
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Locates by XPath expression.
    #[inline]
    #[must_use]
    pub fn xpath(expression: impl Into<String>) -> Self {
        Self::XPath(expression.into())
    }

    /// Locates by the `id` attribute.
    #[inline]
    #[must_use]
    pub fn id(id: impl Into<String>) -> Self {
        Self::Id(id.into())
    }

    /// Locates by the `name` attribute.
    #[inline]
    #[must_use]
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    /// Locates by tag name.
    #[inline]
    #[must_use]
    pub fn tag(tag: impl Into<String>) -> Self {
        Self::Tag(tag.into())
    }

    /// Locates an anchor by its exact link text.
    #[inline]
    #[must_use]
    pub fn link_text(text: impl Into<String>) -> Self {
        Self::LinkText(text.into())
    }

    /// Locates an anchor whose text contains the given substring.
    #[inline]
    #[must_use]
    pub fn partial_link_text(text: impl Into<String>) -> Self {
        Self::PartialLinkText(text.into())
    }

    /// Locates an element by its rendered text.
    #[inline]
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }
}

// ============================================================================
// Lowering
// ============================================================================

impl By {
    /// Lowers this strategy to a wire locator.
    pub(crate) fn to_locator(&self) -> Locator {
        match self {
            Self::Css(selector) => Locator::Css(selector.clone()),
            Self::XPath(expression) => Locator::XPath(expression.clone()),
            Self::Id(id) => Locator::Css(format!("[id={}]", css_literal(id))),
            Self::Name(name) => Locator::Css(format!("[name={}]", css_literal(name))),
            Self::Tag(tag) => Locator::Css(tag.clone()),
            Self::LinkText(text) => Locator::XPath(format!(
                "//a[normalize-space(.)={}]",
                xpath_literal(text)
            )),
            Self::PartialLinkText(text) => {
                Locator::XPath(format!("//a[contains(., {})]", xpath_literal(text)))
            }
            Self::Text(text) => Locator::InnerText(text.clone()),
        }
    }
}

/// Quotes a string as a CSS attribute value.
fn css_literal(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}

/// Quotes a string as an XPath literal.
///
/// XPath 1.0 has no escape syntax, so strings containing both quote kinds
/// fall back to `concat()`.
fn xpath_literal(value: &str) -> String {
    if !value.contains('\'') {
        format!("'{value}'")
    } else if !value.contains('"') {
        format!("\"{value}\"")
    } else {
        let parts: Vec<String> = value.split('\'').map(|p| format!("'{p}'")).collect();
        format!("concat({})", parts.join(", \"'\", "))
    }
}

// ============================================================================
// Display
// ============================================================================

impl fmt::Display for By {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Css(s) => write!(f, "css={s}"),
            Self::XPath(s) => write!(f, "xpath={s}"),
            Self::Id(s) => write!(f, "id={s}"),
            Self::Name(s) => write!(f, "name={s}"),
            Self::Tag(s) => write!(f, "tag={s}"),
            Self::LinkText(s) => write!(f, "link text={s}"),
            Self::PartialLinkText(s) => write!(f, "partial link text={s}"),
            Self::Text(s) => write!(f, "text={s}"),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_passthrough() {
        assert_eq!(
            By::css("#additional").to_locator(),
            Locator::Css("#additional".to_string())
        );
    }

    #[test]
    fn test_id_lowers_to_attribute_selector() {
        assert_eq!(
            By::id("okButton").to_locator(),
            Locator::Css("[id='okButton']".to_string())
        );
    }

    #[test]
    fn test_name_lowers_to_attribute_selector() {
        assert_eq!(
            By::name("entryNameIn").to_locator(),
            Locator::Css("[name='entryNameIn']".to_string())
        );
    }

    #[test]
    fn test_tag_lowers_to_css() {
        assert_eq!(By::tag("frame").to_locator(), Locator::Css("frame".to_string()));
    }

    #[test]
    fn test_link_text_lowers_to_xpath() {
        assert_eq!(
            By::link_text("Address Book").to_locator(),
            Locator::XPath("//a[normalize-space(.)='Address Book']".to_string())
        );
    }

    #[test]
    fn test_partial_link_text_lowers_to_xpath() {
        assert_eq!(
            By::partial_link_text("Change").to_locator(),
            Locator::XPath("//a[contains(., 'Change')]".to_string())
        );
    }

    #[test]
    fn test_text_lowers_to_inner_text() {
        assert_eq!(
            By::text("Manual Input").to_locator(),
            Locator::InnerText("Manual Input".to_string())
        );
    }

    #[test]
    fn test_xpath_literal_with_apostrophe() {
        assert_eq!(xpath_literal("O'Brien"), "\"O'Brien\"");
    }

    #[test]
    fn test_xpath_literal_with_both_quotes() {
        assert_eq!(
            xpath_literal("a'b\"c"),
            "concat('a', \"'\", 'b\"c')"
        );
    }

    #[test]
    fn test_display_for_errors() {
        assert_eq!(By::name("entryindex").to_string(), "name=entryindex");
    }
}
