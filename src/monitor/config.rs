//! Connection settings for a Web Image Monitor instance.
//!
//! # Example
//!
//! ```
//! use ricoh_address_book::MonitorConfig;
//!
//! # fn example() -> ricoh_address_book::Result<()> {
//! let config = MonitorConfig::new("http://printer.example.com")?
//!     .with_username("admin")
//!     .with_password("secret");
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::time::Duration;

use url::Url;

use crate::error::{Error, Result};

// ============================================================================
// Constants
// ============================================================================

/// Default administrator username on Aficio-class devices.
const DEFAULT_USERNAME: &str = "admin";

/// Default wait budget for page conditions.
const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default wait budget for the initial address book load.
///
/// The first load walks the device's entire entry list and is much slower
/// than the AJAX refreshes that follow.
const DEFAULT_LOAD_TIMEOUT: Duration = Duration::from_secs(30);

// ============================================================================
// MonitorConfig
// ============================================================================

/// Settings for connecting to a device's Web Image Monitor.
///
/// Devices ship with user `admin` and an empty password; both can be
/// overridden.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorConfig {
    /// Base URL of the device web UI.
    url: Url,
    /// Login username.
    username: String,
    /// Login password.
    password: String,
    /// Wait budget for page conditions.
    wait_timeout: Duration,
    /// Wait budget for the initial address book load.
    load_timeout: Duration,
}

// ============================================================================
// Constructors and Builders
// ============================================================================

impl MonitorConfig {
    /// Creates a configuration for the device at `url` with default
    /// credentials.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the URL does not parse.
    pub fn new(url: impl AsRef<str>) -> Result<Self> {
        let url = Url::parse(url.as_ref())
            .map_err(|e| Error::config(format!("Invalid device URL: {e}")))?;

        Ok(Self {
            url,
            username: DEFAULT_USERNAME.to_string(),
            password: String::new(),
            wait_timeout: DEFAULT_WAIT_TIMEOUT,
            load_timeout: DEFAULT_LOAD_TIMEOUT,
        })
    }

    /// Sets the login username.
    #[inline]
    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    /// Sets the login password.
    #[inline]
    #[must_use]
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }

    /// Sets the wait budget for page conditions.
    #[inline]
    #[must_use]
    pub fn with_wait_timeout(mut self, timeout: Duration) -> Self {
        self.wait_timeout = timeout;
        self
    }

    /// Sets the wait budget for the initial address book load.
    #[inline]
    #[must_use]
    pub fn with_load_timeout(mut self, timeout: Duration) -> Self {
        self.load_timeout = timeout;
        self
    }
}

// ============================================================================
// Accessors
// ============================================================================

impl MonitorConfig {
    /// Returns the device URL.
    #[inline]
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Returns the login username.
    #[inline]
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the login password.
    #[inline]
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Returns the wait budget for page conditions.
    #[inline]
    #[must_use]
    pub const fn wait_timeout(&self) -> Duration {
        self.wait_timeout
    }

    /// Returns the wait budget for the initial address book load.
    #[inline]
    #[must_use]
    pub const fn load_timeout(&self) -> Duration {
        self.load_timeout
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MonitorConfig::new("http://printer.example.com").unwrap();
        assert_eq!(config.username(), "admin");
        assert_eq!(config.password(), "");
        assert_eq!(config.wait_timeout(), Duration::from_secs(10));
        assert_eq!(config.load_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_builder_overrides() {
        let config = MonitorConfig::new("http://printer.example.com")
            .unwrap()
            .with_username("supervisor")
            .with_password("hunter2")
            .with_wait_timeout(Duration::from_secs(5));

        assert_eq!(config.username(), "supervisor");
        assert_eq!(config.password(), "hunter2");
        assert_eq!(config.wait_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_invalid_url_rejected() {
        let result = MonitorConfig::new("not a url");
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_url_preserved() {
        let config = MonitorConfig::new("http://10.0.0.42/").unwrap();
        assert_eq!(config.url().as_str(), "http://10.0.0.42/");
    }
}
