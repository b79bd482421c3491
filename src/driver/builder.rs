//! Builder pattern for driver configuration.
//!
//! Provides a fluent API for configuring and creating [`Driver`] instances.
//!
//! # Example
//!
//! ```no_run
//! use ricoh_address_book::Driver;
//!
//! # fn example() -> ricoh_address_book::Result<()> {
//! let driver = Driver::builder()
//!     .binary("/usr/bin/firefox")
//!     .headless()
//!     .build()?;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Error, Result};

use super::core::Driver;
use super::options::FirefoxOptions;

// ============================================================================
// Constants
// ============================================================================

/// Default time allowed for the remote agent to accept a connection.
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

// ============================================================================
// DriverBuilder
// ============================================================================

/// Builder for configuring a [`Driver`] instance.
///
/// Use [`Driver::builder()`] to create a new builder.
#[derive(Debug, Clone)]
pub struct DriverBuilder {
    /// Path to the Firefox binary.
    binary: Option<PathBuf>,
    /// Firefox launch options.
    options: FirefoxOptions,
    /// Optional persistent profile directory.
    profile: Option<PathBuf>,
    /// Connect timeout for the remote agent.
    connect_timeout: Duration,
}

impl Default for DriverBuilder {
    fn default() -> Self {
        Self {
            binary: None,
            options: FirefoxOptions::new(),
            profile: None,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }
}

// ============================================================================
// DriverBuilder Implementation
// ============================================================================

impl DriverBuilder {
    /// Creates a new driver builder with no configuration.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the path to the Firefox binary executable.
    #[inline]
    #[must_use]
    pub fn binary(mut self, path: impl Into<PathBuf>) -> Self {
        self.binary = Some(path.into());
        self
    }

    /// Enables headless mode.
    #[inline]
    #[must_use]
    pub fn headless(mut self) -> Self {
        self.options.headless = true;
        self
    }

    /// Sets the browser window size in pixels.
    #[inline]
    #[must_use]
    pub fn window_size(mut self, width: u32, height: u32) -> Self {
        self.options.window_size = Some((width, height));
        self
    }

    /// Adds a custom Firefox command-line argument.
    #[inline]
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.options.extra_args.push(arg.into());
        self
    }

    /// Uses a persistent profile directory instead of a temporary one.
    #[inline]
    #[must_use]
    pub fn profile(mut self, path: impl Into<PathBuf>) -> Self {
        self.profile = Some(path.into());
        self
    }

    /// Sets how long to wait for the remote agent to accept a connection.
    #[inline]
    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Builds the driver with validation.
    ///
    /// # Errors
    ///
    /// - [`Error::Config`] if the binary is not set or options are invalid
    /// - [`Error::FirefoxNotFound`] if the binary path doesn't exist
    pub fn build(self) -> Result<Driver> {
        let binary = self.validate_binary()?;
        self.options.validate().map_err(Error::config)?;

        Ok(Driver::new(
            binary,
            self.options,
            self.profile,
            self.connect_timeout,
        ))
    }
}

// ============================================================================
// Validation
// ============================================================================

impl DriverBuilder {
    /// Validates the binary path configuration.
    fn validate_binary(&self) -> Result<PathBuf> {
        let binary = self.binary.clone().ok_or_else(|| {
            Error::config(
                "Firefox binary path is required. Use .binary() to set it.\n\
                 Example: Driver::builder().binary(\"/usr/bin/firefox\")",
            )
        })?;

        if !binary.exists() {
            return Err(Error::firefox_not_found(&binary));
        }

        Ok(binary)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_creates_empty_builder() {
        let builder = DriverBuilder::new();
        assert!(builder.binary.is_none());
        assert!(builder.profile.is_none());
        assert_eq!(builder.connect_timeout, DEFAULT_CONNECT_TIMEOUT);
    }

    #[test]
    fn test_binary_sets_path() {
        let builder = DriverBuilder::new().binary("/usr/bin/firefox");
        assert_eq!(builder.binary, Some(PathBuf::from("/usr/bin/firefox")));
    }

    #[test]
    fn test_headless_and_window_size() {
        let builder = DriverBuilder::new().headless().window_size(1280, 900);
        assert!(builder.options.headless);
        assert_eq!(builder.options.window_size, Some((1280, 900)));
    }

    #[test]
    fn test_build_fails_without_binary() {
        let err = DriverBuilder::new().build().unwrap_err();
        assert!(err.to_string().contains("binary"));
    }

    #[test]
    fn test_build_fails_with_nonexistent_binary() {
        let result = DriverBuilder::new().binary("/nonexistent/firefox").build();
        assert!(matches!(result, Err(Error::FirefoxNotFound { .. })));
    }

    #[test]
    fn test_build_fails_with_invalid_window_size() {
        let result = DriverBuilder::new()
            .binary("/bin/sh")
            .window_size(0, 600)
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_build_with_existing_binary() {
        let driver = DriverBuilder::new().binary("/bin/sh").build();
        assert!(driver.is_ok());
    }
}
