//! Firefox command-line options.
//!
//! Type-safe configuration for the Firefox process: headless mode, window
//! size, and extra command-line arguments.
//!
//! # Example
//!
//! ```
//! use ricoh_address_book::FirefoxOptions;
//!
//! let options = FirefoxOptions::new()
//!     .with_headless()
//!     .with_window_size(1280, 900);
//!
//! let args = options.to_args();
//! // ["--headless", "--window-size", "1280,900"]
//! ```

// ============================================================================
// FirefoxOptions
// ============================================================================

/// Firefox process configuration options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FirefoxOptions {
    /// Run Firefox without a GUI (headless mode).
    pub headless: bool,

    /// Window dimensions in pixels (width, height).
    pub window_size: Option<(u32, u32)>,

    /// Additional custom command-line arguments.
    pub extra_args: Vec<String>,
}

// ============================================================================
// Constructors
// ============================================================================

impl FirefoxOptions {
    /// Creates a new options instance with default settings.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            headless: false,
            window_size: None,
            extra_args: Vec::new(),
        }
    }

    /// Creates options configured for headless mode.
    #[inline]
    #[must_use]
    pub fn headless() -> Self {
        Self {
            headless: true,
            ..Default::default()
        }
    }
}

// ============================================================================
// Builder Methods
// ============================================================================

impl FirefoxOptions {
    /// Enables headless mode.
    #[inline]
    #[must_use]
    pub fn with_headless(mut self) -> Self {
        self.headless = true;
        self
    }

    /// Sets window size in pixels.
    #[inline]
    #[must_use]
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window_size = Some((width, height));
        self
    }

    /// Adds a custom command-line argument.
    #[inline]
    #[must_use]
    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.extra_args.push(arg.into());
        self
    }

    /// Adds multiple custom command-line arguments.
    #[inline]
    #[must_use]
    pub fn with_args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.extra_args.extend(args.into_iter().map(Into::into));
        self
    }
}

// ============================================================================
// Conversion Methods
// ============================================================================

impl FirefoxOptions {
    /// Converts options to Firefox command-line arguments.
    #[must_use]
    pub fn to_args(&self) -> Vec<String> {
        let mut args = Vec::with_capacity(4 + self.extra_args.len());

        if self.headless {
            args.push("--headless".to_string());
        }

        if let Some((width, height)) = self.window_size {
            args.push("--window-size".to_string());
            args.push(format!("{width},{height}"));
        }

        args.extend(self.extra_args.clone());
        args
    }

    /// Validates the options configuration.
    ///
    /// # Errors
    ///
    /// Returns an error message if validation fails.
    pub fn validate(&self) -> Result<(), String> {
        if let Some((width, height)) = self.window_size
            && (width == 0 || height == 0)
        {
            return Err("Window dimensions must be greater than zero".to_string());
        }
        Ok(())
    }

    /// Returns `true` if headless mode is enabled.
    #[inline]
    #[must_use]
    pub const fn is_headless(&self) -> bool {
        self.headless
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_creates_default() {
        let options = FirefoxOptions::new();
        assert!(!options.headless);
        assert!(options.window_size.is_none());
        assert!(options.extra_args.is_empty());
    }

    #[test]
    fn test_headless_constructor() {
        let options = FirefoxOptions::headless();
        assert!(options.is_headless());
    }

    #[test]
    fn test_builder_chain() {
        let options = FirefoxOptions::new()
            .with_headless()
            .with_window_size(1920, 1080)
            .with_arg("--safe-mode");

        assert!(options.headless);
        assert_eq!(options.window_size, Some((1920, 1080)));
        assert_eq!(options.extra_args, vec!["--safe-mode".to_string()]);
    }

    #[test]
    fn test_to_args_headless() {
        let args = FirefoxOptions::new().with_headless().to_args();
        assert!(args.contains(&"--headless".to_string()));
    }

    #[test]
    fn test_to_args_window_size() {
        let args = FirefoxOptions::new().with_window_size(800, 600).to_args();
        assert!(args.contains(&"--window-size".to_string()));
        assert!(args.contains(&"800,600".to_string()));
    }

    #[test]
    fn test_with_args_multiple() {
        let options = FirefoxOptions::new().with_args(["--a", "--b"]);
        assert_eq!(options.extra_args.len(), 2);
    }

    #[test]
    fn test_validate_zero_dimension() {
        assert!(FirefoxOptions::new().with_window_size(0, 600).validate().is_err());
        assert!(FirefoxOptions::new().with_window_size(800, 0).validate().is_err());
        assert!(FirefoxOptions::new().with_window_size(800, 600).validate().is_ok());
    }
}
