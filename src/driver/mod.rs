//! Firefox process management.
//!
//! This module covers everything up to a live BiDi session:
//!
//! - [`Driver`] / [`DriverBuilder`]: launch configuration and bootstrap
//! - [`FirefoxOptions`]: command-line options for the Firefox process
//! - [`Profile`]: profile directories and `user.js` preferences

/// Builder pattern for driver configuration.
pub mod builder;

/// Firefox launcher and session bootstrap.
pub mod core;

/// Firefox command-line options.
pub mod options;

/// Firefox profile management.
pub mod profile;

pub use builder::DriverBuilder;
pub use core::Driver;
pub use options::FirefoxOptions;
pub use profile::{Preference, PreferenceValue, Profile};
