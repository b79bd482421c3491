//! Web Image Monitor automation.
//!
//! - [`MonitorConfig`]: device URL, credentials, and wait budgets
//! - [`WebImageMonitor`]: a logged-in session
//! - [`AddressBook`]: add, update, and delete operations

/// Session and address book operations.
pub mod address_book;

/// Connection settings.
pub mod config;

pub use address_book::{AddressBook, WebImageMonitor};
pub use config::MonitorConfig;
