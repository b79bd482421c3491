//! Address book automation for Ricoh Aficio multifunction printers.
//!
//! The Aficio-class devices expose their administration UI as "Web Image
//! Monitor", a frameset web application with no management API. This
//! library drives it with a real Firefox instance over the WebDriver BiDi
//! WebSocket protocol: log in, open Address Book → Manual Input, then add,
//! update, or delete entries by their numeric slot.
//!
//! # Architecture
//!
//! - **Core logic**: [`UserId`] (slot 1–50000, rendered zero-padded),
//!   [`TagBucket`] (the ten index labels and first-letter classification),
//!   and [`Entry`] (display name + email). Pure and browser-free.
//! - **Automation**: [`Driver`] launches Firefox with a temporary profile
//!   and connects to its remote agent; [`Window`], [`Tab`], and
//!   [`Element`] wrap BiDi browsing contexts and nodes; [`WebImageMonitor`]
//!   and [`AddressBook`] script the device UI itself.
//!
//! # Quick Start
//!
//! ```no_run
//! use ricoh_address_book::{
//!     Driver, Entry, MonitorConfig, Result, UserId, WebImageMonitor,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let driver = Driver::builder()
//!         .binary("/usr/bin/firefox")
//!         .headless()
//!         .build()?;
//!
//!     let config = MonitorConfig::new("http://printer.example.com")?;
//!     let monitor = WebImageMonitor::login(&driver, config).await?;
//!     let book = monitor.address_book().await?;
//!
//!     let entry = Entry::new("John Doe", "john.doe@example.com")?;
//!     book.write(UserId::new(50000)?, &entry).await?;
//!     book.remove(UserId::new(50000)?).await?;
//!
//!     monitor.logout().await
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`browser`] | Browser entities: [`Window`], [`Tab`], [`Element`] |
//! | [`driver`] | Firefox launch configuration and profiles |
//! | [`entry`] | Address book entry data |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`identifiers`] | Type-safe ID wrappers, including [`UserId`] |
//! | [`monitor`] | Web Image Monitor session and operations |
//! | [`protocol`] | BiDi message types (internal) |
//! | [`tag`] | Index tag classification |
//! | [`transport`] | WebSocket transport layer (internal) |

// ============================================================================
// Modules
// ============================================================================

/// Browser entities: Window, Tab, Element, locators, and waits.
pub mod browser;

/// Firefox launch configuration and profiles.
///
/// Use [`Driver::builder()`] to create a configured driver instance.
pub mod driver;

/// Address book entry data.
pub mod entry;

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Type-safe identifiers.
///
/// Newtype wrappers prevent mixing incompatible IDs at compile time.
pub mod identifiers;

/// Web Image Monitor session and address book operations.
pub mod monitor;

/// BiDi protocol message types.
///
/// Internal module defining command/response structures.
pub mod protocol;

/// Index tag classification.
pub mod tag;

/// WebSocket transport layer.
///
/// Internal module handling connection management and correlation.
pub mod transport;

// ============================================================================
// Re-exports
// ============================================================================

// Browser types
pub use browser::{By, Element, Tab, Wait, Window};

// Driver types
pub use driver::{Driver, DriverBuilder, FirefoxOptions, Profile};

// Core logic types
pub use entry::Entry;
pub use tag::TagBucket;

// Error types
pub use error::{Error, Result};

// Identifier types
pub use identifiers::{BrowsingContextId, CommandId, MAX_USER_ID, MIN_USER_ID, NodeId, UserId};

// Monitor types
pub use monitor::{AddressBook, MonitorConfig, WebImageMonitor};
