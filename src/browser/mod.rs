//! Browser entities: windows, tabs, elements, and waits.
//!
//! - [`Window`]: owns the Firefox process and connection
//! - [`Tab`]: one browsing context (page or frame)
//! - [`Element`]: a located DOM node
//! - [`By`]: element location strategies
//! - [`Wait`]: polling waits for page conditions

/// Handles to located DOM elements.
pub mod element;

/// Remote value interpretation helpers.
mod remote;

/// Element location strategies.
pub mod selector;

/// Browsing context handle.
pub mod tab;

/// Polling waits.
pub mod wait;

/// Browser window ownership and lifecycle.
pub mod window;

pub use element::Element;
pub use selector::By;
pub use tab::Tab;
pub use wait::{DEFAULT_POLL_INTERVAL, DEFAULT_WAIT_TIMEOUT, Wait};
pub use window::Window;
