//! WebSocket transport layer.
//!
//! Handles the client connection to the browser's BiDi endpoint:
//! request/response correlation, timeouts, and the background event
//! loop.

// ============================================================================
// Submodules
// ============================================================================

mod connection;

// ============================================================================
// Re-exports
// ============================================================================

pub use connection::Connection;
