//! Browser window ownership and lifecycle.
//!
//! Each [`Window`] owns:
//! - One Firefox process
//! - One WebSocket connection to its remote agent
//! - One profile directory (temporary or persistent)
//!
//! Dropping the window kills the process; [`Window::close`] does so cleanly,
//! ending the BiDi session first.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::process::Child;
use tracing::{debug, info};

use crate::driver::Profile;
use crate::error::Result;
use crate::identifiers::BrowsingContextId;
use crate::protocol::{Command, SessionCommand};
use crate::transport::Connection;

use super::Tab;

// ============================================================================
// ProcessGuard
// ============================================================================

/// Guards a child process and ensures it is killed when dropped.
struct ProcessGuard {
    /// The child process handle.
    child: Option<Child>,
    /// Process ID for logging.
    pid: u32,
}

impl ProcessGuard {
    /// Creates a new process guard.
    fn new(child: Child) -> Self {
        let pid = child.id().unwrap_or(0);
        debug!(pid, "Process guard created");
        Self {
            child: Some(child),
            pid,
        }
    }

    /// Kills the process and waits for it to exit.
    async fn kill(&mut self) -> Result<()> {
        if let Some(mut child) = self.child.take() {
            debug!(pid = self.pid, "Killing Firefox process");
            if let Err(e) = child.kill().await {
                debug!(pid = self.pid, error = %e, "Failed to kill process");
            }
            if let Err(e) = child.wait().await {
                debug!(pid = self.pid, error = %e, "Failed to wait for process");
            }
            info!(pid = self.pid, "Process terminated");
        }
        Ok(())
    }

    /// Returns the process ID.
    #[inline]
    fn pid(&self) -> u32 {
        self.pid
    }
}

impl Drop for ProcessGuard {
    fn drop(&mut self) {
        if let Some(mut child) = self.child.take()
            && let Err(e) = child.start_kill()
        {
            debug!(pid = self.pid, error = %e, "Failed to send kill signal in Drop");
        }
    }
}

// ============================================================================
// Types
// ============================================================================

/// Internal shared state for a window.
pub(crate) struct WindowInner {
    /// Protected process handle.
    process: Mutex<ProcessGuard>,
    /// WebSocket connection to the remote agent.
    pub connection: Connection,
    /// Profile directory, kept alive for the process lifetime.
    #[allow(dead_code)]
    profile: Profile,
    /// Remote agent port.
    pub port: u16,
    /// The top-level browsing context.
    pub top_context: BrowsingContextId,
}

// ============================================================================
// Window
// ============================================================================

/// A handle to a running Firefox instance.
///
/// Cloning the handle shares the underlying process and connection. When the
/// last handle is dropped the process is killed.
#[derive(Clone)]
pub struct Window {
    /// Shared inner state.
    pub(crate) inner: Arc<WindowInner>,
}

impl fmt::Debug for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Window")
            .field("port", &self.inner.port)
            .field("top_context", &self.inner.top_context)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Window - Constructor
// ============================================================================

impl Window {
    /// Creates a new window handle.
    pub(crate) fn new(
        connection: Connection,
        process: Child,
        profile: Profile,
        port: u16,
        top_context: BrowsingContextId,
    ) -> Self {
        debug!(port, context = %top_context, "Window created");

        Self {
            inner: Arc::new(WindowInner {
                process: Mutex::new(ProcessGuard::new(process)),
                connection,
                profile,
                port,
                top_context,
            }),
        }
    }
}

// ============================================================================
// Window - Accessors
// ============================================================================

impl Window {
    /// Returns the remote agent port for this window.
    #[inline]
    #[must_use]
    pub fn port(&self) -> u16 {
        self.inner.port
    }

    /// Returns the Firefox process ID.
    #[inline]
    #[must_use]
    pub fn pid(&self) -> u32 {
        self.inner.process.lock().pid()
    }

    /// Returns a handle to the top-level browsing context.
    #[must_use]
    pub fn tab(&self) -> Tab {
        Tab::new(
            self.inner.top_context.clone(),
            self.inner.connection.clone(),
        )
    }
}

// ============================================================================
// Window - Lifecycle
// ============================================================================

impl Window {
    /// Ends the BiDi session and kills the Firefox process.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be killed. A failed session.end
    /// is logged and ignored since the process is going down anyway.
    #[allow(clippy::await_holding_lock)]
    pub async fn close(&self) -> Result<()> {
        debug!(port = self.inner.port, "Closing window");

        if let Err(e) = self
            .inner
            .connection
            .execute(Command::Session(SessionCommand::End {}))
            .await
        {
            debug!(error = %e, "session.end failed during close");
        }

        self.inner.connection.shutdown();
        let mut guard = self.inner.process.lock();
        guard.kill().await?;
        info!(port = self.inner.port, "Window closed");
        Ok(())
    }
}
