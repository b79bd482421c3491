//! Firefox launcher and session bootstrap.
//!
//! The [`Driver`] owns the launch configuration and turns it into a running
//! browser: it prepares a profile, spawns Firefox with the remote agent
//! enabled, connects over WebSocket, and starts a BiDi session.
//!
//! # Example
//!
//! ```no_run
//! use ricoh_address_book::Driver;
//!
//! # async fn example() -> ricoh_address_book::Result<()> {
//! let driver = Driver::builder()
//!     .binary("/usr/bin/firefox")
//!     .headless()
//!     .build()?;
//!
//! let window = driver.launch().await?;
//! let tab = window.tab();
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::net::TcpListener;
use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tokio::process::{Child, Command as ProcessCommand};
use tokio::time::{Instant, sleep};
use tracing::{debug, info, trace};

use crate::browser::Window;
use crate::error::{Error, Result};
use crate::identifiers::BrowsingContextId;
use crate::protocol::{BrowsingContextCommand, Command, SessionCommand};
use crate::transport::Connection;

use super::builder::DriverBuilder;
use super::options::FirefoxOptions;
use super::profile::Profile;

// ============================================================================
// Constants
// ============================================================================

/// Delay between connection attempts while Firefox starts up.
const CONNECT_RETRY_INTERVAL: Duration = Duration::from_millis(250);

// ============================================================================
// Types
// ============================================================================

/// Internal shared state for the driver.
pub(crate) struct DriverInner {
    /// Path to the Firefox binary executable.
    pub binary: PathBuf,

    /// Firefox launch options.
    pub options: FirefoxOptions,

    /// Optional persistent profile directory.
    pub profile_path: Option<PathBuf>,

    /// Time allowed for the remote agent to accept a connection.
    pub connect_timeout: Duration,
}

// ============================================================================
// Driver
// ============================================================================

/// Firefox launch configuration and session factory.
///
/// The driver is cheap to clone; each [`Driver::launch`] call spawns an
/// independent Firefox process with its own profile and connection.
#[derive(Clone)]
pub struct Driver {
    /// Shared inner state.
    pub(crate) inner: Arc<DriverInner>,
}

// ============================================================================
// Driver - Display
// ============================================================================

impl fmt::Debug for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Driver")
            .field("binary", &self.inner.binary)
            .field("options", &self.inner.options)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Driver - Public API
// ============================================================================

impl Driver {
    /// Creates a configuration builder for the driver.
    #[inline]
    #[must_use]
    pub fn builder() -> DriverBuilder {
        DriverBuilder::new()
    }

    /// Launches Firefox and establishes a BiDi session.
    ///
    /// The returned [`Window`] owns the Firefox process, the profile, and
    /// the WebSocket connection. Dropping it kills the process.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Profile creation fails
    /// - The Firefox process fails to spawn
    /// - The remote agent does not accept a connection before the timeout
    /// - The BiDi session cannot be started
    pub async fn launch(&self) -> Result<Window> {
        let profile = self.prepare_profile()?;
        profile.write_prefs(&Profile::default_prefs())?;

        let port = pick_free_port()?;
        let child = self.spawn_firefox_process(&profile, port)?;
        let pid = child.id();
        info!(pid, port, "Firefox process spawned");

        let ws_url = format!("ws://127.0.0.1:{port}/session");
        let connection = self.connect_with_retry(&ws_url).await?;
        debug!(url = %ws_url, "Remote agent connected");

        let top_context = start_session(&connection).await?;
        info!(pid, context = %top_context, "BiDi session established");

        Ok(Window::new(connection, child, profile, port, top_context))
    }
}

// ============================================================================
// Driver - Internal API
// ============================================================================

impl Driver {
    /// Creates a new driver instance.
    pub(crate) fn new(
        binary: PathBuf,
        options: FirefoxOptions,
        profile_path: Option<PathBuf>,
        connect_timeout: Duration,
    ) -> Self {
        Self {
            inner: Arc::new(DriverInner {
                binary,
                options,
                profile_path,
                connect_timeout,
            }),
        }
    }

    /// Prepares the Firefox profile for the launch.
    fn prepare_profile(&self) -> Result<Profile> {
        match &self.inner.profile_path {
            Some(path) => {
                debug!(path = %path.display(), "Using persistent profile");
                Profile::from_path(path)
            }
            None => {
                debug!("Creating temporary profile");
                Profile::new_temp()
            }
        }
    }

    /// Spawns the Firefox process with the remote agent listening on `port`.
    fn spawn_firefox_process(&self, profile: &Profile, port: u16) -> Result<Child> {
        let mut cmd = ProcessCommand::new(&self.inner.binary);

        cmd.arg("--profile")
            .arg(profile.path())
            .arg("--no-remote")
            .arg("--new-instance")
            .arg("--remote-debugging-port")
            .arg(port.to_string());

        cmd.args(self.inner.options.to_args());

        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        cmd.kill_on_drop(true);

        cmd.spawn().map_err(Error::process_launch_failed)
    }

    /// Connects to the remote agent, retrying until the timeout elapses.
    ///
    /// Firefox needs a moment to bind the port after the process starts, so
    /// refused connections are retried on an interval.
    async fn connect_with_retry(&self, ws_url: &str) -> Result<Connection> {
        let deadline = Instant::now() + self.inner.connect_timeout;

        loop {
            match Connection::connect(ws_url).await {
                Ok(connection) => return Ok(connection),
                Err(e) if Instant::now() + CONNECT_RETRY_INTERVAL < deadline => {
                    trace!(error = %e, "Remote agent not ready, retrying");
                    sleep(CONNECT_RETRY_INTERVAL).await;
                }
                Err(_) => {
                    return Err(Error::connection_timeout(
                        self.inner.connect_timeout.as_millis() as u64,
                    ));
                }
            }
        }
    }
}

// ============================================================================
// Session Bootstrap
// ============================================================================

/// Starts a BiDi session and resolves the top-level browsing context.
async fn start_session(connection: &Connection) -> Result<BrowsingContextId> {
    connection
        .execute(Command::Session(SessionCommand::New {
            capabilities: json!({}),
        }))
        .await?;

    let tree = connection
        .execute(Command::BrowsingContext(BrowsingContextCommand::GetTree {
            max_depth: Some(0),
            root: None,
        }))
        .await?;

    let context = tree
        .get("contexts")
        .and_then(|v| v.as_array())
        .and_then(|contexts| contexts.first())
        .and_then(|c| c.get("context"))
        .and_then(|v| v.as_str())
        .ok_or_else(|| Error::protocol("Expected a top-level context in getTree response"))?;

    Ok(BrowsingContextId::new(context))
}

/// Finds a free TCP port by binding to an ephemeral port and releasing it.
fn pick_free_port() -> Result<u16> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let port = listener.local_addr()?.port();
    drop(listener);
    Ok(port)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_free_port_returns_nonzero() {
        let port = pick_free_port().unwrap();
        assert_ne!(port, 0);
    }

    #[test]
    fn test_driver_is_clone_and_debug() {
        fn assert_clone<T: Clone>() {}
        fn assert_debug<T: fmt::Debug>() {}
        assert_clone::<Driver>();
        assert_debug::<Driver>();
    }

    #[test]
    fn test_builder_returns_driver_builder() {
        let _builder = Driver::builder();
    }
}
