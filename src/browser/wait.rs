//! Polling waits for page conditions.
//!
//! Device web panels update their frames asynchronously, so most interactions
//! gate on a condition: an element appearing, a status span reaching a value,
//! a popup going hidden. [`Wait`] runs a probe on an interval until it yields
//! a value or the timeout elapses.
//!
//! # Example
//!
//! ```no_run
//! # use std::time::Duration;
//! # use ricoh_address_book::{Tab, By, Wait};
//! # async fn example(tab: &Tab) -> ricoh_address_book::Result<()> {
//! let element = Wait::new(Duration::from_secs(10))
//!     .until("status completed", async || {
//!         let status = tab.find_element(&By::id("span_loadingStatus")).await?;
//!         if status.text().await? == "Completed" {
//!             Ok(Some(status))
//!         } else {
//!             Ok(None)
//!         }
//!     })
//!     .await?;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::time::Duration;

use tokio::time::{Instant, sleep};
use tracing::trace;

use crate::error::{Error, Result};

// ============================================================================
// Constants
// ============================================================================

/// Default total wait budget.
pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default delay between probe attempts.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(250);

// ============================================================================
// Wait
// ============================================================================

/// A polling wait with a total timeout and a probe interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wait {
    /// Total time budget for the condition.
    timeout: Duration,
    /// Delay between probe attempts.
    interval: Duration,
}

impl Default for Wait {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_WAIT_TIMEOUT,
            interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl Wait {
    /// Creates a wait with the given timeout and the default interval.
    #[inline]
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            ..Default::default()
        }
    }

    /// Sets the probe interval.
    #[inline]
    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Returns the total timeout.
    #[inline]
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Polls `probe` until it yields a value.
    ///
    /// The probe returns `Ok(Some(value))` when the condition holds,
    /// `Ok(None)` to keep waiting, or `Err` to abort immediately. Probes
    /// should map "not there yet" outcomes to `Ok(None)` rather than errors.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Timeout`] tagged with `operation` if the condition
    /// never holds, or the probe's own error if it fails.
    pub async fn until<T, F>(&self, operation: &str, mut probe: F) -> Result<T>
    where
        F: AsyncFnMut() -> Result<Option<T>>,
    {
        let deadline = Instant::now() + self.timeout;

        loop {
            if let Some(value) = probe().await? {
                return Ok(value);
            }

            if Instant::now() + self.interval >= deadline {
                return Err(Error::timeout(operation, self.timeout.as_millis() as u64));
            }

            trace!(operation, "Condition not met, polling again");
            sleep(self.interval).await;
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use tokio_test::assert_ok;

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_until_returns_on_first_success() {
        let wait = Wait::new(Duration::from_secs(1));
        let value = assert_ok!(wait.until("immediate", async || Ok(Some(7))).await);
        assert_eq!(value, 7);
    }

    #[tokio::test(start_paused = true)]
    async fn test_until_polls_until_condition_holds() {
        let wait = Wait::new(Duration::from_secs(5)).with_interval(Duration::from_millis(10));
        let mut attempts = 0;

        let value = assert_ok!(
            wait.until("third try", async || {
                attempts += 1;
                Ok(if attempts >= 3 { Some("done") } else { None })
            })
            .await
        );

        assert_eq!(value, "done");
        assert_eq!(attempts, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_until_times_out() {
        let wait = Wait::new(Duration::from_millis(50)).with_interval(Duration::from_millis(10));
        let result: Result<()> = wait.until("never", async || Ok(None)).await;

        let err = result.unwrap_err();
        assert!(err.is_timeout());
        assert!(err.to_string().contains("never"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_until_propagates_probe_error() {
        let wait = Wait::new(Duration::from_secs(5));
        let result: Result<()> = wait
            .until("failing probe", async || {
                Err(Error::script_error("boom"))
            })
            .await;

        assert!(matches!(result, Err(Error::ScriptError { .. })));
    }
}
