//! Web Image Monitor session and address book operations.
//!
//! Drives the device's administrative UI the way an operator would: log in
//! through the `header` frame, open Address Book → Manual Input under
//! Device Management in the `work` frame, then add, update, or delete
//! entries through the Manual Input dialog.
//!
//! # Example
//!
//! ```no_run
//! use ricoh_address_book::{
//!     Driver, Entry, MonitorConfig, UserId, WebImageMonitor,
//! };
//!
//! # async fn example() -> ricoh_address_book::Result<()> {
//! let driver = Driver::builder().binary("/usr/bin/firefox").headless().build()?;
//! let config = MonitorConfig::new("http://printer.example.com")?;
//!
//! let monitor = WebImageMonitor::login(&driver, config).await?;
//! let book = monitor.address_book().await?;
//!
//! let entry = Entry::new("John Doe", "john.doe@example.com")?;
//! book.write(UserId::new(50000)?, &entry).await?;
//! book.remove(UserId::new(50000)?).await?;
//!
//! monitor.logout().await?;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::time::Duration;

use tracing::{debug, info};

use crate::browser::{By, Element, Tab, Wait, Window};
use crate::driver::Driver;
use crate::entry::Entry;
use crate::error::Result;
use crate::identifiers::UserId;

use super::config::MonitorConfig;

// ============================================================================
// Constants
// ============================================================================

/// Id of the status span shown while the address book list loads.
const LOADING_STATUS_ID: &str = "span_loadingStatus";

/// Id of the add/change/delete confirmation popup.
const POPUP_ID: &str = "additional";

// ============================================================================
// WebImageMonitor
// ============================================================================

/// A logged-in Web Image Monitor session.
///
/// Created with [`WebImageMonitor::login`]; ended with
/// [`WebImageMonitor::logout`], which also closes the browser.
pub struct WebImageMonitor {
    /// The browser window hosting the session.
    window: Window,
    /// Connection settings.
    config: MonitorConfig,
}

impl WebImageMonitor {
    /// Launches a browser and logs into the device's Web Image Monitor.
    ///
    /// The device UI is a frameset: the `Login` link lives in the `header`
    /// frame, while the login form it leads to is a plain top-level page.
    ///
    /// # Errors
    ///
    /// Returns an error if the browser fails to launch, the device does not
    /// serve a Web Image Monitor page, or any page condition times out.
    pub async fn login(driver: &Driver, config: MonitorConfig) -> Result<Self> {
        let window = driver.launch().await?;
        let tab = window.tab();
        let timeout = config.wait_timeout();

        info!(url = %config.url(), "Logging into Web Image Monitor");
        tab.goto(config.url().as_str()).await?;
        wait_for_title(&tab, "Web Image Monitor", timeout).await?;

        let header = tab.frame("header").await?;
        header
            .wait_for_element(&By::link_text("Login"), timeout)
            .await?
            .click()
            .await?;
        wait_for_title(&tab, "Login", timeout).await?;

        tab.wait_for_element(&By::name("userid_work"), timeout)
            .await?
            .type_text(config.username())
            .await?;
        if !config.password().is_empty() {
            tab.find_element(&By::name("password_work"))
                .await?
                .type_text(config.password())
                .await?;
        }
        tab.find_element(&By::css("input[type='submit']"))
            .await?
            .click()
            .await?;
        wait_for_title(&tab, "Web Image Monitor", timeout).await?;

        info!(username = config.username(), "Login complete");
        Ok(Self { window, config })
    }

    /// Navigates to Address Book → Manual Input and returns an operations
    /// handle.
    ///
    /// The Device Management menu opens on hover; its `Address Book` entry
    /// is not clickable before that.
    ///
    /// # Errors
    ///
    /// Returns an error if any menu element cannot be found in time.
    pub async fn address_book(&self) -> Result<AddressBook> {
        let timeout = self.config.wait_timeout();
        let work = self.window.tab().frame("work").await?;

        debug!("Opening Device Management menu");
        work.wait_for_element(&By::link_text("Device Management"), timeout)
            .await?
            .hover()
            .await?;
        work.wait_for_element(&By::link_text("Address Book"), timeout)
            .await?
            .click()
            .await?;
        work.wait_for_element(&By::link_text("Manual Input"), timeout)
            .await?
            .click()
            .await?;

        info!("Address book opened");
        Ok(AddressBook {
            window: self.window.clone(),
            config: self.config.clone(),
        })
    }

    /// Logs out of the device and closes the browser.
    ///
    /// # Errors
    ///
    /// Returns an error if the `Logout` link cannot be clicked or the
    /// browser fails to shut down.
    pub async fn logout(self) -> Result<()> {
        info!("Logging out");
        let header = self.window.tab().frame("header").await?;
        header
            .find_element(&By::link_text("Logout"))
            .await?
            .click()
            .await?;
        self.window.close().await
    }

    /// Returns the browser window hosting the session.
    #[inline]
    #[must_use]
    pub fn window(&self) -> &Window {
        &self.window
    }
}

// ============================================================================
// AddressBook
// ============================================================================

/// Address book operations on an open Manual Input view.
pub struct AddressBook {
    /// The browser window hosting the session.
    window: Window,
    /// Connection settings.
    config: MonitorConfig,
}

impl AddressBook {
    /// Adds or updates the entry in slot `id`.
    ///
    /// When the slot is occupied the `Change` dialog is used and existing
    /// settings are preserved; otherwise `Add User` is used and the new
    /// entry is kept off the frequent-user list.
    ///
    /// # Errors
    ///
    /// Returns an error if any dialog element cannot be found or the
    /// confirmation popup does not close in time.
    pub async fn write(&self, id: UserId, entry: &Entry) -> Result<()> {
        let padded = id.padded();
        info!(user_id = %id, name = entry.name(), "Writing address book entry");

        let work = self.open_work_frame().await?;
        let exists = select_entry(&work, &padded).await?;

        let button = if exists {
            By::partial_link_text("Change")
        } else {
            By::partial_link_text("Add User")
        };
        work.find_element(&button).await?.click().await?;

        let timeout = self.config.wait_timeout();
        let fields = [
            ("entryIndexIn", padded.as_str()),
            ("entryNameIn", entry.name()),
            ("entryDisplayNameIn", entry.name()),
            ("mailAddressIn", entry.email()),
        ];
        for (name, value) in fields {
            let field = work.wait_for_element(&By::name(name), timeout).await?;
            field.clear().await?;
            field.type_text(value).await?;
        }

        if let Some(bucket) = entry.tag() {
            // The tag <select> shares its name with the frequent-user
            // radio controls below it.
            work.find_element(&By::css("select[name='entryTagInfoIn']"))
                .await?
                .select_by_text(bucket.label())
                .await?;
        }

        if !exists {
            // New entries stay off the frequent-user list; updates leave the
            // setting alone so it can be managed through other interfaces.
            for control in work.find_elements(&By::name("entryTagInfoIn")).await? {
                if control.attribute("value").await?.as_deref() == Some("2") {
                    control.click().await?;
                    break;
                }
            }
        }

        let popup = work.find_element(&By::id(POPUP_ID)).await?;
        work.find_element(&By::link_text("OK")).await?.click().await?;
        self.wait_for_popup_hidden(&popup).await?;

        info!(user_id = %id, updated = exists, "Entry written");
        Ok(())
    }

    /// Deletes the entry in slot `id`.
    ///
    /// Returns `true` if an entry was removed, `false` if the slot was
    /// already empty (a no-op).
    ///
    /// # Errors
    ///
    /// Returns an error if the delete dialog cannot be driven to
    /// completion.
    pub async fn remove(&self, id: UserId) -> Result<bool> {
        let padded = id.padded();
        info!(user_id = %id, "Removing address book entry");

        let work = self.open_work_frame().await?;
        if !select_entry(&work, &padded).await? {
            debug!(user_id = %id, "Entry not present, nothing to remove");
            return Ok(false);
        }

        work.find_element(&By::link_text("Delete")).await?.click().await?;
        let yes = work
            .wait_for_element(&By::link_text("Yes"), self.config.wait_timeout())
            .await?;
        let popup = work.find_element(&By::id(POPUP_ID)).await?;
        yes.click().await?;
        self.wait_for_popup_hidden(&popup).await?;

        info!(user_id = %id, "Entry removed");
        Ok(true)
    }
}

// ============================================================================
// AddressBook - Internal
// ============================================================================

impl AddressBook {
    /// Resolves the `work` frame and waits out the load gate.
    ///
    /// The first time the address book opens, the device streams the entry
    /// list and reports progress in a status span. Later requests refresh
    /// via AJAX and leave the span empty, so the long wait only applies
    /// when the span has text.
    async fn open_work_frame(&self) -> Result<Tab> {
        let work = self.window.tab().frame("work").await?;

        let status = work
            .wait_for_element(&By::id(LOADING_STATUS_ID), self.config.wait_timeout())
            .await?;
        if !status.text().await?.is_empty() {
            debug!("Address book still loading, waiting for completion");
            Wait::new(self.config.load_timeout())
                .until("address book load completed", async || {
                    let status = work.find_element(&By::id(LOADING_STATUS_ID)).await?;
                    Ok(status.text().await?.contains("Completed").then_some(()))
                })
                .await?;
        }

        Ok(work)
    }

    /// Waits until the confirmation popup is no longer displayed.
    async fn wait_for_popup_hidden(&self, popup: &Element) -> Result<()> {
        Wait::new(self.config.wait_timeout())
            .until("confirmation popup hidden", async || {
                Ok((!popup.is_displayed().await?).then_some(()))
            })
            .await
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Clicks the entry checkbox whose value equals the padded id.
///
/// Returns whether the slot was occupied; when it is not, the selection is
/// left unchanged.
async fn select_entry(work: &Tab, padded: &str) -> Result<bool> {
    for checkbox in work.find_elements(&By::name("entryindex")).await? {
        if checkbox.attribute("value").await?.as_deref() == Some(padded) {
            checkbox.click().await?;
            return Ok(true);
        }
    }
    Ok(false)
}

/// Waits until the document title contains `needle`.
async fn wait_for_title(tab: &Tab, needle: &str, timeout: Duration) -> Result<()> {
    let operation = format!("title contains '{needle}'");
    Wait::new(timeout)
        .until(&operation, async || {
            Ok(tab.title().await?.contains(needle).then_some(()))
        })
        .await
}
