//! End-to-end address book demo.
//!
//! Adds an entry, updates it, and removes it again on a real device.
//!
//! Usage:
//!   PRINTER_URL=http://printer.example.com \
//!   FIREFOX_BINARY=/usr/bin/firefox \
//!   cargo run --example sync_address_book
//!
//! Optional:
//!   PRINTER_USERNAME / PRINTER_PASSWORD  override the default admin login
//!   RUST_LOG=ricoh_address_book=debug    verbose tracing output

// ============================================================================
// Imports
// ============================================================================

use std::env;

use anyhow::Context;
use ricoh_address_book::{Driver, Entry, MonitorConfig, UserId, WebImageMonitor};

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let url = env::var("PRINTER_URL").context("PRINTER_URL is required")?;
    let binary = env::var("FIREFOX_BINARY").unwrap_or_else(|_| "/usr/bin/firefox".to_string());

    let mut config = MonitorConfig::new(&url)?;
    if let Ok(username) = env::var("PRINTER_USERNAME") {
        config = config.with_username(username);
    }
    if let Ok(password) = env::var("PRINTER_PASSWORD") {
        config = config.with_password(password);
    }

    let driver = Driver::builder().binary(&binary).headless().build()?;

    println!("Logging into {url} ...");
    let monitor = WebImageMonitor::login(&driver, config).await?;
    let book = monitor.address_book().await?;

    let id = UserId::new(50000)?;

    let entry = Entry::new("John Doe", "john.doe@example.com")?;
    println!("Adding {entry} in slot {id} ...");
    book.write(id, &entry).await?;

    let updated = Entry::new("John Alexander Doe", "john.doe@example.com")?;
    println!("Updating slot {id} to {updated} ...");
    book.write(id, &updated).await?;

    println!("Removing slot {id} ...");
    let removed = book.remove(id).await?;
    println!("Removed: {removed}");

    monitor.logout().await?;
    println!("Done.");
    Ok(())
}
