//! Browsing context handle: navigation, lookup, frames, and script.
//!
//! A [`Tab`] wraps one browsing context. The top-level context comes from
//! [`Window::tab`](super::Window::tab); frame contexts come from
//! [`Tab::frame`], which resolves a frameset child by its `name` attribute.
//!
//! # Example
//!
//! ```no_run
//! # use ricoh_address_book::{Tab, By};
//! # async fn example(tab: &Tab) -> ricoh_address_book::Result<()> {
//! tab.goto("http://printer.local/").await?;
//! let header = tab.frame("header").await?;
//! header.find_element(&By::link_text("Login")).await?.click().await?;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::time::Duration;

use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};
use crate::identifiers::BrowsingContextId;
use crate::protocol::{
    BrowsingContextCommand, Command, Readiness, ScriptCommand, Target,
};
use crate::transport::Connection;

use super::element::Element;
use super::remote;
use super::selector::By;
use super::wait::Wait;

// ============================================================================
// Tab
// ============================================================================

/// A handle to one browsing context (a page or a frame).
#[derive(Clone)]
pub struct Tab {
    /// The context this handle operates on.
    context: BrowsingContextId,
    /// Connection to the browser.
    connection: Connection,
}

impl fmt::Debug for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tab")
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tab - Constructor and Accessors
// ============================================================================

impl Tab {
    /// Creates a tab handle for a context.
    pub(crate) fn new(context: BrowsingContextId, connection: Connection) -> Self {
        Self {
            context,
            connection,
        }
    }

    /// Returns the context id this handle operates on.
    #[inline]
    #[must_use]
    pub fn context(&self) -> &BrowsingContextId {
        &self.context
    }
}

// ============================================================================
// Tab - Navigation
// ============================================================================

impl Tab {
    /// Navigates to a URL and waits for the load event.
    pub async fn goto(&self, url: &str) -> Result<()> {
        debug!(context = %self.context, url, "Navigating");
        self.connection
            .execute(Command::BrowsingContext(BrowsingContextCommand::Navigate {
                context: self.context.clone(),
                url: url.to_string(),
                wait: Readiness::Complete,
            }))
            .await?;
        Ok(())
    }

    /// Returns the document title.
    pub async fn title(&self) -> Result<String> {
        let remote = self.evaluate("document.title").await?;
        Ok(remote::remote_string(&remote).unwrap_or_default())
    }
}

// ============================================================================
// Tab - Element Lookup
// ============================================================================

impl Tab {
    /// Finds the first element matching the strategy.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ElementNotFound`] if nothing matches.
    pub async fn find_element(&self, by: &By) -> Result<Element> {
        self.find_elements(by).await?.into_iter().next().ok_or_else(|| {
            Error::element_not_found(by.to_string(), self.context.to_string())
        })
    }

    /// Finds all elements matching the strategy.
    pub async fn find_elements(&self, by: &By) -> Result<Vec<Element>> {
        let result = self
            .connection
            .execute(Command::BrowsingContext(
                BrowsingContextCommand::LocateNodes {
                    context: self.context.clone(),
                    locator: by.to_locator(),
                    max_node_count: None,
                    start_nodes: None,
                },
            ))
            .await?;

        Ok(remote::node_ids_from_result(&result)
            .into_iter()
            .map(|id| Element::new(id, self.context.clone(), self.connection.clone()))
            .collect())
    }

    /// Waits for an element matching the strategy to appear.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Timeout`] if nothing matches within `timeout`.
    pub async fn wait_for_element(&self, by: &By, timeout: Duration) -> Result<Element> {
        let operation = format!("element {by}");
        Wait::new(timeout)
            .until(&operation, async || {
                Ok(self.find_elements(by).await?.into_iter().next())
            })
            .await
    }
}

// ============================================================================
// Tab - Frames
// ============================================================================

impl Tab {
    /// Resolves a child frame by its `name` attribute.
    ///
    /// The wire protocol identifies frames only by context id, so this walks
    /// the context tree under this tab and asks each child for its
    /// `window.name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FrameNotFound`] if no child frame has that name.
    pub async fn frame(&self, name: &str) -> Result<Tab> {
        let tree = self
            .connection
            .execute(Command::BrowsingContext(BrowsingContextCommand::GetTree {
                max_depth: None,
                root: Some(self.context.clone()),
            }))
            .await?;

        for child in child_context_ids(&tree) {
            let child_tab = Tab::new(child, self.connection.clone());
            if child_tab.window_name().await? == name {
                debug!(context = %child_tab.context, name, "Resolved frame");
                return Ok(child_tab);
            }
        }

        Err(Error::frame_not_found(name))
    }

    /// Returns this context's `window.name`.
    async fn window_name(&self) -> Result<String> {
        let remote = self.evaluate("window.name").await?;
        Ok(remote::remote_string(&remote).unwrap_or_default())
    }
}

/// Collects every context id strictly below the root of a getTree result.
fn child_context_ids(tree: &Value) -> Vec<BrowsingContextId> {
    fn walk(info: &Value, out: &mut Vec<BrowsingContextId>, include_self: bool) {
        if include_self
            && let Some(id) = info.get("context").and_then(Value::as_str)
        {
            out.push(BrowsingContextId::new(id));
        }
        if let Some(children) = info.get("children").and_then(Value::as_array) {
            for child in children {
                walk(child, out, true);
            }
        }
    }

    let mut out = Vec::new();
    if let Some(contexts) = tree.get("contexts").and_then(Value::as_array) {
        for root in contexts {
            walk(root, &mut out, false);
        }
    }
    out
}

// ============================================================================
// Tab - Script
// ============================================================================

impl Tab {
    /// Evaluates an expression in this context and returns the remote value.
    pub async fn evaluate(&self, expression: &str) -> Result<Value> {
        let result = self
            .connection
            .execute(Command::Script(ScriptCommand::Evaluate {
                expression: expression.to_string(),
                target: Target {
                    context: self.context.clone(),
                },
                await_promise: false,
            }))
            .await?;

        remote::unpack_script_result(result)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_child_context_ids_excludes_root() {
        let tree = json!({
            "contexts": [{
                "context": "top",
                "children": [
                    {"context": "frame-a", "children": []},
                    {"context": "frame-b", "children": [
                        {"context": "frame-b-1", "children": []}
                    ]}
                ]
            }]
        });

        let ids: Vec<String> = child_context_ids(&tree)
            .into_iter()
            .map(|id| id.as_str().to_string())
            .collect();

        assert_eq!(ids, vec!["frame-a", "frame-b", "frame-b-1"]);
    }

    #[test]
    fn test_child_context_ids_empty_tree() {
        assert!(child_context_ids(&json!({"contexts": []})).is_empty());
    }
}
