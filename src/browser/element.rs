//! Handles to located DOM elements.
//!
//! An [`Element`] pairs a node's shared id with the browsing context it was
//! located in. Reads and simple mutations go through `script.callFunction`
//! with the node as the first argument; typing and hovering go through the
//! input module so the page sees real key and pointer events.
//!
//! Handles stay valid until the document they belong to is replaced by a
//! navigation.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};
use crate::identifiers::{BrowsingContextId, NodeId};
use crate::protocol::{
    Command, InputCommand, ScriptArgument, ScriptCommand, SourceActions, Target,
};
use crate::transport::Connection;

use super::remote;
use super::selector::By;

// ============================================================================
// Element
// ============================================================================

/// A handle to a DOM element in a specific browsing context.
#[derive(Clone)]
pub struct Element {
    /// The node's shared id.
    shared_id: NodeId,
    /// Context the node was located in.
    context: BrowsingContextId,
    /// Connection to the browser.
    connection: Connection,
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("shared_id", &self.shared_id)
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Element - Constructor and Accessors
// ============================================================================

impl Element {
    /// Creates an element handle.
    pub(crate) fn new(
        shared_id: NodeId,
        context: BrowsingContextId,
        connection: Connection,
    ) -> Self {
        Self {
            shared_id,
            context,
            connection,
        }
    }

    /// Returns the node's shared id.
    #[inline]
    #[must_use]
    pub fn shared_id(&self) -> &NodeId {
        &self.shared_id
    }
}

// ============================================================================
// Element - Reads
// ============================================================================

impl Element {
    /// Returns the element's text content, trimmed.
    pub async fn text(&self) -> Result<String> {
        let remote = self
            .call("el => (el.textContent ?? '').trim()", Vec::new())
            .await?;
        Ok(remote::remote_string(&remote).unwrap_or_default())
    }

    /// Returns the element's current `value` property.
    pub async fn value(&self) -> Result<String> {
        let remote = self.call("el => el.value ?? ''", Vec::new()).await?;
        Ok(remote::remote_string(&remote).unwrap_or_default())
    }

    /// Returns an attribute value, or `None` if the attribute is absent.
    pub async fn attribute(&self, name: &str) -> Result<Option<String>> {
        let remote = self
            .call(
                "(el, name) => el.getAttribute(name)",
                vec![ScriptArgument::string(name)],
            )
            .await?;
        Ok(remote::remote_string(&remote))
    }

    /// Returns whether the element takes up space and is not hidden by CSS.
    pub async fn is_displayed(&self) -> Result<bool> {
        let remote = self
            .call(
                "el => {\
                   const rect = el.getBoundingClientRect();\
                   const style = getComputedStyle(el);\
                   return rect.width > 0 && rect.height > 0 \
                       && style.display !== 'none' && style.visibility !== 'hidden';\
                 }",
                Vec::new(),
            )
            .await?;
        remote::remote_bool(&remote)
            .ok_or_else(|| Error::protocol("Expected boolean from visibility check"))
    }
}

// ============================================================================
// Element - Interactions
// ============================================================================

impl Element {
    /// Clicks the element.
    pub async fn click(&self) -> Result<()> {
        debug!(shared_id = %self.shared_id, "Clicking element");
        self.call("el => el.click()", Vec::new()).await?;
        Ok(())
    }

    /// Clears an input element's value.
    pub async fn clear(&self) -> Result<()> {
        self.call(
            "el => {\
               el.value = '';\
               el.dispatchEvent(new Event('input', { bubbles: true }));\
             }",
            Vec::new(),
        )
        .await?;
        Ok(())
    }

    /// Types text into the element with synthesized key events.
    ///
    /// The element is focused first so the key events land on it.
    pub async fn type_text(&self, text: &str) -> Result<()> {
        debug!(shared_id = %self.shared_id, chars = text.chars().count(), "Typing into element");
        self.call("el => el.focus()", Vec::new()).await?;

        self.connection
            .execute(Command::Input(InputCommand::PerformActions {
                context: self.context.clone(),
                actions: vec![SourceActions::typing(text)],
            }))
            .await?;

        // Reset the input source state between action sequences.
        self.connection
            .execute(Command::Input(InputCommand::ReleaseActions {
                context: self.context.clone(),
            }))
            .await?;
        Ok(())
    }

    /// Moves the pointer onto the element, firing hover events.
    ///
    /// Menus on frame-based panels open on `mouseover`, so a plain click on
    /// a hidden submenu entry is not enough.
    pub async fn hover(&self) -> Result<()> {
        debug!(shared_id = %self.shared_id, "Hovering element");
        self.connection
            .execute(Command::Input(InputCommand::PerformActions {
                context: self.context.clone(),
                actions: vec![SourceActions::hover(self.shared_id.clone())],
            }))
            .await?;
        Ok(())
    }

    /// Selects the `<option>` whose visible text equals `label`.
    ///
    /// Dispatches a bubbling `change` event, as selection from script does
    /// not fire one on its own.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ElementNotFound`] if no option matches.
    pub async fn select_by_text(&self, label: &str) -> Result<()> {
        let remote = self
            .call(
                "(el, label) => {\
                   for (const option of el.options) {\
                     if (option.text.trim() === label) {\
                       el.value = option.value;\
                       el.dispatchEvent(new Event('change', { bubbles: true }));\
                       return true;\
                     }\
                   }\
                   return false;\
                 }",
                vec![ScriptArgument::string(label)],
            )
            .await?;

        if remote::remote_bool(&remote) == Some(true) {
            Ok(())
        } else {
            Err(Error::element_not_found(
                format!("option '{label}'"),
                self.context.to_string(),
            ))
        }
    }
}

// ============================================================================
// Element - Nested Lookup
// ============================================================================

impl Element {
    /// Finds the first descendant matching the strategy.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ElementNotFound`] if nothing matches.
    pub async fn find(&self, by: &By) -> Result<Element> {
        self.find_all(by).await?.into_iter().next().ok_or_else(|| {
            Error::element_not_found(by.to_string(), self.context.to_string())
        })
    }

    /// Finds all descendants matching the strategy.
    pub async fn find_all(&self, by: &By) -> Result<Vec<Element>> {
        let result = self
            .connection
            .execute(Command::BrowsingContext(
                crate::protocol::BrowsingContextCommand::LocateNodes {
                    context: self.context.clone(),
                    locator: by.to_locator(),
                    max_node_count: None,
                    start_nodes: Some(vec![crate::protocol::SharedReference {
                        shared_id: self.shared_id.clone(),
                    }]),
                },
            ))
            .await?;

        Ok(remote::node_ids_from_result(&result)
            .into_iter()
            .map(|id| Element::new(id, self.context.clone(), self.connection.clone()))
            .collect())
    }
}

// ============================================================================
// Element - Internal
// ============================================================================

impl Element {
    /// Calls a function with this element prepended to the arguments.
    async fn call(&self, declaration: &str, mut args: Vec<ScriptArgument>) -> Result<Value> {
        args.insert(0, ScriptArgument::node(self.shared_id.clone()));

        let result = self
            .connection
            .execute(Command::Script(ScriptCommand::CallFunction {
                function_declaration: declaration.to_string(),
                target: Target {
                    context: self.context.clone(),
                },
                await_promise: false,
                arguments: args,
            }))
            .await?;

        remote::unpack_script_result(result)
    }
}
