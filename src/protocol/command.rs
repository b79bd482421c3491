//! Command definitions organized by BiDi module.

// ============================================================================
// Imports
// ============================================================================

use serde::Serialize;
use serde_json::Value;

use crate::identifiers::{BrowsingContextId, NodeId};

// ============================================================================
// Command Wrapper
// ============================================================================

/// All protocol commands organized by module.
///
/// This enum wraps module-specific command enums for unified
/// serialization into the wire `method`/`params` shape.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Command {
    /// Session module commands.
    Session(SessionCommand),
    /// BrowsingContext module commands.
    BrowsingContext(BrowsingContextCommand),
    /// Script module commands.
    Script(ScriptCommand),
    /// Input module commands.
    Input(InputCommand),
}

// ============================================================================
// Session Commands
// ============================================================================

/// Session module commands for connection lifecycle.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "method", content = "params")]
pub enum SessionCommand {
    /// Start a BiDi session.
    #[serde(rename = "session.new")]
    New {
        /// Capabilities request; an empty object accepts the defaults.
        capabilities: Value,
    },

    /// End the BiDi session.
    #[serde(rename = "session.end")]
    End {},
}

// ============================================================================
// BrowsingContext Commands
// ============================================================================

/// Page readiness state to await after navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Readiness {
    /// Do not wait.
    None,
    /// Wait for DOMContentLoaded.
    Interactive,
    /// Wait for the load event.
    Complete,
}

/// BrowsingContext module commands for navigation and node location.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "method", content = "params")]
pub enum BrowsingContextCommand {
    /// Get the tree of open browsing contexts.
    #[serde(rename = "browsingContext.getTree")]
    GetTree {
        /// Maximum tree depth; `None` returns the full tree.
        #[serde(rename = "maxDepth", skip_serializing_if = "Option::is_none")]
        max_depth: Option<u32>,
        /// Root context to start from; `None` starts at the top level.
        #[serde(skip_serializing_if = "Option::is_none")]
        root: Option<BrowsingContextId>,
    },

    /// Navigate a context to a URL.
    #[serde(rename = "browsingContext.navigate")]
    Navigate {
        /// Target context.
        context: BrowsingContextId,
        /// URL to navigate to.
        url: String,
        /// Readiness state to await.
        wait: Readiness,
    },

    /// Locate DOM nodes in a context.
    #[serde(rename = "browsingContext.locateNodes")]
    LocateNodes {
        /// Context to search in.
        context: BrowsingContextId,
        /// Locator strategy and value.
        locator: Locator,
        /// Cap on returned nodes.
        #[serde(rename = "maxNodeCount", skip_serializing_if = "Option::is_none")]
        max_node_count: Option<u64>,
        /// Restrict the search to descendants of these nodes.
        #[serde(rename = "startNodes", skip_serializing_if = "Option::is_none")]
        start_nodes: Option<Vec<SharedReference>>,
    },
}

/// A BiDi node locator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum Locator {
    /// CSS selector.
    Css(String),
    /// XPath expression.
    XPath(String),
    /// Rendered text match.
    InnerText(String),
}

// ============================================================================
// Script Commands
// ============================================================================

/// Realm target for script execution: a browsing context.
#[derive(Debug, Clone, Serialize)]
pub struct Target {
    /// The context to execute in.
    pub context: BrowsingContextId,
}

/// A reference to a DOM node by shared id.
#[derive(Debug, Clone, Serialize)]
pub struct SharedReference {
    /// The node's shared id.
    #[serde(rename = "sharedId")]
    pub shared_id: NodeId,
}

/// A local value passed as a script argument.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ScriptArgument {
    /// A DOM node reference.
    Node(SharedReference),
    /// A primitive value.
    Primitive(Primitive),
}

/// Primitive script argument values in wire form.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Primitive {
    /// String value.
    String(String),
    /// Number value.
    Number(f64),
    /// Boolean value.
    Boolean(bool),
}

impl ScriptArgument {
    /// Creates a node-reference argument.
    #[inline]
    #[must_use]
    pub fn node(shared_id: NodeId) -> Self {
        Self::Node(SharedReference { shared_id })
    }

    /// Creates a string argument.
    #[inline]
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self::Primitive(Primitive::String(value.into()))
    }

    /// Creates a number argument.
    #[inline]
    #[must_use]
    pub fn number(value: f64) -> Self {
        Self::Primitive(Primitive::Number(value))
    }

    /// Creates a boolean argument.
    #[inline]
    #[must_use]
    pub fn boolean(value: bool) -> Self {
        Self::Primitive(Primitive::Boolean(value))
    }
}

/// Script module commands for JavaScript execution.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "method", content = "params")]
pub enum ScriptCommand {
    /// Evaluate an expression in a context.
    #[serde(rename = "script.evaluate")]
    Evaluate {
        /// JavaScript expression.
        expression: String,
        /// Execution target.
        target: Target,
        /// Await a returned promise.
        #[serde(rename = "awaitPromise")]
        await_promise: bool,
    },

    /// Call a function with arguments in a context.
    #[serde(rename = "script.callFunction")]
    CallFunction {
        /// Function declaration, e.g. `el => el.click()`.
        #[serde(rename = "functionDeclaration")]
        function_declaration: String,
        /// Execution target.
        target: Target,
        /// Await a returned promise.
        #[serde(rename = "awaitPromise")]
        await_promise: bool,
        /// Arguments passed to the function.
        #[serde(skip_serializing_if = "Vec::is_empty")]
        arguments: Vec<ScriptArgument>,
    },
}

// ============================================================================
// Input Commands
// ============================================================================

/// A single key action within a key source.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum KeyAction {
    /// Press a key.
    KeyDown {
        /// Key value (a single character or a control key codepoint).
        value: String,
    },
    /// Release a key.
    KeyUp {
        /// Key value.
        value: String,
    },
}

/// A single pointer action within a pointer source.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PointerAction {
    /// Move the pointer.
    PointerMove {
        /// X offset from the origin.
        x: i64,
        /// Y offset from the origin.
        y: i64,
        /// Move origin; `None` means the viewport.
        #[serde(skip_serializing_if = "Option::is_none")]
        origin: Option<ElementOrigin>,
    },
    /// Press a pointer button.
    PointerDown {
        /// Button index (0 = left).
        button: u64,
    },
    /// Release a pointer button.
    PointerUp {
        /// Button index (0 = left).
        button: u64,
    },
}

/// An element-relative origin for pointer moves.
#[derive(Debug, Clone, Serialize)]
pub struct ElementOrigin {
    /// Origin kind; always `"element"`.
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// The element to move relative to.
    pub element: SharedReference,
}

impl ElementOrigin {
    /// Creates an origin centered on the given node.
    #[inline]
    #[must_use]
    pub fn new(shared_id: NodeId) -> Self {
        Self {
            kind: "element",
            element: SharedReference { shared_id },
        }
    }
}

/// One input source and its action sequence.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SourceActions {
    /// A keyboard source.
    Key {
        /// Source id; stable across calls.
        id: String,
        /// Key actions in order.
        actions: Vec<KeyAction>,
    },
    /// A pointer source.
    Pointer {
        /// Source id; stable across calls.
        id: String,
        /// Pointer actions in order.
        actions: Vec<PointerAction>,
    },
}

impl SourceActions {
    /// Builds a keyboard source that types the given text.
    ///
    /// Each character gets a down/up pair, matching how a user types.
    #[must_use]
    pub fn typing(text: &str) -> Self {
        let mut actions = Vec::with_capacity(text.chars().count() * 2);
        for c in text.chars() {
            actions.push(KeyAction::KeyDown {
                value: c.to_string(),
            });
            actions.push(KeyAction::KeyUp {
                value: c.to_string(),
            });
        }

        Self::Key {
            id: "default keyboard".to_string(),
            actions,
        }
    }

    /// Builds a pointer source that moves onto the given node.
    #[must_use]
    pub fn hover(shared_id: NodeId) -> Self {
        Self::Pointer {
            id: "default mouse".to_string(),
            actions: vec![PointerAction::PointerMove {
                x: 0,
                y: 0,
                origin: Some(ElementOrigin::new(shared_id)),
            }],
        }
    }
}

/// Input module commands for synthesized user input.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "method", content = "params")]
pub enum InputCommand {
    /// Perform a sequence of input actions.
    #[serde(rename = "input.performActions")]
    PerformActions {
        /// Context receiving the input.
        context: BrowsingContextId,
        /// Input sources and their actions.
        actions: Vec<SourceActions>,
    },

    /// Release all depressed inputs.
    #[serde(rename = "input.releaseActions")]
    ReleaseActions {
        /// Context receiving the release.
        context: BrowsingContextId,
    },
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> BrowsingContextId {
        BrowsingContextId::new("ctx-1")
    }

    #[test]
    fn test_session_new() {
        let cmd = SessionCommand::New {
            capabilities: serde_json::json!({}),
        };
        let json = serde_json::to_value(&cmd).expect("serialize");
        assert_eq!(json["method"], "session.new");
        assert!(json["params"]["capabilities"].is_object());
    }

    #[test]
    fn test_session_end_has_empty_params() {
        let cmd = SessionCommand::End {};
        let json = serde_json::to_value(&cmd).expect("serialize");
        assert_eq!(json["method"], "session.end");
        assert!(json["params"].as_object().expect("params object").is_empty());
    }

    #[test]
    fn test_navigate() {
        let cmd = BrowsingContextCommand::Navigate {
            context: ctx(),
            url: "http://printer.example.com/".to_string(),
            wait: Readiness::Complete,
        };
        let json = serde_json::to_value(&cmd).expect("serialize");
        assert_eq!(json["method"], "browsingContext.navigate");
        assert_eq!(json["params"]["wait"], "complete");
        assert_eq!(json["params"]["context"], "ctx-1");
    }

    #[test]
    fn test_locate_nodes_css() {
        let cmd = BrowsingContextCommand::LocateNodes {
            context: ctx(),
            locator: Locator::Css("[name='entryindex']".to_string()),
            max_node_count: None,
            start_nodes: None,
        };
        let json = serde_json::to_value(&cmd).expect("serialize");
        assert_eq!(json["method"], "browsingContext.locateNodes");
        assert_eq!(json["params"]["locator"]["type"], "css");
        assert_eq!(json["params"]["locator"]["value"], "[name='entryindex']");
        assert!(json["params"].get("maxNodeCount").is_none());
    }

    #[test]
    fn test_locator_inner_text_tag() {
        let json = serde_json::to_value(Locator::InnerText("Login".to_string())).expect("serialize");
        assert_eq!(json["type"], "innerText");
    }

    #[test]
    fn test_call_function_with_node_argument() {
        let cmd = ScriptCommand::CallFunction {
            function_declaration: "el => el.click()".to_string(),
            target: Target { context: ctx() },
            await_promise: false,
            arguments: vec![ScriptArgument::node(NodeId::new("node-7"))],
        };
        let json = serde_json::to_value(&cmd).expect("serialize");
        assert_eq!(json["method"], "script.callFunction");
        assert_eq!(json["params"]["arguments"][0]["sharedId"], "node-7");
        assert_eq!(json["params"]["awaitPromise"], false);
    }

    #[test]
    fn test_string_argument_wire_shape() {
        let json = serde_json::to_value(ScriptArgument::string("maxlength")).expect("serialize");
        assert_eq!(json["type"], "string");
        assert_eq!(json["value"], "maxlength");
    }

    #[test]
    fn test_typing_actions_pair_down_up() {
        let source = SourceActions::typing("ab");
        let json = serde_json::to_value(&source).expect("serialize");
        let actions = json["actions"].as_array().expect("actions");
        assert_eq!(actions.len(), 4);
        assert_eq!(actions[0]["type"], "keyDown");
        assert_eq!(actions[0]["value"], "a");
        assert_eq!(actions[1]["type"], "keyUp");
        assert_eq!(actions[3]["value"], "b");
    }

    #[test]
    fn test_hover_pointer_origin() {
        let source = SourceActions::hover(NodeId::new("node-3"));
        let json = serde_json::to_value(&source).expect("serialize");
        assert_eq!(json["type"], "pointer");
        let mv = &json["actions"][0];
        assert_eq!(mv["type"], "pointerMove");
        assert_eq!(mv["origin"]["type"], "element");
        assert_eq!(mv["origin"]["element"]["sharedId"], "node-3");
    }

    #[test]
    fn test_perform_actions_envelope() {
        let cmd = InputCommand::PerformActions {
            context: ctx(),
            actions: vec![SourceActions::typing("x")],
        };
        let json = serde_json::to_value(&cmd).expect("serialize");
        assert_eq!(json["method"], "input.performActions");
        assert_eq!(json["params"]["actions"][0]["type"], "key");
    }
}
