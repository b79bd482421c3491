//! WebDriver BiDi protocol types.
//!
//! Commands follow the `module.methodName` format of the WebDriver
//! BiDi specification and are serialized as
//! `{"id": n, "method": "...", "params": {...}}`.
//!
//! # Command Modules
//!
//! | Module | Commands |
//! |--------|----------|
//! | `session` | New, end |
//! | `browsingContext` | Tree, navigation, node location |
//! | `script` | Evaluate, call function |
//! | `input` | Key and pointer actions |

// ============================================================================
// Submodules
// ============================================================================

mod command;
mod message;

// ============================================================================
// Re-exports
// ============================================================================

pub use command::{
    BrowsingContextCommand, Command, ElementOrigin, InputCommand, KeyAction, Locator,
    PointerAction, Primitive, Readiness, ScriptArgument, ScriptCommand, SessionCommand,
    SharedReference, SourceActions, Target,
};
pub use message::{Event, Request, Response, ResponseType};
