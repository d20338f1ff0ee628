//! Terminal input module (engine-facing).
//!
//! This module is independent of any display backend. It turns `crossterm`
//! key events into application-defined domain events through an
//! [`ActionBinding`] table. Tables are either built in code or loaded from a
//! JSON object whose action names are resolved through an
//! [`ActionRegistry`] supplied by the application.

pub mod keys;
pub mod map;

pub use keys::KeyStroke;
pub use map::{ActionBinding, ActionRegistry};

/// Errors raised while building a binding table.
#[derive(Debug, thiserror::Error)]
pub enum BindingError {
    #[error("unknown key {0:?}")]
    UnknownKey(String),
    #[error("key {key:?} is bound to unknown action {action:?}")]
    UnknownAction { key: String, action: String },
    #[error("invalid binding table: {0}")]
    Json(#[from] serde_json::Error),
}
