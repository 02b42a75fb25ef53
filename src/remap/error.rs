//! Errors raised while loading bindings or dispatching a remap

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RemapError {
    /// A binding's `before` sequence is empty
    #[error("binding #{index} has an empty `before` sequence")]
    EmptyBefore { index: usize },

    #[error("IO error: {0}")]
    Io(String),

    #[error("Parse error: {0}")]
    Parse(String),

    /// The replay sink failed to apply a key
    #[error("replay of `{key}` failed: {reason}")]
    Replay { key: String, reason: String },

    /// The undo compensator failed to revert typed keys
    #[error("undo of {count} keystroke(s) failed: {reason}")]
    Undo { count: usize, reason: String },

    /// Recursive bindings kept replaying into each other
    #[error("remapping `{key}` exceeded {depth} nested replays")]
    RecursionLimit { key: String, depth: usize },
}
