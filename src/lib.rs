//! keyremap - key-sequence remapping for modal editors
//!
//! Watches the keys typed in each mode, detects configured `before → after`
//! sequences and replays the replacement through the host editor.

pub mod cli;
pub mod config;
pub mod config_paths;
pub mod editor;
pub mod remap;
pub mod session;
pub mod tracing;

// Re-export commonly used types
pub use config::RemapConfig;
pub use remap::{DispatchContext, Key, KeyBinding, Mode, RemapError, Remapper, Remappers};
pub use session::Session;
