//! Key-sequence remapping
//!
//! This module turns typed key sequences into other key sequences:
//! - Buffers the most recent keys per engine
//! - Matches the buffer against ordered `before → after` bindings
//! - Reverts the keys already typed in insert mode, then replays `after`
//! - Guards against cascading remaps with a shared remapping flag
//!
//! # Architecture
//!
//! ```text
//! Key → Remappers::submit() → Remapper::detect() (mode gate → KeyBuffer → find_binding)
//!     → PendingRemap::apply() → UndoCompensator::undo_keystrokes()
//!                             → ReplaySink::replay_key() × after.len()
//!                               (recursive: back into Remappers first)
//!     → Remapper::finish()
//! ```
//!
//! # Usage
//!
//! ```ignore
//! let mut remapper = Remapper::for_scope(RemapScope::INSERT_NON_RECURSIVE, bindings);
//! let consumed = remapper.submit(&key, host.current_mode(), &mut ctx, &mut host)?;
//! if !consumed {
//!     host.apply(key);
//! }
//! ```

mod binding;
mod buffer;
mod context;
mod error;
mod matcher;
mod remapper;
mod remappers;
mod types;

pub use binding::{validate_bindings, EngineConfig, KeyBinding};
pub use buffer::KeyBuffer;
pub use context::{DispatchContext, ModeSource, RemapHost, ReplaySink, UndoCompensator};
pub use error::RemapError;
pub use matcher::find_binding;
pub use remapper::{PendingRemap, Remapper};
pub use remappers::{Remappers, MAX_REPLAY_DEPTH};
pub use types::{keys, Key, Mode, ModeGroup, RemapScope};
