//! Dispatch context and the host-side collaborators of a remapper
//!
//! The remapper owns no editor state. It reads the mode from a
//! [`ModeSource`], reverts typed keys through an [`UndoCompensator`] and
//! replays substituted keys through a [`ReplaySink`].

use super::error::RemapError;
use super::types::{Key, Mode};

/// State shared by every remapper a host dispatches through
///
/// Engines interfere with each other only when the host hands them the same
/// context instance.
#[derive(Debug, Clone, Default)]
pub struct DispatchContext {
    is_remapping: bool,
}

impl DispatchContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a non-recursive replay is in progress
    ///
    /// Advisory: hosts are expected to skip remap submission while set.
    pub fn is_remapping(&self) -> bool {
        self.is_remapping
    }

    pub fn set_remapping(&mut self, remapping: bool) {
        self.is_remapping = remapping;
    }
}

/// Reports the currently active mode
pub trait ModeSource {
    fn current_mode(&self) -> Mode;
}

/// Applies replayed keys, one at a time
pub trait ReplaySink {
    /// Apply `key` and return once all of its effects are done
    fn replay_key(&mut self, key: &Key, ctx: &mut DispatchContext) -> Result<(), RemapError>;
}

/// Reverts the effects of recently typed keys
pub trait UndoCompensator {
    fn undo_keystrokes(&mut self, count: usize) -> Result<(), RemapError>;

    /// Called before each key is offered to the remappers, replayed keys
    /// included. Undo counts are in units of these calls.
    fn record_keystroke(&mut self) {}
}

/// Everything a remapper needs from its host
pub trait RemapHost: ModeSource + ReplaySink + UndoCompensator {}

impl<T: ModeSource + ReplaySink + UndoCompensator + ?Sized> RemapHost for T {}
