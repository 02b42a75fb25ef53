//! Remapper: mode gate, match detection and replay of substituted keys

use super::binding::{EngineConfig, KeyBinding};
use super::buffer::KeyBuffer;
use super::context::{DispatchContext, ReplaySink, UndoCompensator};
use super::error::RemapError;
use super::matcher::find_binding;
use super::types::{Key, Mode, RemapScope};

/// One remapping engine governing a fixed set of modes
///
/// # Preconditions
///
/// Only one [`Remapper::submit`] may be in flight at a time. Replay runs
/// through the host while the engine is mid-dispatch, so a second key must
/// not be submitted until the first call has returned.
#[derive(Debug, Clone)]
pub struct Remapper {
    config: EngineConfig,
    buffer: KeyBuffer,
}

impl Remapper {
    pub fn new(config: EngineConfig) -> Self {
        let buffer = KeyBuffer::with_capacity(config.longest_sequence());
        Self { config, buffer }
    }

    /// Engine for one of the four named scopes
    pub fn for_scope(scope: RemapScope, bindings: Vec<KeyBinding>) -> Self {
        Self::new(EngineConfig::for_scope(scope, bindings))
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Whether this engine governs `mode`
    pub fn accepts(&self, mode: Mode) -> bool {
        self.config.modes().contains(&mode)
    }

    /// Keys typed so far that may still complete a binding
    pub fn pending_keys(&self) -> Vec<Key> {
        self.buffer.iter().cloned().collect()
    }

    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Clear any partially typed sequence
    pub fn reset(&mut self) {
        self.buffer.reset();
    }

    /// Offer a key to this engine
    ///
    /// Returns `Ok(true)` when the key completed a binding and was replaced by
    /// the binding's `after` sequence; the host must then suppress the key's
    /// normal effect. `Ok(false)` means the host should process it normally.
    ///
    /// For engines governing insert mode, every buffered key is reverted
    /// before replay, including unmatched keys typed ahead of the matching
    /// suffix. Non-recursive engines hold `ctx`'s remapping flag for the
    /// duration of the replay. The flag is cleared and the buffer reset on
    /// every return path, including when the host fails.
    pub fn submit<H>(
        &mut self,
        key: &Key,
        mode: Mode,
        ctx: &mut DispatchContext,
        host: &mut H,
    ) -> Result<bool, RemapError>
    where
        H: ReplaySink + UndoCompensator + ?Sized,
    {
        let Some(remap) = self.detect(key, mode) else {
            return Ok(false);
        };
        let applied = remap.apply(ctx, host);
        self.finish(&remap, applied)
    }

    /// Buffer `key` and report the binding it completes, if any
    ///
    /// The buffer keeps the matched keys until [`Remapper::finish`], so keys
    /// replayed back into this engine extend the same window.
    pub fn detect(&mut self, key: &Key, mode: Mode) -> Option<PendingRemap> {
        if !self.accepts(mode) {
            if !self.buffer.is_empty() {
                tracing::debug!("Mode {} not remapped, discarding pending keys", mode);
            }
            self.buffer.reset();
            return None;
        }

        self.buffer.append(key.clone());

        let Some(binding) = find_binding(
            self.config.bindings(),
            self.buffer.keys(),
            self.config.longest_sequence(),
        ) else {
            tracing::trace!("No binding for {:?}", self.buffer.keys());
            return None;
        };

        tracing::debug!(
            "Remapping {} in {} mode (recursive: {})",
            binding.display_string(),
            mode,
            self.config.recursive()
        );

        Some(PendingRemap {
            binding: binding.clone(),
            undo_count: self
                .config
                .reverts_typed_keys()
                .then_some(self.buffer.len()),
            recursive: self.config.recursive(),
        })
    }

    /// Release the buffer once a detected remap has been applied
    pub fn finish(
        &mut self,
        remap: &PendingRemap,
        applied: Result<(), RemapError>,
    ) -> Result<bool, RemapError> {
        self.buffer.reset();

        if let Err(ref e) = applied {
            tracing::warn!("Remap {} failed: {}", remap.binding.display_string(), e);
        }
        applied.map(|()| true)
    }
}

/// A binding completed by the last key, not yet applied
#[derive(Debug, Clone)]
pub struct PendingRemap {
    binding: KeyBinding,
    undo_count: Option<usize>,
    recursive: bool,
}

impl PendingRemap {
    pub fn binding(&self) -> &KeyBinding {
        &self.binding
    }

    /// Number of typed keys to revert before replay, if any
    pub fn undo_count(&self) -> Option<usize> {
        self.undo_count
    }

    pub fn is_recursive(&self) -> bool {
        self.recursive
    }

    /// Revert typed keys, then replay `after` through `host`
    ///
    /// A failed undo returns before the remapping flag is raised. Once raised,
    /// the flag is lowered whether or not the replay succeeds.
    pub fn apply<H>(&self, ctx: &mut DispatchContext, host: &mut H) -> Result<(), RemapError>
    where
        H: ReplaySink + UndoCompensator + ?Sized,
    {
        if let Some(count) = self.undo_count {
            host.undo_keystrokes(count)?;
        }

        if !self.recursive {
            ctx.set_remapping(true);
        }

        let replayed = self
            .binding
            .after()
            .iter()
            .try_for_each(|key| host.replay_key(key, ctx));

        ctx.set_remapping(false);
        replayed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remap::types::keys;

    /// Host that records every call in order
    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
        flag_during_replay: Vec<bool>,
        fail_on: Option<Key>,
        fail_undo: bool,
    }

    impl ReplaySink for Recorder {
        fn replay_key(&mut self, key: &Key, ctx: &mut DispatchContext) -> Result<(), RemapError> {
            self.flag_during_replay.push(ctx.is_remapping());
            if self.fail_on.as_ref() == Some(key) {
                return Err(RemapError::Replay {
                    key: key.to_string(),
                    reason: "refused".to_string(),
                });
            }
            self.events.push(format!("replay {}", key));
            Ok(())
        }
    }

    impl UndoCompensator for Recorder {
        fn undo_keystrokes(&mut self, count: usize) -> Result<(), RemapError> {
            if self.fail_undo {
                return Err(RemapError::Undo {
                    count,
                    reason: "history unavailable".to_string(),
                });
            }
            self.events.push(format!("undo {}", count));
            Ok(())
        }
    }

    fn insert_engine(before: &[&str], after: &[&str], recursive: bool) -> Remapper {
        let scope = if recursive {
            RemapScope::INSERT
        } else {
            RemapScope::INSERT_NON_RECURSIVE
        };
        let binding =
            KeyBinding::new(keys(before.iter().copied()), keys(after.iter().copied())).unwrap();
        Remapper::for_scope(scope, vec![binding])
    }

    #[test]
    fn test_jj_to_escape() {
        let mut engine = insert_engine(&["j", "j"], &["Escape"], false);
        let mut ctx = DispatchContext::new();
        let mut host = Recorder::default();

        let first = engine.submit(&Key::from("j"), Mode::Insert, &mut ctx, &mut host);
        assert_eq!(first, Ok(false));
        assert_eq!(engine.pending_keys(), keys(["j"]));

        let second = engine.submit(&Key::from("j"), Mode::Insert, &mut ctx, &mut host);
        assert_eq!(second, Ok(true));
        assert_eq!(host.events, vec!["undo 2", "replay Escape"]);
        assert_eq!(host.flag_during_replay, vec![true]);
        assert!(!ctx.is_remapping());
        assert!(engine.pending_keys().is_empty());
    }

    #[test]
    fn test_recursive_engine_leaves_flag_clear() {
        let mut engine = insert_engine(&["j", "j"], &["Escape"], true);
        let mut ctx = DispatchContext::new();
        let mut host = Recorder::default();

        engine.submit(&Key::from("j"), Mode::Insert, &mut ctx, &mut host).unwrap();
        engine.submit(&Key::from("j"), Mode::Insert, &mut ctx, &mut host).unwrap();

        assert_eq!(host.flag_during_replay, vec![false]);
    }

    #[test]
    fn test_other_modes_engine_does_not_undo() {
        let binding = KeyBinding::new(keys(["g", "h"]), keys(["0"])).unwrap();
        let mut engine = Remapper::for_scope(RemapScope::OTHER_MODES, vec![binding]);
        let mut ctx = DispatchContext::new();
        let mut host = Recorder::default();

        engine.submit(&Key::from("g"), Mode::Normal, &mut ctx, &mut host).unwrap();
        let consumed = engine.submit(&Key::from("h"), Mode::Normal, &mut ctx, &mut host);

        assert_eq!(consumed, Ok(true));
        assert_eq!(host.events, vec!["replay 0"]);
    }

    #[test]
    fn test_mode_gate_resets_buffer() {
        let mut engine = insert_engine(&["j", "k"], &["Escape"], false);
        let mut ctx = DispatchContext::new();
        let mut host = Recorder::default();

        engine.submit(&Key::from("j"), Mode::Insert, &mut ctx, &mut host).unwrap();
        assert_eq!(engine.pending_keys().len(), 1);

        let consumed = engine.submit(&Key::from("k"), Mode::Normal, &mut ctx, &mut host);
        assert_eq!(consumed, Ok(false));
        assert!(engine.pending_keys().is_empty());

        // The prefix typed before the mode switch does not carry over
        let consumed = engine.submit(&Key::from("k"), Mode::Insert, &mut ctx, &mut host);
        assert_eq!(consumed, Ok(false));
        assert!(host.events.is_empty());
    }

    #[test]
    fn test_replay_failure_releases_flag_and_buffer() {
        let mut engine = insert_engine(&["j", "j"], &["a", "b"], false);
        let mut ctx = DispatchContext::new();
        let mut host = Recorder {
            fail_on: Some(Key::from("a")),
            ..Default::default()
        };

        engine.submit(&Key::from("j"), Mode::Insert, &mut ctx, &mut host).unwrap();
        let result = engine.submit(&Key::from("j"), Mode::Insert, &mut ctx, &mut host);

        assert!(matches!(result, Err(RemapError::Replay { .. })));
        assert!(!ctx.is_remapping());
        assert!(engine.pending_keys().is_empty());
        // Replay stops at the failing key
        assert_eq!(host.events, vec!["undo 2"]);
    }

    #[test]
    fn test_empty_after_consumes_key() {
        let mut engine = insert_engine(&["q"], &[], false);
        let mut ctx = DispatchContext::new();
        let mut host = Recorder::default();

        let consumed = engine.submit(&Key::from("q"), Mode::Insert, &mut ctx, &mut host);
        assert_eq!(consumed, Ok(true));
        assert_eq!(host.events, vec!["undo 1"]);
    }

    #[test]
    fn test_undo_failure_skips_replay_and_releases_state() {
        let mut engine = insert_engine(&["j", "j"], &["Escape"], false);
        let mut ctx = DispatchContext::new();
        let mut host = Recorder {
            fail_undo: true,
            ..Default::default()
        };

        engine.submit(&Key::from("j"), Mode::Insert, &mut ctx, &mut host).unwrap();
        let result = engine.submit(&Key::from("j"), Mode::Insert, &mut ctx, &mut host);

        assert!(matches!(result, Err(RemapError::Undo { count: 2, .. })));
        assert!(host.events.is_empty());
        assert!(host.flag_during_replay.is_empty());
        assert!(!ctx.is_remapping());
        assert!(engine.pending_keys().is_empty());
    }

    #[test]
    fn test_detect_keeps_window_until_finish() {
        let mut engine = insert_engine(&["j", "j"], &["Escape"], true);

        assert!(engine.detect(&Key::from("j"), Mode::Insert).is_none());
        let remap = engine.detect(&Key::from("j"), Mode::Insert).unwrap();

        assert_eq!(remap.undo_count(), Some(2));
        assert!(remap.is_recursive());
        assert_eq!(engine.pending_keys(), keys(["j", "j"]));

        assert_eq!(engine.finish(&remap, Ok(())), Ok(true));
        assert!(engine.pending_keys().is_empty());
    }
}
