//! The four scoped remappers a host dispatches keys through

use super::binding::KeyBinding;
use super::context::{DispatchContext, RemapHost, ReplaySink, UndoCompensator};
use super::error::RemapError;
use super::remapper::Remapper;
use super::types::{Key, RemapScope};
use crate::config::RemapConfig;

/// Nested replays allowed before a chain of recursive bindings is abandoned
pub const MAX_REPLAY_DEPTH: usize = 100;

/// One remapper per configuration scope, in dispatch order
#[derive(Debug, Clone)]
pub struct Remappers {
    engines: Vec<Remapper>,
}

impl Remappers {
    /// Build engines for every scope from a loaded configuration
    pub fn from_config(config: &RemapConfig) -> Self {
        Self::from_scopes(
            RemapScope::ALL
                .into_iter()
                .map(|scope| (scope, config.bindings(scope).to_vec())),
        )
    }

    /// Build engines from explicit per-scope bindings; scopes keep the order given
    pub fn from_scopes<I>(scopes: I) -> Self
    where
        I: IntoIterator<Item = (RemapScope, Vec<KeyBinding>)>,
    {
        let engines = scopes
            .into_iter()
            .map(|(scope, bindings)| Remapper::for_scope(scope, bindings))
            .collect();
        Self { engines }
    }

    pub fn engines(&self) -> &[Remapper] {
        &self.engines
    }

    /// Discard partially typed sequences in every engine
    pub fn reset(&mut self) {
        self.engines.iter_mut().for_each(Remapper::reset);
    }

    /// Offer a key to each engine in turn until one consumes it
    ///
    /// Nothing is submitted while `ctx` reports a replay in progress. The mode
    /// is polled from the host before each engine sees the key.
    pub fn submit<H>(
        &mut self,
        key: &Key,
        ctx: &mut DispatchContext,
        host: &mut H,
    ) -> Result<bool, RemapError>
    where
        H: RemapHost + ?Sized,
    {
        host.record_keystroke();
        if ctx.is_remapping() {
            return Ok(false);
        }
        self.dispatch(key, ctx, host, 0)
    }

    fn dispatch<H>(
        &mut self,
        key: &Key,
        ctx: &mut DispatchContext,
        host: &mut H,
        depth: usize,
    ) -> Result<bool, RemapError>
    where
        H: RemapHost + ?Sized,
    {
        for index in 0..self.engines.len() {
            let mode = host.current_mode();
            let Some(remap) = self.engines[index].detect(key, mode) else {
                continue;
            };

            let mut replay = Replay {
                remappers: &mut *self,
                host: &mut *host,
                depth: depth + 1,
            };
            let applied = remap.apply(ctx, &mut replay);
            return self.engines[index].finish(&remap, applied);
        }
        Ok(false)
    }
}

/// Replay target handed to a matching engine
///
/// Replayed keys go back through every engine, the replaying one included,
/// before they reach the host. Non-recursive replays raise the remapping flag
/// and so skip straight to the host.
struct Replay<'a, H: ?Sized> {
    remappers: &'a mut Remappers,
    host: &'a mut H,
    depth: usize,
}

impl<H: RemapHost + ?Sized> ReplaySink for Replay<'_, H> {
    fn replay_key(&mut self, key: &Key, ctx: &mut DispatchContext) -> Result<(), RemapError> {
        self.host.record_keystroke();
        if !ctx.is_remapping() {
            if self.depth >= MAX_REPLAY_DEPTH {
                return Err(RemapError::RecursionLimit {
                    key: key.to_string(),
                    depth: MAX_REPLAY_DEPTH,
                });
            }
            if self
                .remappers
                .dispatch(key, ctx, &mut *self.host, self.depth)?
            {
                return Ok(());
            }
        }
        self.host.replay_key(key, ctx)
    }
}

impl<H: RemapHost + ?Sized> UndoCompensator for Replay<'_, H> {
    fn undo_keystrokes(&mut self, count: usize) -> Result<(), RemapError> {
        self.host.undo_keystrokes(count)
    }

    fn record_keystroke(&mut self) {
        self.host.record_keystroke();
    }
}
