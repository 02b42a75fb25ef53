//! Binding table: configured `before → after` key sequences

use super::error::RemapError;
use super::types::{Key, Mode, RemapScope};

/// A single binding replacing one key sequence with another
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBinding {
    before: Vec<Key>,
    after: Vec<Key>,
}

impl KeyBinding {
    /// Create a binding; `before` must hold at least one key
    pub fn new(before: Vec<Key>, after: Vec<Key>) -> Result<Self, RemapError> {
        if before.is_empty() {
            return Err(RemapError::EmptyBefore { index: 0 });
        }
        Ok(Self { before, after })
    }

    /// The sequence that triggers this binding
    pub fn before(&self) -> &[Key] {
        &self.before
    }

    /// The sequence replayed in its place
    pub fn after(&self) -> &[Key] {
        &self.after
    }

    /// Get display string for this binding, e.g. `j j → <Esc>`
    pub fn display_string(&self) -> String {
        format!("{} → {}", join(&self.before), join(&self.after))
    }
}

fn join(keys: &[Key]) -> String {
    keys.iter()
        .map(Key::as_str)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Keep valid bindings in order and report the rejected ones
///
/// Each rejection carries the index of the entry in `raw`.
pub fn validate_bindings<I>(raw: I) -> (Vec<KeyBinding>, Vec<RemapError>)
where
    I: IntoIterator<Item = (Vec<Key>, Vec<Key>)>,
{
    let mut bindings = Vec::new();
    let mut rejected = Vec::new();

    for (index, (before, after)) in raw.into_iter().enumerate() {
        match KeyBinding::new(before, after) {
            Ok(binding) => bindings.push(binding),
            Err(_) => {
                tracing::warn!("Dropping binding #{}: empty `before` sequence", index);
                rejected.push(RemapError::EmptyBefore { index });
            }
        }
    }

    (bindings, rejected)
}

/// Immutable configuration of one remapper instance
#[derive(Debug, Clone)]
pub struct EngineConfig {
    bindings: Vec<KeyBinding>,
    modes: Vec<Mode>,
    recursive: bool,
}

impl EngineConfig {
    pub fn new(bindings: Vec<KeyBinding>, modes: Vec<Mode>, recursive: bool) -> Self {
        Self {
            bindings,
            modes,
            recursive,
        }
    }

    /// Configuration for one of the four named scopes
    pub fn for_scope(scope: RemapScope, bindings: Vec<KeyBinding>) -> Self {
        Self::new(bindings, scope.group.modes().to_vec(), scope.recursive)
    }

    /// Bindings in precedence order
    pub fn bindings(&self) -> &[KeyBinding] {
        &self.bindings
    }

    pub fn modes(&self) -> &[Mode] {
        &self.modes
    }

    pub fn recursive(&self) -> bool {
        self.recursive
    }

    /// Whether keys typed in the governed modes insert content
    pub fn reverts_typed_keys(&self) -> bool {
        self.modes.contains(&Mode::Insert)
    }

    /// Length of the longest `before` sequence, at least 1
    pub fn longest_sequence(&self) -> usize {
        self.bindings
            .iter()
            .map(|b| b.before.len())
            .max()
            .unwrap_or(1)
            .max(1)
    }
}
