//! Core types for the remap system: Key, Mode, ModeGroup, RemapScope

use std::fmt;

use serde::Deserialize;

/// An opaque key token
///
/// The remapper never interprets a key; two keys are the same key iff their
/// tokens are equal. `"<Esc>"` and `"Escape"` are different keys.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct Key(String);

impl Key {
    /// Create a key from any token
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The single character this key stands for, if it is exactly one char
    pub fn as_char(&self) -> Option<char> {
        let mut chars = self.0.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        }
    }
}

impl From<&str> for Key {
    fn from(token: &str) -> Self {
        Self(token.to_string())
    }
}

impl From<String> for Key {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Build a key sequence from string tokens
pub fn keys<I, S>(tokens: I) -> Vec<Key>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    tokens.into_iter().map(Key::new).collect()
}

/// Interaction mode reported by the editor host
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Normal,
    Insert,
    Visual,
    VisualLine,
    VisualBlock,
    Replace,
    SearchInProgress,
}

impl Mode {
    pub fn name(self) -> &'static str {
        match self {
            Mode::Normal => "normal",
            Mode::Insert => "insert",
            Mode::Visual => "visual",
            Mode::VisualLine => "visual_line",
            Mode::VisualBlock => "visual_block",
            Mode::Replace => "replace",
            Mode::SearchInProgress => "search_in_progress",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "normal" => Ok(Mode::Normal),
            "insert" => Ok(Mode::Insert),
            "visual" => Ok(Mode::Visual),
            "visual_line" | "visualline" => Ok(Mode::VisualLine),
            "visual_block" | "visualblock" => Ok(Mode::VisualBlock),
            "replace" => Ok(Mode::Replace),
            "search_in_progress" | "search" => Ok(Mode::SearchInProgress),
            other => Err(format!("Unknown mode: {}", other)),
        }
    }
}

/// The two logical groups a binding table can govern
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ModeGroup {
    /// Insertion-style input: typed keys insert content
    Insert,
    /// Command-style input
    OtherModes,
}

impl ModeGroup {
    /// Modes an engine for this group applies to
    pub fn modes(self) -> &'static [Mode] {
        match self {
            ModeGroup::Insert => &[Mode::Insert],
            ModeGroup::OtherModes => &[Mode::Normal, Mode::Visual, Mode::VisualLine],
        }
    }
}

/// One of the four named configuration scopes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RemapScope {
    pub group: ModeGroup,
    pub recursive: bool,
}

impl RemapScope {
    pub const INSERT: RemapScope = RemapScope::new(ModeGroup::Insert, true);
    pub const INSERT_NON_RECURSIVE: RemapScope = RemapScope::new(ModeGroup::Insert, false);
    pub const OTHER_MODES: RemapScope = RemapScope::new(ModeGroup::OtherModes, true);
    pub const OTHER_MODES_NON_RECURSIVE: RemapScope =
        RemapScope::new(ModeGroup::OtherModes, false);

    /// All scopes, in the order a host offers keys to them
    pub const ALL: [RemapScope; 4] = [
        RemapScope::INSERT,
        RemapScope::OTHER_MODES,
        RemapScope::INSERT_NON_RECURSIVE,
        RemapScope::OTHER_MODES_NON_RECURSIVE,
    ];

    pub const fn new(group: ModeGroup, recursive: bool) -> Self {
        Self { group, recursive }
    }

    /// Name of this scope in the configuration file
    pub fn config_key(self) -> &'static str {
        match (self.group, self.recursive) {
            (ModeGroup::Insert, true) => "insertModeKeyBindings",
            (ModeGroup::Insert, false) => "insertModeKeyBindingsNonRecursive",
            (ModeGroup::OtherModes, true) => "otherModesKeyBindings",
            (ModeGroup::OtherModes, false) => "otherModesKeyBindingsNonRecursive",
        }
    }
}

impl fmt::Display for RemapScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.config_key())
    }
}
