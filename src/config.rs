//! Remap configuration loading
//!
//! Bindings live in `~/.config/keyremap/remap.yaml` under four top-level keys,
//! one per scope:
//!
//! ```yaml
//! insertModeKeyBindings:
//!   - before: ["j", "j"]
//!     after: ["<Esc>"]
//! otherModesKeyBindingsNonRecursive:
//!   - before: ["<leader>", "w"]
//!     after: [":", "w", "<CR>"]
//! ```
//!
//! Missing keys mean no bindings for that scope. Entries with an empty
//! `before` are dropped at load time and kept as rejections on the config.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::remap::{validate_bindings, Key, KeyBinding, ModeGroup, RemapError, RemapScope};

/// Default configuration embedded at compile time
pub const DEFAULT_REMAP_YAML: &str = include_str!("../remap.yaml");

/// Root structure of a remap YAML file
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemapFile {
    #[serde(default)]
    pub insert_mode_key_bindings: Vec<BindingConfig>,
    #[serde(default)]
    pub insert_mode_key_bindings_non_recursive: Vec<BindingConfig>,
    #[serde(default)]
    pub other_modes_key_bindings: Vec<BindingConfig>,
    #[serde(default)]
    pub other_modes_key_bindings_non_recursive: Vec<BindingConfig>,
}

impl RemapFile {
    fn take_scope(&mut self, scope: RemapScope) -> Vec<BindingConfig> {
        let entries = match (scope.group, scope.recursive) {
            (ModeGroup::Insert, true) => &mut self.insert_mode_key_bindings,
            (ModeGroup::Insert, false) => &mut self.insert_mode_key_bindings_non_recursive,
            (ModeGroup::OtherModes, true) => &mut self.other_modes_key_bindings,
            (ModeGroup::OtherModes, false) => &mut self.other_modes_key_bindings_non_recursive,
        };
        std::mem::take(entries)
    }
}

/// A single binding entry from YAML
#[derive(Debug, Deserialize)]
pub struct BindingConfig {
    pub before: Vec<Key>,
    #[serde(default)]
    pub after: Vec<Key>,
}

/// A configured binding that failed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedBinding {
    pub scope: RemapScope,
    pub error: RemapError,
}

/// Validated bindings for all four scopes
#[derive(Debug, Clone, Default)]
pub struct RemapConfig {
    scopes: HashMap<RemapScope, Vec<KeyBinding>>,
    rejected: Vec<RejectedBinding>,
}

impl RemapConfig {
    /// Configuration with no bindings at all
    pub fn empty() -> Self {
        Self::default()
    }

    /// Replace the bindings of one scope (builder pattern)
    pub fn with_bindings(mut self, scope: RemapScope, bindings: Vec<KeyBinding>) -> Self {
        self.scopes.insert(scope, bindings);
        self
    }

    /// Bindings for `scope`, in configured order
    pub fn bindings(&self, scope: RemapScope) -> &[KeyBinding] {
        self.scopes.get(&scope).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Entries dropped at load time
    pub fn rejected(&self) -> &[RejectedBinding] {
        &self.rejected
    }

    /// Total number of active bindings across scopes
    pub fn len(&self) -> usize {
        self.scopes.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Load the user's config file, or the embedded defaults if there is none
    ///
    /// A file that fails to read or parse is logged and ignored.
    pub fn load() -> Self {
        if let Some(path) = crate::config_paths::remap_file() {
            if path.exists() {
                match load_remap_file(&path) {
                    Ok(config) => {
                        tracing::info!(
                            "Loaded remap config from {} ({} bindings)",
                            path.display(),
                            config.len()
                        );
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load remap config at {}: {}", path.display(), e);
                    }
                }
            } else {
                tracing::debug!("Remap config not found at {}, using defaults", path.display());
            }
        } else {
            tracing::debug!("No config directory available, using defaults");
        }

        Self::defaults()
    }

    /// The embedded default configuration
    pub fn defaults() -> Self {
        parse_remap_yaml(DEFAULT_REMAP_YAML).unwrap_or_else(|e| {
            tracing::warn!("Failed to parse embedded remap config: {}", e);
            Self::empty()
        })
    }
}

/// Load remap configuration from a YAML file
pub fn load_remap_file(path: &Path) -> Result<RemapConfig, RemapError> {
    let content = std::fs::read_to_string(path).map_err(|e| RemapError::Io(e.to_string()))?;

    parse_remap_yaml(&content)
}

/// Parse remap configuration from a YAML string
pub fn parse_remap_yaml(yaml: &str) -> Result<RemapConfig, RemapError> {
    // A document without content deserializes as unit, not as an empty mapping
    let blank = yaml.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#')
    });
    let mut file: RemapFile = if blank {
        RemapFile::default()
    } else {
        serde_yaml::from_str(yaml).map_err(|e| RemapError::Parse(e.to_string()))?
    };

    let mut config = RemapConfig::empty();
    for scope in RemapScope::ALL {
        let entries = file.take_scope(scope);
        let (bindings, rejected) =
            validate_bindings(entries.into_iter().map(|entry| (entry.before, entry.after)));

        for error in rejected {
            tracing::warn!("{}: {}", scope, error);
            config.rejected.push(RejectedBinding { scope, error });
        }
        config.scopes.insert(scope, bindings);
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remap::keys;

    #[test]
    fn test_parse_all_scopes() {
        let yaml = r#"
insertModeKeyBindings:
  - before: ["j", "j"]
    after: ["<Esc>"]
insertModeKeyBindingsNonRecursive:
  - before: ["k", "k"]
    after: ["<Esc>"]
otherModesKeyBindings:
  - before: ["g", "h"]
    after: ["0"]
otherModesKeyBindingsNonRecursive:
  - before: ["Y"]
    after: ["y", "$"]
"#;

        let config = parse_remap_yaml(yaml).unwrap();
        assert_eq!(config.len(), 4);
        assert_eq!(
            config.bindings(RemapScope::INSERT)[0].before(),
            keys(["j", "j"]).as_slice()
        );
        assert_eq!(
            config.bindings(RemapScope::OTHER_MODES_NON_RECURSIVE)[0].after(),
            keys(["y", "$"]).as_slice()
        );
        assert!(config.rejected().is_empty());
    }

    #[test]
    fn test_missing_scopes_are_empty() {
        let yaml = r#"
otherModesKeyBindings:
  - before: ["g", "h"]
    after: ["0"]
"#;

        let config = parse_remap_yaml(yaml).unwrap();
        assert!(config.bindings(RemapScope::INSERT).is_empty());
        assert_eq!(config.bindings(RemapScope::OTHER_MODES).len(), 1);
    }

    #[test]
    fn test_after_defaults_to_empty() {
        let yaml = r#"
insertModeKeyBindings:
  - before: ["<F1>"]
"#;

        let config = parse_remap_yaml(yaml).unwrap();
        assert!(config.bindings(RemapScope::INSERT)[0].after().is_empty());
    }

    #[test]
    fn test_empty_before_is_dropped_and_reported() {
        let yaml = r#"
insertModeKeyBindings:
  - before: []
    after: ["x"]
  - before: ["j", "j"]
    after: ["<Esc>"]
"#;

        let config = parse_remap_yaml(yaml).unwrap();
        assert_eq!(config.bindings(RemapScope::INSERT).len(), 1);
        assert_eq!(
            config.rejected(),
            &[RejectedBinding {
                scope: RemapScope::INSERT,
                error: RemapError::EmptyBefore { index: 0 },
            }]
        );
    }

    #[test]
    fn test_invalid_yaml() {
        let result = parse_remap_yaml("insertModeKeyBindings: 12");
        assert!(matches!(result, Err(RemapError::Parse(_))));
    }

    #[test]
    fn test_empty_document() {
        assert!(parse_remap_yaml("").unwrap().is_empty());
        assert!(parse_remap_yaml("# nothing yet\n").unwrap().is_empty());
    }

    #[test]
    fn test_embedded_defaults_parse() {
        let config = parse_remap_yaml(DEFAULT_REMAP_YAML).unwrap();
        assert!(config.rejected().is_empty());
    }
}
