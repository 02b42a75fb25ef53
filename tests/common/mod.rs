//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use keyremap::config::parse_remap_yaml;
use keyremap::editor::ScratchEditor;
use keyremap::remap::{keys, Mode};
use keyremap::Session;

/// Create a session from YAML config, with the editor in `mode` holding `text`
pub fn test_session(yaml: &str, mode: Mode, text: &str) -> Session {
    let config = parse_remap_yaml(yaml).expect("test config should parse");
    let mut editor = ScratchEditor::with_text(text);
    editor.set_mode(mode);
    Session::with_editor(&config, editor)
}

/// Send whitespace-separated key tokens, returning how many were remapped
pub fn type_keys(session: &mut Session, tokens: &str) -> usize {
    session
        .handle_keys(&keys(tokens.split_whitespace()))
        .expect("keys should replay")
}

/// Helper to get the editor's text
pub fn text(session: &Session) -> String {
    session.editor().text()
}
