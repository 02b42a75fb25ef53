//! Minimal modal text buffer used as a remap host
//!
//! Just enough of a vi-style editor to drive the remappers end to end: insert
//! mode types characters, normal mode moves and deletes, and every key typed
//! in insert mode is recorded so the last `n` of them can be reverted.

use ropey::Rope;

use crate::remap::{
    DispatchContext, Key, Mode, ModeSource, RemapError, ReplaySink, UndoCompensator,
};

/// Modal text buffer backed by a rope
#[derive(Debug, Clone)]
pub struct ScratchEditor {
    text: Rope,
    /// Char index of the cursor
    cursor: usize,
    mode: Mode,
    /// One slot per key typed in the current insert session; `Some(at)` when
    /// the key inserted a char at `at`
    keystrokes: Vec<Option<usize>>,
}

impl ScratchEditor {
    pub fn new() -> Self {
        Self::with_text("")
    }

    /// Editor in normal mode with the cursor at the end of `text`
    pub fn with_text(text: &str) -> Self {
        let text = Rope::from_str(text);
        let cursor = text.len_chars();
        Self {
            text,
            cursor,
            mode: Mode::Normal,
            keystrokes: Vec::new(),
        }
    }

    pub fn text(&self) -> String {
        self.text.to_string()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: Mode) {
        if mode != self.mode {
            tracing::debug!("Mode {} → {}", self.mode, mode);
        }
        self.mode = mode;
        self.keystrokes.clear();
    }

    /// Open a history slot for a key about to be typed in insert mode
    pub fn begin_keystroke(&mut self) {
        if self.mode == Mode::Insert {
            self.keystrokes.push(None);
        }
    }

    /// Apply a key whose slot was opened by [`Self::begin_keystroke`]
    pub fn finish_keystroke(&mut self, key: &Key) {
        let typing = self.mode == Mode::Insert;
        let inserted_at = self.apply_key(key);
        if typing && self.mode == Mode::Insert {
            if let Some(slot) = self.keystrokes.last_mut() {
                *slot = inserted_at;
            }
        }
    }

    /// Apply a key's normal effect, returning where a char was inserted
    fn apply_key(&mut self, key: &Key) -> Option<usize> {
        match key.as_str() {
            "<Esc>" | "Escape" | "<C-[>" => {
                self.set_mode(Mode::Normal);
                return None;
            }
            _ => {}
        }

        match self.mode {
            Mode::Insert => self.insert_key(key),
            Mode::Normal | Mode::Visual | Mode::VisualLine | Mode::VisualBlock => {
                self.command_key(key);
                None
            }
            _ => None,
        }
    }

    fn insert_key(&mut self, key: &Key) -> Option<usize> {
        let ch = match key.as_str() {
            "<CR>" | "Enter" => '\n',
            "<Tab>" | "Tab" => '\t',
            "<Space>" | "Space" => ' ',
            "<BS>" | "Backspace" => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    self.text.remove(self.cursor..self.cursor + 1);
                }
                // Earlier slots may point past the removed char
                self.keystrokes.clear();
                return None;
            }
            _ => key.as_char()?,
        };

        let at = self.cursor;
        self.text.insert_char(at, ch);
        self.cursor += 1;
        Some(at)
    }

    fn command_key(&mut self, key: &Key) {
        let len = self.text.len_chars();
        match key.as_str() {
            "i" => self.set_mode(Mode::Insert),
            "a" => {
                self.cursor = (self.cursor + 1).min(len);
                self.set_mode(Mode::Insert);
            }
            "v" => self.set_mode(Mode::Visual),
            "V" => self.set_mode(Mode::VisualLine),
            "h" | "Left" => self.cursor = self.cursor.saturating_sub(1),
            "l" | "Right" => self.cursor = (self.cursor + 1).min(len),
            "0" | "Home" => self.cursor = self.line_start(),
            "$" | "End" => self.cursor = self.line_last_char(),
            "x" if self.cursor < len => {
                self.text.remove(self.cursor..self.cursor + 1);
            }
            _ => tracing::trace!("Ignoring {} in {} mode", key, self.mode),
        }
    }

    fn line_start(&self) -> usize {
        let line = self.text.char_to_line(self.cursor);
        self.text.line_to_char(line)
    }

    /// Char index of the last char before the line break
    fn line_last_char(&self) -> usize {
        let line_idx = self.text.char_to_line(self.cursor);
        let line = self.text.line(line_idx);
        let mut len = line.len_chars();
        if len > 0 && line.char(len - 1) == '\n' {
            len -= 1;
        }
        self.text.line_to_char(line_idx) + len.saturating_sub(1)
    }
}

impl Default for ScratchEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl ModeSource for ScratchEditor {
    fn current_mode(&self) -> Mode {
        self.mode
    }
}

impl ReplaySink for ScratchEditor {
    /// The key's slot was opened by [`UndoCompensator::record_keystroke`]
    fn replay_key(&mut self, key: &Key, _ctx: &mut DispatchContext) -> Result<(), RemapError> {
        self.finish_keystroke(key);
        Ok(())
    }
}

impl UndoCompensator for ScratchEditor {
    /// Revert the last `count` keys typed in insert mode
    ///
    /// Keys that inserted nothing still use up one of the `count`. Stops early
    /// when the insert session has fewer keys recorded.
    fn undo_keystrokes(&mut self, count: usize) -> Result<(), RemapError> {
        for _ in 0..count {
            let Some(slot) = self.keystrokes.pop() else {
                break;
            };
            if let Some(at) = slot {
                self.text.remove(at..at + 1);
                self.cursor = at;
            }
        }
        Ok(())
    }

    fn record_keystroke(&mut self) {
        self.begin_keystroke();
    }
}
