//! Key entry point tying an editor, its remappers and a dispatch context

use crate::config::RemapConfig;
use crate::editor::ScratchEditor;
use crate::remap::{DispatchContext, Key, Mode, RemapError, Remappers};

/// A scratch editor with remapping applied to every key it receives
#[derive(Debug, Clone)]
pub struct Session {
    editor: ScratchEditor,
    remappers: Remappers,
    ctx: DispatchContext,
}

impl Session {
    pub fn new(config: &RemapConfig) -> Self {
        Self::with_editor(config, ScratchEditor::new())
    }

    pub fn with_editor(config: &RemapConfig, editor: ScratchEditor) -> Self {
        Self {
            editor,
            remappers: Remappers::from_config(config),
            ctx: DispatchContext::new(),
        }
    }

    pub fn editor(&self) -> &ScratchEditor {
        &self.editor
    }

    pub fn remappers(&self) -> &Remappers {
        &self.remappers
    }

    pub fn context(&self) -> &DispatchContext {
        &self.ctx
    }

    pub fn mode(&self) -> Mode {
        self.editor.mode()
    }

    /// Handle one key; returns whether a remap consumed it
    pub fn handle_key(&mut self, key: &Key) -> Result<bool, RemapError> {
        let consumed = self
            .remappers
            .submit(key, &mut self.ctx, &mut self.editor)?;

        if !consumed {
            self.editor.finish_keystroke(key);
        }
        Ok(consumed)
    }

    /// Handle keys in order, stopping at the first failure
    pub fn handle_keys<'a, I>(&mut self, keys: I) -> Result<usize, RemapError>
    where
        I: IntoIterator<Item = &'a Key>,
    {
        let mut consumed = 0;
        for key in keys {
            if self.handle_key(key)? {
                consumed += 1;
            }
        }
        Ok(consumed)
    }
}
