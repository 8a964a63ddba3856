// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{PromptEngine, ok};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::io;
use unicode_segmentation::UnicodeSegmentation;

/// What the input loop has to do after [`PromptEngine::apply_key()`] returns. The
/// callbacks are invoked by the caller once the engine lock is released.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    Continue,
    /// Enter was pressed. This is the content from right before it was cleared.
    Submitted(String),
    /// The key asked for an edit that can't be done.
    Beep,
}

impl PromptEngine {
    /// Built-in handling of one key: edit the content and redraw what changed.
    ///
    /// | Key           | Effect                                                     |
    /// | :------------ | :--------------------------------------------------------- |
    /// | Enter         | take the content and clear it, [`KeyOutcome::Submitted`]   |
    /// | Backspace     | remove the last grapheme, or [`KeyOutcome::Beep`] if empty |
    /// | Escape        | clear the content                                          |
    /// | a glyph       | append it                                                  |
    /// | anything else | nothing                                                    |
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal can't be read or written.
    pub fn apply_key(&mut self, key: &KeyEvent) -> io::Result<KeyOutcome> {
        if !self.is_running || key.kind == KeyEventKind::Release {
            return ok!(KeyOutcome::Continue);
        }

        match key.code {
            KeyCode::Enter => {
                let line = std::mem::take(&mut self.input.content);
                self.dirty.content = true;
                self.re_render()?;
                ok!(KeyOutcome::Submitted(line))
            }
            KeyCode::Backspace => {
                let Some((last_grapheme_start, _)) =
                    self.input.content.grapheme_indices(true).next_back()
                else {
                    return ok!(KeyOutcome::Beep);
                };
                self.input.content.truncate(last_grapheme_start);
                self.render_backspace()?;
                ok!(KeyOutcome::Continue)
            }
            KeyCode::Esc => {
                self.input.content.clear();
                self.dirty.content = true;
                self.re_render()?;
                ok!(KeyOutcome::Continue)
            }
            _ => {
                if let Some(glyph) = typed_glyph(key) {
                    self.input.content.push(glyph);
                    self.render_append(glyph)?;
                }
                ok!(KeyOutcome::Continue)
            }
        }
    }
}

/// The glyph a key press types, if any. Ctrl or Alt chords are shortcuts, not text,
/// except Ctrl+Alt which is how AltGr arrives on Windows.
#[must_use]
pub fn typed_glyph(key: &KeyEvent) -> Option<char> {
    let KeyCode::Char(glyph) = key.code else {
        return None;
    };
    if glyph.is_control() {
        return None;
    }
    let is_ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let is_alt = key.modifiers.contains(KeyModifiers::ALT);
    if is_ctrl != is_alt {
        return None;
    }
    Some(glyph)
}
