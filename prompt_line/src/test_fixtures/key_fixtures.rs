// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// A plain key press of `ch`. Upper case letters carry [`KeyModifiers::SHIFT`], which
/// is what crossterm reports for them.
#[must_use]
pub fn char_key(ch: char) -> KeyEvent {
    let modifiers = if ch.is_uppercase() {
        KeyModifiers::SHIFT
    } else {
        KeyModifiers::NONE
    };
    KeyEvent::new(KeyCode::Char(ch), modifiers)
}

#[must_use]
pub fn named_key(code: KeyCode) -> KeyEvent { KeyEvent::new(code, KeyModifiers::NONE) }

#[must_use]
pub fn ctrl_key(ch: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
}

#[must_use]
pub fn alt_key(ch: char) -> KeyEvent { KeyEvent::new(KeyCode::Char(ch), KeyModifiers::ALT) }
