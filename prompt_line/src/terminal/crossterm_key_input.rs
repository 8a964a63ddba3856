// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{KeyInput, ok};
use crossterm::{event::{self, Event, KeyEvent, KeyEventKind},
                terminal};
use std::{io, time::Duration};

/// [`KeyInput`] that reads key events from the process' terminal via [`crossterm`].
///
/// Raw mode is enabled when this is created, so keys arrive one by one without line
/// buffering or echo. [`Drop`] disables raw mode again.
#[derive(Debug)]
pub struct CrosstermKeyInput {
    _private: (),
}

impl CrosstermKeyInput {
    /// # Errors
    ///
    /// Returns an error if raw mode can't be enabled (for example, stdin is not a TTY).
    pub fn try_new() -> io::Result<Self> {
        // Enable raw mode. Drop will disable raw mode.
        terminal::enable_raw_mode()?;
        ok!(Self { _private: () })
    }
}

impl Drop for CrosstermKeyInput {
    fn drop(&mut self) {
        // We don't care about the result of this operation.
        terminal::disable_raw_mode().ok();
    }
}

impl KeyInput for CrosstermKeyInput {
    fn poll_key(&mut self, timeout: Duration) -> io::Result<bool> { event::poll(timeout) }

    fn read_key(&mut self) -> io::Result<Option<KeyEvent>> {
        match event::read()? {
            Event::Key(key_event) => ok!(filter_key_event(key_event)),
            _ => ok!(None),
        }
    }
}

/// Only presses and auto repeats count as typed keys. Some platforms (Windows, and
/// terminals speaking the kitty keyboard protocol) also report releases.
fn filter_key_event(key_event: KeyEvent) -> Option<KeyEvent> {
    match key_event.kind {
        KeyEventKind::Press | KeyEventKind::Repeat => Some(key_event),
        KeyEventKind::Release => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers};
    use test_case::test_case;

    #[test_case(KeyEventKind::Press, true)]
    #[test_case(KeyEventKind::Repeat, true)]
    #[test_case(KeyEventKind::Release, false)]
    fn test_filter_key_event(kind: KeyEventKind, is_kept: bool) {
        let key_event = KeyEvent {
            code: KeyCode::Char('a'),
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        };
        assert_eq!(filter_key_event(key_event).is_some(), is_kept);
    }
}
