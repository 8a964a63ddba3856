// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{KeyInput, StdMutex, ok, test_fixtures::char_key};
use crossterm::event::KeyEvent;
use std::{collections::VecDeque,
          io,
          sync::{Arc, MutexGuard, PoisonError},
          time::Duration};

#[derive(Debug, Clone)]
pub enum MockKeyEntry {
    Key(KeyEvent),
    /// Something that isn't a key press, like a resize.
    NonKey,
    Error(io::ErrorKind),
}

/// A scripted [`KeyInput`]. Entries are handed out in order; once the queue is empty
/// [`KeyInput::poll_key()`] sleeps for the whole timeout and reports no key, just like a
/// terminal nobody is typing on.
///
/// Clones share the queue, so a test can keep pushing keys after the
/// [`crate::Prompt`] has taken ownership of one clone.
#[derive(Debug, Clone, Default)]
pub struct MockKeyInput {
    pub queue: Arc<StdMutex<VecDeque<MockKeyEntry>>>,
}

impl MockKeyInput {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    fn lock(&self) -> MutexGuard<'_, VecDeque<MockKeyEntry>> {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn push_key(&self, key: KeyEvent) { self.lock().push_back(MockKeyEntry::Key(key)); }

    pub fn push_keys(&self, keys: impl IntoIterator<Item = KeyEvent>) {
        self.lock().extend(keys.into_iter().map(MockKeyEntry::Key));
    }

    /// One [`char_key()`] per char of `text`.
    pub fn push_text(&self, text: &str) { self.push_keys(text.chars().map(char_key)); }

    pub fn push_non_key(&self) { self.lock().push_back(MockKeyEntry::NonKey); }

    pub fn push_error(&self, kind: io::ErrorKind) {
        self.lock().push_back(MockKeyEntry::Error(kind));
    }

    /// Number of entries that haven't been read yet.
    #[must_use]
    pub fn pending(&self) -> usize { self.lock().len() }
}

impl KeyInput for MockKeyInput {
    fn poll_key(&mut self, timeout: Duration) -> io::Result<bool> {
        if self.pending() > 0 {
            return ok!(true);
        }
        std::thread::sleep(timeout);
        ok!(false)
    }

    fn read_key(&mut self) -> io::Result<Option<KeyEvent>> {
        match self.lock().pop_front() {
            Some(MockKeyEntry::Key(key)) => ok!(Some(key)),
            Some(MockKeyEntry::Error(kind)) => {
                Err(io::Error::new(kind, "mock key input failure"))
            }
            Some(MockKeyEntry::NonKey) | None => ok!(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyCode;

    #[test]
    fn test_entries_come_out_in_order() {
        let mut input = MockKeyInput::new();
        input.push_text("ab");
        input.push_non_key();
        input.push_error(io::ErrorKind::BrokenPipe);

        assert!(input.poll_key(Duration::ZERO).unwrap());
        assert_eq!(input.read_key().unwrap().unwrap().code, KeyCode::Char('a'));
        assert_eq!(input.read_key().unwrap().unwrap().code, KeyCode::Char('b'));
        assert!(input.read_key().unwrap().is_none());
        let error = input.read_key().unwrap_err();
        assert_eq!(error.kind(), io::ErrorKind::BrokenPipe);
        assert!(!input.poll_key(Duration::from_millis(1)).unwrap());
    }
}
