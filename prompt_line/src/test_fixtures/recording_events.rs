// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{KeyHandled, Prompt, PromptEvents, StdMutex};
use crossterm::event::KeyEvent;
use std::sync::{Arc, MutexGuard, PoisonError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedEvent {
    Key(KeyEvent),
    Submit {
        line: String,
        /// What [`Prompt::content()`] returned from inside the callback.
        live_content: String,
    },
    Beep,
}

/// [`PromptEvents`] that records every callback. Clones share the record, so a test
/// keeps one clone and hands the other to the [`Prompt`].
#[derive(Debug, Clone, Default)]
pub struct RecordingEvents {
    pub events: Arc<StdMutex<Vec<RecordedEvent>>>,
    /// Keys that [`PromptEvents::on_key()`] reports as [`KeyHandled::Handled`].
    pub handled_keys: Vec<KeyEvent>,
}

impl RecordingEvents {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    #[must_use]
    pub fn with_handled_key(mut self, key: KeyEvent) -> Self {
        self.handled_keys.push(key);
        self
    }

    fn lock(&self) -> MutexGuard<'_, Vec<RecordedEvent>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn events(&self) -> Vec<RecordedEvent> { self.lock().clone() }

    #[must_use]
    pub fn submitted_lines(&self) -> Vec<String> {
        self.lock()
            .iter()
            .filter_map(|it| match it {
                RecordedEvent::Submit { line, .. } => Some(line.clone()),
                _ => None,
            })
            .collect()
    }

    #[must_use]
    pub fn beep_count(&self) -> usize {
        self.lock()
            .iter()
            .filter(|it| matches!(it, RecordedEvent::Beep))
            .count()
    }
}

impl PromptEvents for RecordingEvents {
    fn on_key(&mut self, _prompt: &Prompt, key: &KeyEvent) -> KeyHandled {
        self.lock().push(RecordedEvent::Key(*key));
        if self.handled_keys.contains(key) {
            KeyHandled::Handled
        } else {
            KeyHandled::NotHandled
        }
    }

    fn on_submit(&mut self, prompt: &Prompt, line: String) {
        let live_content = prompt.content().unwrap_or_default();
        self.lock().push(RecordedEvent::Submit { line, live_content });
    }

    fn on_beep(&mut self, _prompt: &Prompt) { self.lock().push(RecordedEvent::Beep); }
}
