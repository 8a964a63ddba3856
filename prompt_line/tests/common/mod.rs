// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Shared setup for the integration tests: a [`Prompt`] over a [`MockTerminal`], fed by
//! a [`MockKeyInput`], reporting to [`RecordingEvents`].

#![allow(dead_code)]

use prompt_line::{BufferSize, CursorPos, Prompt, PromptConfig, PromptEvents,
                  test_fixtures::{MockKeyInput, MockTerminal, RecordingEvents}};
use std::time::{Duration, Instant};

pub const POLL_DELAY: Duration = Duration::from_millis(5);
const WAIT_TIMEOUT: Duration = Duration::from_secs(5);

pub struct Harness {
    pub prompt: Prompt,
    pub term: MockTerminal,
    pub keys: MockKeyInput,
    pub events: RecordingEvents,
}

pub fn config(prefix: &str) -> PromptConfig {
    PromptConfig::default()
        .with_prefix(prefix)
        .with_markup_enabled(true)
        .with_input_poll_delay(POLL_DELAY)
}

pub fn harness(size: BufferSize, prefix: &str) -> Harness {
    harness_with_events(size, prefix, RecordingEvents::new())
}

pub fn harness_with_events(
    size: BufferSize,
    prefix: &str,
    events: RecordingEvents,
) -> Harness {
    let term = MockTerminal::new(size, CursorPos::default());
    let keys = MockKeyInput::new();
    let prompt = Prompt::new(term.clone(), keys.clone(), events.clone(), config(prefix));
    Harness {
        prompt,
        term,
        keys,
        events,
    }
}

/// For callbacks other than [`RecordingEvents`].
pub fn custom_harness(
    size: BufferSize,
    prefix: &str,
    events: impl PromptEvents + 'static,
) -> (Prompt, MockTerminal, MockKeyInput) {
    let term = MockTerminal::new(size, CursorPos::default());
    let keys = MockKeyInput::new();
    let prompt = Prompt::new(term.clone(), keys.clone(), events, config(prefix));
    (prompt, term, keys)
}

/// Poll `condition` until it holds.
///
/// # Panics
///
/// Panics if it doesn't hold within a few seconds.
pub fn wait_until(what: &str, condition: impl Fn() -> bool) {
    let start = Instant::now();
    while !condition() {
        assert!(start.elapsed() < WAIT_TIMEOUT, "timed out waiting for: {what}");
        std::thread::sleep(Duration::from_millis(2));
    }
}

/// Wait until every scripted key has been read, and the content matches `expected`.
/// Keys have to be pushed before the prompt is started for this to be meaningful.
pub fn wait_for_content(harness: &Harness, expected: &str) {
    wait_until(&format!("content == {expected:?}"), || {
        harness.keys.pending() == 0
            && harness.prompt.content().is_ok_and(|content| content == expected)
    });
}

pub fn trimmed_screen(term: &MockTerminal) -> Vec<String> {
    term.screen_text()
        .iter()
        .map(|row| row.trim_end().to_string())
        .collect()
}
