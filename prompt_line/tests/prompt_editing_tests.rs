// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Keys go through the real input loop thread, from a scripted [`MockKeyInput`] to the
//! [`MockTerminal`] grid.
//!
//! [`MockKeyInput`]: prompt_line::test_fixtures::MockKeyInput
//! [`MockTerminal`]: prompt_line::test_fixtures::MockTerminal

mod common;

use common::{harness, harness_with_events, trimmed_screen, wait_for_content, wait_until};
use crossterm::event::KeyCode;
use pretty_assertions::assert_eq;
use prompt_line::{BufferSize, CursorPos, RawTerminal,
                  test_fixtures::{RecordedEvent, RecordingEvents, char_key, named_key}};

#[test]
fn test_submit_delivers_snapshot_and_clears_line() {
    let harness = harness(BufferSize::new(20, 3), "> ");
    harness.keys.push_text("hi");
    harness.keys.push_key(named_key(KeyCode::Enter));
    harness.prompt.start().unwrap();

    wait_until("one submit", || harness.events.submitted_lines().len() == 1);

    let submit = harness
        .events
        .events()
        .into_iter()
        .find(|it| matches!(it, RecordedEvent::Submit { .. }))
        .unwrap();
    assert_eq!(submit, RecordedEvent::Submit {
        line: "hi".into(),
        live_content: String::new(),
    });
    assert_eq!(harness.term.row_text(0).trim_end(), ">");
    assert_eq!(harness.term.cursor().unwrap(), CursorPos::new(2, 0));

    harness.prompt.stop().unwrap();
    harness.prompt.wait_until_stopped().unwrap();
}

#[test]
fn test_backspaces_only_blank_removed_cells() {
    let harness = harness(BufferSize::new(20, 3), "> ");
    harness.keys.push_text("abcdef");
    harness
        .keys
        .push_keys(std::iter::repeat_n(named_key(KeyCode::Backspace), 5));
    harness.prompt.start().unwrap();

    wait_for_content(&harness, "a");

    assert_eq!(harness.term.row_text(0).trim_end(), "> a");
    assert_eq!(harness.term.cursor().unwrap(), CursorPos::new(3, 0));
    assert_eq!(harness.events.beep_count(), 0);

    harness.prompt.stop().unwrap();
    harness.prompt.wait_until_stopped().unwrap();
}

#[test]
fn test_escape_clears_content() {
    let harness = harness(BufferSize::new(20, 3), "> ");
    harness.keys.push_text("abc");
    harness.keys.push_key(named_key(KeyCode::Esc));
    harness.prompt.start().unwrap();

    wait_for_content(&harness, "");

    assert_eq!(harness.term.row_text(0).trim_end(), ">");
    assert_eq!(harness.term.cursor().unwrap(), CursorPos::new(2, 0));
    assert!(harness.events.submitted_lines().is_empty());

    harness.prompt.stop().unwrap();
}

#[test]
fn test_backspace_on_empty_line_beeps() {
    let harness = harness(BufferSize::new(20, 3), "> ");
    harness.keys.push_key(named_key(KeyCode::Backspace));
    harness.prompt.start().unwrap();

    wait_until("one beep", || harness.events.beep_count() == 1);

    assert_eq!(harness.prompt.content().unwrap(), "");
    assert_eq!(harness.term.row_text(0), "> ");

    harness.prompt.stop().unwrap();
}

#[test]
fn test_handled_keys_skip_builtin_behavior() {
    let events = RecordingEvents::new().with_handled_key(char_key('x'));
    let harness = harness_with_events(BufferSize::new(20, 3), "> ", events);
    harness.keys.push_text("axb");
    harness.keys.push_key(named_key(KeyCode::Tab));
    harness.prompt.start().unwrap();

    wait_until("every key offered to on_key", || {
        harness
            .events
            .events()
            .iter()
            .filter(|it| matches!(it, RecordedEvent::Key(_)))
            .count()
            == 4
    });
    wait_for_content(&harness, "ab");

    assert_eq!(harness.term.row_text(0), "> ab");

    harness.prompt.stop().unwrap();
}

#[test]
fn test_typed_text_wraps_and_grows_buffer() {
    let harness = harness(BufferSize::new(6, 1), "> ");
    harness.keys.push_text("abcdefgh");
    harness.prompt.start().unwrap();

    wait_for_content(&harness, "abcdefgh");

    assert_eq!(trimmed_screen(&harness.term), vec!["> abcd", "efgh"]);
    assert_eq!(harness.term.grow_count(), 1);
    assert_eq!(harness.term.cursor().unwrap(), CursorPos::new(4, 1));

    harness.prompt.stop().unwrap();
    assert_eq!(trimmed_screen(&harness.term), vec!["", ""]);
}

#[test]
fn test_typed_text_is_never_markup() {
    let harness = harness(BufferSize::new(20, 2), "> ");
    harness.keys.push_text("§0C");
    harness.prompt.start().unwrap();

    wait_for_content(&harness, "§0C");

    assert_eq!(harness.term.row_text(0), "> §0C");

    harness.prompt.stop().unwrap();
}
