// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{Prompt, PromptError, PromptInner};
use std::{io::{self, Write},
          sync::{Arc, Weak}};

/// Adapts a [`Prompt`] to [`std::io::Write`], so it can be handed to anything that
/// prints to a writer (`writeln!`, a [`tracing_subscriber`] fmt layer, etc).
///
/// Bytes are buffered until a line break, and then every complete line is printed above
/// the input line in one [`Prompt::write()`]. [`Write::flush()`] prints the incomplete
/// tail too, except for a trailing UTF-8 sequence that is still missing bytes. Invalid
/// UTF-8 is replaced, not rejected.
///
/// The writer only holds a [`Weak`] reference, so it never keeps the prompt (and with
/// it raw mode and the input loop) alive. Once every [`Prompt`] handle is dropped,
/// output goes to stderr instead.
#[derive(Debug, Clone)]
pub struct PromptWriter {
    pub prompt: Weak<PromptInner>,
    pub pending: Vec<u8>,
}

impl PromptWriter {
    #[must_use]
    pub fn new(prompt: &Prompt) -> Self {
        Self {
            prompt: Arc::downgrade(&prompt.inner),
            pending: Vec::new(),
        }
    }

    fn print(&self, bytes: &[u8]) -> io::Result<()> {
        let text = String::from_utf8_lossy(bytes);
        match self.prompt.upgrade() {
            Some(inner) => Prompt { inner }.write(text).map_err(into_io_error),
            None => io::stderr().write_all(text.as_bytes()),
        }
    }

    /// Print everything that is pending, including an incomplete UTF-8 tail.
    fn print_all_pending(&mut self) -> io::Result<()> {
        if self.pending.is_empty() {
            return Ok(());
        }
        let pending = std::mem::take(&mut self.pending);
        self.print(&pending)
    }
}

impl Write for PromptWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.pending.extend_from_slice(buf);

        // A line break byte never occurs inside a multi byte UTF-8 sequence.
        if let Some(last_line_break) = self.pending.iter().rposition(|it| *it == b'\n') {
            let tail = self.pending.split_off(last_line_break + 1);
            let complete_lines = std::mem::replace(&mut self.pending, tail);
            self.print(&complete_lines)?;
        }

        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        let printable_len = incomplete_utf8_tail_start(&self.pending);
        if printable_len == 0 {
            return Ok(());
        }
        let tail = self.pending.split_off(printable_len);
        let printable = std::mem::replace(&mut self.pending, tail);
        self.print(&printable)
    }
}

impl Drop for PromptWriter {
    fn drop(&mut self) { self.print_all_pending().ok(); }
}

/// Length of the prefix of `bytes` that can be printed now. Only a UTF-8 sequence at
/// the very end that could still be completed by more bytes is held back.
fn incomplete_utf8_tail_start(bytes: &[u8]) -> usize {
    match std::str::from_utf8(bytes) {
        Ok(_) => bytes.len(),
        Err(error) if error.error_len().is_none() => error.valid_up_to(),
        Err(_) => bytes.len(),
    }
}

fn into_io_error(error: PromptError) -> io::Error {
    match error {
        PromptError::Io(io_error) => io_error,
        other => io::Error::other(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BufferSize, CursorPos, PromptConfig, test_fixtures::{MockKeyInput,
                                                                     MockTerminal}};
    use pretty_assertions::assert_eq;

    fn stopped_prompt() -> (Prompt, MockTerminal) {
        let term = MockTerminal::new(BufferSize::new(20, 3), CursorPos::default());
        let prompt = Prompt::new(
            term.clone(),
            MockKeyInput::new(),
            (),
            PromptConfig::default(),
        );
        (prompt, term)
    }

    #[test]
    fn test_only_complete_lines_are_printed_before_flush() {
        let (prompt, term) = stopped_prompt();
        let mut writer = PromptWriter::new(&prompt);

        write!(writer, "one\ntw").unwrap();
        assert_eq!(term.row_text(0).trim_end(), "one");
        assert_eq!(term.row_text(1), "");
        assert_eq!(writer.pending, b"tw");

        writeln!(writer, "o").unwrap();
        assert_eq!(term.row_text(1).trim_end(), "two");
        assert!(writer.pending.is_empty());
    }

    #[test]
    fn test_flush_and_drop_print_the_tail() {
        let (prompt, term) = stopped_prompt();
        let mut writer = PromptWriter::new(&prompt);

        write!(writer, "ab").unwrap();
        writer.flush().unwrap();
        assert_eq!(term.row_text(0), "ab");

        write!(writer, "cd").unwrap();
        drop(writer);
        assert_eq!(term.row_text(0), "abcd");
    }

    #[test]
    fn test_flush_holds_back_split_utf8_sequence() {
        let (prompt, term) = stopped_prompt();
        let mut writer = PromptWriter::new(&prompt);
        let [first, second] = "é".as_bytes() else {
            panic!("é is two bytes in UTF-8");
        };

        writer.write_all(&[b'a', *first]).unwrap();
        writer.flush().unwrap();
        assert_eq!(term.row_text(0), "a");
        assert_eq!(writer.pending, vec![*first]);

        writer.write_all(&[*second]).unwrap();
        writer.flush().unwrap();
        assert_eq!(term.row_text(0), "aé");
        assert!(writer.pending.is_empty());
    }

    #[test]
    fn test_flush_replaces_invalid_utf8() {
        let (prompt, term) = stopped_prompt();
        let mut writer = PromptWriter::new(&prompt);

        writer.write_all(&[b'a', 0xFF, b'b']).unwrap();
        writer.flush().unwrap();

        assert_eq!(term.row_text(0), "a\u{FFFD}b");
    }

    #[test]
    fn test_writer_does_not_keep_prompt_alive() {
        let (prompt, _term) = stopped_prompt();
        let mut writer = PromptWriter::new(&prompt);
        let weak_inner = Arc::downgrade(&prompt.inner);

        drop(prompt);

        assert!(weak_inner.upgrade().is_none());
        writeln!(writer, "goes to stderr").unwrap();
        writer.flush().unwrap();
    }

    #[test]
    fn test_terminal_error_becomes_io_error() {
        let (prompt, term) = stopped_prompt();
        let mut writer = PromptWriter::new(&prompt);
        term.set_failing_writes(true);

        let error = writeln!(writer, "x").unwrap_err();

        assert_eq!(error.kind(), io::ErrorKind::Other);
        term.set_failing_writes(false);
    }
}
