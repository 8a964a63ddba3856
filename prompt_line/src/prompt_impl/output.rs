// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{PromptEngine, emit_str};
use std::io;

impl PromptEngine {
    /// Print `text` where the prompt currently is, then draw the prompt again below it.
    ///
    /// The old prefix and content are overwritten by the output (a line break pads the
    /// rest of its row with spaces), and the prompt moves down to wherever the output
    /// ended. When not running, `text` is simply printed at the cursor.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal can't be read or written.
    pub fn write_text(&mut self, text: &str) -> io::Result<()> {
        let markup = self.markup();

        if !self.is_running {
            self.colors.reset(&mut *self.terminal)?;
            emit_str(&mut *self.terminal, &mut self.colors, text, markup)?;
            return self.terminal.flush();
        }

        self.terminal.set_cursor_visible(false)?;
        self.colors.reset(&mut *self.terminal)?;
        self.terminal.set_cursor(self.anchors.render_start)?;
        emit_str(&mut *self.terminal, &mut self.colors, text, markup)?;

        self.anchors.render_start = self.terminal.cursor()?;
        self.dirty.mark_all();
        self.re_render()
    }
}

#[cfg(test)]
mod tests {
    use crate::{BufferSize, CursorPos, PromptConfig, PromptEngine, RawTerminal,
                test_fixtures::MockTerminal};
    use crossterm::style::Color;
    use pretty_assertions::assert_eq;

    fn running_engine(size: BufferSize) -> (PromptEngine, MockTerminal) {
        let term = MockTerminal::new(size, CursorPos::default());
        let config = PromptConfig::default()
            .with_prefix("> ")
            .with_markup_enabled(true);
        let mut engine = PromptEngine::new(Box::new(term.clone()), config);
        engine.start_session().unwrap();
        (engine, term)
    }

    #[test]
    fn test_output_goes_above_prompt() {
        let (mut engine, term) = running_engine(BufferSize::new(10, 3));
        engine.set_content("abc".into());
        engine.re_render().unwrap();

        engine.write_text("hi\n").unwrap();

        assert_eq!(term.screen_text(), vec!["hi        ", "> abc", ""]);
        assert_eq!(engine.anchors.render_start, CursorPos::new(0, 1));
        assert_eq!(term.cursor().unwrap(), CursorPos::new(5, 1));
    }

    #[test]
    fn test_output_at_bottom_grows_buffer() {
        let (mut engine, term) = running_engine(BufferSize::new(10, 1));

        engine.write_text("one\n").unwrap();
        engine.write_text("two\n").unwrap();

        assert_eq!(term.screen_text(), vec!["one       ", "two       ", "> "]);
        assert_eq!(term.grow_count(), 2);
    }

    #[test]
    fn test_output_without_line_break_continues_row() {
        let (mut engine, term) = running_engine(BufferSize::new(10, 2));

        engine.write_text("ab").unwrap();
        engine.write_text("cd").unwrap();

        assert_eq!(term.row_text(0), "abcd> ");
        assert_eq!(engine.anchors.content_start, CursorPos::new(6, 0));
    }

    #[test]
    fn test_output_markup_follows_setting() {
        let (mut engine, term) = running_engine(BufferSize::new(20, 2));

        engine.write_text("§0Cerr§RR\n").unwrap();
        assert_eq!(term.row_text(0).trim_end(), "err");
        assert_eq!(term.cell(CursorPos::new(0, 0)).foreground, Color::Red);
        assert_eq!(term.cell(CursorPos::new(3, 0)).foreground, Color::Reset);

        engine.is_markup_enabled = false;
        engine.write_text("§0C\n").unwrap();
        assert_eq!(term.row_text(1).trim_end(), "§0C");
    }

    #[test]
    fn test_write_when_stopped_prints_at_cursor_without_prompt() {
        let term = MockTerminal::new(BufferSize::new(10, 2), CursorPos::new(1, 0));
        let config = PromptConfig::default().with_prefix("> ");
        let mut engine = PromptEngine::new(Box::new(term.clone()), config);

        engine.write_text("xy\n").unwrap();

        assert_eq!(term.screen_text(), vec![" xy       ", ""]);
        assert_eq!(term.cursor().unwrap(), CursorPos::new(0, 1));
    }
}
