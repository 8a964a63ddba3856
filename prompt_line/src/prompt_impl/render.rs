// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The three render paths of the input line:
//!
//! | Path                                 | Used for                      | Cost             |
//! | :----------------------------------- | :---------------------------- | :--------------- |
//! | [`PromptEngine::re_render()`]        | output, prefix change, Escape | dirty parts only |
//! | [`PromptEngine::render_append()`]    | typing a glyph                | one glyph        |
//! | [`PromptEngine::render_backspace()`] | Backspace                     | removed cells    |

use crate::{ColorPair, Markup, MarkupStep, PromptEngine, RenderAnchors, emit_glyph,
            emit_str, landing_point, ok};
use std::io;

impl PromptEngine {
    /// Begin a session at the current cursor position and draw the prompt. Does
    /// nothing if already running.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal can't be read or written. The session is not
    /// started in that case.
    pub fn start_session(&mut self) -> io::Result<()> {
        if self.is_running {
            return ok!();
        }
        self.is_running = true;
        let result = self.draw_fresh_session();
        if result.is_err() {
            self.is_running = false;
        }
        result
    }

    fn draw_fresh_session(&mut self) -> io::Result<()> {
        self.anchors = RenderAnchors::collapsed_at(self.terminal.cursor()?);
        self.dirty.mark_all();
        self.re_render()
    }

    /// Erase the prompt (the prefix and content are cleared) and end the session. Does
    /// nothing if not running.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal can't be written. The session has ended anyway.
    pub fn end_session(&mut self) -> io::Result<()> {
        if !self.is_running {
            return ok!();
        }
        self.input.prefix.clear();
        self.input.content.clear();
        self.dirty.mark_all();
        let result = self.re_render();
        self.is_running = false;
        result
    }

    /// Redraw whatever is dirty. Does nothing if not running.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal can't be read or written.
    pub fn re_render(&mut self) -> io::Result<()> {
        if !self.is_running {
            return ok!();
        }

        self.terminal.set_cursor_visible(false)?;
        self.colors.reset(&mut *self.terminal)?;

        if self.dirty.prefix {
            self.dirty.prefix = false;
            self.render_prefix()?;
        }

        if self.dirty.content {
            self.dirty.content = false;
            self.render_content()?;
        }

        self.terminal.set_cursor_visible(true)?;
        self.terminal.flush()
    }

    /// The content has to be redrawn after this, since it starts where the prefix ends.
    fn render_prefix(&mut self) -> io::Result<()> {
        self.terminal.set_cursor(self.anchors.render_start)?;
        let markup = self.markup();
        emit_str(
            &mut *self.terminal,
            &mut self.colors,
            &self.input.prefix,
            markup,
        )?;
        self.anchors.content_start = self.terminal.cursor()?;
        self.content_colors = Some(ColorPair::capture(&*self.terminal));
        self.dirty.content = true;
        ok!()
    }

    fn render_content(&mut self) -> io::Result<()> {
        self.terminal.set_cursor(self.anchors.content_start)?;
        self.apply_content_colors()?;
        emit_str(
            &mut *self.terminal,
            &mut self.colors,
            &self.input.content,
            Markup::Disabled,
        )?;
        let end = self.terminal.cursor()?;
        self.blank_till_render_end()?;
        self.anchors.render_end = end;
        self.terminal.set_cursor(end)
    }

    /// Draw `glyph`, which has just been pushed onto the content, at the end of the
    /// line. Nothing else is redrawn.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal can't be read or written.
    pub fn render_append(&mut self, glyph: char) -> io::Result<()> {
        if !self.is_running {
            return ok!();
        }
        self.terminal.set_cursor(self.anchors.render_end)?;
        self.apply_content_colors()?;
        emit_glyph(
            &mut *self.terminal,
            &mut self.colors,
            glyph,
            Markup::Disabled,
            &mut MarkupStep::default(),
        )?;
        self.anchors.render_end = self.terminal.cursor()?;
        self.terminal.flush()
    }

    /// The content has just shrunk. Blank the cells it no longer covers and put the
    /// cursor at its new end.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal can't be read or written.
    pub fn render_backspace(&mut self) -> io::Result<()> {
        if !self.is_running {
            return ok!();
        }
        self.terminal.set_cursor_visible(false)?;

        let buffer_width = self.terminal.buffer_size()?.width;
        let end = landing_point(
            self.anchors.content_start,
            &self.input.content,
            Markup::Disabled,
            buffer_width,
        );
        self.terminal.set_cursor(end)?;
        self.apply_content_colors()?;
        self.blank_till_render_end()?;
        self.anchors.render_end = end;
        self.terminal.set_cursor(end)?;

        self.terminal.set_cursor_visible(true)?;
        self.terminal.flush()
    }

    /// Print spaces from the cursor up to the previous [`RenderAnchors::render_end`].
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal can't be read or written.
    pub fn blank_till_render_end(&mut self) -> io::Result<()> {
        let target = self.anchors.render_end;
        let start = self.terminal.cursor()?;
        if start >= target {
            return ok!();
        }

        // Every space moves the cursor forward by one cell, so this is an upper bound
        // that stops a stale anchor (e.g. after a resize) from looping forever.
        let buffer_width = self.terminal.buffer_size()?.width.max(1);
        let max_cells = (target.row - start.row + 1) * buffer_width;

        let mut step = MarkupStep::default();
        for _ in 0..max_cells {
            if self.terminal.cursor()? >= target {
                break;
            }
            emit_glyph(
                &mut *self.terminal,
                &mut self.colors,
                ' ',
                Markup::Disabled,
                &mut step,
            )?;
        }
        ok!()
    }

    fn apply_content_colors(&mut self) -> io::Result<()> {
        match self.content_colors {
            Some(colors) => colors.apply(&mut *self.terminal),
            None => self.colors.reset(&mut *self.terminal),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BufferSize, CursorPos, DirtyFlags, PromptConfig, RawTerminal,
                test_fixtures::MockTerminal};
    use crossterm::style::Color;
    use pretty_assertions::assert_eq;

    fn engine(size: BufferSize, start: CursorPos, prefix: &str) -> (PromptEngine, MockTerminal) {
        let term = MockTerminal::new(size, start);
        let config = PromptConfig::default()
            .with_prefix(prefix)
            .with_markup_enabled(true);
        (PromptEngine::new(Box::new(term.clone()), config), term)
    }

    #[test]
    fn test_start_session_draws_prefix_and_sets_anchors() {
        let (mut engine, term) = engine(BufferSize::new(20, 3), CursorPos::new(0, 1), "> ");

        engine.start_session().unwrap();

        assert_eq!(term.row_text(1), "> ");
        assert_eq!(engine.anchors, RenderAnchors {
            render_start: CursorPos::new(0, 1),
            content_start: CursorPos::new(2, 1),
            render_end: CursorPos::new(2, 1),
        });
        assert_eq!(term.cursor().unwrap(), CursorPos::new(2, 1));
        assert!(term.is_cursor_visible());
        assert_eq!(engine.dirty, DirtyFlags::default());
    }

    #[test]
    fn test_re_render_is_noop_when_not_running() {
        let (mut engine, term) = engine(BufferSize::new(20, 3), CursorPos::default(), "> ");
        engine.dirty.mark_all();

        engine.re_render().unwrap();

        assert_eq!(term.row_text(0), "");
        assert_eq!(term.flush_count(), 0);
    }

    #[test]
    fn test_append_and_backspace_are_incremental() {
        let (mut engine, term) = engine(BufferSize::new(20, 3), CursorPos::default(), "> ");
        engine.start_session().unwrap();

        for glyph in "abc".chars() {
            engine.input.content.push(glyph);
            engine.render_append(glyph).unwrap();
        }
        assert_eq!(term.row_text(0), "> abc");
        assert_eq!(engine.anchors.render_end, CursorPos::new(5, 0));

        engine.input.content.pop();
        engine.render_backspace().unwrap();
        assert_eq!(term.row_text(0).trim_end(), "> ab");
        assert_eq!(engine.anchors.render_end, CursorPos::new(4, 0));
        assert_eq!(term.cursor().unwrap(), CursorPos::new(4, 0));
    }

    #[test]
    fn test_backspace_across_wrapped_row() {
        let (mut engine, term) = engine(BufferSize::new(5, 2), CursorPos::default(), "> ");
        engine.start_session().unwrap();
        engine.set_content("abcd".into());
        engine.re_render().unwrap();
        assert_eq!(term.screen_text(), vec!["> abc", "d"]);

        engine.input.content.truncate(2);
        engine.render_backspace().unwrap();

        assert_eq!(term.screen_text(), vec!["> ab ", " "]);
        assert_eq!(term.cursor().unwrap(), CursorPos::new(4, 0));
    }

    #[test]
    fn test_shorter_prefix_blanks_leftovers() {
        let (mut engine, term) = engine(BufferSize::new(20, 2), CursorPos::default(), ">>>> ");
        engine.start_session().unwrap();
        engine.set_content("xy".into());
        engine.re_render().unwrap();
        assert_eq!(term.row_text(0), ">>>> xy");

        engine.set_prefix("> ".into());
        engine.re_render().unwrap();

        assert_eq!(term.row_text(0).trim_end(), "> xy");
        assert_eq!(engine.anchors.render_end, CursorPos::new(4, 0));
    }

    #[test]
    fn test_content_uses_colors_left_by_prefix_and_ignores_markup() {
        let (mut engine, term) = engine(BufferSize::new(20, 2), CursorPos::default(), "§0A> ");
        engine.start_session().unwrap();

        engine.set_content("§CCx".into());
        engine.re_render().unwrap();

        assert_eq!(term.row_text(0), "> §CCx");
        let cell = term.cell(CursorPos::new(5, 0));
        assert_eq!(cell.foreground, Color::Green);
        assert_eq!(cell.background, Color::Black);
    }

    #[test]
    fn test_end_session_erases_prompt() {
        let (mut engine, term) = engine(BufferSize::new(20, 2), CursorPos::default(), "> ");
        engine.start_session().unwrap();
        engine.set_content("hello".into());
        engine.re_render().unwrap();

        engine.end_session().unwrap();

        assert_eq!(term.row_text(0).trim_end(), "");
        assert_eq!(term.cursor().unwrap(), CursorPos::new(0, 0));
        assert!(!engine.is_running);
        assert_eq!(engine.input.prefix, "");
    }
}
