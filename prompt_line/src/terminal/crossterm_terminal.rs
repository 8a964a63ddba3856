// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{BufferSize, CursorPos, RawTerminal, display_width, ok};
use crossterm::{QueueableCommand,
                cursor::{self, Hide, MoveTo, Show},
                style::{Color, Print, ResetColor, SetBackgroundColor,
                        SetForegroundColor},
                terminal::{self, ScrollUp}};
use std::io::{self, Write};

/// Where [`CrosstermTerminal`] gets the screen size from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenSizeSource {
    /// Ask the terminal every time ([`crossterm::terminal::size()`]), so resizes are
    /// picked up.
    Live,
    /// Use this size (columns, rows). Handy for tests.
    Fixed(BufferSize),
}

/// [`RawTerminal`] backed by [`crossterm`] commands queued into any [`Write`]r,
/// typically [`std::io::Stdout`].
///
/// # Virtual rows
///
/// A real terminal can't grow its buffer like a console window can. When the engine
/// asks to grow the buffer at the bottom edge, the screen is scrolled up by one line and
/// [`Self::scroll_offset`] is incremented. All positions exchanged with the engine are in
/// virtual rows (`screen row + scroll offset`), so anchors captured before the scroll
/// still point at the same content afterwards. Rows that scrolled off the top are
/// clamped to screen row 0.
///
/// The cursor and colors are tracked here rather than queried from the terminal, which
/// would need a round trip per query.
#[derive(Debug)]
pub struct CrosstermTerminal<W: Write + Send> {
    output: W,
    cursor: CursorPos,
    scroll_offset: usize,
    foreground: Color,
    background: Color,
    screen_size_source: ScreenSizeSource,
}

impl<W: Write + Send> CrosstermTerminal<W> {
    /// Start at the terminal's current cursor position, with a live screen size.
    ///
    /// # Errors
    ///
    /// Returns an error if the cursor position can't be read from the terminal.
    pub fn try_new(output: W) -> io::Result<Self> {
        let (col, row) = cursor::position()?;
        Ok(Self::new_with_geometry(
            output,
            CursorPos::new(usize::from(col), usize::from(row)),
            ScreenSizeSource::Live,
        ))
    }

    pub fn new_with_geometry(
        output: W,
        cursor: CursorPos,
        screen_size_source: ScreenSizeSource,
    ) -> Self {
        Self {
            output,
            cursor,
            scroll_offset: 0,
            foreground: Color::Reset,
            background: Color::Reset,
            screen_size_source,
        }
    }

    /// Number of rows that have been scrolled off the top of the screen.
    #[must_use]
    pub fn scroll_offset(&self) -> usize { self.scroll_offset }

    fn screen_size(&self) -> io::Result<BufferSize> {
        match self.screen_size_source {
            ScreenSizeSource::Live => {
                let (columns, rows) = terminal::size()?;
                ok!(BufferSize::new(usize::from(columns), usize::from(rows)))
            }
            ScreenSizeSource::Fixed(size) => ok!(size),
        }
    }
}

fn to_u16(value: usize) -> u16 { u16::try_from(value).unwrap_or(u16::MAX) }

impl<W: Write + Send> RawTerminal for CrosstermTerminal<W> {
    fn cursor(&self) -> io::Result<CursorPos> { ok!(self.cursor) }

    fn set_cursor(&mut self, pos: CursorPos) -> io::Result<()> {
        let screen = self.screen_size()?;
        let col = pos.col.min(screen.width.saturating_sub(1));
        let screen_row = pos
            .row
            .saturating_sub(self.scroll_offset)
            .min(screen.height.saturating_sub(1));
        self.output.queue(MoveTo(to_u16(col), to_u16(screen_row)))?;
        self.cursor = CursorPos::new(col, screen_row + self.scroll_offset);
        ok!()
    }

    fn buffer_size(&self) -> io::Result<BufferSize> {
        let screen = self.screen_size()?;
        ok!(BufferSize::new(
            screen.width,
            screen.height + self.scroll_offset
        ))
    }

    fn grow_buffer_height(&mut self) -> io::Result<()> {
        self.output.queue(ScrollUp(1))?;
        self.scroll_offset += 1;
        ok!()
    }

    fn foreground(&self) -> Color { self.foreground }

    fn background(&self) -> Color { self.background }

    fn set_foreground(&mut self, color: Color) -> io::Result<()> {
        self.output.queue(SetForegroundColor(color))?;
        self.foreground = color;
        ok!()
    }

    fn set_background(&mut self, color: Color) -> io::Result<()> {
        self.output.queue(SetBackgroundColor(color))?;
        self.background = color;
        ok!()
    }

    fn set_cursor_visible(&mut self, is_visible: bool) -> io::Result<()> {
        if is_visible {
            self.output.queue(Show)?;
        } else {
            self.output.queue(Hide)?;
        }
        ok!()
    }

    fn write_glyph(&mut self, glyph: char) -> io::Result<()> {
        self.output.queue(Print(glyph))?;
        self.cursor.col += display_width(glyph);
        ok!()
    }

    fn flush(&mut self) -> io::Result<()> { self.output.flush() }
}

impl<W: Write + Send> Drop for CrosstermTerminal<W> {
    fn drop(&mut self) {
        // We don't care about the result of these operations.
        self.output.queue(ResetColor).ok();
        self.output.queue(Show).ok();
        self.output.flush().ok();
    }
}
