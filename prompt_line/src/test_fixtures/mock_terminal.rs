// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{BufferSize, CursorPos, RawTerminal, StdMutex, display_width, ok};
use crossterm::style::Color;
use std::{io,
          sync::{Arc, MutexGuard, PoisonError}};

/// One cell of the [`MockTerminal`] grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockCell {
    /// Empty if nothing was ever written here. A combining glyph is appended to the text
    /// of the cell before it.
    pub text: String,
    pub foreground: Color,
    pub background: Color,
    /// The right half of a 2 column glyph.
    pub is_wide_continuation: bool,
}

impl Default for MockCell {
    fn default() -> Self {
        Self {
            text: String::new(),
            foreground: Color::Reset,
            background: Color::Reset,
            is_wide_continuation: false,
        }
    }
}

#[derive(Debug)]
pub struct MockScreen {
    pub size: BufferSize,
    pub rows: Vec<Vec<MockCell>>,
    pub cursor: CursorPos,
    pub foreground: Color,
    pub background: Color,
    pub is_cursor_visible: bool,
    pub grow_count: usize,
    pub flush_count: usize,
    /// When set, every [`RawTerminal::write_glyph()`] fails.
    pub is_failing_writes: bool,
}

/// An in-memory cell grid implementing [`RawTerminal`].
///
/// It is strict on purpose: moving the cursor outside of the buffer, or writing a glyph
/// that doesn't fit before the right edge, returns an error. Since the engine never
/// relies on terminal auto wrap, either one means its bookkeeping is off.
///
/// You can safely clone this struct, since it only contains an `Arc<StdMutex<_>>`. Give
/// one clone to the [`crate::Prompt`] and keep another to inspect the screen.
#[derive(Debug, Clone)]
pub struct MockTerminal {
    pub screen: Arc<StdMutex<MockScreen>>,
}

impl MockTerminal {
    #[must_use]
    pub fn new(size: BufferSize, cursor: CursorPos) -> Self {
        let screen = MockScreen {
            size,
            rows: vec![vec![MockCell::default(); size.width]; size.height],
            cursor,
            foreground: Color::Reset,
            background: Color::Reset,
            is_cursor_visible: true,
            grow_count: 0,
            flush_count: 0,
            is_failing_writes: false,
        };
        Self {
            screen: Arc::new(StdMutex::new(screen)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, MockScreen> {
        self.screen.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Text of `row`, up to the last cell that was ever written. Cells in between that
    /// were never written read as spaces.
    #[must_use]
    pub fn row_text(&self, row: usize) -> String {
        let screen = self.lock();
        screen.rows.get(row).map(|cells| row_to_string(cells)).unwrap_or_default()
    }

    /// [`Self::row_text()`] for every row of the buffer.
    #[must_use]
    pub fn screen_text(&self) -> Vec<String> {
        let screen = self.lock();
        screen.rows.iter().map(|cells| row_to_string(cells)).collect()
    }

    /// # Panics
    ///
    /// Panics if `pos` is outside of the buffer.
    #[must_use]
    pub fn cell(&self, pos: CursorPos) -> MockCell {
        self.lock().rows[pos.row][pos.col].clone()
    }

    #[must_use]
    pub fn grow_count(&self) -> usize { self.lock().grow_count }

    #[must_use]
    pub fn flush_count(&self) -> usize { self.lock().flush_count }

    #[must_use]
    pub fn is_cursor_visible(&self) -> bool { self.lock().is_cursor_visible }

    pub fn set_failing_writes(&self, is_failing: bool) {
        self.lock().is_failing_writes = is_failing;
    }
}

fn row_to_string(cells: &[MockCell]) -> String {
    let Some(last) = cells.iter().rposition(|cell| !cell.text.is_empty()) else {
        return String::new();
    };
    cells[..=last]
        .iter()
        .filter(|cell| !cell.is_wide_continuation)
        .map(|cell| if cell.text.is_empty() { " " } else { cell.text.as_str() })
        .collect()
}

fn out_of_bounds(what: &str, pos: CursorPos, size: BufferSize) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidInput,
        format!(
            "{what} at {pos} is outside of the {}x{} buffer",
            size.width, size.height
        ),
    )
}

impl RawTerminal for MockTerminal {
    fn cursor(&self) -> io::Result<CursorPos> { ok!(self.lock().cursor) }

    fn set_cursor(&mut self, pos: CursorPos) -> io::Result<()> {
        let mut screen = self.lock();
        if pos.col >= screen.size.width || pos.row >= screen.size.height {
            return Err(out_of_bounds("cursor", pos, screen.size));
        }
        screen.cursor = pos;
        ok!()
    }

    fn buffer_size(&self) -> io::Result<BufferSize> { ok!(self.lock().size) }

    fn grow_buffer_height(&mut self) -> io::Result<()> {
        let mut screen = self.lock();
        let width = screen.size.width;
        screen.rows.push(vec![MockCell::default(); width]);
        screen.size.height += 1;
        screen.grow_count += 1;
        ok!()
    }

    fn foreground(&self) -> Color { self.lock().foreground }

    fn background(&self) -> Color { self.lock().background }

    fn set_foreground(&mut self, color: Color) -> io::Result<()> {
        self.lock().foreground = color;
        ok!()
    }

    fn set_background(&mut self, color: Color) -> io::Result<()> {
        self.lock().background = color;
        ok!()
    }

    fn set_cursor_visible(&mut self, is_visible: bool) -> io::Result<()> {
        self.lock().is_cursor_visible = is_visible;
        ok!()
    }

    fn write_glyph(&mut self, glyph: char) -> io::Result<()> {
        let mut screen = self.lock();
        if screen.is_failing_writes {
            return Err(io::Error::other("mock terminal write failure"));
        }

        let pos = screen.cursor;
        let width = display_width(glyph);
        if pos.row >= screen.size.height {
            return Err(out_of_bounds("write", pos, screen.size));
        }

        if width == 0 {
            let col = pos.col.saturating_sub(1).min(screen.size.width.saturating_sub(1));
            screen.rows[pos.row][col].text.push(glyph);
            return ok!();
        }

        if pos.col + width > screen.size.width {
            return Err(out_of_bounds("write", pos, screen.size));
        }

        let (foreground, background) = (screen.foreground, screen.background);
        let row = &mut screen.rows[pos.row];
        row[pos.col] = MockCell {
            text: glyph.to_string(),
            foreground,
            background,
            is_wide_continuation: false,
        };
        for cell in &mut row[pos.col + 1..pos.col + width] {
            *cell = MockCell {
                text: String::new(),
                foreground,
                background,
                is_wide_continuation: true,
            };
        }
        screen.cursor.col += width;
        ok!()
    }

    fn flush(&mut self) -> io::Result<()> {
        self.lock().flush_count += 1;
        ok!()
    }
}
