// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crossterm::{event::KeyEvent, style::Color};
use std::{fmt::{self, Display, Formatter},
          io,
          time::Duration};

/// An absolute position in the terminal buffer.
///
/// Rows come first so that the derived [`Ord`] is row-major: a position is "before"
/// another one if it is on an earlier row, or on the same row at an earlier column. The
/// blank padding in [`crate::PromptEngine::blank_till_render_end()`] depends on this.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CursorPos {
    pub row: usize,
    pub col: usize,
}

impl CursorPos {
    #[must_use]
    pub const fn new(col: usize, row: usize) -> Self { Self { row, col } }

    /// First column of the next row.
    #[must_use]
    pub const fn next_row_start(self) -> Self { Self::new(0, self.row + 1) }
}

impl Display for CursorPos {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "[col: {}, row: {}]", self.col, self.row)
    }
}

/// Dimensions of the terminal buffer. The height can grow while the prompt is running,
/// see [`RawTerminal::grow_buffer_height()`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferSize {
    pub width: usize,
    pub height: usize,
}

impl BufferSize {
    #[must_use]
    pub const fn new(width: usize, height: usize) -> Self { Self { width, height } }
}

/// The output side of the terminal, owned by the engine and only ever touched while the
/// engine lock is held.
///
/// Implementations keep their own cursor bookkeeping. [`Self::write_glyph()`] must
/// advance the cursor column by the display width of the glyph and must never wrap on
/// its own; the glyph renderer in [`crate::glyph`] decides when to move to the next row.
pub trait RawTerminal: Send {
    /// Current cursor position.
    ///
    /// # Errors
    ///
    /// Returns an error if the position can't be determined.
    fn cursor(&self) -> io::Result<CursorPos>;

    /// # Errors
    ///
    /// Returns an error if the position is outside of the buffer or the terminal can't
    /// be written to.
    fn set_cursor(&mut self, pos: CursorPos) -> io::Result<()>;

    /// # Errors
    ///
    /// Returns an error if the size can't be determined.
    fn buffer_size(&self) -> io::Result<BufferSize>;

    /// Add one row at the bottom of the buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal can't be written to.
    fn grow_buffer_height(&mut self) -> io::Result<()>;

    fn foreground(&self) -> Color;

    fn background(&self) -> Color;

    /// # Errors
    ///
    /// Returns an error if the terminal can't be written to.
    fn set_foreground(&mut self, color: Color) -> io::Result<()>;

    /// # Errors
    ///
    /// Returns an error if the terminal can't be written to.
    fn set_background(&mut self, color: Color) -> io::Result<()>;

    /// # Errors
    ///
    /// Returns an error if the terminal can't be written to.
    fn set_cursor_visible(&mut self, is_visible: bool) -> io::Result<()>;

    /// Print one glyph at the cursor using the current colors.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal can't be written to.
    fn write_glyph(&mut self, glyph: char) -> io::Result<()>;

    /// # Errors
    ///
    /// Returns an error if the terminal can't be written to.
    fn flush(&mut self) -> io::Result<()>;
}

/// The input side of the terminal, owned by the input loop. It is kept separate from
/// [`RawTerminal`] so that waiting for a key never holds the engine lock.
pub trait KeyInput: Send {
    /// Wait at most `timeout` for a key to become available.
    ///
    /// # Errors
    ///
    /// Returns an error if the input device can't be polled.
    fn poll_key(&mut self, timeout: Duration) -> io::Result<bool>;

    /// Read the next event. Returns [`None`] for events that are not key presses (for
    /// example a resize or a key release).
    ///
    /// # Errors
    ///
    /// Returns an error if the input device can't be read.
    fn read_key(&mut self) -> io::Result<Option<KeyEvent>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_pos_is_row_major() {
        let a = CursorPos::new(79, 0);
        let b = CursorPos::new(0, 1);
        assert!(a < b);
        assert!(CursorPos::new(3, 2) < CursorPos::new(4, 2));
        assert_eq!(a.next_row_start(), CursorPos::new(0, 1));
    }

    #[test]
    fn test_cursor_pos_display() {
        assert_eq!(CursorPos::new(3, 7).to_string(), "[col: 3, row: 7]");
    }
}
