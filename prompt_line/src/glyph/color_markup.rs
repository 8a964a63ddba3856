// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{RawTerminal, ok};
use crossterm::style::Color;
use std::io;
use strum_macros::{Display, EnumIter};

/// Whether text is scanned for color markup, and which marker introduces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Markup {
    Enabled { marker: char },
    Disabled,
}

impl Markup {
    #[must_use]
    pub fn new(is_enabled: bool, marker: char) -> Self {
        if is_enabled {
            Self::Enabled { marker }
        } else {
            Self::Disabled
        }
    }
}

/// Where the markup parser is between two glyphs. A color change is three glyphs long
/// (`<marker><bg><fg>`) so this has to be carried from one call to the next.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum MarkupStep {
    #[default]
    Normal,
    ExpectBackground,
    ExpectForeground,
}

/// Result of feeding one glyph to [`MarkupStep::advance()`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkupToken {
    /// Not markup, print it.
    Glyph(char),
    /// The marker itself. Nothing to do yet.
    Marker,
    Background(ColorCode),
    Foreground(ColorCode),
}

impl MarkupStep {
    /// Classify `glyph` and move to the next step.
    pub fn advance(&mut self, glyph: char, markup: Markup) -> MarkupToken {
        let Markup::Enabled { marker } = markup else {
            return MarkupToken::Glyph(glyph);
        };
        match self {
            Self::Normal if glyph == marker => {
                *self = Self::ExpectBackground;
                MarkupToken::Marker
            }
            Self::Normal => MarkupToken::Glyph(glyph),
            Self::ExpectBackground => {
                *self = Self::ExpectForeground;
                MarkupToken::Background(ColorCode::parse(glyph))
            }
            Self::ExpectForeground => {
                *self = Self::Normal;
                MarkupToken::Foreground(ColorCode::parse(glyph))
            }
        }
    }
}

/// The 16 colors of the markup alphabet, in code order (`0` to `F`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display)]
pub enum MarkupColor {
    Black,
    DarkBlue,
    DarkGreen,
    DarkCyan,
    DarkRed,
    DarkMagenta,
    DarkYellow,
    Gray,
    DarkGray,
    Blue,
    Green,
    Cyan,
    Red,
    Magenta,
    Yellow,
    White,
}

impl MarkupColor {
    /// `0`-`9`, `a`-`f`, `A`-`F`.
    #[must_use]
    pub fn from_code(code: char) -> Option<Self> {
        Some(match code.to_digit(16)? {
            0 => Self::Black,
            1 => Self::DarkBlue,
            2 => Self::DarkGreen,
            3 => Self::DarkCyan,
            4 => Self::DarkRed,
            5 => Self::DarkMagenta,
            6 => Self::DarkYellow,
            7 => Self::Gray,
            8 => Self::DarkGray,
            9 => Self::Blue,
            10 => Self::Green,
            11 => Self::Cyan,
            12 => Self::Red,
            13 => Self::Magenta,
            14 => Self::Yellow,
            _ => Self::White,
        })
    }

    /// Upper case code character.
    #[must_use]
    pub fn code(self) -> char {
        let index = match self {
            Self::Black => 0,
            Self::DarkBlue => 1,
            Self::DarkGreen => 2,
            Self::DarkCyan => 3,
            Self::DarkRed => 4,
            Self::DarkMagenta => 5,
            Self::DarkYellow => 6,
            Self::Gray => 7,
            Self::DarkGray => 8,
            Self::Blue => 9,
            Self::Green => 10,
            Self::Cyan => 11,
            Self::Red => 12,
            Self::Magenta => 13,
            Self::Yellow => 14,
            Self::White => 15,
        };
        char::from_digit(index, 16).map_or('F', |it| it.to_ascii_uppercase())
    }
}

impl From<MarkupColor> for Color {
    fn from(color: MarkupColor) -> Self {
        match color {
            MarkupColor::Black => Color::Black,
            MarkupColor::DarkBlue => Color::DarkBlue,
            MarkupColor::DarkGreen => Color::DarkGreen,
            MarkupColor::DarkCyan => Color::DarkCyan,
            MarkupColor::DarkRed => Color::DarkRed,
            MarkupColor::DarkMagenta => Color::DarkMagenta,
            MarkupColor::DarkYellow => Color::DarkYellow,
            MarkupColor::Gray => Color::Grey,
            MarkupColor::DarkGray => Color::DarkGrey,
            MarkupColor::Blue => Color::Blue,
            MarkupColor::Green => Color::Green,
            MarkupColor::Cyan => Color::Cyan,
            MarkupColor::Red => Color::Red,
            MarkupColor::Magenta => Color::Magenta,
            MarkupColor::Yellow => Color::Yellow,
            MarkupColor::White => Color::White,
        }
    }
}

/// What a single code character asks for on its channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorCode {
    Set(MarkupColor),
    /// `r` or `R`: back to the remembered default.
    Reset,
    /// Anything else. Lets `"§ C"` change only the foreground.
    Unchanged,
}

impl ColorCode {
    #[must_use]
    pub fn parse(code: char) -> Self {
        match code {
            'r' | 'R' => Self::Reset,
            _ => MarkupColor::from_code(code).map_or(Self::Unchanged, Self::Set),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPair {
    pub foreground: Color,
    pub background: Color,
}

impl ColorPair {
    /// The colors the terminal is using right now.
    pub fn capture(term: &dyn RawTerminal) -> Self {
        Self {
            foreground: term.foreground(),
            background: term.background(),
        }
    }

    /// # Errors
    ///
    /// Returns an error if the terminal can't be written to.
    pub fn apply(self, term: &mut dyn RawTerminal) -> io::Result<()> {
        term.set_foreground(self.foreground)?;
        term.set_background(self.background)?;
        ok!()
    }
}

/// The remembered default colors. They are captured from the terminal the first time
/// this is used, and restored by `R` codes and before every engine render.
#[derive(Debug, Default, Clone, Copy)]
pub struct ColorMemory {
    defaults: Option<ColorPair>,
}

impl ColorMemory {
    pub fn defaults(&mut self, term: &dyn RawTerminal) -> ColorPair {
        *self.defaults.get_or_insert_with(|| ColorPair::capture(term))
    }

    /// Restore both channels.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal can't be written to.
    pub fn reset(&mut self, term: &mut dyn RawTerminal) -> io::Result<()> {
        self.defaults(term).apply(term)
    }

    /// # Errors
    ///
    /// Returns an error if the terminal can't be written to.
    pub fn apply_background(
        &mut self,
        term: &mut dyn RawTerminal,
        code: ColorCode,
    ) -> io::Result<()> {
        match code {
            ColorCode::Set(color) => term.set_background(color.into()),
            ColorCode::Reset => {
                let background = self.defaults(term).background;
                term.set_background(background)
            }
            ColorCode::Unchanged => ok!(),
        }
    }

    /// # Errors
    ///
    /// Returns an error if the terminal can't be written to.
    pub fn apply_foreground(
        &mut self,
        term: &mut dyn RawTerminal,
        code: ColorCode,
    ) -> io::Result<()> {
        match code {
            ColorCode::Set(color) => term.set_foreground(color.into()),
            ColorCode::Reset => {
                let foreground = self.defaults(term).foreground;
                term.set_foreground(foreground)
            }
            ColorCode::Unchanged => ok!(),
        }
    }
}
