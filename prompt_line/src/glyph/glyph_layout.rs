// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Pure cursor math. [`plan_glyph()`] decides what printing a glyph does to the cursor,
//! and is shared by the renderer (which performs the plan on a [`crate::RawTerminal`])
//! and by [`landing_point()`] (which only computes where the cursor ends up).

use crate::{CursorPos, Markup, MarkupStep, MarkupToken};
use unicode_width::UnicodeWidthChar;

/// Number of terminal columns `glyph` occupies.
///
/// - Most glyphs are 1 column, CJK and emoji are 2.
/// - Combining marks are 0; they are drawn on top of the previous cell.
/// - Control characters are 0 and never written, except `\t` which is drawn as a single
///   space.
#[must_use]
pub fn display_width(glyph: char) -> usize {
    match glyph {
        '\t' => 1,
        it if it.is_control() => 0,
        it => it.width().unwrap_or(0),
    }
}

/// Total display width of `text`, ignoring wrapping and markup.
#[must_use]
pub fn display_width_of_str(text: &str) -> usize { text.chars().map(display_width).sum() }

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlyphPlan {
    /// `\r` and other control characters: nothing is printed, the cursor stays.
    Skip,
    /// `\n`: pad the rest of the row with spaces, then go to the next row.
    LineBreak,
    Print {
        /// What actually goes to the terminal (`\t` becomes a space).
        render_as: char,
        width: usize,
        /// A wide glyph that doesn't fit in the remaining columns goes to the next row,
        /// after the remaining columns are padded.
        wrap_before: bool,
        /// The glyph ends exactly on the last column, so the cursor moves to the next
        /// row instead of relying on the terminal's own wrap.
        wrap_after: bool,
    },
}

#[must_use]
pub fn plan_glyph(glyph: char, col: usize, buffer_width: usize) -> GlyphPlan {
    match glyph {
        '\n' => GlyphPlan::LineBreak,
        '\t' => print_plan(' ', 1, col, buffer_width),
        it if it.is_control() => GlyphPlan::Skip,
        it => print_plan(it, display_width(it), col, buffer_width),
    }
}

fn print_plan(render_as: char, width: usize, col: usize, buffer_width: usize) -> GlyphPlan {
    let wrap_before = width > 0 && col > 0 && col + width > buffer_width;
    let start_col = if wrap_before { 0 } else { col };
    let wrap_after = width > 0 && start_col + width == buffer_width;
    GlyphPlan::Print {
        render_as,
        width,
        wrap_before,
        wrap_after,
    }
}

/// Where the cursor is after `plan` has been performed starting at `pos`.
#[must_use]
pub fn advance(pos: CursorPos, plan: GlyphPlan) -> CursorPos {
    match plan {
        GlyphPlan::Skip => pos,
        GlyphPlan::LineBreak => pos.next_row_start(),
        GlyphPlan::Print {
            width,
            wrap_before,
            wrap_after,
            ..
        } => {
            let start = if wrap_before { pos.next_row_start() } else { pos };
            let end = CursorPos::new(start.col + width, start.row);
            if wrap_after { end.next_row_start() } else { end }
        }
    }
}

/// Where the cursor lands after printing `text` from `start` on a buffer that is
/// `buffer_width` columns wide. Markup sequences don't move the cursor.
#[must_use]
pub fn landing_point(
    start: CursorPos,
    text: &str,
    markup: Markup,
    buffer_width: usize,
) -> CursorPos {
    let mut step = MarkupStep::default();
    text.chars().fold(start, |pos, glyph| match step.advance(glyph, markup) {
        MarkupToken::Glyph(glyph) => advance(pos, plan_glyph(glyph, pos.col, buffer_width)),
        _ => pos,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case('a', 1)]
    #[test_case('世', 2)]
    #[test_case('😀', 2)]
    #[test_case('\u{301}', 0; "combining acute accent")]
    #[test_case('\t', 1)]
    #[test_case('\r', 0)]
    #[test_case('\u{7}', 0; "bell")]
    fn test_display_width(glyph: char, expected: usize) {
        assert_eq!(display_width(glyph), expected);
    }

    #[test]
    fn test_plan_wraps_after_last_column() {
        assert_eq!(plan_glyph('x', 9, 10), GlyphPlan::Print {
            render_as: 'x',
            width: 1,
            wrap_before: false,
            wrap_after: true,
        });
        assert_eq!(plan_glyph('世', 8, 10), GlyphPlan::Print {
            render_as: '世',
            width: 2,
            wrap_before: false,
            wrap_after: true,
        });
    }

    #[test]
    fn test_plan_wraps_wide_glyph_before_straddling() {
        assert_eq!(plan_glyph('世', 9, 10), GlyphPlan::Print {
            render_as: '世',
            width: 2,
            wrap_before: true,
            wrap_after: false,
        });
    }

    #[test]
    fn test_plan_control_characters() {
        assert_eq!(plan_glyph('\n', 3, 10), GlyphPlan::LineBreak);
        assert_eq!(plan_glyph('\r', 3, 10), GlyphPlan::Skip);
        assert!(matches!(
            plan_glyph('\t', 3, 10),
            GlyphPlan::Print { render_as: ' ', width: 1, .. }
        ));
    }

    #[test_case(CursorPos::new(2, 0), "hi", CursorPos::new(4, 0))]
    #[test_case(CursorPos::new(8, 0), "ab", CursorPos::new(0, 1); "fills the row")]
    #[test_case(CursorPos::new(8, 0), "abc", CursorPos::new(1, 1); "wraps")]
    #[test_case(CursorPos::new(9, 3), "世", CursorPos::new(2, 4); "wide wraps early")]
    #[test_case(CursorPos::new(5, 0), "a\nb", CursorPos::new(1, 1); "line break")]
    #[test_case(CursorPos::new(0, 0), "e\u{301}", CursorPos::new(1, 0); "combining")]
    fn test_landing_point_plain(start: CursorPos, text: &str, expected: CursorPos) {
        assert_eq!(landing_point(start, text, Markup::Disabled, 10), expected);
    }

    #[test]
    fn test_landing_point_skips_markup() {
        let markup = Markup::Enabled { marker: '§' };
        assert_eq!(
            landing_point(CursorPos::default(), "§8E> §RR", markup, 10),
            CursorPos::new(2, 0)
        );
        // Disabled markup prints the marker and codes literally.
        assert_eq!(
            landing_point(CursorPos::default(), "§8E> ", Markup::Disabled, 10),
            CursorPos::new(5, 0)
        );
    }
}
