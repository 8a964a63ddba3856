// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{ColorMemory, GlyphPlan, Markup, MarkupStep, MarkupToken, RawTerminal, ok,
            plan_glyph};
use std::io;

/// Print one glyph, or consume it as part of a color markup sequence.
///
/// `step` must be threaded through consecutive calls for the same piece of text, since a
/// markup sequence spans three glyphs. Line wrapping is done here and not by the
/// terminal: see [`plan_glyph()`] for the rules. The buffer is grown when the cursor
/// has to move past its last row.
///
/// # Errors
///
/// Returns an error if the terminal can't be written to.
pub fn emit_glyph(
    term: &mut dyn RawTerminal,
    colors: &mut ColorMemory,
    glyph: char,
    markup: Markup,
    step: &mut MarkupStep,
) -> io::Result<()> {
    // Capture the defaults before the first color change.
    colors.defaults(term);

    match step.advance(glyph, markup) {
        MarkupToken::Marker => ok!(),
        MarkupToken::Background(code) => colors.apply_background(term, code),
        MarkupToken::Foreground(code) => colors.apply_foreground(term, code),
        MarkupToken::Glyph(glyph) => {
            let buffer_width = term.buffer_size()?.width;
            let col = term.cursor()?.col;
            match plan_glyph(glyph, col, buffer_width) {
                GlyphPlan::Skip => ok!(),
                GlyphPlan::LineBreak => {
                    pad_to_row_end(term, buffer_width)?;
                    move_to_next_row(term)
                }
                GlyphPlan::Print {
                    render_as,
                    wrap_before,
                    wrap_after,
                    ..
                } => {
                    if wrap_before {
                        pad_to_row_end(term, buffer_width)?;
                        move_to_next_row(term)?;
                    }
                    term.write_glyph(render_as)?;
                    if wrap_after {
                        move_to_next_row(term)?;
                    }
                    ok!()
                }
            }
        }
    }
}

/// Print `text` glyph by glyph with a fresh [`MarkupStep`].
///
/// # Errors
///
/// Returns an error if the terminal can't be written to.
pub fn emit_str(
    term: &mut dyn RawTerminal,
    colors: &mut ColorMemory,
    text: &str,
    markup: Markup,
) -> io::Result<()> {
    let mut step = MarkupStep::default();
    for glyph in text.chars() {
        emit_glyph(term, colors, glyph, markup, &mut step)?;
    }
    ok!()
}

fn pad_to_row_end(term: &mut dyn RawTerminal, buffer_width: usize) -> io::Result<()> {
    let col = term.cursor()?.col;
    for _ in col..buffer_width {
        term.write_glyph(' ')?;
    }
    ok!()
}

/// Column 0 of the next row, growing the buffer if the cursor is on its last row.
fn move_to_next_row(term: &mut dyn RawTerminal) -> io::Result<()> {
    let pos = term.cursor()?;
    if pos.row + 1 >= term.buffer_size()?.height {
        term.grow_buffer_height()?;
    }
    term.set_cursor(pos.next_row_start())
}
