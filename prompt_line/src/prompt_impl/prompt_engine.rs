// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{ColorMemory, ColorPair, CursorPos, Markup, PromptConfig, RawTerminal};
use std::{fmt::{self, Debug, Formatter},
          time::Duration};

/// What the user typed, and what is printed in front of it.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InputState {
    pub content: String,
    pub prefix: String,
}

/// The points the engine needs to redraw the input line without a full screen redraw.
///
/// ```text
/// > hello wor
/// ▲ ▲        ▲
/// │ │        └── render_end
/// │ └── content_start
/// └── render_start
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RenderAnchors {
    /// Where the prefix is drawn, and where the next output goes.
    pub render_start: CursorPos,
    /// Where the prefix ended, so where the content begins.
    pub content_start: CursorPos,
    /// Where the content ended the last time it was drawn. Anything between a shorter
    /// content's end and this point is leftover and has to be blanked.
    pub render_end: CursorPos,
}

impl RenderAnchors {
    /// All three anchors at `pos`, for a fresh session.
    #[must_use]
    pub fn collapsed_at(pos: CursorPos) -> Self {
        Self {
            render_start: pos,
            content_start: pos,
            render_end: pos,
        }
    }
}

/// Which parts of the input line are stale on screen. A flag is cleared right before
/// its part is redrawn, so a change made while drawing sets it again and is picked up
/// by the next render.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DirtyFlags {
    pub prefix: bool,
    pub content: bool,
}

impl DirtyFlags {
    pub fn mark_all(&mut self) {
        self.prefix = true;
        self.content = true;
    }
}

/// All the mutable render state of a [`crate::Prompt`]. It lives behind a single mutex,
/// and every operation that touches the terminal holds that lock for its whole
/// duration.
///
/// The operations are spread over a few files:
/// - render paths (full, append, backspace): [`crate::prompt_impl::render`]
/// - output above the input line: [`crate::prompt_impl::output`]
/// - per key state changes: [`crate::prompt_impl::key_handler`]
pub struct PromptEngine {
    pub terminal: Box<dyn RawTerminal>,
    pub input: InputState,
    pub anchors: RenderAnchors,
    pub dirty: DirtyFlags,
    pub colors: ColorMemory,
    /// The colors that were active right after the prefix was printed. The content is
    /// always drawn with these, so a prefix can end with a color change to style the
    /// typed text.
    pub content_colors: Option<ColorPair>,
    pub is_markup_enabled: bool,
    pub markup_marker: char,
    pub input_poll_delay: Duration,
    pub is_running: bool,
}

impl Debug for PromptEngine {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("PromptEngine")
            .field("input", &self.input)
            .field("anchors", &self.anchors)
            .field("dirty", &self.dirty)
            .field("is_markup_enabled", &self.is_markup_enabled)
            .field("markup_marker", &self.markup_marker)
            .field("input_poll_delay", &self.input_poll_delay)
            .field("is_running", &self.is_running)
            .finish_non_exhaustive()
    }
}

impl PromptEngine {
    #[must_use]
    pub fn new(terminal: Box<dyn RawTerminal>, config: PromptConfig) -> Self {
        Self {
            terminal,
            input: InputState {
                content: String::new(),
                prefix: config.prefix,
            },
            anchors: RenderAnchors::default(),
            dirty: DirtyFlags::default(),
            colors: ColorMemory::default(),
            content_colors: None,
            is_markup_enabled: config.is_markup_enabled,
            markup_marker: config.markup_marker,
            input_poll_delay: config.input_poll_delay,
            is_running: false,
        }
    }

    /// Markup setting for output and the prefix. Content is always [`Markup::Disabled`].
    #[must_use]
    pub fn markup(&self) -> Markup { Markup::new(self.is_markup_enabled, self.markup_marker) }

    pub fn set_prefix(&mut self, prefix: String) {
        self.input.prefix = prefix;
        self.dirty.prefix = true;
    }

    pub fn set_content(&mut self, content: String) {
        self.input.content = content;
        self.dirty.content = true;
    }
}
