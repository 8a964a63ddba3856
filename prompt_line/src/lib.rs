// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # Table of contents
//!
//! <!-- TOC -->
//!
//! - [Introduction](#introduction)
//! - [Mental model](#mental-model)
//! - [Color markup](#color-markup)
//! - [How to use this crate](#how-to-use-this-crate)
//! - [Testing with injected terminals](#testing-with-injected-terminals)
//!
//! <!-- /TOC -->
//!
//! # Introduction
//!
//! `prompt_line` keeps a single editable input line pinned below whatever your program
//! prints. Your code keeps calling [`Prompt::write_line()`] from any thread, and the
//! input line (a prefix like `"> "` followed by whatever the user has typed so far) is
//! redrawn directly below the new output. Completed lines and raw key presses are
//! delivered to you through the [`PromptEvents`] trait.
//!
//! 1. Output never clobbers the input line, and the input line never gets stranded
//!    above new output. Every render affecting operation is serialized by one lock.
//! 2. Redraws are incremental. Typing a character prints exactly that character.
//!    Backspace only blanks the cells that the shorter line no longer covers. A full
//!    prefix + content redraw only happens when output is printed or the prefix changes.
//! 3. The crate never relies on the terminal's own auto wrap. It computes the display
//!    width of every glyph (wide CJK glyphs and emoji take two columns) and moves the
//!    cursor to the next row itself, growing (scrolling) the buffer when needed.
//!
//! # Mental model
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ some output printed earlier                  │
//! │ more output                                  │
//! │> hello wor█                                  │ ◄── render start = content start - prefix
//! └──────────────────────────────────────────────┘
//!   ▲ ▲        ▲
//!   │ │        └── render end (farthest cell drawn by the content)
//!   │ └── content start (where the typed text begins)
//!   └── render start (where the next output will be printed)
//! ```
//!
//! The three anchors are tracked in [`RenderAnchors`]. Two [`DirtyFlags`] record whether
//! the prefix and/or the content have to be redrawn. See [`PromptEngine`] for the
//! details of each render path.
//!
//! There are exactly two threads of control while a [`Prompt`] is running:
//! 1. Your thread(s), calling [`Prompt::write()`], [`Prompt::write_line()`],
//!    [`Prompt::set_prefix()`], etc.
//! 2. The input loop thread, started by [`Prompt::start()`], which polls the
//!    [`KeyInput`] at [`PromptConfig::input_poll_delay`] and applies each key.
//!
//! # Color markup
//!
//! When [`PromptConfig::is_markup_enabled`] is set, text written via [`Prompt::write()`]
//! and the prefix can carry color changes. A marker character (`§` by default) is
//! followed by two code characters: background, then foreground.
//!
//! | Code | Color       | Code | Color    |
//! | ---- | ----------- | ---- | -------- |
//! | `0`  | Black       | `8`  | DarkGray |
//! | `1`  | DarkBlue    | `9`  | Blue     |
//! | `2`  | DarkGreen   | `A`  | Green    |
//! | `3`  | DarkCyan    | `B`  | Cyan     |
//! | `4`  | DarkRed     | `C`  | Red      |
//! | `5`  | DarkMagenta | `D`  | Magenta  |
//! | `6`  | DarkYellow  | `E`  | Yellow   |
//! | `7`  | Gray        | `F`  | White    |
//!
//! `R` restores the remembered default color of that channel. Any other character
//! leaves the channel unchanged, so `"§ C"` only changes the foreground to red. Text
//! typed by the user is never interpreted as markup.
//!
//! # How to use this crate
//!
//! ```no_run
//! use prompt_line::{KeyHandled, Prompt, PromptConfig, PromptEvents};
//!
//! struct Echo;
//!
//! impl PromptEvents for Echo {
//!     fn on_submit(&mut self, prompt: &Prompt, line: String) {
//!         // The live input line is already empty here.
//!         _ = prompt.write_line(format!("§0Ayou typed:§RR {line}"));
//!         if line == "exit" {
//!             _ = prompt.stop();
//!         }
//!     }
//! }
//!
//! # fn main() -> miette::Result<()> {
//! let config = PromptConfig::default().with_prefix("> ").with_markup_enabled(true);
//! let Some(prompt) = Prompt::try_new_stdout(Echo, config)? else {
//!     return Ok(()); // Not an interactive terminal.
//! };
//! prompt.start()?;
//! prompt.write_line("type something, or `exit`")?;
//! prompt.wait_until_stopped()?;
//! # Ok(())
//! # }
//! ```
//!
//! The terminal is in raw mode while the [`Prompt`] exists, so <kbd>Ctrl+C</kbd> does
//! not raise a signal. Handle it in [`PromptEvents::on_key()`] if you need it.
//!
//! # Testing with injected terminals
//!
//! [`Prompt::new()`] takes any [`RawTerminal`] and any [`KeyInput`]. The
//! [`test_fixtures`] module has an in-memory cell grid ([`test_fixtures::MockTerminal`])
//! and a scripted key source ([`test_fixtures::MockKeyInput`]) that make the whole
//! engine testable without a TTY.

// https://github.com/rust-lang/rust-clippy
// https://rust-lang.github.io/rust-clippy/master/index.html
#![warn(rust_2018_idioms)]
// Enforce strict error handling in production code only.
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

// Attach sources.
pub mod decl_macros;
pub mod glyph;
pub mod prompt_impl;
pub mod public_api;
pub mod terminal;
pub mod test_fixtures;
pub mod tracing_logging;

// Re-export.
pub use glyph::*;
pub use prompt_impl::*;
pub use public_api::*;
pub use terminal::*;
pub use tracing_logging::*;

// Type aliases.
pub type StdMutex<T> = std::sync::Mutex<T>;

/// Default delay between two polls of the [`KeyInput`], in milliseconds.
pub const DEFAULT_INPUT_POLL_DELAY_MS: u64 = 50;

/// Default markup marker character.
pub const DEFAULT_MARKUP_MARKER: char = '§';
