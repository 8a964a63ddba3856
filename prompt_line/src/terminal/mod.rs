// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The terminal adapter. [`RawTerminal`] is the output surface the engine draws on and
//! [`KeyInput`] is the key source the input loop polls. The crossterm backed
//! implementations talk to the real terminal; the fakes in [`crate::test_fixtures`]
//! stand in for them in tests.

// Attach sources.
pub mod crossterm_key_input;
pub mod crossterm_terminal;
pub mod term_detect;
pub mod terminal_api;

// Re-export.
pub use crossterm_key_input::*;
pub use crossterm_terminal::*;
pub use term_detect::*;
pub use terminal_api::*;
