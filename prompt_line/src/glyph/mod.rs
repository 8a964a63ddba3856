// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The glyph renderer: prints text one glyph at a time, interpreting color markup and
//! doing its own line wrapping so that the engine's cursor bookkeeping stays exact.

// Attach sources.
pub mod color_markup;
pub mod glyph_layout;
pub mod glyph_render;

// Re-export.
pub use color_markup::*;
pub use glyph_layout::*;
pub use glyph_render::*;
