// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod input_loop;
pub mod key_handler;
pub mod output;
pub mod prompt_engine;
pub mod render;

// Re-export.
pub use input_loop::*;
pub use key_handler::*;
pub use prompt_engine::*;
