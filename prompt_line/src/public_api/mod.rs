// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod prompt;
pub mod prompt_config;
pub mod prompt_error;
pub mod prompt_events;
pub mod prompt_writer;

// Re-export.
pub use prompt::*;
pub use prompt_config::*;
pub use prompt_error::*;
pub use prompt_events::*;
pub use prompt_writer::*;
