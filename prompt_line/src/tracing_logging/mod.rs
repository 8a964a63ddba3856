// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Set up a [`tracing`] subscriber that writes to stdout, stderr, a file, or above the
//! input line of a running [`crate::Prompt`].

// Attach sources.
pub mod rolling_file_appender_impl;
pub mod tracing_config;
pub mod tracing_init;

// Re-export.
pub use tracing_config::*;
pub use tracing_init::*;
