// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! In-memory stand-ins for the terminal, the keyboard and the callbacks, so that a
//! [`crate::Prompt`] can be driven end to end in tests without a TTY.

// Attach sources.
pub mod key_fixtures;
pub mod mock_key_input;
pub mod mock_terminal;
pub mod recording_events;
pub mod stdout_mock;

// Re-export.
pub use key_fixtures::*;
pub use mock_key_input::*;
pub use mock_terminal::*;
pub use recording_events::*;
pub use stdout_mock::*;
