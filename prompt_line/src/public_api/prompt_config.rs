// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{DEFAULT_INPUT_POLL_DELAY_MS, DEFAULT_MARKUP_MARKER};
use std::time::Duration;

/// Initial settings for a [`crate::Prompt`]. Every one of them can also be changed while
/// the prompt is running, see the setters on [`crate::Prompt`].
///
/// ```
/// use prompt_line::PromptConfig;
/// use std::time::Duration;
///
/// let config = PromptConfig::default()
///     .with_prefix("§0Eλ§RR ")
///     .with_markup_enabled(true)
///     .with_input_poll_delay(Duration::from_millis(20));
/// assert_eq!(config.markup_marker, '§');
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptConfig {
    /// How long the input loop waits for a key before checking for cancellation again.
    pub input_poll_delay: Duration,
    /// Whether output and the prefix are scanned for color markup.
    pub is_markup_enabled: bool,
    pub markup_marker: char,
    /// Printed in front of the input content, for example `"> "`.
    pub prefix: String,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            input_poll_delay: Duration::from_millis(DEFAULT_INPUT_POLL_DELAY_MS),
            is_markup_enabled: false,
            markup_marker: DEFAULT_MARKUP_MARKER,
            prefix: String::new(),
        }
    }
}

impl PromptConfig {
    #[must_use]
    pub fn with_input_poll_delay(mut self, delay: Duration) -> Self {
        self.input_poll_delay = delay;
        self
    }

    #[must_use]
    pub fn with_markup_enabled(mut self, is_enabled: bool) -> Self {
        self.is_markup_enabled = is_enabled;
        self
    }

    #[must_use]
    pub fn with_markup_marker(mut self, marker: char) -> Self {
        self.markup_marker = marker;
        self
    }

    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }
}
