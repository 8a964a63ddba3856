// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{Prompt, try_create_layers};
use std::fmt::{self, Debug, Formatter};
use tracing::subscriber::DefaultGuard;
use tracing_core::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub const DEFAULT_LOG_FILE_PATH: &str = "prompt_line_debug.log";

/// Configure the tracing logging to suit your needs. You can display the logs to a:
/// 1. file,
/// 2. stdout, stderr, or above the input line of a [`Prompt`],
/// 3. both.
///
/// This configuration also allows you to set the log level.
///
/// Use [`crate::init()`] to initialize the global tracing system with this
/// configuration, or [`Self::install_thread_local()`] to scope it to the current
/// thread (useful in tests).
#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub writer_config: WriterConfig,
    pub level: tracing::Level,
}

#[derive(Debug, Clone)]
pub enum WriterConfig {
    None,
    Display(DisplayPreference),
    File(String /* tracing_log_file_path */),
    DisplayAndFile(DisplayPreference, String /* tracing_log_file_path */),
}

#[derive(Clone)]
pub enum DisplayPreference {
    Stdout,
    Stderr,
    /// Print each log line above the input line, through a [`crate::PromptWriter`].
    /// Writing to stdout directly while a prompt is running would clobber it. The layer
    /// doesn't keep the prompt alive, once it is dropped log lines go to stderr.
    Prompt(Prompt),
}

impl Debug for DisplayPreference {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            DisplayPreference::Stdout => write!(f, "Stdout"),
            DisplayPreference::Stderr => write!(f, "Stderr"),
            DisplayPreference::Prompt(_) => write!(f, "Prompt"),
        }
    }
}

impl TracingConfig {
    /// Log to both the given [`DisplayPreference`] and a file, at `DEBUG` level.
    #[must_use]
    pub fn new_file_and_display(
        file_path: Option<String>,
        preferred_display: DisplayPreference,
    ) -> Self {
        Self {
            writer_config: WriterConfig::DisplayAndFile(
                preferred_display,
                file_path.unwrap_or_else(|| DEFAULT_LOG_FILE_PATH.to_string()),
            ),
            level: tracing::Level::DEBUG,
        }
    }

    #[must_use]
    pub fn new_display(preferred_display: DisplayPreference) -> Self {
        Self {
            writer_config: WriterConfig::Display(preferred_display),
            level: tracing::Level::DEBUG,
        }
    }

    #[must_use]
    pub fn new_file(file_path: Option<String>) -> Self {
        Self {
            writer_config: WriterConfig::File(
                file_path.unwrap_or_else(|| DEFAULT_LOG_FILE_PATH.to_string()),
            ),
            level: tracing::Level::DEBUG,
        }
    }

    #[must_use]
    pub fn with_level(mut self, level: tracing::Level) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn get_writer_config(&self) -> WriterConfig { self.writer_config.clone() }

    #[must_use]
    pub fn get_level_filter(&self) -> LevelFilter { LevelFilter::from_level(self.level) }

    /// Make this configuration the default subscriber for the current thread only, until
    /// the returned guard is dropped. Returns [`None`] for [`WriterConfig::None`].
    ///
    /// # Errors
    ///
    /// Returns an error if the log file can't be created.
    pub fn install_thread_local(self) -> miette::Result<Option<DefaultGuard>> {
        let Some(layers) = try_create_layers(self)? else {
            return Ok(None);
        };
        let subscriber = tracing_subscriber::registry().with(layers);
        Ok(Some(subscriber.set_default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_constructors_default_to_debug_level() {
        let config = TracingConfig::new_file(None);
        assert_eq!(config.get_level_filter(), LevelFilter::DEBUG);
        assert!(matches!(
            config.get_writer_config(),
            WriterConfig::File(path) if path == DEFAULT_LOG_FILE_PATH
        ));

        let config = TracingConfig::new_display(DisplayPreference::Stderr)
            .with_level(tracing::Level::WARN);
        assert_eq!(config.get_level_filter(), LevelFilter::WARN);

        let config = TracingConfig::new_file_and_display(
            Some("a.log".into()),
            DisplayPreference::Stdout,
        );
        assert_eq!(
            format!("{:?}", config.writer_config),
            r#"DisplayAndFile(Stdout, "a.log")"#
        );
    }
}
