// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{io, sync::PoisonError};

/// Errors from the fallible [`crate::Prompt`] operations.
///
/// | Variant              | Cause                                                         |
/// | :------------------- | :------------------------------------------------------------ |
/// | [`Io`]               | The terminal couldn't be read or written                      |
/// | [`InputLoopFailed`]  | The input loop thread stopped because of a key read or render failure |
/// | [`SpawnInputThread`] | [`std::thread::Builder::spawn()`] failed                      |
/// | [`LockPoisoned`]     | A thread panicked while holding the engine lock               |
///
/// Terminal failures are never retried. Once the terminal is usable again, call
/// [`crate::Prompt::force_re_render()`] to redraw the prompt from scratch.
///
/// [`Io`]: Self::Io
/// [`InputLoopFailed`]: Self::InputLoopFailed
/// [`SpawnInputThread`]: Self::SpawnInputThread
/// [`LockPoisoned`]: Self::LockPoisoned
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum PromptError {
    /// An internal I/O error occurred.
    #[error(transparent)]
    #[diagnostic(code(prompt_line::io))]
    Io(#[from] io::Error),

    #[error("Input loop stopped after a failure ({kind}): {message}")]
    #[diagnostic(
        code(prompt_line::input_loop_failed),
        help(
            "The prompt is no longer reading keys. Call `Prompt::start()` again to \
             spawn a new input loop."
        )
    )]
    InputLoopFailed {
        kind: io::ErrorKind,
        message: String,
    },

    #[error("Failed to spawn the input loop thread")]
    #[diagnostic(
        code(prompt_line::spawn_input_thread),
        help("The process may have hit its thread limit")
    )]
    SpawnInputThread(#[source] io::Error),

    #[error("Prompt engine lock poisoned")]
    #[diagnostic(
        code(prompt_line::lock_poisoned),
        help("A callback or another thread panicked while the prompt was rendering")
    )]
    LockPoisoned,
}

impl<T> From<PoisonError<T>> for PromptError {
    fn from(_: PoisonError<T>) -> Self { Self::LockPoisoned }
}
