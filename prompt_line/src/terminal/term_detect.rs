// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::io::IsTerminal;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TTYResult {
    IsInteractive,
    IsNotInteractive,
}

/// Returns [`TTYResult::IsInteractive`] if stdin is a TTY, so keys can be read from it.
///
/// If you run `echo "test" | cargo run` this returns [`TTYResult::IsNotInteractive`].
#[must_use]
pub fn is_stdin_interactive() -> TTYResult {
    if std::io::stdin().is_terminal() {
        TTYResult::IsInteractive
    } else {
        TTYResult::IsNotInteractive
    }
}

/// Returns [`TTYResult::IsInteractive`] if stdout is a TTY, so cursor movement makes
/// sense.
///
/// If you run `cargo run | grep foo` this returns [`TTYResult::IsNotInteractive`].
#[must_use]
pub fn is_stdout_interactive() -> TTYResult {
    if std::io::stdout().is_terminal() {
        TTYResult::IsInteractive
    } else {
        TTYResult::IsNotInteractive
    }
}

/// A prompt needs both: keys come from stdin and the input line is drawn on stdout.
#[must_use]
pub fn is_fully_interactive_terminal() -> TTYResult {
    match (is_stdin_interactive(), is_stdout_interactive()) {
        (TTYResult::IsInteractive, TTYResult::IsInteractive) => TTYResult::IsInteractive,
        _ => TTYResult::IsNotInteractive,
    }
}
