// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The input loop runs on its own OS thread, named [`INPUT_LOOP_THREAD_NAME`]:
//!
//! ```text
//! ┌──────────────────────────── prompt-input-loop ────────────────────────────┐
//! │ shutdown? ──► poll_key(poll delay) ──► shutdown? ──► read_key             │
//! │    ▲                                                    │                 │
//! │    │         on_key ──► apply_key (engine lock) ──► on_submit / on_beep   │
//! │    └────────────────────────────────────────────────────┘                 │
//! └───────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! - Shutdown is cooperative. [`InputLoopHandle::request_shutdown()`] sends on a
//!   [`tokio::sync::broadcast`] channel that the loop checks before every poll and again
//!   once a key is available, so a stop is observed within one poll delay.
//! - The loop only holds a [`Weak`] reference to the prompt between polls. Dropping the
//!   last [`Prompt`] makes it exit too.
//! - When the thread exits, for whatever reason, [`TerminationGuard`] publishes the final
//!   [`InputLoopState`] on a [`tokio::sync::watch`] channel. That is what
//!   [`Prompt::wait_until_stopped()`] and [`Prompt::await_stopped()`] wait on.

use crate::{KeyHandled, KeyOutcome, Prompt, PromptError, PromptInner, ok};
use crossterm::event::KeyEvent;
use std::{io,
          sync::{Arc, Weak},
          thread::ThreadId};
use tokio::sync::{broadcast::{self, error::TryRecvError},
                  watch};

pub const INPUT_LOOP_THREAD_NAME: &str = "prompt-input-loop";

/// Liveness of the input loop thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputLoopState {
    Running,
    /// Exited because it was asked to, or because the prompt was dropped.
    Stopped,
    /// Exited because reading a key or rendering failed.
    Failed(InputLoopFailure),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputLoopFailure {
    pub kind: io::ErrorKind,
    pub message: String,
}

impl From<&PromptError> for InputLoopFailure {
    fn from(error: &PromptError) -> Self {
        let kind = match error {
            PromptError::Io(io_error) => io_error.kind(),
            PromptError::InputLoopFailed { kind, .. } => *kind,
            _ => io::ErrorKind::Other,
        };
        Self {
            kind,
            message: error.to_string(),
        }
    }
}

impl From<InputLoopFailure> for PromptError {
    fn from(failure: InputLoopFailure) -> Self {
        Self::InputLoopFailed {
            kind: failure.kind,
            message: failure.message,
        }
    }
}

/// The controlling side of one input loop thread. A new one is made by every
/// [`Prompt::start()`] that actually starts.
#[derive(Debug)]
pub struct InputLoopHandle {
    pub shutdown_sender: broadcast::Sender<()>,
    pub state_receiver: watch::Receiver<InputLoopState>,
    pub thread_id: ThreadId,
}

impl InputLoopHandle {
    /// # Errors
    ///
    /// Returns [`PromptError::SpawnInputThread`] if the thread can't be spawned.
    pub fn spawn(prompt: &Prompt) -> Result<Self, PromptError> {
        let (shutdown_sender, shutdown_receiver) = broadcast::channel(1);
        let (state_sender, state_receiver) = watch::channel(InputLoopState::Running);
        let weak_inner = Arc::downgrade(&prompt.inner);

        let join_handle = std::thread::Builder::new()
            .name(INPUT_LOOP_THREAD_NAME.into())
            .spawn(move || {
                run_input_loop(&weak_inner, shutdown_receiver, state_sender);
            })
            .map_err(PromptError::SpawnInputThread)?;

        Ok(Self {
            shutdown_sender,
            state_receiver,
            thread_id: join_handle.thread().id(),
        })
    }

    pub fn request_shutdown(&self) {
        // Fails only if the loop has already exited.
        self.shutdown_sender.send(()).ok();
    }
}

/// RAII guard that publishes the final [`InputLoopState`] when the loop exits, including
/// by unwinding from a panic in a callback.
#[allow(missing_debug_implementations)]
pub struct TerminationGuard {
    state_sender: watch::Sender<InputLoopState>,
    failure: Option<InputLoopFailure>,
}

impl Drop for TerminationGuard {
    fn drop(&mut self) {
        let final_state = match self.failure.take() {
            Some(failure) => InputLoopState::Failed(failure),
            None if std::thread::panicking() => InputLoopState::Failed(InputLoopFailure {
                kind: io::ErrorKind::Other,
                message: "input loop panicked".into(),
            }),
            None => InputLoopState::Stopped,
        };
        self.state_sender.send_replace(final_state);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Continuation {
    Continue,
    Stop,
}

fn run_input_loop(
    weak_inner: &Weak<PromptInner>,
    mut shutdown_receiver: broadcast::Receiver<()>,
    state_sender: watch::Sender<InputLoopState>,
) {
    let mut guard = TerminationGuard {
        state_sender,
        failure: None,
    };
    tracing::debug!(message = "input loop started");

    loop {
        match poll_once(weak_inner, &mut shutdown_receiver) {
            Ok(Continuation::Continue) => {}
            Ok(Continuation::Stop) => {
                tracing::debug!(message = "input loop stopped");
                break;
            }
            Err(error) => {
                tracing::error!(message = "input loop failed", error = %error);
                guard.failure = Some(InputLoopFailure::from(&error));
                break;
            }
        }
    }
    // guard dropped here (or during unwinding), publishing the final state.
}

/// Sent, or the sender is gone (a newer loop replaced this one), or lagged.
fn is_shutdown_requested(shutdown_receiver: &mut broadcast::Receiver<()>) -> bool {
    !matches!(shutdown_receiver.try_recv(), Err(TryRecvError::Empty))
}

fn poll_once(
    weak_inner: &Weak<PromptInner>,
    shutdown_receiver: &mut broadcast::Receiver<()>,
) -> Result<Continuation, PromptError> {
    if is_shutdown_requested(shutdown_receiver) {
        return ok!(Continuation::Stop);
    }
    let Some(inner) = weak_inner.upgrade() else {
        return ok!(Continuation::Stop);
    };
    let prompt = Prompt { inner };
    let poll_delay = prompt.input_poll_delay()?;

    let maybe_key = {
        let mut key_input = prompt.inner.key_input.lock()?;
        if !key_input.poll_key(poll_delay)? {
            return ok!(Continuation::Continue);
        }
        if is_shutdown_requested(shutdown_receiver) {
            return ok!(Continuation::Stop);
        }
        key_input.read_key()?
    };

    if let Some(key) = maybe_key {
        dispatch_key(&prompt, &key)?;
    }
    ok!(Continuation::Continue)
}

/// Run one key through the callbacks and the engine. The engine lock is only held for
/// [`crate::PromptEngine::apply_key()`], never while a callback runs.
///
/// # Errors
///
/// Returns an error if the terminal can't be written, or a lock is poisoned.
pub fn dispatch_key(prompt: &Prompt, key: &KeyEvent) -> Result<(), PromptError> {
    let handled = prompt.inner.events.lock()?.on_key(prompt, key);
    if handled == KeyHandled::Handled {
        return ok!();
    }

    let outcome = prompt.inner.safe_engine.lock()?.apply_key(key)?;

    match outcome {
        KeyOutcome::Continue => {}
        KeyOutcome::Submitted(line) => {
            tracing::debug!(message = "line submitted", len = line.len());
            prompt.inner.events.lock()?.on_submit(prompt, line);
        }
        KeyOutcome::Beep => {
            tracing::trace!(message = "beep");
            prompt.inner.events.lock()?.on_beep(prompt);
        }
    }
    ok!()
}
