// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{CrosstermKeyInput, CrosstermTerminal, InputLoopHandle, InputLoopState,
            KeyInput, PromptConfig, PromptEngine, PromptError, PromptEvents, RawTerminal,
            StdMutex, TTYResult, is_fully_interactive_terminal, ok};
use std::{fmt::{self, Debug, Display, Formatter},
          sync::{Arc, MutexGuard},
          thread::ThreadId,
          time::Duration};
use tokio::sync::watch;

/// Shortest sleep between two checks in [`Prompt::wait_until_stopped()`].
const MIN_WAIT_POLL_DELAY: Duration = Duration::from_millis(1);

/// A persistent input line, drawn below everything your program prints through it.
///
/// This is a cheap handle: you can safely clone it, since it only contains an [`Arc`].
/// Clones can be moved to other threads and used concurrently; every call that touches
/// the terminal is serialized by one lock.
///
/// # Lifecycle
///
/// ```text
///            start()                 stop()
/// Stopped ──────────► Running ──────────────► Stopped
///    ▲                  │
///    └──── no-op ◄──────┘ start() again
/// ```
///
/// - [`Self::start()`] draws the prefix at the current cursor position and spawns the
///   input loop thread. Calling it again while running does nothing.
/// - [`Self::stop()`] erases the input line, clears the prefix and content, and asks the
///   input loop to exit. Calling it again while stopped does nothing.
/// - [`Self::wait_until_stopped()`] / [`Self::await_stopped()`] return once the input
///   loop has exited.
///
/// All other operations work in both states. While stopped, output is printed at the
/// cursor and nothing else is drawn.
#[derive(Debug, Clone)]
pub struct Prompt {
    pub inner: Arc<PromptInner>,
}

/// State shared by all the clones of a [`Prompt`] and its input loop.
pub struct PromptInner {
    pub safe_engine: StdMutex<PromptEngine>,
    /// Only used by the input loop.
    pub key_input: StdMutex<Box<dyn KeyInput>>,
    pub events: StdMutex<Box<dyn PromptEvents>>,
    /// The most recently started input loop, kept after it stops so waiting works.
    pub input_loop: StdMutex<Option<InputLoopHandle>>,
}

impl Drop for PromptInner {
    fn drop(&mut self) {
        if let Ok(Some(handle)) = self.input_loop.get_mut().map(|it| it.as_ref()) {
            handle.request_shutdown();
        }
    }
}

impl Debug for PromptInner {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("PromptInner");
        match self.safe_engine.try_lock() {
            Ok(engine) => debug.field("engine", &*engine),
            Err(_) => debug.field("engine", &"<locked>"),
        };
        debug.finish_non_exhaustive()
    }
}

impl Prompt {
    /// Create a prompt on the given terminal. It isn't drawn until [`Self::start()`].
    pub fn new(
        terminal: impl RawTerminal + 'static,
        key_input: impl KeyInput + 'static,
        events: impl PromptEvents + 'static,
        config: PromptConfig,
    ) -> Self {
        let engine = PromptEngine::new(Box::new(terminal), config);
        Self {
            inner: Arc::new(PromptInner {
                safe_engine: StdMutex::new(engine),
                key_input: StdMutex::new(Box::new(key_input)),
                events: StdMutex::new(Box::new(events)),
                input_loop: StdMutex::new(None),
            }),
        }
    }

    /// Create a prompt on the process' terminal.
    ///
    /// # Returns
    /// 1. [`None`] if stdin or stdout is not an interactive terminal, for example when
    ///    piped (`echo "foo" | cargo run`) or when running under `cargo test`.
    /// 2. Otherwise a [`Prompt`], with the terminal in raw mode until it is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if raw mode can't be enabled or the cursor position can't be
    /// read.
    pub fn try_new_stdout(
        events: impl PromptEvents + 'static,
        config: PromptConfig,
    ) -> Result<Option<Self>, PromptError> {
        if let TTYResult::IsNotInteractive = is_fully_interactive_terminal() {
            return ok!(None);
        }

        // Enable raw mode first. Drop will disable raw mode.
        let key_input = CrosstermKeyInput::try_new()?;
        let terminal = CrosstermTerminal::try_new(std::io::stdout())?;

        ok!(Some(Self::new(terminal, key_input, events, config)))
    }

    fn lock_engine(&self) -> Result<MutexGuard<'_, PromptEngine>, PromptError> {
        ok!(self.inner.safe_engine.lock()?)
    }
}

/// Lifecycle.
impl Prompt {
    /// Draw the prompt at the current cursor position and start reading keys. Does
    /// nothing if already running.
    ///
    /// If the input loop has failed, the prompt is still drawn but no longer reads keys.
    /// Calling this again spawns a new input loop for the same session.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal can't be written or the input loop thread can't
    /// be spawned. The prompt is not running in either case.
    pub fn start(&self) -> Result<(), PromptError> {
        let mut input_loop = self.inner.input_loop.lock()?;
        let is_loop_running = input_loop
            .as_ref()
            .is_some_and(|it| *it.state_receiver.borrow() == InputLoopState::Running);

        {
            let mut engine = self.lock_engine()?;
            if engine.is_running && is_loop_running {
                return ok!();
            }
            // Does nothing when only the input loop has to be replaced.
            engine.start_session()?;
        }

        match InputLoopHandle::spawn(self) {
            Ok(handle) => {
                if let Some(old_handle) = input_loop.replace(handle) {
                    old_handle.request_shutdown();
                }
            }
            Err(error) => {
                // Already failing, the erase is best effort.
                self.lock_engine()?.end_session().ok();
                return Err(error);
            }
        }
        drop(input_loop);

        tracing::debug!(message = "prompt started");
        ok!()
    }

    /// Erase the prompt, clear the prefix and content, and ask the input loop to exit.
    /// Does nothing if not running.
    ///
    /// The input loop notices within one poll delay. Use [`Self::wait_until_stopped()`]
    /// to wait for that.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal can't be written. The prompt is stopped anyway.
    pub fn stop(&self) -> Result<(), PromptError> {
        let input_loop = self.inner.input_loop.lock()?;

        let (was_running, result) = {
            let mut engine = self.lock_engine()?;
            let was_running = engine.is_running;
            (was_running, engine.end_session())
        };

        if !was_running {
            return ok!();
        }
        if let Some(handle) = input_loop.as_ref() {
            handle.request_shutdown();
        }
        drop(input_loop);

        tracing::debug!(message = "prompt stopped");
        ok!(result?)
    }

    /// Block the calling thread until the input loop has exited. Returns immediately if
    /// the prompt was never started, or if called from a [`PromptEvents`] callback (which
    /// runs on the input loop itself).
    ///
    /// # Errors
    ///
    /// Returns [`PromptError::InputLoopFailed`] if the loop exited because of a failure
    /// rather than [`Self::stop()`].
    pub fn wait_until_stopped(&self) -> Result<(), PromptError> {
        let Some((receiver, thread_id)) = self.input_loop_watch()? else {
            return ok!();
        };
        if std::thread::current().id() == thread_id {
            return ok!();
        }

        let poll_delay = self.input_poll_delay()?.max(MIN_WAIT_POLL_DELAY);
        loop {
            let state = receiver.borrow().clone();
            match state {
                InputLoopState::Running => std::thread::sleep(poll_delay),
                InputLoopState::Stopped => return ok!(),
                InputLoopState::Failed(failure) => return Err(failure.into()),
            }
        }
    }

    /// Async version of [`Self::wait_until_stopped()`].
    ///
    /// # Errors
    ///
    /// Returns [`PromptError::InputLoopFailed`] if the loop exited because of a failure
    /// rather than [`Self::stop()`].
    pub async fn await_stopped(&self) -> Result<(), PromptError> {
        let Some((mut receiver, _)) = self.input_loop_watch()? else {
            return ok!();
        };

        let final_state = receiver
            .wait_for(|state| *state != InputLoopState::Running)
            .await
            .map(|state| state.clone());

        match final_state {
            Ok(InputLoopState::Failed(failure)) => Err(failure.into()),
            // The sender only goes away after publishing the final state.
            _ => ok!(),
        }
    }

    /// State of the most recently started input loop, [`None`] if never started.
    ///
    /// # Errors
    ///
    /// Returns an error if a lock is poisoned.
    pub fn input_loop_state(&self) -> Result<Option<InputLoopState>, PromptError> {
        ok!(self
            .input_loop_watch()?
            .map(|(receiver, _)| receiver.borrow().clone()))
    }

    fn input_loop_watch(
        &self,
    ) -> Result<Option<(watch::Receiver<InputLoopState>, ThreadId)>, PromptError> {
        let input_loop = self.inner.input_loop.lock()?;
        ok!(input_loop
            .as_ref()
            .map(|handle| (handle.state_receiver.clone(), handle.thread_id)))
    }

    /// Mark everything dirty and redraw. Use this after something printed to the
    /// terminal without going through the prompt and messed up the input line.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal can't be written.
    pub fn force_re_render(&self) -> Result<(), PromptError> {
        let mut engine = self.lock_engine()?;
        engine.dirty.mark_all();
        ok!(engine.re_render()?)
    }

    /// # Errors
    ///
    /// Returns an error if a lock is poisoned.
    pub fn is_running(&self) -> Result<bool, PromptError> {
        ok!(self.lock_engine()?.is_running)
    }
}

/// Output.
impl Prompt {
    /// Print `text` above the input line. Color markup is interpreted if enabled. Works
    /// with anything [`Display`], so both a `char` and a string can be written.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal can't be written.
    pub fn write(&self, text: impl Display) -> Result<(), PromptError> {
        let text = text.to_string();
        ok!(self.lock_engine()?.write_text(&text)?)
    }

    /// [`Self::write()`] followed by a line break.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal can't be written.
    pub fn write_line(&self, text: impl Display) -> Result<(), PromptError> {
        let text = format!("{text}\n");
        ok!(self.lock_engine()?.write_text(&text)?)
    }
}

/// Configuration and input state.
impl Prompt {
    /// # Errors
    ///
    /// Returns an error if a lock is poisoned.
    pub fn prefix(&self) -> Result<String, PromptError> {
        ok!(self.lock_engine()?.input.prefix.clone())
    }

    /// Replace the prefix and redraw the input line.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal can't be written.
    pub fn set_prefix(&self, prefix: impl Into<String>) -> Result<(), PromptError> {
        let mut engine = self.lock_engine()?;
        engine.set_prefix(prefix.into());
        ok!(engine.re_render()?)
    }

    /// What the user has typed so far.
    ///
    /// # Errors
    ///
    /// Returns an error if a lock is poisoned.
    pub fn content(&self) -> Result<String, PromptError> {
        ok!(self.lock_engine()?.input.content.clone())
    }

    /// Replace what the user has typed and redraw it. It is never interpreted as
    /// markup.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal can't be written.
    pub fn set_content(&self, content: impl Into<String>) -> Result<(), PromptError> {
        let mut engine = self.lock_engine()?;
        engine.set_content(content.into());
        ok!(engine.re_render()?)
    }

    /// # Errors
    ///
    /// Returns an error if a lock is poisoned.
    pub fn input_poll_delay(&self) -> Result<Duration, PromptError> {
        ok!(self.lock_engine()?.input_poll_delay)
    }

    /// Takes effect on the next poll of the input loop.
    ///
    /// # Errors
    ///
    /// Returns an error if a lock is poisoned.
    pub fn set_input_poll_delay(&self, delay: Duration) -> Result<(), PromptError> {
        self.lock_engine()?.input_poll_delay = delay;
        ok!()
    }

    /// # Errors
    ///
    /// Returns an error if a lock is poisoned.
    pub fn is_markup_enabled(&self) -> Result<bool, PromptError> {
        ok!(self.lock_engine()?.is_markup_enabled)
    }

    /// Applies to the next output, and redraws the prefix right away.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal can't be written.
    pub fn set_markup_enabled(&self, is_enabled: bool) -> Result<(), PromptError> {
        let mut engine = self.lock_engine()?;
        engine.is_markup_enabled = is_enabled;
        engine.dirty.prefix = true;
        ok!(engine.re_render()?)
    }

    /// # Errors
    ///
    /// Returns an error if a lock is poisoned.
    pub fn markup_marker(&self) -> Result<char, PromptError> {
        ok!(self.lock_engine()?.markup_marker)
    }

    /// Applies to the next output, and redraws the prefix right away.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal can't be written.
    pub fn set_markup_marker(&self, marker: char) -> Result<(), PromptError> {
        let mut engine = self.lock_engine()?;
        engine.markup_marker = marker;
        engine.dirty.prefix = true;
        ok!(engine.re_render()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BufferSize, CursorPos,
                test_fixtures::{MockKeyInput, MockTerminal}};
    use pretty_assertions::assert_eq;

    fn prompt(size: BufferSize) -> (Prompt, MockTerminal) {
        let term = MockTerminal::new(size, CursorPos::default());
        let config = PromptConfig::default().with_prefix("> ");
        let prompt = Prompt::new(term.clone(), MockKeyInput::new(), (), config);
        (prompt, term)
    }

    #[test]
    fn test_setters_redraw_only_while_running() {
        let (prompt, term) = prompt(BufferSize::new(20, 2));

        prompt.set_content("draft").unwrap();
        assert_eq!(term.row_text(0), "");
        assert_eq!(prompt.content().unwrap(), "draft");

        prompt.start().unwrap();
        assert_eq!(term.row_text(0), "> draft");

        prompt.set_content("ok").unwrap();
        prompt.set_prefix(">> ").unwrap();
        assert_eq!(term.row_text(0).trim_end(), ">> ok");
        assert_eq!(prompt.prefix().unwrap(), ">> ");

        prompt.stop().unwrap();
    }

    #[test]
    fn test_runtime_config_round_trips() {
        let (prompt, _term) = prompt(BufferSize::new(20, 2));

        prompt.set_input_poll_delay(Duration::from_millis(7)).unwrap();
        prompt.set_markup_enabled(true).unwrap();
        prompt.set_markup_marker('%').unwrap();

        assert_eq!(prompt.input_poll_delay().unwrap(), Duration::from_millis(7));
        assert!(prompt.is_markup_enabled().unwrap());
        assert_eq!(prompt.markup_marker().unwrap(), '%');
    }

    #[test]
    fn test_force_re_render_repairs_clobbered_line() {
        let (prompt, term) = prompt(BufferSize::new(20, 2));
        prompt.set_content("abc").unwrap();
        prompt.start().unwrap();

        {
            let mut screen = term.screen.lock().unwrap();
            for cell in &mut screen.rows[0] {
                cell.text = "#".into();
            }
        }
        prompt.force_re_render().unwrap();

        assert_eq!(term.row_text(0), format!("> abc{}", "#".repeat(15)));
        assert_eq!(term.cursor().unwrap(), CursorPos::new(5, 0));

        prompt.stop().unwrap();
    }

    #[test]
    fn test_debug_shows_engine_state() {
        let (prompt, _term) = prompt(BufferSize::new(20, 2));
        let debug = format!("{prompt:?}");
        assert!(debug.contains("PromptEngine"), "{debug}");
        assert!(debug.contains("is_running: false"), "{debug}");
    }
}
