// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::Prompt;
use crossterm::event::KeyEvent;

/// Returned by [`PromptEvents::on_key()`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyHandled {
    /// Skip the built-in handling of this key.
    Handled,
    #[default]
    NotHandled,
}

/// Callbacks from the input loop. All methods have no-op defaults, so implement only
/// the ones you need.
///
/// The callbacks run on the input loop thread, and never while the prompt's render lock
/// is held. So they are free to call back into the [`Prompt`] they receive:
/// [`Prompt::write_line()`], [`Prompt::set_prefix()`], even [`Prompt::stop()`].
///
/// They do block the input loop though. Keys typed while a callback runs are queued by
/// the terminal and processed once it returns.
pub trait PromptEvents: Send {
    /// Called for every key before it is processed. Return [`KeyHandled::Handled`] to
    /// suppress the built-in behavior for this key.
    fn on_key(&mut self, _prompt: &Prompt, _key: &KeyEvent) -> KeyHandled {
        KeyHandled::NotHandled
    }

    /// The user pressed Enter. `line` is what was typed; the live content is already
    /// empty when this runs.
    fn on_submit(&mut self, _prompt: &Prompt, _line: String) {}

    /// An edit that can't be done, like Backspace on an empty line.
    fn on_beep(&mut self, _prompt: &Prompt) {}
}

/// No callbacks at all.
impl PromptEvents for () {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BufferSize, CursorPos, PromptConfig,
                test_fixtures::{MockKeyInput, MockTerminal, named_key}};
    use crossterm::event::KeyCode;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_callbacks_do_nothing() {
        let term = MockTerminal::new(BufferSize::new(20, 2), CursorPos::default());
        let prompt = Prompt::new(
            term.clone(),
            MockKeyInput::new(),
            (),
            PromptConfig::default(),
        );
        let events: &mut dyn PromptEvents = &mut ();

        let handled = events.on_key(&prompt, &named_key(KeyCode::Enter));
        events.on_submit(&prompt, "line".to_string());
        events.on_beep(&prompt);

        assert_eq!(handled, KeyHandled::NotHandled);
        assert_eq!(term.row_text(0), "");
    }
}
