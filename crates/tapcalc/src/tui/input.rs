//! Keyboard and mouse input handling
//!
//! Key events are resolved to key names and then to [`KeypadAction`]s
//! through the same table the key-script parser uses.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::keypad::KeypadAction;

/// Actions that can be triggered by terminal input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Press a keypad button
    Keypad(KeypadAction),
    /// Quit the application
    Quit,
    /// No action (ignored input)
    None,
}

/// Input handler that maps key events to actions
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    /// Creates a new input handler
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Maps a key event to an action
    #[must_use]
    pub fn handle_key(&self, event: KeyEvent) -> KeyAction {
        let KeyEvent {
            code,
            modifiers,
            kind,
            ..
        } = event;

        if kind == KeyEventKind::Release {
            return KeyAction::None;
        }

        if modifiers.contains(KeyModifiers::CONTROL) {
            return match code {
                KeyCode::Char('c' | 'q') => KeyAction::Quit,
                _ => KeyAction::None,
            };
        }

        if code == KeyCode::Char('q') {
            return KeyAction::Quit;
        }

        Self::key_name(code)
            .and_then(|name| KeypadAction::from_key(&name))
            .map_or(KeyAction::None, KeyAction::Keypad)
    }

    /// Name of a key code as the keypad table knows it
    fn key_name(code: KeyCode) -> Option<String> {
        let name = match code {
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Backspace => "Backspace".to_string(),
            KeyCode::Delete => "Delete".to_string(),
            KeyCode::Esc => "Escape".to_string(),
            KeyCode::F(n) => format!("F{n}"),
            _ => return None,
        };
        Some(name)
    }
}
