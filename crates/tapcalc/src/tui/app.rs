//! TUI application state

use crossterm::event::KeyEvent;
use ratatui::layout::Rect;
use tracing::trace;

use super::input::{InputHandler, KeyAction};
use super::keypad::hit_test;
use crate::core::{Engine, EngineConfig, Signal};
use crate::keypad::{Keypad, KeypadAction};

/// Calculator application state
#[derive(Debug, Default)]
pub struct CalculatorApp {
    /// Calculator engine
    engine: Engine,
    /// Button layout
    keypad: Keypad,
    /// Index of the last pressed button
    highlighted: Option<usize>,
    /// Key event mapper
    input: InputHandler,
    /// Whether the app should quit
    should_quit: bool,
}

impl CalculatorApp {
    /// Creates a new calculator app with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a calculator app with a custom engine configuration
    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            engine: Engine::with_config(config),
            ..Self::default()
        }
    }

    /// Returns the engine
    #[must_use]
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Returns the keypad layout
    #[must_use]
    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    /// Returns the index of the highlighted button
    #[must_use]
    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    /// Returns whether the app should quit
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Sets the quit flag
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Applies a keypad action and highlights its button
    pub fn press(&mut self, action: KeypadAction) {
        trace!(?action, "press");
        self.engine.apply(action);
        self.highlighted = self.keypad.position_of(action);
    }

    /// Handles a key event
    pub fn handle_key(&mut self, event: KeyEvent) {
        match self.input.handle_key(event) {
            KeyAction::Keypad(action) => self.press(action),
            KeyAction::Quit => self.quit(),
            KeyAction::None => {}
        }
    }

    /// Handles a mouse click at `(x, y)` over a keypad drawn in `area`.
    ///
    /// Returns true when the click landed on a button.
    pub fn click(&mut self, area: Rect, x: u16, y: u16) -> bool {
        let Some(action) = hit_test(&self.keypad, area, x, y)
            .and_then(|index| self.keypad.buttons().get(index))
            .map(|btn| btn.action)
        else {
            return false;
        };
        self.press(action);
        true
    }

    /// Short status text for the last press
    #[must_use]
    pub fn status(&self) -> &'static str {
        match self.engine.signal() {
            Signal::Idle => "Ready",
            Signal::Updated => "✓ Result updated",
            Signal::Errored => "✗ Invalid operation",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn key(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    fn type_keys(app: &mut CalculatorApp, keys: &str) {
        for c in keys.chars() {
            app.handle_key(key(c));
        }
    }

    #[test]
    fn test_app_new() {
        let app = CalculatorApp::new();
        assert_eq!(app.engine().display_text(), "0");
        assert_eq!(app.highlighted(), None);
        assert!(!app.should_quit());
        assert_eq!(app.status(), "Ready");
    }

    #[test]
    fn test_app_with_config() {
        let mut app = CalculatorApp::with_config(EngineConfig::new().with_group_separator("_"));
        type_keys(&mut app, "1000");
        assert_eq!(app.engine().display_text(), "1_000");
    }

    #[test]
    fn test_keys_drive_engine() {
        let mut app = CalculatorApp::new();
        type_keys(&mut app, "12+30");
        app.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
        assert_eq!(app.engine().display_text(), "42");
        assert_eq!(app.status(), "✓ Result updated");
    }

    #[test]
    fn test_press_highlights_button() {
        let mut app = CalculatorApp::new();
        app.press(KeypadAction::Equals);
        let idx = app.highlighted().unwrap();
        assert_eq!(app.keypad().buttons()[idx].action, KeypadAction::Equals);
    }

    #[test]
    fn test_backspace_has_no_button() {
        let mut app = CalculatorApp::new();
        type_keys(&mut app, "7");
        app.press(KeypadAction::Backspace);
        assert_eq!(app.highlighted(), None);
        assert_eq!(app.engine().display_text(), "0");
    }

    #[test]
    fn test_error_status() {
        let mut app = CalculatorApp::new();
        type_keys(&mut app, "1/0=");
        assert_eq!(app.engine().display_text(), "NaN");
        assert_eq!(app.status(), "✗ Invalid operation");
    }

    #[test]
    fn test_quit_keys() {
        let mut app = CalculatorApp::new();
        type_keys(&mut app, "q");
        assert!(app.should_quit());

        let mut app = CalculatorApp::new();
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit());
    }

    #[test]
    fn test_ignored_key_changes_nothing() {
        let mut app = CalculatorApp::new();
        app.handle_key(KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE));
        assert_eq!(app.engine(), &Engine::new());
        assert_eq!(app.highlighted(), None);
    }

    #[test]
    fn test_click_presses_button() {
        let mut app = CalculatorApp::new();
        let area = Rect::new(0, 0, 26, 12);
        // Row 1, col 0 is 7
        assert!(app.click(area, 2, 3));
        assert_eq!(app.engine().entry(), "7");
        // Border is not a button
        assert!(!app.click(area, 0, 0));
        assert_eq!(app.engine().entry(), "7");
    }
}
