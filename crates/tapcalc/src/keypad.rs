//! Keypad actions, keyboard mapping and button layout
//!
//! Every front-end funnels its events through [`KeypadAction`]; each action
//! maps onto exactly one engine operation via [`Engine::apply`].

use serde::{Deserialize, Serialize};

use crate::core::{CalcError, CalcResult, Digit, Engine, Operation};

/// Actions that keypad buttons and keyboard keys can perform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "action", content = "value", rename_all = "snake_case")]
pub enum KeypadAction {
    /// Type a digit (0-9)
    Digit(Digit),
    /// Type a decimal point
    Decimal,
    /// Flip the sign of the entry
    ToggleSign,
    /// Convert the entry to a percentage
    Percent,
    /// Arm a binary operator
    Operator(Operation),
    /// Evaluate
    Equals,
    /// Remove the last typed character
    Backspace,
    /// Clear the entry only (CE)
    ClearEntry,
    /// Clear everything (AC)
    AllClear,
}

impl KeypadAction {
    /// Returns the button label for this action
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Digit(d) => d.to_string(),
            Self::Decimal => ".".to_string(),
            Self::ToggleSign => "±".to_string(),
            Self::Percent => "%".to_string(),
            Self::Operator(op) => op.symbol().to_string(),
            Self::Equals => "=".to_string(),
            Self::Backspace => "⌫".to_string(),
            Self::ClearEntry => "CE".to_string(),
            Self::AllClear => "AC".to_string(),
        }
    }

    /// Returns the element ID used by the button for this action
    #[must_use]
    pub fn id(&self) -> String {
        match self {
            Self::Digit(d) => format!("btn-{d}"),
            Self::Decimal => "btn-decimal".to_string(),
            Self::ToggleSign => "btn-sign".to_string(),
            Self::Percent => "btn-percent".to_string(),
            Self::Operator(op) => format!("btn-{}", op.name()),
            Self::Equals => "btn-equals".to_string(),
            Self::Backspace => "btn-backspace".to_string(),
            Self::ClearEntry => "btn-clear-entry".to_string(),
            Self::AllClear => "btn-all-clear".to_string(),
        }
    }

    /// Maps a keyboard key name to a keypad action
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        if let Some(c) = single_char(key) {
            if let Ok(d) = Digit::try_from(c) {
                return Some(Self::Digit(d));
            }
        }
        let action = match key {
            "." | "," => Self::Decimal,
            "+" => Self::Operator(Operation::Add),
            "-" | "−" => Self::Operator(Operation::Subtract),
            "*" | "x" | "X" | "×" => Self::Operator(Operation::Multiply),
            "/" | "÷" => Self::Operator(Operation::Divide),
            "%" => Self::Percent,
            "=" | "Enter" => Self::Equals,
            "Backspace" | "<" => Self::Backspace,
            "Delete" | "CE" => Self::ClearEntry,
            "Escape" | "c" | "C" | "AC" => Self::AllClear,
            "n" | "F9" | "±" => Self::ToggleSign,
            _ => return None,
        };
        Some(action)
    }
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

/// Keyboard bindings in the order they are documented
pub const KEY_BINDINGS: &[(&str, &str)] = &[
    ("0-9", "Digit"),
    (". ,", "Decimal point"),
    ("+ - * /", "Operator (x also multiplies)"),
    ("%", "Percent"),
    ("n F9", "Toggle sign"),
    ("= Enter", "Evaluate / repeat"),
    ("Backspace <", "Delete last character"),
    ("Delete CE", "Clear entry"),
    ("Escape c AC", "All clear"),
];

/// Parses a key script into actions.
///
/// Tokens are separated by whitespace. A token that is a key name on its
/// own (`Enter`, `Backspace`, `CE`) maps directly; anything else is read one
/// character at a time, so `5+3==` and `5 + 3 = =` are equivalent.
pub fn parse_key_script(script: &str) -> CalcResult<Vec<KeypadAction>> {
    let mut actions = Vec::new();
    for token in script.split_whitespace() {
        if let Some(action) = KeypadAction::from_key(token) {
            actions.push(action);
            continue;
        }
        for c in token.chars() {
            let mut buf = [0u8; 4];
            let key = c.encode_utf8(&mut buf);
            let action = KeypadAction::from_key(key)
                .ok_or_else(|| CalcError::UnknownKey(token.to_string()))?;
            actions.push(action);
        }
    }
    Ok(actions)
}

impl Engine {
    /// Invokes the engine operation for a keypad action
    pub fn apply(&mut self, action: KeypadAction) {
        match action {
            KeypadAction::Digit(d) => self.input_digit(d),
            KeypadAction::Decimal => self.input_decimal(),
            KeypadAction::ToggleSign => self.toggle_sign(),
            KeypadAction::Percent => self.percent(),
            KeypadAction::Operator(op) => self.set_operation(op),
            KeypadAction::Equals => self.compute(),
            KeypadAction::Backspace => self.backspace(),
            KeypadAction::ClearEntry => self.clear_entry(),
            KeypadAction::AllClear => self.reset(),
        }
    }

    /// Applies a sequence of actions in order
    pub fn apply_all(&mut self, actions: impl IntoIterator<Item = KeypadAction>) {
        for action in actions {
            self.apply(action);
        }
    }
}

/// A single keypad button definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeypadButtonDef {
    /// The action this button performs
    pub action: KeypadAction,
    /// The element ID for this button
    pub id: String,
    /// Grid row (0-indexed)
    pub row: usize,
    /// Grid column (0-indexed)
    pub col: usize,
}

impl KeypadButtonDef {
    /// Creates a new button definition
    #[must_use]
    pub fn new(action: KeypadAction, row: usize, col: usize) -> Self {
        Self {
            id: action.id(),
            action,
            row,
            col,
        }
    }
}

/// Standard keypad layout
///
/// ```text
/// [ AC ] [ CE ] [ % ] [ ÷ ]
/// [ 7  ] [ 8  ] [ 9 ] [ × ]
/// [ 4  ] [ 5  ] [ 6 ] [ − ]
/// [ 1  ] [ 2  ] [ 3 ] [ + ]
/// [ ±  ] [ 0  ] [ . ] [ = ]
/// ```
#[derive(Debug, Clone)]
pub struct Keypad {
    buttons: Vec<KeypadButtonDef>,
    cols: usize,
    rows: usize,
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}

impl Keypad {
    /// Creates the standard calculator keypad
    #[must_use]
    pub fn new() -> Self {
        use KeypadAction::{AllClear, ClearEntry, Decimal, Equals, Operator, Percent, ToggleSign};

        let d = |n: u8| Digit::new(n).map_or(Decimal, KeypadAction::Digit);
        let grid = [
            [AllClear, ClearEntry, Percent, Operator(Operation::Divide)],
            [d(7), d(8), d(9), Operator(Operation::Multiply)],
            [d(4), d(5), d(6), Operator(Operation::Subtract)],
            [d(1), d(2), d(3), Operator(Operation::Add)],
            [ToggleSign, d(0), Decimal, Equals],
        ];

        let buttons = grid
            .iter()
            .enumerate()
            .flat_map(|(row, actions)| {
                actions
                    .iter()
                    .enumerate()
                    .map(move |(col, action)| KeypadButtonDef::new(*action, row, col))
            })
            .collect();

        Self {
            buttons,
            cols: 4,
            rows: 5,
        }
    }

    /// Returns the number of buttons
    #[must_use]
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    /// Returns the grid dimensions (rows, cols)
    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Gets all button definitions in row-major order
    #[must_use]
    pub fn buttons(&self) -> &[KeypadButtonDef] {
        &self.buttons
    }

    /// Gets a button by row and column
    #[must_use]
    pub fn get_button_at(&self, row: usize, col: usize) -> Option<&KeypadButtonDef> {
        if row < self.rows && col < self.cols {
            self.buttons.get(row * self.cols + col)
        } else {
            None
        }
    }

    /// Finds a button by element ID
    #[must_use]
    pub fn find_button_by_id(&self, id: &str) -> Option<&KeypadButtonDef> {
        self.buttons.iter().find(|b| b.id == id)
    }

    /// Index of the button that performs `action`, if it has one
    #[must_use]
    pub fn position_of(&self, action: KeypadAction) -> Option<usize> {
        self.buttons.iter().position(|b| b.action == action)
    }

    /// Processes a button click and returns its action
    #[must_use]
    pub fn handle_click(&self, element_id: &str) -> Option<KeypadAction> {
        self.find_button_by_id(element_id).map(|btn| btn.action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digit(n: u8) -> KeypadAction {
        KeypadAction::Digit(Digit::new(n).unwrap())
    }

    // ===== KeypadAction tests =====

    #[test]
    fn test_from_key_digits() {
        for n in 0..=9u8 {
            assert_eq!(KeypadAction::from_key(&n.to_string()), Some(digit(n)));
        }
    }

    #[test]
    fn test_from_key_operators() {
        assert_eq!(
            KeypadAction::from_key("+"),
            Some(KeypadAction::Operator(Operation::Add))
        );
        assert_eq!(
            KeypadAction::from_key("-"),
            Some(KeypadAction::Operator(Operation::Subtract))
        );
        assert_eq!(
            KeypadAction::from_key("x"),
            Some(KeypadAction::Operator(Operation::Multiply))
        );
        assert_eq!(
            KeypadAction::from_key("/"),
            Some(KeypadAction::Operator(Operation::Divide))
        );
    }

    #[test]
    fn test_from_key_named_keys() {
        assert_eq!(KeypadAction::from_key("Enter"), Some(KeypadAction::Equals));
        assert_eq!(KeypadAction::from_key("Backspace"), Some(KeypadAction::Backspace));
        assert_eq!(KeypadAction::from_key("Delete"), Some(KeypadAction::ClearEntry));
        assert_eq!(KeypadAction::from_key("Escape"), Some(KeypadAction::AllClear));
        assert_eq!(KeypadAction::from_key("F9"), Some(KeypadAction::ToggleSign));
        assert_eq!(KeypadAction::from_key(","), Some(KeypadAction::Decimal));
    }

    #[test]
    fn test_from_key_unknown() {
        assert_eq!(KeypadAction::from_key("^"), None);
        assert_eq!(KeypadAction::from_key("12"), None);
        assert_eq!(KeypadAction::from_key(""), None);
    }

    #[test]
    fn test_labels_and_ids() {
        assert_eq!(digit(5).label(), "5");
        assert_eq!(KeypadAction::Operator(Operation::Multiply).label(), "×");
        assert_eq!(KeypadAction::ToggleSign.label(), "±");
        assert_eq!(digit(5).id(), "btn-5");
        assert_eq!(KeypadAction::Operator(Operation::Divide).id(), "btn-divide");
        assert_eq!(KeypadAction::AllClear.id(), "btn-all-clear");
    }

    #[test]
    fn test_action_serde() {
        let json = serde_json::to_string(&KeypadAction::Operator(Operation::Add)).unwrap();
        assert_eq!(json, r#"{"action":"operator","value":"add"}"#);
        let back: KeypadAction = serde_json::from_str(r#"{"action":"digit","value":7}"#).unwrap();
        assert_eq!(back, digit(7));
    }

    // ===== Key script tests =====

    #[test]
    fn test_parse_compact_script() {
        let actions = parse_key_script("5+3==").unwrap();
        assert_eq!(
            actions,
            vec![
                digit(5),
                KeypadAction::Operator(Operation::Add),
                digit(3),
                KeypadAction::Equals,
                KeypadAction::Equals,
            ]
        );
    }

    #[test]
    fn test_parse_spaced_script_with_names() {
        let actions = parse_key_script("12 Backspace 4 Enter").unwrap();
        assert_eq!(
            actions,
            vec![
                digit(1),
                digit(2),
                KeypadAction::Backspace,
                digit(4),
                KeypadAction::Equals
            ]
        );
    }

    #[test]
    fn test_parse_script_unknown_key() {
        let err = parse_key_script("5 ^ 2").unwrap_err();
        assert_eq!(err, CalcError::UnknownKey("^".into()));
    }

    #[test]
    fn test_parse_empty_script() {
        assert!(parse_key_script("   ").unwrap().is_empty());
    }

    // ===== Dispatch tests =====

    #[test]
    fn test_apply_script_to_engine() {
        let mut engine = Engine::new();
        engine.apply_all(parse_key_script("200+10%=").unwrap());
        assert_eq!(engine.display_text(), "220");
    }

    #[test]
    fn test_apply_clear_keys() {
        let mut engine = Engine::new();
        engine.apply_all(parse_key_script("5+9 CE 3=").unwrap());
        assert_eq!(engine.entry(), "8");
        engine.apply(KeypadAction::AllClear);
        assert_eq!(engine, Engine::new());
    }

    // ===== Keypad layout tests =====

    #[test]
    fn test_keypad_dimensions() {
        let keypad = Keypad::new();
        assert_eq!(keypad.dimensions(), (5, 4));
        assert_eq!(keypad.button_count(), 20);
    }

    #[test]
    fn test_keypad_positions() {
        let keypad = Keypad::new();
        assert_eq!(keypad.get_button_at(0, 0).unwrap().action, KeypadAction::AllClear);
        assert_eq!(keypad.get_button_at(1, 0).unwrap().action, digit(7));
        assert_eq!(keypad.get_button_at(4, 1).unwrap().action, digit(0));
        assert_eq!(keypad.get_button_at(4, 3).unwrap().action, KeypadAction::Equals);
        assert!(keypad.get_button_at(5, 0).is_none());
        assert!(keypad.get_button_at(0, 4).is_none());
    }

    #[test]
    fn test_keypad_every_digit_present() {
        let keypad = Keypad::new();
        for n in 0..=9 {
            assert!(keypad.position_of(digit(n)).is_some(), "missing digit {n}");
        }
        assert!(keypad.position_of(KeypadAction::Backspace).is_none());
    }

    #[test]
    fn test_keypad_unique_ids() {
        let keypad = Keypad::new();
        let mut ids = std::collections::HashSet::new();
        for btn in keypad.buttons() {
            assert!(ids.insert(btn.id.clone()), "duplicate id {}", btn.id);
        }
    }

    #[test]
    fn test_handle_click() {
        let keypad = Keypad::new();
        assert_eq!(
            keypad.handle_click("btn-multiply"),
            Some(KeypadAction::Operator(Operation::Multiply))
        );
        assert_eq!(keypad.handle_click("btn-nope"), None);
    }

    #[test]
    fn test_key_bindings_documented() {
        assert!(KEY_BINDINGS.iter().any(|(keys, _)| keys.contains("Enter")));
        assert!(KEY_BINDINGS.iter().all(|(_, desc)| !desc.is_empty()));
    }
}
