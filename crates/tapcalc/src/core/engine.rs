//! Arithmetic entry engine
//!
//! A keypad calculator state machine. The engine alternates between
//! entering a number (digits mutate `entry` directly) and being armed for a
//! fresh operand (`awaiting_fresh_entry`), with `pending_operator` and
//! `stored_operand` recording the armed operation.
//!
//! None of the operations fail. Inputs that cannot be applied are dropped,
//! and invalid arithmetic collapses the entry to the `NaN` sentinel.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::number::{self, NAN};
use crate::core::{Digit, EngineConfig, Operation};

/// Formula text shown after an invalid evaluation
pub const ERROR_MARKER: &str = "Error";

/// Result-change signal for the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Signal {
    /// Last operation did not produce a result
    #[default]
    Idle,
    /// Last operation produced a new result
    Updated,
    /// Last operation collapsed to the error sentinel
    Errored,
}

/// Serializable view of the engine outputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    /// Formatted entry or result
    pub display: String,
    /// Formula line
    pub formula: String,
    /// Raw entry text
    pub entry: String,
    /// Operator waiting for its right operand
    pub pending_operator: Option<Operation>,
    /// Whether the next digit starts a new number
    pub awaiting_fresh_entry: bool,
    /// Result-change signal
    pub signal: Signal,
}

/// Calculator engine state, owned and mutated in place
#[derive(Debug, Clone)]
pub struct Engine {
    config: EngineConfig,
    entry: String,
    stored_operand: Option<f64>,
    pending_operator: Option<Operation>,
    last_operand: Option<f64>,
    last_operator: Option<Operation>,
    last_left_operand: Option<f64>,
    awaiting_fresh_entry: bool,
    errored: bool,
    signal: Signal,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Engine {
    fn eq(&self, other: &Self) -> bool {
        self.config == other.config
            && self.entry == other.entry
            && self.stored_operand == other.stored_operand
            && self.pending_operator == other.pending_operator
            && self.last_operand == other.last_operand
            && self.last_operator == other.last_operator
            && self.last_left_operand == other.last_left_operand
            && self.awaiting_fresh_entry == other.awaiting_fresh_entry
            && self.errored == other.errored
            && self.signal == other.signal
    }
}

impl Engine {
    /// Creates an engine with the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Creates an engine with a custom configuration
    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            config,
            entry: "0".to_string(),
            stored_operand: None,
            pending_operator: None,
            last_operand: None,
            last_operator: None,
            last_left_operand: None,
            awaiting_fresh_entry: false,
            errored: false,
            signal: Signal::Idle,
        }
    }

    // ===== Accessors =====

    /// Active configuration
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Raw entry text
    #[must_use]
    pub fn entry(&self) -> &str {
        &self.entry
    }

    /// Left operand captured when the operator was chosen
    #[must_use]
    pub fn stored_operand(&self) -> Option<f64> {
        self.stored_operand
    }

    /// Operator waiting for its right operand
    #[must_use]
    pub fn pending_operator(&self) -> Option<Operation> {
        self.pending_operator
    }

    /// Right operand of the most recent evaluation
    #[must_use]
    pub fn last_operand(&self) -> Option<f64> {
        self.last_operand
    }

    /// Operator of the most recent evaluation
    #[must_use]
    pub fn last_operator(&self) -> Option<Operation> {
        self.last_operator
    }

    /// Left operand of the most recent evaluation
    #[must_use]
    pub fn last_left_operand(&self) -> Option<f64> {
        self.last_left_operand
    }

    /// Whether the next digit starts a new number
    #[must_use]
    pub fn is_awaiting_fresh_entry(&self) -> bool {
        self.awaiting_fresh_entry
    }

    /// Whether the last evaluation was invalid
    #[must_use]
    pub fn is_errored(&self) -> bool {
        self.errored
    }

    /// Result-change signal of the last operation
    #[must_use]
    pub fn signal(&self) -> Signal {
        self.signal
    }

    // ===== Entry =====

    /// Appends a digit, or starts a new number when armed.
    ///
    /// A lone `0` or `-0` is replaced rather than extended, so `-0` then
    /// `4` gives `-4`.
    pub fn input_digit(&mut self, digit: Digit) {
        self.begin_input();
        let d = digit.as_char();

        if self.awaiting_fresh_entry {
            self.entry = d.to_string();
            self.awaiting_fresh_entry = false;
        } else if self.entry == "0" {
            self.entry = d.to_string();
        } else if self.entry == "-0" {
            self.entry = format!("-{d}");
        } else if number::digit_count(&self.entry) < self.config.max_digits {
            self.entry.push(d);
        } else {
            trace!(entry = %self.entry, "digit limit reached, dropping {d}");
        }
    }

    /// Appends a decimal point, or starts `0.` when armed
    pub fn input_decimal(&mut self) {
        self.begin_input();

        if self.awaiting_fresh_entry {
            self.entry = "0.".to_string();
            self.awaiting_fresh_entry = false;
        } else if !self.entry.contains('.') {
            self.entry.push('.');
        }
    }

    /// Flips the sign of the entry; `0` and `NaN` are left alone
    pub fn toggle_sign(&mut self) {
        self.signal = Signal::Idle;

        if self.entry == "0" || self.entry == NAN {
            return;
        }
        self.entry = match self.entry.strip_prefix('-') {
            Some(rest) => rest.to_string(),
            None => format!("-{}", self.entry),
        };
    }

    /// Converts the entry to a percentage.
    ///
    /// With an operation pending the percentage is taken of the left
    /// operand, so `200 + 10 %` turns the entry into `20`. The
    /// fresh-entry flag is left as it was: `200 + %` still evaluates
    /// `200 + 200` on `=`.
    pub fn percent(&mut self) {
        self.signal = Signal::Idle;

        let Some(value) = number::parse_entry(&self.entry) else {
            return;
        };
        let result = match (self.stored_operand, self.pending_operator) {
            (Some(base), Some(_)) => base * (value / 100.0),
            _ => value / 100.0,
        };

        self.entry = self.normalize(result);
        if number::is_sentinel(&self.entry) {
            self.awaiting_fresh_entry = true;
        }
        trace!(entry = %self.entry, "percent applied");
    }

    // ===== Operators =====

    /// Arms an operator, evaluating the pending one first when a right
    /// operand has already been typed
    pub fn set_operation(&mut self, op: Operation) {
        self.signal = Signal::Idle;
        if self.pending_operator.is_some() && !self.awaiting_fresh_entry {
            self.compute();
        }

        let Some(value) = number::parse_entry(&self.entry) else {
            debug!(entry = %self.entry, "operator {op} ignored, entry is not a finite number");
            return;
        };

        self.errored = false;
        self.stored_operand = Some(value);
        self.pending_operator = Some(op);
        self.last_operand = None;
        self.last_operator = None;
        self.awaiting_fresh_entry = true;
        debug!(operand = value, "armed {}", op.name());
    }

    /// Evaluates the pending operation (the `=` key)
    pub fn compute(&mut self) {
        self.signal = Signal::Idle;

        if self.pending_operator.is_none() && !self.rearm_repeat() {
            return;
        }
        let Some(op) = self.pending_operator else {
            return;
        };

        let a = self
            .stored_operand
            .or_else(|| number::parse_entry(&self.entry));
        let b = self.right_operand(op, a);

        let (Some(a), Some(b)) = (a, b) else {
            self.collapse_to_error("operand is not a finite number");
            return;
        };

        let raw = op.apply(a, b);
        if raw.is_nan() {
            self.collapse_to_error("invalid arithmetic");
            return;
        }

        self.entry = self.normalize(raw);
        self.last_operand = Some(b);
        self.last_operator = Some(op);
        self.last_left_operand = Some(a);
        self.stored_operand = None;
        self.pending_operator = None;
        self.awaiting_fresh_entry = number::is_sentinel(&self.entry);
        self.errored = false;
        self.signal = Signal::Updated;
        debug!(a, b, result = %self.entry, "evaluated {}", op.name());
    }

    /// Repeat-equals: re-arms the last evaluation against the current entry.
    ///
    /// Returns false when there is nothing to repeat.
    fn rearm_repeat(&mut self) -> bool {
        let (Some(_), Some(op)) = (self.last_operand, self.last_operator) else {
            return false;
        };
        self.pending_operator = Some(op);
        self.stored_operand = number::parse_entry(&self.entry);
        trace!(stored = ?self.stored_operand, "repeat {}", op.name());
        true
    }

    /// Picks the right operand for `compute`
    fn right_operand(&self, op: Operation, a: Option<f64>) -> Option<f64> {
        if self.awaiting_fresh_entry {
            // Nothing typed since the operator: `a op a` unless a previous
            // operand is still around.
            return self.last_operand.or(a);
        }

        let repeating = self.last_operator == Some(op)
            && self.last_operand.is_some()
            && self.stored_operand.is_some();
        if repeating {
            return self.last_operand;
        }

        number::parse_entry(&self.entry)
    }

    fn collapse_to_error(&mut self, reason: &str) {
        debug!(entry = %self.entry, "evaluation failed: {reason}");
        self.entry = NAN.to_string();
        self.stored_operand = None;
        self.pending_operator = None;
        self.last_operand = None;
        self.last_operator = None;
        self.last_left_operand = None;
        self.awaiting_fresh_entry = true;
        self.errored = true;
        self.signal = Signal::Errored;
    }

    // ===== Clearing =====

    /// Removes the last typed character (ignored while armed)
    pub fn backspace(&mut self) {
        self.signal = Signal::Idle;

        if self.awaiting_fresh_entry {
            return;
        }
        self.entry.pop();
        if self.entry.is_empty() || self.entry == "-" {
            self.entry = "0".to_string();
        }
    }

    /// Clears the entry only (`CE`); the pending operation survives
    pub fn clear_entry(&mut self) {
        self.begin_input();
        self.entry = "0".to_string();
        self.awaiting_fresh_entry = false;
    }

    /// Clears everything (`AC`)
    pub fn reset(&mut self) {
        debug!("reset");
        *self = Self::with_config(self.config.clone());
    }

    // ===== Outputs =====

    /// Formatted entry or result
    #[must_use]
    pub fn display_text(&self) -> String {
        number::format_display(&self.entry, &self.config.group_separator)
    }

    /// Formula line describing the pending or last evaluation
    #[must_use]
    pub fn formula_text(&self) -> String {
        if self.errored {
            return ERROR_MARKER.to_string();
        }
        if let (Some(stored), Some(op)) = (self.stored_operand, self.pending_operator) {
            return format!("{} {}", self.format_operand(stored), op.symbol());
        }
        match (self.last_left_operand, self.last_operator, self.last_operand) {
            (Some(left), Some(op), Some(right)) => format!(
                "{} {} {}",
                self.format_operand(left),
                op.symbol(),
                self.format_operand(right)
            ),
            _ => String::new(),
        }
    }

    /// Serializable view of the outputs
    #[must_use]
    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            display: self.display_text(),
            formula: self.formula_text(),
            entry: self.entry.clone(),
            pending_operator: self.pending_operator,
            awaiting_fresh_entry: self.awaiting_fresh_entry,
            signal: self.signal,
        }
    }

    // ===== Helpers =====

    /// Entry editing clears the error marker and the result signal
    fn begin_input(&mut self) {
        self.signal = Signal::Idle;
        self.errored = false;
    }

    fn normalize(&self, value: f64) -> String {
        number::normalize(value, self.config.precision, EngineConfig::DEFAULT_MAX_DIGITS)
    }

    fn format_operand(&self, value: f64) -> String {
        number::format_display(&self.normalize(value), &self.config.group_separator)
    }
}
