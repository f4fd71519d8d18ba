//! Arithmetic entry core
//!
//! Everything with state or edge-case policy lives here; the keypad and
//! terminal front-end only translate events into calls on [`Engine`].

pub mod config;
mod engine;
pub mod number;
mod operations;

pub use config::EngineConfig;
pub use engine::{Engine, EngineSnapshot, Signal};
pub use operations::Operation;

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for fallible calculator boundaries
pub type CalcResult<T> = Result<T, CalcError>;

/// Errors raised at the edges of the engine.
///
/// Engine operations themselves never fail; bad arithmetic collapses to
/// the `NaN` sentinel instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    /// Character is not a decimal digit
    #[error("Invalid digit: {0:?}")]
    InvalidDigit(char),
    /// Operator name not recognised
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),
    /// Keyboard key has no keypad action
    #[error("Unknown key: {0}")]
    UnknownKey(String),
    /// Configuration value out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// A single decimal digit, 0 through 9
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Digit(u8);

impl Digit {
    /// Creates a digit from its numeric value, `None` above 9
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value <= 9 {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Numeric value
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// ASCII character for this digit
    #[must_use]
    pub const fn as_char(self) -> char {
        (b'0' + self.0) as char
    }
}

impl TryFrom<char> for Digit {
    type Error = CalcError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        c.to_digit(10)
            .map(|d| Self(d as u8))
            .ok_or(CalcError::InvalidDigit(c))
    }
}

impl TryFrom<u8> for Digit {
    type Error = CalcError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(CalcError::InvalidDigit(char::from(b'0'.saturating_add(value))))
    }
}

impl From<Digit> for u8 {
    fn from(d: Digit) -> Self {
        d.0
    }
}

impl fmt::Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}
