//! tapcalc - keypad calculator engine
//!
//! A four-function calculator driven one key at a time, with the
//! behaviour of a pocket calculator: repeat-equals, percent of the left
//! operand, implicit evaluation when operators are chained, and `NaN` / `∞`
//! sentinels instead of errors.
//!
//! The [`core::Engine`] owns all state. [`keypad`] maps buttons and keyboard
//! keys onto engine operations, and the optional `tui` feature draws the
//! whole thing in a terminal.
//!
//! # Example
//!
//! ```rust
//! use tapcalc::prelude::*;
//!
//! let mut engine = Engine::new();
//! engine.apply_all(parse_key_script("200 + 10 % =").unwrap());
//! assert_eq!(engine.display_text(), "220");
//! assert_eq!(engine.formula_text(), "200 + 20");
//!
//! // `=` again repeats the last operation
//! engine.apply(KeypadAction::Equals);
//! assert_eq!(engine.display_text(), "240");
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod core;
pub mod driver;
pub mod keypad;

#[cfg(feature = "tui")]
pub mod tui;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::core::{
        CalcError, CalcResult, Digit, Engine, EngineConfig, EngineSnapshot, Operation, Signal,
    };
    pub use crate::driver::{CalculatorDriver, KeypadDriver};
    pub use crate::keypad::{parse_key_script, Keypad, KeypadAction};

    #[cfg(feature = "tui")]
    pub use crate::driver::TuiDriver;
}
