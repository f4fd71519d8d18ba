//! Unified calculator driver
//!
//! Behavioural checks are written once against [`CalculatorDriver`] and run
//! against every front-end: the bare engine and the terminal app.

use crate::core::{CalcResult, Engine, Signal};
use crate::keypad::{parse_key_script, KeypadAction};

/// Abstract driver for calculator interactions
pub trait CalculatorDriver {
    /// Presses one keypad action
    fn press(&mut self, action: KeypadAction);

    /// Current display text
    fn display(&self) -> String;

    /// Current formula text
    fn formula(&self) -> String;

    /// Result-change signal of the last press
    fn signal(&self) -> Signal;

    /// Returns to the initial state
    fn reset(&mut self) {
        self.press(KeypadAction::AllClear);
    }

    /// Presses every action of a key script in order
    fn press_keys(&mut self, script: &str) -> CalcResult<()> {
        for action in parse_key_script(script)? {
            self.press(action);
        }
        Ok(())
    }
}

/// Driver over a bare [`Engine`]
#[derive(Debug, Default)]
pub struct KeypadDriver {
    engine: Engine,
}

impl KeypadDriver {
    /// Creates a driver over a fresh engine
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a driver over an existing engine
    #[must_use]
    pub fn with_engine(engine: Engine) -> Self {
        Self { engine }
    }

    /// Returns the underlying engine
    #[must_use]
    pub fn engine(&self) -> &Engine {
        &self.engine
    }
}

impl CalculatorDriver for KeypadDriver {
    fn press(&mut self, action: KeypadAction) {
        self.engine.apply(action);
    }

    fn display(&self) -> String {
        self.engine.display_text()
    }

    fn formula(&self) -> String {
        self.engine.formula_text()
    }

    fn signal(&self) -> Signal {
        self.engine.signal()
    }
}

/// TUI driver implementation
#[cfg(feature = "tui")]
pub mod tui_driver {
    use super::{CalculatorDriver, KeypadAction, Signal};
    use crate::tui::CalculatorApp;

    /// Driver wrapping the terminal calculator app
    #[derive(Debug, Default)]
    pub struct TuiDriver {
        app: CalculatorApp,
    }

    impl TuiDriver {
        /// Creates a new TUI driver
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Returns the underlying app
        #[must_use]
        pub fn app(&self) -> &CalculatorApp {
            &self.app
        }
    }

    impl CalculatorDriver for TuiDriver {
        fn press(&mut self, action: KeypadAction) {
            self.app.press(action);
        }

        fn display(&self) -> String {
            self.app.engine().display_text()
        }

        fn formula(&self) -> String {
            self.app.engine().formula_text()
        }

        fn signal(&self) -> Signal {
            self.app.engine().signal()
        }
    }
}

#[cfg(feature = "tui")]
pub use tui_driver::TuiDriver;

// ===== Unified specifications =====
// These work with ANY CalculatorDriver implementation

/// Verifies the four operators
pub fn verify_basic_arithmetic<D: CalculatorDriver>(driver: &mut D) -> CalcResult<()> {
    for (script, expected) in [("5+3=", "8"), ("10-4=", "6"), ("6*7=", "42"), ("20/4=", "5")] {
        driver.reset();
        driver.press_keys(script)?;
        assert_eq!(driver.display(), expected, "{script}");
        assert_eq!(driver.signal(), Signal::Updated, "{script}");
    }
    Ok(())
}

/// Verifies division by zero collapses to the error sentinel
pub fn verify_division_by_zero<D: CalculatorDriver>(driver: &mut D) -> CalcResult<()> {
    driver.reset();
    driver.press_keys("5/0=")?;
    assert_eq!(driver.display(), "NaN");
    assert_eq!(driver.formula(), "Error");
    assert_eq!(driver.signal(), Signal::Errored);

    // Still usable afterwards
    driver.press_keys("2+2=")?;
    assert_eq!(driver.display(), "4");
    Ok(())
}

/// Verifies successive `=` presses re-apply the last operation
pub fn verify_repeat_equals<D: CalculatorDriver>(driver: &mut D) -> CalcResult<()> {
    driver.reset();
    driver.press_keys("5+3")?;
    let mut seen = Vec::new();
    for _ in 0..3 {
        driver.press(KeypadAction::Equals);
        seen.push(driver.display());
    }
    assert_eq!(seen, ["8", "11", "14"]);
    Ok(())
}

/// Verifies percent is taken of the left operand
pub fn verify_percent_of_base<D: CalculatorDriver>(driver: &mut D) -> CalcResult<()> {
    driver.reset();
    driver.press_keys("200+10%")?;
    assert_eq!(driver.display(), "20");
    driver.press(KeypadAction::Equals);
    assert_eq!(driver.display(), "220");
    assert_eq!(driver.formula(), "200 + 20");

    driver.reset();
    driver.press_keys("200+%=")?;
    assert_eq!(driver.display(), "400");
    Ok(())
}

/// Verifies a second operator evaluates the first
pub fn verify_chained_operators<D: CalculatorDriver>(driver: &mut D) -> CalcResult<()> {
    driver.reset();
    driver.press_keys("5+3*")?;
    assert_eq!(driver.display(), "8");
    assert_eq!(driver.formula(), "8 ×");
    driver.press_keys("2=")?;
    assert_eq!(driver.display(), "16");
    Ok(())
}

/// Verifies sign toggling
pub fn verify_sign_toggle<D: CalculatorDriver>(driver: &mut D) -> CalcResult<()> {
    driver.reset();
    driver.press(KeypadAction::ToggleSign);
    assert_eq!(driver.display(), "0");
    driver.press_keys("5n")?;
    assert_eq!(driver.display(), "-5");
    driver.press(KeypadAction::ToggleSign);
    assert_eq!(driver.display(), "5");
    Ok(())
}

/// Verifies backspace walks the entry back to zero
pub fn verify_backspace<D: CalculatorDriver>(driver: &mut D) -> CalcResult<()> {
    driver.reset();
    driver.press_keys("1234.5")?;
    assert_eq!(driver.display(), "1,234.5");
    for _ in 0..10 {
        driver.press(KeypadAction::Backspace);
    }
    assert_eq!(driver.display(), "0");
    Ok(())
}

/// Verifies all-clear forgets every bit of history
pub fn verify_reset<D: CalculatorDriver>(driver: &mut D) -> CalcResult<()> {
    driver.press_keys("9*9==")?;
    driver.reset();
    assert_eq!(driver.display(), "0");
    assert_eq!(driver.formula(), "");
    driver.press(KeypadAction::Equals);
    assert_eq!(driver.display(), "0");
    assert_eq!(driver.signal(), Signal::Idle);
    Ok(())
}

/// Complete verification suite
pub fn run_full_specification<D: CalculatorDriver>(driver: &mut D) -> CalcResult<()> {
    verify_basic_arithmetic(driver)?;
    verify_division_by_zero(driver)?;
    verify_repeat_equals(driver)?;
    verify_percent_of_base(driver)?;
    verify_chained_operators(driver)?;
    verify_sign_toggle(driver)?;
    verify_backspace(driver)?;
    verify_reset(driver)
}
