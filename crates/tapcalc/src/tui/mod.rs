//! Terminal front-end for the calculator

mod app;
mod input;
mod keypad;
mod ui;

pub use app::CalculatorApp;
pub use input::{InputHandler, KeyAction};
pub use keypad::{hit_test, KeypadWidget};
pub use ui::{keypad_area, render, CalculatorUI, APP_TITLE};
