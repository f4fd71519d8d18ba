//! Key script replay example
//!
//! Prints the display and formula after every key of a script.
//!
//! Run with: cargo run --example key_script -- "200 + 10 % = ="

use tapcalc::prelude::*;

fn main() -> Result<(), CalcError> {
    let script = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "5 + 3 = = ×2 =".to_string());

    let mut engine = Engine::new();
    for action in parse_key_script(&script)? {
        engine.apply(action);
        println!(
            "{:>3}  {:>20}  {}",
            action.label(),
            engine.display_text(),
            engine.formula_text()
        );
    }
    Ok(())
}
