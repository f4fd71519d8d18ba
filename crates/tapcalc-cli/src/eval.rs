//! Key-script evaluation and output rendering

use serde::Serialize;
use tapcalc::core::{Engine, EngineConfig, EngineSnapshot};
use tapcalc::keypad::{parse_key_script, KEY_BINDINGS};
use tracing::debug;

use crate::error::CliResult;

/// Engine state after one key of a script
#[derive(Debug, Clone, Serialize)]
pub struct Step {
    /// Label of the key pressed
    pub key: String,
    /// State after the key
    pub state: EngineSnapshot,
}

/// Outcome of replaying a key script
#[derive(Debug, Clone, Serialize)]
pub struct EvalReport {
    /// Per-key states, present when steps were requested
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<Step>,
    /// Final state
    #[serde(rename = "final")]
    pub result: EngineSnapshot,
}

/// Replays `script` on a fresh engine
pub fn evaluate(config: &EngineConfig, script: &str, record_steps: bool) -> CliResult<EvalReport> {
    let actions = parse_key_script(script)?;
    debug!(keys = actions.len(), "evaluating script");

    let mut engine = Engine::with_config(config.clone());
    let mut steps = Vec::new();
    for action in actions {
        engine.apply(action);
        if record_steps {
            steps.push(Step {
                key: action.label(),
                state: engine.snapshot(),
            });
        }
    }

    Ok(EvalReport {
        steps,
        result: engine.snapshot(),
    })
}

/// Plain-text rendering: the display, then the formula when there is one
#[must_use]
pub fn render_text(report: &EvalReport) -> String {
    let mut out = String::new();
    for step in &report.steps {
        out.push_str(&format!(
            "{:>3}  {:>20}  {}\n",
            step.key, step.state.display, step.state.formula
        ));
    }
    if !report.steps.is_empty() {
        out.push('\n');
    }
    out.push_str(&report.result.display);
    out.push('\n');
    if !report.result.formula.is_empty() {
        out.push_str(&report.result.formula);
        out.push('\n');
    }
    out
}

/// JSON rendering of the whole report
pub fn render_json(report: &EvalReport) -> CliResult<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Keyboard map for the `keys` command
#[must_use]
pub fn render_keys() -> String {
    let mut out = String::from("Keyboard map\n\n");
    for (keys, desc) in KEY_BINDINGS {
        out.push_str(&format!("  {keys:<14} {desc}\n"));
    }
    out.push_str(&format!("  {:<14} {}\n", "q Ctrl+C", "Quit (run only)"));
    out
}
