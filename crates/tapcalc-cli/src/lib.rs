//! tapcalc CLI library
//!
//! Argument parsing, configuration loading and the command
//! implementations behind the `tapcalc` binary.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::format_push_string)]
#![allow(clippy::missing_errors_doc)]

mod commands;
mod config;
mod error;
pub mod eval;
pub mod terminal;

pub use commands::{Cli, Commands, EvalArgs};
pub use config::{load_engine_config, parse_engine_config, CliConfig, Verbosity};
pub use error::{CliError, CliResult};
pub use eval::{evaluate, render_json, render_keys, render_text, EvalReport, Step};
