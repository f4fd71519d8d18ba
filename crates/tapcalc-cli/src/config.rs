//! CLI configuration

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tapcalc::core::EngineConfig;
use tracing::debug;

use crate::commands::Cli;
use crate::error::CliResult;

/// CLI verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Verbosity {
    /// Quiet - errors only
    Quiet,
    /// Normal - default output
    #[default]
    Normal,
    /// Verbose - engine transitions
    Verbose,
    /// Debug - every key
    Debug,
}

impl Verbosity {
    /// Derives the level from `-q` and the `-v` count
    #[must_use]
    pub const fn from_flags(quiet: bool, verbose: u8) -> Self {
        if quiet {
            return Self::Quiet;
        }
        match verbose {
            0 => Self::Normal,
            1 => Self::Verbose,
            _ => Self::Debug,
        }
    }

    /// Check if quiet mode
    #[must_use]
    pub const fn is_quiet(self) -> bool {
        matches!(self, Self::Quiet)
    }

    /// Check if verbose or higher
    #[must_use]
    pub const fn is_verbose(self) -> bool {
        matches!(self, Self::Verbose | Self::Debug)
    }

    /// `tracing` filter directive for this level
    #[must_use]
    pub const fn filter_directive(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Normal => "warn",
            Self::Verbose => "debug",
            Self::Debug => "trace",
        }
    }
}

/// CLI configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Verbosity level
    pub verbosity: Verbosity,
    /// Engine configuration
    pub engine: EngineConfig,
}

impl CliConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set verbosity
    #[must_use]
    pub const fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set the engine configuration
    #[must_use]
    pub fn with_engine(mut self, engine: EngineConfig) -> Self {
        self.engine = engine;
        self
    }

    /// Builds the configuration from parsed arguments, loading the engine
    /// file when one was given
    pub fn from_cli(cli: &Cli) -> CliResult<Self> {
        let engine = match &cli.config {
            Some(path) => load_engine_config(path)?,
            None => EngineConfig::default(),
        };
        Ok(Self::new()
            .with_verbosity(Verbosity::from_flags(cli.quiet, cli.verbose))
            .with_engine(engine))
    }
}

/// Reads and validates an engine configuration from a YAML file.
///
/// Missing keys fall back to their defaults.
pub fn load_engine_config(path: &Path) -> CliResult<EngineConfig> {
    let text = fs::read_to_string(path)?;
    let config = parse_engine_config(&text)?;
    debug!(path = %path.display(), ?config, "loaded engine config");
    Ok(config)
}

/// Parses and validates an engine configuration from YAML text
pub fn parse_engine_config(text: &str) -> CliResult<EngineConfig> {
    // An empty document deserializes as unit, not as an empty mapping
    if text.trim().is_empty() {
        return Ok(EngineConfig::default());
    }
    let config: EngineConfig = serde_yaml_ng::from_str(text)?;
    config.validate()?;
    Ok(config)
}
