//! Engine configuration

use serde::{Deserialize, Serialize};

use crate::core::{CalcError, CalcResult};

/// Tunables for entry limits, rounding and display grouping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum digits accepted while typing (sign and point excluded)
    pub max_digits: usize,
    /// Decimal places kept after each evaluation
    pub precision: usize,
    /// Thousands separator for the integer portion, empty for none
    pub group_separator: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_digits: Self::DEFAULT_MAX_DIGITS,
            precision: Self::DEFAULT_PRECISION,
            group_separator: ",".to_string(),
        }
    }
}

impl EngineConfig {
    /// Default typed-digit limit; also the significant-digit ceiling for results
    pub const DEFAULT_MAX_DIGITS: usize = 15;
    /// Default rounding precision
    pub const DEFAULT_PRECISION: usize = 12;

    /// Create the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the typed-digit limit
    #[must_use]
    pub fn with_max_digits(mut self, max_digits: usize) -> Self {
        self.max_digits = max_digits;
        self
    }

    /// Set the rounding precision
    #[must_use]
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Set the thousands separator
    #[must_use]
    pub fn with_group_separator(mut self, separator: impl Into<String>) -> Self {
        self.group_separator = separator.into();
        self
    }

    /// Checks the values stay inside what an `f64` can represent faithfully
    pub fn validate(&self) -> CalcResult<()> {
        if self.max_digits == 0 || self.max_digits > Self::DEFAULT_MAX_DIGITS {
            return Err(CalcError::InvalidConfig(format!(
                "max_digits must be between 1 and {}, got {}",
                Self::DEFAULT_MAX_DIGITS,
                self.max_digits
            )));
        }
        if self.precision > Self::DEFAULT_MAX_DIGITS {
            return Err(CalcError::InvalidConfig(format!(
                "precision must be at most {}, got {}",
                Self::DEFAULT_MAX_DIGITS,
                self.precision
            )));
        }
        if self.group_separator.chars().any(|c| c.is_ascii_digit() || c == '.' || c == '-') {
            return Err(CalcError::InvalidConfig(format!(
                "group_separator {:?} would be ambiguous",
                self.group_separator
            )));
        }
        Ok(())
    }
}
