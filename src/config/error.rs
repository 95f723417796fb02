//! Configuration errors.

use std::path::PathBuf;
use thiserror::Error;

/// A single rule a configuration value breaks.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigViolation {
    #[error("decimal_places must be at most {max} (got {value})")]
    DecimalPlacesOutOfRange { value: u32, max: u32 },

    #[error("exponent_digits must be at most {max} (got {value})")]
    ExponentDigitsOutOfRange { value: usize, max: usize },

    #[error("max_display_len must be at least {min} (got {value})")]
    DisplayTooNarrow { value: usize, min: usize },

    #[error("reset_delay_ms must be at most {max} (got {value})")]
    ResetDelayTooLong { value: u64, max: u64 },
}

/// Errors loading or building a [`CalculatorConfig`](super::CalculatorConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {}", join_violations(.violations))]
    Invalid { violations: Vec<ConfigViolation> },
}

fn join_violations(violations: &[ConfigViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
