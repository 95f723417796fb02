//! Calculator configuration.
//!
//! Configuration is plain data (serde, JSON on disk) checked with
//! Stillwater's `Validation`, so a bad file reports every broken field in
//! one pass instead of the first one only.
//!
//! # Example
//!
//! ```rust
//! use tally::config::{CalculatorConfig, ResetPolicy};
//!
//! let config = CalculatorConfig::from_json(r#"{ "reset_delay_ms": 1500 }"#).unwrap();
//! assert_eq!(config.reset_delay_ms, 1500);
//! assert_eq!(config.decimal_places, 10);
//! assert_eq!(config.reset_policy, ResetPolicy::CancelOnInput);
//! ```

pub mod builder;
pub mod error;

pub use builder::CalculatorConfigBuilder;
pub use error::{ConfigError, ConfigViolation};

use crate::core::{
    Formatter, DEFAULT_DECIMAL_PLACES, DEFAULT_EXPONENT_DIGITS, DEFAULT_MAX_DISPLAY_LEN,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

pub const DEFAULT_RESET_DELAY_MS: u64 = 900;
pub const DEFAULT_LOG_CAPACITY: usize = 64;

/// Digits an `f64` can carry meaningfully.
pub const MAX_PRECISION: usize = 15;
pub const MAX_RESET_DELAY_MS: u64 = 60_000;

/// What happens to a scheduled error reset when new input arrives first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResetPolicy {
    /// Any dispatched event disarms the pending reset.
    #[default]
    CancelOnInput,

    /// The reset fires after the delay no matter what was typed since,
    /// clearing whatever state exists at that moment.
    AlwaysFire,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    pub reset_delay_ms: u64,
    pub reset_policy: ResetPolicy,
    pub decimal_places: u32,
    pub max_display_len: usize,
    pub exponent_digits: usize,
    pub log_capacity: usize,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            reset_delay_ms: DEFAULT_RESET_DELAY_MS,
            reset_policy: ResetPolicy::default(),
            decimal_places: DEFAULT_DECIMAL_PLACES,
            max_display_len: DEFAULT_MAX_DISPLAY_LEN,
            exponent_digits: DEFAULT_EXPONENT_DIGITS,
            log_capacity: DEFAULT_LOG_CAPACITY,
        }
    }
}

impl CalculatorConfig {
    pub fn builder() -> CalculatorConfigBuilder {
        CalculatorConfigBuilder::new()
    }

    pub fn reset_delay(&self) -> Duration {
        Duration::from_millis(self.reset_delay_ms)
    }

    pub fn formatter(&self) -> Formatter {
        Formatter {
            decimal_places: self.decimal_places,
            max_display_len: self.max_display_len,
            exponent_digits: self.exponent_digits,
        }
    }

    /// Parse and validate a JSON document; missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validated()
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Check every field, accumulating ALL violations.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<ConfigViolation>> {
        let checks = vec![
            check(
                self.decimal_places as usize <= MAX_PRECISION,
                ConfigViolation::DecimalPlacesOutOfRange {
                    value: self.decimal_places,
                    max: MAX_PRECISION as u32,
                },
            ),
            check(
                self.exponent_digits <= MAX_PRECISION,
                ConfigViolation::ExponentDigitsOutOfRange {
                    value: self.exponent_digits,
                    max: MAX_PRECISION,
                },
            ),
            check(
                self.max_display_len >= 1,
                ConfigViolation::DisplayTooNarrow {
                    value: self.max_display_len,
                    min: 1,
                },
            ),
            check(
                self.reset_delay_ms <= MAX_RESET_DELAY_MS,
                ConfigViolation::ResetDelayTooLong {
                    value: self.reset_delay_ms,
                    max: MAX_RESET_DELAY_MS,
                },
            ),
        ];

        Validation::all_vec(checks).map(|_| ())
    }

    /// Validate, returning the config itself or every violation found.
    pub fn validated(self) -> Result<Self, ConfigError> {
        match self.validate() {
            Validation::Success(()) => Ok(self),
            Validation::Failure(errors) => Err(ConfigError::Invalid {
                violations: errors.iter().cloned().collect(),
            }),
        }
    }
}

fn check(
    ok: bool,
    violation: ConfigViolation,
) -> Validation<(), NonEmptyVec<ConfigViolation>> {
    if ok {
        Validation::success(())
    } else {
        Validation::fail(violation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_keypad_behaviour() {
        let config = CalculatorConfig::default();
        assert_eq!(config.reset_delay(), Duration::from_millis(900));
        assert_eq!(config.reset_policy, ResetPolicy::CancelOnInput);
        assert_eq!(config.formatter(), Formatter::default());
        assert!(matches!(config.validate(), Validation::Success(())));
    }

    #[test]
    fn from_json_fills_missing_fields() {
        let config =
            CalculatorConfig::from_json(r#"{ "reset_policy": "always_fire", "log_capacity": 0 }"#)
                .unwrap();
        assert_eq!(config.reset_policy, ResetPolicy::AlwaysFire);
        assert_eq!(config.log_capacity, 0);
        assert_eq!(config.reset_delay_ms, DEFAULT_RESET_DELAY_MS);
    }

    #[test]
    fn from_json_rejects_malformed_documents() {
        let result = CalculatorConfig::from_json("{ not json");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn validation_accumulates_all_violations() {
        let config = CalculatorConfig {
            decimal_places: 16,
            exponent_digits: 16,
            ..CalculatorConfig::default()
        };

        match config.validate() {
            Validation::Failure(errors) => {
                assert_eq!(errors.len(), 2);
                assert!(errors
                    .iter()
                    .any(|e| matches!(e, ConfigViolation::ExponentDigitsOutOfRange { .. })));
            }
            Validation::Success(_) => panic!("Expected failures, got success"),
        }
    }

    #[test]
    fn invalid_json_values_list_every_problem() {
        let err = CalculatorConfig::from_json(r#"{ "decimal_places": 20, "max_display_len": 0 }"#)
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("decimal_places"), "{message}");
        assert!(message.contains("max_display_len"), "{message}");
    }

    #[test]
    fn load_reports_missing_file() {
        let result = CalculatorConfig::load("/nonexistent/tally.json");
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn config_serializes_correctly() {
        let config = CalculatorConfig::builder()
            .reset_policy(ResetPolicy::AlwaysFire)
            .build()
            .unwrap();
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains(r#""reset_policy":"always_fire""#));
        assert_eq!(CalculatorConfig::from_json(&json).unwrap(), config);
    }
}
