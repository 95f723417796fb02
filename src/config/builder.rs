//! Fluent builder for calculator configuration.

use super::error::ConfigError;
use super::{CalculatorConfig, ResetPolicy};
use std::time::Duration;

/// Builder for [`CalculatorConfig`].
///
/// Starts from the defaults; `build` validates every field and reports
/// all violations together.
///
/// # Example
///
/// ```rust
/// use tally::config::{CalculatorConfig, ResetPolicy};
/// use std::time::Duration;
///
/// let config = CalculatorConfig::builder()
///     .reset_delay(Duration::from_millis(500))
///     .reset_policy(ResetPolicy::AlwaysFire)
///     .build()
///     .unwrap();
/// assert_eq!(config.reset_delay_ms, 500);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CalculatorConfigBuilder {
    config: CalculatorConfig,
}

impl CalculatorConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay before an error display resets itself
    pub fn reset_delay(mut self, delay: Duration) -> Self {
        self.config.reset_delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn reset_policy(mut self, policy: ResetPolicy) -> Self {
        self.config.reset_policy = policy;
        self
    }

    pub fn decimal_places(mut self, places: u32) -> Self {
        self.config.decimal_places = places;
        self
    }

    pub fn max_display_len(mut self, len: usize) -> Self {
        self.config.max_display_len = len;
        self
    }

    pub fn exponent_digits(mut self, digits: usize) -> Self {
        self.config.exponent_digits = digits;
        self
    }

    /// Transition log size; zero disables the log
    pub fn log_capacity(mut self, capacity: usize) -> Self {
        self.config.log_capacity = capacity;
        self
    }

    pub fn build(self) -> Result<CalculatorConfig, ConfigError> {
        self.config.validated()
    }
}
