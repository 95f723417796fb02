//! Arithmetic failures raised by the calculator core.

use thiserror::Error;

/// The one failure the arithmetic core can signal.
///
/// It never escapes the state machine: the calculator turns it into the
/// transient `"Error"` display and schedules a reset.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum CalcError {
    #[error("Cannot divide by 0")]
    DivisionByZero,
}
