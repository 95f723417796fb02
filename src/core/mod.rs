//! Core calculator types and logic.
//!
//! This module contains the pure functional core:
//! - Typed input events (digits, operators, editing keys)
//! - The explicit calculation phase
//! - Arithmetic and display formatting
//! - A bounded transition log
//!
//! Nothing in this module touches timers, I/O or a window; the
//! [`engine`](crate::engine) module layers effects on top of it.

mod error;
mod event;
mod format;
mod history;
mod phase;

pub use error::CalcError;
pub use event::{Digit, Event, EventError, Operator};
pub use format::{
    compute, format_number, parse_display, round_to, symbol_for_op, Formatter,
    DEFAULT_DECIMAL_PLACES, DEFAULT_EXPONENT_DIGITS, DEFAULT_MAX_DISPLAY_LEN, ERROR_DISPLAY,
};
pub use history::{PhaseTransition, TransitionLog};
pub use phase::Phase;
