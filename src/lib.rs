//! Tally: the core of a two-operand desktop calculator.
//!
//! Tally follows a "pure core, imperative shell" layout. The keypad logic
//! is a synchronous state machine with no windowing, rendering or timer
//! dependencies; the single effect it needs (resetting an error display
//! after a delay) lives in a thin async shell.
//!
//! # Core Concepts
//!
//! - **Events**: typed key presses (`Digit`, `Operator`, `Equals`, ...)
//! - **Phase**: an explicit enum of where the calculation stands
//! - **Formatter**: deterministic, locale independent number rendering
//! - **Session**: the calculator plus its cancellable error reset
//!
//! # Example
//!
//! ```rust
//! use tally::engine::Calculator;
//! use tally::input::parse_keys;
//! use stillwater::validation::Validation;
//!
//! let Validation::Success(events) = parse_keys("5 + 3 + 2 Enter") else {
//!     panic!("valid keys");
//! };
//!
//! let mut calc = Calculator::new();
//! for event in events {
//!     calc.dispatch(event);
//! }
//! assert_eq!(calc.display(), "10");
//! assert_eq!(calc.history_text(), "8 + 2 =");
//! ```

pub mod config;
pub mod core;
pub mod engine;
pub mod input;

// Re-export commonly used types
pub use crate::config::{CalculatorConfig, ResetPolicy};
pub use crate::core::{compute, format_number, symbol_for_op, CalcError, Event, Operator, Phase};
pub use crate::engine::{Calculator, Output, Session, Step};
