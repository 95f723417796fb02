//! Calculator state machine and the effectful shell around it.
//!
//! - [`Calculator`] interprets events against the explicit [`Phase`](crate::core::Phase)
//!   and produces the display and history strings. It is synchronous and
//!   owns no timers.
//! - [`Session`] adds the one effect the keypad needs: after a division by
//!   zero the error display resets itself after a short delay, cancelled
//!   (or not) by further input according to the
//!   [`ResetPolicy`](crate::config::ResetPolicy).

mod calculator;
mod session;

pub use calculator::{Calculator, Output, Step};
pub use session::Session;
