//! Input vocabulary of the calculator.
//!
//! Every key the presentation layer can forward maps onto one [`Event`].
//! Digits and operators are closed types so the state machine never has
//! to handle an out-of-range code.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// One of the four supported binary arithmetic operators.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    /// ASCII code as typed on a keyboard (`+ - * /`).
    pub fn code(self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
        }
    }

    /// Display glyph used in the history text.
    ///
    /// Subtraction uses U+2212 MINUS SIGN rather than the ASCII hyphen.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "\u{2212}",
            Self::Multiply => "\u{00d7}",
            Self::Divide => "\u{00f7}",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl TryFrom<char> for Operator {
    type Error = EventError;

    fn try_from(code: char) -> Result<Self, Self::Error> {
        match code {
            '+' => Ok(Self::Add),
            '-' => Ok(Self::Subtract),
            '*' => Ok(Self::Multiply),
            '/' => Ok(Self::Divide),
            other => Err(EventError::UnknownOperator(other)),
        }
    }
}

/// A single decimal digit, `0` through `9`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(try_from = "char", into = "char")]
pub struct Digit(u8);

impl Digit {
    pub fn new(value: u8) -> Option<Self> {
        (value <= 9).then_some(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn as_char(self) -> char {
        char::from(b'0' + self.0)
    }
}

impl TryFrom<char> for Digit {
    type Error = EventError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        c.to_digit(10)
            .map(|d| Self(d as u8))
            .ok_or(EventError::InvalidDigit(c))
    }
}

impl From<Digit> for char {
    fn from(digit: Digit) -> Self {
        digit.as_char()
    }
}

/// Errors constructing typed input from raw characters.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EventError {
    #[error("'{0}' is not a decimal digit")]
    InvalidDigit(char),

    #[error("'{0}' is not an arithmetic operator")]
    UnknownOperator(char),
}

/// A discrete user action forwarded by the presentation layer.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Event {
    Digit(Digit),
    Decimal,
    Percent,
    Delete,
    Operator(Operator),
    Equals,
    Clear,
}

impl Event {
    /// Digit event from a character, or `None` for anything but `0-9`.
    pub fn digit(c: char) -> Option<Self> {
        Digit::try_from(c).ok().map(Self::Digit)
    }
}

impl From<Digit> for Event {
    fn from(digit: Digit) -> Self {
        Self::Digit(digit)
    }
}

impl From<Operator> for Event {
    fn from(op: Operator) -> Self {
        Self::Operator(op)
    }
}
