//! Keyboard input mapping.
//!
//! Translates key names as a host window reports them into [`Event`]s.
//! Scripts of several keys are validated in one pass so that every bad
//! key is reported, not just the first.

use crate::core::{Event, Operator};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("Unrecognized key '{key}' in token {token}")]
    UnknownKey { key: String, token: usize },
}

/// Map one key name to its event.
///
/// Digits, `.`, `+ - * /`, `%`, `=` and `Enter`, `Backspace` and `Escape`
/// are recognised; anything else yields `None`.
///
/// # Example
///
/// ```rust
/// use tally::core::Event;
/// use tally::input::event_for_key;
///
/// assert_eq!(event_for_key("Enter"), Some(Event::Equals));
/// assert_eq!(event_for_key("Backspace"), Some(Event::Delete));
/// assert_eq!(event_for_key("F5"), None);
/// ```
pub fn event_for_key(key: &str) -> Option<Event> {
    match key {
        "Enter" | "=" => Some(Event::Equals),
        "Backspace" => Some(Event::Delete),
        "Escape" => Some(Event::Clear),
        "%" => Some(Event::Percent),
        "." => Some(Event::Decimal),
        _ => {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Event::digit(c)
                    .or_else(|| Operator::try_from(c).ok().map(Event::Operator)),
                _ => None,
            }
        }
    }
}

/// Parse a whitespace-separated key script.
///
/// Each token is either a key name (`Enter`, `Backspace`, ...) or a run of
/// single-character keys such as `12+3=`.
///
/// # Example
///
/// ```rust
/// use stillwater::validation::Validation;
/// use tally::input::parse_keys;
///
/// let events = parse_keys("12 + 3 Enter");
/// assert!(matches!(events, Validation::Success(_)));
///
/// let bad = parse_keys("1 x 2 y");
/// assert!(matches!(bad, Validation::Failure(_)));
/// ```
pub fn parse_keys(script: &str) -> Validation<Vec<Event>, NonEmptyVec<InputError>> {
    let mut checks = Vec::new();
    for (token, key) in script.split_whitespace().enumerate() {
        if let Some(event) = event_for_key(key) {
            checks.push(Validation::success(event));
            continue;
        }
        for c in key.chars() {
            let mut buf = [0u8; 4];
            let single = c.encode_utf8(&mut buf);
            checks.push(match event_for_key(single) {
                Some(event) => Validation::success(event),
                None => Validation::fail(InputError::UnknownKey {
                    key: single.to_string(),
                    token,
                }),
            });
        }
    }
    Validation::all_vec(checks)
}
