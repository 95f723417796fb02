//! Bounded log of phase transitions.
//!
//! The log is diagnostic: it lives for one session, is never persisted and
//! is not affected by the `Clear` key. It is separate from the history
//! *text* shown to the user, which only ever describes the last operation.

use super::event::Event;
use super::phase::Phase;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Record of a single phase change.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhaseTransition {
    /// Phase before the event was applied
    pub from: Phase,
    /// Phase after the event was applied
    pub to: Phase,
    /// The event that caused the change; `None` for the timed error reset
    pub event: Option<Event>,
    /// When the transition occurred
    pub timestamp: DateTime<Utc>,
}

/// Ordered, capacity-bounded transition history.
///
/// When full, the oldest entry is evicted. A capacity of zero disables
/// recording entirely.
///
/// # Example
///
/// ```rust
/// use tally::core::{Event, Phase, PhaseTransition, TransitionLog};
/// use chrono::Utc;
///
/// let mut log = TransitionLog::with_capacity(2);
/// for to in [Phase::EnteringFirstOperand, Phase::Idle, Phase::EnteringFirstOperand] {
///     log.record(PhaseTransition {
///         from: Phase::Idle,
///         to,
///         event: Some(Event::Clear),
///         timestamp: Utc::now(),
///     });
/// }
/// assert_eq!(log.len(), 2);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransitionLog {
    capacity: usize,
    transitions: VecDeque<PhaseTransition>,
}

impl Default for TransitionLog {
    fn default() -> Self {
        Self::with_capacity(64)
    }
}

impl TransitionLog {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            transitions: VecDeque::with_capacity(capacity.min(1024)),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append a transition, evicting the oldest entry when full.
    pub fn record(&mut self, transition: PhaseTransition) {
        if self.capacity == 0 {
            return;
        }
        while self.transitions.len() >= self.capacity {
            self.transitions.pop_front();
        }
        self.transitions.push_back(transition);
    }

    /// Phases traversed, oldest first: the `from` of the first retained
    /// entry, then the `to` of every entry.
    pub fn path(&self) -> Vec<&Phase> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.front() {
            path.push(&first.from);
        }
        path.extend(self.transitions.iter().map(|t| &t.to));
        path
    }

    /// Time spanned by the retained entries, `None` when empty.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.transitions.front()?, self.transitions.back()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    pub fn entries(&self) -> impl Iterator<Item = &PhaseTransition> {
        self.transitions.iter()
    }

    pub fn last(&self) -> Option<&PhaseTransition> {
        self.transitions.back()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    pub fn clear(&mut self) {
        self.transitions.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Operator;

    fn transition(from: Phase, to: Phase) -> PhaseTransition {
        PhaseTransition {
            from,
            to,
            event: None,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn new_log_is_empty() {
        let log = TransitionLog::default();
        assert!(log.is_empty());
        assert!(log.path().is_empty());
        assert!(log.duration().is_none());
        assert_eq!(log.capacity(), 64);
    }

    #[test]
    fn path_follows_recorded_phases() {
        let pending = Phase::OperatorPending {
            first: 5.0,
            op: Operator::Add,
        };
        let mut log = TransitionLog::default();
        log.record(transition(Phase::Idle, Phase::EnteringFirstOperand));
        log.record(transition(Phase::EnteringFirstOperand, pending));

        let path = log.path();
        assert_eq!(path.len(), 3);
        assert_eq!(path[0], &Phase::Idle);
        assert_eq!(path[1], &Phase::EnteringFirstOperand);
        assert_eq!(path[2], &pending);
    }

    #[test]
    fn oldest_entries_are_evicted_at_capacity() {
        let mut log = TransitionLog::with_capacity(2);
        log.record(transition(Phase::Idle, Phase::EnteringFirstOperand));
        log.record(transition(Phase::EnteringFirstOperand, Phase::Idle));
        log.record(transition(Phase::Idle, Phase::ErrorShown));

        assert_eq!(log.len(), 2);
        assert_eq!(log.path()[0], &Phase::EnteringFirstOperand);
        assert_eq!(log.last().map(|t| t.to), Some(Phase::ErrorShown));
    }

    #[test]
    fn zero_capacity_disables_recording() {
        let mut log = TransitionLog::with_capacity(0);
        log.record(transition(Phase::Idle, Phase::EnteringFirstOperand));
        assert!(log.is_empty());
    }

    #[test]
    fn duration_spans_first_to_last() {
        let start = Utc::now();
        let mut log = TransitionLog::default();
        log.record(PhaseTransition {
            timestamp: start,
            ..transition(Phase::Idle, Phase::EnteringFirstOperand)
        });
        log.record(PhaseTransition {
            timestamp: start + chrono::Duration::milliseconds(250),
            ..transition(Phase::EnteringFirstOperand, Phase::Idle)
        });

        assert_eq!(log.duration(), Some(Duration::from_millis(250)));
    }

    #[test]
    fn clear_empties_the_log() {
        let mut log = TransitionLog::default();
        log.record(transition(Phase::Idle, Phase::EnteringFirstOperand));
        log.clear();
        assert!(log.is_empty());
    }

    #[test]
    fn log_serializes_correctly() {
        let mut log = TransitionLog::with_capacity(4);
        log.record(PhaseTransition {
            event: Some(Event::Equals),
            ..transition(Phase::Idle, Phase::Evaluated { result: 2.0 })
        });

        let json = serde_json::to_string(&log).unwrap();
        let deserialized: TransitionLog = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.len(), 1);
        assert_eq!(deserialized.last(), log.last());
    }
}
