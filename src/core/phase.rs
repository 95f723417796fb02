//! Explicit phases of an in-progress calculation.
//!
//! A calculator keypad is usually modelled with a handful of flags
//! (`waiting for operand`, `just evaluated`, a pending operator, a first
//! operand). Folding them into one enum makes contradictory combinations
//! unrepresentable: an operator cannot be pending without a first operand,
//! and a result cannot be both freshly evaluated and awaiting input.

use super::event::Operator;
use serde::{Deserialize, Serialize};

/// Where the calculator is in the two-operand cycle.
///
/// # Example
///
/// ```rust
/// use tally::core::{Operator, Phase};
///
/// let pending = Phase::OperatorPending { first: 5.0, op: Operator::Add };
/// assert_eq!(pending.name(), "OperatorPending");
/// assert!(pending.waiting_for_second_operand());
/// assert_eq!(pending.first_operand(), Some(5.0));
/// ```
#[derive(Clone, Copy, PartialEq, Debug, Default, Serialize, Deserialize)]
pub enum Phase {
    /// Canonical reset form: display `"0"`, nothing pending.
    #[default]
    Idle,
    /// The display holds the first operand being typed.
    EnteringFirstOperand,
    /// An operator was chosen; no digit of the second operand yet.
    OperatorPending { first: f64, op: Operator },
    /// The display holds the second operand being typed.
    EnteringSecondOperand { first: f64, op: Operator },
    /// `=` produced `result`, which is also on the display.
    Evaluated { result: f64 },
    /// A division by zero is being shown until the next reset.
    ErrorShown,
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::EnteringFirstOperand => "EnteringFirstOperand",
            Self::OperatorPending { .. } => "OperatorPending",
            Self::EnteringSecondOperand { .. } => "EnteringSecondOperand",
            Self::Evaluated { .. } => "Evaluated",
            Self::ErrorShown => "ErrorShown",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::ErrorShown)
    }

    /// Left-hand operand of the pending or most recent operation.
    pub fn first_operand(&self) -> Option<f64> {
        match *self {
            Self::OperatorPending { first, .. } | Self::EnteringSecondOperand { first, .. } => {
                Some(first)
            }
            Self::Evaluated { result } => Some(result),
            _ => None,
        }
    }

    /// Operator awaiting its second operand.
    pub fn operator(&self) -> Option<Operator> {
        match *self {
            Self::OperatorPending { op, .. } | Self::EnteringSecondOperand { op, .. } => Some(op),
            _ => None,
        }
    }

    pub fn waiting_for_second_operand(&self) -> bool {
        matches!(self, Self::OperatorPending { .. })
    }

    pub fn just_evaluated(&self) -> bool {
        matches!(self, Self::Evaluated { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_phases() -> Vec<Phase> {
        vec![
            Phase::Idle,
            Phase::EnteringFirstOperand,
            Phase::OperatorPending {
                first: 1.0,
                op: Operator::Add,
            },
            Phase::EnteringSecondOperand {
                first: 1.0,
                op: Operator::Divide,
            },
            Phase::Evaluated { result: 3.0 },
            Phase::ErrorShown,
        ]
    }

    #[test]
    fn default_is_idle() {
        assert_eq!(Phase::default(), Phase::Idle);
    }

    #[test]
    fn flags_are_never_both_set() {
        for phase in all_phases() {
            assert!(
                !(phase.waiting_for_second_operand() && phase.just_evaluated()),
                "{} sets both flags",
                phase.name()
            );
        }
    }

    #[test]
    fn operator_implies_first_operand() {
        for phase in all_phases() {
            if phase.operator().is_some() {
                assert!(phase.first_operand().is_some(), "{}", phase.name());
            }
        }
    }

    #[test]
    fn only_error_shown_is_error() {
        let errors: Vec<_> = all_phases().into_iter().filter(Phase::is_error).collect();
        assert_eq!(errors, vec![Phase::ErrorShown]);
    }

    #[test]
    fn evaluated_keeps_result_as_first_operand() {
        let phase = Phase::Evaluated { result: 8.0 };
        assert_eq!(phase.first_operand(), Some(8.0));
        assert_eq!(phase.operator(), None);
        assert!(phase.just_evaluated());
    }

    #[test]
    fn phase_serializes_correctly() {
        let phase = Phase::EnteringSecondOperand {
            first: 2.5,
            op: Operator::Multiply,
        };
        let json = serde_json::to_string(&phase).unwrap();
        let deserialized: Phase = serde_json::from_str(&json).unwrap();
        assert_eq!(phase, deserialized);
    }
}
