//! The calculator state machine.

use crate::config::CalculatorConfig;
use crate::core::{
    compute, parse_display, CalcError, Digit, Event, Formatter, Operator, Phase, PhaseTransition,
    TransitionLog, ERROR_DISPLAY,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

const ZERO: &str = "0";

/// Outcome of dispatching one event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// The event changed the calculator.
    Applied,

    /// The event had no effect in the current phase.
    Ignored,

    /// The event hit a division by zero; the error is on display and a
    /// reset is due.
    Failed(CalcError),
}

/// The two strings a presentation layer renders.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Output {
    pub display: String,
    pub history: String,
}

/// Two-operand calculator driven one event at a time.
///
/// # Example
///
/// ```rust
/// use tally::core::{Event, Operator};
/// use tally::engine::Calculator;
///
/// let mut calc = Calculator::new();
/// for event in [
///     Event::digit('5').unwrap(),
///     Event::Operator(Operator::Add),
///     Event::digit('3').unwrap(),
///     Event::Equals,
/// ] {
///     calc.dispatch(event);
/// }
/// assert_eq!(calc.display(), "8");
/// assert_eq!(calc.history_text(), "5 + 3 =");
/// ```
#[derive(Clone, Debug)]
pub struct Calculator {
    display: String,
    history: String,
    phase: Phase,
    formatter: Formatter,
    log: TransitionLog,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

impl Calculator {
    /// Calculator in canonical reset form with the default display profile.
    pub fn new() -> Self {
        Self::with_parts(Formatter::default(), TransitionLog::default())
    }

    pub fn with_config(config: &CalculatorConfig) -> Self {
        Self::with_parts(
            config.formatter(),
            TransitionLog::with_capacity(config.log_capacity),
        )
    }

    fn with_parts(formatter: Formatter, log: TransitionLog) -> Self {
        Self {
            display: ZERO.to_string(),
            history: String::new(),
            phase: Phase::Idle,
            formatter,
            log,
        }
    }

    /// Current display text.
    pub fn display(&self) -> &str {
        &self.display
    }

    /// History text, empty when nothing applies.
    pub fn history_text(&self) -> &str {
        &self.history
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn log(&self) -> &TransitionLog {
        &self.log
    }

    pub fn output(&self) -> Output {
        Output {
            display: self.display.clone(),
            history: self.history.clone(),
        }
    }

    /// Apply one input event.
    ///
    /// An event arriving while an error is shown first returns the
    /// calculator to canonical form and is then applied normally.
    pub fn dispatch(&mut self, event: Event) -> Step {
        let from = self.phase;
        if from.is_error() {
            self.reset_state();
        }

        let step = match event {
            Event::Digit(digit) => self.input_digit(digit),
            Event::Decimal => self.input_decimal(),
            Event::Percent => self.input_percent(),
            Event::Delete => self.delete_last(),
            Event::Operator(op) => self.choose_operator(op),
            Event::Equals => self.evaluate(),
            Event::Clear => {
                self.reset_state();
                Step::Applied
            }
        };
        // Leaving the error display is itself a change
        let step = if from.is_error() && step == Step::Ignored {
            Step::Applied
        } else {
            step
        };

        if step == Step::Ignored {
            tracing::trace!(?event, phase = from.name(), "event ignored");
        } else {
            tracing::debug!(
                ?event,
                from = from.name(),
                to = self.phase.name(),
                display = %self.display,
                "event applied"
            );
        }
        self.record(from, Some(event));
        step
    }

    /// Clear the error display, as the deferred reset does.
    ///
    /// Returns `false` and leaves the calculator untouched unless an error
    /// is currently shown.
    pub fn expire_error(&mut self) -> bool {
        if !self.phase.is_error() {
            return false;
        }
        self.reset();
        true
    }

    /// Return to canonical reset form regardless of phase.
    pub fn reset(&mut self) {
        let from = self.phase;
        self.reset_state();
        tracing::debug!(from = from.name(), "calculator reset");
        self.record(from, None);
    }

    fn reset_state(&mut self) {
        self.display = ZERO.to_string();
        self.history.clear();
        self.phase = Phase::Idle;
    }

    fn record(&mut self, from: Phase, event: Option<Event>) {
        if from != self.phase {
            self.log.record(PhaseTransition {
                from,
                to: self.phase,
                event,
                timestamp: Utc::now(),
            });
        }
    }

    fn input_digit(&mut self, digit: Digit) -> Step {
        let c = digit.as_char();
        match self.phase {
            Phase::OperatorPending { first, op } => {
                self.display = c.to_string();
                self.phase = Phase::EnteringSecondOperand { first, op };
            }
            Phase::Idle | Phase::Evaluated { .. } | Phase::ErrorShown => {
                self.display = c.to_string();
                self.phase = Phase::EnteringFirstOperand;
            }
            Phase::EnteringFirstOperand | Phase::EnteringSecondOperand { .. } => {
                if self.display == ZERO {
                    self.display = c.to_string();
                } else {
                    self.display.push(c);
                }
            }
        }
        Step::Applied
    }

    fn input_decimal(&mut self) -> Step {
        match self.phase {
            Phase::OperatorPending { first, op } => {
                self.display = "0.".to_string();
                self.phase = Phase::EnteringSecondOperand { first, op };
            }
            Phase::Idle | Phase::Evaluated { .. } | Phase::ErrorShown => {
                self.display = "0.".to_string();
                self.phase = Phase::EnteringFirstOperand;
            }
            Phase::EnteringFirstOperand | Phase::EnteringSecondOperand { .. } => {
                if self.display.contains('.') {
                    return Step::Ignored;
                }
                self.display.push('.');
            }
        }
        Step::Applied
    }

    fn input_percent(&mut self) -> Step {
        let scaled = match &mut self.phase {
            Phase::Evaluated { result } => {
                *result /= 100.0;
                *result
            }
            _ => match parse_display(&self.display) {
                Some(value) => value / 100.0,
                None => return Step::Ignored,
            },
        };
        self.display = self.formatter.format(scaled);
        Step::Applied
    }

    fn delete_last(&mut self) -> Step {
        if matches!(
            self.phase,
            Phase::OperatorPending { .. } | Phase::Evaluated { .. }
        ) || self.display == ZERO
        {
            return Step::Ignored;
        }

        let len = self.display.chars().count();
        if len <= 1 || (len == 2 && self.display.starts_with('-')) {
            self.display = ZERO.to_string();
        } else {
            self.display.pop();
        }
        Step::Applied
    }

    fn choose_operator(&mut self, op: Operator) -> Step {
        match self.phase {
            // Operator substitution: no second operand typed yet
            Phase::OperatorPending { first, .. } => self.await_second_operand(first, op),
            Phase::EnteringSecondOperand { first, op: pending } => {
                let Some(input) = parse_display(&self.display) else {
                    return Step::Ignored;
                };
                match compute(first, input, pending) {
                    Ok(result) => {
                        self.display = self.formatter.format(result);
                        self.await_second_operand(result, op)
                    }
                    Err(err) => self.fail(err),
                }
            }
            Phase::Evaluated { result } => self.await_second_operand(result, op),
            Phase::Idle | Phase::EnteringFirstOperand | Phase::ErrorShown => {
                match parse_display(&self.display) {
                    Some(input) => self.await_second_operand(input, op),
                    None => Step::Ignored,
                }
            }
        }
    }

    fn await_second_operand(&mut self, first: f64, op: Operator) -> Step {
        self.phase = Phase::OperatorPending { first, op };
        self.history = format!("{} {}", self.formatter.format(first), op.symbol());
        Step::Applied
    }

    fn evaluate(&mut self) -> Step {
        // `=` right after an operator would apply the first operand twice
        let Phase::EnteringSecondOperand { first, op } = self.phase else {
            return Step::Ignored;
        };
        let Some(input) = parse_display(&self.display) else {
            return Step::Ignored;
        };

        match compute(first, input, op) {
            Ok(result) => {
                self.history = format!(
                    "{} {} {} =",
                    self.formatter.format(first),
                    op.symbol(),
                    self.formatter.format(input)
                );
                self.display = self.formatter.format(result);
                self.phase = Phase::Evaluated { result };
                Step::Applied
            }
            Err(err) => self.fail(err),
        }
    }

    fn fail(&mut self, err: CalcError) -> Step {
        tracing::warn!(error = %err, display = %self.display, "arithmetic failed");
        self.history = err.to_string();
        self.display = ERROR_DISPLAY.to_string();
        self.phase = Phase::ErrorShown;
        Step::Failed(err)
    }
}
