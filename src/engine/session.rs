//! Effectful shell around [`Calculator`]: the timed error reset.

use super::calculator::{Calculator, Output, Step};
use crate::config::{CalculatorConfig, ResetPolicy};
use crate::core::Event;
use std::collections::VecDeque;
use std::time::Duration;
use tokio::time::Instant;

/// A calculator plus the deferred reset that follows a division by zero.
///
/// `Session` never spawns tasks. Armed resets are absolute deadlines and
/// [`tick`](Session::tick) waits for the earliest one, so the host drives
/// everything from a single `select!` loop:
///
/// ```rust,no_run
/// # async fn host(mut keys: tokio::sync::mpsc::Receiver<tally::core::Event>) {
/// use tally::engine::Session;
///
/// let mut session = Session::new();
/// loop {
///     tokio::select! {
///         Some(event) = keys.recv() => { session.dispatch(event); }
///         output = session.tick() => println!("{}", output.display),
///     }
/// }
/// # }
/// ```
#[derive(Debug)]
pub struct Session {
    calculator: Calculator,
    reset_delay: Duration,
    policy: ResetPolicy,
    deadlines: VecDeque<Instant>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self::with_config(&CalculatorConfig::default())
    }

    pub fn with_config(config: &CalculatorConfig) -> Self {
        Self {
            calculator: Calculator::with_config(config),
            reset_delay: config.reset_delay(),
            policy: config.reset_policy,
            deadlines: VecDeque::new(),
        }
    }

    pub fn calculator(&self) -> &Calculator {
        &self.calculator
    }

    pub fn output(&self) -> Output {
        self.calculator.output()
    }

    /// Whether an error reset is armed.
    pub fn reset_pending(&self) -> bool {
        !self.deadlines.is_empty()
    }

    /// When the next armed reset fires.
    pub fn next_reset(&self) -> Option<Instant> {
        self.deadlines.front().copied()
    }

    /// Forward an event to the calculator, arming a reset on failure.
    pub fn dispatch(&mut self, event: Event) -> Step {
        if self.policy == ResetPolicy::CancelOnInput && !self.deadlines.is_empty() {
            self.deadlines.clear();
            tracing::debug!(?event, "pending error reset cancelled by input");
        }

        let step = self.calculator.dispatch(event);
        if let Step::Failed(err) = step {
            self.deadlines.push_back(Instant::now() + self.reset_delay);
            tracing::info!(
                error = %err,
                delay_ms = self.reset_delay.as_millis() as u64,
                "error reset scheduled"
            );
        }
        step
    }

    /// Wait for the next armed reset, apply it and return the new output.
    ///
    /// Pends forever while nothing is armed. Cancel safe: dropping the
    /// future before the deadline leaves the session untouched.
    pub async fn tick(&mut self) -> Output {
        let Some(&deadline) = self.deadlines.front() else {
            return std::future::pending().await;
        };
        tokio::time::sleep_until(deadline).await;
        self.deadlines.pop_front();

        match self.policy {
            ResetPolicy::CancelOnInput => {
                self.calculator.expire_error();
            }
            ResetPolicy::AlwaysFire => self.calculator.reset(),
        }
        tracing::info!(policy = ?self.policy, "error reset fired");
        self.calculator.output()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Operator, Phase};
    use tokio::time::timeout;

    fn divide_by_zero(session: &mut Session) -> Step {
        session.dispatch(Event::digit('5').unwrap());
        session.dispatch(Event::Operator(Operator::Divide));
        session.dispatch(Event::digit('0').unwrap());
        session.dispatch(Event::Equals)
    }

    #[tokio::test(start_paused = true)]
    async fn error_resets_after_delay() {
        let mut session = Session::new();
        assert!(matches!(divide_by_zero(&mut session), Step::Failed(_)));
        assert_eq!(session.output().display, "Error");
        assert_eq!(session.output().history, "Cannot divide by 0");
        assert!(session.reset_pending());

        let start = Instant::now();
        let output = session.tick().await;

        assert!(start.elapsed() >= Duration::from_millis(900));
        assert_eq!(output.display, "0");
        assert_eq!(output.history, "");
        assert_eq!(session.calculator().phase(), Phase::Idle);
        assert!(!session.reset_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn error_is_still_shown_before_delay() {
        let mut session = Session::new();
        divide_by_zero(&mut session);

        let early = timeout(Duration::from_millis(899), session.tick()).await;
        assert!(early.is_err());
        assert_eq!(session.output().display, "Error");
        assert!(session.reset_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn input_cancels_pending_reset() {
        let mut session = Session::new();
        divide_by_zero(&mut session);
        session.dispatch(Event::digit('7').unwrap());

        assert!(!session.reset_pending());
        let fired = timeout(Duration::from_secs(5), session.tick()).await;
        assert!(fired.is_err());
        assert_eq!(session.output().display, "7");
    }

    #[tokio::test(start_paused = true)]
    async fn always_fire_resets_stale_state() {
        let config = CalculatorConfig::builder()
            .reset_policy(ResetPolicy::AlwaysFire)
            .build()
            .unwrap();
        let mut session = Session::with_config(&config);
        divide_by_zero(&mut session);
        session.dispatch(Event::digit('7').unwrap());
        assert!(session.reset_pending());

        let output = session.tick().await;
        assert_eq!(output.display, "0");
    }

    #[tokio::test(start_paused = true)]
    async fn custom_delay_is_honoured() {
        let config = CalculatorConfig::builder()
            .reset_delay(Duration::from_millis(250))
            .build()
            .unwrap();
        let mut session = Session::with_config(&config);
        divide_by_zero(&mut session);

        let output = timeout(Duration::from_millis(251), session.tick())
            .await
            .unwrap();
        assert_eq!(output.display, "0");
    }

    #[tokio::test(start_paused = true)]
    async fn tick_without_error_never_completes() {
        let mut session = Session::new();
        session.dispatch(Event::digit('3').unwrap());
        assert!(session.next_reset().is_none());

        let fired = timeout(Duration::from_secs(60), session.tick()).await;
        assert!(fired.is_err());
        assert_eq!(session.output().display, "3");
    }
}
