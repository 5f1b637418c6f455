//! Root finding for real functions of one variable.
//!
//! Every method shares the same protocol:
//!
//! - the tolerance is `0.5×10^−digits` (see [`RootOptions`]);
//! - the first [`IterationRecord`] carries the sentinel error `100.0`;
//! - records are indexed from 0 in iteration order;
//! - every function or derivative value is checked for NaN/Inf before it is
//!   used, and a non-finite value stops the run with the records gathered
//!   so far;
//! - the run ends in one of four [`RootOutcome`] classes and never returns
//!   an error.
//!
//! | Method | Kind | Entry point |
//! |--------|------|-------------|
//! | Bisection | bracketing | [`bisection`] |
//! | False position | bracketing | [`false_position`] |
//! | Fixed point | open | [`fixed_point`] |
//! | Newton-Raphson | open, f' | [`newton_raphson`] |
//! | Secant | open, two guesses | [`secant`] |
//! | Multiple roots | open, f' and f'' | [`multiple_roots`] |
//! | Incremental search | bracket finder | [`incremental_search`] |

mod bisection;
mod false_position;
mod fixed_point;
mod incremental;
mod multiple_roots;
mod newton;
mod secant;

pub use bisection::bisection;
pub use false_position::false_position;
pub use fixed_point::fixed_point;
pub use incremental::{incremental_search, BracketOutcome, BracketTrace};
pub use multiple_roots::multiple_roots;
pub use newton::newton_raphson;
pub use secant::secant;

use std::fmt;

use log::{debug, trace, warn};
use serde::Serialize;
use thiserror::Error;

use crate::numeric::{tolerance_from_digits, ErrorType};
use crate::{DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE_DIGITS};

/// Options shared by all root-finding methods.
#[derive(Debug, Clone, PartialEq)]
pub struct RootOptions {
    /// Absolute or relative step error.
    pub error_type: ErrorType,
    /// Number of correct decimal digits requested.
    pub tolerance_digits: f64,
    /// Iteration budget.
    pub max_iterations: usize,
}

impl Default for RootOptions {
    fn default() -> Self {
        Self {
            error_type: ErrorType::Absolute,
            tolerance_digits: DEFAULT_TOLERANCE_DIGITS,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl RootOptions {
    /// Create options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the error measure.
    pub fn with_error_type(mut self, error_type: ErrorType) -> Self {
        self.error_type = error_type;
        self
    }

    /// Set the number of correct decimal digits.
    pub fn with_tolerance_digits(mut self, digits: f64) -> Self {
        self.tolerance_digits = digits;
        self
    }

    /// Set the iteration budget.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Numeric tolerance, `0.5×10^−digits`.
    pub fn tolerance(&self) -> f64 {
        tolerance_from_digits(self.tolerance_digits)
    }
}

/// Which method produced a trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RootMethod {
    Bisection,
    FalsePosition,
    FixedPoint,
    NewtonRaphson,
    Secant,
    MultipleRoots,
    IncrementalSearch,
}

impl fmt::Display for RootMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Bisection => "bisection",
            Self::FalsePosition => "false position",
            Self::FixedPoint => "fixed point",
            Self::NewtonRaphson => "Newton-Raphson",
            Self::Secant => "secant",
            Self::MultipleRoots => "multiple roots",
            Self::IncrementalSearch => "incremental search",
        };
        write!(f, "{}", name)
    }
}

/// One step of an iterative method.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IterationRecord {
    /// Step index, starting at 0.
    pub iteration: usize,
    /// Approximation at this step.
    pub x: f64,
    /// f(x)
    pub fx: f64,
    /// f'(x), for methods that use it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub derivative: Option<f64>,
    /// f''(x), for methods that use it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub second_derivative: Option<f64>,
    /// Error estimate against the previous step.
    pub error: f64,
}

impl IterationRecord {
    /// Record without derivative values.
    pub fn new(iteration: usize, x: f64, fx: f64, error: f64) -> Self {
        Self {
            iteration,
            x,
            fx,
            derivative: None,
            second_derivative: None,
            error,
        }
    }

    /// Attach f'(x).
    pub fn with_derivative(mut self, derivative: f64) -> Self {
        self.derivative = Some(derivative);
        self
    }

    /// Attach f''(x).
    pub fn with_second_derivative(mut self, second_derivative: f64) -> Self {
        self.second_derivative = Some(second_derivative);
        self
    }
}

/// Reasons a method cannot proceed.
///
/// The `Display` text is the message shown to the user.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RootFailure {
    /// f(a) and f(b) have the same sign
    #[error("The interval is inadequate")]
    InadequateInterval,

    /// f evaluated to NaN or an infinity
    #[error("The function is not defined at x = {x}. The method fails.")]
    Undefined { x: f64 },

    /// One of the two secant starting values is undefined
    #[error("The function is not defined at x0 = {x0} or x1 = {x1}. The method fails.")]
    UndefinedStart { x0: f64, x1: f64 },

    /// f or f' is undefined
    #[error("The function is not defined or differentiable at x = {x}. The method fails.")]
    NotDifferentiable { x: f64 },

    /// f, f' or f'' is undefined
    #[error("The function or its derivatives are not defined at x = {x}. The method fails.")]
    DerivativesUndefined { x: f64 },

    /// An update formula would divide by exactly zero
    #[error("The method fails. The denominator is zero.")]
    ZeroDenominator,

    /// Relative error of a step that lands exactly on zero
    #[error("The relative error is undefined at x = 0. The method fails.")]
    RelativeErrorUndefined,
}

/// How a root-finding run ended.
#[derive(Debug, Clone, PartialEq)]
pub enum RootOutcome {
    /// f(x) is exactly zero.
    ExactRoot { x: f64 },
    /// The last step error is below the tolerance.
    Converged { x: f64, tolerance: f64 },
    /// The loop stopped without meeting the tolerance.
    Exhausted { max_iterations: usize },
    /// The method could not be applied.
    Failed(RootFailure),
}

impl RootOutcome {
    /// Classify the final state of a loop.
    ///
    /// An exact zero wins over convergence, which wins over exhaustion.
    pub fn classify(x: f64, fx: f64, last_error: f64, tolerance: f64, max_iterations: usize) -> Self {
        if fx == 0.0 {
            Self::ExactRoot { x }
        } else if last_error < tolerance {
            Self::Converged { x, tolerance }
        } else {
            Self::Exhausted { max_iterations }
        }
    }

    /// The root approximation, for successful runs.
    pub fn root(&self) -> Option<f64> {
        match self {
            Self::ExactRoot { x } | Self::Converged { x, .. } => Some(*x),
            _ => None,
        }
    }

    /// Whether the run produced a root approximation.
    pub fn is_success(&self) -> bool {
        self.root().is_some()
    }
}

impl fmt::Display for RootOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExactRoot { x } => write!(f, "{} is a root of f(x)", x),
            Self::Converged { x, tolerance } => write!(
                f,
                "The approximate solution is: {}, with a tolerance = {}",
                x, tolerance
            ),
            Self::Exhausted { max_iterations } => write!(f, "Failed in {} iterations", max_iterations),
            Self::Failed(failure) => write!(f, "{}", failure),
        }
    }
}

/// Complete result of a root-finding run.
#[derive(Debug, Clone, PartialEq)]
pub struct RootTrace {
    /// Method that produced the trace.
    pub method: RootMethod,
    /// Classification of the run.
    pub outcome: RootOutcome,
    /// One record per step, in order.
    pub history: Vec<IterationRecord>,
    /// Numeric tolerance the run was measured against.
    pub tolerance: f64,
}

impl RootTrace {
    /// Human-readable outcome.
    pub fn message(&self) -> String {
        self.outcome.to_string()
    }

    /// Root approximation, if the run succeeded.
    pub fn root(&self) -> Option<f64> {
        self.outcome.root()
    }

    /// Index of the last record (0 when nothing was recorded).
    pub fn iterations(&self) -> usize {
        self.history.last().map(|r| r.iteration).unwrap_or(0)
    }

    /// Error of the last record.
    pub fn last_error(&self) -> Option<f64> {
        self.history.last().map(|r| r.error)
    }

    /// Approximations, in order.
    pub fn x_values(&self) -> Vec<f64> {
        self.history.iter().map(|r| r.x).collect()
    }

    /// Function values, in order.
    pub fn function_values(&self) -> Vec<f64> {
        self.history.iter().map(|r| r.fx).collect()
    }

    /// Error estimates, in order.
    pub fn errors(&self) -> Vec<f64> {
        self.history.iter().map(|r| r.error).collect()
    }

    /// First derivatives, if the method recorded them.
    pub fn derivatives(&self) -> Option<Vec<f64>> {
        self.history.iter().map(|r| r.derivative).collect()
    }

    /// Second derivatives, if the method recorded them.
    pub fn second_derivatives(&self) -> Option<Vec<f64>> {
        self.history.iter().map(|r| r.second_derivative).collect()
    }
}

/// Append-only record list that logs each step.
#[derive(Debug)]
pub(crate) struct History {
    method: RootMethod,
    tolerance: f64,
    records: Vec<IterationRecord>,
}

impl History {
    pub(crate) fn new(method: RootMethod, tolerance: f64) -> Self {
        Self {
            method,
            tolerance,
            records: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, record: IterationRecord) {
        trace!(
            "{}: iteration {} x = {} f(x) = {} error = {}",
            self.method,
            record.iteration,
            record.x,
            record.fx,
            record.error
        );
        self.records.push(record);
    }

    pub(crate) fn finish(self, outcome: RootOutcome) -> RootTrace {
        match &outcome {
            RootOutcome::Failed(failure) => warn!("{}: {}", self.method, failure),
            other => debug!("{}: {} after {} records", self.method, other, self.records.len()),
        }
        RootTrace {
            method: self.method,
            outcome,
            history: self.records,
            tolerance: self.tolerance,
        }
    }

    pub(crate) fn into_records(self) -> Vec<IterationRecord> {
        self.records
    }

    pub(crate) fn fail(self, failure: RootFailure) -> RootTrace {
        self.finish(RootOutcome::Failed(failure))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_builder() {
        let options = RootOptions::new()
            .with_error_type(ErrorType::Relative)
            .with_tolerance_digits(6.0)
            .with_max_iterations(20);
        assert_eq!(options.error_type, ErrorType::Relative);
        assert_eq!(options.max_iterations, 20);
        assert!((options.tolerance() - 5e-7).abs() < 1e-20);
    }

    #[test]
    fn test_classify_priority() {
        assert_eq!(
            RootOutcome::classify(1.0, 0.0, 1.0, 0.1, 10),
            RootOutcome::ExactRoot { x: 1.0 }
        );
        assert_eq!(
            RootOutcome::classify(1.0, 0.5, 0.01, 0.1, 10),
            RootOutcome::Converged { x: 1.0, tolerance: 0.1 }
        );
        assert_eq!(
            RootOutcome::classify(1.0, 0.5, 0.1, 0.1, 10),
            RootOutcome::Exhausted { max_iterations: 10 }
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(RootOutcome::ExactRoot { x: 2.0 }.to_string(), "2 is a root of f(x)");
        assert_eq!(
            RootOutcome::Exhausted { max_iterations: 50 }.to_string(),
            "Failed in 50 iterations"
        );
        assert_eq!(
            RootOutcome::Failed(RootFailure::InadequateInterval).to_string(),
            "The interval is inadequate"
        );
    }

    #[test]
    fn test_derivative_columns_only_when_recorded() {
        let mut history = History::new(RootMethod::NewtonRaphson, 0.5);
        history.push(IterationRecord::new(0, 1.0, 2.0, 100.0).with_derivative(3.0));
        let trace = history.finish(RootOutcome::Exhausted { max_iterations: 0 });
        assert_eq!(trace.derivatives(), Some(vec![3.0]));
        assert_eq!(trace.second_derivatives(), None);
    }
}
