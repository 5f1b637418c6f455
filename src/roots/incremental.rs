//! Incremental search for a sign change.

use std::fmt;

use log::debug;

use super::{History, IterationRecord, RootFailure, RootMethod, RootOptions};
use crate::expr::RealFunction;
use crate::numeric::{is_defined, INITIAL_ERROR};

/// How an incremental search ended.
#[derive(Debug, Clone, PartialEq)]
pub enum BracketOutcome {
    /// f changes sign on `[a, b]`.
    Bracket { a: f64, b: f64 },
    /// A sampled point is an exact zero.
    ExactRoot { x: f64 },
    /// The step error fell below the tolerance before a sign change.
    StepBelowTolerance { tolerance: f64 },
    /// No sign change within the iteration budget.
    Exhausted { max_iterations: usize },
    /// The function could not be evaluated.
    Failed(RootFailure),
}

impl fmt::Display for BracketOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bracket { a, b } => write!(f, "There is a root of f(x) in [{}, {}]", a, b),
            Self::ExactRoot { x } => write!(f, "{} is a root of f(x)", x),
            Self::StepBelowTolerance { tolerance } => write!(
                f,
                "The step error fell below the tolerance = {} before a sign change was found",
                tolerance
            ),
            Self::Exhausted { max_iterations } => write!(f, "Failed in {} iterations", max_iterations),
            Self::Failed(failure) => write!(f, "{}", failure),
        }
    }
}

/// Result of an incremental search.
#[derive(Debug, Clone, PartialEq)]
pub struct BracketTrace {
    pub outcome: BracketOutcome,
    /// Left end of the last interval examined.
    pub a: f64,
    /// Right end of the last interval examined.
    pub b: f64,
    /// Number of steps taken.
    pub iterations: usize,
    /// Left end of every interval examined.
    pub history: Vec<IterationRecord>,
    pub tolerance: f64,
}

impl BracketTrace {
    pub fn message(&self) -> String {
        self.outcome.to_string()
    }

    /// The sign-change interval, if one was found.
    pub fn bracket(&self) -> Option<(f64, f64)> {
        match self.outcome {
            BracketOutcome::Bracket { a, b } => Some((a, b)),
            _ => None,
        }
    }
}

/// Step from `x0` by `h` until `f` changes sign between neighbours.
///
/// Each record holds the left end of the interval being examined and the
/// step error to its right end.
pub fn incremental_search<F>(f: &F, x0: f64, h: f64, options: &RootOptions) -> BracketTrace
where
    F: RealFunction + ?Sized,
{
    let tolerance = options.tolerance();
    let mut history = History::new(RootMethod::IncrementalSearch, tolerance);

    let finish = |history: History, outcome: BracketOutcome, a: f64, b: f64, iterations: usize| {
        debug!("incremental search: {}", outcome);
        BracketTrace {
            outcome,
            a,
            b,
            iterations,
            history: history.into_records(),
            tolerance,
        }
    };

    let mut a = x0;
    let mut fa = f.evaluate(a);
    if !is_defined(fa) {
        let failure = BracketOutcome::Failed(RootFailure::Undefined { x: a });
        return finish(history, failure, a, a, 0);
    }
    history.push(IterationRecord::new(0, a, fa, INITIAL_ERROR));
    if fa == 0.0 {
        return finish(history, BracketOutcome::ExactRoot { x: a }, a, a, 0);
    }

    let mut b = a + h;
    let mut fb = f.evaluate(b);
    if !is_defined(fb) {
        let failure = BracketOutcome::Failed(RootFailure::Undefined { x: b });
        return finish(history, failure, a, b, 0);
    }

    let mut error = INITIAL_ERROR;
    let mut iteration = 0;

    loop {
        if fb == 0.0 {
            return finish(history, BracketOutcome::ExactRoot { x: b }, a, b, iteration);
        }
        if fa.signum() != fb.signum() {
            return finish(history, BracketOutcome::Bracket { a, b }, a, b, iteration);
        }
        if error < tolerance {
            let outcome = BracketOutcome::StepBelowTolerance { tolerance };
            return finish(history, outcome, a, b, iteration);
        }
        if iteration >= options.max_iterations {
            let outcome = BracketOutcome::Exhausted {
                max_iterations: options.max_iterations,
            };
            return finish(history, outcome, a, b, iteration);
        }

        iteration += 1;
        a = b;
        fa = fb;
        b = a + h;
        fb = f.evaluate(b);
        if !is_defined(fb) {
            let failure = BracketOutcome::Failed(RootFailure::Undefined { x: b });
            return finish(history, failure, a, b, iteration);
        }

        error = match options.error_type.step_error(b, a) {
            Some(error) => error,
            None => {
                let failure = BracketOutcome::Failed(RootFailure::RelativeErrorUndefined);
                return finish(history, failure, a, b, iteration);
            }
        };
        history.push(IterationRecord::new(iteration, a, fa, error));
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::expr::parse;

    #[test]
    fn test_finds_bracket() {
        let f = parse("x^2 - 2").unwrap();
        let trace = incremental_search(&f, 0.0, 0.5, &RootOptions::default());
        let (a, b) = trace.bracket().unwrap();
        assert_relative_eq!(a, 1.0);
        assert_relative_eq!(b, 1.5);
        assert_eq!(trace.message(), "There is a root of f(x) in [1, 1.5]");
        assert_eq!(trace.iterations, 2);
        assert_eq!(trace.history.len(), 3);
    }

    #[test]
    fn test_immediate_bracket() {
        let f = |x: f64| x - 0.25;
        let trace = incremental_search(&f, 0.0, 0.5, &RootOptions::default());
        assert_eq!(trace.bracket(), Some((0.0, 0.5)));
        assert_eq!(trace.iterations, 0);
        assert_eq!(trace.history.len(), 1);
    }

    #[test]
    fn test_sampled_exact_root() {
        let f = |x: f64| x - 1.0;
        let trace = incremental_search(&f, 0.0, 0.5, &RootOptions::default());
        assert_eq!(trace.outcome, BracketOutcome::ExactRoot { x: 1.0 });
    }

    #[test]
    fn test_exhausted_without_sign_change() {
        let f = |x: f64| x * x + 1.0;
        let options = RootOptions::new().with_max_iterations(10);
        let trace = incremental_search(&f, 0.0, 1.0, &options);
        assert_eq!(trace.outcome, BracketOutcome::Exhausted { max_iterations: 10 });
        assert_eq!(trace.iterations, 10);
        assert_eq!(trace.message(), "Failed in 10 iterations");
    }

    #[test]
    fn test_tiny_step_stops_on_tolerance() {
        let f = |x: f64| x * x + 1.0;
        let trace = incremental_search(&f, 0.0, 1e-9, &RootOptions::default());
        assert!(matches!(trace.outcome, BracketOutcome::StepBelowTolerance { .. }));
        assert_eq!(trace.iterations, 1);
    }

    #[test]
    fn test_undefined_sample() {
        let f = parse("sqrt(x) + 1").unwrap();
        let trace = incremental_search(&f, 1.0, -1.0, &RootOptions::default());
        assert!(matches!(
            trace.outcome,
            BracketOutcome::Failed(RootFailure::Undefined { x }) if x == -1.0
        ));
        assert_eq!(trace.history.len(), 1);
    }

    #[test]
    fn test_tiny_sign_change_is_bracketed() {
        let f = |x: f64| if x < 0.75 { 1e-200 } else { -1e-200 };
        let trace = incremental_search(&f, 0.0, 0.5, &RootOptions::default());
        assert_eq!(trace.bracket(), Some((0.5, 1.0)));
    }
}
