//! Secant method.

use super::{History, IterationRecord, RootFailure, RootMethod, RootOptions, RootOutcome, RootTrace};
use crate::expr::RealFunction;
use crate::numeric::{is_defined, INITIAL_ERROR};

/// Secant iteration from two starting values.
///
/// Both starting values are recorded, as iterations 0 and 1, so an
/// exhausted run ends on record `max_iterations`. Since `x1` is always
/// recorded, a budget below 1 is raised to 1. A zero difference
/// `f(x1) − f(x0)` ends the loop without a failure.
pub fn secant<F>(f: &F, x0: f64, x1: f64, options: &RootOptions) -> RootTrace
where
    F: RealFunction + ?Sized,
{
    let tolerance = options.tolerance();
    let max_iterations = options.max_iterations.max(1);
    let mut history = History::new(RootMethod::Secant, tolerance);

    let (mut x_prev, mut x) = (x0, x1);
    let (mut f_prev, mut fx) = (f.evaluate(x_prev), f.evaluate(x));
    if !is_defined(f_prev) || !is_defined(fx) {
        return history.fail(RootFailure::UndefinedStart { x0, x1 });
    }

    history.push(IterationRecord::new(0, x_prev, f_prev, INITIAL_ERROR));
    let mut error = match options.error_type.step_error(x, x_prev) {
        Some(error) => error,
        None => return history.fail(RootFailure::RelativeErrorUndefined),
    };
    history.push(IterationRecord::new(1, x, fx, error));

    if f_prev == 0.0 {
        return history.finish(RootOutcome::ExactRoot { x: x_prev });
    }

    let mut iteration = 1;

    while error >= tolerance && fx != 0.0 && fx != f_prev && iteration < max_iterations {
        iteration += 1;

        let next = x - fx * (x - x_prev) / (fx - f_prev);
        x_prev = x;
        f_prev = fx;
        x = next;
        fx = f.evaluate(x);
        if !is_defined(fx) {
            return history.fail(RootFailure::Undefined { x });
        }

        error = match options.error_type.step_error(x, x_prev) {
            Some(error) => error,
            None => return history.fail(RootFailure::RelativeErrorUndefined),
        };
        history.push(IterationRecord::new(iteration, x, fx, error));
    }

    history.finish(RootOutcome::classify(x, fx, error, tolerance, max_iterations))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::expr::parse;

    #[test]
    fn test_cubic_root() {
        let f = parse("x^3 - x - 2").unwrap();
        let trace = secant(&f, 1.0, 2.0, &RootOptions::new().with_tolerance_digits(6.0));
        assert!(trace.outcome.is_success());
        assert_relative_eq!(trace.root().unwrap(), 1.5213797, epsilon = 1e-6);
    }

    #[test]
    fn test_starting_values_recorded() {
        let f = |x: f64| x * x - 2.0;
        let trace = secant(&f, 1.0, 2.0, &RootOptions::default());
        assert_eq!(trace.history[0].x, 1.0);
        assert_eq!(trace.history[0].error, 100.0);
        assert_eq!(trace.history[1].x, 2.0);
        assert_eq!(trace.history[1].error, 1.0);
        for (i, record) in trace.history.iter().enumerate() {
            assert_eq!(record.iteration, i);
        }
    }

    #[test]
    fn test_undefined_start() {
        let f = parse("sqrt(x)").unwrap();
        let trace = secant(&f, -1.0, 1.0, &RootOptions::default());
        assert_eq!(
            trace.message(),
            "The function is not defined at x0 = -1 or x1 = 1. The method fails."
        );
        assert!(trace.history.is_empty());
    }

    #[test]
    fn test_flat_secant_stops() {
        let f = |x: f64| x * x - 4.0;
        let trace = secant(&f, -1.0, 1.0, &RootOptions::default());
        assert_eq!(trace.outcome, RootOutcome::Exhausted { max_iterations: 100 });
        assert_eq!(trace.history.len(), 2);
    }

    #[test]
    fn test_exhaustion_ends_on_budget_index() {
        let f = parse("exp(x) - 10").unwrap();
        let options = RootOptions::new().with_tolerance_digits(14.0).with_max_iterations(4);
        let trace = secant(&f, 0.0, 1.0, &options);
        assert_eq!(trace.outcome, RootOutcome::Exhausted { max_iterations: 4 });
        assert_eq!(trace.iterations(), 4);
    }

    #[test]
    fn test_zero_budget_is_raised_to_one() {
        let f = |x: f64| x * x - 2.0;
        let options = RootOptions::new().with_tolerance_digits(14.0).with_max_iterations(0);
        let trace = secant(&f, 1.0, 2.0, &options);
        assert_eq!(trace.outcome, RootOutcome::Exhausted { max_iterations: 1 });
        assert_eq!(trace.iterations(), 1);
        assert_eq!(trace.history.len(), 2);
    }
}
