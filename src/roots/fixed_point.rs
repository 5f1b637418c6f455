//! Fixed-point iteration.

use super::{History, IterationRecord, RootFailure, RootMethod, RootOptions, RootOutcome, RootTrace};
use crate::expr::RealFunction;
use crate::numeric::{is_defined, INITIAL_ERROR};

/// Iterate `x ← g(x)` from `x0`, reporting `f(x)` at each step.
///
/// `g` must be chosen so that its fixed points are roots of `f`.
pub fn fixed_point<F, G>(f: &F, g: &G, x0: f64, options: &RootOptions) -> RootTrace
where
    F: RealFunction + ?Sized,
    G: RealFunction + ?Sized,
{
    let tolerance = options.tolerance();
    let mut history = History::new(RootMethod::FixedPoint, tolerance);

    let mut x = x0;
    let mut fx = f.evaluate(x);
    if !is_defined(fx) {
        return history.fail(RootFailure::Undefined { x });
    }
    history.push(IterationRecord::new(0, x, fx, INITIAL_ERROR));

    let mut error = INITIAL_ERROR;
    let mut iteration = 0;

    while error >= tolerance && fx != 0.0 && iteration < options.max_iterations {
        let next = g.evaluate(x);
        if !is_defined(next) {
            return history.fail(RootFailure::Undefined { x });
        }

        fx = f.evaluate(next);
        if !is_defined(fx) {
            return history.fail(RootFailure::Undefined { x: next });
        }

        iteration += 1;
        error = match options.error_type.step_error(next, x) {
            Some(error) => error,
            None => return history.fail(RootFailure::RelativeErrorUndefined),
        };
        x = next;
        history.push(IterationRecord::new(iteration, x, fx, error));
    }

    history.finish(RootOutcome::classify(x, fx, error, tolerance, options.max_iterations))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::expr::parse;
    use crate::numeric::ErrorType;

    #[test]
    fn test_cosine_fixed_point() {
        let f = parse("x - cos(x)").unwrap();
        let g = parse("cos(x)").unwrap();
        let options = RootOptions::new().with_tolerance_digits(6.0);
        let trace = fixed_point(&f, &g, 0.5, &options);

        assert!(matches!(trace.outcome, RootOutcome::Converged { .. }));
        assert_relative_eq!(trace.root().unwrap(), 0.7390851, epsilon = 1e-5);
        assert_eq!(trace.history[0].x, 0.5);
        assert_eq!(trace.history[0].error, 100.0);
    }

    #[test]
    fn test_starting_root() {
        let f = |x: f64| x - 1.0;
        let g = |_: f64| 1.0;
        let trace = fixed_point(&f, &g, 1.0, &RootOptions::default());
        assert_eq!(trace.outcome, RootOutcome::ExactRoot { x: 1.0 });
        assert_eq!(trace.history.len(), 1);
    }

    #[test]
    fn test_divergent_g_exhausts() {
        let f = |x: f64| x * x - 2.0;
        let g = |x: f64| 2.0 / x;
        let options = RootOptions::new().with_max_iterations(10);
        let trace = fixed_point(&f, &g, 1.0, &options);
        assert_eq!(trace.outcome, RootOutcome::Exhausted { max_iterations: 10 });
        assert_eq!(trace.iterations(), 10);
    }

    #[test]
    fn test_undefined_g_keeps_partial_trace() {
        let f = |x: f64| x - 5.0;
        let g = parse("ln(x) - 1").unwrap();
        let trace = fixed_point(&f, &g, 1.0, &RootOptions::default());
        assert!(matches!(trace.outcome, RootOutcome::Failed(RootFailure::Undefined { .. })));
        assert_eq!(trace.history.len(), 2);
    }

    #[test]
    fn test_zero_step_at_zero_in_relative_mode() {
        let f = |x: f64| x - 1.0;
        let g = |_: f64| 0.0;
        let options = RootOptions::new().with_error_type(ErrorType::Relative);
        let trace = fixed_point(&f, &g, 0.0, &options);
        assert_eq!(trace.errors(), vec![100.0, 0.0]);
        assert_eq!(trace.outcome, RootOutcome::Converged { x: 0.0, tolerance: options.tolerance() });
    }

    #[test]
    fn test_relative_error_undefined_on_step_to_zero() {
        let f = |x: f64| x - 1.0;
        let g = |_: f64| 0.0;
        let options = RootOptions::new().with_error_type(ErrorType::Relative);
        let trace = fixed_point(&f, &g, 2.0, &options);
        assert_eq!(trace.outcome, RootOutcome::Failed(RootFailure::RelativeErrorUndefined));
        assert_eq!(trace.history.len(), 1);
    }
}
