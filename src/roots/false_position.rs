//! False position (regula falsi).

use super::{History, IterationRecord, RootFailure, RootMethod, RootOptions, RootOutcome, RootTrace};
use crate::expr::RealFunction;
use crate::numeric::{is_defined, INITIAL_ERROR};

/// Secant line through the bracket endpoints, kept bracketing.
///
/// `xr = a − f(a)(b − a) / (f(b) − f(a))`. The endpoint whose sign matches
/// `f(xr)` is replaced.
pub fn false_position<F>(f: &F, lower: f64, upper: f64, options: &RootOptions) -> RootTrace
where
    F: RealFunction + ?Sized,
{
    let tolerance = options.tolerance();
    let mut history = History::new(RootMethod::FalsePosition, tolerance);

    let (mut a, mut b) = (lower, upper);
    let (mut fa, mut fb) = (f.evaluate(a), f.evaluate(b));

    if !is_defined(fa) {
        return history.fail(RootFailure::Undefined { x: a });
    }
    if !is_defined(fb) {
        return history.fail(RootFailure::Undefined { x: b });
    }
    if fa == 0.0 {
        return history.finish(RootOutcome::ExactRoot { x: a });
    }
    if fb == 0.0 {
        return history.finish(RootOutcome::ExactRoot { x: b });
    }
    if fa.signum() == fb.signum() {
        return history.fail(RootFailure::InadequateInterval);
    }

    let mut xr = a - fa * (b - a) / (fb - fa);
    let mut fr = f.evaluate(xr);
    if !is_defined(fr) {
        return history.fail(RootFailure::Undefined { x: xr });
    }
    history.push(IterationRecord::new(0, xr, fr, INITIAL_ERROR));

    let mut error = INITIAL_ERROR;
    let mut iteration = 0;

    while error >= tolerance && fr != 0.0 && iteration < options.max_iterations {
        if fa.signum() != fr.signum() {
            b = xr;
            fb = fr;
        } else {
            a = xr;
            fa = fr;
        }

        let denominator = fb - fa;
        if denominator == 0.0 {
            return history.fail(RootFailure::ZeroDenominator);
        }

        iteration += 1;
        let previous = xr;
        xr = a - fa * (b - a) / denominator;
        fr = f.evaluate(xr);
        if !is_defined(fr) {
            return history.fail(RootFailure::Undefined { x: xr });
        }

        error = match options.error_type.step_error(xr, previous) {
            Some(error) => error,
            None => return history.fail(RootFailure::RelativeErrorUndefined),
        };
        history.push(IterationRecord::new(iteration, xr, fr, error));
    }

    history.finish(RootOutcome::classify(xr, fr, error, tolerance, options.max_iterations))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::expr::parse;

    #[test]
    fn test_cubic_root() {
        let f = parse("x^3 - x - 2").unwrap();
        let trace = false_position(&f, 1.0, 2.0, &RootOptions::new().with_tolerance_digits(6.0));
        assert!(trace.outcome.is_success());
        assert_relative_eq!(trace.root().unwrap(), 1.5213797, epsilon = 1e-5);
    }

    #[test]
    fn test_first_point_is_chord_intersection() {
        // Chord of x^2 - 2 through (1, -1) and (2, 2) crosses at 4/3
        let f = |x: f64| x * x - 2.0;
        let trace = false_position(&f, 1.0, 2.0, &RootOptions::default());
        assert_relative_eq!(trace.history[0].x, 4.0 / 3.0);
        assert_eq!(trace.history[0].error, 100.0);
    }

    #[test]
    fn test_linear_function_hits_exact_root() {
        let f = |x: f64| 2.0 * x - 1.0;
        let trace = false_position(&f, 0.0, 2.0, &RootOptions::default());
        assert_eq!(trace.outcome, RootOutcome::ExactRoot { x: 0.5 });
        assert_eq!(trace.history.len(), 1);
    }

    #[test]
    fn test_inadequate_interval() {
        let f = |x: f64| x * x + 1.0;
        let trace = false_position(&f, 0.0, 1.0, &RootOptions::default());
        assert_eq!(trace.outcome, RootOutcome::Failed(RootFailure::InadequateInterval));
        assert!(trace.history.is_empty());
    }

    #[test]
    fn test_exhaustion() {
        let f = parse("exp(x) - 10").unwrap();
        let options = RootOptions::new().with_tolerance_digits(14.0).with_max_iterations(3);
        let trace = false_position(&f, 0.0, 5.0, &options);
        assert_eq!(trace.outcome, RootOutcome::Exhausted { max_iterations: 3 });
        assert_eq!(trace.iterations(), 3);
    }

    #[test]
    fn test_tiny_same_sign_values_are_inadequate() {
        let f = |x: f64| 1e-200 * (1.0 + x);
        let trace = false_position(&f, 1.0, 2.0, &RootOptions::default());
        assert_eq!(trace.outcome, RootOutcome::Failed(RootFailure::InadequateInterval));
    }
}
