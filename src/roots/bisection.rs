//! Bisection method.

use super::{History, IterationRecord, RootFailure, RootMethod, RootOptions, RootOutcome, RootTrace};
use crate::expr::RealFunction;
use crate::numeric::{is_defined, INITIAL_ERROR};

/// Halve `[lower, upper]` until successive midpoints agree to the tolerance.
///
/// The first midpoint is recorded as iteration 0. When `f(lower)` and
/// `f(mid)` differ in sign the upper half is discarded, otherwise the lower half. The run stops on
/// an exact zero, when the step error drops below the tolerance, or after
/// `max_iterations` halvings.
pub fn bisection<F>(f: &F, lower: f64, upper: f64, options: &RootOptions) -> RootTrace
where
    F: RealFunction + ?Sized,
{
    let tolerance = options.tolerance();
    let mut history = History::new(RootMethod::Bisection, tolerance);

    let (mut a, mut b) = (lower, upper);
    let mut fa = f.evaluate(a);
    let fb = f.evaluate(b);

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

    let mut mid = (a + b) / 2.0;
    let mut fm = f.evaluate(mid);
    if !is_defined(fm) {
        return history.fail(RootFailure::Undefined { x: mid });
    }
    history.push(IterationRecord::new(0, mid, fm, INITIAL_ERROR));

    let mut error = INITIAL_ERROR;
    let mut iteration = 0;

    while iteration < options.max_iterations && fm != 0.0 && error >= tolerance {
        iteration += 1;

        // fm is non-zero inside the loop
        if fa.signum() != fm.signum() {
            b = mid;
        } else {
            a = mid;
            fa = fm;
        }

        let previous = mid;
        mid = (a + b) / 2.0;
        fm = f.evaluate(mid);
        if !is_defined(fm) {
            return history.fail(RootFailure::Undefined { x: mid });
        }

        error = match options.error_type.step_error(mid, previous) {
            Some(error) => error,
            None => return history.fail(RootFailure::RelativeErrorUndefined),
        };
        history.push(IterationRecord::new(iteration, mid, fm, error));
    }

    let outcome = RootOutcome::classify(mid, fm, error, tolerance, options.max_iterations);
    history.finish(outcome)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::expr::parse;
    use crate::numeric::ErrorType;

    #[test]
    fn test_sqrt_two() {
        let f = parse("x^2 - 2").unwrap();
        let options = RootOptions::new().with_tolerance_digits(4.0).with_max_iterations(50);
        let trace = bisection(&f, 1.0, 2.0, &options);

        assert!(matches!(trace.outcome, RootOutcome::Converged { .. }));
        let root = trace.root().unwrap();
        assert_relative_eq!(root, std::f64::consts::SQRT_2, epsilon = 1e-4);
        assert!(trace.last_error().unwrap() < 5e-5);
        assert!(trace.message().starts_with("The approximate solution is: "));
    }

    #[test]
    fn test_first_record_is_midpoint_with_sentinel_error() {
        let f = |x: f64| x * x - 2.0;
        let trace = bisection(&f, 1.0, 2.0, &RootOptions::default());
        let first = trace.history[0];
        assert_eq!(first.iteration, 0);
        assert_eq!(first.x, 1.5);
        assert_eq!(first.error, 100.0);
        for (i, record) in trace.history.iter().enumerate() {
            assert_eq!(record.iteration, i);
        }
    }

    #[test]
    fn test_inadequate_interval_has_empty_trace() {
        let f = |x: f64| x * x + 1.0;
        let trace = bisection(&f, -1.0, 1.0, &RootOptions::default());
        assert_eq!(trace.outcome, RootOutcome::Failed(RootFailure::InadequateInterval));
        assert!(trace.history.is_empty());
        assert_eq!(trace.message(), "The interval is inadequate");
    }

    #[test]
    fn test_endpoint_root() {
        let f = |x: f64| x - 1.0;
        let trace = bisection(&f, 1.0, 3.0, &RootOptions::default());
        assert_eq!(trace.outcome, RootOutcome::ExactRoot { x: 1.0 });
        assert_eq!(trace.message(), "1 is a root of f(x)");
    }

    #[test]
    fn test_midpoint_root_stops_immediately() {
        let f = |x: f64| x;
        let trace = bisection(&f, -1.0, 1.0, &RootOptions::default());
        assert_eq!(trace.outcome, RootOutcome::ExactRoot { x: 0.0 });
        assert_eq!(trace.history.len(), 1);
    }

    #[test]
    fn test_exhaustion_reaches_budget() {
        let f = |x: f64| x * x - 2.0;
        let options = RootOptions::new().with_tolerance_digits(12.0).with_max_iterations(5);
        let trace = bisection(&f, 1.0, 2.0, &options);
        assert_eq!(trace.outcome, RootOutcome::Exhausted { max_iterations: 5 });
        assert_eq!(trace.iterations(), 5);
        assert_eq!(trace.message(), "Failed in 5 iterations");
    }

    #[test]
    fn test_relative_errors_scale_absolute() {
        let f = |x: f64| x * x - 2.0;
        let abs = bisection(&f, 1.0, 2.0, &RootOptions::new().with_max_iterations(8).with_tolerance_digits(10.0));
        let rel = bisection(
            &f,
            1.0,
            2.0,
            &RootOptions::new()
                .with_error_type(ErrorType::Relative)
                .with_max_iterations(8)
                .with_tolerance_digits(10.0),
        );
        assert_eq!(abs.x_values(), rel.x_values());
        for (a, r) in abs.history.iter().zip(&rel.history).skip(1) {
            assert_relative_eq!(r.error, a.error / a.x.abs());
        }
    }

    #[test]
    fn test_undefined_endpoint() {
        let f = parse("ln(x)").unwrap();
        let trace = bisection(&f, -1.0, 2.0, &RootOptions::default());
        assert_eq!(trace.outcome, RootOutcome::Failed(RootFailure::Undefined { x: -1.0 }));
    }

    #[test]
    fn test_tiny_same_sign_values_are_inadequate() {
        // f(a)·f(b) underflows to zero
        let f = |_: f64| 1e-200;
        let trace = bisection(&f, 1.0, 2.0, &RootOptions::default());
        assert_eq!(trace.outcome, RootOutcome::Failed(RootFailure::InadequateInterval));
        assert!(trace.history.is_empty());
    }

    #[test]
    fn test_tiny_opposite_signs_keep_bracket() {
        let f = |x: f64| if x < 1.3 { -1e-200 } else { 1e-200 };
        let trace = bisection(&f, 1.0, 2.0, &RootOptions::default());
        assert_relative_eq!(trace.root().unwrap(), 1.3, epsilon = 1e-4);
    }

    #[test]
    fn test_relative_error_undefined_at_zero_midpoint() {
        // Midpoints -1, then 0 with f(0) != 0
        let f = |x: f64| x - 0.5;
        let options = RootOptions::new().with_error_type(ErrorType::Relative);
        let trace = bisection(&f, -3.0, 1.0, &options);
        assert_eq!(trace.outcome, RootOutcome::Failed(RootFailure::RelativeErrorUndefined));
        assert_eq!(trace.x_values(), vec![-1.0]);
        assert_eq!(
            trace.message(),
            "The relative error is undefined at x = 0. The method fails."
        );
    }
}
