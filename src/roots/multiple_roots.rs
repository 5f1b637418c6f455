//! Modified Newton iteration for roots of higher multiplicity.

use super::{History, IterationRecord, RootFailure, RootMethod, RootOptions, RootOutcome, RootTrace};
use crate::expr::Differentiable;
use crate::numeric::{is_defined, INITIAL_ERROR};

/// `x ← x − f·f' / (f'² − f·f'')`, which keeps quadratic convergence at
/// multiple roots where plain Newton slows down.
pub fn multiple_roots<F>(f: &F, x0: f64, options: &RootOptions) -> RootTrace
where
    F: Differentiable,
{
    let tolerance = options.tolerance();
    let mut history = History::new(RootMethod::MultipleRoots, tolerance);
    let df = f.derivative();
    let d2f = df.derivative();

    let eval = |x: f64| {
        let values = (f.evaluate(x), df.evaluate(x), d2f.evaluate(x));
        if is_defined(values.0) && is_defined(values.1) && is_defined(values.2) {
            Some(values)
        } else {
            None
        }
    };

    let mut x = x0;
    let Some((mut fx, mut dfx, mut d2fx)) = eval(x) else {
        return history.fail(RootFailure::DerivativesUndefined { x });
    };
    history.push(
        IterationRecord::new(0, x, fx, INITIAL_ERROR)
            .with_derivative(dfx)
            .with_second_derivative(d2fx),
    );

    let mut error = INITIAL_ERROR;
    let mut iteration = 0;

    while error >= tolerance && fx != 0.0 && iteration < options.max_iterations {
        let denominator = dfx * dfx - fx * d2fx;
        if denominator == 0.0 {
            return history.fail(RootFailure::ZeroDenominator);
        }

        iteration += 1;
        let previous = x;
        x -= fx * dfx / denominator;
        (fx, dfx, d2fx) = match eval(x) {
            Some(values) => values,
            None => return history.fail(RootFailure::DerivativesUndefined { x }),
        };

        error = match options.error_type.step_error(x, previous) {
            Some(error) => error,
            None => return history.fail(RootFailure::RelativeErrorUndefined),
        };
        history.push(
            IterationRecord::new(iteration, x, fx, error)
                .with_derivative(dfx)
                .with_second_derivative(d2fx),
        );
    }

    history.finish(RootOutcome::classify(x, fx, error, tolerance, options.max_iterations))
}
