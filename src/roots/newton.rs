//! Newton-Raphson iteration.

use log::debug;

use super::{History, IterationRecord, RootFailure, RootMethod, RootOptions, RootOutcome, RootTrace};
use crate::expr::Differentiable;
use crate::numeric::{is_defined, INITIAL_ERROR};

/// Newton-Raphson from `x0`: `x ← x − f(x)/f'(x)`.
///
/// The derivative comes from the function itself. A zero derivative ends
/// the loop without a failure; the run is then classified like any other
/// stop, which reports exhaustion unless the last step already converged.
pub fn newton_raphson<F>(f: &F, x0: f64, options: &RootOptions) -> RootTrace
where
    F: Differentiable,
{
    let tolerance = options.tolerance();
    let mut history = History::new(RootMethod::NewtonRaphson, tolerance);
    let df = f.derivative();

    let mut x = x0;
    let mut fx = f.evaluate(x);
    let mut dfx = df.evaluate(x);
    if !is_defined(fx) || !is_defined(dfx) {
        return history.fail(RootFailure::NotDifferentiable { x });
    }
    history.push(IterationRecord::new(0, x, fx, INITIAL_ERROR).with_derivative(dfx));

    let mut error = INITIAL_ERROR;
    let mut iteration = 0;

    while error >= tolerance && fx != 0.0 && dfx != 0.0 && iteration < options.max_iterations {
        iteration += 1;

        let previous = x;
        x -= fx / dfx;
        fx = f.evaluate(x);
        dfx = df.evaluate(x);
        if !is_defined(fx) || !is_defined(dfx) {
            return history.fail(RootFailure::NotDifferentiable { x });
        }

        error = match options.error_type.step_error(x, previous) {
            Some(error) => error,
            None => return history.fail(RootFailure::RelativeErrorUndefined),
        };
        history.push(IterationRecord::new(iteration, x, fx, error).with_derivative(dfx));
    }

    if dfx == 0.0 && fx != 0.0 {
        debug!("Newton-Raphson: derivative vanished at x = {}", x);
    }

    history.finish(RootOutcome::classify(x, fx, error, tolerance, options.max_iterations))
}
