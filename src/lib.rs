//! # Numetrify Core
//!
//! Numerical methods with full iteration traces.
//!
//! This library provides:
//! - An expression evaluator with symbolic derivatives
//! - Root finding for real functions of one variable
//! - Direct and iterative solvers for linear systems
//! - Polynomial interpolation
//!
//! ## Architecture
//!
//! - [`expr`] - Expression parsing, evaluation and differentiation
//! - [`roots`] - Bisection, false position, fixed point, Newton-Raphson,
//!   secant, multiple roots and incremental search
//! - [`linear`] - Gaussian elimination, LU factorizations, Cholesky,
//!   Jacobi and Gauss-Seidel
//! - [`interpolation`] - Vandermonde and Newton divided differences
//! - [`request`] / [`report`] - JSON request validation and report layout
//!
//! ## Usage
//!
//! ### Library
//!
//! ```
//! use numetrify_core::expr;
//! use numetrify_core::roots::{newton_raphson, RootOptions};
//!
//! let f = expr::parse("x^3 - x - 2").unwrap();
//! let trace = newton_raphson(&f, 1.5, &RootOptions::default());
//! assert!((trace.root().unwrap() - 1.5213797).abs() < 1e-6);
//! ```
//!
//! ### Native CLI
//!
//! ```bash
//! echo '{"method": "bisection", "function": "x^2 - 2", "lowerBound": 1, "upperBound": 2}' | numetrify -
//! ```
//!
//! ### WASM
//!
//! ```javascript
//! import { run } from 'numetrify_core';
//!
//! const report = JSON.parse(run(JSON.stringify(request)));
//! ```
//!
//! ## Failure Model
//!
//! Malformed input (expressions, matrices, parameters) is rejected with a
//! [`NumetrifyError`] before any method runs. A method that starts always
//! returns a trace; non-convergence and numeric breakdowns are described in
//! the trace's message.

pub mod error;
pub mod expr;
pub mod interpolation;
pub mod linear;
pub mod numeric;
pub mod report;
pub mod request;
pub mod roots;

// Re-export main types for convenience
pub use error::{NumetrifyError, Result};
pub use expr::{Differentiable, Expression, RealFunction};
pub use linear::Matrix;
pub use numeric::ErrorType;
pub use report::Report;
pub use request::Request;

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

/// Default iteration budget
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// Default number of correct decimal digits
pub const DEFAULT_TOLERANCE_DIGITS: f64 = 4.0;
