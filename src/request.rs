//! Typed requests: deserialize, validate, dispatch.
//!
//! A request is a JSON object whose `method` field names the method and
//! whose remaining fields carry its parameters:
//!
//! ```json
//! { "method": "bisection", "function": "x^2 - 2", "lowerBound": 1, "upperBound": 2,
//!   "errorType": 1, "toleranceValue": 4, "maxIterations": 50 }
//! ```
//!
//! All validation happens here. Once a request is dispatched the method
//! always produces a report.

use log::debug;
use serde::Deserialize;

use crate::error::{NumetrifyError, Result};
use crate::expr::{self, Expression};
use crate::interpolation;
use crate::linear::{self, parse_vector, IterativeOptions, Matrix};
use crate::numeric::ErrorType;
use crate::report::Report;
use crate::roots::{self, RootOptions};
use crate::{DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE_DIGITS};

/// One method invocation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "method", rename_all = "kebab-case")]
pub enum Request {
    Bisection(IntervalParams),
    FalsePosition(IntervalParams),
    FixedPoint(FixedPointParams),
    NewtonRaphson(OpenParams),
    Secant(SecantParams),
    MultipleRoots(OpenParams),
    IncrementalSearch(IncrementalParams),
    SimpleGaussianElimination(DirectParams),
    PivotGaussianElimination(DirectParams),
    LuGaussianElimination(DirectParams),
    Doolittle(DirectParams),
    Crout(DirectParams),
    Cholesky(DirectParams),
    Jacobi(IterativeParams),
    GaussSeidel(IterativeParams),
    Vandermonde(PointsParams),
    NewtonDividedDifferences(PointsParams),
}

/// Stopping criteria shared by the iterative methods.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopCriteria {
    #[serde(default)]
    pub error_type: ErrorType,
    /// Correct decimal digits.
    #[serde(default = "default_tolerance")]
    pub tolerance_value: f64,
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
}

fn default_tolerance() -> f64 {
    DEFAULT_TOLERANCE_DIGITS
}

fn default_max_iterations() -> usize {
    DEFAULT_MAX_ITERATIONS
}

impl Default for StopCriteria {
    fn default() -> Self {
        Self {
            error_type: ErrorType::default(),
            tolerance_value: DEFAULT_TOLERANCE_DIGITS,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl StopCriteria {
    fn validate(&self) -> Result<()> {
        if !self.tolerance_value.is_finite() || self.tolerance_value < 0.0 {
            return Err(NumetrifyError::invalid_parameter(
                "toleranceValue",
                format!("expected a non-negative number of digits, got {}", self.tolerance_value),
            ));
        }
        Ok(())
    }

    /// Options for the root-finding methods.
    pub fn root_options(&self) -> Result<RootOptions> {
        self.validate()?;
        Ok(RootOptions::new()
            .with_error_type(self.error_type)
            .with_tolerance_digits(self.tolerance_value)
            .with_max_iterations(self.max_iterations))
    }

    /// Options for the iterative linear solvers.
    pub fn iterative_options(&self) -> Result<IterativeOptions> {
        self.validate()?;
        Ok(IterativeOptions::new()
            .with_error_type(self.error_type)
            .with_tolerance_digits(self.tolerance_value)
            .with_max_iterations(self.max_iterations))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntervalParams {
    pub function: String,
    pub lower_bound: f64,
    pub upper_bound: f64,
    #[serde(flatten)]
    pub stop: StopCriteria,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixedPointParams {
    pub function: String,
    pub g_function: String,
    pub initial_guess: f64,
    #[serde(flatten)]
    pub stop: StopCriteria,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenParams {
    pub function: String,
    pub initial_guess: f64,
    #[serde(flatten)]
    pub stop: StopCriteria,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecantParams {
    pub function: String,
    pub x0: f64,
    pub x1: f64,
    #[serde(flatten)]
    pub stop: StopCriteria,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncrementalParams {
    pub function: String,
    pub x0: f64,
    pub h: f64,
    #[serde(flatten)]
    pub stop: StopCriteria,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectParams {
    /// Rows separated by `;`, e.g. `"4 1; 2 3"`.
    pub matrix: String,
    /// Space-separated right-hand side.
    pub vector: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IterativeParams {
    /// Expected dimension; checked against the matrix when given.
    #[serde(default)]
    pub size: Option<usize>,
    pub matrix: String,
    pub vector: String,
    pub initial_vector: String,
    #[serde(flatten)]
    pub stop: StopCriteria,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointsParams {
    pub x_values: Vec<f64>,
    pub y_values: Vec<f64>,
}

impl Request {
    /// Parse a request from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// The `method` tag.
    pub fn method(&self) -> &'static str {
        match self {
            Self::Bisection(_) => "bisection",
            Self::FalsePosition(_) => "false-position",
            Self::FixedPoint(_) => "fixed-point",
            Self::NewtonRaphson(_) => "newton-raphson",
            Self::Secant(_) => "secant",
            Self::MultipleRoots(_) => "multiple-roots",
            Self::IncrementalSearch(_) => "incremental-search",
            Self::SimpleGaussianElimination(_) => "simple-gaussian-elimination",
            Self::PivotGaussianElimination(_) => "pivot-gaussian-elimination",
            Self::LuGaussianElimination(_) => "lu-gaussian-elimination",
            Self::Doolittle(_) => "doolittle",
            Self::Crout(_) => "crout",
            Self::Cholesky(_) => "cholesky",
            Self::Jacobi(_) => "jacobi",
            Self::GaussSeidel(_) => "gauss-seidel",
            Self::Vandermonde(_) => "vandermonde",
            Self::NewtonDividedDifferences(_) => "newton-divided-differences",
        }
    }

    /// Validate the parameters and run the method.
    pub fn run(&self) -> Result<Report> {
        debug!("running {}", self.method());

        let report: Report = match self {
            Self::Bisection(p) => {
                let f = function(&p.function)?;
                roots::bisection(&f, p.lower_bound, p.upper_bound, &p.stop.root_options()?).into()
            }
            Self::FalsePosition(p) => {
                let f = function(&p.function)?;
                roots::false_position(&f, p.lower_bound, p.upper_bound, &p.stop.root_options()?)
                    .into()
            }
            Self::FixedPoint(p) => {
                let f = function(&p.function)?;
                let g = function(&p.g_function)?;
                roots::fixed_point(&f, &g, p.initial_guess, &p.stop.root_options()?).into()
            }
            Self::NewtonRaphson(p) => {
                let f = function(&p.function)?;
                roots::newton_raphson(&f, p.initial_guess, &p.stop.root_options()?).into()
            }
            Self::Secant(p) => {
                let f = function(&p.function)?;
                roots::secant(&f, p.x0, p.x1, &p.stop.root_options()?).into()
            }
            Self::MultipleRoots(p) => {
                let f = function(&p.function)?;
                roots::multiple_roots(&f, p.initial_guess, &p.stop.root_options()?).into()
            }
            Self::IncrementalSearch(p) => {
                let f = function(&p.function)?;
                roots::incremental_search(&f, p.x0, p.h, &p.stop.root_options()?).into()
            }
            Self::SimpleGaussianElimination(p) => p.solve(linear::simple_gaussian_elimination)?,
            Self::PivotGaussianElimination(p) => p.solve(linear::pivot_gaussian_elimination)?,
            Self::LuGaussianElimination(p) => p.solve(linear::lu_gaussian_elimination)?,
            Self::Doolittle(p) => p.solve(linear::doolittle)?,
            Self::Crout(p) => p.solve(linear::crout)?,
            Self::Cholesky(p) => p.solve(linear::cholesky)?,
            Self::Jacobi(p) => p.solve(linear::jacobi)?,
            Self::GaussSeidel(p) => p.solve(linear::gauss_seidel)?,
            Self::Vandermonde(p) => interpolation::vandermonde(&p.x_values, &p.y_values).into(),
            Self::NewtonDividedDifferences(p) => {
                interpolation::newton_divided_differences(&p.x_values, &p.y_values).into()
            }
        };

        Ok(report)
    }
}

fn function(text: &str) -> Result<Expression> {
    expr::parse(text)
}

impl DirectParams {
    fn solve(&self, solver: fn(&Matrix, &[f64]) -> linear::DirectSolution) -> Result<Report> {
        let a = Matrix::parse(&self.matrix)?;
        let b = parse_vector(&self.vector)?;
        Ok(solver(&a, &b).into())
    }
}

type IterativeSolver = fn(&Matrix, &[f64], &[f64], &IterativeOptions) -> linear::IterativeTrace;

impl IterativeParams {
    fn solve(&self, solver: IterativeSolver) -> Result<Report> {
        let a = Matrix::parse(&self.matrix)?;
        if let Some(size) = self.size {
            if size != a.size {
                return Err(NumetrifyError::DimensionMismatch {
                    expected: size,
                    found: a.size,
                });
            }
        }
        let b = parse_vector(&self.vector)?;
        let x0 = parse_vector(&self.initial_vector)?;
        let options = self.stop.iterative_options()?;
        Ok(solver(&a, &b, &x0, &options).into())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use serde_json::json;

    use super::*;

    fn run(value: serde_json::Value) -> Result<Report> {
        Request::from_json(&value.to_string())?.run()
    }

    #[test]
    fn test_bisection_request() {
        let report = run(json!({
            "method": "bisection",
            "function": "x^2 - 2",
            "lowerBound": 1,
            "upperBound": 2,
            "errorType": 1,
            "toleranceValue": 4,
            "maxIterations": 50
        }))
        .unwrap();

        let Report::Root(root) = report else {
            panic!("expected a root report");
        };
        assert!(root.message.starts_with("The approximate solution is: 1.4142"));
        assert!(*root.errors.last().unwrap() < 5e-5);
    }

    #[test]
    fn test_defaults_apply() {
        let request = Request::from_json(
            r#"{"method": "newton-raphson", "function": "x^3 - x - 2", "initialGuess": 1.5}"#,
        )
        .unwrap();
        let Request::NewtonRaphson(params) = &request else {
            panic!("wrong variant");
        };
        assert_eq!(params.stop, StopCriteria::default());
        assert_eq!(request.method(), "newton-raphson");
    }

    #[test]
    fn test_direct_request_json_shape() {
        let report = run(json!({
            "method": "doolittle",
            "matrix": "4 3; 6 3",
            "vector": "10 12"
        }))
        .unwrap();
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["message"], "Success");
        assert_relative_eq!(value["solution"][0].as_f64().unwrap(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(value["solution"][1].as_f64().unwrap(), 2.0, epsilon = 1e-12);
        assert_eq!(value["l"][0], json!([1.0, 0.0]));
    }

    #[test]
    fn test_jacobi_request() {
        let report = run(json!({
            "method": "jacobi",
            "size": 2,
            "matrix": "4 1; 2 3",
            "vector": "1 2",
            "initialVector": "0 0",
            "errorType": 1,
            "toleranceValue": 6,
            "maxIterations": 100
        }))
        .unwrap();
        let value = serde_json::to_value(&report).unwrap();
        assert!(value["spectralRadius"].as_f64().unwrap() < 1.0);
        assert_eq!(value["xvalues"][0], json!([0.0, 0.0]));
    }

    #[test]
    fn test_interpolation_request() {
        let report = run(json!({
            "method": "vandermonde",
            "xValues": [0, 1, 2],
            "yValues": [1, 0, 3]
        }))
        .unwrap();
        assert!(report.message().ends_with("2.000x^2 - 3.000x + 1.000"));
    }

    #[test]
    fn test_validation_errors() {
        assert!(matches!(
            run(json!({"method": "secant", "function": "x +", "x0": 0, "x1": 1})),
            Err(NumetrifyError::ParseError { .. })
        ));
        assert!(matches!(
            run(json!({"method": "bisection", "function": "x", "lowerBound": 0,
                       "upperBound": 1, "errorType": 3})),
            Err(NumetrifyError::Serialization(_))
        ));
        assert!(matches!(
            run(json!({"method": "bisection", "function": "x", "lowerBound": 0,
                       "upperBound": 1, "toleranceValue": -1})),
            Err(NumetrifyError::InvalidParameter { .. })
        ));
        assert!(matches!(
            run(json!({"method": "crout", "matrix": "1 2; 3", "vector": "1 2"})),
            Err(NumetrifyError::InvalidMatrix { .. })
        ));
        assert!(matches!(
            run(json!({"method": "gauss-seidel", "size": 3, "matrix": "4 1; 2 3",
                       "vector": "1 2", "initialVector": "0 0"})),
            Err(NumetrifyError::DimensionMismatch { expected: 3, found: 2 })
        ));
        assert!(matches!(
            run(json!({"method": "sor"})),
            Err(NumetrifyError::Serialization(_))
        ));
    }
}
