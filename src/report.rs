//! Serializable reports, in the column layout consumed by front ends.

use serde::Serialize;

use crate::interpolation::Interpolation;
use crate::linear::{DirectSolution, IterativeTrace};
use crate::roots::{BracketTrace, IterationRecord, RootMethod, RootTrace};

/// Report for any method.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Report {
    Root(RootReport),
    Bracket(BracketReport),
    Direct(DirectSolution),
    Iterative(IterativeTrace),
    Interpolation(Interpolation),
}

impl Report {
    /// Human-readable outcome.
    pub fn message(&self) -> &str {
        match self {
            Self::Root(r) => &r.message,
            Self::Bracket(r) => &r.message,
            Self::Direct(r) => &r.message,
            Self::Iterative(r) => &r.message,
            Self::Interpolation(r) => &r.message,
        }
    }
}

/// Column view of a [`RootTrace`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RootReport {
    pub message: String,
    #[serde(rename = "xvalues")]
    pub x_values: Vec<f64>,
    pub function_values: Vec<f64>,
    /// Newton-Raphson only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub derivatives: Option<Vec<f64>>,
    /// Multiple roots only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_derivatives: Option<Vec<f64>>,
    /// Multiple roots only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub second_derivatives: Option<Vec<f64>>,
    pub errors: Vec<f64>,
    pub iterations: Vec<usize>,
}

impl From<&RootTrace> for RootReport {
    fn from(trace: &RootTrace) -> Self {
        let (derivatives, first_derivatives, second_derivatives) = match trace.method {
            RootMethod::NewtonRaphson => (column(trace, |r| r.derivative), None, None),
            RootMethod::MultipleRoots => (
                None,
                column(trace, |r| r.derivative),
                column(trace, |r| r.second_derivative),
            ),
            _ => (None, None, None),
        };

        Self {
            message: trace.message(),
            x_values: trace.x_values(),
            function_values: trace.function_values(),
            derivatives,
            first_derivatives,
            second_derivatives,
            errors: trace.errors(),
            iterations: trace.history.iter().map(|r| r.iteration).collect(),
        }
    }
}

fn column(trace: &RootTrace, pick: impl Fn(&IterationRecord) -> Option<f64>) -> Option<Vec<f64>> {
    Some(trace.history.iter().filter_map(pick).collect())
}

/// Column view of a [`BracketTrace`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BracketReport {
    pub message: String,
    pub a: f64,
    pub b: f64,
    pub iterations: usize,
    #[serde(rename = "xvalues")]
    pub x_values: Vec<f64>,
    pub function_values: Vec<f64>,
    pub errors: Vec<f64>,
}

impl From<&BracketTrace> for BracketReport {
    fn from(trace: &BracketTrace) -> Self {
        Self {
            message: trace.message(),
            a: trace.a,
            b: trace.b,
            iterations: trace.iterations,
            x_values: trace.history.iter().map(|r| r.x).collect(),
            function_values: trace.history.iter().map(|r| r.fx).collect(),
            errors: trace.history.iter().map(|r| r.error).collect(),
        }
    }
}

impl From<RootTrace> for Report {
    fn from(trace: RootTrace) -> Self {
        Self::Root(RootReport::from(&trace))
    }
}

impl From<BracketTrace> for Report {
    fn from(trace: BracketTrace) -> Self {
        Self::Bracket(BracketReport::from(&trace))
    }
}

impl From<DirectSolution> for Report {
    fn from(solution: DirectSolution) -> Self {
        Self::Direct(solution)
    }
}

impl From<IterativeTrace> for Report {
    fn from(trace: IterativeTrace) -> Self {
        Self::Iterative(trace)
    }
}

impl From<Interpolation> for Report {
    fn from(result: Interpolation) -> Self {
        Self::Interpolation(result)
    }
}
