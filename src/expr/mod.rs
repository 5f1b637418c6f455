//! Expression evaluator.
//!
//! Parses single-variable real expressions such as `x^3 - 2x + ln(x)` and
//! evaluates them, or any of their symbolic derivatives, at a point.
//!
//! # Syntax
//!
//! | Form | Meaning |
//! |------|---------|
//! | `+ - * /` | arithmetic |
//! | `^`, `**` | exponentiation (right-associative) |
//! | `2x`, `3(x+1)`, `x sin(x)` | implicit multiplication |
//! | `sin cos tan asin acos atan` | trigonometric functions |
//! | `sinh cosh tanh` | hyperbolic functions |
//! | `exp ln log log10 log2 sqrt abs sign` | other elementary functions (`log` is natural) |
//! | `pi`, `e` | constants |
//!
//! # Capability traits
//!
//! The root-finding methods only see [`RealFunction`] and
//! [`Differentiable`]; they never parse or differentiate anything
//! themselves. [`Expression`] implements both, and any `Fn(f64) -> f64`
//! closure implements [`RealFunction`].
//!
//! A point where the function is undefined evaluates to NaN or an infinity.

mod ast;
mod derivative;
mod lexer;
mod parser;

use std::fmt;

pub use ast::{BinaryOp, Constant, Expr, Function};
pub use lexer::{Lexer, Token, TokenKind};
pub use parser::Parser;

use crate::error::Result;

/// A real function of one real variable.
pub trait RealFunction {
    /// Value at `x`; NaN or an infinity where the function is undefined.
    fn evaluate(&self, x: f64) -> f64;
}

impl<F> RealFunction for F
where
    F: Fn(f64) -> f64,
{
    fn evaluate(&self, x: f64) -> f64 {
        self(x)
    }
}

/// A function that can produce its own derivatives.
pub trait Differentiable: RealFunction + Clone {
    /// First derivative.
    fn derivative(&self) -> Self;

    /// Derivative of the given order; order 0 is a copy of `self`.
    fn nth_derivative(&self, order: usize) -> Self {
        let mut current = self.clone();
        for _ in 0..order {
            current = current.derivative();
        }
        current
    }
}

/// A parsed expression together with the text it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    source: String,
    ast: Expr,
}

impl Expression {
    /// Wrap an already-built tree.
    pub fn from_ast(ast: Expr) -> Self {
        Self {
            source: ast.to_string(),
            ast,
        }
    }

    /// The text the expression was parsed from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The syntax tree.
    pub fn ast(&self) -> &Expr {
        &self.ast
    }
}

impl RealFunction for Expression {
    fn evaluate(&self, x: f64) -> f64 {
        self.ast.eval(x)
    }
}

impl Differentiable for Expression {
    fn derivative(&self) -> Self {
        Self::from_ast(self.ast.derivative())
    }

    fn nth_derivative(&self, order: usize) -> Self {
        if order == 0 {
            return self.clone();
        }
        Self::from_ast(self.ast.nth_derivative(order))
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ast)
    }
}

impl std::str::FromStr for Expression {
    type Err = crate::error::NumetrifyError;

    fn from_str(s: &str) -> Result<Self> {
        parse(s)
    }
}

/// Parse expression text.
pub fn parse(input: &str) -> Result<Expression> {
    let lexer = Lexer::new(input);
    let mut parser = Parser::new(lexer)?;
    let ast = parser.parse()?;
    Ok(Expression {
        source: input.trim().to_string(),
        ast,
    })
}
