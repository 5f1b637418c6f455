//! Abstract Syntax Tree types for expressions.

use std::fmt;

/// A real-valued expression in the single variable `x`.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Numeric literal
    Number(f64),
    /// The variable `x`
    Variable,
    /// Named mathematical constant
    Constant(Constant),
    /// Unary negation
    Neg(Box<Expr>),
    /// Binary operation
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    /// Elementary function applied to an argument
    Call { func: Function, arg: Box<Expr> },
}

/// Binary operators, in increasing precedence groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinaryOp {
    fn precedence(&self) -> u8 {
        match self {
            Self::Add | Self::Sub => 1,
            Self::Mul | Self::Div => 2,
            Self::Pow => 4,
        }
    }

    fn symbol(&self) -> &'static str {
        match self {
            Self::Add => " + ",
            Self::Sub => " - ",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Pow => "^",
        }
    }

    /// Apply the operator to two values.
    pub fn apply(&self, a: f64, b: f64) -> f64 {
        match self {
            Self::Add => a + b,
            Self::Sub => a - b,
            Self::Mul => a * b,
            Self::Div => a / b,
            Self::Pow => a.powf(b),
        }
    }
}

/// Named constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constant {
    Pi,
    E,
}

impl Constant {
    /// Look up a constant by name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "pi" | "PI" | "Pi" => Some(Self::Pi),
            "e" | "E" => Some(Self::E),
            _ => None,
        }
    }

    /// Numeric value of the constant.
    pub fn value(&self) -> f64 {
        match self {
            Self::Pi => std::f64::consts::PI,
            Self::E => std::f64::consts::E,
        }
    }
}

/// Elementary functions supported by the evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Exp,
    /// Natural logarithm (`ln` and `log` both map here)
    Ln,
    Log10,
    Log2,
    Sqrt,
    Abs,
    Sign,
}

impl Function {
    /// Look up a function by name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "sin" => Some(Self::Sin),
            "cos" => Some(Self::Cos),
            "tan" => Some(Self::Tan),
            "asin" | "arcsin" => Some(Self::Asin),
            "acos" | "arccos" => Some(Self::Acos),
            "atan" | "arctan" => Some(Self::Atan),
            "sinh" => Some(Self::Sinh),
            "cosh" => Some(Self::Cosh),
            "tanh" => Some(Self::Tanh),
            "exp" => Some(Self::Exp),
            "ln" | "log" => Some(Self::Ln),
            "log10" => Some(Self::Log10),
            "log2" => Some(Self::Log2),
            "sqrt" => Some(Self::Sqrt),
            "abs" => Some(Self::Abs),
            "sign" | "sgn" => Some(Self::Sign),
            _ => None,
        }
    }

    /// Canonical name used when printing.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Asin => "asin",
            Self::Acos => "acos",
            Self::Atan => "atan",
            Self::Sinh => "sinh",
            Self::Cosh => "cosh",
            Self::Tanh => "tanh",
            Self::Exp => "exp",
            Self::Ln => "ln",
            Self::Log10 => "log10",
            Self::Log2 => "log2",
            Self::Sqrt => "sqrt",
            Self::Abs => "abs",
            Self::Sign => "sign",
        }
    }

    /// Apply the function to a value.
    ///
    /// Points outside the domain produce NaN or an infinity, never a panic.
    pub fn apply(&self, v: f64) -> f64 {
        match self {
            Self::Sin => v.sin(),
            Self::Cos => v.cos(),
            Self::Tan => v.tan(),
            Self::Asin => v.asin(),
            Self::Acos => v.acos(),
            Self::Atan => v.atan(),
            Self::Sinh => v.sinh(),
            Self::Cosh => v.cosh(),
            Self::Tanh => v.tanh(),
            Self::Exp => v.exp(),
            Self::Ln => v.ln(),
            Self::Log10 => v.log10(),
            Self::Log2 => v.log2(),
            Self::Sqrt => v.sqrt(),
            Self::Abs => v.abs(),
            // signum() maps 0.0 to 1.0
            Self::Sign => {
                if v == 0.0 {
                    0.0
                } else {
                    v.signum()
                }
            }
        }
    }
}

impl Expr {
    /// Evaluate the expression at `x`.
    pub fn eval(&self, x: f64) -> f64 {
        match self {
            Self::Number(v) => *v,
            Self::Variable => x,
            Self::Constant(c) => c.value(),
            Self::Neg(inner) => -inner.eval(x),
            Self::Binary { op, lhs, rhs } => op.apply(lhs.eval(x), rhs.eval(x)),
            Self::Call { func, arg } => func.apply(arg.eval(x)),
        }
    }

    /// Whether the expression mentions `x` at all.
    pub fn depends_on_x(&self) -> bool {
        match self {
            Self::Number(_) | Self::Constant(_) => false,
            Self::Variable => true,
            Self::Neg(inner) => inner.depends_on_x(),
            Self::Binary { lhs, rhs, .. } => lhs.depends_on_x() || rhs.depends_on_x(),
            Self::Call { arg, .. } => arg.depends_on_x(),
        }
    }

    /// The literal value, if the node is a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            _ => None,
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            Self::Binary { op, .. } => op.precedence(),
            Self::Neg(_) => 3,
            Self::Number(v) if *v < 0.0 => 3,
            _ => 5,
        }
    }

    fn fmt_with(&self, f: &mut fmt::Formatter<'_>, min_prec: u8) -> fmt::Result {
        let wrap = self.precedence() < min_prec;
        if wrap {
            write!(f, "(")?;
        }
        match self {
            Self::Number(v) => write!(f, "{}", v)?,
            Self::Variable => write!(f, "x")?,
            Self::Constant(Constant::Pi) => write!(f, "pi")?,
            Self::Constant(Constant::E) => write!(f, "e")?,
            Self::Neg(inner) => {
                write!(f, "-")?;
                inner.fmt_with(f, 3)?;
            }
            Self::Binary { op, lhs, rhs } => {
                let prec = op.precedence();
                // Power is right-associative, the others left-associative
                let (lhs_min, rhs_min) = match op {
                    BinaryOp::Pow => (prec + 1, prec),
                    _ => (prec, prec + 1),
                };
                lhs.fmt_with(f, lhs_min)?;
                write!(f, "{}", op.symbol())?;
                rhs.fmt_with(f, rhs_min)?;
            }
            Self::Call { func, arg } => {
                write!(f, "{}(", func.name())?;
                arg.fmt_with(f, 0)?;
                write!(f, ")")?;
            }
        }
        if wrap {
            write!(f, ")")?;
        }
        Ok(())
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_with(f, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(v: f64) -> Box<Expr> {
        Box::new(Expr::Number(v))
    }

    #[test]
    fn test_eval_polynomial() {
        // x^2 - 2
        let e = Expr::Binary {
            op: BinaryOp::Sub,
            lhs: Box::new(Expr::Binary {
                op: BinaryOp::Pow,
                lhs: Box::new(Expr::Variable),
                rhs: num(2.0),
            }),
            rhs: num(2.0),
        };
        assert_eq!(e.eval(3.0), 7.0);
        assert!(e.depends_on_x());
        assert_eq!(e.to_string(), "x^2 - 2");
    }

    #[test]
    fn test_domain_errors_are_not_finite() {
        let ln = Expr::Call {
            func: Function::Ln,
            arg: Box::new(Expr::Variable),
        };
        assert!(ln.eval(-1.0).is_nan());
        assert!(ln.eval(0.0).is_infinite());
    }

    #[test]
    fn test_sign_of_zero() {
        assert_eq!(Function::Sign.apply(0.0), 0.0);
        assert_eq!(Function::Sign.apply(-3.0), -1.0);
    }

    #[test]
    fn test_display_parenthesizes() {
        // (x + 1)*x
        let e = Expr::Binary {
            op: BinaryOp::Mul,
            lhs: Box::new(Expr::Binary {
                op: BinaryOp::Add,
                lhs: Box::new(Expr::Variable),
                rhs: num(1.0),
            }),
            rhs: Box::new(Expr::Variable),
        };
        assert_eq!(e.to_string(), "(x + 1)*x");
    }
}
