//! Symbolic differentiation.
//!
//! Derivatives are built through small folding constructors so that trees
//! stay compact across repeated differentiation (`0*u` vanishes, `1*u` is
//! `u`, numeric subtrees collapse). No further simplification is attempted.

use super::ast::{BinaryOp, Expr, Function};

impl Expr {
    /// First derivative with respect to `x`.
    pub fn derivative(&self) -> Expr {
        match self {
            Expr::Number(_) | Expr::Constant(_) => Expr::Number(0.0),
            Expr::Variable => Expr::Number(1.0),
            Expr::Neg(inner) => neg(inner.derivative()),
            Expr::Binary { op, lhs, rhs } => {
                let (u, v) = (lhs.as_ref(), rhs.as_ref());
                match op {
                    BinaryOp::Add => add(u.derivative(), v.derivative()),
                    BinaryOp::Sub => sub(u.derivative(), v.derivative()),
                    BinaryOp::Mul => add(
                        mul(u.derivative(), v.clone()),
                        mul(u.clone(), v.derivative()),
                    ),
                    BinaryOp::Div => div(
                        sub(
                            mul(u.derivative(), v.clone()),
                            mul(u.clone(), v.derivative()),
                        ),
                        pow(v.clone(), Expr::Number(2.0)),
                    ),
                    BinaryOp::Pow => power_rule(u, v),
                }
            }
            Expr::Call { func, arg } => mul(outer_derivative(*func, arg), arg.derivative()),
        }
    }

    /// Derivative of the given order; order 0 is the expression itself.
    pub fn nth_derivative(&self, order: usize) -> Expr {
        let mut current = self.clone();
        for _ in 0..order {
            current = current.derivative();
        }
        current
    }
}

fn power_rule(u: &Expr, v: &Expr) -> Expr {
    if !v.depends_on_x() {
        // d(u^c) = c*u^(c - 1)*u'
        let reduced = sub(v.clone(), Expr::Number(1.0));
        return mul(mul(v.clone(), pow(u.clone(), reduced)), u.derivative());
    }

    if !u.depends_on_x() {
        // d(a^v) = a^v*ln(a)*v'
        return mul(
            mul(pow(u.clone(), v.clone()), call(Function::Ln, u.clone())),
            v.derivative(),
        );
    }

    // d(u^v) = u^v*(v'*ln(u) + v*u'/u)
    mul(
        pow(u.clone(), v.clone()),
        add(
            mul(v.derivative(), call(Function::Ln, u.clone())),
            div(mul(v.clone(), u.derivative()), u.clone()),
        ),
    )
}

/// f'(u) for an elementary function f, before the chain-rule factor u'.
fn outer_derivative(func: Function, u: &Expr) -> Expr {
    let u = u.clone();
    let one = || Expr::Number(1.0);
    let square = |e: Expr| pow(e, Expr::Number(2.0));

    match func {
        Function::Sin => call(Function::Cos, u),
        Function::Cos => neg(call(Function::Sin, u)),
        Function::Tan => div(one(), square(call(Function::Cos, u))),
        Function::Asin => div(one(), call(Function::Sqrt, sub(one(), square(u)))),
        Function::Acos => neg(div(one(), call(Function::Sqrt, sub(one(), square(u))))),
        Function::Atan => div(one(), add(one(), square(u))),
        Function::Sinh => call(Function::Cosh, u),
        Function::Cosh => call(Function::Sinh, u),
        Function::Tanh => sub(one(), square(call(Function::Tanh, u))),
        Function::Exp => call(Function::Exp, u),
        Function::Ln => div(one(), u),
        Function::Log10 => div(one(), mul(u, Expr::Number(std::f64::consts::LN_10))),
        Function::Log2 => div(one(), mul(u, Expr::Number(std::f64::consts::LN_2))),
        Function::Sqrt => div(one(), mul(Expr::Number(2.0), call(Function::Sqrt, u))),
        Function::Abs => call(Function::Sign, u),
        Function::Sign => Expr::Number(0.0),
    }
}

fn is_number(e: &Expr, value: f64) -> bool {
    e.as_number() == Some(value)
}

fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Expr {
    if let (Some(a), Some(b)) = (lhs.as_number(), rhs.as_number()) {
        let folded = op.apply(a, b);
        if folded.is_finite() {
            return Expr::Number(folded);
        }
    }
    Expr::Binary {
        op,
        lhs: Box::new(lhs),
        rhs: Box::new(rhs),
    }
}

fn add(lhs: Expr, rhs: Expr) -> Expr {
    if is_number(&lhs, 0.0) {
        return rhs;
    }
    if is_number(&rhs, 0.0) {
        return lhs;
    }
    binary(BinaryOp::Add, lhs, rhs)
}

fn sub(lhs: Expr, rhs: Expr) -> Expr {
    if is_number(&rhs, 0.0) {
        return lhs;
    }
    if is_number(&lhs, 0.0) {
        return neg(rhs);
    }
    binary(BinaryOp::Sub, lhs, rhs)
}

fn mul(lhs: Expr, rhs: Expr) -> Expr {
    if is_number(&lhs, 0.0) || is_number(&rhs, 0.0) {
        return Expr::Number(0.0);
    }
    if is_number(&lhs, 1.0) {
        return rhs;
    }
    if is_number(&rhs, 1.0) {
        return lhs;
    }
    binary(BinaryOp::Mul, lhs, rhs)
}

fn div(lhs: Expr, rhs: Expr) -> Expr {
    if is_number(&rhs, 1.0) {
        return lhs;
    }
    if is_number(&lhs, 0.0) && !is_number(&rhs, 0.0) {
        return Expr::Number(0.0);
    }
    binary(BinaryOp::Div, lhs, rhs)
}

fn pow(base: Expr, exponent: Expr) -> Expr {
    if is_number(&exponent, 1.0) {
        return base;
    }
    if is_number(&exponent, 0.0) {
        return Expr::Number(1.0);
    }
    binary(BinaryOp::Pow, base, exponent)
}

fn neg(inner: Expr) -> Expr {
    match inner {
        Expr::Number(v) => Expr::Number(-v),
        Expr::Neg(e) => *e,
        other => Expr::Neg(Box::new(other)),
    }
}

fn call(func: Function, arg: Expr) -> Expr {
    if let Some(v) = arg.as_number() {
        let folded = func.apply(v);
        if folded.is_finite() {
            return Expr::Number(folded);
        }
    }
    Expr::Call {
        func,
        arg: Box::new(arg),
    }
}
