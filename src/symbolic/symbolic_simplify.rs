//! # Symbolic Expression Simplification
//!
//! Algebraic simplification applied to every parsed expression before it is
//! formatted and plotted. Combines constant folding with the usual identity
//! rules:
//!
//! - `x + 0 = x`, `x - 0 = x`, `x - x = 0`
//! - `x * 1 = x`, `x * 0 = 0`, `x / 1 = x`, `0 / x = 0`, `x / x = 1`
//! - `x^0 = 1`, `x^1 = x`, `1^x = 1`
//! - functions of constants are evaluated (`sin(0) = 0`, `exp(0) = 1`, ...)
//!
//! Simplification is purely structural; no term collection or expansion is
//! attempted, which is enough for display and sampling purposes.

use crate::symbolic::symbolic_engine::Expr;
use std::f64::consts::PI;

impl Expr {
    /// Recursively simplifies the expression.
    ///
    /// Subexpressions are simplified first, then identity rules and constant
    /// folding are applied at the current node. The result is a new tree;
    /// the original expression is untouched.
    pub fn simplify_(&self) -> Expr {
        match self {
            Expr::Var(_) => self.clone(),
            Expr::Const(_) => self.clone(),
            Expr::Add(lhs, rhs) => {
                let lhs = lhs.simplify_();
                let rhs = rhs.simplify_();
                match (&lhs, &rhs) {
                    (Expr::Const(a), Expr::Const(b)) => Expr::Const(a + b),
                    (Expr::Const(c), _) if *c == 0.0 => rhs,
                    (_, Expr::Const(c)) if *c == 0.0 => lhs,
                    _ => Expr::Add(Box::new(lhs), Box::new(rhs)),
                }
            }
            Expr::Sub(lhs, rhs) => {
                let lhs = lhs.simplify_();
                let rhs = rhs.simplify_();
                match (&lhs, &rhs) {
                    (Expr::Const(a), Expr::Const(b)) => Expr::Const(a - b),
                    (_, Expr::Const(c)) if *c == 0.0 => lhs,
                    _ if lhs == rhs => Expr::Const(0.0),
                    _ => Expr::Sub(Box::new(lhs), Box::new(rhs)),
                }
            }
            Expr::Mul(lhs, rhs) => {
                let lhs = lhs.simplify_();
                let rhs = rhs.simplify_();
                match (&lhs, &rhs) {
                    (Expr::Const(a), Expr::Const(b)) => Expr::Const(a * b),
                    (Expr::Const(c), _) | (_, Expr::Const(c)) if *c == 0.0 => Expr::Const(0.0),
                    (Expr::Const(c), _) if *c == 1.0 => rhs,
                    (_, Expr::Const(c)) if *c == 1.0 => lhs,
                    _ => Expr::Mul(Box::new(lhs), Box::new(rhs)),
                }
            }
            Expr::Div(lhs, rhs) => {
                let lhs = lhs.simplify_();
                let rhs = rhs.simplify_();
                match (&lhs, &rhs) {
                    (Expr::Const(a), Expr::Const(b)) if *b != 0.0 => Expr::Const(a / b),
                    (Expr::Const(c), _) if *c == 0.0 => Expr::Const(0.0),
                    (_, Expr::Const(c)) if *c == 1.0 => lhs,
                    _ if lhs == rhs => Expr::Const(1.0),
                    _ => Expr::Div(Box::new(lhs), Box::new(rhs)),
                }
            }
            Expr::Pow(base, exp) => {
                let base = base.simplify_();
                let exp = exp.simplify_();
                match (&base, &exp) {
                    (Expr::Const(a), Expr::Const(b)) => Expr::Const(a.powf(*b)),
                    (_, Expr::Const(c)) if *c == 0.0 => Expr::Const(1.0),
                    (_, Expr::Const(c)) if *c == 1.0 => base,
                    (Expr::Const(c), _) if *c == 1.0 => Expr::Const(1.0),
                    _ => Expr::Pow(Box::new(base), Box::new(exp)),
                }
            }
            Expr::Exp(expr) => match expr.simplify_() {
                Expr::Const(val) => Expr::Const(val.exp()),
                inner => Expr::Exp(Box::new(inner)),
            },
            Expr::Ln(expr) => match expr.simplify_() {
                Expr::Const(val) if val > 0.0 => Expr::Const(val.ln()),
                inner => Expr::Ln(Box::new(inner)),
            },
            Expr::sin(expr) => match expr.simplify_() {
                Expr::Const(val) => Expr::Const(val.sin()),
                inner => Expr::sin(Box::new(inner)),
            },
            Expr::cos(expr) => match expr.simplify_() {
                Expr::Const(val) => Expr::Const(val.cos()),
                inner => Expr::cos(Box::new(inner)),
            },
            Expr::tg(expr) => match expr.simplify_() {
                Expr::Const(val) => Expr::Const(val.tan()),
                inner => Expr::tg(Box::new(inner)),
            },
            Expr::ctg(expr) => match expr.simplify_() {
                Expr::Const(val) => Expr::Const(1.0 / val.tan()),
                inner => Expr::ctg(Box::new(inner)),
            },
            Expr::arcsin(expr) => match expr.simplify_() {
                Expr::Const(val) => Expr::Const(val.asin()),
                inner => Expr::arcsin(Box::new(inner)),
            },
            Expr::arccos(expr) => match expr.simplify_() {
                Expr::Const(val) => Expr::Const(val.acos()),
                inner => Expr::arccos(Box::new(inner)),
            },
            Expr::arctg(expr) => match expr.simplify_() {
                Expr::Const(val) => Expr::Const(val.atan()),
                inner => Expr::arctg(Box::new(inner)),
            },
            Expr::arcctg(expr) => match expr.simplify_() {
                Expr::Const(val) => Expr::Const(PI / 2.0 - val.atan()),
                inner => Expr::arcctg(Box::new(inner)),
            },
        }
    }
}
