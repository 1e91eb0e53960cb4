//! LaTeX rendering of symbolic expressions.
//!
//! `Expr::to_latex` produces the bare formula, `latex_description` wraps it
//! into the display-math form "$$f(x,y) = ...$$" that front ends feed to a
//! formula renderer.

use crate::symbolic::symbolic_engine::Expr;
use itertools::Itertools;

impl Expr {
    /// Renders the expression as LaTeX source (without surrounding `$`).
    pub fn to_latex(&self) -> String {
        match self {
            Expr::Var(name) => name.clone(),
            Expr::Const(val) => {
                if *val == val.floor() && val.abs() < 1e15 {
                    format!("{}", *val as i64)
                } else {
                    format!("{}", val)
                }
            }
            Expr::Add(lhs, rhs) => format!("{} + {}", lhs.to_latex(), rhs.to_latex()),
            Expr::Sub(lhs, rhs) => {
                format!("{} - {}", lhs.to_latex(), rhs.latex_grouped_additive())
            }
            Expr::Mul(lhs, rhs) => {
                format!(
                    "{} \\cdot {}",
                    lhs.latex_grouped_additive(),
                    rhs.latex_grouped_additive()
                )
            }
            Expr::Div(numer, denom) => {
                format!("\\frac{{{}}}{{{}}}", numer.to_latex(), denom.to_latex())
            }
            Expr::Pow(base, exponent) => {
                format!("{{{}}}^{{{}}}", base.latex_grouped_tight(), exponent.to_latex())
            }
            Expr::Exp(arg) => format!("e^{{{}}}", arg.to_latex()),
            Expr::Ln(arg) => format!("\\ln\\left({}\\right)", arg.to_latex()),
            Expr::sin(arg) => format!("\\sin\\left({}\\right)", arg.to_latex()),
            Expr::cos(arg) => format!("\\cos\\left({}\\right)", arg.to_latex()),
            Expr::tg(arg) => format!("\\tan\\left({}\\right)", arg.to_latex()),
            Expr::ctg(arg) => format!("\\cot\\left({}\\right)", arg.to_latex()),
            Expr::arcsin(arg) => format!("\\arcsin\\left({}\\right)", arg.to_latex()),
            Expr::arccos(arg) => format!("\\arccos\\left({}\\right)", arg.to_latex()),
            Expr::arctg(arg) => format!("\\arctan\\left({}\\right)", arg.to_latex()),
            Expr::arcctg(arg) => {
                format!("\\operatorname{{arccot}}\\left({}\\right)", arg.to_latex())
            }
        }
    }

    /// Like `to_latex`, but wraps sums and differences in brackets so they
    /// survive as the operand of a product or a subtrahend.
    fn latex_grouped_additive(&self) -> String {
        match self {
            Expr::Add(_, _) | Expr::Sub(_, _) => {
                format!("\\left({}\\right)", self.to_latex())
            }
            _ => self.to_latex(),
        }
    }

    /// Brackets everything that is not a single symbol or number, for use as
    /// the base of a power.
    fn latex_grouped_tight(&self) -> String {
        match self {
            Expr::Var(_) | Expr::Const(_) => self.to_latex(),
            _ => format!("\\left({}\\right)", self.to_latex()),
        }
    }
}

/// Builds the full "$$f(x) = ...$$" description for a simplified expression
/// over its free symbols. Variables join with a bare comma; no free symbols
/// leaves an empty argument list, "$$f() = ...$$".
pub fn latex_description(expr: &Expr, free_symbols: &[String]) -> String {
    format!(
        "$$f({}) = {}$$",
        free_symbols.iter().join(","),
        expr.to_latex()
    )
}
