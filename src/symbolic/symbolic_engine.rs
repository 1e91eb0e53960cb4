//! # Symbolic Engine Module
//!
//! Core symbolic mathematics for the plotting pipeline: an expression tree
//! (`Expr`), free-variable extraction, direct evaluation and conversion of
//! expressions into plain Rust closures ("lambdification") used by the
//! diagram generator to sample curves and surfaces.
//!
//! ## Main Structures and Methods
//!
//! ### `Expr` Enum
//! - **Variables**: `Var(String)` - symbolic variables like "x", "y"
//! - **Constants**: `Const(f64)` - numerical constants
//! - **Operations**: `Add`, `Sub`, `Mul`, `Div`, `Pow` - basic arithmetic
//! - **Functions**: `Exp`, `Ln`, `sin`, `cos`, etc. - mathematical functions
//!
//! ### Key Methods
//! - `all_arguments_are_variables()` - sorted, deduplicated free variables
//! - `eval_expression()` - one-shot numerical evaluation
//! - `lambdify1D()` / `lambdify2D()` - executable closures for sampling
//!
//! Trigonometric variants use mathematical notation (tg, ctg) rather than
//! programming conventions (tan, cot).

#![allow(non_camel_case_types)]

use std::f64::consts::PI;
use std::fmt;

/// Symbolic expression tree. Uses Box<Expr> for recursive structure,
/// enabling arbitrarily nested mathematical formulas.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// Symbolic variable with a name (e.g., "x", "y")
    Var(String),
    /// Numerical constant value
    Const(f64),
    /// Addition operation: left + right
    Add(Box<Expr>, Box<Expr>),
    /// Subtraction operation: left - right
    Sub(Box<Expr>, Box<Expr>),
    /// Multiplication operation: left * right
    Mul(Box<Expr>, Box<Expr>),
    /// Division operation: left / right
    Div(Box<Expr>, Box<Expr>),
    /// Power operation: base ^ exponent
    Pow(Box<Expr>, Box<Expr>),
    /// Exponential function: e^x
    Exp(Box<Expr>),
    /// Natural logarithm: ln(x)
    Ln(Box<Expr>),
    /// Sine function: sin(x)
    sin(Box<Expr>),
    /// Cosine function: cos(x)
    cos(Box<Expr>),
    /// Tangent function, mathematical notation 'tg'
    tg(Box<Expr>),
    /// Cotangent function, mathematical notation 'ctg'
    ctg(Box<Expr>),
    /// Arcsine function
    arcsin(Box<Expr>),
    /// Arccosine function
    arccos(Box<Expr>),
    /// Arctangent function, mathematical notation 'arctg'
    arctg(Box<Expr>),
    /// Arccotangent function, mathematical notation 'arcctg'
    arcctg(Box<Expr>),
}

/// Pretty printing with parentheses for proper precedence.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Var(name) => write!(f, "{}", name),
            Expr::Const(val) => write!(f, "{}", val),
            Expr::Add(lhs, rhs) => write!(f, "({} + {})", lhs, rhs),
            Expr::Sub(lhs, rhs) => write!(f, "({} - {})", lhs, rhs),
            Expr::Mul(lhs, rhs) => write!(f, "({} * {})", lhs, rhs),
            Expr::Div(lhs, rhs) => write!(f, "({} / {})", lhs, rhs),
            Expr::Pow(base, exp) => write!(f, "({} ^ {})", base, exp),
            Expr::Exp(expr) => write!(f, "exp({})", expr),
            Expr::Ln(expr) => write!(f, "ln({})", expr),
            Expr::sin(expr) => write!(f, "sin({})", expr),
            Expr::cos(expr) => write!(f, "cos({})", expr),
            Expr::tg(expr) => write!(f, "tg({})", expr),
            Expr::ctg(expr) => write!(f, "ctg({})", expr),
            Expr::arcsin(expr) => write!(f, "arcsin({})", expr),
            Expr::arccos(expr) => write!(f, "arccos({})", expr),
            Expr::arctg(expr) => write!(f, "arctg({})", expr),
            Expr::arcctg(expr) => write!(f, "arcctg({})", expr),
        }
    }
}

impl std::ops::Add for Expr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Expr::Add(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Sub for Expr {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Expr::Sub(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Mul for Expr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Expr::Mul(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Div for Expr {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        Expr::Div(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Neg for Expr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Expr::Mul(Box::new(Expr::Const(-1.0)), Box::new(self))
    }
}

impl Expr {
    /// Creates multiple symbolic variables from a comma-separated string.
    ///
    /// # Examples
    /// ```
    /// use funplot::symbolic::symbolic_engine::Expr;
    /// let vars = Expr::Symbols("x, y");
    /// assert_eq!(vars.len(), 2);
    /// ```
    #[allow(non_snake_case)]
    pub fn Symbols(symbols: &str) -> Vec<Expr> {
        symbols
            .split(',')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|s| Expr::Var(s.to_string()))
            .collect()
    }

    /// Convenience method to wrap expression in Box for recursive structures.
    pub fn boxed(self) -> Box<Self> {
        Box::new(self)
    }

    /// Creates power expression self^rhs.
    pub fn pow(mut self, rhs: Expr) -> Expr {
        self = Expr::Pow(self.boxed(), rhs.boxed());
        self
    }

    /// Extracts all unique variable names from the expression.
    ///
    /// Recursive traversal of the tree; the result is sorted alphabetically
    /// and deduplicated, so the ordering is stable for a given expression.
    ///
    /// # Examples
    /// ```
    /// use funplot::symbolic::symbolic_engine::Expr;
    /// let expr = Expr::parse_expression("x^2 + y*x").unwrap();
    /// assert_eq!(expr.all_arguments_are_variables(), vec!["x", "y"]);
    /// ```
    pub fn all_arguments_are_variables(&self) -> Vec<String> {
        let mut vars = Vec::new();

        match self {
            Expr::Var(name) => {
                vars.push(name.clone());
            }
            Expr::Const(_) => {}
            Expr::Add(lhs, rhs)
            | Expr::Sub(lhs, rhs)
            | Expr::Mul(lhs, rhs)
            | Expr::Div(lhs, rhs)
            | Expr::Pow(lhs, rhs) => {
                vars.extend(lhs.all_arguments_are_variables());
                vars.extend(rhs.all_arguments_are_variables());
            }
            Expr::Exp(expr) | Expr::Ln(expr) => {
                vars.extend(expr.all_arguments_are_variables());
            }
            Expr::sin(expr) | Expr::cos(expr) | Expr::tg(expr) | Expr::ctg(expr) => {
                vars.extend(expr.all_arguments_are_variables());
            }
            Expr::arcsin(expr) | Expr::arccos(expr) | Expr::arctg(expr) | Expr::arcctg(expr) => {
                vars.extend(expr.all_arguments_are_variables());
            }
        }

        vars.sort();
        vars.dedup();
        vars
    }

    /// Evaluates the expression directly without creating a closure.
    ///
    /// # Arguments
    /// * `vars` - Variable names in order matching the values slice
    /// * `values` - Numerical values for each variable
    ///
    /// Use lambdify for repeated evaluation, eval_expression for one-time use.
    pub fn eval_expression(&self, vars: &[&str], values: &[f64]) -> f64 {
        match self {
            Expr::Var(name) => {
                let index = vars
                    .iter()
                    .position(|&x| x == name)
                    .unwrap_or_else(|| panic!("unknown variable {} in evaluation", name));
                values[index]
            }
            Expr::Const(val) => *val,
            Expr::Add(lhs, rhs) => {
                lhs.eval_expression(vars, values) + rhs.eval_expression(vars, values)
            }
            Expr::Sub(lhs, rhs) => {
                lhs.eval_expression(vars, values) - rhs.eval_expression(vars, values)
            }
            Expr::Mul(lhs, rhs) => {
                lhs.eval_expression(vars, values) * rhs.eval_expression(vars, values)
            }
            Expr::Div(lhs, rhs) => {
                lhs.eval_expression(vars, values) / rhs.eval_expression(vars, values)
            }
            Expr::Pow(base, exp) => base
                .eval_expression(vars, values)
                .powf(exp.eval_expression(vars, values)),
            Expr::Exp(expr) => expr.eval_expression(vars, values).exp(),
            Expr::Ln(expr) => expr.eval_expression(vars, values).ln(),
            Expr::sin(expr) => expr.eval_expression(vars, values).sin(),
            Expr::cos(expr) => expr.eval_expression(vars, values).cos(),
            Expr::tg(expr) => expr.eval_expression(vars, values).tan(),
            Expr::ctg(expr) => 1.0 / expr.eval_expression(vars, values).tan(),
            Expr::arcsin(expr) => expr.eval_expression(vars, values).asin(),
            Expr::arccos(expr) => expr.eval_expression(vars, values).acos(),
            Expr::arctg(expr) => expr.eval_expression(vars, values).atan(),
            Expr::arcctg(expr) => PI / 2.0 - expr.eval_expression(vars, values).atan(),
        }
    }

    /// Converts the expression into an executable closure over a value slice.
    ///
    /// The recursion happens at build time; the resulting closure mirrors the
    /// expression tree and carries no parsing overhead.
    pub fn lambdify(&self, vars: &[&str]) -> Box<dyn Fn(&[f64]) -> f64> {
        match self {
            Expr::Var(name) => {
                let index = vars
                    .iter()
                    .position(|&v| v == name)
                    .unwrap_or_else(|| panic!("unknown variable {} in lambdify", name));
                Box::new(move |args| args[index])
            }
            Expr::Const(val) => {
                let val = *val;
                Box::new(move |_| val)
            }
            Expr::Add(lhs, rhs) => {
                let lf = lhs.lambdify(vars);
                let rf = rhs.lambdify(vars);
                Box::new(move |args| lf(args) + rf(args))
            }
            Expr::Sub(lhs, rhs) => {
                let lf = lhs.lambdify(vars);
                let rf = rhs.lambdify(vars);
                Box::new(move |args| lf(args) - rf(args))
            }
            Expr::Mul(lhs, rhs) => {
                let lf = lhs.lambdify(vars);
                let rf = rhs.lambdify(vars);
                Box::new(move |args| lf(args) * rf(args))
            }
            Expr::Div(lhs, rhs) => {
                let lf = lhs.lambdify(vars);
                let rf = rhs.lambdify(vars);
                Box::new(move |args| lf(args) / rf(args))
            }
            Expr::Pow(base, exp) => {
                let bf = base.lambdify(vars);
                let ef = exp.lambdify(vars);
                Box::new(move |args| bf(args).powf(ef(args)))
            }
            Expr::Exp(e) => {
                let f = e.lambdify(vars);
                Box::new(move |args| f(args).exp())
            }
            Expr::Ln(e) => {
                let f = e.lambdify(vars);
                Box::new(move |args| f(args).ln())
            }
            Expr::sin(e) => {
                let f = e.lambdify(vars);
                Box::new(move |args| f(args).sin())
            }
            Expr::cos(e) => {
                let f = e.lambdify(vars);
                Box::new(move |args| f(args).cos())
            }
            Expr::tg(e) => {
                let f = e.lambdify(vars);
                Box::new(move |args| f(args).tan())
            }
            Expr::ctg(e) => {
                let f = e.lambdify(vars);
                Box::new(move |args| 1.0 / f(args).tan())
            }
            Expr::arcsin(e) => {
                let f = e.lambdify(vars);
                Box::new(move |args| f(args).asin())
            }
            Expr::arccos(e) => {
                let f = e.lambdify(vars);
                Box::new(move |args| f(args).acos())
            }
            Expr::arctg(e) => {
                let f = e.lambdify(vars);
                Box::new(move |args| f(args).atan())
            }
            Expr::arcctg(e) => {
                let f = e.lambdify(vars);
                Box::new(move |args| (PI / 2.0) - f(args).atan())
            }
        }
    }

    /// Closure for a single-variable (or constant) expression, y = f(x).
    ///
    /// # Panics
    /// Panics when the expression has two or more free variables.
    #[allow(non_snake_case)]
    pub fn lambdify1D(&self) -> Box<dyn Fn(f64) -> f64> {
        let vars = self.all_arguments_are_variables();
        match vars.len() {
            0 => {
                let f = self.lambdify(&[]);
                Box::new(move |_| f(&[]))
            }
            1 => {
                let f = self.lambdify(&[vars[0].as_str()]);
                Box::new(move |x| f(&[x]))
            }
            _ => panic!(
                "lambdify1D can only be used with expressions containing at most one variable, found: {:?}",
                vars
            ),
        }
    }

    /// Closure for a two-variable expression, z = f(x, y). Argument order
    /// follows the alphabetical order of the free variables.
    ///
    /// # Panics
    /// Panics when the expression does not have exactly two free variables.
    #[allow(non_snake_case)]
    pub fn lambdify2D(&self) -> Box<dyn Fn(f64, f64) -> f64> {
        let vars = self.all_arguments_are_variables();
        assert!(
            vars.len() == 2,
            "lambdify2D requires exactly two variables, found: {:?}",
            vars
        );
        let f = self.lambdify(&[vars[0].as_str(), vars[1].as_str()]);
        Box::new(move |x, y| f(&[x, y]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_symbols() {
        let vars = Expr::Symbols("x, y, z");
        assert_eq!(vars.len(), 3);
        assert_eq!(vars[2], Expr::Var("z".to_string()));
    }

    #[test]
    fn test_display() {
        let x = Expr::Var("x".to_string());
        let expr = x.pow(Expr::Const(2.0)) - Expr::Const(3.0);
        assert_eq!(format!("{}", expr), "((x ^ 2) - 3)");
    }

    #[test]
    fn test_free_variables_sorted_dedup() {
        let x = Expr::Var("x".to_string());
        let y = Expr::Var("y".to_string());
        let expr = y * x.clone() + x;
        assert_eq!(expr.all_arguments_are_variables(), vec!["x", "y"]);
    }

    #[test]
    fn test_eval_expression() {
        let x = Expr::Var("x".to_string());
        let expr = x.clone() * x + Expr::Const(1.0);
        assert_relative_eq!(expr.eval_expression(&["x"], &[3.0]), 10.0);
    }

    #[test]
    fn test_lambdify1d_polynomial() {
        let x = Expr::Var("x".to_string());
        let expr = x.clone() * x.clone() + x * Expr::Const(2.0) + Expr::Const(1.0);
        let func = expr.lambdify1D();
        assert_relative_eq!(func(3.0), 16.0);
    }

    #[test]
    fn test_lambdify1d_constant() {
        let c = Expr::Const(42.0);
        let func = c.lambdify1D();
        assert_relative_eq!(func(100.0), 42.0);
    }

    #[test]
    fn test_lambdify1d_trigonometric() {
        let expr = Expr::sin(Expr::Var("x".to_string()).boxed());
        let func = expr.lambdify1D();
        assert_relative_eq!(func(PI / 2.0), 1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_lambdify2d() {
        let x = Expr::Var("x".to_string());
        let y = Expr::Var("y".to_string());
        let expr = x + y;
        let func = expr.lambdify2D();
        assert_relative_eq!(func(1.0, 2.0), 3.0);
    }

    #[test]
    #[should_panic(expected = "at most one variable")]
    fn test_lambdify1d_two_variables_panics() {
        let expr = Expr::Var("x".to_string()) + Expr::Var("y".to_string());
        let _ = expr.lambdify1D();
    }
}
