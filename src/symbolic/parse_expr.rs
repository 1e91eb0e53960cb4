//! Turns a string expression into a symbolic expression.
//!
//! The parser is a recursive splitter: each call finds the weakest-binding
//! operator outside brackets and recurses into both halves.
//!
//! ```text
//!              "y^2+exp(x)/3"
//!              |  split by + |
//!              | y^2 | exp(x)/3 |
//!              | ^   |  /       |
//!              | y,2 | exp(x),3 |
//!               etc...
//! ```
//!
//! On top of the plain grammar (`+ - * / ^`, function calls, parentheses) a
//! preprocessing pass supports the notation users type into a plot field:
//! implicit multiplication (`2x`, `2(x+1)`, `(a)(b)`), and the names `e` and
//! `pi` bound to their numeric constants.

use crate::symbolic::symbolic_engine::Expr;
use crate::symbolic::utils::{
    find_char_positions_outside_brackets, find_pair_to_this_bracket,
    find_rightmost_operator_outside_brackets,
};
use log::debug;
use std::f64::consts::{E, PI};

/// Function-call heads understood by the parser, longest names first so that
/// "arcsin(" is never matched by the "sin" entry.
const FUNCTION_HEADS: &[(&str, fn(Box<Expr>) -> Expr)] = &[
    ("arcsin", Expr::arcsin),
    ("arccos", Expr::arccos),
    ("arctan", Expr::arctg),
    ("arcctg", Expr::arcctg),
    ("arctg", Expr::arctg),
    ("asin", Expr::arcsin),
    ("acos", Expr::arccos),
    ("atan", Expr::arctg),
    ("acot", Expr::arcctg),
    ("sin", Expr::sin),
    ("cos", Expr::cos),
    ("tan", Expr::tg),
    ("ctg", Expr::ctg),
    ("cot", Expr::ctg),
    ("tg", Expr::tg),
    ("exp", Expr::Exp),
    ("log", Expr::Ln),
    ("ln", Expr::Ln),
];

/// Normalizes raw user input before parsing.
///
/// Whitespace is collapsed, except between two alphabetic tokens where a
/// single space is kept: "bad syntax" must stay malformed instead of turning
/// into the variable "badsyntax". Implicit multiplication signs are inserted
/// between a number and a following name or bracket, and between adjacent
/// bracket groups. The exponent of a scientific literal ("1e-5") is left
/// alone.
pub fn prepare_input(raw: &str) -> String {
    let chars: Vec<char> = raw.trim().chars().collect();

    let mut squeezed: Vec<char> = Vec::with_capacity(chars.len());
    let mut i = 0;
    while i < chars.len() {
        if chars[i].is_whitespace() {
            let prev = squeezed.last().copied();
            let next = chars[i..].iter().find(|c| !c.is_whitespace()).copied();
            if let (Some(p), Some(n)) = (prev, next) {
                if p.is_alphabetic() && n.is_alphabetic() {
                    squeezed.push(' ');
                }
            }
            while i < chars.len() && chars[i].is_whitespace() {
                i += 1;
            }
            continue;
        }
        squeezed.push(chars[i]);
        i += 1;
    }

    let mut out = String::with_capacity(squeezed.len() + 4);
    for (i, &c) in squeezed.iter().enumerate() {
        if i > 0 {
            let prev = squeezed[i - 1];
            let digit_like = prev.is_ascii_digit() || prev == '.';
            let scientific = (c == 'e' || c == 'E')
                && prev.is_ascii_digit()
                && matches!(squeezed.get(i + 1), Some(&n) if n.is_ascii_digit() || n == '+' || n == '-');
            let implicit = (digit_like && c.is_alphabetic() && !scientific)
                || (digit_like && c == '(')
                || (prev == ')' && (c.is_alphanumeric() || c == '('));
            if implicit {
                out.push('*');
            }
        }
        out.push(c);
    }
    out
}

/// Rightmost binary +/- outside brackets, as a byte offset so the caller
/// can slice inputs with multi-byte variable names. A sign right after
/// another operator (or at the start) is unary and does not split; the sign
/// of a scientific exponent ("1e-5") does not split either.
fn find_additive_split(input: &str) -> Option<(usize, char)> {
    let chars: Vec<(usize, char)> = input.char_indices().collect();
    let mut depth = 0usize;
    let mut last = None;

    for (k, &(pos, c)) in chars.iter().enumerate() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            '+' | '-' if depth == 0 => {
                let prev = if k > 0 { Some(chars[k - 1].1) } else { None };
                let unary = matches!(
                    prev,
                    None | Some('*') | Some('/') | Some('^') | Some('+') | Some('-')
                );
                let exponent_sign = matches!(prev, Some('e') | Some('E'))
                    && k >= 2
                    && chars[k - 2].1.is_ascii_digit()
                    && matches!(chars.get(k + 1), Some(&(_, n)) if n.is_ascii_digit());
                if !unary && !exponent_sign {
                    last = Some((pos, c));
                }
            }
            _ => {}
        }
    }
    last
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_')
}

/// Parses one (already normalized) expression fragment.
pub fn parse_expression_func(input: &str) -> Result<Expr, String> {
    let input = input.trim();
    debug!("parsing fragment: {}", input);
    if input.is_empty() {
        return Err("empty expression fragment".to_string());
    }

    // complete numeric literal, covers scientific notation like 1e-5
    if let Ok(value) = input.parse::<f64>() {
        return Ok(Expr::Const(value));
    }

    // addition and subtraction: split at the rightmost binary +/- so that
    // same-precedence chains stay left-associative
    if let Some((pos, op)) = find_additive_split(input) {
        let lhs = parse_expression_func(&input[..pos])?;
        let rhs = parse_expression_func(&input[pos + 1..])?;
        return Ok(if op == '+' { lhs + rhs } else { lhs - rhs });
    }

    // leading unary sign
    if let Some(rest) = input.strip_prefix('-') {
        return Ok(-parse_expression_func(rest)?);
    }
    if let Some(rest) = input.strip_prefix('+') {
        return parse_expression_func(rest);
    }

    // multiplication and division
    if let Some((pos, op)) = find_rightmost_operator_outside_brackets(input, &['*', '/']) {
        let lhs = parse_expression_func(&input[..pos])?;
        let rhs = parse_expression_func(&input[pos + 1..])?;
        return Ok(if op == '*' { lhs * rhs } else { lhs / rhs });
    }

    // power, split at the leftmost '^' for right associativity
    if let Some(pos) = find_char_positions_outside_brackets(input, '^') {
        let base = parse_expression_func(&input[..pos])?;
        let exponent = parse_expression_func(&input[pos + 1..])?;
        return Ok(Expr::Pow(Box::new(base), Box::new(exponent)));
    }

    // function calls: head name followed by a bracket group closing at the end
    for &(name, constructor) in FUNCTION_HEADS {
        if let Some(rest) = input.strip_prefix(name) {
            if rest.starts_with('(') {
                match find_pair_to_this_bracket(input, name.len()) {
                    Some(close) if close == input.len() - 1 => {
                        let inner = parse_expression_func(&input[name.len() + 1..close])?;
                        return Ok(constructor(Box::new(inner)));
                    }
                    _ => return Err(format!("unbalanced brackets in '{}'", input)),
                }
            }
        }
    }

    // named constants, then plain variables
    match input {
        "e" => return Ok(Expr::Const(E)),
        "pi" | "Pi" | "PI" => return Ok(Expr::Const(PI)),
        _ => {}
    }
    if is_identifier(input) {
        return Ok(Expr::Var(input.to_string()));
    }

    // an expression fully wrapped in brackets
    if input.starts_with('(') && input.ends_with(')') {
        if let Some(close) = find_pair_to_this_bracket(input, 0) {
            if close == input.len() - 1 {
                return parse_expression_func(&input[1..close]);
            }
        }
    }

    Err(format!("invalid expression fragment '{}'", input))
}

impl Expr {
    /// Parses a mathematical expression from string representation.
    ///
    /// # Supported Syntax
    /// - Variables: x, y, var_name
    /// - Constants: 3.14, -2.5, 1e-6, e, pi
    /// - Operators: +, -, *, /, ^ and implicit multiplication (2x, 2(x+1))
    /// - Functions: sin, cos, tan, exp, ln, arcsin, ... with parentheses
    ///
    /// # Examples
    /// ```
    /// use funplot::symbolic::symbolic_engine::Expr;
    /// let expr = Expr::parse_expression("x^2 + 2*x + 1").unwrap();
    /// assert_eq!(expr.all_arguments_are_variables(), vec!["x"]);
    /// ```
    pub fn parse_expression(input: &str) -> Result<Expr, String> {
        let prepared = prepare_input(input);
        parse_expression_func(&prepared)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_constant() {
        let expr = Expr::parse_expression("42").unwrap();
        assert_eq!(expr, Expr::Const(42.0));
    }

    #[test]
    fn test_parse_variable() {
        let expr = Expr::parse_expression("x").unwrap();
        assert_eq!(expr, Expr::Var("x".to_string()));
    }

    #[test]
    fn test_parse_addition() {
        let expr = Expr::parse_expression("x + 2").unwrap();
        assert_eq!(
            expr,
            Expr::Add(
                Box::new(Expr::Var("x".to_string())),
                Box::new(Expr::Const(2.0))
            )
        );
    }

    #[test]
    fn test_parse_power() {
        let expr = Expr::parse_expression("x^2").unwrap();
        assert_eq!(
            expr,
            Expr::Pow(
                Box::new(Expr::Var("x".to_string())),
                Box::new(Expr::Const(2.0))
            )
        );
    }

    #[test]
    fn test_parse_spec_polynomial() {
        let expr = Expr::parse_expression("x^2-3").unwrap();
        let x = Box::new(Expr::Var("x".to_string()));
        let expected = Expr::Sub(
            Box::new(Expr::Pow(x, Box::new(Expr::Const(2.0)))),
            Box::new(Expr::Const(3.0)),
        );
        assert_eq!(expr, expected);
    }

    #[test]
    fn test_left_associative_chain() {
        // x - 1 - 2 must be (x - 1) - 2
        let expr = Expr::parse_expression("x - 1 - 2").unwrap();
        assert_relative_eq!(expr.eval_expression(&["x"], &[10.0]), 7.0);
    }

    #[test]
    fn test_parse_exponential() {
        let expr = Expr::parse_expression("exp(x)").unwrap();
        assert_eq!(expr, Expr::Exp(Box::new(Expr::Var("x".to_string()))));
    }

    #[test]
    fn test_parse_logarithm_aliases() {
        let expr = Expr::parse_expression("log(x)").unwrap();
        assert_eq!(expr, Expr::Ln(Box::new(Expr::Var("x".to_string()))));
        let expr = Expr::parse_expression("ln(x)").unwrap();
        assert_eq!(expr, Expr::Ln(Box::new(Expr::Var("x".to_string()))));
    }

    #[test]
    fn test_parse_trig_aliases() {
        let expr = Expr::parse_expression("tan(x)").unwrap();
        assert_eq!(expr, Expr::tg(Box::new(Expr::Var("x".to_string()))));
        let expr = Expr::parse_expression("arctan(x)").unwrap();
        assert_eq!(expr, Expr::arctg(Box::new(Expr::Var("x".to_string()))));
    }

    #[test]
    fn test_parse_nested_functions() {
        let expr = Expr::parse_expression("sin(cos(x))").unwrap();
        assert_eq!(
            expr,
            Expr::sin(Box::new(Expr::cos(Box::new(Expr::Var("x".to_string())))))
        );
    }

    #[test]
    fn test_parse_brackets() {
        let expr = Expr::parse_expression("(x + y) * z").unwrap();
        assert_eq!(
            expr,
            Expr::Mul(
                Box::new(Expr::Add(
                    Box::new(Expr::Var("x".to_string())),
                    Box::new(Expr::Var("y".to_string()))
                )),
                Box::new(Expr::Var("z".to_string()))
            )
        );
    }

    #[test]
    fn test_implicit_multiplication_digit_name() {
        let expr = Expr::parse_expression("2x").unwrap();
        assert_eq!(
            expr,
            Expr::Mul(
                Box::new(Expr::Const(2.0)),
                Box::new(Expr::Var("x".to_string()))
            )
        );
    }

    #[test]
    fn test_implicit_multiplication_digit_bracket() {
        let expr = Expr::parse_expression("2(x+1)").unwrap();
        assert_relative_eq!(expr.eval_expression(&["x"], &[3.0]), 8.0);
    }

    #[test]
    fn test_implicit_multiplication_bracket_groups() {
        let expr = Expr::parse_expression("(x+1)(x-1)").unwrap();
        assert_relative_eq!(expr.eval_expression(&["x"], &[3.0]), 8.0);
    }

    #[test]
    fn test_implicit_multiplication_digit_function() {
        let expr = Expr::parse_expression("3sin(x)").unwrap();
        assert_relative_eq!(
            expr.eval_expression(&["x"], &[std::f64::consts::FRAC_PI_2]),
            3.0
        );
    }

    #[test]
    fn test_euler_constant_binding() {
        let expr = Expr::parse_expression("e").unwrap();
        assert_eq!(expr, Expr::Const(E));
        let expr = Expr::parse_expression("2e").unwrap();
        assert_relative_eq!(expr.eval_expression(&[], &[]), 2.0 * E);
    }

    #[test]
    fn test_scientific_notation_untouched() {
        let expr = Expr::parse_expression("1e-5").unwrap();
        assert_eq!(expr, Expr::Const(1e-5));
    }

    #[test]
    fn test_pi_binding() {
        let expr = Expr::parse_expression("pi").unwrap();
        assert_eq!(expr, Expr::Const(PI));
    }

    #[test]
    fn test_unary_minus() {
        let expr = Expr::parse_expression("-x").unwrap();
        assert_relative_eq!(expr.eval_expression(&["x"], &[4.0]), -4.0);
        let expr = Expr::parse_expression("x*-2").unwrap();
        assert_relative_eq!(expr.eval_expression(&["x"], &[4.0]), -8.0);
    }

    #[test]
    fn test_unary_minus_binds_weaker_than_power() {
        let expr = Expr::parse_expression("-x^2").unwrap();
        assert_relative_eq!(expr.eval_expression(&["x"], &[3.0]), -9.0);
    }

    #[test]
    fn test_power_right_associative() {
        let expr = Expr::parse_expression("2^3^2").unwrap();
        assert_relative_eq!(expr.eval_expression(&[], &[]), 512.0);
    }

    #[test]
    fn test_non_ascii_variable_names() {
        // multi-byte identifiers must split cleanly around the operators
        let expr = Expr::parse_expression("π+1").unwrap();
        assert_eq!(
            expr,
            Expr::Add(
                Box::new(Expr::Var("π".to_string())),
                Box::new(Expr::Const(1.0))
            )
        );
        let expr = Expr::parse_expression("sin(φ)*2").unwrap();
        assert_relative_eq!(expr.eval_expression(&["φ"], &[0.0]), 0.0);
    }

    #[test]
    fn test_invalid_expression() {
        assert!(Expr::parse_expression("(x +").is_err());
        assert!(Expr::parse_expression("x +").is_err());
        assert!(Expr::parse_expression("").is_err());
    }

    #[test]
    fn test_bad_syntax_sentinel_fails() {
        // two bare words separated by a space are not an expression
        assert!(Expr::parse_expression("bad syntax").is_err());
    }
}
