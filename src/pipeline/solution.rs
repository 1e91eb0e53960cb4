//! The record a plotting request resolves into.

use crate::symbolic::symbolic_engine::Expr;
use serde::{Serialize, Serializer};

fn expr_as_string<S: Serializer>(expr: &Option<Expr>, serializer: S) -> Result<S::Ok, S::Error> {
    match expr {
        Some(e) => serializer.serialize_some(&e.to_string()),
        None => serializer.serialize_none(),
    }
}

/// Accumulated result of parsing, simplifying and rendering one input string.
///
/// Every stage writes its outcome here and reads what earlier stages left
/// behind; failures land in `errors` while the remaining fields keep whatever
/// was produced before the failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Solution {
    /// The expression part of the input, with any limit suffix removed.
    pub input: String,
    /// Plot range taken from a trailing "[lo, hi]" suffix, if one was given.
    pub limits: Option<[f64; 2]>,
    /// Human-readable messages from every stage that failed.
    pub errors: Vec<String>,
    /// The simplified expression, present once parsing succeeded.
    #[serde(serialize_with = "expr_as_string")]
    pub symbolic_function: Option<Expr>,
    /// Free variables of the expression, sorted alphabetically.
    pub free_symbols: Vec<String>,
    /// Display-math description of the function, e.g. "$$f(x) = {x}^{2}$$".
    pub latex_description: Option<String>,
    /// Rendered figure as a "data:image/png;base64,..." URI.
    pub figure: Option<String>,
}

impl Solution {
    pub fn new(input: String) -> Self {
        Solution {
            input,
            limits: None,
            errors: Vec::new(),
            symbolic_function: None,
            free_symbols: Vec::new(),
            latex_description: None,
            figure: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_solution_is_empty() {
        let solution = Solution::new("x^2".to_string());
        assert_eq!(solution.input, "x^2");
        assert!(solution.errors.is_empty());
        assert!(solution.symbolic_function.is_none());
        assert!(solution.figure.is_none());
    }

    #[test]
    fn test_serializes_expression_as_string() {
        let mut solution = Solution::new("x+1".to_string());
        solution.symbolic_function = Some(Expr::parse_expression("x+1").unwrap());
        solution.free_symbols = vec!["x".to_string()];
        let json = serde_json::to_value(&solution).unwrap();
        assert_eq!(json["symbolic_function"], "(x + 1)");
        assert_eq!(json["free_symbols"][0], "x");
        assert!(json["limits"].is_null());
    }
}
