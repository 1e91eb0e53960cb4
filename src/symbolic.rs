//! # Symbolic engine
//!
//! A small computer-algebra core: expressions are a recursive [`symbolic_engine::Expr`]
//! enum, built directly, via operator overloading, or parsed from strings.
//!
//! ## Usage
//! ```
//! use funplot::symbolic::symbolic_engine::Expr;
//!
//! let expr = Expr::parse_expression("x^2 + 2x + 1").unwrap();
//! let simplified = expr.simplify_();
//! let f = simplified.lambdify1D();
//! assert!((f(1.0) - 4.0).abs() < 1e-12);
//! ```
//!
//! ## Content
//! - `symbolic_engine` - the expression type, evaluation and closure generation
//! - `parse_expr` - string to expression parsing with implicit multiplication
//! - `symbolic_simplify` - algebraic identity rules and constant folding
//! - `symbolic_latex` - LaTeX rendering of expressions
//! - `utils` - bracket-aware string scanning and sampling helpers

pub mod parse_expr;
pub mod symbolic_engine;
pub mod symbolic_latex;
pub mod symbolic_simplify;
pub mod utils;
