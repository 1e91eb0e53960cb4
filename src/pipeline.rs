//! # Pipeline
//!
//! Glue from a raw input string to a finished [`solution::Solution`]:
//! split off the plot range, parse and simplify, describe in LaTeX, render.
//!
//! ```
//! use funplot::pipeline::parse_function::parse_function;
//!
//! let solution = parse_function("x^2-3 [-1, 4]");
//! assert!(solution.errors.is_empty());
//! assert_eq!(solution.limits, Some([-1.0, 4.0]));
//! assert!(solution.figure.unwrap().starts_with("data:image/png;base64,"));
//! ```
//!
//! - `input_splitter` - peels a trailing "[lo, hi]" range off the input
//! - `parse_function` - the stage runner, [`parse_function::FunctionPlotter`]
//! - `solution` - the record every stage writes into

pub mod input_splitter;
pub mod parse_function;
pub mod solution;
