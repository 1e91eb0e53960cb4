#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
//! # funplot
//!
//! Backend helper for function plotting. Feed it a string like
//! "x^2-3 [-1, 4]" and get back a structured record with the simplified
//! symbolic expression, a LaTeX description, and the rendered figure as a
//! base64-encoded PNG data URI. Every failure is recorded on the record
//! instead of aborting, so a web handler can always return something useful.
//!
//! ```
//! use funplot::pipeline::parse_function::parse_function;
//!
//! let solution = parse_function("sin(x) [0, 6.28]");
//! assert_eq!(solution.free_symbols, vec!["x".to_string()]);
//! assert!(solution.figure.is_some());
//! ```

pub mod pipeline;
pub mod plotting;
pub mod symbolic;
