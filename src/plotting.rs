//! # Plotting
//!
//! Rendering of symbolic expressions into PNG figures: a 2D curve for one
//! free variable, a 3D surface for two. Figures are drawn into an in-memory
//! buffer and returned as base64 data URIs, there is no file or window
//! output.
//!
//! - `plot_config` - explicit per-call rendering parameters
//! - `diagram` - curve and surface rendering, PNG encoding

pub mod diagram;
pub mod plot_config;
