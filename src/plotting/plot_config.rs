//! Rendering parameters for the diagram generator.

use plotters::style::RGBColor;

/// Explicit configuration for rendered figures. Every rendering call takes
/// one of these by reference, so concurrent callers can use different
/// settings without sharing mutable state.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotConfig {
    /// Bitmap width in pixels.
    pub width: u32,
    /// Bitmap height in pixels.
    pub height: u32,
    /// Sample count along the x axis of a 2D curve.
    pub curve_samples: usize,
    /// Sample count along each axis of a 3D surface grid.
    pub surface_samples: usize,
    /// Margin around the drawing area in pixels.
    pub margin: u32,
    /// Fill colour of a 3D surface.
    pub surface_color: RGBColor,
}

impl Default for PlotConfig {
    fn default() -> Self {
        PlotConfig {
            width: 500,
            height: 500,
            curve_samples: 200,
            surface_samples: 50,
            margin: 10,
            surface_color: RGBColor(0, 160, 0),
        }
    }
}
