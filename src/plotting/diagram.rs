//! Renders a parsed expression into a PNG figure.
//!
//! One free variable gives a 2D curve, two give a 3D surface. Rendering goes
//! into an in-memory RGB buffer, gets PNG-encoded and comes back as a
//! "data:image/png;base64,..." URI ready for an <img> tag. Rendering failures
//! never abort the caller: they are recorded on the solution and the figure
//! stays empty.
//!
//! Figures deliberately carry no text (captions, tick labels, legends), so
//! rendering does not depend on the host font stack.

use crate::pipeline::solution::Solution;
use crate::plotting::plot_config::PlotConfig;
use crate::symbolic::symbolic_engine::Expr;
use crate::symbolic::utils::linspace;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use log::{debug, warn};
use nalgebra::{DMatrix, DVector};
use plotters::prelude::*;

/// Range used on both axes when the input carried no "[lo, hi]" suffix.
pub const DEFAULT_LIMITS: [f64; 2] = [-5.0, 5.0];

/// Renders the figure for a solved expression and stores it on the solution.
///
/// Does nothing when no symbolic function is present. The stored limits are
/// read but never written: an input without a limit suffix keeps
/// `limits: None` even though the figure uses [`DEFAULT_LIMITS`].
pub fn generate_diagram(solution: &mut Solution, config: &PlotConfig) {
    let Some(expr) = solution.symbolic_function.clone() else {
        return;
    };
    let limits = solution.limits.unwrap_or(DEFAULT_LIMITS);
    match try_generate(&expr, &solution.free_symbols, limits, config) {
        Ok(uri) => solution.figure = Some(uri),
        Err(message) => {
            warn!("rendering '{}' failed: {}", solution.input, message);
            solution.errors.push(message);
        }
    }
}

fn try_generate(
    expr: &Expr,
    free_symbols: &[String],
    limits: [f64; 2],
    config: &PlotConfig,
) -> Result<String, String> {
    // reject before allocating the bitmap buffer
    match free_symbols.len() {
        0 | 1 => draw_curve(expr, limits, config),
        2 => draw_surface(expr, limits, config),
        n => Err(format!(
            "too many free variables for plotting: {} (max 2)",
            n
        )),
    }
}

/// Chart range for the dependent axis: finite samples clamped to +-1000
/// (so a single asymptote does not flatten the rest of the curve), padded
/// by 10%. Degenerate sample sets fall back to a unit range.
fn compute_value_range(values: &[f64]) -> (f64, f64) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for &v in values {
        if v.is_finite() {
            let v = v.clamp(-1000.0, 1000.0);
            lo = lo.min(v);
            hi = hi.max(v);
        }
    }
    if !lo.is_finite() || !hi.is_finite() {
        return (-1.0, 1.0);
    }
    if lo == hi {
        return (lo - 1.0, hi + 1.0);
    }
    let pad = (hi - lo) * 0.1;
    (lo - pad, hi + pad)
}

fn draw_curve(expr: &Expr, limits: [f64; 2], config: &PlotConfig) -> Result<String, String> {
    let f = expr.lambdify1D();
    let xs = linspace(limits[0], limits[1], config.curve_samples);
    let ys = DVector::from_iterator(xs.len(), xs.iter().map(|&x| f(x)));
    let (y_min, y_max) = compute_value_range(ys.as_slice());
    debug!("curve over [{}, {}], y range [{}, {}]", limits[0], limits[1], y_min, y_max);

    let mut buffer = vec![0u8; (config.width * config.height * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (config.width, config.height))
            .into_drawing_area();
        root.fill(&WHITE).map_err(|e| e.to_string())?;

        let mut chart = ChartBuilder::on(&root)
            .margin(config.margin)
            .build_cartesian_2d(limits[0]..limits[1], y_min..y_max)
            .map_err(|e| e.to_string())?;

        chart
            .configure_mesh()
            .x_labels(0)
            .y_labels(0)
            .draw()
            .map_err(|e| e.to_string())?;

        // split into segments at non-finite samples so poles and domain gaps
        // do not get bridged by a stray line
        let mut segment: Vec<(f64, f64)> = Vec::new();
        for (&x, &y) in xs.iter().zip(ys.iter()) {
            if y.is_finite() {
                segment.push((x, y));
                continue;
            }
            if segment.len() > 1 {
                chart
                    .draw_series(LineSeries::new(segment.clone(), &BLUE))
                    .map_err(|e| e.to_string())?;
            }
            segment.clear();
        }
        if segment.len() > 1 {
            chart
                .draw_series(LineSeries::new(segment, &BLUE))
                .map_err(|e| e.to_string())?;
        }

        root.present().map_err(|e| e.to_string())?;
    }
    encode_rgb_to_data_uri(&buffer, config.width, config.height)
}

fn draw_surface(expr: &Expr, limits: [f64; 2], config: &PlotConfig) -> Result<String, String> {
    let f = expr.lambdify2D();
    let n = config.surface_samples;
    let xs = linspace(limits[0], limits[1], n);
    let zs = xs.clone();
    let heights = DMatrix::from_fn(n, n, |i, j| f(xs[i], zs[j]));
    let (y_min, y_max) = compute_value_range(heights.as_slice());
    debug!("surface over [{}, {}], height range [{}, {}]", limits[0], limits[1], y_min, y_max);

    let mut buffer = vec![0u8; (config.width * config.height * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (config.width, config.height))
            .into_drawing_area();
        root.fill(&WHITE).map_err(|e| e.to_string())?;

        let mut chart = ChartBuilder::on(&root)
            .margin(config.margin)
            .build_cartesian_3d(
                limits[0]..limits[1],
                y_min..y_max,
                limits[0]..limits[1],
            )
            .map_err(|e| e.to_string())?;

        chart.with_projection(|mut projection| {
            projection.pitch = 0.4;
            projection.yaw = 0.6;
            projection.scale = 0.8;
            projection.into_matrix()
        });

        let color = config.surface_color;
        chart
            .draw_series(
                SurfaceSeries::xoz(xs.iter().copied(), zs.iter().copied(), |x, z| {
                    let y = f(x, z);
                    if y.is_finite() { y.clamp(y_min, y_max) } else { y_min }
                })
                .style(color.mix(0.5).filled()),
            )
            .map_err(|e| e.to_string())?;

        root.present().map_err(|e| e.to_string())?;
    }
    encode_rgb_to_data_uri(&buffer, config.width, config.height)
}

fn encode_rgb_to_data_uri(rgb: &[u8], width: u32, height: u32) -> Result<String, String> {
    let mut png = Vec::new();
    PngEncoder::new(&mut png)
        .write_image(rgb, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| format!("PNG encoding failed: {}", e))?;
    Ok(format!("data:image/png;base64,{}", STANDARD.encode(&png)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    fn decode_uri(uri: &str) -> Vec<u8> {
        let payload = uri.strip_prefix("data:image/png;base64,").unwrap();
        STANDARD.decode(payload).unwrap()
    }

    #[test]
    fn test_curve_produces_png() {
        let expr = Expr::parse_expression("x^2-3").unwrap();
        let uri = draw_curve(&expr, DEFAULT_LIMITS, &PlotConfig::default()).unwrap();
        assert_eq!(&decode_uri(&uri)[..8], &PNG_MAGIC);
    }

    #[test]
    fn test_constant_curve_produces_png() {
        let expr = Expr::Const(5.0);
        let uri = draw_curve(&expr, DEFAULT_LIMITS, &PlotConfig::default()).unwrap();
        assert_eq!(&decode_uri(&uri)[..8], &PNG_MAGIC);
    }

    #[test]
    fn test_curve_with_pole_produces_png() {
        // 1/x is non-finite at x = 0, which lies inside the default range
        let expr = Expr::parse_expression("1/x").unwrap();
        let uri = draw_curve(&expr, DEFAULT_LIMITS, &PlotConfig::default()).unwrap();
        assert_eq!(&decode_uri(&uri)[..8], &PNG_MAGIC);
    }

    #[test]
    fn test_surface_produces_png() {
        let expr = Expr::parse_expression("x^2+y^2").unwrap();
        let uri = draw_surface(&expr, DEFAULT_LIMITS, &PlotConfig::default()).unwrap();
        assert_eq!(&decode_uri(&uri)[..8], &PNG_MAGIC);
    }

    #[test]
    fn test_three_variables_rejected() {
        let expr = Expr::parse_expression("x+y+z").unwrap();
        let symbols = expr.all_arguments_are_variables();
        let err = try_generate(&expr, &symbols, DEFAULT_LIMITS, &PlotConfig::default())
            .unwrap_err();
        assert!(err.contains("too many free variables"));
    }

    #[test]
    fn test_generate_diagram_uses_defaults_without_mutating_limits() {
        let mut solution = Solution::new("x^2".to_string());
        let expr = Expr::parse_expression("x^2").unwrap();
        solution.free_symbols = expr.all_arguments_are_variables();
        solution.symbolic_function = Some(expr);
        generate_diagram(&mut solution, &PlotConfig::default());
        assert!(solution.errors.is_empty());
        assert!(solution.figure.is_some());
        assert_eq!(solution.limits, None);
    }

    #[test]
    fn test_generate_diagram_without_expression_is_noop() {
        let mut solution = Solution::new(String::new());
        generate_diagram(&mut solution, &PlotConfig::default());
        assert!(solution.figure.is_none());
        assert!(solution.errors.is_empty());
    }

    #[test]
    fn test_value_range_clamps_and_pads() {
        let (lo, hi) = compute_value_range(&[0.0, 4.0, f64::INFINITY]);
        assert!(lo < 0.0 && lo > -1.0);
        assert!(hi > 4.0 && hi < 1001.0);
        let (lo, hi) = compute_value_range(&[f64::NAN]);
        assert_eq!((lo, hi), (-1.0, 1.0));
    }
}
