//! End-to-end pipeline from a raw input string to a [`Solution`].
//!
//! Stages run in a fixed order and every stage records failures on the
//! solution instead of aborting: split off the limit suffix, parse and
//! simplify, describe in LaTeX, render the figure. Later stages skip
//! themselves when the field they depend on is missing.

use crate::pipeline::input_splitter::extract_limits;
use crate::pipeline::solution::Solution;
use crate::plotting::diagram::generate_diagram;
use crate::plotting::plot_config::PlotConfig;
use crate::symbolic::symbolic_engine::Expr;
use crate::symbolic::symbolic_latex::latex_description;
use crate::symbolic::utils::find_char_positions_outside_brackets;
use log::{error, info, warn};
use simplelog::{ColorChoice, CombinedLogger, Config, LevelFilter, TermLogger, TerminalMode};

/// Message recorded when expression parsing fails, regardless of the cause.
pub const PARSE_ERROR_MESSAGE: &str = "parsing your function returned an error";
/// Message recorded for empty input.
pub const NO_INPUT_MESSAGE: &str = "no input given";

/// Runs the plotting pipeline with an explicit configuration.
///
/// `loglevel` works like in the numerical solvers this mirrors: `Some` of a
/// level name initializes terminal logging at that level, `"off"`/`"none"`
/// disables it, `None` keeps the default ("info").
pub struct FunctionPlotter {
    pub config: PlotConfig,
    pub loglevel: Option<String>,
}

impl Default for FunctionPlotter {
    fn default() -> Self {
        FunctionPlotter::new()
    }
}

impl FunctionPlotter {
    pub fn new() -> Self {
        FunctionPlotter {
            config: PlotConfig::default(),
            loglevel: None,
        }
    }

    pub fn with_config(config: PlotConfig) -> Self {
        FunctionPlotter {
            config,
            loglevel: None,
        }
    }

    /// Main pipeline call: sets up logging and runs the stages.
    pub fn solve(&self, raw_input: &str) -> Solution {
        let is_logging_disabled = self
            .loglevel
            .as_ref()
            .map(|level| level == "off" || level == "none")
            .unwrap_or(false);

        if !is_logging_disabled {
            let log_option = if let Some(level) = &self.loglevel {
                match level.as_str() {
                    "debug" => LevelFilter::Debug,
                    "info" => LevelFilter::Info,
                    "warn" => LevelFilter::Warn,
                    "error" => LevelFilter::Error,
                    _ => LevelFilter::Info,
                }
            } else {
                LevelFilter::Info
            };
            let logger_instance = CombinedLogger::init(vec![TermLogger::new(
                log_option,
                Config::default(),
                TerminalMode::Mixed,
                ColorChoice::Auto,
            )]);
            match logger_instance {
                Ok(()) => {
                    info!("logging initialized at level {}", log_option);
                }
                Err(_) => {
                    // a logger already exists, keep using it
                }
            }
        }

        self.solver(raw_input)
    }

    /// The stages themselves, without logger setup.
    pub fn solver(&self, raw_input: &str) -> Solution {
        let split = extract_limits(raw_input);
        let mut solution = Solution::new(split.expression);
        solution.limits = split.limits;
        if let Some(message) = split.error {
            warn!("{}", message);
            solution.errors.push(message);
        }

        self.parse_stage(&mut solution);
        self.latex_stage(&mut solution);
        generate_diagram(&mut solution, &self.config);

        info!(
            "solved {:?}: {} error(s), figure: {}",
            solution.input,
            solution.errors.len(),
            solution.figure.is_some()
        );
        solution
    }

    /// Parses the expression text, simplifies it and collects free symbols.
    ///
    /// An input of the form "lhs = rhs" (with '=' outside brackets) must
    /// parse on both sides; the simplified left side is kept for plotting.
    fn parse_stage(&self, solution: &mut Solution) {
        if solution.input.is_empty() {
            solution.errors.push(NO_INPUT_MESSAGE.to_string());
            return;
        }

        let parsed = match find_char_positions_outside_brackets(&solution.input, '=') {
            Some(pos) => {
                let lhs = Expr::parse_expression(&solution.input[..pos]);
                let rhs = Expr::parse_expression(&solution.input[pos + 1..]);
                match (lhs, rhs) {
                    (Ok(lhs), Ok(_)) => Ok(lhs),
                    (Err(e), _) | (_, Err(e)) => Err(e),
                }
            }
            None => Expr::parse_expression(&solution.input),
        };

        match parsed {
            Ok(expr) => {
                let simplified = expr.simplify_();
                solution.free_symbols = simplified.all_arguments_are_variables();
                solution.symbolic_function = Some(simplified);
            }
            Err(cause) => {
                error!("parsing {:?} failed: {}", solution.input, cause);
                solution.errors.push(PARSE_ERROR_MESSAGE.to_string());
            }
        }
    }

    /// Builds the "$$f(x) = ...$$" description. Skipped when parsing failed.
    fn latex_stage(&self, solution: &mut Solution) {
        let Some(expr) = &solution.symbolic_function else {
            return;
        };
        solution.latex_description = Some(latex_description(expr, &solution.free_symbols));
    }
}

/// Convenience entry point with default configuration and logging.
pub fn parse_function(raw_input: &str) -> Solution {
    FunctionPlotter::new().solve(raw_input)
}
