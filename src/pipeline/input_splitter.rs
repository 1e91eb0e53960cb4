//! Splits raw input into an expression part and an optional plot range.
//!
//! A trailing "[lo, hi]" suffix sets the limits for both plot axes. A
//! closing ']' with no matching '[' is the one malformation this stage turns
//! into a sentinel expression, so the parser reports it like any other
//! syntax error.

use log::debug;

/// Placeholder expression substituted for input whose bracket suffix cannot
/// belong to a limit. Deliberately unparseable.
pub const BAD_SYNTAX: &str = "bad syntax";

/// Result of peeling a limit suffix off raw input.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitInput {
    /// Expression text with the suffix removed, trimmed.
    pub expression: String,
    /// Parsed limits, when a well-formed suffix was present.
    pub limits: Option<[f64; 2]>,
    /// Message describing a malformed limit suffix.
    pub error: Option<String>,
}

/// Extracts a trailing "[lo, hi]" plot range from raw input.
///
/// Input that does not end in ']' passes through untouched. A suffix with
/// anything other than two comma-separated numbers is reported as an error
/// while the expression part is still returned for parsing.
pub fn extract_limits(raw: &str) -> SplitInput {
    let trimmed = raw.trim();

    if !trimmed.ends_with(']') {
        return SplitInput {
            expression: trimmed.to_string(),
            limits: None,
            error: None,
        };
    }

    let Some(open) = trimmed.rfind('[') else {
        debug!("']' without '[' in {:?}", trimmed);
        return SplitInput {
            expression: BAD_SYNTAX.to_string(),
            limits: None,
            error: None,
        };
    };

    let expression = trimmed[..open].trim().to_string();
    let inner = &trimmed[open + 1..trimmed.len() - 1];
    let bounds: Vec<&str> = inner.split(',').collect();
    if bounds.len() != 2 {
        return SplitInput {
            expression,
            limits: None,
            error: Some(format!(
                "plot limits must be two comma-separated numbers, got '[{}]'",
                inner
            )),
        };
    }

    let lo = bounds[0].trim().parse::<f64>();
    let hi = bounds[1].trim().parse::<f64>();
    match (lo, hi) {
        (Ok(lo), Ok(hi)) => SplitInput {
            expression,
            limits: Some([lo, hi]),
            error: None,
        },
        _ => SplitInput {
            expression,
            limits: None,
            error: Some(format!("could not read plot limits from '[{}]'", inner)),
        },
    }
}
