//! Coordinate utility functions
//!
//! Parsing and formatting of coordinate pairs given on the command line,
//! e.g. `"12.5,-3.25"` or `"(12.5, -3.25)"`.

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;
use crate::coordinate::Point;
use crate::errors::{TransformError, TransformResult};

lazy_static! {
    static ref COORDINATE_PAIR: Regex = Regex::new(
        r"^\s*\(?\s*([-+]?(?:\d+\.?\d*|\.\d+)(?:[eE][-+]?\d+)?)\s*,\s*([-+]?(?:\d+\.?\d*|\.\d+)(?:[eE][-+]?\d+)?)\s*\)?\s*$"
    ).expect("coordinate pattern is valid");
}

/// Parse a coordinate pair in the format "a,b"
///
/// Surrounding parentheses and whitespace are accepted.
///
/// # Arguments
/// * `coord_str` - Coordinate string, e.g. "0.5,-2" or "(0.5, -2)"
///
/// # Returns
/// The parsed point or an error describing the expected format
pub fn parse_coordinate(coord_str: &str) -> TransformResult<Point> {
    let captures = COORDINATE_PAIR.captures(coord_str).ok_or_else(|| {
        TransformError::InvalidCoordinate(format!("'{}', expected format 'a,b'", coord_str))
    })?;

    let a = captures[1].parse::<f64>()
        .map_err(|_| TransformError::InvalidCoordinate(format!("invalid first value '{}'", &captures[1])))?;
    let b = captures[2].parse::<f64>()
        .map_err(|_| TransformError::InvalidCoordinate(format!("invalid second value '{}'", &captures[2])))?;

    debug!("Parsed coordinate '{}' as ({}, {})", coord_str, a, b);
    Ok(Point::new(a, b))
}

/// Format a point with fixed precision
pub fn format_point(point: &Point, precision: usize) -> String {
    format!("{:.*},{:.*}", precision, point.x, precision, point.y)
}
