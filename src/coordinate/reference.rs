//! Reference points known in both frames
//!
//! A [`Calibration`] bundles the two reference pairs that define the
//! UV to XY similarity transform. It can be built directly or parsed from a
//! TOML calibration file:
//!
//! ```toml
//! design_constant = 0.505   # optional
//!
//! [[reference]]
//! xy = [0.0, 0.0]
//! uv = [0.0, 0.0]
//!
//! [[reference]]
//! xy = [10.0, 0.0]
//! uv = [0.0, 10.0]
//! ```

use std::fs;
use std::str::FromStr;
use log::debug;
use super::point::Point;
use super::defaults::transform_defaults;
use crate::errors::{TransformError, TransformResult};

/// One location expressed in both frames
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferencePair {
    /// Coordinates in the destination frame
    pub xy: Point,
    /// Coordinates in the source frame
    pub uv: Point,
}

impl ReferencePair {
    /// Create a new reference pair
    pub fn new(xy: Point, uv: Point) -> Self {
        ReferencePair { xy, uv }
    }
}

/// The two reference pairs plus the scale reporting baseline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calibration {
    /// Reference point 1, the fixed point of the transform
    pub first: ReferencePair,
    /// Reference point 2
    pub second: ReferencePair,
    /// Baseline the scale ratio is normalized against
    pub design_constant: f64,
}

impl Calibration {
    /// Create a calibration using the default design constant
    pub fn new(first: ReferencePair, second: ReferencePair) -> Self {
        Calibration {
            first,
            second,
            design_constant: transform_defaults().design_constant,
        }
    }

    /// Override the design constant
    ///
    /// The constant must be a positive finite number.
    pub fn with_design_constant(mut self, design_constant: f64) -> TransformResult<Self> {
        if !design_constant.is_finite() || design_constant <= 0.0 {
            return Err(TransformError::CalibrationError(format!(
                "'design_constant' must be positive, got {}", design_constant)));
        }
        self.design_constant = design_constant;
        Ok(self)
    }

    /// Distance between the reference points in the XY frame
    pub fn xy_distance(&self) -> f64 {
        self.first.xy.distance_to(&self.second.xy)
    }

    /// Distance between the reference points in the UV frame
    pub fn uv_distance(&self) -> f64 {
        self.first.uv.distance_to(&self.second.uv)
    }

    /// Load a calibration from a TOML file
    pub fn from_file(path: &str) -> TransformResult<Self> {
        let contents = fs::read_to_string(path)?;
        contents.parse()
    }

    fn parse_pair(value: &toml::Value, index: usize) -> TransformResult<ReferencePair> {
        let xy = Self::parse_point(value.get("xy"), index, "xy")?;
        let uv = Self::parse_point(value.get("uv"), index, "uv")?;
        Ok(ReferencePair::new(xy, uv))
    }

    fn parse_point(value: Option<&toml::Value>, index: usize, key: &str) -> TransformResult<Point> {
        let coords = value
            .and_then(|v| v.as_array())
            .ok_or_else(|| TransformError::CalibrationError(format!(
                "Reference {} is missing '{}' = [a, b]", index, key)))?;

        let numbers: Vec<f64> = coords.iter().filter_map(Self::as_number).collect();
        if coords.len() != 2 || numbers.len() != 2 {
            return Err(TransformError::CalibrationError(format!(
                "Reference {} '{}' must hold exactly two numbers", index, key)));
        }

        Ok(Point::new(numbers[0], numbers[1]))
    }

    fn as_number(value: &toml::Value) -> Option<f64> {
        value.as_float().or_else(|| value.as_integer().map(|i| i as f64))
    }
}

impl FromStr for Calibration {
    type Err = TransformError;

    /// Parse a calibration from a TOML string
    fn from_str(content: &str) -> TransformResult<Self> {
        let toml_value: toml::Value = content.parse()
            .map_err(|e| TransformError::CalibrationError(format!("Failed to parse TOML: {}", e)))?;

        let references = toml_value.get("reference")
            .and_then(|v| v.as_array())
            .ok_or_else(|| TransformError::CalibrationError("Missing [[reference]] entries".to_string()))?;

        if references.len() != 2 {
            return Err(TransformError::CalibrationError(format!(
                "Expected exactly 2 [[reference]] entries, found {}", references.len())));
        }

        let first = Calibration::parse_pair(&references[0], 1)?;
        let second = Calibration::parse_pair(&references[1], 2)?;

        let mut calibration = Calibration::new(first, second);
        if let Some(value) = toml_value.get("design_constant") {
            let constant = Calibration::as_number(value)
                .ok_or_else(|| TransformError::CalibrationError("'design_constant' must be a number".to_string()))?;
            calibration = calibration.with_design_constant(constant)?;
        }

        debug!("Parsed calibration: {:?}", calibration);
        Ok(calibration)
    }
}
