//! Transformation defaults
//!
//! The design constant and coincidence tolerance are read from the embedded
//! `transform_defaults.toml` the first time they are needed.

use std::str::FromStr;
use lazy_static::lazy_static;
use crate::errors::{TransformError, TransformResult};

/// Reporting baseline for the derived scale ratio
pub const DESIGN_CONSTANT: f64 = 0.505;

/// Relative distance below which two points count as coincident
///
/// Scaled by the largest coordinate magnitude in the frame being checked,
/// so the threshold does not depend on the units of the frame.
pub const COINCIDENCE_TOLERANCE: f64 = 1e-12;

lazy_static! {
    // Parse the embedded defaults once
    static ref TRANSFORM_DEFAULTS: TransformDefaults = {
        let content = include_str!("../../transform_defaults.toml");
        content.parse::<TransformDefaults>().unwrap_or_else(|e| {
                eprintln!("Warning: Failed to parse transform defaults: {}", e);
                TransformDefaults::default()
            })
    };
}

/// Tunable constants of the transformation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformDefaults {
    /// Baseline the XY/UV scale ratio is normalized against
    pub design_constant: f64,
    /// Relative coincidence threshold used by the validating transform
    pub coincidence_tolerance: f64,
}

impl Default for TransformDefaults {
    fn default() -> Self {
        TransformDefaults {
            design_constant: DESIGN_CONSTANT,
            coincidence_tolerance: COINCIDENCE_TOLERANCE,
        }
    }
}

impl TransformDefaults {
    fn positive_number(value: &toml::Value, key: &str) -> TransformResult<f64> {
        let number = value.as_float()
            .or_else(|| value.as_integer().map(|i| i as f64))
            .ok_or_else(|| TransformError::from(format!("'{}' must be a number", key)))?;

        if !number.is_finite() || number <= 0.0 {
            return Err(format!("'{}' must be positive, got {}", key, number).into());
        }

        Ok(number)
    }
}

impl FromStr for TransformDefaults {
    type Err = TransformError;

    /// Parse defaults from a TOML string
    ///
    /// Missing keys keep their compiled-in values; present keys must be
    /// positive finite numbers.
    fn from_str(content: &str) -> TransformResult<Self> {
        let toml_value: toml::Value = content.parse()
            .map_err(|e| TransformError::from(format!("Failed to parse TOML: {}", e)))?;

        let mut defaults = TransformDefaults::default();

        if let Some(table) = toml_value.get("transform").and_then(|v| v.as_table()) {
            if let Some(value) = table.get("design_constant") {
                defaults.design_constant = Self::positive_number(value, "design_constant")?;
            }
            if let Some(value) = table.get("coincidence_tolerance") {
                defaults.coincidence_tolerance = Self::positive_number(value, "coincidence_tolerance")?;
            }
        }

        Ok(defaults)
    }
}

/// Get the process-wide transformation defaults
pub fn transform_defaults() -> &'static TransformDefaults {
    &TRANSFORM_DEFAULTS
}
