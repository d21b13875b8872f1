//! Coordinate handling for the UV and XY frames
//!
//! This module provides the point and reference types and the
//! similarity transform between the two frames.

mod point;
mod reference;
mod transform;
mod defaults;
#[cfg(test)]
mod tests;

// Re-export key types
pub use self::point::Point;
pub use self::reference::{Calibration, ReferencePair};
pub use self::transform::{
    normalize_angle, transform, CalibrationSummary, CoordinateTransformer, TransformOutput, TransformReport,
};
pub use self::defaults::{transform_defaults, TransformDefaults, COINCIDENCE_TOLERANCE, DESIGN_CONSTANT};
