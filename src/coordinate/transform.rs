//! UV to XY coordinate transformation
//!
//! The transform is a similarity mapping (rotation, uniform scale and
//! translation) derived from two reference points known in both frames.
//! Reference point 1 is the fixed point: a target is located by its bearing
//! and distance from reference 1 in UV, the bearing is rotated by the
//! difference between the reference bearings in XY and UV, and the distance
//! is rescaled by the ratio of the reference distances.

use std::f64::consts::TAU;
use log::{debug, warn};
use super::point::Point;
use super::reference::{Calibration, ReferencePair};
use super::defaults::transform_defaults;
use crate::errors::{Frame, TransformError, TransformResult};

/// A target point mapped into the XY frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformOutput {
    /// Target coordinates in XY
    pub target: Point,
    /// XY/UV scale ratio divided by the design constant
    pub scale_factor: f64,
}

/// A transformed point together with the intermediate quantities
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformReport {
    /// The transformed point and scale factor
    pub output: TransformOutput,
    /// XY distance per unit of UV distance
    pub scale_ratio: f64,
    /// Angle between the target bearing and the reference bearing in UV
    pub rotation: f64,
    /// Bearing of the target from reference 1 in XY
    pub bearing: f64,
    /// Distance from reference 1 to the target in UV
    pub uv_target_distance: f64,
    /// Achieved XY distance divided by the UV target distance
    pub consistency_ratio: f64,
}

impl TransformReport {
    /// Check that the achieved distance ratio matches the scale ratio
    ///
    /// A target on top of reference 1 has no ratio (0/0) and counts as
    /// consistent, since the output collapses onto reference 1.
    pub fn is_consistent(&self, tolerance: f64) -> bool {
        if self.uv_target_distance == 0.0 {
            return true;
        }
        let scale = self.scale_ratio.abs().max(1.0);
        (self.consistency_ratio - self.scale_ratio).abs() <= tolerance * scale
    }
}

/// Rotation and scale implied by a calibration, independent of any target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationSummary {
    /// XY distance per unit of UV distance
    pub scale_ratio: f64,
    /// Scale ratio divided by the design constant
    pub scale_factor: f64,
    /// Rotation from the UV frame into the XY frame, in [0, 2π)
    pub rotation: f64,
}

impl CalibrationSummary {
    /// Rotation in degrees
    pub fn rotation_degrees(&self) -> f64 {
        self.rotation.to_degrees()
    }
}

/// Stateless transformer from the UV frame into the XY frame
#[derive(Debug, Clone, Copy, Default)]
pub struct CoordinateTransformer;

impl CoordinateTransformer {
    /// Create a new transformer
    pub fn new() -> Self {
        CoordinateTransformer
    }

    /// Transform a UV point, failing on degenerate reference geometry
    ///
    /// Rejects non-finite inputs and reference points that coincide in
    /// either frame (within the coincidence tolerance, relative to the
    /// coordinate magnitudes of that frame). A target on top of
    /// reference 1 maps exactly onto reference 1.
    ///
    /// # Arguments
    /// * `calibration` - The two reference pairs
    /// * `target` - Point to transform, in UV
    ///
    /// # Returns
    /// The XY point and scale factor, or an error
    pub fn transform(&self, calibration: &Calibration, target: &Point) -> TransformResult<TransformOutput> {
        self.checked_report(calibration, target).map(|report| report.output)
    }

    /// Validate the inputs, then compute the full report
    ///
    /// Same policy as [`CoordinateTransformer::transform`]; the report's
    /// output is exactly what `transform` returns.
    pub fn checked_report(&self, calibration: &Calibration, target: &Point) -> TransformResult<TransformReport> {
        self.validate(calibration, target)?;

        let mut report = self.report(calibration, target);

        let threshold = coincidence_threshold(&[&calibration.first.uv, &calibration.second.uv, target]);
        if target.approx_eq(&calibration.first.uv, threshold) {
            debug!("Target coincides with reference 1, returning its XY position");
            report.output.target = calibration.first.xy;
            return Ok(report);
        }

        let output = report.output;
        if !output.target.is_finite() || !output.scale_factor.is_finite() {
            return Err(format!(
                "Transformed point ({}, {}) is not finite", output.target.x, output.target.y).into());
        }

        Ok(report)
    }

    /// Transform a UV point without validating the inputs
    ///
    /// Degenerate configurations propagate through the floating-point math:
    /// coincident UV references give an infinite (or NaN) scale factor and a
    /// non-finite target, coincident XY references collapse the output onto
    /// reference 1 with a zero scale factor.
    pub fn transform_unchecked(&self, calibration: &Calibration, target: &Point) -> TransformOutput {
        let output = self.report(calibration, target).output;

        if !output.target.is_finite() || !output.scale_factor.is_finite() {
            warn!("Degenerate reference geometry produced non-finite result ({}, {}), scale factor {}",
                  output.target.x, output.target.y, output.scale_factor);
        }

        output
    }

    /// Compute the transformed point and every intermediate quantity
    ///
    /// This is the raw computation shared by both entry points; it does not
    /// validate anything.
    pub fn report(&self, calibration: &Calibration, target: &Point) -> TransformReport {
        let ReferencePair { xy: xy1, uv: uv1 } = calibration.first;
        let ReferencePair { xy: xy2, uv: uv2 } = calibration.second;

        // Bearings in UV: reference direction and target direction
        let uv_reference_bearing = uv1.bearing_to(&uv2);
        let uv_target_bearing = uv1.bearing_to(target);
        let rotation = normalize_angle(uv_target_bearing) - normalize_angle(uv_reference_bearing);

        // Reference direction in XY, offset by the UV rotation
        let xy_reference_bearing = xy1.bearing_to(&xy2);
        let bearing = rotation + normalize_angle(xy_reference_bearing);

        let uv_target_distance = uv1.distance_to(target);
        let scale_ratio = calibration.xy_distance() / calibration.uv_distance();
        let radius = uv_target_distance * scale_ratio;

        let x = xy1.x + radius * bearing.cos();
        let y = xy1.y + radius * bearing.sin();
        let transformed = Point::new(x, y);

        let consistency_ratio = xy1.distance_to(&transformed) / uv_target_distance;
        let scale_factor = scale_ratio / calibration.design_constant;

        debug!("UV bearings: reference={:.6} target={:.6}, rotation={:.6}, XY bearing={:.6}",
               uv_reference_bearing, uv_target_bearing, rotation, bearing);
        debug!("UV target distance={:.6}, scale ratio={:.6}, radius={:.6}",
               uv_target_distance, scale_ratio, radius);
        debug!("Transformed UV ({}, {}) to XY ({}, {})", target.x, target.y, x, y);

        TransformReport {
            output: TransformOutput {
                target: transformed,
                scale_factor,
            },
            scale_ratio,
            rotation,
            bearing,
            uv_target_distance,
            consistency_ratio,
        }
    }

    /// Derive the rotation and scale of a calibration
    pub fn summarize(&self, calibration: &Calibration) -> TransformResult<CalibrationSummary> {
        self.validate_calibration(calibration)?;

        let uv_bearing = calibration.first.uv.bearing_to(&calibration.second.uv);
        let xy_bearing = calibration.first.xy.bearing_to(&calibration.second.xy);
        let scale_ratio = self.scale_ratio(calibration);

        Ok(CalibrationSummary {
            scale_ratio,
            scale_factor: scale_ratio / calibration.design_constant,
            rotation: normalize_angle(xy_bearing - uv_bearing),
        })
    }

    /// Check a calibration and target for inputs the transform cannot handle
    pub fn validate(&self, calibration: &Calibration, target: &Point) -> TransformResult<()> {
        check_finite("u_target", target.x)?;
        check_finite("v_target", target.y)?;
        self.validate_calibration(calibration)
    }

    fn validate_calibration(&self, calibration: &Calibration) -> TransformResult<()> {
        let first = &calibration.first;
        let second = &calibration.second;

        check_finite("x1", first.xy.x)?;
        check_finite("y1", first.xy.y)?;
        check_finite("x2", second.xy.x)?;
        check_finite("y2", second.xy.y)?;
        check_finite("u1", first.uv.x)?;
        check_finite("v1", first.uv.y)?;
        check_finite("u2", second.uv.x)?;
        check_finite("v2", second.uv.y)?;

        check_finite("design_constant", calibration.design_constant)?;
        if calibration.design_constant <= 0.0 {
            return Err(TransformError::CalibrationError(format!(
                "'design_constant' must be positive, got {}", calibration.design_constant)));
        }

        if first.uv.approx_eq(&second.uv, coincidence_threshold(&[&first.uv, &second.uv])) {
            return Err(TransformError::DegenerateReference(Frame::UV));
        }
        if first.xy.approx_eq(&second.xy, coincidence_threshold(&[&first.xy, &second.xy])) {
            return Err(TransformError::DegenerateReference(Frame::XY));
        }

        Ok(())
    }

    fn scale_ratio(&self, calibration: &Calibration) -> f64 {
        calibration.xy_distance() / calibration.uv_distance()
    }
}

/// Transform a UV target into XY from two reference pairs
///
/// No validation is performed: degenerate inputs yield non-finite values
/// instead of an error. Use [`CoordinateTransformer::transform`] to fail
/// fast instead.
///
/// # Returns
/// A tuple `(x_target, y_target, scale_factor)`
#[allow(clippy::too_many_arguments)]
pub fn transform(x1: f64, y1: f64, x2: f64, y2: f64,
                 u1: f64, v1: f64, u2: f64, v2: f64,
                 u_target: f64, v_target: f64) -> (f64, f64, f64) {
    let calibration = Calibration::new(
        ReferencePair::new(Point::new(x1, y1), Point::new(u1, v1)),
        ReferencePair::new(Point::new(x2, y2), Point::new(u2, v2)),
    );

    let output = CoordinateTransformer::new()
        .transform_unchecked(&calibration, &Point::new(u_target, v_target));

    (output.target.x, output.target.y, output.scale_factor)
}

/// Map an angle into [0, 2π)
pub fn normalize_angle(angle: f64) -> f64 {
    let normalized = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if normalized >= TAU { 0.0 } else { normalized }
}

/// Coincidence distance scaled to the largest coordinate magnitude among `points`
fn coincidence_threshold(points: &[&Point]) -> f64 {
    let magnitude = points.iter()
        .map(|p| p.x.abs().max(p.y.abs()))
        .fold(0.0, f64::max);
    transform_defaults().coincidence_tolerance * magnitude
}

fn check_finite(name: &str, value: f64) -> TransformResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(TransformError::NonFiniteInput(name.to_string()))
    }
}
