use log::{info, warn};
use crate::coordinate::{Calibration, CoordinateTransformer, Point, TransformOutput, TransformReport};
use crate::errors::TransformResult;
use crate::utils::logger::Logger;

/// Relative tolerance for the achieved-vs-derived scale ratio check
const CONSISTENCY_TOLERANCE: f64 = 1e-9;

/// Main interface to the microtransform library
pub struct MicroTransform {
    logger: Logger,
    calibration: Calibration,
    transformer: CoordinateTransformer,
    checked: bool,
}

impl MicroTransform {
    /// Create a new MicroTransform instance
    ///
    /// # Arguments
    /// * `calibration` - The two reference pairs
    /// * `log_file` - Optional path to a report log file
    ///
    /// # Returns
    /// A MicroTransform instance or an error if the log file cannot be created
    pub fn new(calibration: Calibration, log_file: Option<&str>) -> TransformResult<Self> {
        let logger = match log_file {
            Some(path) => Logger::new(path)?,
            None => Logger::disabled(),
        };

        Ok(MicroTransform {
            logger,
            calibration,
            transformer: CoordinateTransformer::new(),
            checked: true,
        })
    }

    /// Create an instance from a TOML calibration file
    pub fn from_calibration_file(path: &str, log_file: Option<&str>) -> TransformResult<Self> {
        let calibration = Calibration::from_file(path)?;
        info!("Loaded calibration from {}", path);
        Self::new(calibration, log_file)
    }

    /// Propagate degenerate geometry as non-finite values instead of failing
    pub fn unchecked(mut self) -> Self {
        self.checked = false;
        self
    }

    /// The calibration in use
    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    /// Transform a UV point into XY
    ///
    /// # Arguments
    /// * `u` - U coordinate of the target
    /// * `v` - V coordinate of the target
    ///
    /// # Returns
    /// The XY point and scale factor, or an error for degenerate input
    /// when running checked
    pub fn transform(&self, u: f64, v: f64) -> TransformResult<TransformOutput> {
        let target = Point::new(u, v);

        let report = if self.checked {
            self.transformer.checked_report(&self.calibration, &target)?
        } else {
            self.transformer.report(&self.calibration, &target)
        };
        let output = report.output;

        if !report.is_consistent(CONSISTENCY_TOLERANCE) {
            warn!("Achieved scale ratio {} differs from derived ratio {}",
                  report.consistency_ratio, report.scale_ratio);
        }
        self.logger.log_transform_report((u, v), &report)?;

        info!("UV ({}, {}) -> XY ({}, {}), scale factor {}",
              u, v, output.target.x, output.target.y, output.scale_factor);
        Ok(output)
    }

    /// Compute the full diagnostic report for a UV point, without validation
    pub fn report(&self, u: f64, v: f64) -> TransformReport {
        self.transformer.report(&self.calibration, &Point::new(u, v))
    }

    /// Describe the rotation and scale implied by the calibration
    ///
    /// # Returns
    /// String containing the calibration summary or an error
    pub fn inspect(&self) -> TransformResult<String> {
        let summary = self.transformer.summarize(&self.calibration)?;
        let first = &self.calibration.first;
        let second = &self.calibration.second;

        let mut result = String::from("Calibration Summary:\n");
        result.push_str(&format!("  Reference 1: XY ({}, {}) <-> UV ({}, {})\n",
                                 first.xy.x, first.xy.y, first.uv.x, first.uv.y));
        result.push_str(&format!("  Reference 2: XY ({}, {}) <-> UV ({}, {})\n",
                                 second.xy.x, second.xy.y, second.uv.x, second.uv.y));
        result.push_str(&format!("  Scale ratio (XY/UV): {:.6}\n", summary.scale_ratio));
        result.push_str(&format!("  Scale factor (/{}): {:.6}\n",
                                 self.calibration.design_constant, summary.scale_factor));
        result.push_str(&format!("  Rotation: {:.6} rad ({:.3} deg)\n",
                                 summary.rotation, summary.rotation_degrees()));

        self.logger.write_line(&result)?;
        Ok(result)
    }
}
