//! UV to XY transformation command

use clap::ArgMatches;
use log::debug;

use crate::api::MicroTransform;
use crate::commands::command_traits::Command;
use crate::coordinate::Point;
use crate::errors::{TransformError, TransformResult};
use crate::utils::coordinate_utils::{format_point, parse_coordinate};

/// Command for transforming a single UV target into XY
pub struct TransformCommand {
    /// Configured transformation facade
    api: MicroTransform,
    /// Point to transform, in UV
    target: Point,
    /// Digits after the decimal point in the output
    precision: usize,
}

impl TransformCommand {
    /// Create a new transform command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `api` - Facade holding the calibration
    ///
    /// # Returns
    /// A new TransformCommand instance or an error
    pub fn new(args: &ArgMatches, api: MicroTransform) -> TransformResult<Self> {
        let target_str = args.get_one::<String>("target")
            .ok_or_else(|| TransformError::GenericError("Missing --target U,V".to_string()))?;
        let target = parse_coordinate(target_str)?;

        let precision = args.get_one::<usize>("precision").copied().unwrap_or(6);

        Ok(TransformCommand {
            api,
            target,
            precision,
        })
    }
}

impl Command for TransformCommand {
    fn execute(&self) -> TransformResult<()> {
        debug!("Transforming UV target ({}, {})", self.target.x, self.target.y);

        let output = self.api.transform(self.target.x, self.target.y)?;

        println!("x_target,y_target: {}", format_point(&output.target, self.precision));
        println!("scale_factor: {:.*}", self.precision, output.scale_factor);
        Ok(())
    }
}
