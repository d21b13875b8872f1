//! Calibration inspection command
//!
//! Prints the rotation and scale derived from the reference pairs without
//! transforming a target.

use log::debug;

use crate::api::MicroTransform;
use crate::commands::command_traits::Command;
use crate::errors::TransformResult;

/// Command for describing a calibration
pub struct InspectCommand {
    /// Configured transformation facade
    api: MicroTransform,
}

impl InspectCommand {
    /// Create a new inspect command
    pub fn new(api: MicroTransform) -> Self {
        InspectCommand { api }
    }
}

impl Command for InspectCommand {
    fn execute(&self) -> TransformResult<()> {
        debug!("Inspecting calibration {:?}", self.api.calibration());
        print!("{}", self.api.inspect()?);
        Ok(())
    }
}
