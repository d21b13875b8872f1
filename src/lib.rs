//! MicroCode UV to XY coordinate transformation
//!
//! Maps a point from the UV frame into the XY frame using two reference
//! points known in both frames, and reports the derived scale relative to
//! the 0.505 design constant.

pub mod errors;
pub mod utils;
pub mod coordinate;
pub mod commands;
pub mod api;

pub use crate::api::MicroTransform;

pub use errors::{Frame, TransformError, TransformResult};
pub use coordinate::{transform, Calibration, CoordinateTransformer, Point, ReferencePair, TransformOutput};
