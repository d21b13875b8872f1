//! Custom error types for coordinate transformation

use std::fmt;
use std::io;

/// Coordinate frame a point belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame {
    /// Destination frame (XY)
    XY,
    /// Source frame (UV)
    UV,
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Frame::XY => write!(f, "XY"),
            Frame::UV => write!(f, "UV"),
        }
    }
}

/// Transformation error types
#[derive(Debug)]
pub enum TransformError {
    /// I/O error
    IoError(io::Error),
    /// An input value was NaN or infinite
    NonFiniteInput(String),
    /// The two reference points coincide in the given frame
    DegenerateReference(Frame),
    /// A coordinate string could not be parsed
    InvalidCoordinate(String),
    /// A calibration file is malformed
    CalibrationError(String),
    /// Generic error with message
    GenericError(String),
}

impl fmt::Display for TransformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformError::IoError(e) => write!(f, "I/O error: {}", e),
            TransformError::NonFiniteInput(name) => write!(f, "Input '{}' is not a finite number", name),
            TransformError::DegenerateReference(frame) => {
                write!(f, "Reference points coincide in {} frame, rotation and scale are undefined", frame)
            },
            TransformError::InvalidCoordinate(msg) => write!(f, "Invalid coordinate: {}", msg),
            TransformError::CalibrationError(msg) => write!(f, "Calibration error: {}", msg),
            TransformError::GenericError(msg) => write!(f, "Transform error: {}", msg),
        }
    }
}

impl std::error::Error for TransformError {}

impl From<io::Error> for TransformError {
    fn from(error: io::Error) -> Self {
        TransformError::IoError(error)
    }
}

/// Result type for transformation operations
pub type TransformResult<T> = Result<T, TransformError>;

impl From<String> for TransformError {
    fn from(msg: String) -> Self {
        TransformError::GenericError(msg)
    }
}
