//! Point structure for representing coordinates

/// A point in a 2-D coordinate frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// X coordinate (U in the source frame)
    pub x: f64,
    /// Y coordinate (V in the source frame)
    pub y: f64,
}

impl Point {
    /// Create a new 2D point
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// Euclidean distance to another point in the same frame
    pub fn distance_to(&self, other: &Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Bearing from this point to another, in radians within (-π, π]
    ///
    /// Coincident points yield 0.0, since `atan2(0, 0)` is zero.
    pub fn bearing_to(&self, other: &Point) -> f64 {
        (other.y - self.y).atan2(other.x - self.x)
    }

    /// Check that both coordinates are finite
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Check whether another point lies within `tolerance` of this one
    pub fn approx_eq(&self, other: &Point, tolerance: f64) -> bool {
        self.distance_to(other) <= tolerance
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}
