//! Geometric primitives for diagram placement.
//!
//! Mooring lays tables out on the draw.io canvas, whose coordinate system
//! has its origin at the top-left with Y increasing downward:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! draw.io geometry attributes are plain integers, so positions here use
//! `i32` rather than floating point.

/// A 2D point representing a position on the diagram canvas.
///
/// # Examples
///
/// ```
/// # use mooring_core::geometry::Point;
/// let origin = Point::new(50, 100);
/// assert_eq!(origin.x(), 50);
/// assert_eq!(origin.y(), 100);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Point {
    x: i32,
    y: i32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> i32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> i32 {
        self.y
    }

    /// Creates a new point with the specified x-coordinate
    pub fn with_x(mut self, x: i32) -> Self {
        self.x = x;
        self
    }

    /// Creates a new point with the specified y-coordinate
    pub fn with_y(mut self, y: i32) -> Self {
        self.y = y;
        self
    }
}
