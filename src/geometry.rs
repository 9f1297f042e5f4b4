#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

/// A point in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise offset from `origin` to `self`.
    #[must_use]
    pub fn delta_from(self, origin: Point) -> Point {
        Point { x: self.x - origin.x, y: self.y - origin.y }
    }

    /// Translate by `delta`.
    #[must_use]
    pub fn offset(self, delta: Point) -> Point {
        Point { x: self.x + delta.x, y: self.y + delta.y }
    }
}

/// Axis-aligned bounding box in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    /// Normalized box spanned by two opposite corners, in either order.
    #[must_use]
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: (b.x - a.x).abs(),
            height: (b.y - a.y).abs(),
        }
    }

    /// True when both sides are shorter than `min` (an accidental click rather than a drag).
    #[must_use]
    pub fn is_smaller_than(&self, min: f64) -> bool {
        self.width < min && self.height < min
    }
}
