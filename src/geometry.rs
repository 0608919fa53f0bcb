//! Viewport geometry for click targeting.
//!
//! The canvas game renders its UI inside a single `<canvas>` element, so
//! there is nothing to click by selector. Instead the runner reads the
//! canvas bounding box once and derives an absolute click point from
//! fractional offsets into it.

use serde::{Deserialize, Serialize};

// ============================================================================
// Point
// ============================================================================

/// An absolute point in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal position in CSS pixels.
    pub x: f64,
    /// Vertical position in CSS pixels.
    pub y: f64,
}

impl Point {
    /// Creates a new point.
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

// ============================================================================
// BoundingBox
// ============================================================================

/// An element's on-screen rectangle at the moment it was queried.
///
/// Mirrors the shape of `getBoundingClientRect()`: origin at the element's
/// top-left corner, sizes in CSS pixels. Not retained across steps; the
/// runner reads it once.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// X position of the top-left corner.
    pub x: f64,
    /// Y position of the top-left corner.
    pub y: f64,
    /// Width in CSS pixels.
    pub width: f64,
    /// Height in CSS pixels.
    pub height: f64,
}

impl BoundingBox {
    /// Creates a new bounding box.
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns `true` if the box has no clickable area.
    ///
    /// A detached or collapsed element reports a zero-sized rectangle;
    /// clicking into one would dispatch events at the element's corner
    /// rather than inside it.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Returns the absolute point at the given fractional offsets from the
    /// box's top-left corner.
    ///
    /// `fx` and `fy` are fractions of the box's width and height, so
    /// `point_at(0.5, 0.5)` is the center and `point_at(0.85, 0.55)` lands
    /// at `(x + 0.85 * width, y + 0.55 * height)`.
    #[inline]
    #[must_use]
    pub fn point_at(&self, fx: f64, fy: f64) -> Point {
        Point {
            x: self.x + self.width * fx,
            y: self.y + self.height * fy,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_at_exact() {
        let bounds = BoundingBox::new(10.0, 20.0, 100.0, 200.0);
        let point = bounds.point_at(0.85, 0.55);
        assert_eq!(point, Point::new(10.0 + 0.85 * 100.0, 20.0 + 0.55 * 200.0));
        assert_eq!(point, Point::new(95.0, 130.0));
    }

    #[test]
    fn test_point_at_corners() {
        let bounds = BoundingBox::new(5.0, 7.0, 40.0, 30.0);
        assert_eq!(bounds.point_at(0.0, 0.0), Point::new(5.0, 7.0));
        assert_eq!(bounds.point_at(1.0, 1.0), Point::new(45.0, 37.0));
    }

    #[test]
    fn test_is_empty() {
        assert!(BoundingBox::new(0.0, 0.0, 0.0, 100.0).is_empty());
        assert!(BoundingBox::new(0.0, 0.0, 100.0, 0.0).is_empty());
        assert!(!BoundingBox::new(0.0, 0.0, 1.0, 1.0).is_empty());
    }

    #[test]
    fn test_deserialize_from_rect_json() {
        let json = r#"{"x":3.5,"y":4.25,"width":1280.0,"height":720.0}"#;
        let bounds: BoundingBox = serde_json::from_str(json).unwrap();
        assert_eq!(bounds, BoundingBox::new(3.5, 4.25, 1280.0, 720.0));
    }
}
