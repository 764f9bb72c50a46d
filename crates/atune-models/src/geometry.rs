//! Pixel-space geometry shared by detections and trajectories.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Real-valued point in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    #[inline]
    pub fn distance(&self, other: &Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// Axis-aligned bounding box in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema, Validate)]
pub struct BoundingBox {
    /// Left edge x-coordinate
    pub x: f64,
    /// Top edge y-coordinate
    pub y: f64,
    /// Box width, strictly positive
    #[validate(range(exclusive_min = 0.0))]
    pub width: f64,
    /// Box height, strictly positive
    #[validate(range(exclusive_min = 0.0))]
    pub height: f64,
}

impl BoundingBox {
    /// Create a new bounding box.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Center x-coordinate.
    #[inline]
    pub fn cx(&self) -> f64 {
        self.x + self.width / 2.0
    }

    /// Center y-coordinate.
    #[inline]
    pub fn cy(&self) -> f64 {
        self.y + self.height / 2.0
    }

    /// Center point.
    #[inline]
    pub fn center(&self) -> Point {
        Point::new(self.cx(), self.cy())
    }

    /// Box area in pixels.
    #[inline]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert!((a.distance(&b) - 5.0).abs() < 1e-12);
        assert!((b.distance(&a) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_bbox_center() {
        let bbox = BoundingBox::new(10.0, 20.0, 40.0, 8.0);
        assert_eq!(bbox.center(), Point::new(30.0, 24.0));
        assert!((bbox.area() - 320.0).abs() < 1e-12);
    }

    #[test]
    fn test_bbox_validation() {
        assert!(BoundingBox::new(0.0, 0.0, 1.0, 1.0).validate().is_ok());
        assert!(BoundingBox::new(0.0, 0.0, 0.0, 1.0).validate().is_err());
        assert!(BoundingBox::new(0.0, 0.0, 5.0, -2.0).validate().is_err());
    }
}
