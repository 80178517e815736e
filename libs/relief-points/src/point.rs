//! # Sample Points
//!
//! Immutable points produced by the generator and referenced by triangles.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// A sampled point in normalized image space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal position in [0, 1].
    pub x: f64,
    /// Vertical position in [0, 1], growing downwards like image rows.
    pub y: f64,
    /// Field brightness at the point.
    pub brightness: f64,
    /// True when the field reported a strong edge here.
    pub is_edge: bool,
    /// True for points seeded on the unit square outline.
    pub is_boundary: bool,
    /// Minimum distance the point was accepted with.
    pub radius: f64,
}

impl Point {
    /// Creates an interior point.
    pub fn new(x: f64, y: f64, brightness: f64) -> Self {
        Self {
            x,
            y,
            brightness,
            is_edge: false,
            is_boundary: false,
            radius: 0.0,
        }
    }

    /// Returns the position as a vector.
    #[inline]
    pub fn position(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    /// Euclidean distance to another point.
    #[inline]
    pub fn distance(&self, other: &Point) -> f64 {
        self.position().distance(other.position())
    }

    /// Returns a copy moved to a new position, keeping every attribute.
    pub fn with_position(&self, position: DVec2) -> Self {
        Self {
            x: position.x,
            y: position.y,
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_distance() {
        let a = Point::new(0.0, 0.0, 0.5);
        let b = Point::new(0.3, 0.4, 0.5);
        assert!((a.distance(&b) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_with_position_keeps_flags() {
        let mut p = Point::new(0.1, 0.2, 0.9);
        p.is_boundary = true;
        p.radius = 0.05;
        let moved = p.with_position(DVec2::new(0.5, 0.5));
        assert_eq!(moved.position(), DVec2::new(0.5, 0.5));
        assert!(moved.is_boundary);
        assert_eq!(moved.brightness, 0.9);
        assert_eq!(moved.radius, 0.05);
    }
}
