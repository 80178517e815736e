//! # Triangles
//!
//! Output triangles borrow their vertices from the point list they were
//! built from, so the points must outlive the triangles.

use crate::circle::Circumcircle;
use glam::DVec2;
use relief_points::{FeatureField, Point};

/// A triangle of the triangulation.
///
/// # Example
///
/// ```rust
/// use relief_delaunay::Triangle;
/// use relief_points::Point;
///
/// let points = [
///     Point::new(0.0, 0.0, 0.0),
///     Point::new(1.0, 0.0, 0.5),
///     Point::new(0.0, 1.0, 1.0),
/// ];
/// let tri = Triangle::new([&points[0], &points[1], &points[2]], [0, 1, 2])
///     .with_center_brightness(1.0);
/// assert_eq!(tri.vertex_brightness(), 0.5);
/// assert!((tri.brightness(0.6) - 0.8).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle<'p> {
    vertices: [&'p Point; 3],
    indices: [usize; 3],
    center_brightness: Option<f64>,
}

impl<'p> Triangle<'p> {
    /// Creates a triangle from vertex references and their indices in the
    /// source point list.
    pub fn new(vertices: [&'p Point; 3], indices: [usize; 3]) -> Self {
        Self {
            vertices,
            indices,
            center_brightness: None,
        }
    }

    /// Attaches a brightness sampled at the centroid.
    pub fn with_center_brightness(mut self, brightness: f64) -> Self {
        self.center_brightness = Some(brightness);
        self
    }

    /// Samples `field` at the centroid and attaches the brightness.
    pub fn sample_center<F: FeatureField + ?Sized>(&mut self, field: &F) {
        let center = self.centroid();
        self.center_brightness = Some(field.sample(center.x, center.y).brightness);
    }

    /// Returns the three vertices.
    #[inline]
    pub fn vertices(&self) -> [&'p Point; 3] {
        self.vertices
    }

    /// Returns the vertex indices in the source point list.
    #[inline]
    pub fn indices(&self) -> [usize; 3] {
        self.indices
    }

    /// Returns the vertex positions.
    pub fn positions(&self) -> [DVec2; 3] {
        self.vertices.map(Point::position)
    }

    /// Returns the centroid.
    pub fn centroid(&self) -> DVec2 {
        let [a, b, c] = self.positions();
        (a + b + c) / 3.0
    }

    /// Brightness sampled at the centroid, if one was attached.
    #[inline]
    pub fn center_brightness(&self) -> Option<f64> {
        self.center_brightness
    }

    /// Mean brightness of the three vertices.
    pub fn vertex_brightness(&self) -> f64 {
        self.vertices.iter().map(|p| p.brightness).sum::<f64>() / 3.0
    }

    /// Facet brightness: `center * weight + vertex_mean * (1 - weight)` when
    /// a center sample is attached, otherwise the vertex mean.
    pub fn brightness(&self, center_weight: f64) -> f64 {
        let vertex = self.vertex_brightness();
        match self.center_brightness {
            Some(center) => center * center_weight + vertex * (1.0 - center_weight),
            None => vertex,
        }
    }

    /// True if any vertex lies on the unit square outline.
    pub fn is_boundary(&self) -> bool {
        self.vertices.iter().any(|p| p.is_boundary)
    }

    /// Twice the signed area; positive for counter-clockwise vertices.
    pub fn signed_area2(&self) -> f64 {
        let [a, b, c] = self.positions();
        (b - a).perp_dot(c - a)
    }

    /// Computes the circumcircle.
    pub fn circumcircle(&self) -> Circumcircle {
        let [a, b, c] = self.positions();
        Circumcircle::new(a, b, c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relief_points::UniformField;

    fn points() -> [Point; 3] {
        let mut a = Point::new(0.0, 0.0, 0.2);
        a.is_boundary = true;
        [a, Point::new(0.6, 0.0, 0.4), Point::new(0.0, 0.6, 0.6)]
    }

    #[test]
    fn test_centroid_and_area() {
        let pts = points();
        let tri = Triangle::new([&pts[0], &pts[1], &pts[2]], [0, 1, 2]);
        let c = tri.centroid();
        assert!((c.x - 0.2).abs() < 1e-12 && (c.y - 0.2).abs() < 1e-12);
        assert!((tri.signed_area2() - 0.36).abs() < 1e-12);
    }

    #[test]
    fn test_brightness_without_center_is_vertex_mean() {
        let pts = points();
        let tri = Triangle::new([&pts[0], &pts[1], &pts[2]], [0, 1, 2]);
        assert!((tri.brightness(0.6) - 0.4).abs() < 1e-12);
        assert!(tri.center_brightness().is_none());
    }

    #[test]
    fn test_sample_center_attaches_field_value() {
        let pts = points();
        let mut tri = Triangle::new([&pts[0], &pts[1], &pts[2]], [0, 1, 2]);
        tri.sample_center(&UniformField::new(1.0));
        assert_eq!(tri.center_brightness(), Some(1.0));
        // 1.0 * 0.6 + 0.4 * 0.4
        assert!((tri.brightness(0.6) - 0.76).abs() < 1e-12);
    }

    #[test]
    fn test_boundary_flag_is_or_of_vertices() {
        let pts = points();
        let tri = Triangle::new([&pts[0], &pts[1], &pts[2]], [0, 1, 2]);
        assert!(tri.is_boundary());
        let tri = Triangle::new([&pts[1], &pts[2], &pts[1]], [1, 2, 1]);
        assert!(!tri.is_boundary());
    }
}
