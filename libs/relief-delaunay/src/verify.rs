//! # Delaunay Verification
//!
//! Brute-force check of the empty-circumcircle property. Quadratic, meant
//! for tests and diagnostics rather than the generation path.

use crate::bowyer_watson::{in_circle, orient};
use crate::triangle::Triangle;
use relief_points::Point;

/// Returns true if no point of `points` lies strictly inside the
/// circumcircle of any triangle. Vertices of a triangle are exempt from its
/// own test.
///
/// # Example
///
/// ```rust
/// use relief_delaunay::{is_delaunay, triangulate};
/// use relief_points::Point;
///
/// let points: Vec<Point> = (0..12)
///     .map(|i| {
///         let t = i as f64 * 0.5;
///         Point::new(0.5 + 0.4 * t.cos(), 0.5 + 0.3 * t.sin(), 0.5)
///     })
///     .collect();
/// let triangles = triangulate(&points);
/// assert!(is_delaunay(&points, &triangles));
/// ```
pub fn is_delaunay(points: &[Point], triangles: &[Triangle<'_>]) -> bool {
    triangles.iter().all(|tri| {
        let indices = tri.indices();
        let [a, b, c] = tri.positions();
        let (a, b, c) = if orient(a, b, c) >= 0.0 { (a, b, c) } else { (a, c, b) };
        points
            .iter()
            .enumerate()
            .filter(|(i, _)| !indices.contains(i))
            .all(|(_, p)| in_circle(a, b, c, p.position()) <= 0.0)
    })
}
