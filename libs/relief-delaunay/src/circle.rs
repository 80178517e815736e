//! # Circumcircles
//!
//! Cached circumcircle of a triangle. A triangle whose vertices are
//! (nearly) collinear has no finite circumcircle; it gets an infinite
//! radius and is treated as never containing a point.

use config::constants::DEGENERATE_EPSILON;
use glam::DVec2;

/// Circle through the three vertices of a triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circumcircle {
    center: DVec2,
    radius_sq: f64,
}

impl Circumcircle {
    /// Computes the circumcircle from the determinant form.
    ///
    /// # Example
    ///
    /// ```rust
    /// use glam::DVec2;
    /// use relief_delaunay::Circumcircle;
    ///
    /// let circle = Circumcircle::new(DVec2::ZERO, DVec2::new(2.0, 0.0), DVec2::new(0.0, 2.0));
    /// assert_eq!(circle.center(), DVec2::new(1.0, 1.0));
    /// assert!((circle.radius() - 2f64.sqrt()).abs() < 1e-12);
    /// ```
    pub fn new(a: DVec2, b: DVec2, c: DVec2) -> Self {
        let d = 2.0 * (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y));
        if !d.is_finite() || d.abs() < DEGENERATE_EPSILON {
            return Self::degenerate((a + b + c) / 3.0);
        }

        let a2 = a.length_squared();
        let b2 = b.length_squared();
        let c2 = c.length_squared();
        let center = DVec2::new(
            (a2 * (b.y - c.y) + b2 * (c.y - a.y) + c2 * (a.y - b.y)) / d,
            (a2 * (c.x - b.x) + b2 * (a.x - c.x) + c2 * (b.x - a.x)) / d,
        );
        Self {
            center,
            radius_sq: center.distance_squared(a),
        }
    }

    /// A circle that contains nothing.
    pub fn degenerate(center: DVec2) -> Self {
        Self {
            center,
            radius_sq: f64::INFINITY,
        }
    }

    /// Returns the circle center.
    #[inline]
    pub fn center(&self) -> DVec2 {
        self.center
    }

    /// Returns the radius (infinite for degenerate triangles).
    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius_sq.sqrt()
    }

    /// Returns the squared radius.
    #[inline]
    pub fn radius_squared(&self) -> f64 {
        self.radius_sq
    }

    /// True when the source triangle had no finite circumcircle.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        !self.radius_sq.is_finite()
    }

    /// Floating-point containment test. Degenerate circles contain nothing.
    pub fn contains(&self, point: DVec2) -> bool {
        !self.is_degenerate() && self.center.distance_squared(point) < self.radius_sq
    }

    /// Conservative rejection: true only when `point` is clearly outside,
    /// with slack for rounding in the cached center and radius.
    pub fn clearly_excludes(&self, point: DVec2) -> bool {
        if self.is_degenerate() {
            return true;
        }
        let slack = self.radius_sq * 1e-6 + 1e-18;
        self.center.distance_squared(point) > self.radius_sq + slack
    }
}
