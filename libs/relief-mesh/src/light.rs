//! # Light Direction
//!
//! Facets tilt along the horizontal projection of the virtual light. Its
//! length is `cos(elevation)`, so low light tilts harder than high light
//! and light from straight above leaves every facet level.

use config::constants::EPSILON;
use glam::{DVec2, DVec3};
use tracing::warn;

/// Unit vector pointing toward the light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightDirection {
    vector: DVec3,
}

impl LightDirection {
    /// Light coming from straight above.
    pub const OVERHEAD: Self = Self { vector: DVec3::Z };

    /// Builds the direction from azimuth (counter-clockwise from +X) and
    /// elevation above the horizon, both in degrees.
    ///
    /// # Example
    ///
    /// ```rust
    /// use relief_mesh::LightDirection;
    ///
    /// let light = LightDirection::from_angles(90.0, 60.0);
    /// assert!((light.horizontal().y - 0.5).abs() < 1e-12);
    /// assert!(light.horizontal().x.abs() < 1e-12);
    /// ```
    pub fn from_angles(azimuth: f64, elevation: f64) -> Self {
        let (az, el) = (azimuth.to_radians(), elevation.to_radians());
        Self::from_vector(DVec3::new(el.cos() * az.cos(), el.cos() * az.sin(), el.sin()))
    }

    /// Builds the direction from an arbitrary vector. A zero or non-finite
    /// vector falls back to overhead light.
    pub fn from_vector(vector: DVec3) -> Self {
        let length = vector.length();
        if !length.is_finite() || length < EPSILON {
            warn!(?vector, "Zero light vector, using overhead light");
            return Self::OVERHEAD;
        }
        Self {
            vector: vector / length,
        }
    }

    /// Unit vector toward the light.
    #[inline]
    pub fn vector(&self) -> DVec3 {
        self.vector
    }

    /// Projection of the light onto the model plane. Zero for overhead
    /// light, unit length for light at the horizon.
    #[inline]
    pub fn horizontal(&self) -> DVec2 {
        self.vector.truncate()
    }
}

impl Default for LightDirection {
    fn default() -> Self {
        Self::OVERHEAD
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_from_angles_is_unit() {
        let light = LightDirection::from_angles(135.0, 45.0);
        assert_relative_eq!(light.vector().length(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(light.vector().z, 45f64.to_radians().sin(), epsilon = 1e-12);
        assert!(light.horizontal().x < 0.0 && light.horizontal().y > 0.0);
    }

    #[test]
    fn test_horizontal_shrinks_with_elevation() {
        for elevation in [0.0, 10.0, 45.0, 80.0] {
            let light = LightDirection::from_angles(30.0, elevation);
            assert_relative_eq!(
                light.horizontal().length(),
                f64::to_radians(elevation).cos(),
                epsilon = 1e-12
            );
        }
    }

    #[test]
    fn test_zero_vector_falls_back_to_overhead() {
        assert_eq!(LightDirection::from_vector(DVec3::ZERO), LightDirection::OVERHEAD);
        assert_eq!(
            LightDirection::from_vector(DVec3::new(f64::NAN, 0.0, 1.0)),
            LightDirection::OVERHEAD
        );
        assert_eq!(LightDirection::from_angles(f64::NAN, 10.0), LightDirection::OVERHEAD);
        assert_eq!(LightDirection::OVERHEAD.horizontal(), DVec2::ZERO);
    }

    #[test]
    fn test_light_from_above_has_no_horizontal_part() {
        let light = LightDirection::from_angles(90.0, 90.0);
        assert_relative_eq!(light.vector().z, 1.0, epsilon = 1e-12);
        assert!(light.horizontal().length() < 1e-12);
    }

    #[test]
    fn test_from_vector_normalizes() {
        let light = LightDirection::from_vector(DVec3::new(3.0, 0.0, 4.0));
        assert_relative_eq!(light.vector().x, 0.6, epsilon = 1e-12);
        assert_relative_eq!(light.vector().z, 0.8, epsilon = 1e-12);
        assert_relative_eq!(light.horizontal().x, 0.6, epsilon = 1e-12);
    }
}
