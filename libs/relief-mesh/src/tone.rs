//! # Tilt Curve
//!
//! Maps facet brightness to a signed tilt angle.
//!
//! ```text
//! d  = 2 * (b - 0.5)                    // [-1, 1], zero at mid-grey
//! t  = sign(d) * |d|^gamma              // gamma < 1 separates midtones
//! t' = sign(t) * |t|^(1 / (sharpness + offset))
//! tilt = t' * max_tilt_angle
//! ```
//!
//! Every step is odd and monotone, so the tilt magnitude never decreases
//! with `|b - 0.5|` and mid-grey stays level.

use config::MeshConfig;

/// Brightness-to-tilt curve for one mesh configuration.
///
/// # Example
///
/// ```rust
/// use config::MeshConfig;
/// use relief_mesh::TiltCurve;
///
/// let curve = TiltCurve::new(&MeshConfig::default());
/// assert_eq!(curve.tilt_angle(0.5), 0.0);
/// assert!(curve.tilt_angle(1.0) > 0.0);
/// assert!(curve.tilt_angle(0.0) < 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TiltCurve {
    gamma: f64,
    exponent: f64,
    max_tilt: f64,
}

impl TiltCurve {
    /// Builds the curve from the tone settings and tilt limit of `config`.
    pub fn new(config: &MeshConfig) -> Self {
        Self {
            gamma: config.tone.gamma,
            exponent: 1.0 / (config.facet_sharpness + config.tone.sharpness_offset),
            max_tilt: config.max_tilt_angle.to_radians(),
        }
    }

    /// Signed tilt factor in [-1, 1] before sharpening.
    pub fn tilt_factor(&self, brightness: f64) -> f64 {
        let d = 2.0 * (brightness.clamp(0.0, 1.0) - 0.5);
        signed_pow(d, self.gamma)
    }

    /// Applies the sharpness power curve to a tilt factor.
    pub fn sharpen(&self, factor: f64) -> f64 {
        signed_pow(factor, self.exponent)
    }

    /// Tilt angle in radians for a facet brightness.
    pub fn tilt_angle(&self, brightness: f64) -> f64 {
        self.sharpen(self.tilt_factor(brightness)) * self.max_tilt
    }

    /// Largest tilt magnitude in radians.
    pub fn max_tilt(&self) -> f64 {
        self.max_tilt
    }
}

fn signed_pow(value: f64, exponent: f64) -> f64 {
    if value == 0.0 {
        0.0
    } else {
        value.signum() * value.abs().powf(exponent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn curve(sharpness: f64) -> TiltCurve {
        TiltCurve::new(&MeshConfig {
            facet_sharpness: sharpness,
            ..Default::default()
        })
    }

    #[test]
    fn test_mid_grey_is_level() {
        for sharpness in [0.0, 1.0, 3.0] {
            assert_eq!(curve(sharpness).tilt_angle(0.5), 0.0);
        }
    }

    #[test]
    fn test_extremes_reach_max_tilt() {
        let c = curve(1.0);
        assert_relative_eq!(c.tilt_angle(1.0), 35f64.to_radians(), epsilon = 1e-12);
        assert_relative_eq!(c.tilt_angle(0.0), -35f64.to_radians(), epsilon = 1e-12);
    }

    #[test]
    fn test_magnitude_monotone_in_distance_from_mid_grey() {
        for sharpness in [0.0, 0.5, 1.0, 4.0] {
            let c = curve(sharpness);
            let mut previous = 0.0;
            for step in 0..=50 {
                let distance = step as f64 / 100.0;
                let up = c.tilt_angle(0.5 + distance).abs();
                let down = c.tilt_angle(0.5 - distance).abs();
                assert!(up >= previous - 1e-15, "sharpness {sharpness} at {distance}");
                assert_relative_eq!(up, down, epsilon = 1e-12);
                previous = up;
            }
        }
    }

    #[test]
    fn test_sign_follows_brightness() {
        let c = curve(1.0);
        assert!(c.tilt_angle(0.51) > 0.0);
        assert!(c.tilt_angle(0.49) < 0.0);
    }

    #[test]
    fn test_gamma_boosts_midtones() {
        let c = curve(1.0);
        // 2 * (0.75 - 0.5) = 0.5; 0.5^0.7 > 0.5
        assert!(c.tilt_factor(0.75) > 0.5);
    }

    #[test]
    fn test_out_of_range_brightness_is_clamped() {
        let c = curve(1.0);
        assert_eq!(c.tilt_angle(1.7), c.tilt_angle(1.0));
        assert_eq!(c.tilt_angle(-0.2), c.tilt_angle(0.0));
    }
}
