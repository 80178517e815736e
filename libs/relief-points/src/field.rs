//! # Feature Fields
//!
//! The sampling interface supplied by the caller. A field maps normalized
//! coordinates in [0,1]² to brightness, edge strength and local contrast.
//! Fields may be noisy or discontinuous; [`FieldSample::new`] sanitizes
//! whatever they return so downstream math never sees NaN.

use serde::{Deserialize, Serialize};

/// One observation of the feature field.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FieldSample {
    /// Brightness in [0, 1].
    pub brightness: f64,
    /// Edge strength, >= 0.
    pub edge_strength: f64,
    /// Local contrast, >= 0.
    pub local_contrast: f64,
}

impl FieldSample {
    /// Creates a sample, clamping brightness into [0, 1] and the other
    /// channels to be non-negative. Non-finite values become 0.
    ///
    /// # Example
    ///
    /// ```rust
    /// use relief_points::FieldSample;
    ///
    /// let sample = FieldSample::new(1.4, -2.0, f64::NAN);
    /// assert_eq!(sample.brightness, 1.0);
    /// assert_eq!(sample.edge_strength, 0.0);
    /// assert_eq!(sample.local_contrast, 0.0);
    /// ```
    pub fn new(brightness: f64, edge_strength: f64, local_contrast: f64) -> Self {
        Self {
            brightness: finite_or_zero(brightness).clamp(0.0, 1.0),
            edge_strength: finite_or_zero(edge_strength).max(0.0),
            local_contrast: finite_or_zero(local_contrast).max(0.0),
        }
    }

    /// A flat sample with no edges and no contrast.
    pub fn flat(brightness: f64) -> Self {
        Self::new(brightness, 0.0, 0.0)
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Scalar feature field sampled by the point generator.
pub trait FeatureField {
    /// Samples the field at normalized coordinates `(x, y)` in [0,1]².
    fn sample(&self, x: f64, y: f64) -> FieldSample;
}

impl<F: FeatureField + ?Sized> FeatureField for &F {
    fn sample(&self, x: f64, y: f64) -> FieldSample {
        (**self).sample(x, y)
    }
}

/// Field with the same brightness everywhere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformField {
    brightness: f64,
}

impl UniformField {
    /// Creates a uniform field.
    pub fn new(brightness: f64) -> Self {
        Self { brightness }
    }
}

impl FeatureField for UniformField {
    fn sample(&self, _x: f64, _y: f64) -> FieldSample {
        FieldSample::flat(self.brightness)
    }
}

/// Adapts a closure into a field.
///
/// # Example
///
/// ```rust
/// use relief_points::{FeatureField, FieldSample, FnField};
///
/// let gradient = FnField::new(|x, _y| FieldSample::flat(x));
/// assert_eq!(gradient.sample(0.25, 0.9).brightness, 0.25);
/// ```
pub struct FnField<F> {
    func: F,
}

impl<F> FnField<F>
where
    F: Fn(f64, f64) -> FieldSample,
{
    /// Wraps a sampling closure.
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

impl<F> FeatureField for FnField<F>
where
    F: Fn(f64, f64) -> FieldSample,
{
    fn sample(&self, x: f64, y: f64) -> FieldSample {
        let raw = (self.func)(x, y);
        FieldSample::new(raw.brightness, raw.edge_strength, raw.local_contrast)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_field_is_flat() {
        let field = UniformField::new(0.3);
        let sample = field.sample(0.7, 0.1);
        assert_eq!(sample.brightness, 0.3);
        assert_eq!(sample.edge_strength, 0.0);
        assert_eq!(sample.local_contrast, 0.0);
    }

    #[test]
    fn test_fn_field_sanitizes_output() {
        let field = FnField::new(|_, _| FieldSample {
            brightness: -1.0,
            edge_strength: f64::INFINITY,
            local_contrast: 0.25,
        });
        let sample = field.sample(0.5, 0.5);
        assert_eq!(sample.brightness, 0.0);
        assert_eq!(sample.edge_strength, 0.0);
        assert_eq!(sample.local_contrast, 0.25);
    }

    #[test]
    fn test_reference_forwards_to_field() {
        let field = UniformField::new(0.8);
        let by_ref: &dyn FeatureField = &field;
        assert_eq!((&by_ref).sample(0.0, 0.0).brightness, 0.8);
    }
}
