//! # Grayscale Raster Field
//!
//! A [`FeatureField`] backed by an 8-bit luma image. Edge strength (Sobel
//! gradient magnitude) and local contrast (3×3 standard deviation) are
//! precomputed once at construction; sampling is bilinear on all three maps.
//!
//! ## Example
//!
//! ```rust
//! use relief_points::{FeatureField, GrayscaleField};
//!
//! // 2x2 checkerboard
//! let field = GrayscaleField::from_luma(2, 2, &[0, 255, 255, 0]).unwrap();
//! let center = field.sample(0.5, 0.5);
//! assert!((center.brightness - 0.5).abs() < 1e-6);
//! ```

use crate::error::PointError;
use crate::field::{FeatureField, FieldSample};

/// Luma raster with precomputed gradient and contrast maps.
#[derive(Debug, Clone)]
pub struct GrayscaleField {
    width: usize,
    height: usize,
    /// Brightness in [0, 1]
    luma: Vec<f32>,
    /// Sobel magnitude normalized to [0, 1]
    edges: Vec<f32>,
    /// Neighborhood standard deviation scaled to [0, 1]
    contrast: Vec<f32>,
}

impl GrayscaleField {
    /// Builds a field from row-major 8-bit luma pixels.
    pub fn from_luma(width: usize, height: usize, pixels: &[u8]) -> Result<Self, PointError> {
        let luma: Vec<f32> = pixels.iter().map(|&p| f32::from(p) / 255.0).collect();
        Self::from_brightness(width, height, luma)
    }

    /// Builds a field from row-major brightness values in [0, 1].
    pub fn from_brightness(
        width: usize,
        height: usize,
        brightness: Vec<f32>,
    ) -> Result<Self, PointError> {
        if width == 0 || height == 0 || brightness.len() != width * height {
            return Err(PointError::InvalidRaster {
                width,
                height,
                len: brightness.len(),
            });
        }

        let luma: Vec<f32> = brightness
            .into_iter()
            .map(|b| if b.is_finite() { b.clamp(0.0, 1.0) } else { 0.0 })
            .collect();
        let edges = sobel_magnitude(&luma, width, height);
        let contrast = local_deviation(&luma, width, height);

        Ok(Self {
            width,
            height,
            luma,
            edges,
            contrast,
        })
    }

    /// Raster width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Raster height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Bilinear lookup of `map` at normalized coordinates.
    fn bilinear(&self, map: &[f32], x: f64, y: f64) -> f64 {
        let fx = x.clamp(0.0, 1.0) * (self.width - 1) as f64;
        let fy = y.clamp(0.0, 1.0) * (self.height - 1) as f64;
        let x0 = fx.floor() as usize;
        let y0 = fy.floor() as usize;
        let x1 = (x0 + 1).min(self.width - 1);
        let y1 = (y0 + 1).min(self.height - 1);
        let tx = fx - x0 as f64;
        let ty = fy - y0 as f64;

        let at = |px: usize, py: usize| f64::from(map[py * self.width + px]);
        let top = at(x0, y0) * (1.0 - tx) + at(x1, y0) * tx;
        let bottom = at(x0, y1) * (1.0 - tx) + at(x1, y1) * tx;
        top * (1.0 - ty) + bottom * ty
    }
}

impl FeatureField for GrayscaleField {
    fn sample(&self, x: f64, y: f64) -> FieldSample {
        FieldSample::new(
            self.bilinear(&self.luma, x, y),
            self.bilinear(&self.edges, x, y),
            self.bilinear(&self.contrast, x, y),
        )
    }
}

/// Clamped pixel fetch.
fn pixel(map: &[f32], width: usize, height: usize, x: isize, y: isize) -> f32 {
    let cx = x.clamp(0, width as isize - 1) as usize;
    let cy = y.clamp(0, height as isize - 1) as usize;
    map[cy * width + cx]
}

/// Sobel gradient magnitude, normalized by the largest response.
fn sobel_magnitude(luma: &[f32], width: usize, height: usize) -> Vec<f32> {
    let mut out = vec![0.0f32; luma.len()];
    let mut max = 0.0f32;

    for y in 0..height as isize {
        for x in 0..width as isize {
            let p = |dx: isize, dy: isize| pixel(luma, width, height, x + dx, y + dy);
            let gx = (p(1, -1) + 2.0 * p(1, 0) + p(1, 1)) - (p(-1, -1) + 2.0 * p(-1, 0) + p(-1, 1));
            let gy = (p(-1, 1) + 2.0 * p(0, 1) + p(1, 1)) - (p(-1, -1) + 2.0 * p(0, -1) + p(1, -1));
            let magnitude = (gx * gx + gy * gy).sqrt();
            out[y as usize * width + x as usize] = magnitude;
            max = max.max(magnitude);
        }
    }

    if max > 0.0 {
        for value in &mut out {
            *value /= max;
        }
    }
    out
}

/// 3×3 standard deviation. The maximum deviation of values in [0, 1] is
/// 0.5, so the result is doubled to span [0, 1].
fn local_deviation(luma: &[f32], width: usize, height: usize) -> Vec<f32> {
    let mut out = vec![0.0f32; luma.len()];

    for y in 0..height as isize {
        for x in 0..width as isize {
            let mut sum = 0.0f32;
            let mut sum_sq = 0.0f32;
            for dy in -1..=1 {
                for dx in -1..=1 {
                    let v = pixel(luma, width, height, x + dx, y + dy);
                    sum += v;
                    sum_sq += v * v;
                }
            }
            let mean = sum / 9.0;
            let variance = (sum_sq / 9.0 - mean * mean).max(0.0);
            out[y as usize * width + x as usize] = (variance.sqrt() * 2.0).min(1.0);
        }
    }
    out
}
