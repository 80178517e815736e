//! Angled facets: a plate lifted by brightness and tilted along the light
//! axis, so its apparent shade follows the source brightness.

use super::{enforce_min_wall, tilt_offsets, FacetGeometry, FacetInput, FacetStrategy};
use crate::light::LightDirection;
use crate::tone::TiltCurve;
use config::MeshConfig;
use glam::DVec2;

/// `z_i = base + dot(v_i - centroid, axis) * tan(tilt)` with
/// `base = base_thickness + b * max_relief_height * height_variation`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Angled {
    base_thickness: f64,
    lift: f64,
    min_wall: f64,
    curve: TiltCurve,
    axis: DVec2,
}

impl Angled {
    /// Creates the strategy for `config` lit from `light`.
    pub fn new(config: &MeshConfig, light: LightDirection) -> Self {
        Self {
            base_thickness: config.base_thickness,
            lift: config.max_relief_height * config.height_variation,
            min_wall: config.base_thickness * config.min_wall_factor,
            curve: TiltCurve::new(config),
            axis: light.horizontal(),
        }
    }
}

impl FacetStrategy for Angled {
    fn compute_facet(&self, facet: &FacetInput) -> FacetGeometry {
        let brightness = facet.brightness.clamp(0.0, 1.0);
        let slope = self.curve.tilt_angle(brightness).tan();
        let base = self.base_thickness + brightness * self.lift;
        let offsets = tilt_offsets(facet, self.axis, slope);

        FacetGeometry {
            corners: facet.corners,
            top: enforce_min_wall(offsets.map(|o| base + o), self.min_wall),
        }
    }
}
