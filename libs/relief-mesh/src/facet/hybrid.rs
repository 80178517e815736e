//! Hybrid facets: heightmap displacement scaled by the height variation,
//! plus the angled tilt computed from the blended facet brightness.

use super::{enforce_min_wall, tilt_offsets, FacetGeometry, FacetInput, FacetStrategy};
use crate::light::LightDirection;
use crate::tone::TiltCurve;
use config::MeshConfig;
use glam::DVec2;

/// `z_i = base_thickness + b_i * max_relief_height * height_variation
///        + dot(v_i - centroid, axis) * tan(tilt)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hybrid {
    base_thickness: f64,
    lift: f64,
    min_wall: f64,
    curve: TiltCurve,
    axis: DVec2,
}

impl Hybrid {
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

impl FacetStrategy for Hybrid {
    fn compute_facet(&self, facet: &FacetInput) -> FacetGeometry {
        let slope = self.curve.tilt_angle(facet.brightness).tan();
        let offsets = tilt_offsets(facet, self.axis, slope);

        let mut top = [0.0; 3];
        for (z, (b, offset)) in top
            .iter_mut()
            .zip(facet.vertex_brightness.iter().zip(offsets))
        {
            *z = self.base_thickness + b.clamp(0.0, 1.0) * self.lift + offset;
        }

        FacetGeometry {
            corners: facet.corners,
            top: enforce_min_wall(top, self.min_wall),
        }
    }
}
