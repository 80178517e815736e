//! Heightmap facets: each top corner follows its own vertex brightness.
//! The top face is generally not planar; it bends with the brightness.

use super::{FacetGeometry, FacetInput, FacetStrategy};
use config::MeshConfig;

/// `z_i = base_thickness + b_i * max_relief_height`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Heightmap {
    base_thickness: f64,
    max_relief: f64,
}

impl Heightmap {
    /// Creates the strategy for `config`.
    pub fn new(config: &MeshConfig) -> Self {
        Self {
            base_thickness: config.base_thickness,
            max_relief: config.max_relief_height,
        }
    }
}

impl FacetStrategy for Heightmap {
    fn compute_facet(&self, facet: &FacetInput) -> FacetGeometry {
        FacetGeometry {
            corners: facet.corners,
            top: facet
                .vertex_brightness
                .map(|b| self.base_thickness + b.clamp(0.0, 1.0) * self.max_relief),
        }
    }
}
