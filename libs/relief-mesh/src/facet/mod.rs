//! # Facet Strategies
//!
//! Each triangle becomes an independent closed prism: bottom face at z = 0,
//! top face at strategy-computed heights, three side walls. Facets share no
//! vertices, so neighbors meet along shared (x, y) edges with a sharp,
//! flat-shaded crease.
//!
//! ## Strategies
//!
//! - [`Angled`]: level plate lifted by brightness, tilted toward the light
//! - [`Heightmap`]: per-vertex height from vertex brightness
//! - [`Hybrid`]: per-vertex height plus the angled tilt
//!
//! [`Strategy`] is the closed set selected by [`ReliefMethod`].

mod angled;
mod heightmap;
mod hybrid;

pub use angled::Angled;
pub use heightmap::Heightmap;
pub use hybrid::Hybrid;

use crate::light::LightDirection;
use crate::mesh::Mesh;
use config::{MeshConfig, ReliefMethod};
use glam::{DVec2, DVec3};

/// Vertices emitted per facet: 3 bottom, 3 top, 4 per side wall.
pub const FACET_VERTICES: usize = 18;

/// Triangles emitted per facet: top, bottom, 2 per side wall.
pub const FACET_TRIANGLES: usize = 8;

/// Planar input of one facet, already in millimeters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FacetInput {
    /// Corner positions in model space
    pub corners: [DVec2; 3],
    /// Brightness at each corner
    pub vertex_brightness: [f64; 3],
    /// Blended facet brightness (center sample and vertex mean)
    pub brightness: f64,
}

impl FacetInput {
    /// Centroid of the corners.
    pub fn centroid(&self) -> DVec2 {
        let [a, b, c] = self.corners;
        (a + b + c) / 3.0
    }
}

/// Prism of one facet: the planar corners and the top height at each.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FacetGeometry {
    /// Corner positions in model space
    pub corners: [DVec2; 3],
    /// Top face height at each corner
    pub top: [f64; 3],
}

impl FacetGeometry {
    /// Bottom corners at z = 0.
    pub fn bottom_vertices(&self) -> [DVec3; 3] {
        self.corners.map(|c| c.extend(0.0))
    }

    /// Top corners.
    pub fn top_vertices(&self) -> [DVec3; 3] {
        let [a, b, c] = self.corners;
        [a.extend(self.top[0]), b.extend(self.top[1]), c.extend(self.top[2])]
    }

    /// Appends the prism to `mesh` with outward-facing winding.
    ///
    /// Corners are reordered counter-clockwise first, so the top normal
    /// points up whatever order the input used.
    pub fn emit(&self, mesh: &mut Mesh) {
        let [a, b, c] = self.corners;
        let order = if (b - a).perp_dot(c - a) >= 0.0 {
            [0, 1, 2]
        } else {
            [0, 2, 1]
        };
        let bottom = self.bottom_vertices();
        let top = self.top_vertices();
        let bottom = order.map(|i| bottom[i]);
        let top = order.map(|i| top[i]);

        let [b0, b1, b2] = bottom.map(|v| mesh.push_vertex(v));
        let [t0, t1, t2] = top.map(|v| mesh.push_vertex(v));
        mesh.push_triangle([t0, t1, t2]);
        mesh.push_triangle([b0, b2, b1]);

        // Side quads get their own corners so each wall stays flat-shaded.
        for (from, to) in [(0, 1), (1, 2), (2, 0)] {
            let [ba, bb, tb, ta] =
                [bottom[from], bottom[to], top[to], top[from]].map(|v| mesh.push_vertex(v));
            mesh.push_triangle([ba, bb, tb]);
            mesh.push_triangle([ba, tb, ta]);
        }
    }
}

/// Computes the top heights of a facet.
pub trait FacetStrategy {
    /// Shapes one facet.
    fn compute_facet(&self, facet: &FacetInput) -> FacetGeometry;
}

/// The strategy selected by a [`ReliefMethod`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Strategy {
    Angled(Angled),
    Heightmap(Heightmap),
    Hybrid(Hybrid),
}

impl Strategy {
    /// Builds the strategy for `config.method`.
    pub fn from_config(config: &MeshConfig) -> Self {
        let light = LightDirection::from_angles(config.light_azimuth, config.light_elevation);
        match config.method {
            ReliefMethod::Angled => Self::Angled(Angled::new(config, light)),
            ReliefMethod::Heightmap => Self::Heightmap(Heightmap::new(config)),
            ReliefMethod::Hybrid => Self::Hybrid(Hybrid::new(config, light)),
        }
    }
}

impl FacetStrategy for Strategy {
    fn compute_facet(&self, facet: &FacetInput) -> FacetGeometry {
        match self {
            Self::Angled(s) => s.compute_facet(facet),
            Self::Heightmap(s) => s.compute_facet(facet),
            Self::Hybrid(s) => s.compute_facet(facet),
        }
    }
}

/// Height offset of each corner on a plane through the centroid rising
/// along `axis` at `slope` (tangent of the tilt). `axis` is the horizontal
/// light component, so its length scales the rise.
fn tilt_offsets(facet: &FacetInput, axis: DVec2, slope: f64) -> [f64; 3] {
    let centroid = facet.centroid();
    facet.corners.map(|v| (v - centroid).dot(axis) * slope)
}

/// Raises all three heights uniformly so the lowest is at least `floor`.
fn enforce_min_wall(mut top: [f64; 3], floor: f64) -> [f64; 3] {
    let lowest = top.iter().copied().fold(f64::INFINITY, f64::min);
    if lowest < floor {
        let lift = floor - lowest;
        for z in &mut top {
            *z += lift;
        }
    }
    top
}
