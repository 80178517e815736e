//! # Mesh Builder
//!
//! Extrudes every triangle of a triangulation into a closed prism.
//!
//! ## Coordinates
//!
//! Normalized image coordinates map to millimeters centered on the origin:
//!
//! ```text
//! x_mm = (x - 0.5) * output_width
//! y_mm = (0.5 - y) * output_height    // image rows grow down, model y up
//! ```

use crate::error::MeshError;
use crate::facet::{FacetInput, FacetStrategy, Strategy, FACET_TRIANGLES, FACET_VERTICES};
use crate::mesh::{Mesh, MeshStats};
use config::constants::EPSILON;
use config::MeshConfig;
use glam::DVec2;
use relief_delaunay::Triangle;
use tracing::{debug, info, warn};

/// A built mesh together with its statistics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReliefMesh {
    /// Triangle soup in millimeters
    pub mesh: Mesh,
    /// Counts gathered during the build
    pub stats: MeshStats,
}

/// Builds relief meshes for one configuration.
///
/// # Example
///
/// ```rust
/// use config::{MeshConfig, ReliefMethod};
/// use relief_delaunay::triangulate;
/// use relief_mesh::MeshBuilder;
/// use relief_points::Point;
///
/// let points = [
///     Point::new(0.0, 0.0, 0.0),
///     Point::new(1.0, 0.0, 0.0),
///     Point::new(1.0, 1.0, 1.0),
///     Point::new(0.0, 1.0, 1.0),
/// ];
/// let config = MeshConfig { method: ReliefMethod::Heightmap, ..Default::default() };
/// let relief = MeshBuilder::new(&config).build(&triangulate(&points)).unwrap();
/// assert_eq!(relief.stats.triangle_count, 16);
/// ```
#[derive(Debug, Clone)]
pub struct MeshBuilder {
    config: MeshConfig,
    strategy: Strategy,
}

impl MeshBuilder {
    /// Creates a builder for `config`.
    pub fn new(config: &MeshConfig) -> Self {
        Self {
            config: *config,
            strategy: Strategy::from_config(config),
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &MeshConfig {
        &self.config
    }

    /// Maps a normalized point to model millimeters.
    pub fn to_model(&self, position: DVec2) -> DVec2 {
        DVec2::new(
            (position.x - 0.5) * self.config.output_width,
            (0.5 - position.y) * self.config.output_height,
        )
    }

    /// Extrudes `triangles` into a mesh.
    ///
    /// Triangles with non-finite coordinates or zero area are skipped and
    /// counted. Fails when the configuration is invalid or nothing is left
    /// to extrude.
    pub fn build(&self, triangles: &[Triangle<'_>]) -> Result<ReliefMesh, MeshError> {
        self.config.validate()?;
        check_capacity(triangles.len())?;

        let mut mesh = Mesh::with_capacity(
            triangles.len() * FACET_VERTICES,
            triangles.len() * FACET_TRIANGLES,
        );
        let mut skipped = 0;

        for (index, triangle) in triangles.iter().enumerate() {
            let Some(input) = self.facet_input(triangle) else {
                warn!(index, indices = ?triangle.indices(), "Invalid facet shape, skipped");
                skipped += 1;
                continue;
            };
            self.strategy.compute_facet(&input).emit(&mut mesh);
        }

        let built = triangles.len() - skipped;
        if built == 0 {
            return Err(MeshError::NoTriangles { skipped });
        }

        let stats = MeshStats {
            vertex_count: mesh.vertex_count(),
            triangle_count: mesh.triangle_count(),
            facets_built: built,
            facets_skipped: skipped,
        };
        info!(
            "Built {:?} relief: {} facets, {} vertices, {} triangles ({} skipped)",
            self.config.method, built, stats.vertex_count, stats.triangle_count, skipped
        );

        Ok(ReliefMesh { mesh, stats })
    }

    /// Maps a triangle into model space, or `None` for an invalid shape.
    fn facet_input(&self, triangle: &Triangle<'_>) -> Option<FacetInput> {
        let corners = triangle.positions().map(|p| self.to_model(p));
        if !corners.iter().all(|c| c.is_finite()) {
            return None;
        }
        let [a, b, c] = corners;
        let area2 = (b - a).perp_dot(c - a);
        if !(area2.abs() > EPSILON) {
            debug!(area2, "Zero-area facet");
            return None;
        }

        Some(FacetInput {
            corners,
            vertex_brightness: triangle.vertices().map(|p| p.brightness),
            brightness: triangle.brightness(self.config.tone.center_weight),
        })
    }
}

/// Largest facet count whose vertices still have `u32` indices.
pub const MAX_FACETS: usize = u32::MAX as usize / FACET_VERTICES;

fn check_capacity(facets: usize) -> Result<(), MeshError> {
    if facets > MAX_FACETS {
        return Err(MeshError::TooManyFacets {
            facets,
            max: MAX_FACETS,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests;
