//! # Relief Pipeline
//!
//! End-to-end generation for one request:
//!
//! ```text
//! field → points → triangulation → center sampling → mesh (or tiles)
//! ```
//!
//! Cancellation is checked between phases only. Bowyer-Watson is not
//! interrupted mid-insertion, so a cancelled run never leaves a partial
//! triangulation behind.

use crate::builder::{MeshBuilder, ReliefMesh};
use crate::error::{Phase, ReliefError};
use crate::mesh::{Mesh, MeshStats};
use crate::tile::{TileDescriptor, TileInfo, TileSplitter};
use config::ReliefConfig;
use relief_delaunay::{Triangle, Triangulation};
use relief_points::{FeatureField, Point, PointGenerator};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

/// Cloneable flag shared between the caller and a running generation.
///
/// # Example
///
/// ```rust
/// use relief_mesh::CancellationToken;
///
/// let token = CancellationToken::new();
/// let handle = token.clone();
/// handle.cancel();
/// assert!(token.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    /// Creates a token that is not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// True once [`cancel`](Self::cancel) was called on any clone.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    fn check(&self, phase: Phase) -> Result<(), ReliefError> {
        if self.is_cancelled() {
            debug!(%phase, "Generation cancelled");
            return Err(ReliefError::cancelled(phase));
        }
        Ok(())
    }
}

/// Result of [`generate_relief`].
#[derive(Debug, Clone)]
pub struct ReliefOutput {
    /// Sampled points the mesh was built from
    pub points: Vec<Point>,
    /// Relief mesh in millimeters
    pub mesh: Mesh,
    /// Build statistics
    pub stats: MeshStats,
}

/// Result of [`generate_tiles`].
#[derive(Debug, Clone)]
pub struct TiledOutput {
    /// Sampled points the tiles were built from
    pub points: Vec<Point>,
    /// Tile grid
    pub info: TileInfo,
    /// One mesh per tile, row-major
    pub tiles: Vec<(TileDescriptor, ReliefMesh)>,
}

/// Generates a relief mesh from `field`.
///
/// # Example
///
/// ```rust
/// use config::ReliefConfig;
/// use relief_mesh::{generate_relief, CancellationToken};
/// use relief_points::UniformField;
///
/// let mut config = ReliefConfig::default();
/// config.sampling.cell_density = 6.0;
/// let output = generate_relief(&UniformField::new(0.5), &config, &CancellationToken::new()).unwrap();
/// assert_eq!(output.stats.triangle_count, output.mesh.triangle_count());
/// ```
pub fn generate_relief<F>(
    field: &F,
    config: &ReliefConfig,
    cancel: &CancellationToken,
) -> Result<ReliefOutput, ReliefError>
where
    F: FeatureField + ?Sized,
{
    let (points, triangulation) = sample_and_triangulate(field, config, cancel)?;

    let relief = {
        let triangles = shade(field, &points, &triangulation, cancel)?;
        cancel.check(Phase::MeshBuild)?;
        MeshBuilder::new(&config.mesh).build(&triangles)?
    };

    info!(
        "Relief ready: {} points, {} triangles",
        points.len(),
        relief.stats.triangle_count
    );
    Ok(ReliefOutput {
        points,
        mesh: relief.mesh,
        stats: relief.stats,
    })
}

/// Generates one mesh per printer-bed tile. Uses `config.tiles`, or the
/// default bed when none is configured.
pub fn generate_tiles<F>(
    field: &F,
    config: &ReliefConfig,
    cancel: &CancellationToken,
) -> Result<TiledOutput, ReliefError>
where
    F: FeatureField + ?Sized,
{
    let splitter = TileSplitter::new(&config.mesh, &config.tiles.unwrap_or_default())?;
    let (points, triangulation) = sample_and_triangulate(field, config, cancel)?;

    let tiles = {
        let triangles = shade(field, &points, &triangulation, cancel)?;
        cancel.check(Phase::MeshBuild)?;
        splitter.build_all(&triangles)?
    };

    Ok(TiledOutput {
        points,
        info: splitter.tile_info(),
        tiles,
    })
}

fn sample_and_triangulate<F>(
    field: &F,
    config: &ReliefConfig,
    cancel: &CancellationToken,
) -> Result<(Vec<Point>, Triangulation), ReliefError>
where
    F: FeatureField + ?Sized,
{
    config.validate()?;

    cancel.check(Phase::Sampling)?;
    let points = PointGenerator::new(config.sampling).generate(field)?;

    cancel.check(Phase::Triangulation)?;
    let triangulation = Triangulation::new(&points);
    if triangulation.is_empty() {
        return Err(ReliefError::NoTriangles {
            points: points.len(),
        });
    }
    Ok((points, triangulation))
}

/// Materializes the triangles and attaches the field brightness at each
/// centroid.
fn shade<'p, F>(
    field: &F,
    points: &'p [Point],
    triangulation: &Triangulation,
    cancel: &CancellationToken,
) -> Result<Vec<Triangle<'p>>, ReliefError>
where
    F: FeatureField + ?Sized,
{
    cancel.check(Phase::Shading)?;
    let mut triangles = triangulation.triangles(points);
    for triangle in &mut triangles {
        triangle.sample_center(field);
    }
    Ok(triangles)
}
