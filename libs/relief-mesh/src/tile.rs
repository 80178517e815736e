//! # Tile Splitter
//!
//! Splits a relief that is larger than the printer bed into a grid of
//! tiles. Neighboring tiles share an overlap strip, and triangles crossing
//! a tile border are copied into every tile they touch rather than clipped,
//! so printed tiles can be aligned and glued.
//!
//! ## Layout
//!
//! ```text
//! usable = bed - overlap
//! cols   = ceil(output_width / usable_w)     (at least 1)
//! origin = col * usable_w / output_width     (normalized)
//! extent = (usable_w + overlap) / output_width
//! ```
//!
//! Each tile is rebuilt at `usable + overlap` millimeters from triangles
//! remapped into the tile's own [0,1]² frame.

use crate::builder::{MeshBuilder, ReliefMesh};
use crate::error::MeshError;
use config::constants::TILE_EPSILON;
use config::{MeshConfig, TileConfig};
use glam::DVec2;
use rayon::prelude::*;
use relief_delaunay::Triangle;
use relief_points::Point;
use serde::Serialize;
use tracing::{debug, info};

/// One tile of the grid, in normalized image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TileDescriptor {
    /// Column index, left to right
    pub col: usize,
    /// Row index, top to bottom of the image
    pub row: usize,
    /// Normalized top-left corner
    pub origin: DVec2,
    /// Normalized size, overlap included
    pub extent: DVec2,
}

impl TileDescriptor {
    /// True if `p` lies within the tile expanded by `TILE_EPSILON`.
    pub fn contains(&self, p: DVec2) -> bool {
        let min = self.origin - TILE_EPSILON;
        let max = self.origin + self.extent + TILE_EPSILON;
        p.cmpge(min).all() && p.cmple(max).all()
    }
}

/// Tile grid derived from the configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TileInfo {
    /// Number of columns
    pub cols: usize,
    /// Number of rows
    pub rows: usize,
    /// Descriptors in row-major order
    pub tiles: Vec<TileDescriptor>,
}

/// Splits triangles into printer-bed tiles.
///
/// # Example
///
/// ```rust
/// use config::{MeshConfig, TileConfig};
/// use relief_mesh::TileSplitter;
///
/// let mesh = MeshConfig { output_width: 400.0, output_height: 150.0, ..Default::default() };
/// let tiles = TileConfig { bed_width: 220.0, bed_height: 220.0, overlap: 5.0 };
/// let info = TileSplitter::new(&mesh, &tiles).unwrap().tile_info();
/// assert_eq!((info.cols, info.rows), (2, 1));
/// ```
#[derive(Debug, Clone)]
pub struct TileSplitter {
    mesh: MeshConfig,
    tiles: TileConfig,
    usable: DVec2,
    cols: usize,
    rows: usize,
}

impl TileSplitter {
    /// Creates a splitter, validating both configurations.
    pub fn new(mesh: &MeshConfig, tiles: &TileConfig) -> Result<Self, MeshError> {
        mesh.validate()?;
        tiles.validate()?;

        let usable = DVec2::new(tiles.bed_width, tiles.bed_height) - tiles.overlap;
        let cols = grid_count(mesh.output_width, usable.x);
        let rows = grid_count(mesh.output_height, usable.y);
        debug!(cols, rows, "Tile grid");

        Ok(Self {
            mesh: *mesh,
            tiles: *tiles,
            usable,
            cols,
            rows,
        })
    }

    /// Returns the tile grid.
    pub fn tile_info(&self) -> TileInfo {
        let tiles = (0..self.rows)
            .flat_map(|row| (0..self.cols).map(move |col| (col, row)))
            .map(|(col, row)| self.descriptor_unchecked(col, row))
            .collect();
        TileInfo {
            cols: self.cols,
            rows: self.rows,
            tiles,
        }
    }

    /// Returns the descriptor of tile `(col, row)`.
    pub fn descriptor(&self, col: usize, row: usize) -> Result<TileDescriptor, MeshError> {
        if col >= self.cols || row >= self.rows {
            return Err(MeshError::TileOutOfRange {
                col,
                row,
                cols: self.cols,
                rows: self.rows,
            });
        }
        Ok(self.descriptor_unchecked(col, row))
    }

    fn descriptor_unchecked(&self, col: usize, row: usize) -> TileDescriptor {
        let size = DVec2::new(self.mesh.output_width, self.mesh.output_height);
        TileDescriptor {
            col,
            row,
            origin: DVec2::new(col as f64, row as f64) * self.usable / size,
            extent: (self.usable + self.tiles.overlap) / size,
        }
    }

    /// Keeps triangles with any vertex or the centroid inside the tile.
    pub fn select<'p>(
        &self,
        triangles: &[Triangle<'p>],
        col: usize,
        row: usize,
    ) -> Result<Vec<Triangle<'p>>, MeshError> {
        let tile = self.descriptor(col, row)?;
        Ok(select_in(&tile, triangles))
    }

    /// Maps a normalized image point into the tile's [0,1]² frame.
    pub fn remap_point(&self, tile: &TileDescriptor, p: DVec2) -> DVec2 {
        (p - tile.origin) / tile.extent
    }

    /// Inverse of [`remap_point`](Self::remap_point).
    pub fn unmap_point(&self, tile: &TileDescriptor, p: DVec2) -> DVec2 {
        tile.origin + p * tile.extent
    }

    /// Mesh configuration of a single tile.
    pub fn tile_mesh_config(&self) -> MeshConfig {
        let size = self.usable + self.tiles.overlap;
        MeshConfig {
            output_width: size.x,
            output_height: size.y,
            ..self.mesh
        }
    }

    /// Builds the mesh of tile `(col, row)`.
    pub fn build_tile(
        &self,
        triangles: &[Triangle<'_>],
        col: usize,
        row: usize,
    ) -> Result<ReliefMesh, MeshError> {
        let tile = self.descriptor(col, row)?;
        self.build_descriptor(&tile, triangles)
    }

    /// Builds every tile in parallel.
    pub fn build_all(
        &self,
        triangles: &[Triangle<'_>],
    ) -> Result<Vec<(TileDescriptor, ReliefMesh)>, MeshError> {
        let info = self.tile_info();
        let tiles: Vec<(TileDescriptor, ReliefMesh)> = info
            .tiles
            .par_iter()
            .map(|tile| {
                self.build_descriptor(tile, triangles)
                    .map(|relief| (*tile, relief))
            })
            .collect::<Result<_, _>>()?;
        info!("Built {} tiles ({}x{})", tiles.len(), self.cols, self.rows);
        Ok(tiles)
    }

    fn build_descriptor(
        &self,
        tile: &TileDescriptor,
        triangles: &[Triangle<'_>],
    ) -> Result<ReliefMesh, MeshError> {
        let selected = select_in(tile, triangles);

        // Each selected triangle gets its own three remapped points.
        let points: Vec<Point> = selected
            .iter()
            .flat_map(|t| t.vertices())
            .map(|p| p.with_position(self.remap_point(tile, p.position())))
            .collect();

        let local: Vec<Triangle<'_>> = selected
            .iter()
            .zip(points.chunks_exact(3))
            .enumerate()
            .map(|(i, (source, corners))| {
                let base = i * 3;
                let triangle =
                    Triangle::new([&corners[0], &corners[1], &corners[2]], [base, base + 1, base + 2]);
                match source.center_brightness() {
                    Some(center) => triangle.with_center_brightness(center),
                    None => triangle,
                }
            })
            .collect();

        debug!(
            col = tile.col,
            row = tile.row,
            triangles = local.len(),
            "Building tile"
        );
        MeshBuilder::new(&self.tile_mesh_config()).build(&local)
    }
}

fn select_in<'p>(tile: &TileDescriptor, triangles: &[Triangle<'p>]) -> Vec<Triangle<'p>> {
    triangles
        .iter()
        .filter(|t| {
            t.positions().iter().any(|&p| tile.contains(p)) || tile.contains(t.centroid())
        })
        .copied()
        .collect()
}

fn grid_count(output: f64, usable: f64) -> usize {
    ((output / usable).ceil() as usize).max(1)
}
