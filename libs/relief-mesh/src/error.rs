//! # Mesh Errors
//!
//! Error types for mesh building, tiling and the end-to-end pipeline.

use config::ConfigError;
use relief_points::PointError;
use std::fmt;
use thiserror::Error;

/// Errors that can occur while building a relief mesh.
#[derive(Debug, Error, PartialEq)]
pub enum MeshError {
    /// Configuration failed validation
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// No facet survived; the mesh would be empty
    #[error("No triangles to extrude ({skipped} invalid shapes skipped)")]
    NoTriangles { skipped: usize },

    /// Facet count whose vertices would not fit `u32` indices
    #[error("{facets} facets exceed the {max} facets a u32-indexed mesh can hold")]
    TooManyFacets { facets: usize, max: usize },

    /// Tile coordinates outside the tile grid
    #[error("Tile ({col}, {row}) is outside the {cols}x{rows} grid")]
    TileOutOfRange {
        col: usize,
        row: usize,
        cols: usize,
        rows: usize,
    },
}

/// Pipeline phase, reported when generation is cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Point distribution over the feature field
    Sampling,
    /// Delaunay triangulation
    Triangulation,
    /// Center-brightness sampling of the triangles
    Shading,
    /// Facet extrusion
    MeshBuild,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Sampling => "sampling",
            Phase::Triangulation => "triangulation",
            Phase::Shading => "shading",
            Phase::MeshBuild => "mesh build",
        };
        f.write_str(name)
    }
}

/// Errors surfaced by [`generate_relief`](crate::generate_relief) and
/// [`generate_tiles`](crate::generate_tiles).
#[derive(Debug, Error, PartialEq)]
pub enum ReliefError {
    /// Configuration failed validation
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Point generation failed
    #[error("Point generation failed: {0}")]
    Points(#[from] PointError),

    /// Triangulation produced nothing
    #[error("Triangulation of {points} points produced no triangles")]
    NoTriangles { points: usize },

    /// Mesh building failed
    #[error("Mesh build failed: {0}")]
    Mesh(#[from] MeshError),

    /// The cancellation token fired before `phase` started
    #[error("Generation cancelled before {phase}")]
    Cancelled { phase: Phase },
}

impl ReliefError {
    /// Creates a cancellation error.
    pub fn cancelled(phase: Phase) -> Self {
        Self::Cancelled { phase }
    }

    /// True when the error is a cancellation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }
}
