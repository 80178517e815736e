//! # Mesh Data Structure
//!
//! Flat triangle soup handed to exporters and renderers. Positions are in
//! millimeters with the origin at the horizontal center of the model.
//!
//! Facets never share vertices, so the soup is indexed but never welded.
//! Exporters must keep vertex order and winding as they are.

use config::constants::VERTEX_MERGE_EPSILON;
use glam::DVec3;
use serde::Serialize;

/// Indexed triangle soup in model millimeters.
///
/// Positions stay `f64` during the build and are narrowed to `f32` only by
/// [`vertices_f32`](Mesh::vertices_f32).
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use relief_mesh::Mesh;
///
/// let mut mesh = Mesh::new();
/// let a = mesh.push_vertex(DVec3::ZERO);
/// let b = mesh.push_vertex(DVec3::X);
/// let c = mesh.push_vertex(DVec3::Y);
/// mesh.push_triangle([a, b, c]);
/// assert_eq!(mesh.indices_u32(), vec![0, 1, 2]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    positions: Vec<DVec3>,
    triangles: Vec<[u32; 3]>,
}

/// Aggregate counts reported with every build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MeshStats {
    /// Number of vertices in the mesh
    pub vertex_count: usize,
    /// Number of triangles in the mesh
    pub triangle_count: usize,
    /// Facets extruded into prisms
    pub facets_built: usize,
    /// Input triangles rejected as invalid shapes
    pub facets_skipped: usize,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserves room for `vertices` positions and `triangles` faces.
    pub fn with_capacity(vertices: usize, triangles: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertices),
            triangles: Vec::with_capacity(triangles),
        }
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Appends a position and returns its index.
    ///
    /// Indices are `u32`, so a mesh holds at most `u32::MAX + 1` vertices.
    /// [`MeshBuilder`](crate::MeshBuilder) rejects larger inputs before
    /// pushing anything.
    pub fn push_vertex(&mut self, position: DVec3) -> u32 {
        let index = self.positions.len();
        debug_assert!(u32::try_from(index).is_ok(), "vertex index overflows u32");
        self.positions.push(position);
        index as u32
    }

    /// Appends a face. Winding is counter-clockwise seen from outside.
    pub fn push_triangle(&mut self, face: [u32; 3]) {
        self.triangles.push(face);
    }

    #[inline]
    pub fn vertices(&self) -> &[DVec3] {
        &self.positions
    }

    #[inline]
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// Position of vertex `index`, if it exists.
    pub fn position(&self, index: u32) -> Option<DVec3> {
        self.positions.get(index as usize).copied()
    }

    /// Corner positions of face `index`, if the face and its vertices exist.
    pub fn triangle_corners(&self, index: usize) -> Option<[DVec3; 3]> {
        let [a, b, c] = *self.triangles.get(index)?;
        Some([self.position(a)?, self.position(b)?, self.position(c)?])
    }

    /// Axis-aligned `(min, max)` of all positions, or `None` when empty.
    pub fn bounding_box(&self) -> Option<(DVec3, DVec3)> {
        let first = *self.positions.first()?;
        Some(
            self.positions
                .iter()
                .fold((first, first), |(lo, hi), &p| (lo.min(p), hi.max(p))),
        )
    }

    /// True when every face references existing, distinct vertices and
    /// spans a non-zero area.
    pub fn validate(&self) -> bool {
        (0..self.triangles.len()).all(|index| {
            let [a, b, c] = self.triangles[index];
            a != b
                && b != c
                && a != c
                && self
                    .triangle_corners(index)
                    .is_some_and(|[p, q, r]| (q - p).cross(r - p).length() >= VERTEX_MERGE_EPSILON)
        })
    }

    /// Positions as `[x, y, z, x, y, z, ...]`.
    pub fn vertices_f32(&self) -> Vec<f32> {
        let mut buffer = Vec::with_capacity(self.positions.len() * 3);
        for p in &self.positions {
            buffer.extend_from_slice(&p.as_vec3().to_array());
        }
        buffer
    }

    /// Faces as `[a, b, c, a, b, c, ...]`.
    pub fn indices_u32(&self) -> Vec<u32> {
        self.triangles.concat()
    }
}
