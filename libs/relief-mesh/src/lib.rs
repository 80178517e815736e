//! # Relief Mesh
//!
//! Turns a Delaunay triangulation into a printable faceted relief.
//!
//! ## Architecture
//!
//! ```text
//! FeatureField → relief-points (Vec<Point>)
//!              → relief-delaunay (Vec<Triangle>)
//!              → relief-mesh (Mesh, or one Mesh per tile)
//! ```
//!
//! Every triangle becomes a closed prism with its own top face. Facets
//! share no vertices, which gives the flat-shaded look and keeps each prism
//! watertight on its own.
//!
//! ## Usage
//!
//! ```rust
//! use config::ReliefConfig;
//! use relief_mesh::{generate_relief, CancellationToken};
//! use relief_points::FnField;
//! use relief_points::FieldSample;
//!
//! let field = FnField::new(|x, y| FieldSample::flat((x + y) / 2.0));
//! let mut config = ReliefConfig::default();
//! config.sampling.cell_density = 8.0;
//!
//! let output = generate_relief(&field, &config, &CancellationToken::new()).unwrap();
//! let vertices = output.mesh.vertices_f32();
//! let indices = output.mesh.indices_u32();
//! assert_eq!(vertices.len(), output.stats.vertex_count * 3);
//! assert_eq!(indices.len(), output.stats.triangle_count * 3);
//! ```

pub mod builder;
pub mod error;
pub mod facet;
pub mod light;
pub mod mesh;
pub mod pipeline;
pub mod tile;
pub mod tone;

pub use builder::{MeshBuilder, ReliefMesh, MAX_FACETS};
pub use error::{MeshError, Phase, ReliefError};
pub use facet::{FacetGeometry, FacetInput, FacetStrategy, Strategy};
pub use light::LightDirection;
pub use mesh::{Mesh, MeshStats};
pub use pipeline::{generate_relief, generate_tiles, CancellationToken, ReliefOutput, TiledOutput};
pub use tile::{TileDescriptor, TileInfo, TileSplitter};
pub use tone::TiltCurve;
