//! # Relief Points
//!
//! Adaptive point distribution over a 2D feature field.
//!
//! ## Architecture
//!
//! ```text
//! FeatureField (brightness, edges, contrast) → PointGenerator → Vec<Point>
//! ```
//!
//! ## Algorithm
//!
//! A priority-ordered Poisson-disk variant:
//! - Boundary points seeded along the unit square outline
//! - Interior candidates ranked by edge strength and local contrast
//! - Acceptance against a per-point minimum distance using a hash grid
//!
//! ## Usage
//!
//! ```rust
//! use config::SamplingParams;
//! use relief_points::{PointGenerator, UniformField};
//!
//! let params = SamplingParams { cell_density: 8.0, ..Default::default() };
//! let points = PointGenerator::new(params).generate(&UniformField::new(0.5)).unwrap();
//! assert!(points.len() >= 4);
//! ```

pub mod error;
pub mod field;
pub mod generator;
pub mod grid;
pub mod point;
pub mod raster;

pub use error::PointError;
pub use field::{FeatureField, FieldSample, FnField, UniformField};
pub use generator::PointGenerator;
pub use grid::SpatialGrid;
pub use point::Point;
pub use raster::GrayscaleField;
