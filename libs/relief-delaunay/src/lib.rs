//! # Relief Delaunay
//!
//! Bowyer-Watson Delaunay triangulation over the points produced by
//! `relief-points`.
//!
//! ## Architecture
//!
//! ```text
//! Vec<Point> → triangulate → Vec<Triangle<'_>> (borrowing the points)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use relief_delaunay::triangulate;
//! use relief_points::Point;
//!
//! let points = vec![
//!     Point::new(0.0, 0.0, 0.0),
//!     Point::new(1.0, 0.0, 0.0),
//!     Point::new(0.0, 1.0, 1.0),
//!     Point::new(1.0, 1.0, 1.0),
//! ];
//! let triangles = triangulate(&points);
//! assert_eq!(triangles.len(), 2);
//! ```

pub mod bowyer_watson;
pub mod circle;
pub mod triangle;
pub mod verify;

pub use bowyer_watson::{triangulate, Triangulation};
pub use circle::Circumcircle;
pub use triangle::Triangle;
pub use verify::is_delaunay;
