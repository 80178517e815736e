//! # Point Errors
//!
//! Error types for feature fields and point generation.

use thiserror::Error;

/// Errors that can occur while sampling a field or generating points.
#[derive(Debug, Error, PartialEq)]
pub enum PointError {
    /// Too few points to triangulate.
    #[error("Point set is empty: {count} points generated (need at least 3)")]
    EmptyPointSet { count: usize },

    /// Raster dimensions do not match the pixel buffer.
    #[error("Invalid raster: {width}x{height} does not match {len} pixels")]
    InvalidRaster {
        width: usize,
        height: usize,
        len: usize,
    },
}
