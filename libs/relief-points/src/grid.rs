//! # Spatial Grid
//!
//! Uniform hash grid used for minimum-distance queries during sampling.
//! One grid is built per generation request and dropped with it.
//!
//! ## Example
//!
//! ```rust
//! use glam::DVec2;
//! use relief_points::{Point, SpatialGrid};
//!
//! let points = vec![Point::new(0.5, 0.5, 1.0)];
//! let mut grid = SpatialGrid::new(0.1);
//! grid.insert(0, points[0].position());
//! assert!(!grid.is_free(&points, DVec2::new(0.52, 0.5), 0.1));
//! assert!(grid.is_free(&points, DVec2::new(0.8, 0.5), 0.1));
//! ```

use crate::point::Point;
use glam::DVec2;
use std::collections::HashMap;

/// 2D cell coordinate for spatial hashing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CellCoord {
    x: i64,
    y: i64,
}

impl CellCoord {
    /// Creates a cell coordinate from a position.
    fn from_position(pos: DVec2, cell_size: f64) -> Self {
        Self {
            x: (pos.x / cell_size).floor() as i64,
            y: (pos.y / cell_size).floor() as i64,
        }
    }
}

/// Hash grid mapping cells to point indices.
#[derive(Debug, Clone)]
pub struct SpatialGrid {
    /// Hash grid: cell -> point indices
    cells: HashMap<CellCoord, Vec<usize>>,
    /// Edge length of a cell
    cell_size: f64,
    /// Number of stored indices
    len: usize,
    /// Lowest and highest occupied cell on each axis
    occupied: Option<(CellCoord, CellCoord)>,
}

impl SpatialGrid {
    /// Creates an empty grid. Non-positive sizes fall back to 1.
    pub fn new(cell_size: f64) -> Self {
        let cell_size = if cell_size.is_finite() && cell_size > 0.0 {
            cell_size
        } else {
            1.0
        };
        Self {
            cells: HashMap::new(),
            cell_size,
            len: 0,
            occupied: None,
        }
    }

    /// Returns the cell edge length.
    #[inline]
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Returns the number of stored points.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if nothing has been inserted.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Registers point `index` at `position`.
    pub fn insert(&mut self, index: usize, position: DVec2) {
        let cell = CellCoord::from_position(position, self.cell_size);
        self.cells.entry(cell).or_default().push(index);
        self.len += 1;
        self.occupied = Some(match self.occupied {
            Some((lo, hi)) => (
                CellCoord {
                    x: lo.x.min(cell.x),
                    y: lo.y.min(cell.y),
                },
                CellCoord {
                    x: hi.x.max(cell.x),
                    y: hi.y.max(cell.y),
                },
            ),
            None => (cell, cell),
        });
    }

    /// Visits the indices stored in every cell that can hold a point within
    /// `radius` of `position`. The neighborhood spans `ceil(radius /
    /// cell_size)` rings, so 3×3 for radii up to one cell and 5×5 up to two.
    /// The scan never leaves the occupied cells, so wide radii cost at most
    /// one pass over the grid.
    pub fn for_each_candidate(&self, position: DVec2, radius: f64, mut visit: impl FnMut(usize)) {
        let Some((lo, hi)) = self.occupied else {
            return;
        };
        let center = CellCoord::from_position(position, self.cell_size);
        let rings = (radius / self.cell_size).ceil().max(1.0) as i64;

        let x_range = center.x.saturating_sub(rings).max(lo.x)..=center.x.saturating_add(rings).min(hi.x);
        let y_range = center.y.saturating_sub(rings).max(lo.y)..=center.y.saturating_add(rings).min(hi.y);
        for y in y_range {
            for x in x_range.clone() {
                if let Some(indices) = self.cells.get(&CellCoord { x, y }) {
                    indices.iter().copied().for_each(&mut visit);
                }
            }
        }
    }

    /// Returns true if no stored point lies closer than `radius`.
    pub fn is_free(&self, points: &[Point], position: DVec2, radius: f64) -> bool {
        let radius_sq = radius * radius;
        let mut free = true;
        self.for_each_candidate(position, radius, |index| {
            if free && points[index].position().distance_squared(position) < radius_sq {
                free = false;
            }
        });
        free
    }

    /// Returns the indices of stored points closer than `radius`.
    pub fn within(&self, points: &[Point], position: DVec2, radius: f64) -> Vec<usize> {
        let radius_sq = radius * radius;
        let mut found = Vec::new();
        self.for_each_candidate(position, radius, |index| {
            if points[index].position().distance_squared(position) < radius_sq {
                found.push(index);
            }
        });
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with(points: &[Point], cell_size: f64) -> SpatialGrid {
        let mut grid = SpatialGrid::new(cell_size);
        for (i, p) in points.iter().enumerate() {
            grid.insert(i, p.position());
        }
        grid
    }

    #[test]
    fn test_grid_insert_counts() {
        let points = vec![Point::new(0.1, 0.1, 0.0), Point::new(0.9, 0.9, 0.0)];
        let grid = grid_with(&points, 0.25);
        assert_eq!(grid.len(), 2);
        assert!(!grid.is_empty());
    }

    #[test]
    fn test_grid_detects_neighbor_across_cell_border() {
        let points = vec![Point::new(0.249, 0.5, 0.0)];
        let grid = grid_with(&points, 0.25);
        assert!(!grid.is_free(&points, DVec2::new(0.251, 0.5), 0.01));
        assert!(grid.is_free(&points, DVec2::new(0.3, 0.5), 0.01));
    }

    #[test]
    fn test_grid_wide_radius_searches_more_rings() {
        // Radius of 1.8 cells needs the 5x5 neighborhood.
        let points = vec![Point::new(0.05, 0.05, 0.0)];
        let grid = grid_with(&points, 0.1);
        assert!(!grid.is_free(&points, DVec2::new(0.2, 0.05), 0.18));
    }

    #[test]
    fn test_grid_within_matches_brute_force() {
        let points: Vec<Point> = (0..50)
            .map(|i| {
                let t = i as f64 / 50.0;
                Point::new(t, (t * 7.0).fract(), 0.0)
            })
            .collect();
        let grid = grid_with(&points, 0.07);
        let query = DVec2::new(0.4, 0.6);
        let mut found = grid.within(&points, query, 0.2);
        found.sort_unstable();
        let expected: Vec<usize> = points
            .iter()
            .enumerate()
            .filter(|(_, p)| p.position().distance(query) < 0.2)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(found, expected);
    }

    #[test]
    fn test_grid_oversized_radius_stays_within_occupied_cells() {
        let points = vec![Point::new(0.0, 0.0, 0.0), Point::new(1.0, 1.0, 0.0)];
        let grid = grid_with(&points, 1e-4);

        let mut found = grid.within(&points, DVec2::new(0.5, 0.5), 1e3);
        found.sort_unstable();
        assert_eq!(found, vec![0, 1]);
        assert!(!grid.is_free(&points, DVec2::new(0.5, 0.5), f64::INFINITY));
    }

    #[test]
    fn test_grid_empty_is_free() {
        let grid = SpatialGrid::new(0.1);
        assert!(grid.is_free(&[], DVec2::new(0.5, 0.5), 10.0));
    }

    #[test]
    fn test_grid_rejects_bad_cell_size() {
        assert_eq!(SpatialGrid::new(0.0).cell_size(), 1.0);
        assert_eq!(SpatialGrid::new(f64::NAN).cell_size(), 1.0);
    }
}
