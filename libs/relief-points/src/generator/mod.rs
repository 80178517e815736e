//! # Adaptive Point Generator
//!
//! Priority-ordered Poisson-disk sampling of a [`FeatureField`].
//!
//! ## Algorithm Steps
//!
//! 1. Seed boundary points along all four edges of the unit square
//! 2. Rank interior sub-grid candidates by edge strength and contrast
//! 3. Accept candidates in priority order when no stored point lies within
//!    their local minimum distance (smaller on edges and in dark regions)
//! 4. Thicken strong edges with one or two extra points at tighter spacing
//!
//! Jitter draws come from an explicit RNG so that a seed reproduces the
//! exact same point set.

use crate::error::PointError;
use crate::field::{FeatureField, FieldSample};
use crate::grid::SpatialGrid;
use crate::point::Point;
use config::constants::{
    BOUNDARY_STEP_FACTOR, CANDIDATE_STEP_FACTOR, CONTRAST_PRIORITY_WEIGHT, EDGE_EXTRA_OFFSET,
    EDGE_EXTRA_SPACING, EDGE_SPACING_FACTOR, EDGE_THRESHOLD, STRONG_EDGE_THRESHOLD,
};
use config::SamplingParams;
use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::f64::consts::TAU;
use tracing::{debug, info};

/// Distributes points over a feature field.
///
/// # Example
///
/// ```rust
/// use config::SamplingParams;
/// use relief_points::{PointGenerator, UniformField};
///
/// let params = SamplingParams { cell_density: 10.0, seed: 42, ..Default::default() };
/// let generator = PointGenerator::new(params);
/// let a = generator.generate(&UniformField::new(0.4)).unwrap();
/// let b = generator.generate(&UniformField::new(0.4)).unwrap();
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone)]
pub struct PointGenerator {
    params: SamplingParams,
}

/// Interior candidate awaiting acceptance.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    position: DVec2,
    sample: FieldSample,
    priority: f64,
}

impl PointGenerator {
    /// Creates a generator for the given parameters.
    pub fn new(params: SamplingParams) -> Self {
        Self { params }
    }

    /// Returns the sampling parameters.
    pub fn params(&self) -> &SamplingParams {
        &self.params
    }

    /// Generates points with a `ChaCha8Rng` seeded from `params.seed`.
    pub fn generate<F>(&self, field: &F) -> Result<Vec<Point>, PointError>
    where
        F: FeatureField + ?Sized,
    {
        let mut rng = ChaCha8Rng::seed_from_u64(self.params.seed);
        self.generate_with_rng(field, &mut rng)
    }

    /// Generates points drawing jitter from a caller-supplied RNG.
    pub fn generate_with_rng<F, R>(&self, field: &F, rng: &mut R) -> Result<Vec<Point>, PointError>
    where
        F: FeatureField + ?Sized,
        R: Rng,
    {
        let spacing = self.params.base_spacing();
        if !(spacing.is_finite() && spacing > 0.0) {
            debug!(spacing, "Cell density yields no usable spacing");
            return Err(PointError::EmptyPointSet { count: 0 });
        }

        let mut points = Vec::new();
        let mut grid = SpatialGrid::new(spacing);

        self.seed_boundary(field, spacing, &mut points, &mut grid);
        let boundary_count = points.len();

        let step = spacing * CANDIDATE_STEP_FACTOR;
        let candidates = self.rank_candidates(field, step);
        let candidate_count = candidates.len();

        let mut refinement_count = 0;
        for candidate in candidates {
            let radius = self.local_radius(&candidate.sample, spacing);
            let position = self.jitter(candidate.position, step, rng);
            if !grid.is_free(&points, position, radius) {
                continue;
            }
            accept(field, position, radius, &mut points, &mut grid);

            if self.params.edge_refinement && candidate.sample.edge_strength > STRONG_EDGE_THRESHOLD {
                refinement_count += refine_edge(field, &candidate, position, radius, rng, &mut points, &mut grid);
            }
        }

        info!(
            "Generated {} points ({} boundary, {} edge refinements) from {} candidates",
            points.len(),
            boundary_count,
            refinement_count,
            candidate_count
        );

        if points.len() < 3 {
            return Err(PointError::EmptyPointSet {
                count: points.len(),
            });
        }
        Ok(points)
    }

    /// Seeds the square outline, corners included exactly once.
    fn seed_boundary<F>(&self, field: &F, spacing: f64, points: &mut Vec<Point>, grid: &mut SpatialGrid)
    where
        F: FeatureField + ?Sized,
    {
        let substep = spacing * BOUNDARY_STEP_FACTOR;
        let segments = (1.0 / substep).ceil().max(1.0) as usize;
        let radius = 1.0 / segments as f64;

        // Walk each side from one corner up to (not including) the next.
        for side in 0..4 {
            for i in 0..segments {
                let t = i as f64 / segments as f64;
                let position = match side {
                    0 => DVec2::new(t, 0.0),
                    1 => DVec2::new(1.0, t),
                    2 => DVec2::new(1.0 - t, 1.0),
                    _ => DVec2::new(0.0, 1.0 - t),
                };
                let sample = field.sample(position.x, position.y);
                let index = points.len();
                points.push(Point {
                    x: position.x,
                    y: position.y,
                    brightness: sample.brightness,
                    is_edge: sample.edge_strength > EDGE_THRESHOLD,
                    is_boundary: true,
                    radius,
                });
                grid.insert(index, position);
            }
        }
    }

    /// Samples the interior sub-grid and sorts it by descending priority.
    /// The sort is stable, so equal priorities keep scan order.
    fn rank_candidates<F>(&self, field: &F, step: f64) -> Vec<Candidate>
    where
        F: FeatureField + ?Sized,
    {
        let steps = (1.0 / step).floor() as usize;
        let mut candidates = Vec::with_capacity(steps.saturating_sub(1).pow(2));

        for j in 1..steps {
            for i in 1..steps {
                let position = DVec2::new(i as f64 * step, j as f64 * step);
                if position.x >= 1.0 || position.y >= 1.0 {
                    continue;
                }
                let sample = field.sample(position.x, position.y);
                let priority = sample.edge_strength * self.params.edge_sensitivity
                    + sample.local_contrast * CONTRAST_PRIORITY_WEIGHT;
                candidates.push(Candidate {
                    position,
                    sample,
                    priority,
                });
            }
        }

        candidates.sort_by(|a, b| b.priority.total_cmp(&a.priority));
        candidates
    }

    /// Local minimum distance for a candidate.
    ///
    /// Edge candidates shrink by `EDGE_SPACING_FACTOR`; with adaptive sizing
    /// the radius scales linearly from `min_cell_scale` at black to
    /// `max_cell_scale` at white.
    pub fn local_radius(&self, sample: &FieldSample, spacing: f64) -> f64 {
        let mut radius = spacing;
        if sample.edge_strength > EDGE_THRESHOLD {
            radius *= EDGE_SPACING_FACTOR;
        }
        if self.params.adaptive_sizing {
            let p = &self.params;
            radius *= p.min_cell_scale + (p.max_cell_scale - p.min_cell_scale) * sample.brightness;
        }
        radius
    }

    /// Offsets a candidate by up to `±0.5 * jitter * step` per axis, clamped
    /// to the unit square.
    fn jitter<R>(&self, position: DVec2, step: f64, rng: &mut R) -> DVec2
    where
        R: Rng,
    {
        let half = 0.5 * self.params.jitter.clamp(0.0, 1.0) * step;
        if half <= 0.0 {
            return position;
        }
        let offset = DVec2::new(rng.gen_range(-half..=half), rng.gen_range(-half..=half));
        (position + offset).clamp(DVec2::ZERO, DVec2::ONE)
    }
}

/// Samples the field at the final position and stores the point.
fn accept<F>(field: &F, position: DVec2, radius: f64, points: &mut Vec<Point>, grid: &mut SpatialGrid)
where
    F: FeatureField + ?Sized,
{
    let sample = field.sample(position.x, position.y);
    let index = points.len();
    points.push(Point {
        x: position.x,
        y: position.y,
        brightness: sample.brightness,
        is_edge: sample.edge_strength > EDGE_THRESHOLD,
        is_boundary: false,
        radius,
    });
    grid.insert(index, position);
}

/// Emits one extra point next to a strong edge, two next to a very strong
/// one. Each extra point passes the same grid check with a tighter radius.
fn refine_edge<F, R>(
    field: &F,
    candidate: &Candidate,
    parent: DVec2,
    radius: f64,
    rng: &mut R,
    points: &mut Vec<Point>,
    grid: &mut SpatialGrid,
) -> usize
where
    F: FeatureField + ?Sized,
    R: Rng,
{
    let extras = if candidate.sample.edge_strength > 2.0 * STRONG_EDGE_THRESHOLD {
        2
    } else {
        1
    };
    let extra_radius = radius * EDGE_EXTRA_SPACING;

    let mut emitted = 0;
    for _ in 0..extras {
        let angle = rng.gen_range(0.0..TAU);
        let offset = DVec2::new(angle.cos(), angle.sin()) * radius * EDGE_EXTRA_OFFSET;
        let position = (parent + offset).clamp(DVec2::ZERO, DVec2::ONE);
        if grid.is_free(points, position, extra_radius) {
            accept(field, position, extra_radius, points, grid);
            if let Some(point) = points.last_mut() {
                point.is_edge = true;
            }
            emitted += 1;
        }
    }
    emitted
}

#[cfg(test)]
mod tests;
