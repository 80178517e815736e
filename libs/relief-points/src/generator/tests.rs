//! # Point Generator Tests
//!
//! Covers the boundary outline, the minimum-distance invariant, seeding and
//! adaptive density.

use super::*;
use crate::field::{FnField, UniformField};

fn params(cell_density: f64) -> SamplingParams {
    SamplingParams {
        cell_density,
        ..Default::default()
    }
}

/// Dark left half, bright right half, strong edge along x = 0.5.
fn step_field() -> FnField<impl Fn(f64, f64) -> FieldSample> {
    FnField::new(|x, _y| {
        let edge = if (x - 0.5).abs() < 0.03 { 1.5 } else { 0.0 };
        let brightness = if x < 0.5 { 0.2 } else { 0.8 };
        FieldSample::new(brightness, edge, edge * 0.5)
    })
}

fn assert_min_distance(points: &[Point]) {
    for (i, a) in points.iter().enumerate() {
        for b in &points[i + 1..] {
            if a.is_boundary && b.is_boundary {
                continue;
            }
            let required = a.radius.min(b.radius);
            assert!(
                a.distance(b) >= required - 1e-12,
                "points {:?} and {:?} are {} apart, need {}",
                a.position(),
                b.position(),
                a.distance(b),
                required
            );
        }
    }
}

#[test]
fn test_corners_are_always_present() {
    let points = PointGenerator::new(params(12.0))
        .generate(&UniformField::new(0.5))
        .unwrap();
    for corner in [
        DVec2::new(0.0, 0.0),
        DVec2::new(1.0, 0.0),
        DVec2::new(1.0, 1.0),
        DVec2::new(0.0, 1.0),
    ] {
        let count = points.iter().filter(|p| p.position() == corner).count();
        assert_eq!(count, 1, "corner {corner:?} must appear exactly once");
    }
}

#[test]
fn test_boundary_points_lie_on_outline() {
    let params = params(10.0);
    let points = PointGenerator::new(params)
        .generate(&UniformField::new(0.5))
        .unwrap();
    let boundary: Vec<&Point> = points.iter().filter(|p| p.is_boundary).collect();
    let segments = (1.0 / (params.base_spacing() * BOUNDARY_STEP_FACTOR)).ceil() as usize;
    assert_eq!(segments, 20);
    assert_eq!(boundary.len(), 4 * segments);
    for p in boundary {
        let on_outline = p.x == 0.0 || p.x == 1.0 || p.y == 0.0 || p.y == 1.0;
        assert!(on_outline, "boundary point {:?} is inside", p.position());
    }
}

#[test]
fn test_interior_points_stay_in_unit_square() {
    let points = PointGenerator::new(SamplingParams {
        cell_density: 15.0,
        jitter: 1.0,
        ..Default::default()
    })
    .generate(&step_field())
    .unwrap();
    assert!(points.iter().any(|p| !p.is_boundary));
    for p in &points {
        assert!((0.0..=1.0).contains(&p.x) && (0.0..=1.0).contains(&p.y));
    }
}

#[test]
fn test_minimum_distance_invariant_uniform() {
    let points = PointGenerator::new(params(20.0))
        .generate(&UniformField::new(0.7))
        .unwrap();
    assert_min_distance(&points);
}

#[test]
fn test_minimum_distance_invariant_with_edges_and_adaptive_sizing() {
    let params = SamplingParams {
        cell_density: 25.0,
        jitter: 0.8,
        adaptive_sizing: true,
        edge_refinement: true,
        seed: 9,
        ..Default::default()
    };
    let points = PointGenerator::new(params).generate(&step_field()).unwrap();
    assert_min_distance(&points);
}

#[test]
fn test_same_seed_reproduces_points() {
    let params = SamplingParams {
        cell_density: 18.0,
        jitter: 0.9,
        seed: 1234,
        ..Default::default()
    };
    let generator = PointGenerator::new(params);
    let a = generator.generate(&step_field()).unwrap();
    let b = generator.generate(&step_field()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_different_seed_changes_jitter() {
    let base = SamplingParams {
        cell_density: 18.0,
        jitter: 0.9,
        ..Default::default()
    };
    let a = PointGenerator::new(SamplingParams { seed: 1, ..base })
        .generate(&UniformField::new(0.5))
        .unwrap();
    let b = PointGenerator::new(SamplingParams { seed: 2, ..base })
        .generate(&UniformField::new(0.5))
        .unwrap();
    assert_ne!(a, b);
}

#[test]
fn test_explicit_rng_matches_seeded_generate() {
    let params = SamplingParams {
        cell_density: 14.0,
        seed: 77,
        ..Default::default()
    };
    let generator = PointGenerator::new(params);
    let mut rng = ChaCha8Rng::seed_from_u64(77);
    let explicit = generator
        .generate_with_rng(&UniformField::new(0.3), &mut rng)
        .unwrap();
    let seeded = generator.generate(&UniformField::new(0.3)).unwrap();
    assert_eq!(explicit, seeded);
}

#[test]
fn test_sparse_density_yields_only_corners() {
    let points = PointGenerator::new(params(0.5))
        .generate(&UniformField::new(1.0))
        .unwrap();
    assert_eq!(points.len(), 4);
    assert!(points.iter().all(|p| p.is_boundary));
}

#[test]
fn test_zero_density_is_empty_point_set() {
    let err = PointGenerator::new(params(0.0))
        .generate(&UniformField::new(0.5))
        .unwrap_err();
    assert_eq!(err, PointError::EmptyPointSet { count: 0 });

    let err = PointGenerator::new(params(f64::NAN))
        .generate(&UniformField::new(0.5))
        .unwrap_err();
    assert_eq!(err, PointError::EmptyPointSet { count: 0 });
}

#[test]
fn test_dark_regions_are_denser() {
    let field = FnField::new(|x, _y| FieldSample::flat(if x < 0.5 { 0.0 } else { 1.0 }));
    let points = PointGenerator::new(SamplingParams {
        cell_density: 20.0,
        adaptive_sizing: true,
        min_cell_scale: 0.5,
        max_cell_scale: 1.5,
        ..Default::default()
    })
    .generate(&field)
    .unwrap();

    let interior = points.iter().filter(|p| !p.is_boundary);
    let (dark, bright): (Vec<&Point>, Vec<&Point>) = interior.partition(|p| p.x < 0.5);
    assert!(
        dark.len() > 2 * bright.len(),
        "dark {} vs bright {}",
        dark.len(),
        bright.len()
    );
}

#[test]
fn test_huge_cell_scale_leaves_only_the_outline() {
    let params = SamplingParams {
        cell_density: 40.0,
        max_cell_scale: 300.0,
        ..Default::default()
    };
    assert!(params.validate().is_ok());

    // A radius of 7.5 covers the whole square, so no interior point fits.
    let points = PointGenerator::new(params).generate(&UniformField::new(1.0)).unwrap();
    assert!(points.len() >= 4);
    assert!(points.iter().all(|p| p.is_boundary));
}

#[test]
fn test_uniform_sizing_ignores_brightness() {
    let generator = PointGenerator::new(SamplingParams {
        adaptive_sizing: false,
        ..Default::default()
    });
    let dark = generator.local_radius(&FieldSample::flat(0.0), 0.1);
    let bright = generator.local_radius(&FieldSample::flat(1.0), 0.1);
    assert_eq!(dark, bright);
    assert_eq!(dark, 0.1);
}

#[test]
fn test_edge_points_use_tighter_radius() {
    let generator = PointGenerator::new(SamplingParams {
        adaptive_sizing: false,
        ..Default::default()
    });
    let edge = generator.local_radius(&FieldSample::new(0.5, 1.0, 0.0), 0.1);
    assert!((edge - 0.1 * EDGE_SPACING_FACTOR).abs() < 1e-12);
}

#[test]
fn test_edges_are_flagged_and_thickened() {
    // Regular radii here are at least 0.05 * 0.6 * 0.7 = 0.021; refinement
    // points get half of a regular radius, at most 0.0195.
    let refined = PointGenerator::new(SamplingParams {
        cell_density: 20.0,
        edge_refinement: true,
        ..Default::default()
    })
    .generate(&step_field())
    .unwrap();
    let edge_flagged = refined.iter().filter(|p| p.is_edge && !p.is_boundary).count();
    assert!(edge_flagged > 0);
    let extras = refined.iter().filter(|p| p.radius < 0.02).count();
    assert!(extras > 0);
    assert!(refined
        .iter()
        .filter(|p| p.radius < 0.02)
        .all(|p| p.is_edge));

    let plain = PointGenerator::new(SamplingParams {
        cell_density: 20.0,
        edge_refinement: false,
        ..Default::default()
    })
    .generate(&step_field())
    .unwrap();
    assert_eq!(plain.iter().filter(|p| p.radius < 0.02).count(), 0);
}

#[test]
fn test_zero_jitter_keeps_sub_grid_positions() {
    let spacing = 0.1;
    let points = PointGenerator::new(SamplingParams {
        cell_density: 1.0 / spacing,
        jitter: 0.0,
        ..Default::default()
    })
    .generate(&UniformField::new(0.5))
    .unwrap();
    let step = spacing * CANDIDATE_STEP_FACTOR;
    for p in points.iter().filter(|p| !p.is_boundary) {
        let ix = p.x / step;
        let iy = p.y / step;
        assert!((ix - ix.round()).abs() < 1e-9);
        assert!((iy - iy.round()).abs() < 1e-9);
    }
}
