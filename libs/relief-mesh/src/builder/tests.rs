//! # Mesh Builder Tests

use super::*;
use approx::assert_relative_eq;
use config::{ConfigError, ReliefMethod};
use glam::DVec3;
use relief_delaunay::triangulate;
use relief_points::Point;

fn corner_points() -> Vec<Point> {
    vec![
        Point::new(0.0, 0.0, 0.0),
        Point::new(1.0, 0.0, 0.0),
        Point::new(1.0, 1.0, 1.0),
        Point::new(0.0, 1.0, 1.0),
    ]
}

fn heightmap() -> MeshConfig {
    MeshConfig {
        method: ReliefMethod::Heightmap,
        base_thickness: 3.0,
        max_relief_height: 8.0,
        ..Default::default()
    }
}

fn heights_at(mesh: &Mesh, x: f64, y: f64) -> Vec<f64> {
    let mut z: Vec<f64> = mesh
        .vertices()
        .iter()
        .filter(|v| (v.x - x).abs() < 1e-9 && (v.y - y).abs() < 1e-9)
        .map(|v| v.z)
        .collect();
    z.sort_by(f64::total_cmp);
    z.dedup();
    z
}

#[test]
fn test_four_corner_heightmap_scenario() {
    let points = corner_points();
    let triangles = triangulate(&points);
    assert_eq!(triangles.len(), 2);

    let relief = MeshBuilder::new(&heightmap()).build(&triangles).unwrap();
    // 2 facets x (top + bottom + 3 walls x 2)
    assert_eq!(relief.stats.triangle_count, 16);
    assert_eq!(relief.stats.vertex_count, 36);
    assert_eq!(relief.stats.facets_built, 2);
    assert_eq!(relief.stats.facets_skipped, 0);

    // Image top row (y = 0, brightness 0) lands at +75 mm.
    assert_eq!(heights_at(&relief.mesh, -75.0, 75.0), vec![0.0, 3.0]);
    assert_eq!(heights_at(&relief.mesh, 75.0, 75.0), vec![0.0, 3.0]);
    assert_eq!(heights_at(&relief.mesh, 75.0, -75.0), vec![0.0, 11.0]);
    assert_eq!(heights_at(&relief.mesh, -75.0, -75.0), vec![0.0, 11.0]);
    assert!(relief.mesh.validate());
}

#[test]
fn test_mapping_centers_model_and_flips_y() {
    let builder = MeshBuilder::new(&MeshConfig {
        output_width: 200.0,
        output_height: 100.0,
        ..Default::default()
    });
    assert_eq!(builder.to_model(DVec2::new(0.5, 0.5)), DVec2::ZERO);
    assert_eq!(builder.to_model(DVec2::new(0.0, 0.0)), DVec2::new(-100.0, 50.0));
    assert_eq!(builder.to_model(DVec2::new(1.0, 1.0)), DVec2::new(100.0, -50.0));
}

#[test]
fn test_facets_do_not_share_vertices() {
    let points = corner_points();
    let relief = MeshBuilder::new(&MeshConfig::default())
        .build(&triangulate(&points))
        .unwrap();
    for (index, tri) in relief.mesh.triangles().iter().enumerate() {
        let block = (index / FACET_TRIANGLES) as u32;
        for &v in tri {
            assert_eq!(v / FACET_VERTICES as u32, block);
        }
    }
}

#[test]
fn test_output_stays_within_model_bounds() {
    let points: Vec<Point> = (0..9)
        .flat_map(|j| {
            (0..9).map(move |i| {
                let (x, y) = (i as f64 / 8.0, j as f64 / 8.0);
                Point::new(x, y, (x * 0.7 + y * 0.3).min(1.0))
            })
        })
        .collect();
    let triangles = triangulate(&points);

    for method in [ReliefMethod::Angled, ReliefMethod::Heightmap, ReliefMethod::Hybrid] {
        let relief = MeshBuilder::new(&MeshConfig {
            method,
            ..Default::default()
        })
        .build(&triangles)
        .unwrap();
        let (min, max) = relief.mesh.bounding_box().unwrap();
        assert_relative_eq!(min.x, -75.0, epsilon = 1e-9);
        assert_relative_eq!(max.x, 75.0, epsilon = 1e-9);
        assert_relative_eq!(min.y, -75.0, epsilon = 1e-9);
        assert_relative_eq!(max.y, 75.0, epsilon = 1e-9);
        assert_eq!(min.z, 0.0);
        assert!(relief.mesh.validate(), "{method:?}");
        assert_eq!(relief.stats.facets_built, triangles.len());
    }
}

#[test]
fn test_center_brightness_feeds_angled_facets() {
    let points = [
        Point::new(0.2, 0.2, 0.5),
        Point::new(0.8, 0.2, 0.5),
        Point::new(0.5, 0.8, 0.5),
    ];
    let plain = Triangle::new([&points[0], &points[1], &points[2]], [0, 1, 2]);
    let shaded = plain.with_center_brightness(1.0);
    let builder = MeshBuilder::new(&MeshConfig::default());

    // Mid-grey everywhere: level top at 3 + 0.5 * 8 * 0.5.
    let level = builder.build(&[plain]).unwrap().mesh;
    for v in level.vertices().iter().filter(|v| v.z > 0.0) {
        assert_relative_eq!(v.z, 5.0, epsilon = 1e-12);
    }

    let tilted = builder.build(&[shaded]).unwrap().mesh;
    let tops: Vec<f64> = tilted.vertices().iter().map(|v| v.z).filter(|&z| z > 0.0).collect();
    let spread = tops.iter().copied().fold(f64::NEG_INFINITY, f64::max)
        - tops.iter().copied().fold(f64::INFINITY, f64::min);
    assert!(spread > 1.0);
}

#[test]
fn test_invalid_shapes_are_skipped_and_counted() {
    let points = [
        Point::new(0.0, 0.0, 0.5),
        Point::new(1.0, 0.0, 0.5),
        Point::new(0.0, 1.0, 0.5),
        Point::new(0.5, 0.0, 0.5),
        Point::new(f64::NAN, 0.5, 0.5),
    ];
    let good = Triangle::new([&points[0], &points[1], &points[2]], [0, 1, 2]);
    let flat = Triangle::new([&points[0], &points[3], &points[1]], [0, 3, 1]);
    let broken = Triangle::new([&points[0], &points[4], &points[2]], [0, 4, 2]);

    let relief = MeshBuilder::new(&MeshConfig::default())
        .build(&[flat, good, broken])
        .unwrap();
    assert_eq!(relief.stats.facets_built, 1);
    assert_eq!(relief.stats.facets_skipped, 2);
    assert_eq!(relief.stats.triangle_count, FACET_TRIANGLES);

    let err = MeshBuilder::new(&MeshConfig::default())
        .build(&[flat, broken])
        .unwrap_err();
    assert_eq!(err, MeshError::NoTriangles { skipped: 2 });
}

#[test]
fn test_empty_input_is_an_error() {
    let err = MeshBuilder::new(&MeshConfig::default()).build(&[]).unwrap_err();
    assert_eq!(err, MeshError::NoTriangles { skipped: 0 });
}

#[test]
fn test_invalid_config_is_rejected() {
    let points = corner_points();
    let config = MeshConfig {
        max_tilt_angle: 120.0,
        ..Default::default()
    };
    let err = MeshBuilder::new(&config).build(&triangulate(&points)).unwrap_err();
    assert_eq!(err, MeshError::Config(ConfigError::InvalidTiltAngle(120.0)));
}

#[test]
fn test_facet_capacity_fits_u32_indices() {
    assert!(((MAX_FACETS * FACET_VERTICES - 1) as u64) <= u64::from(u32::MAX));
    assert_eq!(check_capacity(MAX_FACETS), Ok(()));
    assert_eq!(
        check_capacity(MAX_FACETS + 1),
        Err(MeshError::TooManyFacets {
            facets: MAX_FACETS + 1,
            max: MAX_FACETS,
        })
    );
}

#[test]
fn test_flat_buffers_match_mesh() {
    let points = corner_points();
    let relief = MeshBuilder::new(&heightmap()).build(&triangulate(&points)).unwrap();
    let vertices = relief.mesh.vertices_f32();
    let indices = relief.mesh.indices_u32();
    assert_eq!(vertices.len(), relief.stats.vertex_count * 3);
    assert_eq!(indices.len(), relief.stats.triangle_count * 3);
    assert!(indices.iter().all(|&i| (i as usize) < relief.stats.vertex_count));

    let first = DVec3::new(vertices[0] as f64, vertices[1] as f64, vertices[2] as f64);
    assert_eq!(Some(first), relief.mesh.position(0));
}
