//! # Bowyer-Watson Triangulation
//!
//! Incremental Delaunay construction.
//!
//! ## Algorithm Steps
//!
//! 1. Build a super-triangle enclosing every point with a wide margin
//! 2. Insert points in lexicographic order; for each point:
//!    a. Collect "bad" triangles whose circumcircle strictly contains it
//!    b. Keep the cavity boundary: edges used by exactly one bad triangle
//!    c. Remove the bad triangles and fan the boundary edges to the point
//! 3. Drop every triangle touching a super-triangle vertex
//!
//! Triangles live in a slot vector addressed by stable integer IDs; removed
//! slots are recycled through a free list. Cached circumcircles give a fast
//! rejection, and the final in-circle decision uses the exact adaptive
//! predicate from `robust`, which makes cocircular ties resolve the same way
//! on every platform.

use crate::triangle::Triangle;
use crate::circle::Circumcircle;
use config::constants::{DEGENERATE_EPSILON, EPSILON, SUPER_TRIANGLE_MARGIN};
use glam::DVec2;
use relief_points::Point;
use robust::Coord;
use std::collections::HashMap;
use tracing::{debug, info};

/// Triangulates `points`, returning triangles that borrow them.
///
/// Returns an empty list when fewer than 3 points are given.
pub fn triangulate(points: &[Point]) -> Vec<Triangle<'_>> {
    Triangulation::new(points).triangles(points)
}

/// Index-based result of a triangulation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Triangulation {
    /// Counter-clockwise vertex index triples into the input points.
    triangles: Vec<[usize; 3]>,
    /// Triangles created without a finite circumcircle.
    degenerate_count: usize,
    /// Points that opened no cavity (duplicates).
    skipped_points: usize,
}

/// A live triangle during construction.
#[derive(Debug, Clone, Copy)]
struct WorkTriangle {
    /// Vertex indices in counter-clockwise order
    vertices: [usize; 3],
    /// Cached circumcircle
    circle: Circumcircle,
}

/// Construction state: positions (input points followed by the three
/// super-triangle vertices) and the triangle slots.
struct Builder {
    positions: Vec<DVec2>,
    slots: Vec<Option<WorkTriangle>>,
    free: Vec<usize>,
    degenerate_count: usize,
}

impl Triangulation {
    /// Runs Bowyer-Watson over `points`.
    pub fn new(points: &[Point]) -> Self {
        if points.len() < 3 {
            return Self::default();
        }

        let mut builder = Builder::new(points);
        let mut skipped_points = 0;
        for index in insertion_order(points) {
            if !builder.insert(index) {
                skipped_points += 1;
            }
        }

        let real = points.len();
        let triangles: Vec<[usize; 3]> = builder
            .slots
            .iter()
            .flatten()
            .map(|t| t.vertices)
            .filter(|v| v.iter().all(|&i| i < real))
            .collect();

        info!(
            "Triangulated {} points into {} triangles ({} degenerate, {} skipped)",
            real,
            triangles.len(),
            builder.degenerate_count,
            skipped_points
        );

        Self {
            triangles,
            degenerate_count: builder.degenerate_count,
            skipped_points,
        }
    }

    /// Vertex index triples, counter-clockwise.
    pub fn indices(&self) -> &[[usize; 3]] {
        &self.triangles
    }

    /// Number of triangles.
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    /// True when no triangle was produced.
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Number of degenerate triangles met during construction.
    pub fn degenerate_count(&self) -> usize {
        self.degenerate_count
    }

    /// Number of input points that were not inserted.
    pub fn skipped_points(&self) -> usize {
        self.skipped_points
    }

    /// Materializes triangles borrowing from `points`, which must be the
    /// slice this triangulation was built from.
    pub fn triangles<'p>(&self, points: &'p [Point]) -> Vec<Triangle<'p>> {
        self.triangles
            .iter()
            .map(|&[a, b, c]| Triangle::new([&points[a], &points[b], &points[c]], [a, b, c]))
            .collect()
    }
}

/// Lexicographic (x, then y, then input index) insertion order.
fn insertion_order(points: &[Point]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..points.len()).collect();
    order.sort_by(|&a, &b| {
        points[a]
            .x
            .total_cmp(&points[b].x)
            .then(points[a].y.total_cmp(&points[b].y))
            .then(a.cmp(&b))
    });
    order
}

impl Builder {
    fn new(points: &[Point]) -> Self {
        let mut positions: Vec<DVec2> = points.iter().map(Point::position).collect();

        let (min, max) = positions.iter().fold(
            (DVec2::splat(f64::INFINITY), DVec2::splat(f64::NEG_INFINITY)),
            |(min, max), p| (min.min(*p), max.max(*p)),
        );
        let extent = (max - min).max_element();
        let extent = if extent > EPSILON { extent } else { 1.0 };
        let center = (min + max) * 0.5;
        let radius = SUPER_TRIANGLE_MARGIN * extent;

        // Equilateral, counter-clockwise.
        let first_super = positions.len();
        for degrees in [90.0f64, 210.0, 330.0] {
            let angle = degrees.to_radians();
            positions.push(center + DVec2::new(angle.cos(), angle.sin()) * radius);
        }

        let mut builder = Self {
            positions,
            slots: Vec::new(),
            free: Vec::new(),
            degenerate_count: 0,
        };
        builder.add_triangle(first_super, first_super + 1, first_super + 2);
        builder
    }

    /// Inserts point `p`. Returns false when no triangle's circumcircle
    /// strictly contains it (the point duplicates an existing vertex).
    fn insert(&mut self, p: usize) -> bool {
        let point = self.positions[p];

        let bad: Vec<usize> = self
            .slots
            .iter()
            .enumerate()
            .filter_map(|(id, slot)| slot.as_ref().map(|t| (id, t)))
            .filter(|(_, t)| self.circle_contains(t, point))
            .map(|(id, _)| id)
            .collect();

        if bad.is_empty() {
            debug!(index = p, "Point opened no cavity, skipped");
            return false;
        }

        let boundary = self.cavity_boundary(&bad);

        for id in bad {
            self.slots[id] = None;
            self.free.push(id);
        }
        for (a, b) in boundary {
            self.add_triangle(a, b, p);
        }
        true
    }

    /// Edges used by exactly one bad triangle, oriented as in that triangle.
    fn cavity_boundary(&self, bad: &[usize]) -> Vec<(usize, usize)> {
        let mut counts: HashMap<(usize, usize), usize> = HashMap::new();
        let mut edges = Vec::with_capacity(bad.len() * 3);

        for tri in bad.iter().filter_map(|&id| self.slots[id].as_ref()) {
            let [a, b, c] = tri.vertices;
            for (from, to) in [(a, b), (b, c), (c, a)] {
                *counts.entry(edge_key(from, to)).or_insert(0) += 1;
                edges.push((from, to));
            }
        }

        edges
            .into_iter()
            .filter(|&(from, to)| counts[&edge_key(from, to)] == 1)
            .collect()
    }

    /// Stores a triangle, reordering to counter-clockwise.
    fn add_triangle(&mut self, a: usize, b: usize, c: usize) {
        let (pa, pb, pc) = (self.positions[a], self.positions[b], self.positions[c]);
        let orientation = orient(pa, pb, pc);

        let (vertices, circle) = if orientation.abs() < DEGENERATE_EPSILON {
            self.degenerate_count += 1;
            debug!(a, b, c, "Degenerate triangle, circumcircle treated as empty");
            ([a, b, c], Circumcircle::degenerate((pa + pb + pc) / 3.0))
        } else if orientation > 0.0 {
            ([a, b, c], Circumcircle::new(pa, pb, pc))
        } else {
            ([a, c, b], Circumcircle::new(pa, pc, pb))
        };

        let tri = WorkTriangle { vertices, circle };
        match self.free.pop() {
            Some(id) => self.slots[id] = Some(tri),
            None => self.slots.push(Some(tri)),
        }
    }

    /// Strict in-circle test: cached circle rejects, the exact predicate
    /// decides.
    fn circle_contains(&self, tri: &WorkTriangle, point: DVec2) -> bool {
        if tri.circle.clearly_excludes(point) {
            return false;
        }
        let [a, b, c] = tri.vertices.map(|i| self.positions[i]);
        in_circle(a, b, c, point) > 0.0
    }
}

fn edge_key(a: usize, b: usize) -> (usize, usize) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Exact orientation: positive when `a, b, c` turn counter-clockwise.
pub(crate) fn orient(a: DVec2, b: DVec2, c: DVec2) -> f64 {
    robust::orient2d(
        Coord { x: a.x, y: a.y },
        Coord { x: b.x, y: b.y },
        Coord { x: c.x, y: c.y },
    )
}

/// Exact in-circle: positive when `d` lies strictly inside the circle
/// through the counter-clockwise triangle `a, b, c`.
pub(crate) fn in_circle(a: DVec2, b: DVec2, c: DVec2, d: DVec2) -> f64 {
    robust::incircle(
        Coord { x: a.x, y: a.y },
        Coord { x: b.x, y: b.y },
        Coord { x: c.x, y: c.y },
        Coord { x: d.x, y: d.y },
    )
}
