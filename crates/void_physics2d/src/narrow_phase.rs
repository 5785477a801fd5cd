//! Narrow phase collision detection
//!
//! Separating-axis tests for convex polygons, an analytic circle test and
//! a polygon-vs-circle SAT variant with one extra Voronoi-region axis.
//! Every test returns as soon as one axis separates the shapes.

use crate::shape::{Circle, Shape};
use serde::{Deserialize, Serialize};
use void_math2d::{Transform2D, Vec2};

/// Overlap between two shapes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollisionResult {
    /// Unit normal pointing from body A toward body B
    pub normal: Vec2,
    /// Penetration along `normal`, never negative
    pub depth: f64,
}

impl CollisionResult {
    /// Separation vector that pushes B out of A
    pub fn separation(&self) -> Vec2 {
        self.normal * self.depth
    }
}

/// Projection interval of a shape on an axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f64,
    pub max: f64,
}

impl Interval {
    /// Touching intervals count as separated
    #[inline]
    pub fn is_separated(&self, other: &Interval) -> bool {
        self.min >= other.max || other.min >= self.max
    }

    #[inline]
    pub fn overlap(&self, other: &Interval) -> f64 {
        (other.max - self.min).min(self.max - other.min)
    }
}

/// Test two shapes for overlap. Pure; never mutates its inputs.
pub fn detect(
    shape_a: &Shape,
    transform_a: &Transform2D,
    shape_b: &Shape,
    transform_b: &Transform2D,
) -> Option<CollisionResult> {
    match (shape_a, shape_b) {
        (Shape::Polygon(_), Shape::Polygon(_)) => polygon_polygon(
            &shape_a.world_vertices(transform_a),
            transform_a.position,
            &shape_b.world_vertices(transform_b),
            transform_b.position,
        ),
        (Shape::Circle(a), Shape::Circle(b)) => {
            circle_circle(transform_a.position, a, transform_b.position, b)
        }
        (Shape::Circle(circle), Shape::Polygon(_)) => circle_polygon(
            transform_a.position,
            circle,
            &shape_b.world_vertices(transform_b),
            transform_b.position,
        ),
        (Shape::Polygon(_), Shape::Circle(circle)) => circle_polygon(
            transform_b.position,
            circle,
            &shape_a.world_vertices(transform_a),
            transform_a.position,
        )
        .map(|result| CollisionResult {
            normal: -result.normal,
            depth: result.depth,
        }),
    }
}

/// Boolean view of [`detect`]
pub fn is_colliding(
    shape_a: &Shape,
    transform_a: &Transform2D,
    shape_b: &Shape,
    transform_b: &Transform2D,
) -> bool {
    detect(shape_a, transform_a, shape_b, transform_b).is_some()
}

/// Separating-axis test between two convex polygons given in world space.
///
/// Edge normals of A are tested first, then those of B; among equally deep
/// axes the first one encountered wins. The normal is flipped to point from
/// `center_a` toward `center_b`.
pub fn polygon_polygon(
    vertices_a: &[Vec2],
    center_a: Vec2,
    vertices_b: &[Vec2],
    center_b: Vec2,
) -> Option<CollisionResult> {
    let mut best: Option<CollisionResult> = None;

    for vertices in [vertices_a, vertices_b] {
        for axis in edge_normals(vertices) {
            let a = project_vertices(vertices_a, axis);
            let b = project_vertices(vertices_b, axis);

            if a.is_separated(&b) {
                return None;
            }

            track_min(&mut best, axis, a.overlap(&b));
        }
    }

    let mut result = best?;
    if (center_b - center_a).dot(result.normal) < 0.0 {
        result.normal = -result.normal;
    }
    Some(result)
}

/// Analytic circle test. Coincident centres have no defined normal and are
/// reported as not colliding.
pub fn circle_circle(
    center_a: Vec2,
    circle_a: &Circle,
    center_b: Vec2,
    circle_b: &Circle,
) -> Option<CollisionResult> {
    let distance = center_a.distance(center_b);
    let radii = circle_a.radius + circle_b.radius;

    if distance >= radii || distance == 0.0 {
        return None;
    }

    Some(CollisionResult {
        normal: (center_b - center_a).normalize(),
        depth: radii - distance,
    })
}

/// Circle (A) against a convex polygon (B) given in world space.
///
/// Tests the polygon's edge normals plus the axis from the circle centre to
/// the nearest polygon vertex. The normal is first oriented toward that
/// vertex, then flipped if it still points away from `polygon_center`, so it
/// always points from the circle toward the polygon even when the circle
/// centre lies inside it.
pub fn circle_polygon(
    center: Vec2,
    circle: &Circle,
    vertices: &[Vec2],
    polygon_center: Vec2,
) -> Option<CollisionResult> {
    let mut best: Option<CollisionResult> = None;

    for axis in edge_normals(vertices) {
        let polygon = project_vertices(vertices, axis);
        let disc = project_circle(center, circle.radius, axis);

        if polygon.is_separated(&disc) {
            return None;
        }

        track_min(&mut best, axis, polygon.overlap(&disc));
    }

    let closest = vertices[closest_vertex_index(center, vertices)?];
    let to_polygon = closest - center;
    let axis = to_polygon.normalize();

    if axis != Vec2::ZERO {
        let polygon = project_vertices(vertices, axis);
        let disc = project_circle(center, circle.radius, axis);

        if polygon.is_separated(&disc) {
            return None;
        }

        track_min(&mut best, axis, polygon.overlap(&disc));
    }

    let mut result = best?;
    if to_polygon.dot(result.normal) < 0.0 {
        result.normal = -result.normal;
    }
    if (polygon_center - center).dot(result.normal) < 0.0 {
        result.normal = -result.normal;
    }
    Some(result)
}

/// Project world-space vertices onto a unit axis
pub fn project_vertices(vertices: &[Vec2], axis: Vec2) -> Interval {
    let mut interval = Interval {
        min: f64::INFINITY,
        max: f64::NEG_INFINITY,
    };

    for v in vertices {
        let projection = v.dot(axis);
        interval.min = interval.min.min(projection);
        interval.max = interval.max.max(projection);
    }

    interval
}

/// Project a circle onto a unit axis
pub fn project_circle(center: Vec2, radius: f64, axis: Vec2) -> Interval {
    let c = center.dot(axis);
    Interval {
        min: c - radius,
        max: c + radius,
    }
}

/// Index of the vertex nearest to `point`, `None` for an empty slice
pub fn closest_vertex_index(point: Vec2, vertices: &[Vec2]) -> Option<usize> {
    let mut result = None;
    let mut min_distance = f64::INFINITY;

    for (i, v) in vertices.iter().enumerate() {
        let d = v.distance_squared(point);
        if d < min_distance {
            min_distance = d;
            result = Some(i);
        }
    }

    result
}

/// Unit edge normals, skipping zero-length edges
fn edge_normals(vertices: &[Vec2]) -> impl Iterator<Item = Vec2> + '_ {
    let n = vertices.len();
    (0..n).filter_map(move |i| {
        let edge = vertices[(i + 1) % n] - vertices[i];
        let axis = edge.perpendicular().normalize();
        (axis != Vec2::ZERO).then_some(axis)
    })
}

fn track_min(best: &mut Option<CollisionResult>, axis: Vec2, depth: f64) {
    if best.map_or(true, |current| depth < current.depth) {
        *best = Some(CollisionResult {
            normal: axis,
            depth,
        });
    }
}
