//! Contact manifold generation
//!
//! Polygons use a closest-feature search rather than clipping: every vertex
//! is measured against every edge of the other polygon and the nearest one
//! or two points become the manifold. Circles always produce a single point
//! on their surface.

use crate::body::RigidBody;
use crate::shape::{Circle, Shape};
use serde::{Deserialize, Serialize};
use void_math2d::{almost_eq, Transform2D, Vec2};

/// Tolerance for treating two squared distances or two points as equal
pub const CONTACT_MARGIN: f64 = 5e-3;

/// Up to two world-space contact points
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ContactManifold {
    pub points: [Vec2; 2],
    pub count: usize,
}

impl ContactManifold {
    /// Manifold with a single point
    pub fn single(point: Vec2) -> Self {
        Self {
            points: [point, Vec2::ZERO],
            count: 1,
        }
    }

    /// The valid contact points
    pub fn contacts(&self) -> &[Vec2] {
        &self.points[..self.count.min(2)]
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    fn consider(&mut self, min_distance: &mut f64, distance: f64, point: Vec2) {
        if almost_eq(distance, *min_distance, CONTACT_MARGIN) {
            if !point.almost_eq(self.points[0], CONTACT_MARGIN) {
                self.points[1] = point;
                self.count = 2;
            }
        } else if distance < *min_distance {
            *min_distance = distance;
            self.points[0] = point;
            self.count = 1;
        }
    }
}

/// Contact points between two bodies already known to overlap
pub fn find_contacts(body_a: &RigidBody, body_b: &RigidBody) -> ContactManifold {
    find_contacts_shapes(&body_a.shape, &body_a.transform, &body_b.shape, &body_b.transform)
}

/// Contact points between two shapes already known to overlap. Pure.
pub fn find_contacts_shapes(
    shape_a: &Shape,
    transform_a: &Transform2D,
    shape_b: &Shape,
    transform_b: &Transform2D,
) -> ContactManifold {
    match (shape_a, shape_b) {
        (Shape::Polygon(_), Shape::Polygon(_)) => polygon_contacts(
            &shape_a.world_vertices(transform_a),
            &shape_b.world_vertices(transform_b),
        ),
        (Shape::Circle(a), Shape::Circle(_)) => {
            let direction = (transform_b.position - transform_a.position).normalize();
            ContactManifold::single(transform_a.position + direction * a.radius)
        }
        (Shape::Circle(circle), Shape::Polygon(_)) => circle_polygon_contact(
            transform_a.position,
            circle,
            &shape_b.world_vertices(transform_b),
        ),
        (Shape::Polygon(_), Shape::Circle(circle)) => circle_polygon_contact(
            transform_b.position,
            circle,
            &shape_a.world_vertices(transform_a),
        ),
    }
}

/// Squared distance from `point` to the segment `a..b`, and the closest
/// point on that segment
pub fn point_segment_distance(point: Vec2, a: Vec2, b: Vec2) -> (f64, Vec2) {
    let ab = b - a;
    let length_squared = ab.length_squared();

    let closest = if length_squared == 0.0 {
        a
    } else {
        let t = (point - a).dot(ab) / length_squared;
        if t <= 0.0 {
            a
        } else if t >= 1.0 {
            b
        } else {
            a + ab * t
        }
    };

    (point.distance_squared(closest), closest)
}

fn polygon_contacts(vertices_a: &[Vec2], vertices_b: &[Vec2]) -> ContactManifold {
    let mut manifold = ContactManifold::default();
    let mut min_distance = f64::INFINITY;

    for (points, edges) in [(vertices_a, vertices_b), (vertices_b, vertices_a)] {
        let n = edges.len();
        for &p in points {
            for i in 0..n {
                let (distance, closest) = point_segment_distance(p, edges[i], edges[(i + 1) % n]);
                manifold.consider(&mut min_distance, distance, closest);
            }
        }
    }

    manifold
}

fn circle_polygon_contact(center: Vec2, circle: &Circle, vertices: &[Vec2]) -> ContactManifold {
    let n = vertices.len();
    if n == 0 {
        return ContactManifold::default();
    }

    let mut min_distance = f64::INFINITY;
    let mut nearest = center;

    for i in 0..n {
        let (distance, closest) = point_segment_distance(center, vertices[i], vertices[(i + 1) % n]);
        if distance < min_distance {
            min_distance = distance;
            nearest = closest;
        }
    }

    let direction = (nearest - center).normalize();
    ContactManifold::single(center + direction * circle.radius)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::RigidBodyDesc;
    use approx::assert_relative_eq;

    #[test]
    fn test_point_segment_distance() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(10.0, 0.0);

        let (d, cp) = point_segment_distance(Vec2::new(4.0, 3.0), a, b);
        assert_relative_eq!(d, 9.0);
        assert_eq!(cp, Vec2::new(4.0, 0.0));

        let (d, cp) = point_segment_distance(Vec2::new(-3.0, 4.0), a, b);
        assert_relative_eq!(d, 25.0);
        assert_eq!(cp, a);

        let (d, cp) = point_segment_distance(Vec2::new(12.0, 0.0), a, b);
        assert_relative_eq!(d, 4.0);
        assert_eq!(cp, b);

        let (d, cp) = point_segment_distance(Vec2::new(1.0, 1.0), a, a);
        assert_relative_eq!(d, 2.0);
        assert_eq!(cp, a);
    }

    #[test]
    fn test_box_resting_on_box_has_two_points() {
        let top = RigidBody::new(Shape::square(40.0), RigidBodyDesc::dynamic().with_position(0.0, 171.0));
        let ground = RigidBody::new(Shape::rect(100.0, 20.0), RigidBodyDesc::fixed().with_position(0.0, 200.0));

        let manifold = find_contacts(&top, &ground);
        assert_eq!(manifold.count, 2);

        let mut xs: Vec<f64> = manifold.contacts().iter().map(|p| p.x).collect();
        xs.sort_by(f64::total_cmp);
        assert_relative_eq!(xs[0], -20.0);
        assert_relative_eq!(xs[1], 20.0);
        for p in manifold.contacts() {
            assert_relative_eq!(p.y, 190.0);
        }
    }

    #[test]
    fn test_corner_contact_has_one_point() {
        // Bottom tip sits at -23 + 10 * sqrt(2) ~= -8.86, just inside the ground
        let diamond = RigidBody::new(
            Shape::square(20.0),
            RigidBodyDesc::dynamic()
                .with_position(0.0, -23.0)
                .with_rotation(std::f64::consts::FRAC_PI_4),
        );
        let ground = RigidBody::new(Shape::rect(100.0, 20.0), RigidBodyDesc::fixed());

        let manifold = find_contacts(&diamond, &ground);
        assert_eq!(manifold.count, 1);
        let contact = manifold.contacts()[0];
        assert_relative_eq!(contact.x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(contact.y, -10.0, epsilon = 1e-9);
    }

    #[test]
    fn test_find_contacts_is_idempotent() {
        let a = RigidBody::new(Shape::triangle(30.0), RigidBodyDesc::dynamic().with_rotation(0.4));
        let b = RigidBody::new(Shape::square(20.0), RigidBodyDesc::dynamic().with_position(12.0, 5.0));
        let before = (a.clone(), b.clone());

        let first = find_contacts(&a, &b);
        let second = find_contacts(&a, &b);
        assert_eq!(first, second);
        assert_eq!(before.0.transform, a.transform);
        assert_eq!(before.1.transform, b.transform);
    }

    #[test]
    fn test_circle_circle_contact() {
        let a = RigidBody::new(Shape::circle(5.0), RigidBodyDesc::dynamic());
        let b = RigidBody::new(Shape::circle(3.0), RigidBodyDesc::dynamic().with_position(0.0, 7.0));
        let manifold = find_contacts(&a, &b);
        assert_eq!(manifold.count, 1);
        assert!(manifold.contacts()[0].almost_eq(Vec2::new(0.0, 5.0), 1e-12));
    }

    #[test]
    fn test_circle_polygon_contact_on_surface() {
        let circle = RigidBody::new(Shape::circle(5.0), RigidBodyDesc::dynamic().with_position(3.0, -13.0));
        let ground = RigidBody::new(Shape::rect(100.0, 20.0), RigidBodyDesc::fixed());

        for manifold in [find_contacts(&circle, &ground), find_contacts(&ground, &circle)] {
            assert_eq!(manifold.count, 1);
            assert!(manifold.contacts()[0].almost_eq(Vec2::new(3.0, -8.0), 1e-12));
        }
    }
}
