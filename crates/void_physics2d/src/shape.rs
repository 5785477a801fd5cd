//! Collision shapes and their mass properties

use crate::error::{PhysicsError, Result};
use serde::{Deserialize, Serialize};
use void_math2d::{Transform2D, Vec2};

/// Which inertia formula a polygon uses. A triangle is still an ordinary
/// polygon as far as collision detection is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PolygonKind {
    Box,
    Triangle,
    #[default]
    Arbitrary,
}

/// Convex polygon in local space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    /// Local-space vertices with consistent winding
    pub vertices: Vec<Vec2>,
    pub kind: PolygonKind,
}

/// Circle centred on the body position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub radius: f64,
}

/// Collision shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Polygon(Polygon),
    Circle(Circle),
}

impl Shape {
    /// Axis-aligned box centred on the origin
    pub fn rect(width: f64, height: f64) -> Self {
        let hw = width * 0.5;
        let hh = height * 0.5;
        Self::Polygon(Polygon {
            vertices: vec![
                Vec2::new(-hw, -hh),
                Vec2::new(hw, -hh),
                Vec2::new(hw, hh),
                Vec2::new(-hw, hh),
            ],
            kind: PolygonKind::Box,
        })
    }

    /// Square box with side `size`
    pub fn square(size: f64) -> Self {
        Self::rect(size, size)
    }

    /// Equilateral triangle with side `side`, centroid on the origin
    pub fn triangle(side: f64) -> Self {
        let height = 3f64.sqrt() * 0.5 * side;
        Self::Polygon(Polygon {
            vertices: vec![
                Vec2::new(-side * 0.5, height / 3.0),
                Vec2::new(side * 0.5, height / 3.0),
                Vec2::new(0.0, -2.0 * height / 3.0),
            ],
            kind: PolygonKind::Triangle,
        })
    }

    /// Convex polygon from arbitrary local vertices
    pub fn polygon(vertices: Vec<Vec2>) -> Self {
        let kind = if vertices.len() == 3 {
            PolygonKind::Triangle
        } else {
            PolygonKind::Arbitrary
        };
        Self::Polygon(Polygon { vertices, kind })
    }

    pub fn circle(radius: f64) -> Self {
        Self::Circle(Circle { radius })
    }

    pub fn is_circle(&self) -> bool {
        matches!(self, Self::Circle(_))
    }

    /// World-space polygon vertices; empty for circles
    pub fn world_vertices(&self, transform: &Transform2D) -> Vec<Vec2> {
        match self {
            Self::Polygon(polygon) => polygon
                .vertices
                .iter()
                .map(|v| transform.transform_point(*v))
                .collect(),
            Self::Circle(_) => Vec::new(),
        }
    }

    /// Area under the given scale. Circles ignore scale.
    pub fn area(&self, scale: Vec2) -> f64 {
        match self {
            Self::Polygon(polygon) => signed_area(&polygon.vertices).abs() * (scale.x * scale.y).abs(),
            Self::Circle(circle) => std::f64::consts::PI * circle.radius * circle.radius,
        }
    }

    /// Moment of inertia about the body origin for the given mass and scale.
    ///
    /// Infinite mass yields infinite inertia.
    pub fn rotational_inertia(&self, mass: f64, scale: Vec2) -> f64 {
        if mass.is_infinite() {
            return f64::INFINITY;
        }

        match self {
            Self::Circle(circle) => 0.5 * mass * circle.radius * circle.radius,
            Self::Polygon(polygon) => {
                let scaled: Vec<Vec2> = polygon
                    .vertices
                    .iter()
                    .map(|v| v.component_mul(scale))
                    .collect();

                match polygon.kind {
                    PolygonKind::Box => {
                        let (min, max) = bounds(&scaled);
                        let w = max.x - min.x;
                        let h = max.y - min.y;
                        (1.0 / 12.0) * mass * (w * w + h * h)
                    }
                    PolygonKind::Triangle if scaled.len() == 3 => {
                        let a = scaled[0].distance_squared(scaled[1]);
                        let b = scaled[1].distance_squared(scaled[2]);
                        let c = scaled[2].distance_squared(scaled[0]);
                        (mass / 36.0) * (a + b + c)
                    }
                    _ => polygon_inertia(&scaled, mass),
                }
            }
        }
    }

    /// Reject geometry the detector cannot work with
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Polygon(polygon) => {
                if polygon.vertices.len() < 3 {
                    return Err(PhysicsError::InvalidShape(format!(
                        "polygon needs at least 3 vertices, got {}",
                        polygon.vertices.len()
                    )));
                }
                if polygon.vertices.iter().any(|v| !v.is_finite()) {
                    return Err(PhysicsError::InvalidShape(
                        "polygon has a non-finite vertex".into(),
                    ));
                }
                Ok(())
            }
            Self::Circle(circle) => {
                if !(circle.radius.is_finite() && circle.radius > 0.0) {
                    return Err(PhysicsError::InvalidShape(format!(
                        "circle radius must be finite and positive, got {}",
                        circle.radius
                    )));
                }
                Ok(())
            }
        }
    }
}

fn signed_area(vertices: &[Vec2]) -> f64 {
    let n = vertices.len();
    let mut sum = 0.0;
    for i in 0..n {
        sum += vertices[i].cross(vertices[(i + 1) % n]);
    }
    sum * 0.5
}

fn bounds(vertices: &[Vec2]) -> (Vec2, Vec2) {
    let mut min = Vec2::splat(f64::INFINITY);
    let mut max = Vec2::splat(f64::NEG_INFINITY);
    for v in vertices {
        min = Vec2::new(min.x.min(v.x), min.y.min(v.y));
        max = Vec2::new(max.x.max(v.x), max.y.max(v.y));
    }
    (min, max)
}

/// Second moment of a uniform polygon about its centroid, scaled to `mass`
fn polygon_inertia(vertices: &[Vec2], mass: f64) -> f64 {
    let n = vertices.len();
    let area = signed_area(vertices);
    if n < 3 || area == 0.0 {
        return 0.0;
    }

    let mut centroid = Vec2::ZERO;
    for i in 0..n {
        let a = vertices[i];
        let b = vertices[(i + 1) % n];
        centroid += (a + b) * a.cross(b);
    }
    centroid = centroid / (6.0 * area);

    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for i in 0..n {
        let a = vertices[i] - centroid;
        let b = vertices[(i + 1) % n] - centroid;
        let cross = a.cross(b).abs();
        numerator += cross * (a.dot(a) + a.dot(b) + b.dot(b));
        denominator += cross;
    }

    mass * numerator / (6.0 * denominator)
}
