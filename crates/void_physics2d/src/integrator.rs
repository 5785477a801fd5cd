//! Semi-implicit Euler integration of a single body

use crate::body::RigidBody;
use void_math2d::Vec2;

/// Speeds below `SLEEP_THRESHOLD * dt` snap to zero
pub const SLEEP_THRESHOLD: f64 = 0.1;

/// Advance `body` by one fixed sub-step.
///
/// Rotation is resolved before translation. Damping is exponential so it
/// never reverses a velocity, whatever the step size. Consumes and clears
/// the accumulated force and torque. Call once per body per sub-step.
pub fn integrate(body: &mut RigidBody, dt: f64, gravity: Vec2) {
    let sleep_speed = SLEEP_THRESHOLD * dt;

    // Angular; zero and infinite inertia both give no acceleration
    let angular_acceleration = body.torque * body.inverse_inertia();

    body.angular_velocity += angular_acceleration * dt;
    body.angular_velocity *= (-body.angular_damping * dt).exp();

    if body.angular_velocity.abs() < sleep_speed {
        body.angular_velocity = 0.0;
    }

    body.transform.rotation += body.angular_velocity * dt;
    body.torque = 0.0;

    // Linear
    if body.affected_by_gravity && body.mass.is_finite() {
        body.linear_velocity += gravity * dt;
    }

    let linear_acceleration = if body.mass == 0.0 {
        Vec2::ZERO
    } else {
        body.force / body.mass
    };
    body.linear_velocity += linear_acceleration * dt;

    body.linear_velocity.x *= (-body.linear_damping.x * dt).exp();
    body.linear_velocity.y *= (-body.linear_damping.y * dt).exp();

    if body.linear_velocity.length() < sleep_speed {
        body.linear_velocity = Vec2::ZERO;
    }

    body.transform.position += body.linear_velocity * dt;
    body.force = Vec2::ZERO;
}
