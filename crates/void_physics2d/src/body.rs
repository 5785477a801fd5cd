//! Rigid body types

use crate::error::{PhysicsError, Result};
use crate::material::PhysicsMaterial;
use crate::shape::Shape;
use serde::{Deserialize, Serialize};
use void_math2d::{Transform2D, Vec2};

/// Type of rigid body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RigidBodyType {
    /// Static body - infinite mass and inertia, never moved by the solver
    Static,
    /// Dynamic body - fully simulated
    #[default]
    Dynamic,
}

/// Description for creating a rigid body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RigidBodyDesc {
    /// Type of rigid body
    pub body_type: RigidBodyType,
    /// Initial position
    pub position: [f64; 2],
    /// Initial rotation in radians
    pub rotation: f64,
    /// Non-uniform scale, applied to polygon vertices only
    pub scale: [f64; 2],
    /// Initial linear velocity
    pub linear_velocity: [f64; 2],
    /// Initial angular velocity
    pub angular_velocity: f64,
    /// Mass; ignored for static bodies
    pub mass: f64,
    /// When set, mass is derived from the material's density and the shape area
    #[serde(default)]
    pub material: Option<PhysicsMaterial>,
    /// Per-axis exponential decay rate of linear velocity
    pub linear_damping: [f64; 2],
    /// Exponential decay rate of angular velocity
    pub angular_damping: f64,
    /// Bounciness in [0, 1]
    pub restitution: f64,
    /// Whether world gravity accelerates this body
    pub affected_by_gravity: bool,
    /// Never rotate (infinite rotational inertia)
    pub fixed_rotation: bool,
}

impl Default for RigidBodyDesc {
    fn default() -> Self {
        Self {
            body_type: RigidBodyType::Dynamic,
            position: [0.0, 0.0],
            rotation: 0.0,
            scale: [1.0, 1.0],
            linear_velocity: [0.0, 0.0],
            angular_velocity: 0.0,
            mass: 1.0,
            material: None,
            linear_damping: [0.0, 0.0],
            angular_damping: 0.0,
            restitution: 0.0,
            affected_by_gravity: true,
            fixed_rotation: false,
        }
    }
}

impl RigidBodyDesc {
    /// Create a static body description
    pub fn fixed() -> Self {
        Self {
            body_type: RigidBodyType::Static,
            affected_by_gravity: false,
            ..Default::default()
        }
    }

    /// Create a dynamic body description
    pub fn dynamic() -> Self {
        Self {
            body_type: RigidBodyType::Dynamic,
            ..Default::default()
        }
    }

    /// Set position
    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.position = [x, y];
        self
    }

    /// Set rotation in radians
    pub fn with_rotation(mut self, radians: f64) -> Self {
        self.rotation = radians;
        self
    }

    /// Set scale
    pub fn with_scale(mut self, x: f64, y: f64) -> Self {
        self.scale = [x, y];
        self
    }

    /// Set linear velocity
    pub fn with_linear_velocity(mut self, x: f64, y: f64) -> Self {
        self.linear_velocity = [x, y];
        self
    }

    /// Set angular velocity
    pub fn with_angular_velocity(mut self, omega: f64) -> Self {
        self.angular_velocity = omega;
        self
    }

    /// Set mass
    pub fn with_mass(mut self, mass: f64) -> Self {
        self.mass = mass;
        self.material = None;
        self
    }

    /// Take restitution from a material; mass is derived from its density
    /// when the body is built
    pub fn with_material(mut self, material: PhysicsMaterial) -> Self {
        self.restitution = material.restitution;
        self.material = Some(material);
        self
    }

    /// Set linear damping per axis
    pub fn with_linear_damping(mut self, x: f64, y: f64) -> Self {
        self.linear_damping = [x, y];
        self
    }

    /// Set angular damping
    pub fn with_angular_damping(mut self, damping: f64) -> Self {
        self.angular_damping = damping;
        self
    }

    /// Set restitution
    pub fn with_restitution(mut self, restitution: f64) -> Self {
        self.restitution = restitution.clamp(0.0, 1.0);
        self
    }

    /// Enable or disable gravity
    pub fn with_gravity(mut self, enabled: bool) -> Self {
        self.affected_by_gravity = enabled;
        self
    }

    /// Lock rotation
    pub fn with_fixed_rotation(mut self, fixed: bool) -> Self {
        self.fixed_rotation = fixed;
        self
    }
}

/// A shape, its transform and its dynamics state.
///
/// `force` and `torque` accumulate for exactly one integration step and
/// are cleared by the integrator. An infinite `mass` or
/// `rotational_inertia` makes the body immovable along that degree of
/// freedom; the two are independent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RigidBody {
    pub shape: Shape,
    pub transform: Transform2D,
    pub linear_velocity: Vec2,
    pub angular_velocity: f64,
    pub force: Vec2,
    pub torque: f64,
    pub mass: f64,
    pub rotational_inertia: f64,
    pub linear_damping: Vec2,
    pub angular_damping: f64,
    pub restitution: f64,
    pub affected_by_gravity: bool,
}

impl RigidBody {
    /// Build a body from a shape and description, computing its
    /// rotational inertia once
    pub fn new(shape: Shape, desc: RigidBodyDesc) -> Self {
        let scale = Vec2::from(desc.scale);

        let mass = match (desc.body_type, &desc.material) {
            (RigidBodyType::Static, _) => f64::INFINITY,
            (RigidBodyType::Dynamic, Some(material)) => material.mass_for(&shape, scale),
            (RigidBodyType::Dynamic, None) => desc.mass,
        };

        let rotational_inertia = if desc.fixed_rotation {
            f64::INFINITY
        } else {
            shape.rotational_inertia(mass, scale)
        };

        Self {
            transform: Transform2D::new(Vec2::from(desc.position), desc.rotation, scale),
            shape,
            linear_velocity: Vec2::from(desc.linear_velocity),
            angular_velocity: desc.angular_velocity,
            force: Vec2::ZERO,
            torque: 0.0,
            mass,
            rotational_inertia,
            linear_damping: Vec2::from(desc.linear_damping),
            angular_damping: desc.angular_damping,
            restitution: desc.restitution.clamp(0.0, 1.0),
            affected_by_gravity: desc.affected_by_gravity,
        }
    }

    /// Dynamic body with default settings
    pub fn dynamic(shape: Shape) -> Self {
        Self::new(shape, RigidBodyDesc::dynamic())
    }

    /// Static body with default settings
    pub fn fixed(shape: Shape) -> Self {
        Self::new(shape, RigidBodyDesc::fixed())
    }

    /// 0 for zero or infinite mass
    #[inline]
    pub fn inverse_mass(&self) -> f64 {
        inverse_or_zero(self.mass)
    }

    /// 0 for zero or infinite inertia
    #[inline]
    pub fn inverse_inertia(&self) -> f64 {
        inverse_or_zero(self.rotational_inertia)
    }

    /// Immovable by force or impulse
    #[inline]
    pub fn is_static(&self) -> bool {
        self.inverse_mass() == 0.0
    }

    #[inline]
    pub fn rotation_locked(&self) -> bool {
        self.inverse_inertia() == 0.0
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.transform.position
    }

    /// Accumulate a force for the next integration step
    pub fn apply_force(&mut self, force: Vec2) {
        self.force += force;
    }

    /// Accumulate a torque for the next integration step
    pub fn apply_torque(&mut self, torque: f64) {
        self.torque += torque;
    }

    /// Instantaneous change of momentum through the centre of mass
    pub fn apply_impulse(&mut self, impulse: Vec2) {
        self.linear_velocity += impulse * self.inverse_mass();
    }

    /// Relocate the body. Works for static bodies too; this is a placement
    /// operation, not a dynamics one.
    pub fn move_by(&mut self, delta: Vec2) {
        self.transform.translate(delta);
    }

    pub fn freeze_rotation(&mut self) {
        self.rotational_inertia = f64::INFINITY;
        self.angular_velocity = 0.0;
    }

    pub fn make_static(&mut self) {
        self.mass = f64::INFINITY;
        self.linear_velocity = Vec2::ZERO;
        self.freeze_rotation();
    }

    /// World-space polygon vertices; empty for circles
    pub fn world_vertices(&self) -> Vec<Vec2> {
        self.shape.world_vertices(&self.transform)
    }

    /// Check that the body carries usable geometry and a finite transform
    pub fn validate(&self) -> Result<()> {
        self.shape.validate().map_err(|err| PhysicsError::InvalidBody {
            reason: err.to_string(),
        })?;

        if !self.transform.is_finite() {
            return Err(PhysicsError::InvalidBody {
                reason: format!("non-finite transform {:?}", self.transform),
            });
        }

        if self.mass.is_nan() || self.rotational_inertia.is_nan() {
            return Err(PhysicsError::InvalidBody {
                reason: "mass or rotational inertia is NaN".into(),
            });
        }

        Ok(())
    }
}

#[inline]
fn inverse_or_zero(value: f64) -> f64 {
    if value == 0.0 || value.is_infinite() {
        0.0
    } else {
        1.0 / value
    }
}
