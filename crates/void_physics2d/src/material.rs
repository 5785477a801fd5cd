//! Physics materials defining bounciness and density

use crate::shape::Shape;
use serde::{Deserialize, Serialize};
use void_math2d::Vec2;

/// Surface and bulk properties used when building a body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicsMaterial {
    /// Restitution/bounciness (0 = no bounce, 1 = perfect bounce)
    pub restitution: f64,
    /// Mass per unit area
    pub density: f64,
}

impl Default for PhysicsMaterial {
    fn default() -> Self {
        Self {
            restitution: 0.0,
            density: 1.0,
        }
    }
}

impl PhysicsMaterial {
    /// Create a new physics material
    pub fn new(restitution: f64, density: f64) -> Self {
        Self::default()
            .with_restitution(restitution)
            .with_density(density)
    }

    /// Slippery, dead-stop material
    pub fn ice() -> Self {
        Self {
            restitution: 0.0,
            density: 0.9,
        }
    }

    /// Bouncy rubber-like material
    pub fn rubber() -> Self {
        Self {
            restitution: 0.8,
            density: 1.1,
        }
    }

    /// Metal material
    pub fn metal() -> Self {
        Self {
            restitution: 0.2,
            density: 7.8,
        }
    }

    /// Wood material
    pub fn wood() -> Self {
        Self {
            restitution: 0.3,
            density: 0.6,
        }
    }

    /// Stone/concrete material
    pub fn stone() -> Self {
        Self {
            restitution: 0.1,
            density: 2.5,
        }
    }

    /// Set restitution
    pub fn with_restitution(mut self, restitution: f64) -> Self {
        self.restitution = restitution.clamp(0.0, 1.0);
        self
    }

    /// Set density
    pub fn with_density(mut self, density: f64) -> Self {
        self.density = density.max(0.001);
        self
    }

    /// Mass of `shape` made of this material
    pub fn mass_for(&self, shape: &Shape, scale: Vec2) -> f64 {
        self.density * shape.area(scale)
    }
}
