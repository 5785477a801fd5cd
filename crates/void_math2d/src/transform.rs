//! Transform for 2D spatial data

use crate::vector::Vec2;

/// Position, rotation and non-uniform scale of a 2D object.
///
/// Rotation is in radians. Scale applies to polygon vertices only; a
/// degenerate (zero) scale is allowed and simply collapses the geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transform2D {
    pub position: Vec2,
    pub rotation: f64,
    pub scale: Vec2,
}

impl Transform2D {
    /// Identity transform
    pub const IDENTITY: Self = Self {
        position: Vec2::ZERO,
        rotation: 0.0,
        scale: Vec2::ONE,
    };

    /// Create a new transform
    #[inline]
    pub const fn new(position: Vec2, rotation: f64, scale: Vec2) -> Self {
        Self { position, rotation, scale }
    }

    /// Create from position only
    #[inline]
    pub fn from_position(position: Vec2) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    /// Set position (builder pattern)
    #[inline]
    pub fn with_position(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    /// Set rotation in radians (builder pattern)
    #[inline]
    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }

    /// Set scale (builder pattern)
    #[inline]
    pub fn with_scale(mut self, scale: Vec2) -> Self {
        self.scale = scale;
        self
    }

    /// Map a local-space point to world space: scale, then rotate, then translate
    #[inline]
    pub fn transform_point(&self, point: Vec2) -> Vec2 {
        self.position + point.component_mul(self.scale).rotate(self.rotation)
    }

    /// Rotate a direction (ignores position and scale)
    #[inline]
    pub fn transform_direction(&self, direction: Vec2) -> Vec2 {
        direction.rotate(self.rotation)
    }

    /// Translate in world space
    #[inline]
    pub fn translate(&mut self, offset: Vec2) {
        self.position += offset;
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.rotation.is_finite() && self.scale.is_finite()
    }
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}
