//! Error types for the physics system

use crate::set::BodyHandle;
use thiserror::Error;

/// Physics system errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PhysicsError {
    /// Handle does not refer to a live body
    #[error("Rigid body not found: {0:?}")]
    BodyNotFound(BodyHandle),

    /// A pair was built from the same body twice
    #[error("Rigid body {0:?} cannot collide with itself")]
    SameBody(BodyHandle),

    /// Body is missing usable shape or transform data
    #[error("Invalid rigid body: {reason}")]
    InvalidBody { reason: String },

    /// Shape geometry is unusable
    #[error("Invalid collision shape: {0}")]
    InvalidShape(String),

    /// Invalid configuration
    #[error("Invalid physics configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for physics operations
pub type Result<T> = std::result::Result<T, PhysicsError>;
