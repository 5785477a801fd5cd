//! Physics configuration

use crate::error::{PhysicsError, Result};
use crate::solver::{CorrectionSplit, RestitutionRule, SolverPolicy};
use serde::{Deserialize, Serialize};
use void_math2d::Vec2;

/// Physics world configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Gravity vector in pixels per second squared (y points down)
    pub gravity: [f64; 2],

    /// Fixed timestep for physics simulation
    pub timestep: f64,

    /// Maximum number of fixed ticks per frame
    pub max_substeps: u32,

    /// Longest frame time fed into the accumulator
    pub max_frame_time: f64,

    /// Detection and impulse passes over all pairs per tick
    pub solver_iterations: u32,

    /// Restitution selection for a pair
    pub restitution_rule: RestitutionRule,

    /// Positional correction split between two movable bodies
    pub correction_split: CorrectionSplit,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: [0.0, 500.0],
            timestep: 1.0 / 144.0,
            max_substeps: 8,
            max_frame_time: 0.25,
            solver_iterations: 3,
            restitution_rule: RestitutionRule::default(),
            correction_split: CorrectionSplit::default(),
        }
    }
}

impl PhysicsConfig {
    /// Create a configuration for high-precision simulation
    pub fn high_precision() -> Self {
        Self {
            timestep: 1.0 / 240.0,
            solver_iterations: 6,
            max_substeps: 16,
            ..Default::default()
        }
    }

    /// Create a configuration for fast simulation (lower quality)
    pub fn fast() -> Self {
        Self {
            timestep: 1.0 / 60.0,
            solver_iterations: 2,
            max_substeps: 4,
            ..Default::default()
        }
    }

    /// Zero gravity, for top-down scenes
    pub fn zero_gravity() -> Self {
        Self::default().with_gravity(0.0, 0.0)
    }

    /// Set gravity
    pub fn with_gravity(mut self, x: f64, y: f64) -> Self {
        self.gravity = [x, y];
        self
    }

    /// Set timestep
    pub fn with_timestep(mut self, timestep: f64) -> Self {
        self.timestep = timestep;
        self
    }

    pub fn with_max_substeps(mut self, max_substeps: u32) -> Self {
        self.max_substeps = max_substeps;
        self
    }

    pub fn with_max_frame_time(mut self, max_frame_time: f64) -> Self {
        self.max_frame_time = max_frame_time;
        self
    }

    pub fn with_solver_iterations(mut self, iterations: u32) -> Self {
        self.solver_iterations = iterations;
        self
    }

    pub fn with_restitution_rule(mut self, rule: RestitutionRule) -> Self {
        self.restitution_rule = rule;
        self
    }

    pub fn with_correction_split(mut self, split: CorrectionSplit) -> Self {
        self.correction_split = split;
        self
    }

    pub fn gravity_vec(&self) -> Vec2 {
        Vec2::from(self.gravity)
    }

    pub fn solver_policy(&self) -> SolverPolicy {
        SolverPolicy {
            restitution_rule: self.restitution_rule,
            correction_split: self.correction_split,
        }
    }

    /// Reject settings the world cannot step with
    pub fn validate(&self) -> Result<()> {
        if !(self.timestep.is_finite() && self.timestep > 0.0) {
            return Err(PhysicsError::InvalidConfig(format!(
                "timestep must be positive, got {}",
                self.timestep
            )));
        }
        if !(self.max_frame_time.is_finite() && self.max_frame_time > 0.0) {
            return Err(PhysicsError::InvalidConfig(format!(
                "max_frame_time must be positive, got {}",
                self.max_frame_time
            )));
        }
        if self.max_substeps == 0 {
            return Err(PhysicsError::InvalidConfig("max_substeps must be at least 1".into()));
        }
        if self.solver_iterations == 0 {
            return Err(PhysicsError::InvalidConfig(
                "solver_iterations must be at least 1".into(),
            ));
        }
        if !self.gravity_vec().is_finite() {
            return Err(PhysicsError::InvalidConfig(format!(
                "gravity must be finite, got {:?}",
                self.gravity
            )));
        }
        Ok(())
    }
}
