//! Physics world - main simulation container

use crate::body::{RigidBody, RigidBodyDesc};
use crate::config::PhysicsConfig;
use crate::error::{PhysicsError, Result};
use crate::events::{CollisionEvent, EventCollector};
use crate::integrator::integrate;
use crate::set::{BodyHandle, BodySet};
use crate::shape::Shape;
use crate::solver::{collide, TranslateMover};
use std::collections::HashSet;
use void_math2d::Vec2;

/// The main physics world containing all simulation state.
///
/// There is no broad phase: the caller lists the pairs that may collide
/// and the order they are resolved in.
pub struct PhysicsWorld {
    /// Configuration
    config: PhysicsConfig,

    /// Rigid body set
    bodies: BodySet,

    /// Candidate pairs in resolution order
    pairs: Vec<(BodyHandle, BodyHandle)>,

    /// Event collector
    events: EventCollector,

    /// Bodies already reported as invalid
    reported: HashSet<BodyHandle>,

    /// Accumulated time for fixed timestep
    accumulated_time: f64,
}

impl PhysicsWorld {
    /// Create a new physics world
    pub fn new(config: PhysicsConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: PhysicsConfig) -> Self {
        Self {
            config,
            bodies: BodySet::new(),
            pairs: Vec::new(),
            events: EventCollector::new(),
            reported: HashSet::new(),
            accumulated_time: 0.0,
        }
    }

    /// Get the physics configuration
    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Set gravity
    pub fn set_gravity(&mut self, gravity: Vec2) {
        self.config.gravity = gravity.to_array();
    }

    /// Get gravity
    pub fn gravity(&self) -> Vec2 {
        self.config.gravity_vec()
    }

    // ==================== Rigid Bodies ====================

    /// Add a rigid body
    pub fn add_body(&mut self, body: RigidBody) -> BodyHandle {
        let handle = self.bodies.insert(body);
        log::debug!("added body {:?}", handle);
        handle
    }

    /// Build and add a rigid body
    pub fn create_body(&mut self, shape: Shape, desc: RigidBodyDesc) -> BodyHandle {
        self.add_body(RigidBody::new(shape, desc))
    }

    /// Remove a rigid body along with every pair that references it
    pub fn remove_body(&mut self, handle: BodyHandle) -> Option<RigidBody> {
        let body = self.bodies.remove(handle)?;
        self.pairs.retain(|&(a, b)| a != handle && b != handle);
        self.reported.remove(&handle);
        log::debug!("removed body {:?}", handle);
        Some(body)
    }

    pub fn body(&self, handle: BodyHandle) -> Result<&RigidBody> {
        self.bodies.get(handle).ok_or(PhysicsError::BodyNotFound(handle))
    }

    pub fn body_mut(&mut self, handle: BodyHandle) -> Result<&mut RigidBody> {
        self.bodies
            .get_mut(handle)
            .ok_or(PhysicsError::BodyNotFound(handle))
    }

    /// Iterate over all bodies
    pub fn bodies(&self) -> impl Iterator<Item = (BodyHandle, &RigidBody)> {
        self.bodies.iter()
    }

    /// Accumulate a force on a body for the next tick
    pub fn apply_force(&mut self, handle: BodyHandle, force: Vec2) -> Result<()> {
        self.body_mut(handle).map(|b| b.apply_force(force))
    }

    /// Apply an impulse to a body
    pub fn apply_impulse(&mut self, handle: BodyHandle, impulse: Vec2) -> Result<()> {
        self.body_mut(handle).map(|b| b.apply_impulse(impulse))
    }

    // ==================== Pairs ====================

    /// Register a pair for collision resolution. Pairs are resolved in
    /// insertion order, A before B.
    pub fn add_pair(&mut self, a: BodyHandle, b: BodyHandle) -> Result<()> {
        if a == b {
            return Err(PhysicsError::SameBody(a));
        }
        for handle in [a, b] {
            if !self.bodies.contains(handle) {
                return Err(PhysicsError::BodyNotFound(handle));
            }
        }
        self.pairs.push((a, b));
        Ok(())
    }

    /// Register every pair between `body` and `others`
    pub fn add_pairs_with(&mut self, body: BodyHandle, others: &[BodyHandle]) -> Result<()> {
        for &other in others {
            self.add_pair(body, other)?;
        }
        Ok(())
    }

    pub fn clear_pairs(&mut self) {
        self.pairs.clear();
    }

    pub fn pairs(&self) -> &[(BodyHandle, BodyHandle)] {
        &self.pairs
    }

    // ==================== Simulation ====================

    /// Step the physics simulation with fixed timestep.
    ///
    /// `frame_time` is clamped to `max_frame_time` and at most
    /// `max_substeps` ticks run. Returns the number of ticks run.
    pub fn step(&mut self, frame_time: f64) -> u32 {
        let frame_time = if frame_time.is_finite() {
            frame_time.clamp(0.0, self.config.max_frame_time)
        } else {
            0.0
        };
        self.accumulated_time += frame_time;

        let mut steps = 0;
        while self.accumulated_time >= self.config.timestep && steps < self.config.max_substeps {
            self.tick();
            self.accumulated_time -= self.config.timestep;
            steps += 1;
        }

        if steps == self.config.max_substeps && self.accumulated_time >= self.config.timestep {
            log::debug!(
                "physics falling behind: {:.4}s left after {} ticks",
                self.accumulated_time,
                steps
            );
        }
        self.accumulated_time = self.accumulated_time.min(self.config.max_frame_time);

        steps
    }

    /// Fraction of a tick left in the accumulator, for render interpolation
    pub fn interpolation_alpha(&self) -> f64 {
        (self.accumulated_time / self.config.timestep).clamp(0.0, 1.0)
    }

    /// Run exactly one fixed tick: integrate every body once, then resolve
    /// all pairs `solver_iterations` times
    pub fn tick(&mut self) {
        let Self {
            config,
            bodies,
            pairs,
            events,
            reported,
            ..
        } = self;

        events.clear();

        pairs.retain(|&(a, b)| {
            let live = bodies.contains(a) && bodies.contains(b);
            if !live {
                log::warn!("dropping pair ({:?}, {:?}): body no longer exists", a, b);
            }
            live
        });

        let dt = config.timestep;
        let gravity = config.gravity_vec();
        for (_, body) in bodies.iter_mut() {
            integrate(body, dt, gravity);
        }

        let policy = config.solver_policy();
        for _ in 0..config.solver_iterations {
            for &(a, b) in pairs.iter() {
                let (body_a, body_b) = match bodies.get_pair_mut(a, b) {
                    Ok(pair) => pair,
                    Err(err) => {
                        log::warn!("skipping pair ({:?}, {:?}): {}", a, b, err);
                        continue;
                    }
                };

                let mut valid = true;
                for (handle, body) in [(a, &*body_a), (b, &*body_b)] {
                    if let Err(err) = body.validate() {
                        valid = false;
                        if reported.insert(handle) {
                            log::warn!("body {:?} excluded from collisions: {}", handle, err);
                        }
                    }
                }
                if !valid {
                    continue;
                }

                match collide(body_a, body_b, &mut TranslateMover, &policy) {
                    Ok(Some(contact)) => {
                        if !events.contains_pair(a, b) {
                            events.push(CollisionEvent::new(a, b, &contact));
                        }
                    }
                    Ok(None) => {}
                    Err(err) => log::warn!("pair ({:?}, {:?}) failed: {}", a, b, err),
                }
            }
        }
    }

    // ==================== Events ====================

    /// Get collision events from the last tick
    pub fn collision_events(&self) -> &[CollisionEvent] {
        self.events.events()
    }

    /// Get collision events from the last tick involving `body`
    pub fn collision_events_for(&self, body: BodyHandle) -> impl Iterator<Item = &CollisionEvent> {
        self.events.events_for(body)
    }

    // ==================== Debug ====================

    /// Get number of rigid bodies
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Get number of registered pairs
    pub fn pair_count(&self) -> usize {
        self.pairs.len()
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::with_valid_config(PhysicsConfig::default())
    }
}
