//! Void Physics 2D - Impulse-based rigid body core
//!
//! This crate provides a small, deterministic 2D rigid body simulation for
//! the Void Engine.
//!
//! # Features
//!
//! - Convex polygon and circle shapes
//! - Separating-axis collision detection
//! - Two-point contact manifolds
//! - Impulse response with restitution and angular effects
//! - Static bodies and rotation-locked bodies
//! - Fixed-timestep world with collision events
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │                  PhysicsWorld                     │
//! │  ┌─────────┐  ┌────────────┐  ┌────────────────┐ │
//! │  │ BodySet │  │ Pair list  │  │ EventCollector │ │
//! │  └─────────┘  └────────────┘  └────────────────┘ │
//! └──────────────────────────────────────────────────┘
//!                         │ tick
//!         ┌───────────────┼────────────────┐
//!         ▼               ▼                ▼
//!   ┌────────────┐  ┌─────────────┐  ┌───────────┐
//!   │ Integrator │  │ NarrowPhase │─▶│ Manifold  │
//!   └────────────┘  └─────────────┘  └───────────┘
//!                         │
//!                         ▼
//!                    ┌─────────┐
//!                    │ Solver  │
//!                    └─────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use void_physics2d::prelude::*;
//!
//! // Create physics world
//! let mut physics = PhysicsWorld::new(PhysicsConfig::default()).unwrap();
//!
//! // A falling box and the ground it lands on
//! let crate_box = physics.create_body(Shape::square(40.0), RigidBodyDesc::dynamic());
//! let ground = physics.create_body(
//!     Shape::rect(100.0, 20.0),
//!     RigidBodyDesc::fixed().with_position(0.0, 200.0),
//! );
//! physics.add_pair(crate_box, ground).unwrap();
//!
//! // Step simulation
//! physics.step(1.0 / 60.0);
//! ```

pub mod body;
pub mod config;
pub mod error;
pub mod events;
pub mod integrator;
pub mod manifold;
pub mod material;
pub mod narrow_phase;
pub mod set;
pub mod shape;
pub mod solver;
pub mod world;

pub mod prelude {
    //! Common imports for physics functionality
    pub use crate::body::{RigidBody, RigidBodyDesc, RigidBodyType};
    pub use crate::config::PhysicsConfig;
    pub use crate::error::{PhysicsError, Result};
    pub use crate::events::{CollisionEvent, EventCollector};
    pub use crate::manifold::{find_contacts, ContactManifold};
    pub use crate::material::PhysicsMaterial;
    pub use crate::narrow_phase::{detect, CollisionResult};
    pub use crate::set::{BodyHandle, BodySet};
    pub use crate::shape::Shape;
    pub use crate::solver::{
        collide, resolve, BodyMover, Contact, CorrectionSplit, RestitutionRule, SolverPolicy,
        TranslateMover,
    };
    pub use crate::world::PhysicsWorld;
    pub use void_math2d::{Transform2D, Vec2};
}
