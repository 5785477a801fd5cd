//! Impulse-based collision response
//!
//! One call resolves one pair once: positional correction first, then a
//! normal impulse per contact point. Pairs are expected to be resolved
//! several times per tick, in a caller-chosen order; the result depends on
//! that order.

use crate::body::RigidBody;
use crate::error::Result;
use crate::manifold::{find_contacts, ContactManifold};
use crate::narrow_phase::{detect, CollisionResult};
use serde::{Deserialize, Serialize};
use void_math2d::Vec2;

/// How the restitution of a pair is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RestitutionRule {
    /// An infinite-mass body takes its partner's restitution; otherwise the
    /// smaller of the two
    #[default]
    StaticDonatesPartner,
    /// Always the smaller of the two
    Minimum,
}

impl RestitutionRule {
    pub fn combine(self, a: &RigidBody, b: &RigidBody) -> f64 {
        match self {
            Self::StaticDonatesPartner if a.mass.is_infinite() => b.restitution,
            Self::StaticDonatesPartner if b.mass.is_infinite() => a.restitution,
            _ => a.restitution.min(b.restitution),
        }
    }
}

/// How penetration is shared between two movable bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CorrectionSplit {
    /// Half the depth each
    #[default]
    Even,
    /// Proportional to inverse mass, so the lighter body moves further
    MassWeighted,
}

impl CorrectionSplit {
    /// Fraction of the depth applied to body A
    fn share_a(self, a: &RigidBody, b: &RigidBody) -> f64 {
        match self {
            Self::Even => 0.5,
            Self::MassWeighted => {
                let inv_a = a.inverse_mass();
                inv_a / (inv_a + b.inverse_mass())
            }
        }
    }
}

/// Tunable parts of collision response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SolverPolicy {
    pub restitution_rule: RestitutionRule,
    pub correction_split: CorrectionSplit,
}

/// Positional correction sink.
///
/// The solver never writes a transform directly; it hands every
/// correction to a mover so callers can route it through their own
/// position storage.
pub trait BodyMover {
    fn move_body(&mut self, body: &mut RigidBody, delta: Vec2);
}

/// Mover that translates the body's own transform
#[derive(Debug, Clone, Copy, Default)]
pub struct TranslateMover;

impl BodyMover for TranslateMover {
    #[inline]
    fn move_body(&mut self, body: &mut RigidBody, delta: Vec2) {
        body.move_by(delta);
    }
}

impl<F> BodyMover for F
where
    F: FnMut(&mut RigidBody, Vec2),
{
    #[inline]
    fn move_body(&mut self, body: &mut RigidBody, delta: Vec2) {
        self(body, delta)
    }
}

/// A resolved collision
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub result: CollisionResult,
    pub manifold: ContactManifold,
}

/// Detect, build the manifold and resolve one pair.
///
/// Contact points are taken from the overlapping geometry, before
/// positional correction moves either body.
///
/// Both bodies are validated first; a body without usable geometry is an
/// error rather than a silent miss. Returns `Ok(None)` when the bodies do
/// not overlap or are both immovable.
pub fn collide<M: BodyMover + ?Sized>(
    a: &mut RigidBody,
    b: &mut RigidBody,
    mover: &mut M,
    policy: &SolverPolicy,
) -> Result<Option<Contact>> {
    a.validate()?;
    b.validate()?;

    if a.is_static() && b.is_static() {
        return Ok(None);
    }

    let Some(result) = detect(&a.shape, &a.transform, &b.shape, &b.transform) else {
        return Ok(None);
    };

    let manifold = find_contacts(a, b);
    resolve(a, b, &result, &manifold, mover, policy);

    Ok(Some(Contact { result, manifold }))
}

/// Resolve an already detected collision between `a` and `b`.
///
/// `result.normal` must point from A toward B.
pub fn resolve<M: BodyMover + ?Sized>(
    a: &mut RigidBody,
    b: &mut RigidBody,
    result: &CollisionResult,
    manifold: &ContactManifold,
    mover: &mut M,
    policy: &SolverPolicy,
) {
    let a_static = a.is_static();
    let b_static = b.is_static();

    if a_static && b_static {
        return;
    }

    let normal = result.normal;
    let depth = result.depth;

    // Positional correction
    if a_static {
        mover.move_body(b, normal * depth);
    } else if b_static {
        mover.move_body(a, -normal * depth);
    } else {
        let share_a = policy.correction_split.share_a(a, b);
        mover.move_body(a, -normal * (depth * share_a));
        mover.move_body(b, normal * (depth * (1.0 - share_a)));
    }

    let e = policy.restitution_rule.combine(a, b);
    let contacts = manifold.contacts();
    if contacts.is_empty() {
        return;
    }

    let inv_mass_a = a.inverse_mass();
    let inv_mass_b = b.inverse_mass();
    let inv_inertia_a = a.inverse_inertia();
    let inv_inertia_b = b.inverse_inertia();
    let count = contacts.len() as f64;

    let mut impulses = [(0.0, Vec2::ZERO, Vec2::ZERO); 2];

    for (slot, &contact) in impulses.iter_mut().zip(contacts) {
        let ra = contact - a.position();
        let rb = contact - b.position();

        let velocity_a = a.linear_velocity + Vec2::new(-ra.y, ra.x) * a.angular_velocity;
        let velocity_b = b.linear_velocity + Vec2::new(-rb.y, rb.x) * b.angular_velocity;
        let normal_velocity = (velocity_b - velocity_a).dot(normal);

        if normal_velocity >= 0.0 {
            continue;
        }

        let ra_n = ra.cross(normal);
        let rb_n = rb.cross(normal);
        let denominator = inv_mass_a
            + inv_mass_b
            + ra_n * ra_n * inv_inertia_a
            + rb_n * rb_n * inv_inertia_b;

        let j = -(1.0 + e) * normal_velocity / denominator / count;
        *slot = (j, ra, rb);
    }

    for &(j, ra, rb) in &impulses[..contacts.len()] {
        if j == 0.0 {
            continue;
        }

        let impulse = normal * j;

        if !a_static {
            a.linear_velocity -= impulse * inv_mass_a;
        }
        a.angular_velocity += -ra.cross(impulse) * inv_inertia_a;

        if !b_static {
            b.linear_velocity += impulse * inv_mass_b;
        }
        b.angular_velocity += rb.cross(impulse) * inv_inertia_b;
    }

    log::trace!(
        "resolved contact: normal={:?} depth={:.4} points={}",
        normal,
        depth,
        contacts.len()
    );
}
