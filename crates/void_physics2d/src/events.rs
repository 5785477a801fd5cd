//! Collision events recorded during a tick

use crate::set::BodyHandle;
use crate::solver::Contact;
use std::collections::HashSet;
use void_math2d::Vec2;

/// A collision resolved between two bodies
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionEvent {
    /// First body of the pair
    pub body_a: BodyHandle,
    /// Second body of the pair
    pub body_b: BodyHandle,
    /// Contact normal, pointing from `body_a` toward `body_b`
    pub normal: Vec2,
    /// Penetration depth when first detected this tick
    pub depth: f64,
    /// World-space contact points
    pub contacts: Vec<Vec2>,
}

impl CollisionEvent {
    pub fn new(body_a: BodyHandle, body_b: BodyHandle, contact: &Contact) -> Self {
        Self {
            body_a,
            body_b,
            normal: contact.result.normal,
            depth: contact.result.depth,
            contacts: contact.manifold.contacts().to_vec(),
        }
    }

    /// Check if the event involves `body`
    pub fn involves(&self, body: BodyHandle) -> bool {
        self.body_a == body || self.body_b == body
    }

    /// Get the average contact point
    pub fn average_contact_point(&self) -> Option<Vec2> {
        if self.contacts.is_empty() {
            return None;
        }
        let sum = self.contacts.iter().fold(Vec2::ZERO, |acc, p| acc + *p);
        Some(sum / self.contacts.len() as f64)
    }
}

/// Collects the events of the current tick
#[derive(Debug, Default)]
pub struct EventCollector {
    /// Collision events this tick
    pub(crate) collision_events: Vec<CollisionEvent>,
    /// Ordered pairs already recorded this tick
    pairs: HashSet<(BodyHandle, BodyHandle)>,
}

impl EventCollector {
    /// Create a new event collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all collected events
    pub fn clear(&mut self) {
        self.collision_events.clear();
        self.pairs.clear();
    }

    /// Record `event` unless its pair already has one this tick.
    /// Returns whether it was recorded.
    pub fn push(&mut self, event: CollisionEvent) -> bool {
        if !self.pairs.insert((event.body_a, event.body_b)) {
            return false;
        }
        self.collision_events.push(event);
        true
    }

    /// Check whether the pair was already recorded this tick
    pub fn contains_pair(&self, a: BodyHandle, b: BodyHandle) -> bool {
        self.pairs.contains(&(a, b))
    }

    pub fn events(&self) -> &[CollisionEvent] {
        &self.collision_events
    }

    /// Events touching `body`
    pub fn events_for(&self, body: BodyHandle) -> impl Iterator<Item = &CollisionEvent> {
        self.collision_events.iter().filter(move |e| e.involves(body))
    }

    pub fn len(&self) -> usize {
        self.collision_events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collision_events.is_empty()
    }
}
