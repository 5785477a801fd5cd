//! BodySet - generational arena owning every rigid body
//!
//! Handles stay valid until their body is removed; a removed slot bumps
//! its generation so stale handles are rejected instead of aliasing the
//! next body stored there.

use crate::body::RigidBody;
use crate::error::{PhysicsError, Result};

/// Handle to a rigid body in a [`BodySet`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyHandle {
    index: u32,
    generation: u32,
}

impl BodyHandle {
    /// Get the raw slot index
    #[inline]
    pub const fn index(&self) -> u32 {
        self.index
    }

    /// Get the generation
    #[inline]
    pub const fn generation(&self) -> u32 {
        self.generation
    }
}

struct Slot {
    body: Option<RigidBody>,
    generation: u32,
}

/// Arena of rigid bodies
#[derive(Default)]
pub struct BodySet {
    slots: Vec<Slot>,
    free_list: Vec<u32>,
    len: usize,
}

impl BodySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a body and get its handle
    pub fn insert(&mut self, body: RigidBody) -> BodyHandle {
        self.len += 1;

        if let Some(index) = self.free_list.pop() {
            let slot = &mut self.slots[index as usize];
            slot.body = Some(body);
            BodyHandle {
                index,
                generation: slot.generation,
            }
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(Slot {
                body: Some(body),
                generation: 0,
            });
            BodyHandle { index, generation: 0 }
        }
    }

    /// Remove a body, returning it if the handle was live
    pub fn remove(&mut self, handle: BodyHandle) -> Option<RigidBody> {
        let slot = self.slots.get_mut(handle.index as usize)?;

        if slot.generation != handle.generation || slot.body.is_none() {
            return None;
        }

        slot.generation = slot.generation.wrapping_add(1);
        self.free_list.push(handle.index);
        self.len -= 1;

        slot.body.take()
    }

    pub fn get(&self, handle: BodyHandle) -> Option<&RigidBody> {
        let slot = self.slots.get(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.body.as_ref()
    }

    pub fn get_mut(&mut self, handle: BodyHandle) -> Option<&mut RigidBody> {
        let slot = self.slots.get_mut(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.body.as_mut()
    }

    /// Borrow two distinct bodies mutably at once
    pub fn get_pair_mut(
        &mut self,
        a: BodyHandle,
        b: BodyHandle,
    ) -> Result<(&mut RigidBody, &mut RigidBody)> {
        if a.index == b.index {
            return Err(PhysicsError::SameBody(a));
        }
        if !self.contains(a) {
            return Err(PhysicsError::BodyNotFound(a));
        }
        if !self.contains(b) {
            return Err(PhysicsError::BodyNotFound(b));
        }

        let (ia, ib) = (a.index as usize, b.index as usize);
        let (first, second) = if ia < ib {
            let (left, right) = self.slots.split_at_mut(ib);
            (&mut left[ia], &mut right[0])
        } else {
            let (left, right) = self.slots.split_at_mut(ia);
            (&mut right[0], &mut left[ib])
        };

        match (first.body.as_mut(), second.body.as_mut()) {
            (Some(body_a), Some(body_b)) => Ok((body_a, body_b)),
            (None, _) => Err(PhysicsError::BodyNotFound(a)),
            (_, None) => Err(PhysicsError::BodyNotFound(b)),
        }
    }

    /// Check if a handle refers to a live body
    pub fn contains(&self, handle: BodyHandle) -> bool {
        self.slots
            .get(handle.index as usize)
            .map(|s| s.generation == handle.generation && s.body.is_some())
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterate over all bodies in slot order
    pub fn iter(&self) -> impl Iterator<Item = (BodyHandle, &RigidBody)> {
        self.slots.iter().enumerate().filter_map(|(i, slot)| {
            slot.body.as_ref().map(|body| {
                (
                    BodyHandle {
                        index: i as u32,
                        generation: slot.generation,
                    },
                    body,
                )
            })
        })
    }

    /// Iterate over all bodies mutably in slot order
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (BodyHandle, &mut RigidBody)> {
        self.slots.iter_mut().enumerate().filter_map(|(i, slot)| {
            let generation = slot.generation;
            slot.body.as_mut().map(|body| {
                (
                    BodyHandle {
                        index: i as u32,
                        generation,
                    },
                    body,
                )
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::Shape;

    fn body() -> RigidBody {
        RigidBody::dynamic(Shape::square(1.0))
    }

    #[test]
    fn test_insert_get_remove() {
        let mut set = BodySet::new();
        let a = set.insert(body());
        let b = set.insert(body());
        assert_eq!(set.len(), 2);
        assert!(set.get(a).is_some());

        assert!(set.remove(a).is_some());
        assert!(set.get(a).is_none());
        assert!(set.remove(a).is_none());
        assert!(set.contains(b));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_stale_handle_after_reuse() {
        let mut set = BodySet::new();
        let a = set.insert(body());
        set.remove(a);
        let c = set.insert(body());
        assert_eq!(c.index(), a.index());
        assert_ne!(c.generation(), a.generation());
        assert!(set.get(a).is_none());
        assert!(set.get(c).is_some());
    }

    #[test]
    fn test_get_pair_mut() {
        let mut set = BodySet::new();
        let a = set.insert(body());
        let b = set.insert(body());

        let (body_b, body_a) = set.get_pair_mut(b, a).unwrap();
        body_a.mass = 2.0;
        body_b.mass = 3.0;

        assert_eq!(set.get(a).unwrap().mass, 2.0);
        assert_eq!(set.get(b).unwrap().mass, 3.0);
    }

    #[test]
    fn test_get_pair_mut_errors() {
        let mut set = BodySet::new();
        let a = set.insert(body());
        let b = set.insert(body());
        assert_eq!(set.get_pair_mut(a, a).err(), Some(PhysicsError::SameBody(a)));

        set.remove(b);
        assert_eq!(set.get_pair_mut(a, b).err(), Some(PhysicsError::BodyNotFound(b)));
    }
}
