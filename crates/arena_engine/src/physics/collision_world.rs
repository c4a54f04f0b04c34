//! Per-frame collision pair manager
//!
//! The collider list is rebuilt from scratch every frame: callers `clear`,
//! then `register` each live collider, then `detect`. Pair sets from the
//! previous frame are kept so callers can ask which contacts entered or
//! exited this frame.

use std::collections::HashSet;
use std::hash::Hash;

use crate::physics::groups::CollisionGroup;
use crate::physics::shape::WorldShape;

/// An unordered contact between two colliders; `(a, b)` equals `(b, a)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Contact<K> {
    /// Smaller id of the pair
    pub a: K,
    /// Larger id of the pair
    pub b: K,
}

impl<K: Ord> Contact<K> {
    /// Create a contact with canonical ordering
    pub fn new(a: K, b: K) -> Self {
        if a <= b {
            Self { a, b }
        } else {
            Self { a: b, b: a }
        }
    }
}

struct ColliderEntry<K> {
    id: K,
    shape: WorldShape,
    attribute: CollisionGroup,
    mask: CollisionGroup,
}

/// Collision registry and pair detector, generic over the caller's id type
pub struct CollisionWorld<K> {
    colliders: Vec<ColliderEntry<K>>,
    contacts: Vec<Contact<K>>,
    current_pairs: HashSet<Contact<K>>,
    previous_pairs: HashSet<Contact<K>>,
}

impl<K> Default for CollisionWorld<K> {
    fn default() -> Self {
        Self {
            colliders: Vec::new(),
            contacts: Vec::new(),
            current_pairs: HashSet::new(),
            previous_pairs: HashSet::new(),
        }
    }
}

impl<K: Copy + Eq + Ord + Hash> CollisionWorld<K> {
    /// Create an empty collision world
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all registered colliders. Pair history is kept so edge queries
    /// still work across the rebuild.
    pub fn clear(&mut self) {
        self.colliders.clear();
    }

    /// Register a collider for this frame. Registration order is the
    /// dispatch order for the frame's contacts.
    pub fn register(
        &mut self,
        id: K,
        shape: WorldShape,
        attribute: CollisionGroup,
        mask: CollisionGroup,
    ) {
        self.colliders.push(ColliderEntry { id, shape, attribute, mask });
    }

    /// Test every registered pair once, recording contacts that pass both
    /// the group filter and the shape test
    pub fn detect(&mut self) {
        std::mem::swap(&mut self.previous_pairs, &mut self.current_pairs);
        self.current_pairs.clear();
        self.contacts.clear();

        for i in 0..self.colliders.len() {
            for j in (i + 1)..self.colliders.len() {
                let a = &self.colliders[i];
                let b = &self.colliders[j];
                if !CollisionGroup::should_collide(a.attribute, a.mask, b.attribute, b.mask) {
                    continue;
                }
                if !a.shape.intersects(&b.shape) {
                    continue;
                }
                let contact = Contact::new(a.id, b.id);
                if self.current_pairs.insert(contact) {
                    self.contacts.push(contact);
                }
            }
        }
    }

    /// Contacts found by the last `detect`, in registration order
    pub fn contacts(&self) -> &[Contact<K>] {
        &self.contacts
    }

    /// Contacts present this frame but not last frame
    pub fn entered(&self) -> impl Iterator<Item = Contact<K>> + '_ {
        self.current_pairs.difference(&self.previous_pairs).copied()
    }

    /// Contacts present last frame but not this frame
    pub fn exited(&self) -> impl Iterator<Item = Contact<K>> + '_ {
        self.previous_pairs.difference(&self.current_pairs).copied()
    }

    /// Whether the pair was in contact on the last `detect`
    pub fn in_contact(&self, a: K, b: K) -> bool {
        self.current_pairs.contains(&Contact::new(a, b))
    }
}
