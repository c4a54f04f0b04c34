//! Hierarchical world transforms
//!
//! A [`WorldTransform`] carries scale, rotation (Euler angles or a
//! quaternion), translation, and a cached world matrix. Transforms live in a
//! [`TransformArena`]; parent links are generation-checked keys, never
//! references, so a despawned parent degrades to a detached transform instead
//! of dangling.
//!
//! Matrix updates are explicit: callers rebuild a transform's world matrix
//! once per frame, parents before children. The cached parent matrix is
//! whatever the parent last published.

use slotmap::SlotMap;

use crate::foundation::math::{Mat4, Mat4Ext, Quat, Vec3};

slotmap::new_key_type! {
    /// Generation-checked handle to a transform in a [`TransformArena`]
    pub struct TransformKey;
}

/// Scale, rotation, translation, and a cached world matrix
#[derive(Debug, Clone, PartialEq)]
pub struct WorldTransform {
    /// Scale factors
    pub scale: Vec3,
    /// Euler rotation in radians, used by [`WorldTransform::refresh_from_euler`]
    pub rotation: Vec3,
    /// Quaternion rotation, used by [`WorldTransform::refresh_from_quaternion`]
    pub quaternion: Quat,
    /// Translation; local to the parent while a parent is set
    pub translation: Vec3,
    /// Cached world matrix, rebuilt by the refresh methods
    pub world: Mat4,
    parent: Option<TransformKey>,
}

impl Default for WorldTransform {
    fn default() -> Self {
        Self {
            scale: Vec3::new(1.0, 1.0, 1.0),
            rotation: Vec3::zeros(),
            quaternion: Quat::identity(),
            translation: Vec3::zeros(),
            world: Mat4::identity(),
            parent: None,
        }
    }
}

impl WorldTransform {
    /// Create a transform at `translation` with identity rotation and scale
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Default::default()
        }
    }

    /// Builder-style scale
    #[must_use]
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Parent key, if any
    pub fn parent(&self) -> Option<TransformKey> {
        self.parent
    }

    /// World-space position from the cached matrix
    pub fn world_position(&self) -> Vec3 {
        self.world.translation_part()
    }

    /// Rebuild the world matrix from the Euler rotation, then apply the
    /// parent matrix if one is supplied
    pub fn refresh_from_euler(&mut self, parent_world: Option<&Mat4>) {
        self.world = Mat4::affine_euler(self.scale, self.rotation, self.translation);
        if let Some(parent) = parent_world {
            self.world = parent * self.world;
        }
    }

    /// Rebuild the world matrix from the quaternion rotation, then apply the
    /// parent matrix if one is supplied
    pub fn refresh_from_quaternion(&mut self, parent_world: Option<&Mat4>) {
        self.world = Mat4::affine_quat(self.scale, &self.quaternion, self.translation);
        if let Some(parent) = parent_world {
            self.world = parent * self.world;
        }
    }
}

/// Keyed storage for transforms with parent-link resolution
#[derive(Debug, Default)]
pub struct TransformArena {
    slots: SlotMap<TransformKey, WorldTransform>,
}

impl TransformArena {
    /// Create an empty arena
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a transform, returning its key
    pub fn insert(&mut self, transform: WorldTransform) -> TransformKey {
        self.slots.insert(transform)
    }

    /// Remove a transform. Children keep their key and read as detached.
    pub fn remove(&mut self, key: TransformKey) -> Option<WorldTransform> {
        self.slots.remove(key)
    }

    /// Shared access to a transform
    pub fn get(&self, key: TransformKey) -> Option<&WorldTransform> {
        self.slots.get(key)
    }

    /// Exclusive access to a transform
    pub fn get_mut(&mut self, key: TransformKey) -> Option<&mut WorldTransform> {
        self.slots.get_mut(key)
    }

    /// Attach `child` under `parent`, rebasing the child's translation into
    /// parent space so its world position is unchanged on the next refresh
    pub fn set_parent(&mut self, child: TransformKey, parent: TransformKey) {
        let parent_translation = self.slots.get(parent).map(|p| p.translation);
        if let (Some(child_tf), Some(parent_translation)) =
            (self.slots.get_mut(child), parent_translation)
        {
            child_tf.parent = Some(parent);
            child_tf.translation -= parent_translation;
        }
    }

    /// Detach `child` from its parent, baking the cached world-space
    /// translation back into its local translation
    pub fn unset_parent(&mut self, child: TransformKey) {
        if let Some(child_tf) = self.slots.get_mut(child) {
            if child_tf.parent.is_some() {
                child_tf.translation = child_tf.world.translation_part();
            }
            child_tf.parent = None;
        }
    }

    /// Rebuild `key`'s world matrix from its Euler rotation. A parent key
    /// that no longer resolves is treated as detached.
    pub fn refresh_from_euler(&mut self, key: TransformKey) {
        let parent_world = self.resolved_parent_world(key);
        if let Some(tf) = self.slots.get_mut(key) {
            tf.refresh_from_euler(parent_world.as_ref());
        }
    }

    /// Rebuild `key`'s world matrix from its quaternion rotation. A parent
    /// key that no longer resolves is treated as detached.
    pub fn refresh_from_quaternion(&mut self, key: TransformKey) {
        let parent_world = self.resolved_parent_world(key);
        if let Some(tf) = self.slots.get_mut(key) {
            tf.refresh_from_quaternion(parent_world.as_ref());
        }
    }

    fn resolved_parent_world(&self, key: TransformKey) -> Option<Mat4> {
        let parent_key = self.slots.get(key)?.parent?;
        self.slots.get(parent_key).map(|p| p.world)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_refresh_caches_translation() {
        let mut arena = TransformArena::new();
        let key = arena.insert(WorldTransform::from_translation(Vec3::new(1.0, 2.0, 3.0)));
        arena.refresh_from_euler(key);
        let tf = arena.get(key).unwrap();
        assert_relative_eq!(tf.world_position(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_child_follows_parent() {
        let mut arena = TransformArena::new();
        let parent = arena.insert(WorldTransform::from_translation(Vec3::new(10.0, 0.0, 0.0)));
        let child = arena.insert(WorldTransform::from_translation(Vec3::new(0.0, 0.0, 2.0)));
        arena.set_parent(child, parent);
        arena.refresh_from_euler(parent);
        arena.refresh_from_euler(child);

        // Rebase keeps the child's world position where it was
        assert_relative_eq!(
            arena.get(child).unwrap().world_position(),
            Vec3::new(0.0, 0.0, 2.0),
            epsilon = 1e-5
        );

        // Moving the parent drags the child along
        arena.get_mut(parent).unwrap().translation = Vec3::new(20.0, 0.0, 0.0);
        arena.refresh_from_euler(parent);
        arena.refresh_from_euler(child);
        assert_relative_eq!(
            arena.get(child).unwrap().world_position(),
            Vec3::new(10.0, 0.0, 2.0),
            epsilon = 1e-5
        );
    }

    #[test]
    fn test_unset_parent_bakes_world_position() {
        let mut arena = TransformArena::new();
        let parent = arena.insert(WorldTransform::from_translation(Vec3::new(5.0, 1.0, 0.0)));
        let child = arena.insert(WorldTransform::from_translation(Vec3::new(7.0, 1.0, 0.0)));
        arena.set_parent(child, parent);
        arena.refresh_from_euler(parent);
        arena.refresh_from_euler(child);
        let before = arena.get(child).unwrap().world_position();

        arena.unset_parent(child);
        arena.refresh_from_euler(child);
        let after = arena.get(child).unwrap().world_position();
        assert_relative_eq!(before, after, epsilon = 1e-5);
        assert!(arena.get(child).unwrap().parent().is_none());
    }

    #[test]
    fn test_stale_parent_reads_as_detached() {
        let mut arena = TransformArena::new();
        let parent = arena.insert(WorldTransform::from_translation(Vec3::new(10.0, 0.0, 0.0)));
        let child = arena.insert(WorldTransform::from_translation(Vec3::new(0.0, 0.0, 2.0)));
        arena.set_parent(child, parent);
        arena.refresh_from_euler(parent);
        arena.refresh_from_euler(child);

        arena.remove(parent);
        arena.refresh_from_euler(child);
        // Local translation only; no panic, no stale matrix
        assert_relative_eq!(
            arena.get(child).unwrap().world_position(),
            Vec3::new(-10.0, 0.0, 2.0),
            epsilon = 1e-5
        );
    }

    #[test]
    fn test_parent_rotation_carries_child() {
        let mut arena = TransformArena::new();
        let parent = arena.insert(WorldTransform::default());
        let child = arena.insert(WorldTransform::from_translation(Vec3::new(0.0, 0.0, 2.0)));
        arena.set_parent(child, parent);

        arena.get_mut(parent).unwrap().rotation.y = std::f32::consts::FRAC_PI_2;
        arena.refresh_from_euler(parent);
        arena.refresh_from_euler(child);

        let pos = arena.get(child).unwrap().world_position();
        assert_relative_eq!(pos.x, 2.0, epsilon = 1e-5);
        assert_relative_eq!(pos.z, 0.0, epsilon = 1e-5);
    }
}
