//! Collision shapes and intersection tests
//!
//! Shapes are declared in model space on the entity and converted to world
//! space from the entity's world matrix each frame. Intersection covers every
//! pairing of sphere, AABB, and OBB; the oriented cases use a separating-axis
//! test.

use crate::foundation::math::{Mat4, Mat4Ext, Vec3};

/// Model-space collision shape attached to an entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CollisionShape {
    /// Sphere around the entity origin
    Sphere {
        /// Sphere radius
        radius: f32,
    },
    /// Axis-aligned box around the entity origin
    Aabb {
        /// Half extents along each world axis
        half_extents: Vec3,
    },
    /// Oriented box taking its axes from the entity's world matrix
    Obb {
        /// Half extents along each local axis
        half_extents: Vec3,
    },
}

impl CollisionShape {
    /// Convert to world space using the owning entity's world matrix.
    ///
    /// The matrix scale is folded into the extents; OBB axes are the
    /// normalized matrix columns.
    pub fn to_world_space(&self, world: &Mat4) -> WorldShape {
        let center = world.translation_part();
        match *self {
            Self::Sphere { radius } => WorldShape::Sphere(Sphere { center, radius }),
            Self::Aabb { half_extents } => WorldShape::Aabb(Aabb {
                min: center - half_extents,
                max: center + half_extents,
            }),
            Self::Obb { half_extents } => {
                let mut axes = [Vec3::zeros(); 3];
                let mut extents = Vec3::zeros();
                for i in 0..3 {
                    let col = Vec3::new(world[(0, i)], world[(1, i)], world[(2, i)]);
                    let len = col.magnitude();
                    axes[i] = if len > 1e-6 { col / len } else { Vec3::zeros() };
                    extents[i] = half_extents[i] * len;
                }
                WorldShape::Obb(Obb {
                    center,
                    half_extents: extents,
                    axes,
                })
            }
        }
    }
}

/// World-space sphere
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    /// Center position
    pub center: Vec3,
    /// Radius
    pub radius: f32,
}

/// World-space axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner
    pub min: Vec3,
    /// Maximum corner
    pub max: Vec3,
}

impl Aabb {
    /// Box center
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Half extents along each axis
    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Per-axis overlap depth with another box; all components positive when
    /// the boxes intersect
    pub fn overlap(&self, other: &Aabb) -> Vec3 {
        Vec3::new(
            (self.max.x.min(other.max.x)) - (self.min.x.max(other.min.x)),
            (self.max.y.min(other.max.y)) - (self.min.y.max(other.min.y)),
            (self.max.z.min(other.max.z)) - (self.min.z.max(other.min.z)),
        )
    }

    fn closest_point(&self, point: Vec3) -> Vec3 {
        Vec3::new(
            point.x.clamp(self.min.x, self.max.x),
            point.y.clamp(self.min.y, self.max.y),
            point.z.clamp(self.min.z, self.max.z),
        )
    }

    fn as_obb(&self) -> Obb {
        Obb {
            center: self.center(),
            half_extents: self.half_extents(),
            axes: [Vec3::x(), Vec3::y(), Vec3::z()],
        }
    }
}

/// World-space oriented bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obb {
    /// Center position
    pub center: Vec3,
    /// Half extents along each local axis
    pub half_extents: Vec3,
    /// Orthonormal local axes
    pub axes: [Vec3; 3],
}

impl Obb {
    fn closest_point(&self, point: Vec3) -> Vec3 {
        let offset = point - self.center;
        let mut result = self.center;
        for i in 0..3 {
            let distance = offset.dot(&self.axes[i]).clamp(-self.half_extents[i], self.half_extents[i]);
            result += self.axes[i] * distance;
        }
        result
    }

    fn projected_radius(&self, axis: &Vec3) -> f32 {
        (0..3)
            .map(|i| (axis.dot(&self.axes[i]) * self.half_extents[i]).abs())
            .sum()
    }
}

/// World-space shape ready for intersection testing
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorldShape {
    /// Sphere
    Sphere(Sphere),
    /// Axis-aligned box
    Aabb(Aabb),
    /// Oriented box
    Obb(Obb),
}

impl WorldShape {
    /// Test this shape against another; symmetric over all nine pairings
    pub fn intersects(&self, other: &WorldShape) -> bool {
        match (self, other) {
            (Self::Sphere(a), Self::Sphere(b)) => sphere_sphere(a, b),
            (Self::Sphere(s), Self::Aabb(b)) | (Self::Aabb(b), Self::Sphere(s)) => {
                sphere_aabb(s, b)
            }
            (Self::Sphere(s), Self::Obb(b)) | (Self::Obb(b), Self::Sphere(s)) => sphere_obb(s, b),
            (Self::Aabb(a), Self::Aabb(b)) => aabb_aabb(a, b),
            (Self::Aabb(a), Self::Obb(b)) | (Self::Obb(b), Self::Aabb(a)) => {
                obb_obb(&a.as_obb(), b)
            }
            (Self::Obb(a), Self::Obb(b)) => obb_obb(a, b),
        }
    }

    /// World-space center of the shape
    pub fn center(&self) -> Vec3 {
        match self {
            Self::Sphere(s) => s.center,
            Self::Aabb(b) => b.center(),
            Self::Obb(b) => b.center,
        }
    }
}

fn sphere_sphere(a: &Sphere, b: &Sphere) -> bool {
    let distance_sq = (b.center - a.center).magnitude_squared();
    let radius_sum = a.radius + b.radius;
    distance_sq <= radius_sum * radius_sum
}

fn sphere_aabb(sphere: &Sphere, aabb: &Aabb) -> bool {
    let closest = aabb.closest_point(sphere.center);
    (closest - sphere.center).magnitude_squared() <= sphere.radius * sphere.radius
}

fn sphere_obb(sphere: &Sphere, obb: &Obb) -> bool {
    let closest = obb.closest_point(sphere.center);
    (closest - sphere.center).magnitude_squared() <= sphere.radius * sphere.radius
}

fn aabb_aabb(a: &Aabb, b: &Aabb) -> bool {
    a.min.x <= b.max.x
        && a.max.x >= b.min.x
        && a.min.y <= b.max.y
        && a.max.y >= b.min.y
        && a.min.z <= b.max.z
        && a.max.z >= b.min.z
}

/// Separating-axis test over the 15 candidate axes (3 + 3 face normals plus
/// 9 edge cross products)
fn obb_obb(a: &Obb, b: &Obb) -> bool {
    let offset = b.center - a.center;

    let test_axis = |axis: Vec3| -> bool {
        // Cross products of near-parallel edges degenerate; skip them
        if axis.magnitude_squared() < 1e-6 {
            return true;
        }
        let distance = offset.dot(&axis).abs();
        distance <= a.projected_radius(&axis) + b.projected_radius(&axis)
    };

    for axis in a.axes {
        if !test_axis(axis) {
            return false;
        }
    }
    for axis in b.axes {
        if !test_axis(axis) {
            return false;
        }
    }
    for i in 0..3 {
        for j in 0..3 {
            if !test_axis(a.axes[i].cross(&b.axes[j])) {
                return false;
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world_at(translation: Vec3) -> Mat4 {
        Mat4::new_translation(&translation)
    }

    #[test]
    fn test_sphere_sphere_overlap() {
        let a = CollisionShape::Sphere { radius: 1.0 }.to_world_space(&world_at(Vec3::zeros()));
        let b = CollisionShape::Sphere { radius: 1.0 }
            .to_world_space(&world_at(Vec3::new(1.5, 0.0, 0.0)));
        let c = CollisionShape::Sphere { radius: 1.0 }
            .to_world_space(&world_at(Vec3::new(2.5, 0.0, 0.0)));
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_sphere_sphere_touching_counts() {
        let a = CollisionShape::Sphere { radius: 1.0 }.to_world_space(&world_at(Vec3::zeros()));
        let b = CollisionShape::Sphere { radius: 1.0 }
            .to_world_space(&world_at(Vec3::new(2.0, 0.0, 0.0)));
        assert!(a.intersects(&b));
    }

    #[test]
    fn test_aabb_aabb_overlap() {
        let a = CollisionShape::Aabb { half_extents: Vec3::new(1.0, 1.0, 1.0) }
            .to_world_space(&world_at(Vec3::zeros()));
        let b = CollisionShape::Aabb { half_extents: Vec3::new(1.0, 1.0, 1.0) }
            .to_world_space(&world_at(Vec3::new(1.5, 0.5, 0.0)));
        let c = CollisionShape::Aabb { half_extents: Vec3::new(1.0, 1.0, 1.0) }
            .to_world_space(&world_at(Vec3::new(3.0, 0.0, 0.0)));
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_sphere_aabb_corner() {
        let sphere = CollisionShape::Sphere { radius: 0.5 }
            .to_world_space(&world_at(Vec3::new(1.2, 1.2, 1.2)));
        let aabb = CollisionShape::Aabb { half_extents: Vec3::new(1.0, 1.0, 1.0) }
            .to_world_space(&world_at(Vec3::zeros()));
        // Corner distance sqrt(3 * 0.04) ≈ 0.346 < 0.5
        assert!(sphere.intersects(&aabb));

        let far = CollisionShape::Sphere { radius: 0.2 }
            .to_world_space(&world_at(Vec3::new(1.5, 1.5, 1.5)));
        assert!(!far.intersects(&aabb));
    }

    #[test]
    fn test_obb_rotation_matters() {
        // A long thin box rotated 90 degrees around Y reaches along X instead of Z
        let long_box = CollisionShape::Obb { half_extents: Vec3::new(0.5, 0.5, 4.0) };
        let target = CollisionShape::Aabb { half_extents: Vec3::new(0.5, 0.5, 0.5) }
            .to_world_space(&world_at(Vec3::new(3.0, 0.0, 0.0)));

        let unrotated = long_box.to_world_space(&world_at(Vec3::zeros()));
        assert!(!unrotated.intersects(&target));

        let world = Mat4::rotation_y(std::f32::consts::FRAC_PI_2);
        let rotated = long_box.to_world_space(&world);
        assert!(rotated.intersects(&target));
    }

    #[test]
    fn test_obb_scale_folds_into_extents() {
        let shape = CollisionShape::Obb { half_extents: Vec3::new(1.0, 1.0, 1.0) };
        let world = Mat4::new_nonuniform_scaling(&Vec3::new(1.0, 1.0, 5.0));
        let WorldShape::Obb(obb) = shape.to_world_space(&world) else {
            panic!("expected obb");
        };
        assert!((obb.half_extents.z - 5.0).abs() < 1e-5);
        assert!((obb.axes[2].magnitude() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_obb_obb_separating_axis() {
        // Two boxes rotated 45 degrees whose corners interleave without touching
        let a = CollisionShape::Obb { half_extents: Vec3::new(1.0, 1.0, 1.0) }
            .to_world_space(&Mat4::rotation_y(std::f32::consts::FRAC_PI_4));
        let b_world = Mat4::new_translation(&Vec3::new(3.0, 0.0, 0.0))
            * Mat4::rotation_y(std::f32::consts::FRAC_PI_4);
        let b = CollisionShape::Obb { half_extents: Vec3::new(1.0, 1.0, 1.0) }
            .to_world_space(&b_world);
        assert!(!a.intersects(&b));

        let c_world = Mat4::new_translation(&Vec3::new(2.0, 0.0, 0.0))
            * Mat4::rotation_y(std::f32::consts::FRAC_PI_4);
        let c = CollisionShape::Obb { half_extents: Vec3::new(1.0, 1.0, 1.0) }
            .to_world_space(&c_world);
        assert!(a.intersects(&c));
    }

    #[test]
    fn test_aabb_overlap_depths() {
        let a = Aabb { min: Vec3::new(-1.0, -1.0, -1.0), max: Vec3::new(1.0, 1.0, 1.0) };
        let b = Aabb { min: Vec3::new(0.5, -1.0, -1.0), max: Vec3::new(2.5, 1.0, 1.0) };
        let overlap = a.overlap(&b);
        assert!((overlap.x - 0.5).abs() < 1e-6);
        assert!((overlap.y - 2.0).abs() < 1e-6);
    }
}
