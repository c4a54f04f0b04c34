//! Math utilities and types
//!
//! Provides fundamental math types for 3D simulation and game logic.

pub use nalgebra::{
    Matrix3, Matrix4,
    Quaternion,
    Unit,
    Vector2, Vector3, Vector4,
};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// 2 * Pi
    pub const TAU: f32 = 2.0 * PI;

    /// Pi / 2
    pub const HALF_PI: f32 = PI * 0.5;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
}

/// Math utility functions
pub mod utils {
    use super::{Quat, Vec3};

    /// Clamp a value between min and max
    pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
        if value < min { min } else if value > max { max } else { value }
    }

    /// Linear interpolation
    pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
        a + (b - a) * t
    }

    /// Component-wise linear interpolation of vectors
    pub fn lerp_vec3(a: Vec3, b: Vec3, t: f32) -> Vec3 {
        a + (b - a) * t
    }

    /// Ease-in sine curve over `t` in [0, 1]
    pub fn ease_in_sine(t: f32) -> f32 {
        1.0 - ((t * super::constants::HALF_PI).cos())
    }

    /// Spherical interpolation between two directions.
    ///
    /// Inputs need not be normalized; degenerate inputs fall back to linear
    /// interpolation so a zero vector never produces NaN.
    pub fn slerp_vec3(from: Vec3, to: Vec3, t: f32) -> Vec3 {
        let (Some(a), Some(b)) = (from.try_normalize(1e-6), to.try_normalize(1e-6)) else {
            return lerp_vec3(from, to, t);
        };
        let dot = clamp(a.dot(&b), -1.0, 1.0);
        let theta = dot.acos();
        if theta.abs() < 1e-5 {
            return lerp_vec3(from, to, t);
        }
        if dot < -1.0 + 1e-4 {
            // Near-antiparallel: the sin ratios below divide by ~0 and blow
            // up in f32. Sweep around a perpendicular axis instead.
            let axis = nalgebra::Unit::try_new(a.cross(&Vec3::y()), 1e-6)
                .unwrap_or_else(Vec3::x_axis);
            return Quat::from_axis_angle(&axis, t * theta) * a;
        }
        let sin_theta = theta.sin();
        let scale_a = ((1.0 - t) * theta).sin() / sin_theta;
        let scale_b = (t * theta).sin() / sin_theta;
        a * scale_a + b * scale_b
    }

    /// Rotation that turns the +Z axis onto `direction` (projected movement
    /// facing). Returns identity for degenerate directions.
    pub fn face_direction(direction: Vec3) -> Quat {
        let Some(dir) = direction.try_normalize(1e-6) else {
            return Quat::identity();
        };
        let forward = Vec3::z();
        let dot = clamp(forward.dot(&dir), -1.0, 1.0);
        let cross = forward.cross(&dir);
        if let Some(axis) = nalgebra::Unit::try_new(cross, 1e-6) {
            Quat::from_axis_angle(&axis, dot.acos())
        } else if dot < 0.0 {
            // Directly behind: rotate half a turn around the up axis
            Quat::from_axis_angle(&Vec3::y_axis(), super::constants::PI)
        } else {
            Quat::identity()
        }
    }
}

/// Extension trait for Mat4 with additional convenience methods
pub trait Mat4Ext {
    /// Create a rotation matrix around the Y axis
    fn rotation_y(angle: f32) -> Mat4;

    /// Affine transform from scale, Euler rotation (XYZ order), and translation
    fn affine_euler(scale: Vec3, rotation: Vec3, translation: Vec3) -> Mat4;

    /// Affine transform from scale, quaternion, and translation
    fn affine_quat(scale: Vec3, rotation: &Quat, translation: Vec3) -> Mat4;

    /// Rotate a direction vector, ignoring translation
    fn transform_normal(&self, normal: Vec3) -> Vec3;

    /// Translation column of the matrix
    fn translation_part(&self) -> Vec3;
}

impl Mat4Ext for Mat4 {
    fn rotation_y(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::y_axis(), angle)
    }

    fn affine_euler(scale: Vec3, rotation: Vec3, translation: Vec3) -> Mat4 {
        let rot = Quat::from_euler_angles(rotation.x, rotation.y, rotation.z);
        Self::affine_quat(scale, &rot, translation)
    }

    fn affine_quat(scale: Vec3, rotation: &Quat, translation: Vec3) -> Mat4 {
        Mat4::new_translation(&translation)
            * rotation.to_homogeneous()
            * Mat4::new_nonuniform_scaling(&scale)
    }

    fn transform_normal(&self, normal: Vec3) -> Vec3 {
        self.fixed_view::<3, 3>(0, 0) * normal
    }

    fn translation_part(&self) -> Vec3 {
        Vec3::new(self.m14, self.m24, self.m34)
    }
}
