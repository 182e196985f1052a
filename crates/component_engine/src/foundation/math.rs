//! Math utilities and types
//!
//! Provides the vector, matrix and transform types shared by the scene graph,
//! bounding volumes and the overlap engine.

use nalgebra::{Matrix3, Matrix4, Point3, Quaternion, Unit, Vector3, Vector4};

/// Locations, extents, scale and directions
pub type Vec3 = Vector3<f32>;
/// RGBA debug colors
pub type Vec4 = Vector4<f32>;
/// Rotation-scale block of a world matrix
pub type Mat3 = Matrix3<f32>;
/// World and relative transform matrices
pub type Mat4 = Matrix4<f32>;
/// Unit quaternion rotation
pub type Quat = Unit<Quaternion<f32>>;

/// Transform representing position, rotation, and scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Position in 3D space
    pub position: Vec3,

    /// Rotation quaternion
    pub rotation: Quat,

    /// Scale factors
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with only position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a transform with position and rotation
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            ..Default::default()
        }
    }

    /// Convert to a transformation matrix (TRS order)
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.position)
            * self.rotation.to_homogeneous()
            * Mat4::new_nonuniform_scaling(&self.scale)
    }

    /// Create a transform from a transformation matrix
    ///
    /// Shear is discarded. Zero scale axes leave the rotation at identity
    /// for that axis.
    pub fn from_matrix(matrix: &Mat4) -> Self {
        let position = matrix_translation(matrix);
        let scale = matrix_scale(matrix);

        let safe = |s: f32| if s > f32::EPSILON { s } else { 1.0 };
        let rotation_matrix = Mat3::new(
            matrix.m11 / safe(scale.x), matrix.m12 / safe(scale.y), matrix.m13 / safe(scale.z),
            matrix.m21 / safe(scale.x), matrix.m22 / safe(scale.y), matrix.m23 / safe(scale.z),
            matrix.m31 / safe(scale.x), matrix.m32 / safe(scale.y), matrix.m33 / safe(scale.z),
        );
        let rotation = Quat::from_matrix(&rotation_matrix);

        Self {
            position,
            rotation,
            scale,
        }
    }
}

/// Translation column of an affine matrix
pub fn matrix_translation(matrix: &Mat4) -> Vec3 {
    Vec3::new(matrix.m14, matrix.m24, matrix.m34)
}

/// Per-axis scale (column lengths) of an affine matrix
pub fn matrix_scale(matrix: &Mat4) -> Vec3 {
    Vec3::new(
        Vec3::new(matrix.m11, matrix.m21, matrix.m31).magnitude(),
        Vec3::new(matrix.m12, matrix.m22, matrix.m32).magnitude(),
        Vec3::new(matrix.m13, matrix.m23, matrix.m33).magnitude(),
    )
}

/// Transform a point by an affine matrix
pub fn transform_point(matrix: &Mat4, point: Vec3) -> Vec3 {
    matrix.transform_point(&Point3::<f32>::from(point)).coords
}

/// Angle constants
pub mod constants {
    /// Full turn in radians
    pub const TAU: f32 = std::f32::consts::TAU;
    /// Multiply degrees by this to get radians
    pub const DEG_TO_RAD: f32 = std::f32::consts::PI / 180.0;
    /// Multiply radians by this to get degrees
    pub const RAD_TO_DEG: f32 = 180.0 / std::f32::consts::PI;
}

/// Math utility functions
pub mod utils {
    use super::{constants, Quat, Vec3};

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Convert radians to degrees
    pub fn rad_to_deg(radians: f32) -> f32 {
        radians * constants::RAD_TO_DEG
    }

    /// Rotation from euler angles in degrees (roll, pitch, yaw as x, y, z)
    pub fn quat_from_euler_degrees(euler: Vec3) -> Quat {
        Quat::from_euler_angles(deg_to_rad(euler.x), deg_to_rad(euler.y), deg_to_rad(euler.z))
    }

    /// Euler angles in degrees (roll, pitch, yaw as x, y, z)
    pub fn quat_to_euler_degrees(rotation: &Quat) -> Vec3 {
        let (roll, pitch, yaw) = rotation.euler_angles();
        Vec3::new(rad_to_deg(roll), rad_to_deg(pitch), rad_to_deg(yaw))
    }
}
