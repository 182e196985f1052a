//! Bounding volumes
//!
//! Each volume keeps its shape definition in local space and a world-space
//! copy derived from the owner's world matrix. Shapes are stored as a closed
//! enum so narrow-phase tests can match exhaustively on shape pairs.

use super::bounds::AABB;
use crate::foundation::math::{transform_point, Quat, Transform, Mat4, Vec3};

/// Shape discriminant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// Oriented box
    Box,
    /// Sphere
    Sphere,
    /// Capsule aligned with its local Z axis
    Capsule,
}

/// Oriented box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientedBox {
    /// Center position
    pub center: Vec3,
    /// Half size along each local axis
    pub half_extents: Vec3,
    /// Orientation
    pub rotation: Quat,
}

impl OrientedBox {
    /// Box at the origin with the given half extents (clamped to >= 0)
    pub fn new(half_extents: Vec3) -> Self {
        Self {
            center: Vec3::zeros(),
            half_extents: half_extents.sup(&Vec3::zeros()),
            rotation: Quat::identity(),
        }
    }

    /// Local axes in world space
    pub fn axes(&self) -> [Vec3; 3] {
        let m = self.rotation.to_rotation_matrix();
        let m = m.matrix();
        [m.column(0).into_owned(), m.column(1).into_owned(), m.column(2).into_owned()]
    }

    /// Closest point on (or in) the box to `point`
    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        let d = point - self.center;
        let mut result = self.center;
        for (i, axis) in self.axes().iter().enumerate() {
            let extent = self.half_extents[i];
            let distance = d.dot(axis).clamp(-extent, extent);
            result += axis * distance;
        }
        result
    }

    /// The eight corners
    pub fn corners(&self) -> [Vec3; 8] {
        let [ax, ay, az] = self.axes();
        let ex = ax * self.half_extents.x;
        let ey = ay * self.half_extents.y;
        let ez = az * self.half_extents.z;
        let c = self.center;
        [
            c - ex - ey - ez,
            c + ex - ey - ez,
            c + ex + ey - ez,
            c - ex + ey - ez,
            c - ex - ey + ez,
            c + ex - ey + ez,
            c + ex + ey + ez,
            c - ex + ey + ez,
        ]
    }

    /// Half size of the box projected onto world axes
    pub fn world_extents(&self) -> Vec3 {
        let [ax, ay, az] = self.axes();
        let he = self.half_extents;
        Vec3::new(
            ax.x.abs() * he.x + ay.x.abs() * he.y + az.x.abs() * he.z,
            ax.y.abs() * he.x + ay.y.abs() * he.y + az.y.abs() * he.z,
            ax.z.abs() * he.x + ay.z.abs() * he.y + az.z.abs() * he.z,
        )
    }
}

/// A bounding sphere
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    /// The center position of the sphere
    pub center: Vec3,
    /// The radius of the sphere
    pub radius: f32,
}

impl BoundingSphere {
    /// Creates a sphere at the origin (radius clamped to >= 0)
    pub fn new(radius: f32) -> Self {
        Self {
            center: Vec3::zeros(),
            radius: radius.max(0.0),
        }
    }

    /// Check if this sphere intersects with another (touching counts)
    pub fn intersects(&self, other: &BoundingSphere) -> bool {
        let distance_squared = (self.center - other.center).magnitude_squared();
        let radius_sum = self.radius + other.radius;
        distance_squared <= radius_sum * radius_sum
    }
}

/// Capsule: a segment along local Z swept by a sphere
///
/// `half_height` is measured from the center to the tip of a hemisphere, so
/// it is never smaller than `radius`. Equal values describe a sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Capsule {
    /// Center position
    pub center: Vec3,
    /// Orientation
    pub rotation: Quat,
    /// Sweep radius
    pub radius: f32,
    /// Center-to-tip distance along local Z
    pub half_height: f32,
}

impl Capsule {
    /// Capsule at the origin; radius clamped to >= 0, half height to >= radius
    pub fn new(radius: f32, half_height: f32) -> Self {
        let radius = radius.max(0.0);
        Self {
            center: Vec3::zeros(),
            rotation: Quat::identity(),
            radius,
            half_height: half_height.max(radius),
        }
    }

    /// Unit vector along the capsule's long axis
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::z()
    }

    /// End points of the inner segment
    pub fn segment(&self) -> (Vec3, Vec3) {
        let offset = self.up() * (self.half_height - self.radius).max(0.0);
        (self.center - offset, self.center + offset)
    }
}

/// World-space bounding volume of a primitive component
#[derive(Debug, Clone, PartialEq)]
pub enum BoundingVolume {
    /// Oriented box
    Box {
        /// Local-space definition
        local: OrientedBox,
        /// World-space copy
        world: OrientedBox,
    },
    /// Sphere
    Sphere {
        /// Local-space definition
        local: BoundingSphere,
        /// World-space copy
        world: BoundingSphere,
    },
    /// Capsule
    Capsule {
        /// Local-space definition
        local: Capsule,
        /// World-space copy
        world: Capsule,
    },
}

impl BoundingVolume {
    /// Box volume with the given half extents
    pub fn new_box(half_extents: Vec3) -> Self {
        let shape = OrientedBox::new(half_extents);
        Self::Box { local: shape, world: shape }
    }

    /// Sphere volume
    pub fn new_sphere(radius: f32) -> Self {
        let shape = BoundingSphere::new(radius);
        Self::Sphere { local: shape, world: shape }
    }

    /// Capsule volume
    pub fn new_capsule(radius: f32, half_height: f32) -> Self {
        let shape = Capsule::new(radius, half_height);
        Self::Capsule { local: shape, world: shape }
    }

    /// Shape discriminant
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Box { .. } => ShapeKind::Box,
            Self::Sphere { .. } => ShapeKind::Sphere,
            Self::Capsule { .. } => ShapeKind::Capsule,
        }
    }

    /// Recompute the world-space copy from `world_matrix`
    ///
    /// Pure in the matrix and the local definition, so repeated calls with
    /// the same matrix give the same result.
    pub fn update_from_transform(&mut self, world_matrix: &Mat4) {
        let transform = Transform::from_matrix(world_matrix);
        let scale = transform.scale;

        match self {
            Self::Box { local, world } => {
                world.center = transform_point(world_matrix, local.center);
                world.rotation = transform.rotation * local.rotation;
                world.half_extents = local.half_extents.component_mul(&scale);
            }
            Self::Sphere { local, world } => {
                world.center = transform_point(world_matrix, local.center);
                world.radius = local.radius * scale.max();
            }
            Self::Capsule { local, world } => {
                world.center = transform_point(world_matrix, local.center);
                world.rotation = transform.rotation * local.rotation;
                world.radius = local.radius * scale.x.max(scale.y);
                world.half_height = (local.half_height * scale.z).max(world.radius);
            }
        }
    }

    /// World-space axis-aligned bounds
    pub fn compute_axis_aligned_bounds(&self) -> AABB {
        match self {
            Self::Box { world, .. } => AABB::from_center_extents(world.center, world.world_extents()),
            Self::Sphere { world, .. } => {
                AABB::from_center_extents(world.center, Vec3::repeat(world.radius))
            }
            Self::Capsule { world, .. } => {
                let (a, b) = world.segment();
                AABB::new(a.inf(&b), a.sup(&b)).expanded(world.radius)
            }
        }
    }

    /// World-space center
    pub fn center(&self) -> Vec3 {
        match self {
            Self::Box { world, .. } => world.center,
            Self::Sphere { world, .. } => world.center,
            Self::Capsule { world, .. } => world.center,
        }
    }
}
