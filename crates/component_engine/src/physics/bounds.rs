//! Axis-aligned bounding boxes for broad-phase queries

use crate::foundation::math::Vec3;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    /// Minimum corner of the bounding box
    pub min: Vec3,
    /// Maximum corner of the bounding box
    pub max: Vec3,
}

impl AABB {
    /// Create a new AABB from min and max points
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create an AABB centered at a point with given extents
    pub fn from_center_extents(center: Vec3, extents: Vec3) -> Self {
        Self {
            min: center - extents,
            max: center + extents,
        }
    }

    /// Degenerate box containing a single point
    pub fn from_point(point: Vec3) -> Self {
        Self { min: point, max: point }
    }

    /// Get the center of the AABB
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Get the extents (half-size) of the AABB
    pub fn extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Check if this AABB contains a point
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.x >= self.min.x && point.x <= self.max.x &&
        point.y >= self.min.y && point.y <= self.max.y &&
        point.z >= self.min.z && point.z <= self.max.z
    }

    /// Check if this AABB intersects another AABB (touching counts)
    pub fn intersects(&self, other: &AABB) -> bool {
        self.min.x <= other.max.x && self.max.x >= other.min.x &&
        self.min.y <= other.max.y && self.max.y >= other.min.y &&
        self.min.z <= other.max.z && self.max.z >= other.min.z
    }

    /// Smallest box enclosing both boxes
    pub fn union(&self, other: &AABB) -> AABB {
        AABB {
            min: self.min.inf(&other.min),
            max: self.max.sup(&other.max),
        }
    }

    /// Grow the box uniformly on every side
    pub fn expanded(&self, amount: f32) -> AABB {
        let delta = Vec3::repeat(amount);
        AABB {
            min: self.min - delta,
            max: self.max + delta,
        }
    }
}

impl Default for AABB {
    fn default() -> Self {
        Self::from_point(Vec3::zeros())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touching_boxes_intersect() {
        let a = AABB::from_center_extents(Vec3::zeros(), Vec3::repeat(0.5));
        let b = AABB::from_center_extents(Vec3::new(1.0, 0.0, 0.0), Vec3::repeat(0.5));
        let c = AABB::from_center_extents(Vec3::new(1.5, 0.0, 0.0), Vec3::repeat(0.4));

        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_union_and_expand() {
        let a = AABB::new(Vec3::zeros(), Vec3::repeat(1.0));
        let b = AABB::new(Vec3::repeat(-1.0), Vec3::zeros());
        let u = a.union(&b);

        assert_eq!(u.min, Vec3::repeat(-1.0));
        assert_eq!(u.max, Vec3::repeat(1.0));
        assert_eq!(u.center(), Vec3::zeros());
        assert_eq!(u.expanded(1.0).extents(), Vec3::repeat(2.0));
        assert!(u.contains_point(Vec3::new(0.5, -0.5, 1.0)));
    }
}
