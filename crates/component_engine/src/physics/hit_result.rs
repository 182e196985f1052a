//! Hit reporting

use crate::foundation::math::Vec3;
use crate::object::ObjectId;

/// Contact geometry for a blocking pair
///
/// Only produced for shape pairs that support it (see
/// [`supports_contact_detail`](super::narrow_phase::supports_contact_detail)).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactDetail {
    /// Unit normal pointing from the other shape toward the receiving shape
    pub normal: Vec3,
    /// Overlap depth along `normal`
    pub penetration_depth: f32,
    /// Approximate contact point in world space
    pub point: Vec3,
}

impl ContactDetail {
    /// The same contact seen from the other shape
    pub fn mirrored(&self) -> Self {
        Self {
            normal: -self.normal,
            ..*self
        }
    }
}

/// Result of a narrow-phase test as reported to event handlers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitResult {
    /// Component that was hit / overlapped
    pub component: Option<ObjectId>,
    /// Owner actor of `component`
    pub actor: Option<ObjectId>,
    /// True for blocking collisions
    pub blocking_hit: bool,
    /// World location of the other component when the hit was recorded
    pub location: Vec3,
    /// Contact geometry, absent for shape pairs without detail support
    pub contact: Option<ContactDetail>,
}

impl Default for HitResult {
    fn default() -> Self {
        Self {
            component: None,
            actor: None,
            blocking_hit: false,
            location: Vec3::zeros(),
            contact: None,
        }
    }
}

impl HitResult {
    /// Contact normal, or zero if no detail was computed
    pub fn impact_normal(&self) -> Vec3 {
        self.contact.map_or_else(Vec3::zeros, |contact| contact.normal)
    }

    /// Penetration depth, or zero if no detail was computed
    pub fn penetration_depth(&self) -> f32 {
        self.contact.map_or(0.0, |contact| contact.penetration_depth)
    }

    /// The same hit as seen from the other side
    pub fn mirrored(&self, component: Option<ObjectId>, actor: Option<ObjectId>, location: Vec3) -> Self {
        Self {
            component,
            actor,
            blocking_hit: self.blocking_hit,
            location,
            contact: self.contact.map(|contact| contact.mirrored()),
        }
    }
}
