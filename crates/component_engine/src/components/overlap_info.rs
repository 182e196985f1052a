//! Overlap bookkeeping records

use super::PrimitiveComponent;
use crate::object::{ObjectId, WeakObjectPtr};
use crate::physics::HitResult;

/// One active overlap, stored on each side of the pair
///
/// Holds a weak handle so the record survives the other component's
/// destruction and can be ended on the next update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlapInfo {
    /// The other component
    pub overlap_component: WeakObjectPtr<PrimitiveComponent>,
    /// Hit information from the last test that saw this overlap
    pub cached_hit_result: Option<HitResult>,
}

impl OverlapInfo {
    /// Record without hit detail
    pub fn new(other: ObjectId) -> Self {
        Self {
            overlap_component: WeakObjectPtr::from_id(other),
            cached_hit_result: None,
        }
    }

    /// Record carrying the hit that produced it
    pub fn with_hit(other: ObjectId, hit: HitResult) -> Self {
        Self {
            overlap_component: WeakObjectPtr::from_id(other),
            cached_hit_result: Some(hit),
        }
    }

    /// Untyped handle of the other component
    pub fn component_id(&self) -> ObjectId {
        self.overlap_component.id()
    }
}
