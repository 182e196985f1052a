//! Physics module for overlap detection
//!
//! Bounding volumes, narrow-phase pair tests and the hit/response types
//! reported to overlap handlers. No forces or contact resolution.

pub mod bounding_volume;
pub mod bounds;
pub mod hit_result;
pub mod narrow_phase;
pub mod response;

pub use bounding_volume::{BoundingSphere, BoundingVolume, Capsule, OrientedBox, ShapeKind};
pub use bounds::AABB;
pub use hit_result::{ContactDetail, HitResult};
pub use narrow_phase::{supports_contact_detail, NarrowPhase, NarrowPhaseResult};
pub use response::CollisionResponse;
