//! Overlap and hit event payloads
//!
//! Payloads carry handles, never references: a handler that wants to look
//! at the other component resolves it through the registry and must expect
//! `None` if it has been destroyed since.

use super::delegate::Delegate;
use crate::foundation::math::Vec3;
use crate::object::ObjectId;
use crate::physics::HitResult;

/// A component started overlapping another component
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComponentBeginOverlap {
    /// Component receiving the event
    pub overlapped_component: ObjectId,
    /// Owner of the other component
    pub other_actor: Option<ObjectId>,
    /// The other component
    pub other_component: ObjectId,
    /// True if the overlap was produced by a sweep
    pub from_sweep: bool,
    /// Hit information captured with the overlap
    pub sweep_result: HitResult,
}

/// A component stopped overlapping another component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComponentEndOverlap {
    /// Component receiving the event
    pub overlapped_component: ObjectId,
    /// Owner of the other component, if it still exists
    pub other_actor: Option<ObjectId>,
    /// The other component; may already be destroyed
    pub other_component: ObjectId,
}

/// A blocking collision between two components
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComponentHit {
    /// Component receiving the event
    pub hit_component: ObjectId,
    /// Owner of the other component
    pub other_actor: Option<ObjectId>,
    /// The other component
    pub other_component: ObjectId,
    /// Reported impulse; not physically integrated
    pub normal_impulse: Vec3,
    /// Hit details, contact normal pointing toward `hit_component`
    pub hit: HitResult,
}

/// Actor-level begin overlap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActorBeginOverlap {
    /// Actor receiving the event
    pub overlapped_actor: ObjectId,
    /// Owner of the other component, if any
    pub other_actor: Option<ObjectId>,
    /// The component on the receiving actor
    pub overlapped_component: ObjectId,
    /// The other component
    pub other_component: ObjectId,
}

/// Actor-level end overlap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActorEndOverlap {
    /// Actor receiving the event
    pub overlapped_actor: ObjectId,
    /// Owner of the other component, if any
    pub other_actor: Option<ObjectId>,
    /// The component on the receiving actor
    pub overlapped_component: ObjectId,
    /// The other component
    pub other_component: ObjectId,
}

/// Actor-level hit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActorHit {
    /// Actor receiving the event
    pub self_actor: ObjectId,
    /// Owner of the other component, if any
    pub other_actor: Option<ObjectId>,
    /// The component on the receiving actor
    pub hit_component: ObjectId,
    /// The other component
    pub other_component: ObjectId,
    /// Reported impulse; not physically integrated
    pub normal_impulse: Vec3,
    /// Hit details
    pub hit: HitResult,
}

/// Begin-overlap delegate on a primitive component
pub type ComponentBeginOverlapDelegate = Delegate<ComponentBeginOverlap>;
/// End-overlap delegate on a primitive component
pub type ComponentEndOverlapDelegate = Delegate<ComponentEndOverlap>;
/// Hit delegate on a primitive component
pub type ComponentHitDelegate = Delegate<ComponentHit>;
/// Begin-overlap delegate on an actor
pub type ActorBeginOverlapDelegate = Delegate<ActorBeginOverlap>;
/// End-overlap delegate on an actor
pub type ActorEndOverlapDelegate = Delegate<ActorEndOverlap>;
/// Hit delegate on an actor
pub type ActorHitDelegate = Delegate<ActorHit>;

/// Which of the three collision delegates a binding lives on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollisionEventKind {
    /// Begin overlap
    BeginOverlap,
    /// End overlap
    EndOverlap,
    /// Hit
    Hit,
}
