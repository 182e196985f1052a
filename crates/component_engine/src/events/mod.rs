//! Event delegates and collision event payloads

pub mod collision_events;
pub mod delegate;

pub use collision_events::{
    ActorBeginOverlap, ActorBeginOverlapDelegate, ActorEndOverlap, ActorEndOverlapDelegate, ActorHit,
    ActorHitDelegate, CollisionEventKind, ComponentBeginOverlap, ComponentBeginOverlapDelegate,
    ComponentEndOverlap, ComponentEndOverlapDelegate, ComponentHit, ComponentHitDelegate,
};
pub use delegate::{BindingId, Delegate};
