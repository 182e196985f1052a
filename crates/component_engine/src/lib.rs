//! # Component Engine
//!
//! Object runtime, scene components and collision-overlap events for a
//! real-time 3D engine.
//!
//! ## Features
//!
//! - **Object Registry**: slot + serial identity with weak handles that go
//!   stale when their target is destroyed
//! - **Delegates**: multicast callbacks with object-bound bindings pruned
//!   automatically
//! - **Scene Components**: attachment tree with cached world matrices
//! - **Collision Shapes**: box, sphere and capsule volumes with lazy bounds
//! - **Overlap Events**: begin/end/hit transitions per component pair,
//!   forwarded to owning actors and scripts
//!
//! ## Quick Start
//!
//! ```rust
//! use component_engine::prelude::*;
//!
//! let mut world = World::new(CollisionConfig::default());
//! let actor = world.spawn_actor("crate");
//! let a = world.add_shape_component(Some(actor), "a", ShapeComponent::default_box());
//! let b = world.add_shape_component(None, "b", ShapeComponent::default_box());
//! world.set_relative_location(b, Vec3::new(0.5, 0.0, 0.0));
//!
//! world
//!     .primitive(a)
//!     .unwrap()
//!     .on_component_hit
//!     .add(|hit| println!("hit by {}", hit.other_component));
//!
//! world.tick(1.0 / 60.0);
//! assert!(world.primitive(a).unwrap().is_overlapping_component(b));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

// Core engine modules
pub mod core;
pub mod config;

pub mod foundation;
pub mod object;
pub mod events;
pub mod physics;
pub mod spatial;
pub mod components;
pub mod scene;
pub mod debug;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        components::{OverlapInfo, PrimitiveComponent, SceneComponent, ScriptComponent, ScriptHooks, ShapeComponent},
        core::{ApplicationConfig, CollisionConfig, Config, EngineConfig},
        debug::{DebugLineBatch, LineSink},
        events::{
            ActorBeginOverlap, ActorEndOverlap, ActorHit, ComponentBeginOverlap, ComponentEndOverlap, ComponentHit,
            Delegate,
        },
        foundation::math::{Quat, Transform, Vec3},
        object::{Object, ObjectId, ObjectRegistry, WeakObjectPtr},
        physics::{BoundingVolume, CollisionResponse, HitResult, AABB},
        scene::{Actor, CommandQueue, World},
    };
}
