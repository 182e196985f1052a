//! Scene management
//!
//! Bridges the object registry and the component types into a running
//! simulation:
//!
//! ```text
//! World
//!   ├─ ObjectRegistry  (actors, components)
//!   ├─ SpatialQuery    (broad phase)
//!   ├─ NarrowPhase     (pair tests)
//!   └─ CommandQueue    (deferred destruction)
//! ```
//!
//! The World:
//! - Keeps actor component lists and the attachment tree consistent
//! - Tracks overlaps per primitive and fires begin/end/hit delegates
//! - Forwards component events to owning actors and their scripts
//! - Loads and saves components as JSON objects

mod actor;
mod commands;
mod overlap;
mod serialization;
mod world;

#[cfg(test)]
mod tests;

pub use actor::Actor;
pub use commands::{CommandQueue, WorldCommand};
pub use serialization::{component_from_json, component_to_json, new_component_for_class, SerializationError, CLASS_KEY};
pub use world::World;
