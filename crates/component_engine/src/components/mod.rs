//! Actor components
//!
//! Scene components form the transform tree, primitive components add
//! collision on top, and shape parameters select box, sphere or capsule.

pub mod overlap_info;
pub mod primitive_component;
pub mod scene_component;
pub mod script_component;
pub mod shape_component;

pub use overlap_info::OverlapInfo;
pub use primitive_component::{PrimitiveComponent, VolumeSource};
pub use scene_component::SceneComponent;
pub use script_component::{ScriptComponent, ScriptHooks, ScriptSubscription};
pub use shape_component::ShapeComponent;
