//! Debug visualization

pub mod draw;

pub use draw::{draw_bounding_volume, DebugLine, DebugLineBatch, LineSink};
