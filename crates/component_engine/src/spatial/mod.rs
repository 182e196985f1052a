//! Spatial partitioning for the overlap broad phase

pub mod spatial_query;

pub use spatial_query::{LinearSpatialQuery, SpatialQuery};
