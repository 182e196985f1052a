//! # Core Engine Module
//!
//! Shared abstractions used throughout the engine. Currently this is the
//! unified configuration for the engine and its collision subsystem.

pub mod config;

// Re-export commonly used config types
pub use config::{
    ApplicationConfig,
    CollisionConfig,
    EngineConfig,
    Config,
    ConfigError,
};
