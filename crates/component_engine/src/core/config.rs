//! # Unified Configuration System
//!
//! Configuration for the engine core and the collision/overlap subsystem.
//!
//! ## Configuration Categories
//!
//! - **Engine Config**: logging and debug features
//! - **Collision Config**: narrow-phase tuning and component defaults
//! - **Application Config**: the top-level file format wrapping both

use serde::{Serialize, Deserialize};

// Re-export from the config module for convenience
pub use crate::config::{Config, ConfigError};

/// # Engine Configuration
///
/// Log filter and the per-frame diagnostics switch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Log filter for the engine (`env_logger` syntax)
    pub log_level: String,
    /// Emit per-frame overlap diagnostics
    pub debug_mode: bool,
}

impl EngineConfig {
    /// `info` logging; diagnostics on in debug builds
    pub fn new() -> Self {
        Self {
            log_level: "info".to_string(),
            debug_mode: cfg!(debug_assertions),
        }
    }

    /// Replace the log filter
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Toggle per-frame diagnostics
    pub fn with_debug(mut self, enabled: bool) -> Self {
        self.debug_mode = enabled;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Collision Configuration
///
/// Tuning for the narrow phase and defaults applied to new shape components.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    /// Whether newly created shape components default to blocking collision
    /// (hit events) rather than overlap events
    pub shapes_generate_hit_events: bool,
    /// Closest-point refinement steps used by capsule-vs-box tests
    pub capsule_box_iterations: u32,
    /// Squared-length threshold below which a separating axis is skipped
    pub contact_epsilon: f32,
    /// Whether the world should emit debug lines for collision shapes
    pub debug_draw_collision: bool,
}

impl CollisionConfig {
    /// Create a new collision configuration with engine defaults
    pub fn new() -> Self {
        Self {
            shapes_generate_hit_events: true,
            capsule_box_iterations: 8,
            contact_epsilon: 1.0e-5,
            debug_draw_collision: false,
        }
    }

    /// Set the hit-event default for new shape components
    pub fn with_shapes_generate_hit_events(mut self, enabled: bool) -> Self {
        self.shapes_generate_hit_events = enabled;
        self
    }

    /// Set capsule-vs-box refinement iterations
    pub fn with_capsule_box_iterations(mut self, iterations: u32) -> Self {
        self.capsule_box_iterations = iterations;
        self
    }

    /// Enable collision debug drawing
    pub fn with_debug_draw(mut self, enabled: bool) -> Self {
        self.debug_draw_collision = enabled;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capsule_box_iterations == 0 {
            return Err(ConfigError::Invalid(
                "capsule_box_iterations must be at least 1".to_string(),
            ));
        }
        if self.contact_epsilon.is_nan() || self.contact_epsilon < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "contact_epsilon must be non-negative, got {}",
                self.contact_epsilon
            )));
        }
        Ok(())
    }
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Complete Application Configuration
///
/// Top-level configuration that encompasses all engine subsystems.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    /// Engine core configuration
    pub engine: EngineConfig,
    /// Collision subsystem configuration
    pub collision: CollisionConfig,
}

impl ApplicationConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.collision.validate()
    }
}

impl Config for ApplicationConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ApplicationConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.collision.shapes_generate_hit_events);
        assert_eq!(config.collision.capsule_box_iterations, 8);
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let config = CollisionConfig::new().with_capsule_box_iterations(0);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = ApplicationConfig::default();
        config.collision = config.collision.with_debug_draw(true);
        config.engine = config.engine.with_log_level("debug");

        let text = config.to_string_with_format("engine.toml").unwrap();
        let parsed = ApplicationConfig::from_str_with_format(&text, "engine.toml").unwrap();

        assert!(parsed.collision.debug_draw_collision);
        assert_eq!(parsed.engine.log_level, "debug");
    }

    #[test]
    fn test_ron_partial_file_uses_defaults() {
        let parsed =
            ApplicationConfig::from_str_with_format("(collision: (capsule_box_iterations: 3))", "engine.ron")
                .unwrap();
        assert_eq!(parsed.collision.capsule_box_iterations, 3);
        assert!(parsed.collision.shapes_generate_hit_events);
    }

    #[test]
    fn test_unknown_extension() {
        let result = ApplicationConfig::from_str_with_format("", "engine.yaml");
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }
}
