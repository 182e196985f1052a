//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the engine:
//! - Math types and operations
//! - JSON persistence helpers
//! - Logging utilities

pub mod math;
pub mod json;
pub mod logging;
