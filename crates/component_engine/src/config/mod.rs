//! Configuration file loading
//!
//! Any serde type with a `Default` can be read from or written to `.toml`
//! and `.ron` files; the extension picks the format.

pub use serde::{Deserialize, Serialize};

/// A configuration struct that can round-trip through a file
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Read and parse `path`
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_str_with_format(&text, path)
    }

    /// Parse `text` in the format named by `path`'s extension
    ///
    /// Missing fields take their defaults when the type uses
    /// `#[serde(default)]`.
    fn from_str_with_format(text: &str, path: &str) -> Result<Self, ConfigError> {
        match Format::of(path)? {
            Format::Toml => toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string())),
            Format::Ron => ron::from_str(text).map_err(|e| ConfigError::Parse(e.to_string())),
        }
    }

    /// Render in the format named by `path`'s extension
    fn to_string_with_format(&self, path: &str) -> Result<String, ConfigError> {
        match Format::of(path)? {
            Format::Toml => toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string())),
            Format::Ron => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string())),
        }
    }

    /// Render and write to `path`
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let text = self.to_string_with_format(path)?;
        std::fs::write(path, text)?;
        Ok(())
    }
}

enum Format {
    Toml,
    Ron,
}

impl Format {
    fn of(path: &str) -> Result<Self, ConfigError> {
        if path.ends_with(".toml") {
            Ok(Self::Toml)
        } else if path.ends_with(".ron") {
            Ok(Self::Ron)
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }
}

/// Errors from loading, saving or validating configuration
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// Reading or writing the file failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The text is not valid for the chosen format
    #[error("Parse error: {0}")]
    Parse(String),

    /// The value could not be rendered
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Neither `.toml` nor `.ron`
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A value is outside its allowed range
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
