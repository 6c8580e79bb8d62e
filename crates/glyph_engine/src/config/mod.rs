//! Configuration system
//!
//! Any serde type can be loaded from or saved to TOML or RON, chosen by
//! file extension. [`CollisionConfig`] describes how the collision handler
//! runs.

use crate::physics::RateMode;
pub use serde::{Serialize, Deserialize};
use std::path::Path;

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;

        match Format::from_path(path)? {
            Format::Toml => toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
            Format::Ron => ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = match Format::from_path(path)? {
            Format::Toml => toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?,
            Format::Ron => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?,
        };

        std::fs::write(path, contents)?;
        Ok(())
    }
}

enum Format {
    Toml,
    Ron,
}

impl Format {
    fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("ron") => Ok(Self::Ron),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Value out of range
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Update limiter settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LimiterConfig {
    /// Run every `frames_per_update` frames
    Frames {
        /// Frames between runs (>= 1)
        frames_per_update: u32,
    },
    /// Run at a fixed rate
    Rate {
        /// Runs per second or seconds per run, depending on `mode`
        rate: f32,
        /// How `rate` is read
        #[serde(default)]
        mode: RateMode,
        /// Run on the very first frame instead of waiting a full period
        #[serde(default = "default_true")]
        update_on_first_frame: bool,
    },
}

const fn default_true() -> bool {
    true
}

/// Collision handler settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    /// Whether ticks run at all
    pub enabled: bool,
    /// Optional update limiter
    pub limiter: Option<LimiterConfig>,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            limiter: None,
        }
    }
}

impl Config for CollisionConfig {}

impl CollisionConfig {
    /// Reject out-of-range limiter settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.limiter {
            Some(LimiterConfig::Frames { frames_per_update: 0 }) => {
                Err(ConfigError::Invalid("frames_per_update must be at least 1".to_string()))
            }
            Some(LimiterConfig::Rate { rate, .. }) if !rate.is_finite() || rate <= 0.0 => {
                Err(ConfigError::Invalid(format!("rate must be finite and > 0, got {rate}")))
            }
            _ => Ok(()),
        }
    }
}
