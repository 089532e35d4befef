//! Tunable game settings.
//!
//! Read once at startup from a JSON file in the user's config directory.
//! Every field is optional in the file; missing fields keep their defaults.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::{error::ConfigError, hex::BUBBLE_DIAMETER};

/// Settings that shape a session. Grid geometry is fixed and not listed here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Pixels a projectile travels per tick.
    pub projectile_speed: f32,
    /// Largest aim angle either side of vertical, in radians.
    pub max_aim_angle: f32,
    /// Total length of the aim preview ray, in pixels.
    pub preview_length: f32,
    /// The game is lost once a bubble centre sits below this y.
    pub danger_line_y: f32,
    /// Score the presentation layer shows as the goal.
    pub target_score: u32,
    /// Fixed RNG seed for reproducible sessions.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            projectile_speed: 8.0,
            max_aim_angle: std::f32::consts::PI * 0.45,
            preview_length: 300.0,
            danger_line_y: 500.0,
            target_score: 1000,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Parse a config from JSON text and validate it.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the values the simulation relies on.
    ///
    /// A shot must always climb, so the aim stays strictly inside a quarter
    /// turn of vertical. A single step must be shorter than a bubble, or a
    /// projectile could skip past a bubble or jump over the top row.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.max_aim_angle > 0.0 && self.max_aim_angle < std::f32::consts::FRAC_PI_2) {
            return Err(ConfigError::Invalid {
                field: "max_aim_angle",
                reason: "must be between 0 and pi/2, exclusive",
            });
        }
        if !(self.projectile_speed > 0.0 && self.projectile_speed < BUBBLE_DIAMETER) {
            return Err(ConfigError::Invalid {
                field: "projectile_speed",
                reason: "must be positive and shorter than a bubble diameter",
            });
        }
        if !self.preview_length.is_finite() {
            return Err(ConfigError::Invalid {
                field: "preview_length",
                reason: "must be finite",
            });
        }
        if !self.danger_line_y.is_finite() {
            return Err(ConfigError::Invalid {
                field: "danger_line_y",
                reason: "must be finite",
            });
        }
        Ok(())
    }

    /// Read and parse a config file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Get the file path for the config file.
    fn file_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("bubble-burst").join("config.json"))
    }

    /// Load the user's config, falling back to defaults.
    pub fn load() -> Self {
        let Some(path) = Self::file_path() else {
            warn!("Could not determine config directory, using default settings");
            return Self::default();
        };

        if !path.exists() {
            info!("No config file found at {:?}, using defaults", path);
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => {
                info!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                warn!("Ignoring config at {:?}: {}", path, e);
                Self::default()
            }
        }
    }
}
