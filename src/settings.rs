//! Engine settings
//!
//! All tuning knobs in one serializable struct: timing, intensity targets,
//! post-process parameters and the theme color. Load degrades silently to
//! defaults so a corrupt settings file can never prevent startup.

use std::fs;
use std::path::{Path, PathBuf};

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Tunable engine settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Animation speed multiplier
    pub speed: f32,
    /// Intensity target while active and unfocused
    pub max_intensity: f32,
    /// Intensity target while active and focused
    pub focused_intensity: f32,
    /// Focus-in ease duration in seconds
    pub focus_in_secs: f32,
    /// Focus-out ease duration in seconds
    pub focus_out_secs: f32,
    /// Effect crossfade duration in seconds
    pub transition_secs: f32,
    /// Pixelation cell edge in pixels (0 disables)
    pub block_size: f32,
    /// Grid line darkening when pixelation is on
    pub grid_opacity: f32,
    /// Posterize band count (0 disables)
    pub posterize_levels: f32,
    /// Analogous hue offset across posterize bands
    pub hue_spread: f32,
    /// Complementary accent strength in highlight bands
    pub complement_mix: f32,
    /// Theme color, linear RGB
    pub theme: [f32; 3],
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            speed: 1.0,
            max_intensity: 1.0,
            focused_intensity: 0.08,
            focus_in_secs: 0.2,
            focus_out_secs: 0.5,
            transition_secs: 0.6,
            block_size: 0.0,
            grid_opacity: 0.6,
            posterize_levels: 5.0,
            hue_spread: 0.10,
            complement_mix: 0.0,
            theme: [0.3, 0.6, 1.0],
        }
    }
}

impl EngineSettings {
    /// Default settings location under the user config directory
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut p| {
            p.push("overlay-engine");
            p.push("settings.json");
            p
        })
    }

    /// Theme color as a vector
    pub fn theme_color(&self) -> Vec3 {
        Vec3::from_array(self.theme)
    }

    /// Load settings from the default location, or defaults if unavailable
    pub fn load() -> Self {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load settings from a path, falling back silently to defaults
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(settings) => settings,
                Err(e) => {
                    log::warn!("corrupt settings file ({}), using defaults", e);
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Save settings to the default location
    pub fn save(&self) -> Result<(), EngineError> {
        let path = Self::default_path().ok_or(EngineError::NoConfigDir)?;
        self.save_to(&path)
    }

    /// Save settings to a path, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), EngineError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| EngineError::Io(e.to_string()))?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| EngineError::Serialize(e.to_string()))?;
        fs::write(path, json).map_err(|e| EngineError::Io(e.to_string()))
    }
}
