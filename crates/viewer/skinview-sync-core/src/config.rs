//! Core configuration for skinview-sync.

use serde::{Deserialize, Serialize};

/// Defaults applied when a snapshot leaves a value unspecified, plus teardown policy.
/// Keep this minimal; expand as needed without breaking API.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Playback speed multiplier used when props carry no `animation_speed`.
    pub default_animation_speed: f64,
    /// Release the rendering context when a mounted component is dropped without `unmount`.
    pub dispose_on_drop: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_animation_speed: 0.5,
            dispose_on_drop: true,
        }
    }
}

impl Config {
    /// Parse a JSON config; missing fields take their defaults.
    pub fn from_json_str(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}
