use std::path::PathBuf;
use std::time::Duration;

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Configuration shared by the grid, entities and camera.
/// Copied into each component at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Edge length of one grid tile in pixels (default: 16).
    pub tile_size: i32,
    /// Time between unit-pixel movement steps, in microseconds (default: 15 000).
    pub step_interval_us: u64,
    /// Time between animation frame changes, in microseconds (default: 60 000).
    pub frame_interval_us: u64,
    /// Aspect-ratio step of the viewport, in tiles (default: 4x3).
    pub base_viewport: IVec2,
    /// Smallest viewport multiplier (default: 5, i.e. 20x15 tiles).
    pub default_viewport_multiplier: i32,
    /// Directory that relative map paths are resolved against.
    pub data_root: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tile_size: 16,
            step_interval_us: 15_000,
            frame_interval_us: 60_000,
            base_viewport: IVec2::new(4, 3),
            default_viewport_multiplier: 5,
            data_root: PathBuf::from("."),
        }
    }
}

impl GameConfig {
    /// Parse a config from JSON. Missing fields fall back to defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn step_interval(&self) -> Duration {
        Duration::from_micros(self.step_interval_us)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_micros(self.frame_interval_us)
    }

    /// Viewport size in pixels for the given multiplier.
    pub fn viewport_size(&self, multiplier: i32) -> IVec2 {
        self.base_viewport * multiplier * self.tile_size
    }

    /// Viewport size in pixels at the default multiplier.
    pub fn default_viewport_size(&self) -> IVec2 {
        self.viewport_size(self.default_viewport_multiplier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_viewport_is_four_by_three() {
        let config = GameConfig::default();
        assert_eq!(config.default_viewport_size(), IVec2::new(320, 240));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = GameConfig::from_json(r#"{ "tile_size": 32 }"#).unwrap();
        assert_eq!(config.tile_size, 32);
        assert_eq!(config.step_interval(), Duration::from_millis(15));
        assert_eq!(config.default_viewport_multiplier, 5);
    }

    #[test]
    fn base_viewport_parses_as_pair() {
        let config = GameConfig::from_json(r#"{ "base_viewport": [16, 9] }"#).unwrap();
        assert_eq!(config.base_viewport, IVec2::new(16, 9));
    }
}
