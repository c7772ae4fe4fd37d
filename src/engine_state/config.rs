//! # Engine Configuration
//!
//! Tunables of the world core, loadable from JSON. Every field has a default,
//! so a config file only needs to name what it changes:
//!
//! ```json
//! { "load_distance": 4, "unload_distance": 6, "hotbar": ["stone", "log"] }
//! ```

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use super::voxels::block::block_type::BlockType;
use super::voxels::block::BlockId;
use super::voxels::world::{LOAD_DISTANCE, UNLOAD_DISTANCE};
use super::physics::falling_box::GRAVITY;

/// Errors raised while loading an `EngineConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unload distance ({unload}) must be greater than load distance ({load})")]
    StreamingDistances { load: i32, unload: i32 },

    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    #[error("unknown block `{0}` in hotbar")]
    UnknownBlock(String),

    #[error("hotbar must name at least one block")]
    EmptyHotbar,
}

/// Tunables of the world core.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Chunks kept loaded in every direction around the viewer
    pub load_distance: i32,
    /// Chunks farther than this on either axis are unloaded
    pub unload_distance: i32,
    /// Downward velocity change per physics update
    pub gravity: f32,
    /// Reach of the block selection ray, in blocks
    pub ray_distance: f32,
    /// Horizontal walking speed, blocks per second
    pub walk_speed: f32,
    /// Upward velocity applied by a jump
    pub jump_speed: f32,
    /// Terrain seed
    pub seed: u32,
    /// Block names selectable by the hotbar slots, in slot order
    pub hotbar: Vec<String>,
    /// Size of the player's collision box
    pub player_size: [f32; 3],
    /// Height of the eyes above the bottom of the player's box
    pub eye_height: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            load_distance: LOAD_DISTANCE,
            unload_distance: UNLOAD_DISTANCE,
            gravity: GRAVITY,
            ray_distance: 8.0,
            walk_speed: 4.3,
            jump_speed: 8.0,
            seed: 0,
            hotbar: ["stone", "dirt", "grass", "log", "leaves", "water"]
                .into_iter()
                .map(String::from)
                .collect(),
            player_size: [0.6, 1.8, 0.6],
            eye_height: 1.6,
        }
    }
}

impl EngineConfig {
    /// Parses and validates a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Checks the invariants the engine relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.load_distance < 0 || self.unload_distance <= self.load_distance {
            return Err(ConfigError::StreamingDistances {
                load: self.load_distance,
                unload: self.unload_distance,
            });
        }
        for (field, value) in [
            ("ray_distance", self.ray_distance),
            ("walk_speed", self.walk_speed),
            ("eye_height", self.eye_height),
            ("player_size.x", self.player_size[0]),
            ("player_size.y", self.player_size[1]),
            ("player_size.z", self.player_size[2]),
        ] {
            if value.is_nan() || value <= 0.0 {
                return Err(ConfigError::NotPositive { field, value });
            }
        }
        self.hotbar_blocks().map(|_| ())
    }

    /// Resolves the hotbar names to default catalog blocks.
    pub fn hotbar_blocks(&self) -> Result<Vec<BlockId>, ConfigError> {
        if self.hotbar.is_empty() {
            return Err(ConfigError::EmptyHotbar);
        }
        self.hotbar
            .iter()
            .map(|name| {
                BlockType::from_name(name)
                    .map(BlockType::id)
                    .ok_or_else(|| ConfigError::UnknownBlock(name.clone()))
            })
            .collect()
    }
}
