//! # Engine State Module
//!
//! The core engine module that manages the state of the voxel world.
//!
//! ## Key Components
//!
//! * `EngineState` - The frame driver tying the player to the world
//! * `camera_state` - Handles camera orientation and matrices
//! * `config` - Engine tunables and their loading
//! * `physics` - Box collision against the block grid
//! * `player_state` - Turns per-frame input into movement and block edits
//! * `raycast` - Finds the block under the crosshair
//! * `rendering` - Mesh generation and the render backend interface
//! * `voxels` - Blocks, chunks, terrain generation and the world store
//!
//! ## Architecture
//!
//! Each subsystem owns one concern; `EngineState` owns the world and the
//! player and runs them in a fixed order every frame:
//!
//! 1. `Player::tick`: input, physics, block edits
//! 2. `World::update_streaming`: chunk streaming around the eye, then the
//!    parallel mesh phase and uploads
//!
//! Block edits therefore always land before the mesh phase of the same frame,
//! and the mesh phase never observes a half-applied edit.

use std::sync::Arc;

use cgmath::Point3;
use log::info;
use web_time::Duration;

use camera_state::Projection;
use config::{ConfigError, EngineConfig};
use player_state::Player;
use rendering::ChunkRenderer;
use voxels::block::BlockCatalog;
use voxels::generation::TerrainGenerator;
use voxels::world::World;

pub mod camera_state;
pub mod config;
pub mod physics;
pub mod player_state;
pub mod raycast;
pub mod rendering;
pub mod voxels;

/// Height above the ground at which the player spawns.
const SPAWN_CLEARANCE: f32 = 1.0;

/// The main state container for the voxel world.
///
/// # Examples
///
/// ```
/// use voxel_world::engine_state::{EngineState, PlayerAction};
/// use voxel_world::engine_state::config::EngineConfig;
/// use voxel_world::engine_state::rendering::NullRenderer;
/// use voxel_world::engine_state::voxels::generation::FlatGenerator;
///
/// let config = EngineConfig { load_distance: 1, unload_distance: 2, ..Default::default() };
/// let mut engine = EngineState::new(config, Box::new(FlatGenerator::new(8)), Box::new(NullRenderer)).unwrap();
///
/// engine.tick(&PlayerAction::default(), web_time::Duration::from_millis(16));
/// engine.render();
/// ```
pub struct EngineState {
    /// The voxel world containing all chunk data
    pub world: World,
    /// The player, its body and camera
    pub player: Player,
    config: EngineConfig,
}

impl EngineState {
    /// Creates the engine: builds the catalog and world, generates the spawn
    /// area and places the player on the ground of the spawn column.
    ///
    /// # Errors
    /// Fails if the configuration does not validate.
    pub fn new(
        config: EngineConfig,
        generator: Box<dyn TerrainGenerator>,
        renderer: Box<dyn ChunkRenderer>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let catalog = Arc::new(BlockCatalog::new());
        let mut world = World::new(catalog, generator, renderer)
            .with_streaming_distances(config.load_distance, config.unload_distance);
        world.generate_spawn_area();

        let ground = world.get_ground_level(0, 0);
        let feet = Point3::new(0.5, (ground + 1) as f32 + SPAWN_CLEARANCE, 0.5);
        let player = Player::new(&config, feet)?;

        info!(
            "Engine initialized: {} chunks loaded, player spawned at {:?}",
            world.chunks().len(),
            feet
        );

        Ok(Self {
            world,
            player,
            config,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Runs one frame of simulation.
    ///
    /// # Arguments
    /// * `action` - This frame's player input
    /// * `dt` - Time elapsed since the last frame
    pub fn tick(&mut self, action: &PlayerAction, dt: Duration) {
        self.player.tick(&mut self.world, action, dt.as_secs_f32());
        self.world.update_streaming(self.player.eye_position());
    }

    /// Draws every uploaded chunk, farthest first.
    pub fn render(&mut self) {
        self.world.draw();
    }

    /// The combined view-projection matrix of the player camera, for render backends.
    pub fn view_projection(&self, projection: &Projection) -> cgmath::Matrix4<f32> {
        projection.calc_matrix() * self.player.camera.calc_matrix()
    }
}

/// Represents player actions derived from input for a single frame
///
/// The window layer fills this in from whatever devices it reads; the engine
/// only sees the resulting scalars.
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct PlayerAction {
    /// Forward/backward walk axis, -1.0 to 1.0
    pub forward: f32,
    /// Right/left strafe axis, -1.0 to 1.0
    pub strafe: f32,
    /// Jump if standing on the ground
    pub jump: bool,
    /// Camera yaw change in radians
    pub yaw_delta: f32,
    /// Camera pitch change in radians
    pub pitch_delta: f32,

    /// Actions that should only trigger on press, not hold
    pub remove_block: bool,
    pub place_block: bool,
    pub select_slot: Option<usize>,
}
