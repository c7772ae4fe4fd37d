#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel World
//!
//! The spatial and physical core of a first-person voxel world: an unbounded
//! chunked block grid streamed around the viewer, incremental parallel chunk
//! meshing, swept box collision against the grid, and block selection and
//! editing through a view ray.
//!
//! ## Key Modules
//!
//! * `engine_state` - The world store, meshing, physics, ray casting, player
//!   and the frame driver tying them together
//!
//! ## Architecture
//!
//! The crate draws nothing and opens no window. Rendering is a collaborator
//! behind the `ChunkRenderer` trait, terrain is a collaborator behind
//! `TerrainGenerator`, and input arrives as a plain `PlayerAction` per frame.
//!
//! ## Usage
//!
//! ```rust
//! use voxel_world::engine_state::{EngineState, PlayerAction};
//! use voxel_world::engine_state::config::EngineConfig;
//! use voxel_world::engine_state::rendering::NullRenderer;
//! use voxel_world::engine_state::voxels::generation::PerlinGenerator;
//!
//! let config = EngineConfig { load_distance: 1, unload_distance: 2, ..Default::default() };
//! let generator = Box::new(PerlinGenerator::new(config.seed));
//! let mut engine = EngineState::new(config, generator, Box::new(NullRenderer)).unwrap();
//! engine.tick(&PlayerAction::default(), web_time::Duration::from_millis(16));
//! ```
//!
//! ## Performance Considerations
//!
//! * Sparse chunk storage keeps memory proportional to the loaded area
//! * Only dirty chunks are re-meshed, in parallel on the rayon pool
//! * Chunks stream with a hysteresis band so border walks do not thrash

use log::info;

pub mod engine_state;

pub use engine_state::{EngineState, PlayerAction};

/// Initializes the `env_logger` backend, writing to stdout and filtered by `RUST_LOG`.
pub fn init_logger() {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized");
}
