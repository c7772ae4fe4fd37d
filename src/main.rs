//! # Voxel World Headless Demo
//!
//! Runs the world core without a window: the player walks forward through
//! Perlin terrain for a few seconds, jumping now and then and digging out the
//! block in front of it, while chunks stream in around it.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release -- [config.json]
//! ```

use std::process::ExitCode;

use log::{error, info};
use voxel_world::engine_state::config::EngineConfig;
use voxel_world::engine_state::rendering::NullRenderer;
use voxel_world::engine_state::voxels::generation::PerlinGenerator;
use voxel_world::{init_logger, EngineState, PlayerAction};
use web_time::{Duration, Instant};

const FRAME_TIME: Duration = Duration::from_millis(16);
const FRAMES: u32 = 600;

fn main() -> ExitCode {
    init_logger();

    let config = match std::env::args().nth(1) {
        Some(path) => match EngineConfig::from_path(&path) {
            Ok(config) => config,
            Err(err) => {
                error!("Could not load {path}: {err}");
                return ExitCode::FAILURE;
            }
        },
        None => EngineConfig::default(),
    };

    let generator = Box::new(PerlinGenerator::new(config.seed));
    let mut engine = match EngineState::new(config, generator, Box::new(NullRenderer)) {
        Ok(engine) => engine,
        Err(err) => {
            error!("Invalid configuration: {err}");
            return ExitCode::FAILURE;
        }
    };

    let started = Instant::now();
    for frame in 0..FRAMES {
        let action = PlayerAction {
            forward: 1.0,
            jump: frame % 90 == 0,
            yaw_delta: 0.002,
            remove_block: frame % 30 == 0,
            ..Default::default()
        };
        engine.tick(&action, FRAME_TIME);
        engine.render();
    }

    info!(
        "Simulated {FRAMES} frames in {:?}; player at {:?}, {} chunks resident",
        started.elapsed(),
        engine.player.eye_position(),
        engine.world.chunks().len()
    );
    ExitCode::SUCCESS
}
