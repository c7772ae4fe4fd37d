//! # Player State
//!
//! The player ties input to the world: it turns the camera, walks and jumps its
//! physics body, keeps the eye on the body and edits the block under the
//! crosshair.
//!
//! ## Tick Order
//! 1. Hotbar selection and camera rotation
//! 2. Horizontal movement and jump, then one physics update
//! 3. Camera follows the body, the selection ray is cast from the eye
//! 4. Remove or place a block at the ray target

use cgmath::{InnerSpace, Point3, Rad, Vector3, Zero};
use log::{debug, warn};

use super::camera_state::Camera;
use super::config::{ConfigError, EngineConfig};
use super::physics::{Aabb, FallingBox};
use super::raycast::{self, RayHit};
use super::voxels::block::BlockId;
use super::voxels::world::World;
use super::PlayerAction;

/// The first-person player.
pub struct Player {
    /// The physics body; its position is the minimum corner of the player's box
    pub body: FallingBox,
    pub camera: Camera,
    hotbar: Vec<BlockId>,
    selected_slot: usize,
    selected_block: BlockId,
    target: Option<RayHit>,
    eye_height: f32,
    walk_speed: f32,
    jump_speed: f32,
    ray_distance: f32,
}

impl Player {
    /// Creates a player standing with its feet centred on `feet`.
    ///
    /// # Errors
    /// Fails if the configured hotbar names an unknown block.
    pub fn new(config: &EngineConfig, feet: Point3<f32>) -> Result<Self, ConfigError> {
        let hotbar = config.hotbar_blocks()?;
        let size = Vector3::from(config.player_size);
        let body = FallingBox::new(feet - Vector3::new(size.x / 2.0, 0.0, size.z / 2.0), size)
            .with_gravity(config.gravity);

        let mut player = Player {
            body,
            camera: Camera::new(feet, Rad(0.0), Rad(0.0)),
            selected_block: hotbar[0],
            hotbar,
            selected_slot: 0,
            target: None,
            eye_height: config.eye_height,
            walk_speed: config.walk_speed,
            jump_speed: config.jump_speed,
            ray_distance: config.ray_distance,
        };
        player.camera.position = player.eye_position();
        Ok(player)
    }

    /// The position of the eyes: horizontally centred on the body, `eye_height` above its bottom.
    pub fn eye_position(&self) -> Point3<f32> {
        let size = self.body.aabb.size;
        self.body.position() + Vector3::new(size.x / 2.0, self.eye_height, size.z / 2.0)
    }

    /// Teleports the player so its feet are centred on `feet`.
    pub fn teleport(&mut self, feet: Point3<f32>) {
        let size = self.body.aabb.size;
        self.body
            .aabb
            .force_move_to(feet - Vector3::new(size.x / 2.0, 0.0, size.z / 2.0));
        self.body.velocity = Vector3::zero();
        self.camera.position = self.eye_position();
    }

    /// The block type placed by `place_block`.
    pub fn selected_block(&self) -> BlockId {
        self.selected_block
    }

    /// Overrides the selected block, e.g. from a block picker.
    pub fn set_selected_block(&mut self, block: BlockId) {
        self.selected_block = block;
    }

    pub fn selected_slot(&self) -> usize {
        self.selected_slot
    }

    /// Selects a hotbar slot. Out-of-range slots are ignored.
    pub fn select_slot(&mut self, slot: usize) {
        if let Some(block) = self.hotbar.get(slot) {
            self.selected_slot = slot;
            self.selected_block = *block;
        }
    }

    /// The block under the crosshair as of the last tick.
    pub fn target(&self) -> Option<RayHit> {
        self.target
    }

    /// Advances the player by one frame.
    ///
    /// # Arguments
    /// * `world` - The world to collide with and edit
    /// * `action` - This frame's input
    /// * `dt` - Elapsed time in seconds
    pub fn tick(&mut self, world: &mut World, action: &PlayerAction, dt: f32) {
        if let Some(slot) = action.select_slot {
            self.select_slot(slot);
        }
        self.camera
            .rotate(Rad(action.yaw_delta), Rad(action.pitch_delta));

        let mut walk = self.camera.forward() * action.forward + self.camera.right() * action.strafe;
        if walk.magnitude2() > 1.0 {
            walk = walk.normalize();
        }
        self.body.aabb.move_by(walk * self.walk_speed * dt);

        if action.jump {
            self.body.jump(self.jump_speed);
        }
        self.body.update(world, dt);

        self.camera.position = self.eye_position();
        self.retarget(world);

        if let Some(hit) = self.target {
            if action.remove_block {
                world.set_block(hit.block.x, hit.block.y, hit.block.z, BlockId::AIR);
                debug!("Removed block at {:?}", hit.block);
                self.retarget(world);
            } else if action.place_block {
                self.place(world, hit);
            }
        }
    }

    fn retarget(&mut self, world: &World) {
        self.target = raycast::cast(
            world,
            self.camera.position,
            self.camera.get_view_vec(),
            self.ray_distance,
        );
    }

    fn place(&mut self, world: &mut World, hit: RayHit) {
        let p = hit.place_target();
        if Aabb::block(p.x, p.y, p.z).intersects(&self.body.aabb) {
            warn!("Refusing to place a block at {p:?} inside the player");
            return;
        }
        world.set_block(p.x, p.y, p.z, self.selected_block);
        debug!("Placed block {:?} at {p:?}", self.selected_block);
        self.retarget(world);
    }
}
