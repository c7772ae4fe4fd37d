use cgmath::{Point3, Vector3, Zero};

use crate::engine_state::voxels::world::World;

use super::aabb::Aabb;

/// Default downward velocity change per update.
pub const GRAVITY: f32 = 0.4;

/// A box under gravity that collides with the colliding blocks of a world.
#[derive(Clone, Debug)]
pub struct FallingBox {
    pub aabb: Aabb,
    pub velocity: Vector3<f32>,
    /// Velocity subtracted from `velocity.y` on every update, independent of `dt`.
    pub gravity: f32,
    grounded: bool,
}

impl FallingBox {
    pub fn new(position: Point3<f32>, size: Vector3<f32>) -> Self {
        FallingBox {
            aabb: Aabb::new(position, size),
            velocity: Vector3::zero(),
            gravity: GRAVITY,
            grounded: false,
        }
    }

    pub fn with_gravity(mut self, gravity: f32) -> Self {
        self.gravity = gravity;
        self
    }

    /// Whether the last update ended with the box resting on something.
    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    pub fn position(&self) -> Point3<f32> {
        self.aabb.position()
    }

    /// Launches the box upward if it is standing on the ground.
    ///
    /// # Returns
    /// Whether the jump happened.
    pub fn jump(&mut self, speed: f32) -> bool {
        if !self.grounded {
            return false;
        }
        self.velocity.y = speed;
        self.grounded = false;
        true
    }

    /// Advances the box by one tick.
    ///
    /// Any `move_by` issued on `aabb` since the last update is resolved
    /// together with the velocity step. Each axis that collides has its
    /// velocity component zeroed; a collision while falling grounds the box.
    ///
    /// # Arguments
    /// * `world` - Source of the static block colliders
    /// * `dt` - Elapsed time in seconds
    pub fn update(&mut self, world: &World, dt: f32) {
        self.velocity.y -= self.gravity;
        self.aabb.move_by(self.velocity * dt);
        self.grounded = false;

        let colliders = Self::block_colliders(world, &self.aabb);
        let collisions = self.aabb.resolve(&colliders);

        if collisions.x {
            self.velocity.x = 0.0;
        }
        if collisions.y {
            self.grounded = self.velocity.y < 0.0;
            self.velocity.y = 0.0;
        }
        if collisions.z {
            self.velocity.z = 0.0;
        }
    }

    /// One unit box per colliding block in the cells the box sweeps this tick,
    /// from its last resolved position to its pending one.
    fn block_colliders(world: &World, aabb: &Aabb) -> Vec<Aabb> {
        let last = aabb.last_position();
        let start = Point3::new(
            last.x.min(aabb.position().x),
            last.y.min(aabb.position().y),
            last.z.min(aabb.position().z),
        );
        let end = Point3::new(
            (last.x + aabb.size.x).max(aabb.max().x),
            (last.y + aabb.size.y).max(aabb.max().y),
            (last.z + aabb.size.z).max(aabb.max().z),
        );
        let (x0, y0, z0) = (start.x.floor() as i32, start.y.floor() as i32, start.z.floor() as i32);
        let (x1, y1, z1) = (end.x.floor() as i32, end.y.floor() as i32, end.z.floor() as i32);

        let catalog = world.catalog();
        let mut colliders = Vec::new();
        for x in x0..=x1 {
            for y in y0..=y1 {
                for z in z0..=z1 {
                    if catalog.get(world.get_block(x, y, z)).has_collider {
                        colliders.push(Aabb::block(x, y, z));
                    }
                }
            }
        }
        colliders
    }
}
