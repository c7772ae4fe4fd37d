//! # Ray Casting
//!
//! Finds the block the player is looking at by walking the voxel grid along a
//! ray (Amanatides & Woo DDA). Each step moves into the neighbouring cell whose
//! boundary the ray crosses first, so every cell the ray touches is visited
//! exactly once, in order.

use cgmath::{InnerSpace, Point3, Vector3};

use crate::engine_state::voxels::block::block_side::BlockSide;
use crate::engine_state::voxels::world::World;

/// The result of a successful ray cast.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RayHit {
    /// World coordinates of the block that was hit. Removing a block removes this one.
    pub block: Point3<i32>,
    /// The face of `block` the ray entered through.
    pub side: BlockSide,
}

impl RayHit {
    /// Where a new block goes when placing against the hit face.
    pub fn place_target(&self) -> Point3<i32> {
        self.side.neighbour(self.block)
    }
}

/// Casts a ray through `world` and returns the first selectable block.
///
/// # Arguments
/// * `world` - The world to query
/// * `origin` - Ray start in world space
/// * `direction` - Ray direction; need not be normalized
/// * `max_distance` - Maximum travel distance in blocks
///
/// # Returns
/// The first visible block that is neither air nor void within range, or
/// `None`. A zero direction never hits.
pub fn cast(
    world: &World,
    origin: Point3<f32>,
    direction: Vector3<f32>,
    max_distance: f32,
) -> Option<RayHit> {
    if !direction.magnitude2().is_normal() {
        return None;
    }
    let dir = direction.normalize();
    let catalog = world.catalog();

    let mut cell = Point3::new(
        origin.x.floor() as i32,
        origin.y.floor() as i32,
        origin.z.floor() as i32,
    );

    if catalog.is_selectable(world.get_block(cell.x, cell.y, cell.z)) {
        return Some(RayHit {
            block: cell,
            side: entry_side(dominant_axis(dir), dir),
        });
    }

    let mut step = [0i32; 3];
    let mut t_delta = [f32::INFINITY; 3];
    let mut t_max = [f32::INFINITY; 3];
    for axis in 0..3 {
        let d = dir[axis];
        if d == 0.0 {
            continue;
        }
        let o = origin[axis];
        let base = cell[axis] as f32;
        step[axis] = if d > 0.0 { 1 } else { -1 };
        t_delta[axis] = 1.0 / d.abs();
        t_max[axis] = if d > 0.0 {
            (base + 1.0 - o) * t_delta[axis]
        } else {
            (o - base) * t_delta[axis]
        };
    }

    loop {
        let axis = if t_max[0] < t_max[1] {
            if t_max[0] < t_max[2] { 0 } else { 2 }
        } else if t_max[1] < t_max[2] {
            1
        } else {
            2
        };

        let travelled = t_max[axis];
        if travelled > max_distance {
            return None;
        }
        cell[axis] += step[axis];
        t_max[axis] += t_delta[axis];

        if catalog.is_selectable(world.get_block(cell.x, cell.y, cell.z)) {
            return Some(RayHit {
                block: cell,
                side: entry_side(axis, dir),
            });
        }
    }
}

fn dominant_axis(dir: Vector3<f32>) -> usize {
    let abs = [dir.x.abs(), dir.y.abs(), dir.z.abs()];
    if abs[0] >= abs[1] && abs[0] >= abs[2] {
        0
    } else if abs[1] >= abs[2] {
        1
    } else {
        2
    }
}

/// The face a ray travelling along `dir` crosses when it steps along `axis`.
fn entry_side(axis: usize, dir: Vector3<f32>) -> BlockSide {
    let positive = dir[axis] > 0.0;
    match (axis, positive) {
        (0, true) => BlockSide::LEFT,
        (0, false) => BlockSide::RIGHT,
        (1, true) => BlockSide::BOTTOM,
        (1, false) => BlockSide::TOP,
        (_, true) => BlockSide::BACK,
        (_, false) => BlockSide::FRONT,
    }
}
