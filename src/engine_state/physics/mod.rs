//! Rigid-body physics against the voxel grid: axis-aligned boxes with swept
//! collision, and a gravity-driven box that collides with world blocks.

pub mod aabb;
pub mod falling_box;

pub use aabb::{Aabb, Axis, AxisCollisions};
pub use falling_box::FallingBox;
