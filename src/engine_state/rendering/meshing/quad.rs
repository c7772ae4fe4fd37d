use cgmath::Point3;

use crate::engine_state::rendering::QuadVertex;
use crate::engine_state::voxels::block::block_side::BlockSide;
use crate::engine_state::voxels::block::TextureRect;

/// A single textured, shaded face of a block in world space.
///
/// Corners are stored in the fixed winding used for every face of that side,
/// so the quad can be split into triangles `(0, 1, 2)` and `(0, 2, 3)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    /// The four corners in world block coordinates
    pub corners: [Point3<i32>; 4],
    /// Atlas rectangle of the face texture
    pub texture: TextureRect,
    /// Flat brightness multiplier
    pub shade: f32,
    /// Which side of the block this quad represents
    pub side: BlockSide,
}

impl Quad {
    /// Creates the quad of one side of the block whose minimum corner is at `origin`.
    ///
    /// # Arguments
    /// * `origin` - World coordinates of the block
    /// * `side` - Which side of the block the quad covers
    /// * `texture` - The atlas rectangle to map onto the quad
    pub fn new(origin: Point3<i32>, side: BlockSide, texture: TextureRect) -> Self {
        let Point3 { x, y, z } = origin;
        let corners = match side {
            BlockSide::BOTTOM => [
                Point3::new(x, y, z + 1),
                Point3::new(x, y, z),
                Point3::new(x + 1, y, z),
                Point3::new(x + 1, y, z + 1),
            ],
            BlockSide::TOP => [
                Point3::new(x + 1, y + 1, z + 1),
                Point3::new(x + 1, y + 1, z),
                Point3::new(x, y + 1, z),
                Point3::new(x, y + 1, z + 1),
            ],
            BlockSide::LEFT => [
                Point3::new(x, y, z + 1),
                Point3::new(x, y + 1, z + 1),
                Point3::new(x, y + 1, z),
                Point3::new(x, y, z),
            ],
            BlockSide::RIGHT => [
                Point3::new(x + 1, y, z),
                Point3::new(x + 1, y + 1, z),
                Point3::new(x + 1, y + 1, z + 1),
                Point3::new(x + 1, y, z + 1),
            ],
            BlockSide::BACK => [
                Point3::new(x, y, z),
                Point3::new(x, y + 1, z),
                Point3::new(x + 1, y + 1, z),
                Point3::new(x + 1, y, z),
            ],
            BlockSide::FRONT => [
                Point3::new(x + 1, y, z + 1),
                Point3::new(x + 1, y + 1, z + 1),
                Point3::new(x, y + 1, z + 1),
                Point3::new(x, y, z + 1),
            ],
        };

        Quad {
            corners,
            texture,
            shade: side.shade(),
            side,
        }
    }

    /// Expands the quad into its four vertices, in corner order.
    pub fn vertices(&self) -> [QuadVertex; 4] {
        let TextureRect {
            u_min,
            v_min,
            u_max,
            v_max,
        } = self.texture;
        let uvs = [(u_min, v_max), (u_min, v_min), (u_max, v_min), (u_max, v_max)];
        std::array::from_fn(|i| {
            let (u, v) = uvs[i];
            QuadVertex::new(self.corners[i], u, v, self.shade)
        })
    }
}
