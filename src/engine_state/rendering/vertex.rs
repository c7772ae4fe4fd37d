//! Vertex data structures for chunk mesh uploads.
//!
//! This module defines the flat vertex format chunk meshes are converted to
//! before they are handed to a `ChunkRenderer` as raw bytes.

use cgmath::Point3;

/// A vertex of a chunk mesh quad.
///
/// # Memory Layout
/// - Position: 3x f32 (12 bytes)
/// - Texture Coordinates: [f32; 2] (8 bytes)
/// - Shade: f32 (4 bytes)
///
/// Total size: 24 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct QuadVertex {
    /// Position in world space
    pub position: [f32; 3],
    /// UV coordinates into the block texture atlas (normalized 0.0-1.0)
    pub tex_coords: [f32; 2],
    /// Flat brightness multiplier of the face
    pub shade: f32,
}

impl QuadVertex {
    /// Creates a new vertex.
    ///
    /// # Arguments
    /// * `pos` - The position of the vertex in world block coordinates
    /// * `u`, `v` - Atlas texture coordinates
    /// * `shade` - Brightness multiplier of the face the vertex belongs to
    pub fn new(pos: Point3<i32>, u: f32, v: f32, shade: f32) -> Self {
        QuadVertex {
            position: [pos.x as f32, pos.y as f32, pos.z as f32],
            tex_coords: [u, v],
            shade,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<QuadVertex>(), 24);
        let vertex = QuadVertex::new(Point3::new(-3, 4, 5), 0.25, 0.5, 0.8);
        let bytes = bytemuck::bytes_of(&vertex);
        assert_eq!(bytes.len(), 24);
        assert_eq!(&bytes[0..4], &(-3.0f32).to_ne_bytes());
    }
}
