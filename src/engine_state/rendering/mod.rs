//! Rendering interface of the voxel engine.
//!
//! The core never talks to a graphics API directly. It produces a quad list per
//! chunk, flattens it into `QuadVertex` bytes, and drives a `ChunkRenderer` that
//! owns whatever GPU resources a backend needs.

use crate::engine_state::voxels::chunk::ChunkCoord;

pub mod meshing;
mod vertex;

// Re-export commonly used types
pub use vertex::QuadVertex;

/// The render backend collaborator.
///
/// Every method is keyed by chunk coordinate; a backend keeps at most one
/// mesh per chunk and replaces it on every upload.
pub trait ChunkRenderer {
    /// Replaces the mesh of a chunk with `vertex_count` vertices packed in
    /// `vertices` as `QuadVertex` records, four per quad.
    fn upload(&mut self, coord: ChunkCoord, vertices: &[u8], vertex_count: usize);

    /// Draws the last uploaded mesh of a chunk.
    fn draw(&mut self, coord: ChunkCoord);

    /// Frees everything held for a chunk. Called on unload and on world disposal.
    fn release(&mut self, coord: ChunkCoord);
}

/// A renderer that discards everything, for headless runs.
#[derive(Default, Debug, Clone, Copy)]
pub struct NullRenderer;

impl ChunkRenderer for NullRenderer {
    fn upload(&mut self, _coord: ChunkCoord, _vertices: &[u8], _vertex_count: usize) {}

    fn draw(&mut self, _coord: ChunkCoord) {}

    fn release(&mut self, _coord: ChunkCoord) {}
}
