//! Mesh generation for voxel chunks.
//!
//! This module converts chunk block data into quad lists. Meshing is
//! non-greedy: every exposed face of every visible block becomes one quad.
//!
//! # Architecture
//! - [`Quad`]: One world-space face with texture rectangle and shade
//! - [`ChunkMesher`]: Builds the quad list of a single chunk, looking across
//!   chunk borders through the world's chunk map
//! - [`mesh_chunks`]: Meshes a batch of dirty chunks in parallel
//!
//! # Performance Considerations
//! - Empty cells are skipped through the chunk's occupancy bit vector
//! - Meshing only borrows the chunk map immutably, so chunks mesh on the rayon
//!   pool without locks; results are written back by the caller

use cgmath::{EuclideanSpace, Point3};
use rayon::prelude::*;

use crate::engine_state::voxels::{
    block::{block_side::BlockSide, BlockCatalog, BlockId, TextureRect},
    chunk::{Chunk, ChunkCoord},
    world::ChunkMap,
};

mod quad;

pub use quad::Quad;

/// Builds quad lists for chunks of one chunk map.
pub struct ChunkMesher<'a> {
    catalog: &'a BlockCatalog,
    chunks: &'a ChunkMap,
}

impl<'a> ChunkMesher<'a> {
    pub fn new(catalog: &'a BlockCatalog, chunks: &'a ChunkMap) -> Self {
        ChunkMesher { catalog, chunks }
    }

    /// Reads a block relative to a chunk. Coordinates outside the chunk's x/z
    /// range are resolved through the chunk map; `y` out of range is void.
    fn neighbour_block(&self, chunk: &Chunk, local: Point3<i32>) -> BlockId {
        if Chunk::contains(local.x, local.y, local.z) {
            return chunk.get(local.x, local.y, local.z);
        }
        let origin = chunk.coord.block_origin();
        self.chunks
            .get_block(origin.x + local.x, local.y, origin.z + local.z)
    }

    /// Generates the quads of one chunk.
    ///
    /// # Returns
    /// One quad per visible block side whose neighbour exposes it.
    pub fn mesh(&self, chunk: &Chunk) -> Vec<Quad> {
        let mut quads = Vec::new();
        let origin = chunk.coord.block_origin();

        for (local, block) in chunk.occupied_cells() {
            let kind = self.catalog.get(block);
            if !kind.is_visible {
                continue;
            }
            for side in BlockSide::all() {
                let neighbour = self.neighbour_block(chunk, side.neighbour(local));
                if kind.has_face(self.catalog.get(neighbour)) {
                    let texture = TextureRect::from_atlas_index(kind.texture(side));
                    quads.push(Quad::new(origin + local.to_vec(), side, texture));
                }
            }
        }

        quads
    }
}

/// Meshes every listed chunk in parallel.
///
/// Coordinates that are not loaded are skipped.
///
/// # Returns
/// The new quad list of each meshed chunk.
pub fn mesh_chunks(
    catalog: &BlockCatalog,
    chunks: &ChunkMap,
    coords: &[ChunkCoord],
) -> Vec<(ChunkCoord, Vec<Quad>)> {
    let mesher = ChunkMesher::new(catalog, chunks);
    coords
        .par_iter()
        .filter_map(|coord| {
            let chunk = chunks.get(coord)?;
            Some((*coord, mesher.mesh(chunk)))
        })
        .collect()
}

/// Flattens a quad list into the vertex bytes handed to the renderer.
///
/// # Returns
/// The vertex bytes and the vertex count.
pub fn quads_to_vertex_bytes(quads: &[Quad]) -> (Vec<u8>, usize) {
    let vertices: Vec<_> = quads.iter().flat_map(Quad::vertices).collect();
    (bytemuck::cast_slice(&vertices).to_vec(), vertices.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::block::block_type::BlockType;

    fn single_chunk_map(chunk: Chunk) -> ChunkMap {
        let mut map = ChunkMap::default();
        map.insert(chunk);
        map
    }

    #[test]
    fn lone_block_has_six_faces() {
        let catalog = BlockCatalog::new();
        let mut chunk = Chunk::new(ChunkCoord::new(0, 0));
        chunk.set(5, 5, 5, BlockType::STONE.id());
        let map = single_chunk_map(chunk);
        let quads = ChunkMesher::new(&catalog, &map).mesh(map.get(&ChunkCoord::new(0, 0)).unwrap());
        assert_eq!(quads.len(), 6);
    }

    #[test]
    fn enclosed_block_has_no_faces() {
        let catalog = BlockCatalog::new();
        let mut chunk = Chunk::new(ChunkCoord::new(0, 0));
        for side in BlockSide::all() {
            let n = side.neighbour(Point3::new(5, 5, 5));
            chunk.set(n.x, n.y, n.z, BlockType::DIRT.id());
        }
        chunk.set(5, 5, 5, BlockType::STONE.id());
        let map = single_chunk_map(chunk);
        let chunk = map.get(&ChunkCoord::new(0, 0)).unwrap();
        let quads = ChunkMesher::new(&catalog, &map).mesh(chunk);

        let center = Point3::new(5, 5, 5);
        assert!(quads.iter().all(|q| !is_face_of(q, center)));
        assert_eq!(quads.len(), 6 * 5);
    }

    #[test]
    fn one_transparent_neighbour_exposes_one_face() {
        let catalog = BlockCatalog::new();
        let mut chunk = Chunk::new(ChunkCoord::new(0, 0));
        for y in 0..3 {
            for z in 0..3 {
                for x in 0..3 {
                    chunk.set(x, y, z, BlockType::STONE.id());
                }
            }
        }
        chunk.set(1, 2, 1, BlockType::WATER.id());
        let map = single_chunk_map(chunk);
        let chunk = map.get(&ChunkCoord::new(0, 0)).unwrap();
        let quads = ChunkMesher::new(&catalog, &map).mesh(chunk);

        let centre: Vec<_> = quads
            .iter()
            .filter(|q| is_face_of(q, Point3::new(1, 1, 1)))
            .collect();
        assert_eq!(centre.len(), 1);
        assert_eq!(centre[0].side, BlockSide::TOP);
    }

    #[test]
    fn y_edges_read_as_void() {
        let catalog = BlockCatalog::new();
        let mut chunk = Chunk::new(ChunkCoord::new(0, 0));
        chunk.set(0, 0, 0, BlockType::WATER.id());
        let map = single_chunk_map(chunk);
        let chunk = map.get(&ChunkCoord::new(0, 0)).unwrap();
        let quads = ChunkMesher::new(&catalog, &map).mesh(chunk);
        // Water shows faces toward void (below, and unloaded chunks) and air.
        assert_eq!(quads.len(), 6);
    }

    #[test]
    fn faces_toward_loaded_neighbour_chunk_are_culled() {
        let catalog = BlockCatalog::new();
        let mut a = Chunk::new(ChunkCoord::new(0, 0));
        let mut b = Chunk::new(ChunkCoord::new(1, 0));
        a.set(15, 4, 4, BlockType::STONE.id());
        b.set(0, 4, 4, BlockType::STONE.id());
        let mut map = ChunkMap::default();
        map.insert(a);
        map.insert(b);

        let meshed = mesh_chunks(&catalog, &map, &[ChunkCoord::new(0, 0), ChunkCoord::new(7, 7)]);
        assert_eq!(meshed.len(), 1);
        let (_, quads) = &meshed[0];
        assert_eq!(quads.len(), 5);
        assert!(quads.iter().all(|q| q.side != BlockSide::RIGHT));
    }

    #[test]
    fn vertex_bytes_hold_four_vertices_per_quad() {
        let quad = Quad::new(Point3::new(0, 0, 0), BlockSide::FRONT, TextureRect::from_atlas_index(2));
        let (bytes, count) = quads_to_vertex_bytes(&[quad, quad]);
        assert_eq!(count, 8);
        assert_eq!(bytes.len(), 8 * std::mem::size_of::<crate::engine_state::rendering::QuadVertex>());
    }

    /// Whether the quad is a face of the block at `block`: all corners lie in
    /// the unit cube spanned from it.
    fn is_face_of(quad: &Quad, block: Point3<i32>) -> bool {
        quad.corners.iter().all(|c| {
            (block.x..=block.x + 1).contains(&c.x)
                && (block.y..=block.y + 1).contains(&c.y)
                && (block.z..=block.z + 1).contains(&c.z)
        })
    }
}
