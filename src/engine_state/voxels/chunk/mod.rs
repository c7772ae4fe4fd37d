//! # Chunk Module
//!
//! This module provides the `Chunk` struct and the coordinate helpers used to map
//! world block coordinates onto chunks. A chunk is a 16x128x16 column of blocks
//! and the unit of loading, meshing and uploading.
//!
//! ## Storage
//!
//! - `blocks`: one `BlockId` per cell, stored in row-major order (x, then z, then y)
//! - `occupied`: a bit vector (1 bit per cell) marking cells that are neither air
//!   nor void, so the mesher can skip empty space without touching the block array
//! - `ground_level`: the cached height of the topmost colliding block per column
//!
//! ### Coordinates
//! World coordinates map to chunks with floor division, so negative coordinates
//! land in negative chunks: x = -1 lives in chunk -1 at local x = 15.

use bitvec::prelude::BitVec;
use cgmath::Point3;

use crate::engine_state::rendering::meshing::Quad;

use super::block::{BlockCatalog, BlockId};

pub mod chunk_iteration;

/// The width and depth of a chunk in blocks.
pub const CHUNK_SIZE: i32 = 16;
/// The height of a chunk (and of the world) in blocks.
pub const CHUNK_HEIGHT: i32 = 128;
/// The number of blocks in a single horizontal layer of a chunk.
pub const CHUNK_LAYER: usize = (CHUNK_SIZE * CHUNK_SIZE) as usize;
/// The total number of blocks in a chunk.
pub const CHUNK_VOLUME: usize = CHUNK_LAYER * CHUNK_HEIGHT as usize;

/// Ground level reported for a column without any colliding block.
pub const NO_GROUND: i32 = -1;

/// Maps a world block coordinate to the chunk coordinate containing it.
pub fn to_chunk_coord(v: i32) -> i32 {
    v.div_euclid(CHUNK_SIZE)
}

/// Maps a world block coordinate to its local coordinate inside its chunk, in `[0, CHUNK_SIZE)`.
pub fn to_local_coord(v: i32) -> i32 {
    v.rem_euclid(CHUNK_SIZE)
}

/// Horizontal position of a chunk, in chunk units.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkCoord {
    pub x: i32,
    pub z: i32,
}

impl ChunkCoord {
    pub fn new(x: i32, z: i32) -> Self {
        ChunkCoord { x, z }
    }

    /// The chunk containing the world block column `(x, z)`.
    pub fn from_block(x: i32, z: i32) -> Self {
        ChunkCoord::new(to_chunk_coord(x), to_chunk_coord(z))
    }

    /// The world block coordinates of this chunk's local `(0, 0, 0)` cell.
    pub fn block_origin(&self) -> Point3<i32> {
        Point3::new(self.x * CHUNK_SIZE, 0, self.z * CHUNK_SIZE)
    }

    pub fn offset(&self, dx: i32, dz: i32) -> Self {
        ChunkCoord::new(self.x + dx, self.z + dz)
    }

    /// The four laterally adjacent chunks: -x, +x, -z, +z.
    pub fn neighbours(&self) -> [ChunkCoord; 4] {
        [
            self.offset(-1, 0),
            self.offset(1, 0),
            self.offset(0, -1),
            self.offset(0, 1),
        ]
    }

    /// Squared distance to `other` in chunk units.
    pub fn distance_squared(&self, other: &ChunkCoord) -> i32 {
        let dx = self.x - other.x;
        let dz = self.z - other.z;
        dx * dx + dz * dz
    }
}

/// Represents a 16x128x16 column of voxel blocks in the world.
///
/// Besides its blocks a chunk carries the mesh bookkeeping of the world: the
/// dirty flag, the last generated quad list and whether that list still has to
/// be handed to the renderer.
pub struct Chunk {
    /// The position of this chunk in chunk coordinates (not block coordinates).
    pub coord: ChunkCoord,

    blocks: Vec<BlockId>,

    /// One bit per cell, set when the cell is neither air nor void.
    occupied: BitVec,

    ground_level: Vec<i32>,

    /// Set whenever the chunk or a lateral neighbour changed since the last mesh.
    pub dirty: bool,

    /// Quads produced by the last mesh generation.
    pub quads: Vec<Quad>,

    /// Set when `quads` was regenerated but not yet uploaded.
    pub needs_upload: bool,

    /// Set once the renderer holds a mesh for this chunk.
    pub uploaded: bool,
}

impl Chunk {
    /// Creates a new chunk filled with air.
    ///
    /// # Arguments
    /// * `coord` - The chunk coordinates of the new chunk
    pub fn new(coord: ChunkCoord) -> Self {
        Chunk::from_blocks(coord, vec![BlockId::AIR; CHUNK_VOLUME])
    }

    /// Creates a chunk from a full block array in x, z, y order.
    ///
    /// # Panics
    /// Panics if `blocks` does not hold exactly `CHUNK_VOLUME` entries.
    pub fn from_blocks(coord: ChunkCoord, blocks: Vec<BlockId>) -> Self {
        assert_eq!(
            blocks.len(),
            CHUNK_VOLUME,
            "chunk block array must hold {CHUNK_VOLUME} blocks"
        );

        let occupied = blocks.iter().map(|id| !is_empty(*id)).collect();

        Chunk {
            coord,
            blocks,
            occupied,
            ground_level: vec![NO_GROUND; CHUNK_LAYER],
            dirty: true,
            quads: Vec::new(),
            needs_upload: false,
            uploaded: false,
        }
    }

    /// Whether local coordinates address a cell of this chunk.
    pub fn contains(x: i32, y: i32, z: i32) -> bool {
        (0..CHUNK_SIZE).contains(&x) && (0..CHUNK_HEIGHT).contains(&y) && (0..CHUNK_SIZE).contains(&z)
    }

    #[inline]
    fn index(x: i32, y: i32, z: i32) -> usize {
        debug_assert!(Chunk::contains(x, y, z), "({x}, {y}, {z}) is outside the chunk");
        x as usize + z as usize * CHUNK_SIZE as usize + y as usize * CHUNK_LAYER
    }

    /// Local coordinates of a flat cell index.
    #[inline]
    pub(crate) fn position_of(index: usize) -> Point3<i32> {
        let size = CHUNK_SIZE as usize;
        Point3::new(
            (index % size) as i32,
            (index / CHUNK_LAYER) as i32,
            ((index / size) % size) as i32,
        )
    }

    /// Returns the block at local coordinates.
    ///
    /// # Panics
    /// Panics if the coordinates are outside the chunk.
    pub fn get(&self, x: i32, y: i32, z: i32) -> BlockId {
        self.blocks[Chunk::index(x, y, z)]
    }

    /// Overwrites the block at local coordinates. Does not touch the dirty flag.
    ///
    /// # Panics
    /// Panics if the coordinates are outside the chunk.
    pub fn set(&mut self, x: i32, y: i32, z: i32, block: BlockId) {
        let index = Chunk::index(x, y, z);
        self.blocks[index] = block;
        self.occupied.set(index, !is_empty(block));
    }

    /// Sets every cell of the column `(x, z)` in `from..to` to `block`.
    pub fn fill_column(&mut self, x: i32, z: i32, from: i32, to: i32, block: BlockId) {
        for y in from.max(0)..to.min(CHUNK_HEIGHT) {
            self.set(x, y, z, block);
        }
    }

    /// Whether the cell holds anything other than air or void.
    pub fn is_occupied(&self, x: i32, y: i32, z: i32) -> bool {
        self.occupied[Chunk::index(x, y, z)]
    }

    /// Number of cells that are neither air nor void.
    pub fn occupied_count(&self) -> usize {
        self.occupied.count_ones()
    }

    /// The cached height of the topmost colliding block of a column, or
    /// `NO_GROUND` for an empty column.
    pub fn ground_level(&self, x: i32, z: i32) -> i32 {
        self.ground_level[x as usize + z as usize * CHUNK_SIZE as usize]
    }

    /// Rescans one column and updates its cached ground level.
    pub fn refresh_ground_level(&mut self, x: i32, z: i32, catalog: &BlockCatalog) {
        let top = (0..CHUNK_HEIGHT)
            .rev()
            .find(|&y| catalog.get(self.get(x, y, z)).has_collider)
            .unwrap_or(NO_GROUND);
        self.ground_level[x as usize + z as usize * CHUNK_SIZE as usize] = top;
    }

    /// Rescans every column of the chunk.
    pub fn refresh_ground_levels(&mut self, catalog: &BlockCatalog) {
        for z in 0..CHUNK_SIZE {
            for x in 0..CHUNK_SIZE {
                self.refresh_ground_level(x, z, catalog);
            }
        }
    }
}

fn is_empty(block: BlockId) -> bool {
    block == BlockId::AIR || block == BlockId::VOID
}
