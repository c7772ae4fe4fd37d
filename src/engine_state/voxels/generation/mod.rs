//! # Terrain Generation Module
//!
//! The world only depends on the `TerrainGenerator` capability: fill a freshly
//! created, all-air chunk with its initial blocks. Two generators ship with the
//! engine:
//!
//! - `FlatGenerator`: a flat slab of grass over dirt and stone, deterministic
//!   and used heavily by tests
//! - `PerlinGenerator`: a 2D Perlin height map with water
//!   below sea level and scattered trees
//!
//! Generators run on whichever thread loads the chunk, hence `Send + Sync`.

use cgmath::Point3;
use noise::{NoiseFn, Perlin};

use super::block::block_type::BlockType;
use super::chunk::{Chunk, CHUNK_HEIGHT, CHUNK_SIZE};

/// Fills newly created chunks with their initial blocks.
pub trait TerrainGenerator: Send + Sync {
    /// Writes the initial contents of `chunk`, which arrives filled with air.
    fn generate(&self, chunk: &mut Chunk);
}

/// Generates nothing; every chunk stays air.
#[derive(Default, Debug, Clone, Copy)]
pub struct EmptyGenerator;

impl TerrainGenerator for EmptyGenerator {
    fn generate(&self, _chunk: &mut Chunk) {}
}

/// Generates a flat world whose topmost (grass) layer is at `ground_height - 1`.
#[derive(Debug, Clone, Copy)]
pub struct FlatGenerator {
    pub ground_height: i32,
}

impl FlatGenerator {
    pub fn new(ground_height: i32) -> Self {
        FlatGenerator { ground_height }
    }
}

impl TerrainGenerator for FlatGenerator {
    fn generate(&self, chunk: &mut Chunk) {
        let top = self.ground_height.clamp(0, CHUNK_HEIGHT);
        for z in 0..CHUNK_SIZE {
            for x in 0..CHUNK_SIZE {
                chunk.fill_column(x, z, 0, top - 4, BlockType::STONE.id());
                chunk.fill_column(x, z, top - 4, top - 1, BlockType::DIRT.id());
                chunk.fill_column(x, z, top - 1, top, BlockType::GRASS.id());
            }
        }
    }
}

/// Scaling factor applied to world coordinates when sampling Perlin noise.
pub const PERLIN_SCALE_FACTOR: f64 = 0.02;
/// Base terrain height around which the noise oscillates.
pub const BASE_HEIGHT: i32 = 40;
/// Maximum deviation of the terrain from `BASE_HEIGHT`.
pub const HEIGHT_AMPLITUDE: f64 = 16.0;
/// Columns whose surface lies below this height are flooded with water.
pub const SEA_LEVEL: i32 = 36;
/// Probability of a tree growing on a dry grass column.
pub const TREE_CHANCE: f64 = 0.01;

const TRUNK_HEIGHT: i32 = 4;
const CANOPY_RADIUS: i32 = 2;

/// Generates rolling terrain from a 2D Perlin height map.
pub struct PerlinGenerator {
    seed: u32,
    perlin: Perlin,
}

impl PerlinGenerator {
    pub fn new(seed: u32) -> Self {
        PerlinGenerator {
            seed,
            perlin: Perlin::new(seed),
        }
    }

    /// Terrain surface height of a world column.
    pub fn height_at(&self, x: i32, z: i32) -> i32 {
        let sample = self.perlin.get([
            x as f64 * PERLIN_SCALE_FACTOR,
            z as f64 * PERLIN_SCALE_FACTOR,
        ]);
        (BASE_HEIGHT + (sample * HEIGHT_AMPLITUDE).round() as i32).clamp(1, CHUNK_HEIGHT - 16)
    }

    /// Deterministic per-chunk random source so that reloading a chunk regrows
    /// the same trees.
    fn chunk_rng(&self, chunk: &Chunk) -> fastrand::Rng {
        let x = chunk.coord.x as u32 as u64;
        let z = chunk.coord.z as u32 as u64;
        fastrand::Rng::with_seed((self.seed as u64) << 32 ^ x.wrapping_mul(0x9E37_79B9) ^ z << 16)
    }

    /// Grows a tree whose trunk starts at local `base`. The caller guarantees
    /// that the whole canopy fits inside the chunk.
    fn grow_tree(chunk: &mut Chunk, base: Point3<i32>) {
        let canopy_base = base.y + TRUNK_HEIGHT - 1;
        for y in canopy_base..canopy_base + 2 {
            for dz in -CANOPY_RADIUS..=CANOPY_RADIUS {
                for dx in -CANOPY_RADIUS..=CANOPY_RADIUS {
                    chunk.set(base.x + dx, y, base.z + dz, BlockType::LEAVES.id());
                }
            }
        }
        for dz in -1..=1 {
            for dx in -1..=1 {
                chunk.set(base.x + dx, canopy_base + 2, base.z + dz, BlockType::LEAVES.id());
            }
        }
        chunk.fill_column(base.x, base.z, base.y, base.y + TRUNK_HEIGHT + 1, BlockType::LOG.id());
    }
}

impl TerrainGenerator for PerlinGenerator {
    fn generate(&self, chunk: &mut Chunk) {
        let origin = chunk.coord.block_origin();
        let mut rng = self.chunk_rng(chunk);

        for z in 0..CHUNK_SIZE {
            for x in 0..CHUNK_SIZE {
                let height = self.height_at(origin.x + x, origin.z + z);
                chunk.fill_column(x, z, 0, height - 3, BlockType::STONE.id());
                if height < SEA_LEVEL {
                    chunk.fill_column(x, z, height - 3, height, BlockType::DIRT.id());
                    chunk.fill_column(x, z, height, SEA_LEVEL, BlockType::WATER.id());
                    continue;
                }
                chunk.fill_column(x, z, height - 3, height - 1, BlockType::DIRT.id());
                chunk.set(x, height - 1, z, BlockType::GRASS.id());

                let fits = (CANOPY_RADIUS..CHUNK_SIZE - CANOPY_RADIUS).contains(&x)
                    && (CANOPY_RADIUS..CHUNK_SIZE - CANOPY_RADIUS).contains(&z);
                if fits && rng.f64() < TREE_CHANCE {
                    Self::grow_tree(chunk, Point3::new(x, height, z));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::block::BlockId;
    use crate::engine_state::voxels::chunk::ChunkCoord;

    #[test]
    fn flat_generator_layers() {
        let mut chunk = Chunk::new(ChunkCoord::new(-1, 3));
        FlatGenerator::new(10).generate(&mut chunk);
        assert_eq!(chunk.get(4, 9, 4), BlockType::GRASS.id());
        assert_eq!(chunk.get(4, 8, 4), BlockType::DIRT.id());
        assert_eq!(chunk.get(4, 0, 4), BlockType::STONE.id());
        assert_eq!(chunk.get(4, 10, 4), BlockId::AIR);
    }

    #[test]
    fn perlin_generator_is_deterministic() {
        let generator = PerlinGenerator::new(7);
        let mut a = Chunk::new(ChunkCoord::new(2, 5));
        let mut b = Chunk::new(ChunkCoord::new(2, 5));
        generator.generate(&mut a);
        generator.generate(&mut b);
        for y in 0..CHUNK_HEIGHT {
            assert_eq!(a.get(8, y, 8), b.get(8, y, 8));
        }
        assert!(a.occupied_count() > 0);
    }

    #[test]
    fn perlin_columns_have_no_air_below_surface() {
        let generator = PerlinGenerator::new(1);
        let mut chunk = Chunk::new(ChunkCoord::new(0, 0));
        generator.generate(&mut chunk);
        let height = generator.height_at(3, 12);
        for y in 0..height.min(SEA_LEVEL) {
            assert_ne!(chunk.get(3, y, 12), BlockId::AIR);
        }
    }
}
