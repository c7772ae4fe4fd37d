//! # Chunk Iteration Module
//!
//! This module provides an iterator over the occupied cells of a chunk. It walks
//! the `occupied` bit vector with `iter_ones`, so runs of air are skipped a word
//! at a time instead of cell by cell.

use bitvec::slice::IterOnes;
use cgmath::Point3;

use crate::engine_state::voxels::block::BlockId;

use super::Chunk;

/// An iterator over all cells of a chunk that hold neither air nor void.
///
/// Yields the local position of each cell together with its block.
pub struct OccupiedCells<'a> {
    chunk_ref: &'a Chunk,
    ones: IterOnes<'a, usize, bitvec::order::Lsb0>,
}

impl<'a> OccupiedCells<'a> {
    pub fn new(chunk_ref: &'a Chunk) -> Self {
        OccupiedCells {
            chunk_ref,
            ones: chunk_ref.occupied.iter_ones(),
        }
    }
}

impl<'a> Iterator for OccupiedCells<'a> {
    type Item = (Point3<i32>, BlockId);

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.ones.next()?;
        Some((Chunk::position_of(index), self.chunk_ref.blocks[index]))
    }
}

impl Chunk {
    /// Iterates the occupied cells of this chunk in storage order.
    pub fn occupied_cells(&self) -> OccupiedCells<'_> {
        OccupiedCells::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::block::block_type::BlockType;
    use crate::engine_state::voxels::chunk::ChunkCoord;

    #[test]
    fn yields_only_occupied_cells() {
        let mut chunk = Chunk::new(ChunkCoord::new(0, 0));
        chunk.set(0, 0, 0, BlockType::DIRT.id());
        chunk.set(5, 64, 9, BlockType::WATER.id());

        let cells: Vec<_> = chunk.occupied_cells().collect();
        assert_eq!(
            cells,
            vec![
                (Point3::new(0, 0, 0), BlockType::DIRT.id()),
                (Point3::new(5, 64, 9), BlockType::WATER.id()),
            ]
        );
    }
}
