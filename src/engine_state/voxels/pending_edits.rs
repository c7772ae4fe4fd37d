//! # Pending Edits Module
//!
//! Block edits addressed to chunks that are not loaded are kept here until the
//! chunk loads. Each chunk's log is append-only and is consumed exactly once;
//! replaying it in order gives last-write-wins per cell.

use std::collections::HashMap;

use super::block::BlockId;
use super::chunk::{Chunk, ChunkCoord};

/// A single deferred edit in chunk-local coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PendingEdit {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub block: BlockId,
}

/// Per-chunk logs of deferred edits.
#[derive(Default, Debug)]
pub struct PendingEdits {
    edits: HashMap<ChunkCoord, Vec<PendingEdit>>,
}

impl PendingEdits {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an edit to the log of `coord`.
    pub fn push(&mut self, coord: ChunkCoord, edit: PendingEdit) {
        self.edits.entry(coord).or_default().push(edit);
    }

    /// Removes the log of `coord` and replays it onto `chunk`.
    ///
    /// # Returns
    /// The number of edits applied.
    pub fn apply(&mut self, coord: ChunkCoord, chunk: &mut Chunk) -> usize {
        let Some(log) = self.edits.remove(&coord) else {
            return 0;
        };
        for edit in &log {
            chunk.set(edit.x, edit.y, edit.z, edit.block);
        }
        log.len()
    }

    /// Number of deferred edits for a chunk.
    pub fn count(&self, coord: ChunkCoord) -> usize {
        self.edits.get(&coord).map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }
}
