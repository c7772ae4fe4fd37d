//! # World Module
//!
//! This module provides the `World` struct, the owner of every loaded chunk.
//! It maps world block coordinates onto chunks, defers edits to chunks that are
//! not loaded, streams chunks in and out around the viewer and keeps chunk
//! meshes up to date.
//!
//! ## Architecture
//!
//! Chunks live in a sparse `ChunkMap` keyed by chunk coordinate, so the world is
//! effectively unbounded horizontally while only chunks near the viewer occupy
//! memory. Vertically the world is a single chunk tall.
//!
//! ## Frame Flow
//!
//! `update_streaming` is called once per frame with the viewer position:
//! 1. If the viewer entered a new chunk, load the square of radius
//!    `load_distance`, unload chunks beyond `unload_distance` and rebuild the
//!    render order (farthest first)
//! 2. Mesh every dirty chunk on the rayon pool, borrowing the chunk map immutably
//! 3. Write the quad lists back and upload them, sequentially
//!
//! ## Performance Considerations
//!
//! - Chunk lookup is O(1) using a hash map
//! - Only dirty chunks are meshed, and the mesh phase takes no locks
//! - The gap between load and unload distance keeps chunks from thrashing when
//!   the viewer walks back and forth over a chunk border

use std::collections::HashMap;
use std::sync::Arc;

use cgmath::Point3;
use log::{debug, info};

use crate::engine_state::rendering::meshing::{mesh_chunks, quads_to_vertex_bytes};
use crate::engine_state::rendering::ChunkRenderer;

use super::block::{BlockCatalog, BlockId};
use super::chunk::{
    to_local_coord, Chunk, ChunkCoord, CHUNK_HEIGHT, CHUNK_SIZE, NO_GROUND,
};
use super::generation::TerrainGenerator;
use super::pending_edits::{PendingEdit, PendingEdits};

/// Chunks loaded in every direction around the viewer.
pub const LOAD_DISTANCE: i32 = 7;
/// Chunks farther than this from the viewer on either axis are unloaded.
pub const UNLOAD_DISTANCE: i32 = 9;

/// The sparse set of loaded chunks.
///
/// Split out of `World` so the mesh phase can borrow it across threads while
/// the world itself holds non-`Sync` collaborators.
#[derive(Default)]
pub struct ChunkMap {
    chunks: HashMap<ChunkCoord, Chunk>,
}

impl ChunkMap {
    pub fn get(&self, coord: &ChunkCoord) -> Option<&Chunk> {
        self.chunks.get(coord)
    }

    pub fn get_mut(&mut self, coord: &ChunkCoord) -> Option<&mut Chunk> {
        self.chunks.get_mut(coord)
    }

    pub fn contains(&self, coord: &ChunkCoord) -> bool {
        self.chunks.contains_key(coord)
    }

    /// Inserts a chunk under its own coordinate, returning any chunk it replaced.
    pub fn insert(&mut self, chunk: Chunk) -> Option<Chunk> {
        self.chunks.insert(chunk.coord, chunk)
    }

    pub fn remove(&mut self, coord: &ChunkCoord) -> Option<Chunk> {
        self.chunks.remove(coord)
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn coords(&self) -> impl Iterator<Item = &ChunkCoord> {
        self.chunks.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.values()
    }

    /// Marks a chunk dirty if it is loaded.
    pub fn mark_dirty(&mut self, coord: &ChunkCoord) {
        if let Some(chunk) = self.chunks.get_mut(coord) {
            chunk.dirty = true;
        }
    }

    /// Returns the block at world coordinates.
    ///
    /// Total: anything with `y` outside `[0, CHUNK_HEIGHT)` or inside an
    /// unloaded chunk reads as void.
    pub fn get_block(&self, x: i32, y: i32, z: i32) -> BlockId {
        if !(0..CHUNK_HEIGHT).contains(&y) {
            return BlockId::VOID;
        }
        match self.chunks.get(&ChunkCoord::from_block(x, z)) {
            Some(chunk) => chunk.get(to_local_coord(x), y, to_local_coord(z)),
            None => BlockId::VOID,
        }
    }
}

/// Represents the voxel world: loaded chunks plus everything needed to stream,
/// edit and mesh them.
pub struct World {
    catalog: Arc<BlockCatalog>,
    chunks: ChunkMap,
    pending: PendingEdits,

    /// `(squared chunk distance, coord)`, sorted farthest first.
    render_order: Vec<(i32, ChunkCoord)>,
    viewer_chunk: Option<ChunkCoord>,

    load_distance: i32,
    unload_distance: i32,

    generator: Box<dyn TerrainGenerator>,
    renderer: Box<dyn ChunkRenderer>,
}

impl World {
    /// Creates a new world with no chunks loaded.
    ///
    /// # Arguments
    /// * `catalog` - The block catalog shared with the rest of the engine
    /// * `generator` - Fills every newly loaded chunk
    /// * `renderer` - Receives mesh uploads, draws and releases
    pub fn new(
        catalog: Arc<BlockCatalog>,
        generator: Box<dyn TerrainGenerator>,
        renderer: Box<dyn ChunkRenderer>,
    ) -> Self {
        World {
            catalog,
            chunks: ChunkMap::default(),
            pending: PendingEdits::new(),
            render_order: Vec::new(),
            viewer_chunk: None,
            load_distance: LOAD_DISTANCE,
            unload_distance: UNLOAD_DISTANCE,
            generator,
            renderer,
        }
    }

    /// Overrides the streaming radii.
    ///
    /// # Panics
    /// Panics unless `0 <= load_distance < unload_distance`.
    pub fn with_streaming_distances(mut self, load_distance: i32, unload_distance: i32) -> Self {
        assert!(
            0 <= load_distance && load_distance < unload_distance,
            "unload distance ({unload_distance}) must exceed load distance ({load_distance})"
        );
        self.load_distance = load_distance;
        self.unload_distance = unload_distance;
        self
    }

    pub fn catalog(&self) -> &Arc<BlockCatalog> {
        &self.catalog
    }

    pub fn chunks(&self) -> &ChunkMap {
        &self.chunks
    }

    pub fn load_distance(&self) -> i32 {
        self.load_distance
    }

    pub fn unload_distance(&self) -> i32 {
        self.unload_distance
    }

    pub fn is_loaded(&self, cx: i32, cz: i32) -> bool {
        self.chunks.contains(&ChunkCoord::new(cx, cz))
    }

    /// Number of deferred edits waiting for a chunk to load.
    pub fn pending_edit_count(&self, cx: i32, cz: i32) -> usize {
        self.pending.count(ChunkCoord::new(cx, cz))
    }

    /// The current render order, farthest chunk first.
    pub fn render_order(&self) -> &[(i32, ChunkCoord)] {
        &self.render_order
    }

    /// Returns the block at world coordinates, or void when out of range or unloaded.
    pub fn get_block(&self, x: i32, y: i32, z: i32) -> BlockId {
        self.chunks.get_block(x, y, z)
    }

    /// Sets the block at world coordinates.
    ///
    /// On a loaded chunk the block is written immediately and the chunk is
    /// marked dirty, together with the lateral neighbour when the edit sits on
    /// a border column. On an unloaded chunk the edit is deferred until the
    /// chunk loads. `y` outside the world is ignored.
    pub fn set_block(&mut self, x: i32, y: i32, z: i32, block: BlockId) {
        if !(0..CHUNK_HEIGHT).contains(&y) {
            return;
        }

        let coord = ChunkCoord::from_block(x, z);
        let (lx, lz) = (to_local_coord(x), to_local_coord(z));

        let Some(chunk) = self.chunks.get_mut(&coord) else {
            self.pending.push(coord, PendingEdit { x: lx, y, z: lz, block });
            return;
        };

        chunk.set(lx, y, lz, block);
        chunk.refresh_ground_level(lx, lz, &self.catalog);
        chunk.dirty = true;

        if lx == 0 {
            self.chunks.mark_dirty(&coord.offset(-1, 0));
        } else if lx == CHUNK_SIZE - 1 {
            self.chunks.mark_dirty(&coord.offset(1, 0));
        }
        if lz == 0 {
            self.chunks.mark_dirty(&coord.offset(0, -1));
        } else if lz == CHUNK_SIZE - 1 {
            self.chunks.mark_dirty(&coord.offset(0, 1));
        }
    }

    /// Height of the topmost colliding block of a world column, or `-1` if the
    /// column is empty or its chunk is not loaded.
    pub fn get_ground_level(&self, x: i32, z: i32) -> i32 {
        match self.chunks.get(&ChunkCoord::from_block(x, z)) {
            Some(chunk) => chunk.ground_level(to_local_coord(x), to_local_coord(z)),
            None => NO_GROUND,
        }
    }

    /// Loads a chunk: generates it, replays its deferred edits and marks it and
    /// its lateral neighbours dirty. Does nothing if it is already loaded.
    pub fn load_chunk(&mut self, cx: i32, cz: i32) {
        let coord = ChunkCoord::new(cx, cz);
        if self.chunks.contains(&coord) {
            return;
        }

        let mut chunk = Chunk::new(coord);
        self.generator.generate(&mut chunk);
        let replayed = self.pending.apply(coord, &mut chunk);
        chunk.refresh_ground_levels(&self.catalog);
        chunk.dirty = true;
        self.chunks.insert(chunk);

        for neighbour in coord.neighbours() {
            self.chunks.mark_dirty(&neighbour);
        }

        debug!("Loaded chunk ({cx}, {cz}), replayed {replayed} pending edits");
    }

    /// Unloads a chunk, releasing its render resources and marking its lateral
    /// neighbours dirty. Does nothing if it is not loaded.
    pub fn unload_chunk(&mut self, cx: i32, cz: i32) {
        let coord = ChunkCoord::new(cx, cz);
        if self.chunks.remove(&coord).is_none() {
            return;
        }

        self.renderer.release(coord);
        for neighbour in coord.neighbours() {
            self.chunks.mark_dirty(&neighbour);
        }

        debug!("Unloaded chunk ({cx}, {cz})");
    }

    /// Loads the square of chunks within the load distance of chunk `(0, 0)`.
    pub fn generate_spawn_area(&mut self) {
        for cx in -self.load_distance..=self.load_distance {
            for cz in -self.load_distance..=self.load_distance {
                self.load_chunk(cx, cz);
            }
        }
        info!("Generated spawn area of {} chunks", self.chunks.len());
    }

    /// Per-frame world update.
    ///
    /// Streams chunks around the viewer when it entered a different chunk (or
    /// on the first call), then meshes and uploads every dirty chunk.
    ///
    /// # Arguments
    /// * `viewer` - The viewer position in world space
    pub fn update_streaming(&mut self, viewer: Point3<f32>) {
        let current = ChunkCoord::from_block(viewer.x.floor() as i32, viewer.z.floor() as i32);
        if self.viewer_chunk != Some(current) {
            self.viewer_chunk = Some(current);
            self.stream_around(current);
        }

        self.refresh_meshes();
    }

    fn stream_around(&mut self, center: ChunkCoord) {
        let before = self.chunks.len();

        for cx in center.x - self.load_distance..=center.x + self.load_distance {
            for cz in center.z - self.load_distance..=center.z + self.load_distance {
                self.load_chunk(cx, cz);
            }
        }
        let loaded = self.chunks.len() - before;

        let unload_distance = self.unload_distance;
        let to_unload: Vec<ChunkCoord> = self
            .chunks
            .coords()
            .filter(|coord| {
                (coord.x - center.x).abs() > unload_distance
                    || (coord.z - center.z).abs() > unload_distance
            })
            .copied()
            .collect();
        for coord in &to_unload {
            self.unload_chunk(coord.x, coord.z);
        }

        self.render_order = self
            .chunks
            .coords()
            .map(|coord| (coord.distance_squared(&center), *coord))
            .collect();
        self.render_order.sort_by(|a, b| b.cmp(a));

        info!(
            "Viewer entered chunk ({}, {}): loaded {}, unloaded {}, {} resident",
            center.x,
            center.z,
            loaded,
            to_unload.len(),
            self.chunks.len()
        );
    }

    /// Meshes all dirty chunks in parallel, then writes the quads back and
    /// uploads them.
    ///
    /// # Returns
    /// The number of chunks that were meshed.
    pub fn refresh_meshes(&mut self) -> usize {
        let dirty: Vec<ChunkCoord> = self
            .chunks
            .iter()
            .filter(|chunk| chunk.dirty)
            .map(|chunk| chunk.coord)
            .collect();
        if dirty.is_empty() {
            return 0;
        }

        let meshed = mesh_chunks(&self.catalog, &self.chunks, &dirty);

        for (coord, quads) in meshed {
            let Some(chunk) = self.chunks.get_mut(&coord) else {
                continue;
            };
            chunk.quads = quads;
            chunk.dirty = false;
            chunk.needs_upload = true;

            let (bytes, vertex_count) = quads_to_vertex_bytes(&chunk.quads);
            self.renderer.upload(coord, &bytes, vertex_count);
            chunk.needs_upload = false;
            chunk.uploaded = true;
        }

        debug!("Meshed {} dirty chunks", dirty.len());
        dirty.len()
    }

    /// Draws every uploaded chunk in render order.
    pub fn draw(&mut self) {
        for (_, coord) in &self.render_order {
            if self.chunks.get(coord).is_some_and(|chunk| chunk.uploaded) {
                self.renderer.draw(*coord);
            }
        }
    }
}

impl Drop for World {
    fn drop(&mut self) {
        for coord in self.chunks.coords() {
            self.renderer.release(*coord);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::rendering::NullRenderer;
    use crate::engine_state::voxels::block::block_type::BlockType;
    use crate::engine_state::voxels::generation::{EmptyGenerator, FlatGenerator};

    fn world_with(generator: Box<dyn TerrainGenerator>) -> World {
        World::new(Arc::new(BlockCatalog::new()), generator, Box::new(NullRenderer))
    }

    #[test]
    fn get_block_is_total() {
        let mut world = world_with(Box::new(FlatGenerator::new(4)));
        world.load_chunk(0, 0);
        assert_eq!(world.get_block(0, -1, 0), BlockId::VOID);
        assert_eq!(world.get_block(0, CHUNK_HEIGHT, 0), BlockId::VOID);
        assert_eq!(world.get_block(100, 1, 100), BlockId::VOID);
        assert_eq!(world.get_block(0, 3, 0), BlockType::GRASS.id());
    }

    #[test]
    fn set_then_get_on_negative_coordinates() {
        let mut world = world_with(Box::new(EmptyGenerator));
        world.load_chunk(-1, -1);
        world.set_block(-1, 20, -16, BlockType::LOG.id());
        assert_eq!(world.get_block(-1, 20, -16), BlockType::LOG.id());
        assert_eq!(world.get_ground_level(-1, -16), 20);
    }

    #[test]
    fn out_of_range_y_is_ignored() {
        let mut world = world_with(Box::new(EmptyGenerator));
        world.set_block(0, -1, 0, BlockType::STONE.id());
        world.set_block(0, CHUNK_HEIGHT, 0, BlockType::STONE.id());
        assert_eq!(world.pending_edit_count(0, 0), 0);
    }

    #[test]
    fn ground_level_of_unloaded_chunk() {
        let world = world_with(Box::new(FlatGenerator::new(12)));
        assert_eq!(world.get_ground_level(5, 5), -1);
    }

    #[test]
    fn loading_marks_neighbours_dirty() {
        let mut world = world_with(Box::new(EmptyGenerator));
        world.load_chunk(0, 0);
        world.refresh_meshes();
        assert!(!world.chunks().get(&ChunkCoord::new(0, 0)).unwrap().dirty);

        world.load_chunk(1, 0);
        assert!(world.chunks().get(&ChunkCoord::new(0, 0)).unwrap().dirty);
    }

    #[test]
    fn spawn_area_is_square() {
        let mut world = world_with(Box::new(EmptyGenerator)).with_streaming_distances(2, 3);
        world.generate_spawn_area();
        assert_eq!(world.chunks().len(), 25);
        assert!(world.is_loaded(-2, 2));
        assert!(!world.is_loaded(3, 0));
    }

    #[test]
    #[should_panic]
    fn unload_must_exceed_load_distance() {
        let _ = world_with(Box::new(EmptyGenerator)).with_streaming_distances(4, 4);
    }
}
