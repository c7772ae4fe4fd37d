#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use voxel_world::engine_state::rendering::ChunkRenderer;
use voxel_world::engine_state::voxels::block::BlockCatalog;
use voxel_world::engine_state::voxels::chunk::ChunkCoord;
use voxel_world::engine_state::voxels::generation::TerrainGenerator;
use voxel_world::engine_state::voxels::world::World;

/// What a `RecordingRenderer` was asked to do, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderCall {
    Upload(ChunkCoord, usize),
    Draw(ChunkCoord),
    Release(ChunkCoord),
}

#[derive(Default, Clone)]
pub struct RecordingRenderer {
    pub calls: Rc<RefCell<Vec<RenderCall>>>,
}

impl RecordingRenderer {
    pub fn uploads(&self) -> Vec<ChunkCoord> {
        self.filter(|call| match call {
            RenderCall::Upload(coord, _) => Some(*coord),
            _ => None,
        })
    }

    pub fn draws(&self) -> Vec<ChunkCoord> {
        self.filter(|call| match call {
            RenderCall::Draw(coord) => Some(*coord),
            _ => None,
        })
    }

    pub fn releases(&self) -> Vec<ChunkCoord> {
        self.filter(|call| match call {
            RenderCall::Release(coord) => Some(*coord),
            _ => None,
        })
    }

    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }

    fn filter(&self, f: impl Fn(&RenderCall) -> Option<ChunkCoord>) -> Vec<ChunkCoord> {
        self.calls.borrow().iter().filter_map(f).collect()
    }
}

impl ChunkRenderer for RecordingRenderer {
    fn upload(&mut self, coord: ChunkCoord, vertices: &[u8], vertex_count: usize) {
        assert_eq!(vertices.len(), vertex_count * 24);
        self.calls
            .borrow_mut()
            .push(RenderCall::Upload(coord, vertex_count));
    }

    fn draw(&mut self, coord: ChunkCoord) {
        self.calls.borrow_mut().push(RenderCall::Draw(coord));
    }

    fn release(&mut self, coord: ChunkCoord) {
        self.calls.borrow_mut().push(RenderCall::Release(coord));
    }
}

/// A world with small streaming distances that records every renderer call.
pub fn recording_world(
    generator: impl TerrainGenerator + 'static,
    load_distance: i32,
    unload_distance: i32,
) -> (World, RecordingRenderer) {
    let renderer = RecordingRenderer::default();
    let world = World::new(
        Arc::new(BlockCatalog::new()),
        Box::new(generator),
        Box::new(renderer.clone()),
    )
    .with_streaming_distances(load_distance, unload_distance);
    (world, renderer)
}
