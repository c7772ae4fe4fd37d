//! # Block Module
//!
//! This module provides the block catalog: the immutable registry of block
//! *kinds* that every voxel in the world refers to.
//!
//! ## Key Components
//! - `BlockId`: A compact, copyable handle identifying a kind in the catalog
//! - `BlockKind`: Flags and per-face textures shared by every voxel of a kind
//! - `BlockCatalog`: The explicitly constructed registry, shared by the world
//!   and the mesher through an `Arc`
//!
//! Two kinds are always present: `void`, returned for anything outside the
//! loaded world, and `air`. Both are invisible, transparent and without a
//! collider, but they keep distinct identities.

use block_side::BlockSide;
use block_type::BlockType;

pub mod block_side;
pub mod block_type;

/// The underlying integer type used to represent block kinds in memory.
pub type BlockTypeSize = u8;

/// Number of texture columns (and rows) in the block texture atlas.
pub const ATLAS_COLUMNS: usize = 4;

/// Handle to a kind registered in a [`BlockCatalog`].
///
/// Voxels store this handle rather than the kind itself; two voxels are of
/// the same kind exactly when their handles are equal.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BlockId(pub BlockTypeSize);

impl BlockId {
    /// The out-of-bounds placeholder kind.
    pub const VOID: BlockId = BlockId(BlockType::VOID as BlockTypeSize);
    /// Empty space.
    pub const AIR: BlockId = BlockId(BlockType::AIR as BlockTypeSize);
}

/// The texture rectangle of one atlas cell, in normalized atlas coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TextureRect {
    pub u_min: f32,
    pub v_min: f32,
    pub u_max: f32,
    pub v_max: f32,
}

impl TextureRect {
    /// Maps a flat atlas index onto the 4-column atlas grid.
    ///
    /// `col = id % 4` and `row = id / 4`, each cell a quarter of the atlas wide.
    pub fn from_atlas_index(texture_id: usize) -> Self {
        let step = 1.0 / ATLAS_COLUMNS as f32;
        let col = (texture_id % ATLAS_COLUMNS) as f32;
        let row = (texture_id / ATLAS_COLUMNS) as f32;
        TextureRect {
            u_min: col * step,
            v_min: row * step,
            u_max: (col + 1.0) * step,
            v_max: (row + 1.0) * step,
        }
    }
}

/// Immutable descriptor shared by all voxels of one kind.
#[derive(Clone, Debug, PartialEq)]
pub struct BlockKind {
    /// Lowercase name, used in configuration and logs
    pub name: &'static str,
    /// If true, faces of neighbouring blocks touching this block are still rendered
    pub is_transparent: bool,
    /// Participates in physics collision
    pub has_collider: bool,
    /// If false, the block never produces any geometry
    pub is_visible: bool,
    /// Atlas texture index per face, indexed by `BlockSide as usize`
    pub textures: [usize; 6],
}

impl BlockKind {
    /// An invisible, transparent, non-colliding kind (air, void).
    pub fn empty(name: &'static str) -> Self {
        BlockKind {
            name,
            is_transparent: true,
            has_collider: false,
            is_visible: false,
            textures: [0; 6],
        }
    }

    /// A regular opaque, solid kind using one texture on every face.
    pub fn solid(name: &'static str, texture: usize) -> Self {
        BlockKind {
            name,
            is_transparent: false,
            has_collider: true,
            is_visible: true,
            textures: [texture; 6],
        }
    }

    /// An opaque, solid kind with separate top, side and bottom textures.
    pub fn multi_textured(name: &'static str, top: usize, side: usize, bottom: usize) -> Self {
        let mut textures = [side; 6];
        textures[BlockSide::TOP as usize] = top;
        textures[BlockSide::BOTTOM as usize] = bottom;
        BlockKind {
            textures,
            ..BlockKind::solid(name, side)
        }
    }

    /// A visible, transparent kind without a collider.
    pub fn liquid(name: &'static str, texture: usize) -> Self {
        BlockKind {
            name,
            is_transparent: true,
            has_collider: false,
            is_visible: true,
            textures: [texture; 6],
        }
    }

    /// The atlas index used for the given face.
    pub fn texture(&self, side: BlockSide) -> usize {
        self.textures[side as usize]
    }

    /// Whether a face of this kind touching `neighbour` is exposed.
    ///
    /// Opaque blocks show faces toward transparent neighbours. Transparent
    /// blocks only show faces toward invisible neighbours, so two water cells
    /// never render the face between them.
    pub fn has_face(&self, neighbour: &BlockKind) -> bool {
        (!self.is_transparent && neighbour.is_transparent)
            || (self.is_transparent && !neighbour.is_visible)
    }
}

/// The registry of every block kind known to a world.
///
/// The catalog is built once and then shared read-only; lookups by `BlockId`
/// are plain indexing.
#[derive(Debug)]
pub struct BlockCatalog {
    kinds: Vec<BlockKind>,
}

impl BlockCatalog {
    /// Creates the default catalog. The kinds are registered in `BlockType`
    /// order, so `BlockType::id()` is valid for it.
    pub fn new() -> Self {
        let mut catalog = BlockCatalog { kinds: Vec::new() };
        catalog.register(BlockKind::empty("void"));
        catalog.register(BlockKind::empty("air"));
        catalog.register(BlockKind::solid("stone", 0));
        catalog.register(BlockKind::solid("dirt", 3));
        catalog.register(BlockKind::multi_textured("grass", 1, 2, 3));
        catalog.register(BlockKind::multi_textured("log", 4, 5, 4));
        catalog.register(BlockKind::solid("leaves", 6));
        catalog.register(BlockKind::liquid("water", 7));
        catalog
    }

    /// Appends a kind and returns its handle.
    ///
    /// # Panics
    /// Panics if the catalog already holds `BlockTypeSize::MAX + 1` kinds.
    pub fn register(&mut self, kind: BlockKind) -> BlockId {
        let id = BlockTypeSize::try_from(self.kinds.len())
            .expect("block catalog is limited to 256 kinds");
        self.kinds.push(kind);
        BlockId(id)
    }

    /// Returns the kind behind a handle.
    ///
    /// # Panics
    /// Panics if the handle was not produced by this catalog.
    pub fn get(&self, id: BlockId) -> &BlockKind {
        &self.kinds[id.0 as usize]
    }

    /// Finds a kind by name.
    pub fn find(&self, name: &str) -> Option<BlockId> {
        self.kinds
            .iter()
            .position(|kind| kind.name == name)
            .map(|index| BlockId(index as BlockTypeSize))
    }

    /// Number of registered kinds.
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// True when the block can be targeted by the player: visible and
    /// neither air nor void.
    pub fn is_selectable(&self, id: BlockId) -> bool {
        id != BlockId::AIR && id != BlockId::VOID && self.get(id).is_visible
    }
}

impl Default for BlockCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn void_and_air_are_equivalent_but_distinct() {
        let catalog = BlockCatalog::new();
        let void = catalog.get(BlockId::VOID);
        let air = catalog.get(BlockId::AIR);
        assert_ne!(BlockId::VOID, BlockId::AIR);
        for kind in [void, air] {
            assert!(kind.is_transparent);
            assert!(!kind.is_visible);
            assert!(!kind.has_collider);
        }
    }

    #[test]
    fn default_catalog_matches_block_types() {
        let catalog = BlockCatalog::new();
        assert_eq!(catalog.find("stone"), Some(BlockType::STONE.id()));
        assert_eq!(catalog.find("water"), Some(BlockType::WATER.id()));
        assert_eq!(catalog.len(), 8);
    }

    #[test]
    fn grass_uses_distinct_top_and_bottom_textures() {
        let catalog = BlockCatalog::new();
        let grass = catalog.get(BlockType::GRASS.id());
        assert_eq!(grass.texture(BlockSide::TOP), 1);
        assert_eq!(grass.texture(BlockSide::FRONT), 2);
        assert_eq!(grass.texture(BlockSide::BOTTOM), 3);
    }

    #[test]
    fn face_rules() {
        let catalog = BlockCatalog::new();
        let stone = catalog.get(BlockType::STONE.id());
        let water = catalog.get(BlockType::WATER.id());
        let air = catalog.get(BlockId::AIR);

        assert!(stone.has_face(air));
        assert!(stone.has_face(water));
        assert!(!stone.has_face(stone));
        assert!(water.has_face(air));
        assert!(!water.has_face(water));
        assert!(!water.has_face(stone));
    }

    #[test]
    fn atlas_rect_for_index() {
        let rect = TextureRect::from_atlas_index(6);
        assert_eq!(
            rect,
            TextureRect {
                u_min: 0.5,
                v_min: 0.25,
                u_max: 0.75,
                v_max: 0.5
            }
        );
    }

    #[test]
    fn water_is_selectable_air_is_not() {
        let catalog = BlockCatalog::new();
        assert!(catalog.is_selectable(BlockType::WATER.id()));
        assert!(catalog.is_selectable(BlockType::STONE.id()));
        assert!(!catalog.is_selectable(BlockId::AIR));
        assert!(!catalog.is_selectable(BlockId::VOID));
    }
}
