//! # Block Type Module
//!
//! This module enumerates the block kinds registered by the default catalog.
//! It provides conversion from the compact integer form and from the
//! lowercase names used in configuration files.

use num_derive::FromPrimitive;

use super::{BlockId, BlockTypeSize};

/// Enumerates the block kinds of the default catalog.
///
/// The discriminant of each variant is the `BlockId` the default catalog
/// assigns to it, so converting between the two is free.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive)]
pub enum BlockType {
    /// Placeholder returned for coordinates outside the loaded world.
    VOID = 0,

    /// Empty space. Behaves exactly like `VOID` but is a distinct kind.
    AIR = 1,

    /// Plain stone.
    STONE = 2,

    /// A basic dirt block.
    DIRT = 3,

    /// A grass block with different textures on top, sides and bottom.
    GRASS = 4,

    /// A tree trunk, bark on the sides and rings on top and bottom.
    LOG = 5,

    /// Tree foliage.
    LEAVES = 6,

    /// Still water. Visible and transparent but has no collider.
    WATER = 7,
}

/// Compile-time lookup from configuration names to block types.
static BLOCK_TYPE_NAMES: phf::Map<&'static str, BlockType> = phf::phf_map! {
    "void" => BlockType::VOID,
    "air" => BlockType::AIR,
    "stone" => BlockType::STONE,
    "dirt" => BlockType::DIRT,
    "grass" => BlockType::GRASS,
    "log" => BlockType::LOG,
    "leaves" => BlockType::LEAVES,
    "water" => BlockType::WATER,
};

impl BlockType {
    /// Converts a `BlockTypeSize` to a `BlockType`.
    ///
    /// # Arguments
    /// * `btype` - The block type as a `BlockTypeSize`
    ///
    /// # Returns
    /// The corresponding `BlockType`, or `None` if the value names a kind that is
    /// not part of the default catalog.
    pub fn from_int(btype: BlockTypeSize) -> Option<Self> {
        num::FromPrimitive::from_u8(btype)
    }

    /// Looks up a block type by its lowercase configuration name.
    pub fn from_name(name: &str) -> Option<Self> {
        BLOCK_TYPE_NAMES.get(name).copied()
    }

    /// The catalog handle of this block type in the default catalog.
    pub fn id(self) -> BlockId {
        BlockId(self as BlockTypeSize)
    }
}

impl From<BlockType> for BlockId {
    fn from(block_type: BlockType) -> Self {
        block_type.id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_resolve_to_types() {
        assert_eq!(BlockType::from_name("grass"), Some(BlockType::GRASS));
        assert_eq!(BlockType::from_name("water"), Some(BlockType::WATER));
        assert_eq!(BlockType::from_name("bedrock"), None);
    }

    #[test]
    fn integers_round_trip_through_ids() {
        for raw in 0..8u8 {
            let block_type = BlockType::from_int(raw).unwrap();
            assert_eq!(block_type.id(), BlockId(raw));
        }
        assert_eq!(BlockType::from_int(200), None);
    }
}
