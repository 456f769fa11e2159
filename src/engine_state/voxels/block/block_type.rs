//! # Block Type Module
//!
//! This module defines the different types of blocks in the voxel world.
//! It provides functionality for block type identification and conversion
//! between the compact tag representation and the rich enum type.

use num_derive::FromPrimitive;

use super::{BlockProperties, BlockTypeSize, BLOCK_TYPE_PROPERTIES};

/// Enumerates all possible block types in the voxel world.
///
/// Each variant is a small integer tag with an entry in the static property
/// table. The `FromPrimitive` derive allows conversion from integers, which
/// is how persisted block grids are decoded back into typed blocks.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive)]
pub enum BlockType {
    /// An air block, which is non-solid and transparent.
    /// Acts as the "empty" sentinel everywhere in the world.
    AIR,

    /// A grass block with a bright green top and a plain dirt bottom.
    GRASS,

    /// A basic dirt block, the band just under the surface.
    DIRT,

    /// A stone block, the bulk of every terrain column.
    STONE,

    /// A wooden trunk block placed by tree generation.
    WOOD,

    /// A leaf block forming tree canopies.
    LEAVES,
}

impl BlockType {
    /// Converts a `BlockTypeSize` tag to a `BlockType`.
    ///
    /// This is typically used when reading block data out of the compact
    /// grid storage. An unknown tag degrades to `AIR` rather than failing,
    /// so a read never halts the simulation tick; persisted payloads are
    /// validated separately at the deserialization boundary.
    ///
    /// # Arguments
    /// * `btype` - The block type as a `BlockTypeSize`
    ///
    /// # Returns
    /// The corresponding `BlockType`, or `AIR` for an unknown tag.
    pub fn get_block_type_from_int(btype: BlockTypeSize) -> Self {
        let btype_option: Option<BlockType> = num::FromPrimitive::from_u8(btype);
        btype_option.unwrap_or(BlockType::AIR)
    }

    /// Gets the static properties shared by all blocks of this type.
    ///
    /// # Returns
    /// A reference into the compile-time property table.
    pub fn properties(&self) -> &'static BlockProperties {
        &BLOCK_TYPE_PROPERTIES[*self as usize]
    }

    /// Whether a body or a ray is stopped by this block type.
    pub fn is_solid(&self) -> bool {
        self.properties().solid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn air_is_the_empty_sentinel() {
        assert!(!BlockType::AIR.is_solid());
        assert!(BlockType::AIR.properties().transparent);
    }

    #[test]
    fn tags_roundtrip_through_integers() {
        for block_type in [
            BlockType::AIR,
            BlockType::GRASS,
            BlockType::DIRT,
            BlockType::STONE,
            BlockType::WOOD,
            BlockType::LEAVES,
        ] {
            let tag = block_type as BlockTypeSize;
            assert_eq!(BlockType::get_block_type_from_int(tag), block_type);
        }
    }

    #[test]
    fn unknown_tags_degrade_to_air() {
        assert_eq!(BlockType::get_block_type_from_int(99), BlockType::AIR);
    }

    #[test]
    fn grass_has_distinct_top_and_bottom() {
        let properties = BlockType::GRASS.properties();
        assert!(properties.top_color.is_some());
        assert!(properties.bottom_color.is_some());
        assert_ne!(properties.top_color, Some(properties.color));
    }
}
