//! # Block Module
//!
//! This module provides the core block-related functionality for the voxel
//! world. It includes block type definitions, block face handling, and the
//! static property table consulted by meshing and collision.

pub mod block_side;
pub mod block_type;

/// The underlying integer type used to represent block types in memory.
/// This is used for efficient storage and serialization of block data.
pub type BlockTypeSize = u8;

/// Static properties shared by every block of a given type.
///
/// Properties are data, not behavior: block types carry no dispatch of their
/// own, and every consumer (meshing, collision, persistence) reads this table
/// through `BlockType::properties`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockProperties {
    /// Human-readable display name.
    pub name: &'static str,
    /// Whether bodies and rays are stopped by this block.
    pub solid: bool,
    /// Whether the block lets light through.
    pub transparent: bool,
    /// Flat per-vertex color applied to the block's faces.
    pub color: [f32; 3],
    /// Color override for the top face, if it differs from the sides.
    pub top_color: Option<[f32; 3]>,
    /// Color override for the bottom face, if it differs from the sides.
    pub bottom_color: Option<[f32; 3]>,
}

/// Maps each block type to its static properties.
///
/// The array is indexed by `BlockType` as a `usize`, so the entry order must
/// match the enum's variant order: [AIR, GRASS, DIRT, STONE, WOOD, LEAVES].
pub static BLOCK_TYPE_PROPERTIES: [BlockProperties; 6] = [
    BlockProperties {
        name: "Air",
        solid: false,
        transparent: true,
        color: [0.0, 0.0, 0.0],
        top_color: None,
        bottom_color: None,
    },
    BlockProperties {
        name: "Grass",
        solid: true,
        transparent: false,
        color: [0.36, 0.50, 0.23],
        top_color: Some([0.30, 0.62, 0.22]),
        bottom_color: Some([0.45, 0.33, 0.22]),
    },
    BlockProperties {
        name: "Dirt",
        solid: true,
        transparent: false,
        color: [0.45, 0.33, 0.22],
        top_color: None,
        bottom_color: None,
    },
    BlockProperties {
        name: "Stone",
        solid: true,
        transparent: false,
        color: [0.52, 0.52, 0.52],
        top_color: None,
        bottom_color: None,
    },
    BlockProperties {
        name: "Wood",
        solid: true,
        transparent: false,
        color: [0.42, 0.31, 0.17],
        top_color: Some([0.48, 0.37, 0.21]),
        bottom_color: Some([0.48, 0.37, 0.21]),
    },
    BlockProperties {
        name: "Leaves",
        solid: true,
        transparent: true,
        color: [0.20, 0.46, 0.15],
        top_color: None,
        bottom_color: None,
    },
];
