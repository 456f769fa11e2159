//! # Chunk Module
//!
//! This module provides the `Chunk` struct and related functionality for managing
//! 16x64x16 columns of voxel data. A chunk is the unit of terrain generation,
//! mesh rebuilding, streaming, and persistence.
//!
//! ## Storage
//!
//! Blocks are stored as a dense array of `BlockTypeSize` tags in row-major
//! order (x, then z, then y). The dense layout keeps reads and writes O(1)
//! and lets persistence treat the whole grid as a flat byte array.
//!
//! ## Bounded access
//!
//! Chunk access never fails: reads outside the local bounds return `AIR`,
//! and writes outside the local bounds are silently ignored. This keeps the
//! simulation tick free of fatal faults no matter what coordinates reach it.
//!
//! ## Dirtiness and mesh ownership
//!
//! Every mutation sets the chunk's dirty flag; the flag only clears when a
//! freshly built mesh descriptor is installed. The chunk owns at most one
//! descriptor at a time, and the previous one is released before a
//! replacement takes its place.

use cgmath::Point2;

use crate::engine_state::meshing::ChunkMesh;

use super::block::block_type::BlockType;
use super::block::BlockTypeSize;

/// The horizontal dimension (width and depth) of a chunk in blocks.
pub const CHUNK_DIMENSION: i32 = 16;
/// The vertical extent of a chunk in blocks.
pub const CHUNK_HEIGHT: i32 = 64;
/// The number of blocks in a single horizontal plane of a chunk (CHUNK_DIMENSION²).
pub const CHUNK_PLANE_SIZE: i32 = CHUNK_DIMENSION * CHUNK_DIMENSION;
/// The total number of blocks in a chunk (CHUNK_DIMENSION² × CHUNK_HEIGHT).
pub const CHUNK_VOLUME: i32 = CHUNK_PLANE_SIZE * CHUNK_HEIGHT;

/// Represents a 16x64x16 column of voxel blocks in the world.
///
/// Chunks are the fundamental unit of world data. Each chunk maintains its
/// position in chunk coordinates, its dense block grid, a dirty flag marking
/// the mesh stale, and the current mesh descriptor if one has been built.
pub struct Chunk {
    /// The position of this chunk in chunk coordinates (not block coordinates).
    pub position: Point2<i32>,

    /// The dense block-tag grid, indexed x-major within each plane and
    /// plane-major by y. Always exactly `CHUNK_VOLUME` entries long.
    blocks: Vec<BlockTypeSize>,

    /// True while the block data is newer than the last-built mesh.
    dirty: bool,

    /// The chunk's current mesh descriptor, if one has been built.
    mesh: Option<ChunkMesh>,
}

impl Chunk {
    /// Creates a new, completely empty chunk (all blocks are air).
    ///
    /// The chunk starts dirty so its (empty) mesh is built on first touch.
    ///
    /// # Arguments
    /// * `position` - The chunk coordinates of the new chunk
    ///
    /// # Returns
    /// A new `Chunk` instance filled with air blocks.
    pub fn empty(position: Point2<i32>) -> Self {
        Chunk {
            position,
            blocks: vec![BlockType::AIR as BlockTypeSize; CHUNK_VOLUME as usize],
            dirty: true,
            mesh: None,
        }
    }

    /// Creates a new chunk completely filled with the given block type
    /// (for testing).
    ///
    /// # Arguments
    /// * `position` - The chunk coordinates of the new chunk
    /// * `block_type` - The block type to fill the chunk with
    ///
    /// # Returns
    /// A new `Chunk` completely filled with `block_type`.
    #[allow(dead_code)]
    pub fn solid(position: Point2<i32>, block_type: BlockType) -> Self {
        Chunk {
            position,
            blocks: vec![block_type as BlockTypeSize; CHUNK_VOLUME as usize],
            dirty: true,
            mesh: None,
        }
    }

    /// Reconstructs a chunk from a persisted block grid.
    ///
    /// The grid must already be length-validated (the persistence boundary
    /// does this); the chunk is marked dirty so its mesh rebuilds on first
    /// touch.
    ///
    /// # Arguments
    /// * `position` - The chunk coordinates of the restored chunk
    /// * `blocks` - The flat block-tag grid of length `CHUNK_VOLUME`
    pub fn from_blocks(position: Point2<i32>, blocks: Vec<BlockTypeSize>) -> Self {
        Chunk {
            position,
            blocks,
            dirty: true,
            mesh: None,
        }
    }

    /// Flat index of a local coordinate. Callers must bounds-check first.
    fn index(x: i32, y: i32, z: i32) -> usize {
        (x + z * CHUNK_DIMENSION + y * CHUNK_PLANE_SIZE) as usize
    }

    /// Whether a local coordinate lies inside the chunk.
    pub fn in_bounds(x: i32, y: i32, z: i32) -> bool {
        (0..CHUNK_DIMENSION).contains(&x)
            && (0..CHUNK_HEIGHT).contains(&y)
            && (0..CHUNK_DIMENSION).contains(&z)
    }

    /// Gets the block at the specified chunk-local coordinates.
    ///
    /// # Arguments
    /// * `x` - X coordinate within the chunk (0..CHUNK_DIMENSION)
    /// * `y` - Y coordinate within the chunk (0..CHUNK_HEIGHT)
    /// * `z` - Z coordinate within the chunk (0..CHUNK_DIMENSION)
    ///
    /// # Returns
    /// The stored block type, or `AIR` when the coordinates are out of the
    /// chunk's local bounds. Never fails.
    pub fn get_block(&self, x: i32, y: i32, z: i32) -> BlockType {
        if !Self::in_bounds(x, y, z) {
            return BlockType::AIR;
        }
        BlockType::get_block_type_from_int(self.blocks[Self::index(x, y, z)])
    }

    /// Sets the block at the specified chunk-local coordinates.
    ///
    /// Out-of-bounds writes are silent no-ops. An in-bounds write stores the
    /// tag and marks the chunk dirty until the next mesh rebuild.
    ///
    /// # Arguments
    /// * `x` - X coordinate within the chunk
    /// * `y` - Y coordinate within the chunk
    /// * `z` - Z coordinate within the chunk
    /// * `block_type` - The block type to store
    pub fn set_block(&mut self, x: i32, y: i32, z: i32, block_type: BlockType) {
        if !Self::in_bounds(x, y, z) {
            return;
        }
        self.blocks[Self::index(x, y, z)] = block_type as BlockTypeSize;
        self.dirty = true;
    }

    /// Whether the block data has changed since the last mesh rebuild.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Marks the chunk's mesh stale.
    ///
    /// Used by the world when a neighboring chunk's border write changes
    /// this chunk's shared-boundary visibility.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// A read-only view of the flat block-tag grid, for persistence.
    pub fn blocks(&self) -> &[BlockTypeSize] {
        &self.blocks
    }

    /// Installs a freshly built mesh descriptor and clears the dirty flag.
    ///
    /// The previous descriptor (if any) is released before the replacement
    /// takes its place, so the external renderer never sees two descriptors
    /// for one chunk. The flag clears even when the new mesh is empty, e.g.
    /// for an all-air chunk.
    ///
    /// # Arguments
    /// * `mesh` - The newly built mesh descriptor
    pub fn install_mesh(&mut self, mesh: ChunkMesh) {
        self.mesh = None;
        self.mesh = Some(mesh);
        self.dirty = false;
    }

    /// Releases the chunk's mesh descriptor, if one exists.
    ///
    /// Must run before the chunk leaves the world so the renderer's
    /// resources are not leaked behind an unreachable chunk.
    pub fn dispose_mesh(&mut self) {
        self.mesh = None;
    }

    /// The chunk's current mesh descriptor, if one has been built.
    pub fn mesh(&self) -> Option<&ChunkMesh> {
        self.mesh.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_get_returns_the_written_tag() {
        let mut chunk = Chunk::empty(Point2::new(0, 0));
        let samples = [
            (0, 0, 0, BlockType::STONE),
            (15, 63, 15, BlockType::GRASS),
            (7, 30, 9, BlockType::WOOD),
            (0, 63, 15, BlockType::LEAVES),
            (15, 0, 0, BlockType::DIRT),
        ];
        for (x, y, z, block_type) in samples {
            chunk.set_block(x, y, z, block_type);
            assert_eq!(chunk.get_block(x, y, z), block_type);
        }
    }

    #[test]
    fn out_of_range_reads_are_air() {
        let chunk = Chunk::solid(Point2::new(0, 0), BlockType::STONE);
        for (x, y, z) in [
            (-1, 0, 0),
            (16, 0, 0),
            (0, -1, 0),
            (0, 64, 0),
            (0, 0, -1),
            (0, 0, 16),
        ] {
            assert_eq!(chunk.get_block(x, y, z), BlockType::AIR);
        }
    }

    #[test]
    fn out_of_range_writes_are_ignored() {
        let mut chunk = Chunk::empty(Point2::new(0, 0));
        chunk.install_mesh(ChunkMesh::default());
        chunk.set_block(0, 64, 0, BlockType::STONE);
        chunk.set_block(-1, 10, 0, BlockType::STONE);
        chunk.set_block(3, 10, 16, BlockType::STONE);
        assert!(!chunk.is_dirty());
        assert!(chunk.blocks().iter().all(|&tag| tag == BlockType::AIR as u8));
    }

    #[test]
    fn writes_mark_dirty_until_a_rebuild() {
        let mut chunk = Chunk::empty(Point2::new(2, -3));
        assert!(chunk.is_dirty());

        chunk.install_mesh(ChunkMesh::default());
        assert!(!chunk.is_dirty());

        chunk.set_block(1, 2, 3, BlockType::DIRT);
        assert!(chunk.is_dirty());

        chunk.install_mesh(ChunkMesh::default());
        assert!(!chunk.is_dirty());
    }

    #[test]
    fn restored_chunks_start_dirty_with_the_persisted_grid() {
        let mut original = Chunk::empty(Point2::new(1, 1));
        original.set_block(4, 20, 11, BlockType::WOOD);

        let restored = Chunk::from_blocks(Point2::new(1, 1), original.blocks().to_vec());
        assert!(restored.is_dirty());
        assert_eq!(restored.blocks(), original.blocks());
        assert_eq!(restored.get_block(4, 20, 11), BlockType::WOOD);
    }
}
