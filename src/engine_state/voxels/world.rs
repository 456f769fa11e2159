//! # World Module
//!
//! This module provides the `World` struct which manages a collection of chunks in the
//! voxel world. It serves as the central coordinator for chunk loading, unloading,
//! block access, and mesh rebuilding.
//!
//! ## Architecture
//!
//! The world uses a sparse storage approach where only chunks inside the
//! keep-window around the player are resident. Chunks are generated lazily
//! and exactly once per resident coordinate; a chunk's presence in the map
//! always implies a fully populated block grid.
//!
//! ## Streaming
//!
//! `update_chunks` runs once per simulation tick: it keeps a square window
//! of chunks resident around the player, rebuilds the mesh of every dirty
//! chunk in the window, and evicts everything outside after releasing its
//! mesh descriptor.
//!
//! ## Boundary behavior
//!
//! Reads into a non-resident chunk return air: an unloaded region behaves
//! as empty. This is a known streaming-boundary caveat, kept deliberately;
//! evicted chunks regenerate identically from the seed, so nothing is lost.

use std::collections::HashMap;

use cgmath::{Point2, Point3};
use log::{debug, info};

use crate::engine_state::config::WorldConfig;
use crate::engine_state::meshing;
use crate::engine_state::persistence::{ChunkSave, WorldSave};

use super::block::block_type::BlockType;
use super::chunk::{Chunk, CHUNK_DIMENSION};
use super::terrain::TerrainGenerator;

/// Chunk coordinates whose geometry changed or disappeared during a
/// streaming pass.
///
/// This is the whole signal surface toward the external renderer: "this
/// chunk's geometry changed" and "this chunk is gone". The descriptors
/// themselves stay owned by their chunks.
#[derive(Debug, Default)]
pub struct ChunkUpdates {
    /// Chunks whose mesh descriptor was rebuilt this pass.
    pub rebuilt: Vec<Point2<i32>>,
    /// Chunks that were evicted; their mesh descriptors are gone.
    pub removed: Vec<Point2<i32>>,
}

/// Represents a voxel world composed of streamed chunks.
///
/// The world owns the mapping from chunk coordinates to chunks, the
/// generation seed, and the terrain generator bound to that seed.
///
/// # Examples
///
/// ```
/// use voxel_world::engine_state::config::WorldConfig;
/// use voxel_world::engine_state::voxels::world::World;
///
/// let mut world = World::new(42, WorldConfig::default());
/// let updates = world.update_chunks(8.0, 8.0);
/// assert_eq!(updates.rebuilt.len(), world.chunks.len());
/// ```
pub struct World {
    /// A mapping from chunk coordinates to chunk data, one entry per
    /// generated coordinate.
    pub chunks: HashMap<Point2<i32>, Chunk>,
    /// The seed all terrain generation derives from.
    seed: u32,
    /// The terrain generator bound to `seed`.
    generator: TerrainGenerator,
    /// Streaming and generation parameters, immutable for the run.
    config: WorldConfig,
}

impl World {
    /// Creates a new, empty world bound to a generation seed.
    ///
    /// # Arguments
    /// * `seed` - The world seed controlling all terrain generation
    /// * `config` - Streaming and generation parameters
    ///
    /// # Returns
    /// A new `World` with no chunks resident.
    pub fn new(seed: u32, config: WorldConfig) -> Self {
        info!("Creating world with seed {}", seed);
        World {
            chunks: HashMap::new(),
            seed,
            generator: TerrainGenerator::new(seed, config.generation.clone()),
            config,
        }
    }

    /// The seed this world generates from.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// The terrain height of a world column, independent of residency.
    pub fn surface_height(&self, x: i32, z: i32) -> i32 {
        self.generator.height_at(x, z)
    }

    /// Returns the chunk at the given chunk coordinates, generating it
    /// first if it is not resident.
    ///
    /// Generation happens exactly once per coordinate while it stays
    /// resident; calling this again for an existing chunk just returns it.
    ///
    /// # Arguments
    /// * `position` - The chunk coordinates to look up
    ///
    /// # Returns
    /// A mutable reference to the resident chunk.
    pub fn get_or_create_chunk(&mut self, position: Point2<i32>) -> &mut Chunk {
        let generator = &self.generator;
        self.chunks.entry(position).or_insert_with(|| {
            debug!("Generating chunk at ({}, {})", position.x, position.y);
            generator.generate(position)
        })
    }

    /// Retrieves the chunk at the given chunk coordinates, if resident.
    pub fn get_chunk(&self, position: Point2<i32>) -> Option<&Chunk> {
        self.chunks.get(&position)
    }

    /// Translates one world-coordinate axis into (chunk coordinate, local
    /// coordinate) by floor division with the chunk dimension.
    fn split_coordinate(world: i32) -> (i32, i32) {
        (
            world.div_euclid(CHUNK_DIMENSION),
            world.rem_euclid(CHUNK_DIMENSION),
        )
    }

    /// Gets the block at the given world coordinates.
    ///
    /// # Arguments
    /// * `x`, `y`, `z` - World block coordinates
    ///
    /// # Returns
    /// The stored block type; air when the owning chunk is not resident or
    /// `y` is outside the vertical extent. Never fails.
    pub fn get_block(&self, x: i32, y: i32, z: i32) -> BlockType {
        let (chunk_x, local_x) = Self::split_coordinate(x);
        let (chunk_z, local_z) = Self::split_coordinate(z);
        match self.chunks.get(&Point2::new(chunk_x, chunk_z)) {
            Some(chunk) => chunk.get_block(local_x, y, local_z),
            // An unloaded region reads as empty.
            None => BlockType::AIR,
        }
    }

    /// Gets the block at the given world cell.
    pub fn get_block_at(&self, cell: Point3<i32>) -> BlockType {
        self.get_block(cell.x, cell.y, cell.z)
    }

    /// Sets the block at the given world coordinates.
    ///
    /// The owning chunk is created (and generated) lazily if absent. A write
    /// on a shared chunk border also marks the resident neighbor dirty, since
    /// the neighbor's mesh depends on the boundary cell it can no longer see
    /// unchanged; non-resident neighbors regenerate correctly from scratch
    /// and need no marking.
    ///
    /// # Arguments
    /// * `x`, `y`, `z` - World block coordinates
    /// * `block_type` - The block type to store
    pub fn set_block(&mut self, x: i32, y: i32, z: i32, block_type: BlockType) {
        let (chunk_x, local_x) = Self::split_coordinate(x);
        let (chunk_z, local_z) = Self::split_coordinate(z);

        let chunk = self.get_or_create_chunk(Point2::new(chunk_x, chunk_z));
        chunk.set_block(local_x, y, local_z, block_type);

        // A write outside the vertical extent was a no-op; it cannot have
        // changed any boundary visibility either.
        if !(0..super::chunk::CHUNK_HEIGHT).contains(&y) {
            return;
        }

        if local_x == 0 {
            self.mark_chunk_dirty(Point2::new(chunk_x - 1, chunk_z));
        }
        if local_x == CHUNK_DIMENSION - 1 {
            self.mark_chunk_dirty(Point2::new(chunk_x + 1, chunk_z));
        }
        if local_z == 0 {
            self.mark_chunk_dirty(Point2::new(chunk_x, chunk_z - 1));
        }
        if local_z == CHUNK_DIMENSION - 1 {
            self.mark_chunk_dirty(Point2::new(chunk_x, chunk_z + 1));
        }
    }

    /// Sets the block at the given world cell.
    pub fn set_block_at(&mut self, cell: Point3<i32>, block_type: BlockType) {
        self.set_block(cell.x, cell.y, cell.z, block_type);
    }

    /// Marks a chunk's mesh stale if the chunk is resident.
    fn mark_chunk_dirty(&mut self, position: Point2<i32>) {
        if let Some(chunk) = self.chunks.get_mut(&position) {
            chunk.mark_dirty();
        }
    }

    /// Streams chunks around the player and rebuilds stale meshes. Expected
    /// to run once per simulation tick.
    ///
    /// Every coordinate within the square window of half-width
    /// `render_distance` (inclusive, both axes) around the player's chunk is
    /// made resident; every dirty chunk in the window gets a fresh mesh; and
    /// every resident chunk outside the window releases its mesh and leaves
    /// the map.
    ///
    /// # Arguments
    /// * `player_x` - The player's world-space X position
    /// * `player_z` - The player's world-space Z position
    ///
    /// # Returns
    /// The coordinates rebuilt and removed this pass, for the renderer.
    pub fn update_chunks(&mut self, player_x: f32, player_z: f32) -> ChunkUpdates {
        let player_chunk_x = (player_x.floor() as i32).div_euclid(CHUNK_DIMENSION);
        let player_chunk_z = (player_z.floor() as i32).div_euclid(CHUNK_DIMENSION);
        let distance = self.config.render_distance;
        let mut updates = ChunkUpdates::default();

        // Release everything that fell out of the keep-window first, so the
        // rebuild pass below never meshes a chunk about to disappear.
        let evicted: Vec<Point2<i32>> = self
            .chunks
            .keys()
            .filter(|position| {
                (position.x - player_chunk_x).abs() > distance
                    || (position.y - player_chunk_z).abs() > distance
            })
            .copied()
            .collect();
        for position in evicted {
            if let Some(mut chunk) = self.chunks.remove(&position) {
                chunk.dispose_mesh();
                debug!("Unloaded chunk at ({}, {})", position.x, position.y);
                updates.removed.push(position);
            }
        }

        for chunk_z in (player_chunk_z - distance)..=(player_chunk_z + distance) {
            for chunk_x in (player_chunk_x - distance)..=(player_chunk_x + distance) {
                self.get_or_create_chunk(Point2::new(chunk_x, chunk_z));
            }
        }

        for chunk_z in (player_chunk_z - distance)..=(player_chunk_z + distance) {
            for chunk_x in (player_chunk_x - distance)..=(player_chunk_x + distance) {
                let position = Point2::new(chunk_x, chunk_z);
                let needs_rebuild = self
                    .chunks
                    .get(&position)
                    .map(Chunk::is_dirty)
                    .unwrap_or(false);
                if !needs_rebuild {
                    continue;
                }

                let mesh = meshing::build_chunk_mesh(self, position);
                if let Some(chunk) = self.chunks.get_mut(&position) {
                    chunk.install_mesh(mesh);
                    debug!("Rebuilt mesh for chunk ({}, {})", position.x, position.y);
                    updates.rebuilt.push(position);
                }
            }
        }

        updates
    }

    /// Snapshots the world into its persistence payload: the seed plus every
    /// resident chunk's block grid. Chunks are ordered by coordinate so the
    /// payload is stable across runs.
    pub fn to_save(&self) -> WorldSave {
        let mut chunks: Vec<ChunkSave> = self
            .chunks
            .values()
            .map(|chunk| ChunkSave {
                chunk_x: chunk.position.x,
                chunk_z: chunk.position.y,
                blocks: chunk.blocks().to_vec(),
            })
            .collect();
        chunks.sort_by_key(|chunk| (chunk.chunk_x, chunk.chunk_z));
        WorldSave {
            seed: self.seed,
            chunks,
        }
    }

    /// Replaces the world's state with a persisted snapshot.
    ///
    /// Re-seeds the generator, disposes and clears every resident chunk,
    /// then reconstructs each persisted chunk dirty so its mesh rebuilds on
    /// first touch. The payload must come from the validating decoder at the
    /// persistence boundary.
    ///
    /// # Arguments
    /// * `save` - The decoded persistence payload
    pub fn restore(&mut self, save: WorldSave) {
        for chunk in self.chunks.values_mut() {
            chunk.dispose_mesh();
        }
        self.chunks.clear();

        self.seed = save.seed;
        self.generator = TerrainGenerator::new(save.seed, self.config.generation.clone());

        for chunk_save in save.chunks {
            let position = Point2::new(chunk_save.chunk_x, chunk_save.chunk_z);
            self.chunks
                .insert(position, Chunk::from_blocks(position, chunk_save.blocks));
        }
        info!(
            "Restored world seed {} with {} chunks",
            self.seed,
            self.chunks.len()
        );
    }
}
