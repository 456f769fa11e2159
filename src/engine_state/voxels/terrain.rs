//! # Terrain Generation Module
//!
//! Deterministic procedural terrain: a fractal value-noise height field, a
//! layered column fill, and seeded per-column tree placement.
//!
//! ## Determinism
//!
//! The generator is a pure function of `(seed, column)`. Tree placement
//! draws from a PRNG seeded per column from the world seed and the column
//! coordinate, never from a shared random source, so identical seeds and
//! coordinates always yield identical columns no matter which chunk is
//! generated first. Chunk generation scans a margin of columns beyond its
//! own border so canopies rooted in a neighboring chunk materialize
//! identically on both sides of the boundary.

use cgmath::Point2;
use noise::{NoiseFn, Value};

use crate::engine_state::config::GenerationConfig;

use super::block::block_type::BlockType;
use super::chunk::{Chunk, CHUNK_DIMENSION, CHUNK_HEIGHT};

/// Shortest trunk produced by tree generation, in blocks.
const TREE_MIN_TRUNK: u32 = 4;
/// Number of distinct trunk heights above the minimum.
const TREE_TRUNK_RANGE: u32 = 3;
/// Squared distance threshold for the leaf cluster around the trunk top.
const LEAF_RADIUS_SQUARED: i32 = 6;
/// Horizontal reach of a canopy, in columns. Chunk generation scans this
/// many columns beyond its own border so trees rooted outside still drop
/// their leaves inside.
const TREE_MARGIN: i32 = 2;

/// Generates terrain columns and trees for chunks, bound to a world seed.
pub struct TerrainGenerator {
    seed: u32,
    noise: Value,
    config: GenerationConfig,
}

impl TerrainGenerator {
    /// Creates a generator bound to the given seed and noise parameters.
    ///
    /// # Arguments
    /// * `seed` - The world seed controlling all pseudo-random generation
    /// * `config` - Noise and structure parameters
    pub fn new(seed: u32, config: GenerationConfig) -> Self {
        TerrainGenerator {
            seed,
            noise: Value::new(seed),
            config,
        }
    }

    /// Computes the terrain height for a world column.
    ///
    /// Sums `octaves` layers of 2D value noise, each at frequency
    /// `frequency × lacunarity^i` with weight `persistence^i`, then maps the
    /// result through the base height and height multiplier. The result is
    /// clamped to be non-negative but may exceed `CHUNK_HEIGHT`; the column
    /// fill truncates to the chunk's vertical extent.
    ///
    /// # Arguments
    /// * `x` - World X coordinate of the column
    /// * `z` - World Z coordinate of the column
    ///
    /// # Returns
    /// The integer column height, ≥ 0.
    pub fn height_at(&self, x: i32, z: i32) -> i32 {
        let mut amplitude = 1.0;
        let mut frequency = self.config.frequency;
        let mut sum = 0.0;
        for _ in 0..self.config.octaves {
            sum += amplitude * self.noise.get([x as f64 * frequency, z as f64 * frequency]);
            amplitude *= self.config.persistence;
            frequency *= self.config.lacunarity;
        }
        let height = self.config.base_height + sum * self.config.height_multiplier;
        (height as i32).max(0)
    }

    /// The block stored at height `y` in a column whose surface height is
    /// `height`: a single grass cell on top, a thin dirt band under it, and
    /// stone all the way down. Cells at or above the surface stay air.
    pub fn column_block(y: i32, height: i32) -> BlockType {
        if y >= height {
            BlockType::AIR
        } else if y == height - 1 {
            BlockType::GRASS
        } else if y >= height - 4 {
            BlockType::DIRT
        } else {
            BlockType::STONE
        }
    }

    /// Generates the chunk at the given chunk coordinates.
    ///
    /// # Arguments
    /// * `position` - The chunk coordinates to generate
    ///
    /// # Returns
    /// A fully populated `Chunk`, marked dirty so its mesh builds on first
    /// touch.
    pub fn generate(&self, position: Point2<i32>) -> Chunk {
        let mut chunk = Chunk::empty(position);
        let base_x = position.x * CHUNK_DIMENSION;
        let base_z = position.y * CHUNK_DIMENSION;

        for z in 0..CHUNK_DIMENSION {
            for x in 0..CHUNK_DIMENSION {
                let height = self.height_at(base_x + x, base_z + z).min(CHUNK_HEIGHT);
                for y in 0..height {
                    chunk.set_block(x, y, z, Self::column_block(y, height));
                }
            }
        }

        // Trees rooted up to TREE_MARGIN columns outside this chunk can
        // still reach into it with their canopy, so the scan runs wider
        // than the chunk itself.
        for z in -TREE_MARGIN..CHUNK_DIMENSION + TREE_MARGIN {
            for x in -TREE_MARGIN..CHUNK_DIMENSION + TREE_MARGIN {
                let (world_x, world_z) = (base_x + x, base_z + z);
                if let Some(trunk_height) = self.tree_at(world_x, world_z) {
                    let surface = self.height_at(world_x, world_z);
                    Self::place_tree(&mut chunk, x, z, surface, trunk_height);
                }
            }
        }

        chunk
    }

    /// Decides whether a tree is rooted at the given world column and, if
    /// so, its trunk height. Pure function of the world seed and the column
    /// coordinate.
    fn tree_at(&self, x: i32, z: i32) -> Option<i32> {
        let height = self.height_at(x, z);
        if height < 1 || height >= CHUNK_HEIGHT {
            return None;
        }
        let mut rng = fastrand::Rng::with_seed(column_seed(self.seed, x, z));
        if rng.f64() >= self.config.tree_probability {
            return None;
        }
        Some((TREE_MIN_TRUNK + rng.u32(0..TREE_TRUNK_RANGE)) as i32)
    }

    /// Writes a tree into `chunk`.
    ///
    /// `x` and `z` are chunk-local column coordinates and may lie outside
    /// `[0, CHUNK_DIMENSION)` when the trunk is rooted in a neighboring
    /// chunk; only the cells that land inside this chunk are written, which
    /// the chunk's bounded `set_block` already guarantees.
    fn place_tree(chunk: &mut Chunk, x: i32, z: i32, surface: i32, trunk_height: i32) {
        for y in surface..surface + trunk_height {
            chunk.set_block(x, y, z, BlockType::WOOD);
        }

        let top = surface + trunk_height - 1;
        for dy in -2..=2 {
            for dz in -2..=2 {
                for dx in -2i32..=2 {
                    if dx * dx + dy * dy + dz * dz > LEAF_RADIUS_SQUARED {
                        continue;
                    }
                    // The trunk's own column stays wood up to the canopy top.
                    if dx == 0 && dz == 0 && dy <= 0 {
                        continue;
                    }
                    let (leaf_x, leaf_y, leaf_z) = (x + dx, top + dy, z + dz);
                    if chunk.get_block(leaf_x, leaf_y, leaf_z) == BlockType::AIR {
                        chunk.set_block(leaf_x, leaf_y, leaf_z, BlockType::LEAVES);
                    }
                }
            }
        }
    }
}

/// Derives the per-column PRNG seed from the world seed and the column
/// coordinate, with splitmix-style avalanching so neighboring columns do
/// not draw correlated values.
fn column_seed(seed: u32, x: i32, z: i32) -> u64 {
    let mut h = (seed as u64) ^ ((x as u32 as u64) << 32) ^ (z as u32 as u64);
    h = h.wrapping_add(0x9E3779B97F4A7C15);
    h ^= h >> 30;
    h = h.wrapping_mul(0xBF58476D1CE4E5B9);
    h ^= h >> 27;
    h = h.wrapping_mul(0x94D049BB133111EB);
    h ^ (h >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::chunk::CHUNK_VOLUME;

    fn generator(seed: u32) -> TerrainGenerator {
        TerrainGenerator::new(seed, GenerationConfig::default())
    }

    #[test]
    fn column_profile_matches_the_reference_banding() {
        for y in 0..=15 {
            assert_eq!(TerrainGenerator::column_block(y, 20), BlockType::STONE);
        }
        for y in 16..=18 {
            assert_eq!(TerrainGenerator::column_block(y, 20), BlockType::DIRT);
        }
        assert_eq!(TerrainGenerator::column_block(19, 20), BlockType::GRASS);
        for y in 20..CHUNK_HEIGHT {
            assert_eq!(TerrainGenerator::column_block(y, 20), BlockType::AIR);
        }
    }

    #[test]
    fn heights_are_never_negative() {
        let sunken = TerrainGenerator::new(
            1,
            GenerationConfig {
                base_height: -100.0,
                ..GenerationConfig::default()
            },
        );
        for x in -8..8 {
            assert_eq!(sunken.height_at(x * 31, -x * 17), 0);
        }
    }

    #[test]
    fn identical_arguments_yield_identical_heights() {
        let first = generator(42);
        let second = generator(42);
        for (x, z) in [(0, 0), (10, -7), (-1000, 345), (83, 83)] {
            assert_eq!(first.height_at(x, z), second.height_at(x, z));
            assert_eq!(first.height_at(x, z), first.height_at(x, z));
        }
    }

    #[test]
    fn identical_seeds_regenerate_identical_chunks() {
        let first = generator(42);
        let second = generator(42);
        for position in [Point2::new(0, 0), Point2::new(3, -2), Point2::new(-5, 7)] {
            let a = first.generate(position);
            let b = second.generate(position);
            assert_eq!(a.blocks(), b.blocks());
            assert_eq!(a.blocks().len(), CHUNK_VOLUME as usize);
        }
    }

    #[test]
    fn tree_decisions_are_deterministic_per_column() {
        let gen = generator(7);
        for x in -20..20 {
            assert_eq!(gen.tree_at(x, -x * 3), gen.tree_at(x, -x * 3));
        }
    }

    #[test]
    fn placed_trees_have_a_trunk_and_a_canopy() {
        let mut chunk = Chunk::empty(Point2::new(0, 0));
        TerrainGenerator::place_tree(&mut chunk, 8, 8, 10, 4);

        // Trunk occupies the surface column up to the canopy top.
        for y in 10..14 {
            assert_eq!(chunk.get_block(8, y, 8), BlockType::WOOD);
        }
        // Leaves cap the trunk and ring the top without replacing it.
        assert_eq!(chunk.get_block(8, 14, 8), BlockType::LEAVES);
        assert_eq!(chunk.get_block(9, 13, 8), BlockType::LEAVES);
        assert_eq!(chunk.get_block(8, 13, 7), BlockType::LEAVES);
        assert_eq!(chunk.get_block(8, 13, 8), BlockType::WOOD);
        // Outside the distance threshold stays air.
        assert_eq!(chunk.get_block(10, 15, 10), BlockType::AIR);
    }

    #[test]
    fn canopies_spill_across_the_chunk_border() {
        let mut chunk = Chunk::empty(Point2::new(0, 0));
        // Rooted one column outside the chunk; only the spill-over lands.
        TerrainGenerator::place_tree(&mut chunk, -1, 8, 10, 4);

        assert_eq!(chunk.get_block(0, 13, 8), BlockType::LEAVES);
        // The trunk column itself is out of bounds and was dropped.
        for y in 0..CHUNK_HEIGHT {
            assert_ne!(chunk.get_block(0, y, 8), BlockType::WOOD);
        }
    }
}
