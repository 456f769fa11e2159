//! # Persistence Module
//!
//! Pure serialize/deserialize transforms between live world/player state and
//! the blob payloads an external key-value store keeps. The core performs no
//! I/O: callers hand bytes in and get bytes out.
//!
//! Malformed payloads are the one place the core fails loudly. Anything that
//! does not decode into a structurally valid payload (broken JSON, a block
//! grid of the wrong length, an unknown block tag) raises a `SaveError`
//! here, and the caller is expected to fall back to generating a fresh world
//! rather than asking the core to repair the data.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::player::Player;
use super::voxels::block::block_type::BlockType;
use super::voxels::chunk::CHUNK_VOLUME;
use super::voxels::world::World;

/// Errors raised when a persisted payload cannot be decoded.
#[derive(Debug, Error)]
pub enum SaveError {
    /// The payload is not structurally valid JSON for the expected shape.
    #[error("malformed save payload: {0}")]
    Malformed(#[from] serde_json::Error),

    /// A chunk's block grid does not have exactly `CHUNK_VOLUME` entries.
    #[error("chunk ({chunk_x}, {chunk_z}) grid has {found} blocks, expected {expected}")]
    GridSize {
        /// X coordinate of the offending chunk.
        chunk_x: i32,
        /// Z coordinate of the offending chunk.
        chunk_z: i32,
        /// The required grid length.
        expected: usize,
        /// The length actually found.
        found: usize,
    },

    /// A block tag does not correspond to any known block type.
    #[error("unknown block tag {0}")]
    UnknownBlock(u8),
}

/// The persisted form of a single chunk: its coordinates and its flat
/// block-tag grid of length `CHUNK_VOLUME`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkSave {
    /// The chunk's X coordinate in chunk space.
    pub chunk_x: i32,
    /// The chunk's Z coordinate in chunk space.
    pub chunk_z: i32,
    /// The flat block-tag grid.
    pub blocks: Vec<u8>,
}

/// The persisted form of a world: the seed plus every resident chunk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldSave {
    /// The generation seed.
    pub seed: u32,
    /// Every chunk that was resident at snapshot time.
    pub chunks: Vec<ChunkSave>,
}

/// The persisted form of the player's kinematic state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSave {
    /// World-space foot position.
    pub position: [f64; 3],
    /// Vertical view angle in radians.
    pub pitch: f64,
    /// Horizontal view angle in radians.
    pub yaw: f64,
    /// The selected block tag.
    pub selected_block: u8,
    /// Whether fly mode was active.
    pub is_flying: bool,
}

/// Encodes a world snapshot into its persistence blob.
///
/// # Arguments
/// * `world` - The world to snapshot
///
/// # Returns
/// The serialized payload bytes.
pub fn encode_world(world: &World) -> Result<Vec<u8>, SaveError> {
    Ok(serde_json::to_vec(&world.to_save())?)
}

/// Decodes and validates a world persistence blob.
///
/// Every chunk grid must be exactly `CHUNK_VOLUME` tags long and every tag
/// must name a known block type; anything else is a data-format error.
///
/// # Arguments
/// * `bytes` - The payload bytes from the external store
///
/// # Returns
/// The validated payload, ready for `World::restore`.
pub fn decode_world(bytes: &[u8]) -> Result<WorldSave, SaveError> {
    let save: WorldSave = serde_json::from_slice(bytes)?;
    for chunk in &save.chunks {
        if chunk.blocks.len() != CHUNK_VOLUME as usize {
            return Err(SaveError::GridSize {
                chunk_x: chunk.chunk_x,
                chunk_z: chunk.chunk_z,
                expected: CHUNK_VOLUME as usize,
                found: chunk.blocks.len(),
            });
        }
        for &tag in &chunk.blocks {
            validate_tag(tag)?;
        }
    }
    Ok(save)
}

/// Encodes a player snapshot into its persistence blob.
pub fn encode_player(player: &Player) -> Result<Vec<u8>, SaveError> {
    Ok(serde_json::to_vec(&player.to_save())?)
}

/// Decodes and validates a player persistence blob.
pub fn decode_player(bytes: &[u8]) -> Result<PlayerSave, SaveError> {
    let save: PlayerSave = serde_json::from_slice(bytes)?;
    validate_tag(save.selected_block)?;
    Ok(save)
}

/// Checks that a tag names a known block type.
fn validate_tag(tag: u8) -> Result<(), SaveError> {
    let block_type: Option<BlockType> = num::FromPrimitive::from_u8(tag);
    match block_type {
        Some(_) => Ok(()),
        None => Err(SaveError::UnknownBlock(tag)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::config::{BodyConfig, GenerationConfig, WorldConfig};
    use cgmath::Point3;

    fn small_world(seed: u32) -> World {
        let mut world = World::new(
            seed,
            WorldConfig {
                render_distance: 1,
                generation: GenerationConfig::default(),
            },
        );
        world.update_chunks(8.0, 8.0);
        world
    }

    #[test]
    fn world_payloads_roundtrip_byte_identically() {
        let mut world = small_world(42);
        world.set_block(4, 25, 4, BlockType::WOOD);

        let bytes = encode_world(&world).unwrap();
        let save = decode_world(&bytes).unwrap();

        let mut restored = World::new(
            0,
            WorldConfig {
                render_distance: 1,
                generation: GenerationConfig::default(),
            },
        );
        restored.restore(save);

        assert_eq!(restored.seed(), 42);
        for (position, chunk) in &world.chunks {
            assert_eq!(
                restored.get_chunk(*position).unwrap().blocks(),
                chunk.blocks()
            );
        }
    }

    #[test]
    fn broken_json_is_a_malformed_error() {
        assert!(matches!(
            decode_world(b"definitely not json"),
            Err(SaveError::Malformed(_))
        ));
    }

    #[test]
    fn short_grids_are_rejected() {
        let payload = serde_json::to_vec(&WorldSave {
            seed: 1,
            chunks: vec![ChunkSave {
                chunk_x: 0,
                chunk_z: 0,
                blocks: vec![0; 10],
            }],
        })
        .unwrap();

        assert!(matches!(
            decode_world(&payload),
            Err(SaveError::GridSize { found: 10, .. })
        ));
    }

    #[test]
    fn unknown_tags_are_rejected() {
        let payload = serde_json::to_vec(&WorldSave {
            seed: 1,
            chunks: vec![ChunkSave {
                chunk_x: 0,
                chunk_z: 0,
                blocks: vec![99; CHUNK_VOLUME as usize],
            }],
        })
        .unwrap();

        assert!(matches!(
            decode_world(&payload),
            Err(SaveError::UnknownBlock(99))
        ));
    }

    #[test]
    fn player_payloads_roundtrip() {
        let mut player = Player::new(Point3::new(8.5, 21.0, 8.5), BodyConfig::default());
        player.selected_block = BlockType::STONE;
        player.flying = true;

        let bytes = encode_player(&player).unwrap();
        let save = decode_player(&bytes).unwrap();
        assert_eq!(save, player.to_save());
        assert_eq!(save.selected_block, BlockType::STONE as u8);
        assert!(save.is_flying);
    }

    #[test]
    fn player_payloads_with_unknown_selection_are_rejected() {
        let payload = serde_json::to_vec(&PlayerSave {
            position: [0.0, 0.0, 0.0],
            pitch: 0.0,
            yaw: 0.0,
            selected_block: 200,
            is_flying: false,
        })
        .unwrap();

        assert!(matches!(
            decode_player(&payload),
            Err(SaveError::UnknownBlock(200))
        ));
    }
}
