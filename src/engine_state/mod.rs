//! # Engine State Module
//!
//! The core coordinator of the simulation: it owns the streamed world and
//! the player, and runs the per-tick sequence that ties them together.
//!
//! ## Architecture
//!
//! Each subsystem owns a specific aspect of the simulation. `EngineState`
//! coordinates them in a fixed order every tick: intent intake, player
//! kinematics, block edits, then chunk streaming and mesh rebuilding. The
//! model is single-threaded and single-writer: one `update` call per tick
//! touches all world state in sequence, so no locking exists anywhere in
//! the core.
//!
//! ## External collaborators
//!
//! * The renderer consumes mesh descriptors and the `ChunkUpdates` change
//!   report; the core never holds a GPU resource.
//! * The persistence store consumes and produces the blob payloads in
//!   `persistence`; the core performs no I/O.
//! * The input layer decodes raw devices into one `PlayerAction` per tick;
//!   the core never reads a device.

pub mod config;
pub mod meshing;
pub mod persistence;
pub mod player;
pub mod voxels;

use cgmath::Point3;

use config::{BodyConfig, WorldConfig};
use player::Player;
use voxels::block::block_type::BlockType;
use voxels::world::{ChunkUpdates, World};

/// Decoded player intents for one simulation tick.
///
/// An external input collaborator produces one of these per tick from raw
/// device events and passes it by value into `EngineState::update`; the
/// core itself never listens to devices.
#[derive(Debug, Default, Clone)]
pub struct PlayerAction {
    /// Forward/backward movement axis in [-1, 1]; positive is forward.
    pub move_forward: f32,
    /// Strafe movement axis in [-1, 1]; positive is to the right.
    pub move_strafe: f32,
    /// Jump while grounded, or ascend while flying.
    pub jump: bool,
    /// Descend while flying.
    pub fly_down: bool,
    /// Scale horizontal movement by the sprint multiplier.
    pub sprint: bool,
    /// Edge-triggered toggle of fly mode.
    pub toggle_fly: bool,
    /// Break the block under the crosshair.
    pub break_block: bool,
    /// Place the selected block at the targeted anchor cell.
    pub place_block: bool,
    /// Newly selected block type, if the selection changed this tick.
    pub select_block: Option<BlockType>,
    /// Accumulated look delta (x, y) since the previous tick.
    pub rotate_view: Option<(f64, f64)>,
}

/// The main state container for the voxel simulation core.
///
/// Owns the world and the player and advances both once per tick.
///
/// # Examples
///
/// ```no_run
/// use voxel_world::engine_state::{EngineState, PlayerAction};
///
/// let mut engine = EngineState::new(42);
/// let actions = PlayerAction {
///     move_forward: 1.0,
///     ..PlayerAction::default()
/// };
/// let updates = engine.update(&actions, 1.0 / 60.0);
/// for position in &updates.rebuilt {
///     // Hand the rebuilt chunk's mesh descriptor to the renderer.
///     let _mesh = engine.world.get_chunk(*position).unwrap().mesh();
/// }
/// ```
pub struct EngineState {
    /// The streamed voxel world.
    pub world: World,
    /// The first-person kinematic body.
    pub player: Player,
}

impl EngineState {
    /// Creates an engine with the reference configuration, spawning the
    /// player on the terrain surface near the world origin.
    ///
    /// # Arguments
    /// * `seed` - The world seed controlling all terrain generation
    pub fn new(seed: u32) -> Self {
        Self::with_config(seed, WorldConfig::default(), BodyConfig::default())
    }

    /// Creates an engine with explicit configuration.
    ///
    /// # Arguments
    /// * `seed` - The world seed controlling all terrain generation
    /// * `world_config` - Streaming and generation parameters
    /// * `body_config` - Body and motion parameters
    pub fn with_config(seed: u32, world_config: WorldConfig, body_config: BodyConfig) -> Self {
        let world = World::new(seed, world_config);
        let spawn_height = world.surface_height(8, 8) as f32;
        let player = Player::new(Point3::new(8.5, spawn_height, 8.5), body_config);
        EngineState { world, player }
    }

    /// Advances the simulation one tick.
    ///
    /// The order is fixed: look and mode intents first, then kinematics
    /// against the current grid, then block edits, then chunk streaming and
    /// mesh rebuilding around the player's new position.
    ///
    /// # Arguments
    /// * `actions` - This tick's decoded intents
    /// * `dt` - Tick duration in seconds
    ///
    /// # Returns
    /// The chunk coordinates whose geometry changed or disappeared, for the
    /// external renderer.
    pub fn update(&mut self, actions: &PlayerAction, dt: f32) -> ChunkUpdates {
        if let Some(delta) = actions.rotate_view {
            self.player.apply_look(delta);
        }
        if actions.toggle_fly {
            self.player.flying = !self.player.flying;
            self.player.vertical_velocity = 0.0;
        }
        if let Some(block_type) = actions.select_block {
            self.player.selected_block = block_type;
        }

        self.player.update_movement(&self.world, actions, dt);
        self.apply_block_edits(actions);

        self.world
            .update_chunks(self.player.position.x, self.player.position.z)
    }

    /// Applies this tick's break/place triggers through the crosshair ray.
    fn apply_block_edits(&mut self, actions: &PlayerAction) {
        if actions.break_block {
            if let Some(hit) = self.player.target_block(&self.world) {
                self.world.set_block_at(hit.block, BlockType::AIR);
            }
        }
        if actions.place_block {
            if let Some(hit) = self.player.target_block(&self.world) {
                // Placing into the body's own volume would trap the player;
                // such placements are silently rejected.
                if !self.player.intersects_cell(hit.adjacent) {
                    self.world
                        .set_block_at(hit.adjacent, self.player.selected_block);
                }
            }
        }
    }
}
