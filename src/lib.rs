#![warn(missing_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel World
//!
//! A real-time, chunk-streamed voxel world simulation core.
//!
//! This crate owns the hard core of a voxel game: the dense block grid, the
//! incremental face-culled mesh rebuilding with cross-chunk dirty
//! propagation, deterministic procedural terrain generation, and discrete
//! collision resolution for a first-person kinematic body. It deliberately
//! owns nothing else; rendering, persistence I/O, UI, and raw input are
//! external collaborators talking to the core through plain data:
//!
//! * the renderer consumes mesh descriptors and per-tick change reports,
//! * the store consumes and produces serialized world/player payloads,
//! * the input layer supplies one decoded intent record per tick.
//!
//! ## Key Modules
//!
//! * `engine_state` - The tick coordinator and all subsystems under it
//! * `engine_state::voxels` - Blocks, chunks, terrain generation, the world
//! * `engine_state::meshing` - Face-culled mesh descriptors
//! * `engine_state::player` - The kinematic controller, collision, raycast
//! * `engine_state::persistence` - Pure save/load transforms
//!
//! ## Usage
//!
//! ```no_run
//! use voxel_world::engine_state::{EngineState, PlayerAction};
//!
//! let mut engine = EngineState::new(42);
//! loop {
//!     let actions = PlayerAction::default(); // from the input collaborator
//!     let updates = engine.update(&actions, 1.0 / 60.0);
//!     // Hand `updates` and the affected mesh descriptors to the renderer.
//! }
//! ```

use log::info;

pub mod engine_state;

use engine_state::{EngineState, PlayerAction};

/// Number of ticks the headless demo loop runs for.
const DEMO_TICKS: u32 = 240;

/// Runs a short headless simulation: initializes logging, creates a world,
/// and walks the player forward for a few seconds of simulated time. This
/// exercises generation, streaming, collision, and meshing without any
/// external collaborator attached.
pub fn run() {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized");

    let mut engine = EngineState::new(42);
    let actions = PlayerAction {
        move_forward: 1.0,
        ..PlayerAction::default()
    };

    for tick in 0..DEMO_TICKS {
        let updates = engine.update(&actions, 1.0 / 60.0);
        if !updates.rebuilt.is_empty() || !updates.removed.is_empty() {
            info!(
                "tick {}: rebuilt {} meshes, unloaded {} chunks",
                tick,
                updates.rebuilt.len(),
                updates.removed.len()
            );
        }
    }

    info!(
        "{} chunks resident around ({:.1}, {:.1})",
        engine.world.chunks.len(),
        engine.player.position.x,
        engine.player.position.z
    );
}
