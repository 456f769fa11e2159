//! # Voxel World Application Entry Point
//!
//! This is the entry point for the headless demo runner of the simulation
//! core. It simply calls into the library's `run()` function, which drives a
//! short tick loop with no renderer attached.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release
//! ```

fn main() {
    voxel_world::run();
}
