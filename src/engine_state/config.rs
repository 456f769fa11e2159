//! # Configuration Module
//!
//! The externally supplied constants of a simulation run: noise parameters,
//! streaming window size, and kinematic body parameters. The core treats all
//! of these as immutable inputs for a given run; the `Default` impls carry
//! the reference values.

/// Noise and structure parameters for terrain generation.
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    /// Number of value-noise octaves summed into the height field.
    pub octaves: u32,
    /// Weight multiplier applied to each successive octave.
    pub persistence: f64,
    /// Frequency multiplier applied to each successive octave.
    pub lacunarity: f64,
    /// Sampling frequency of the first octave.
    pub frequency: f64,
    /// Scale from the summed noise value to blocks of height.
    pub height_multiplier: f64,
    /// Terrain height at zero noise.
    pub base_height: f64,
    /// Per-column probability of rooting a tree.
    pub tree_probability: f64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        GenerationConfig {
            octaves: 4,
            persistence: 0.5,
            lacunarity: 2.0,
            frequency: 0.01,
            height_multiplier: 12.0,
            base_height: 20.0,
            tree_probability: 0.02,
        }
    }
}

/// The reference render distance, in chunks.
pub const RENDER_DISTANCE: i32 = 2;

/// Streaming parameters for the world.
#[derive(Debug, Clone)]
pub struct WorldConfig {
    /// Half-width, in chunks, of the square region kept resident around the
    /// player. The window is inclusive on both axes, so a distance of `r`
    /// keeps `(2r + 1)²` chunks resident.
    pub render_distance: i32,
    /// Terrain generation parameters.
    pub generation: GenerationConfig,
}

impl Default for WorldConfig {
    fn default() -> Self {
        WorldConfig {
            render_distance: RENDER_DISTANCE,
            generation: GenerationConfig::default(),
        }
    }
}

/// Body and motion parameters for the kinematic controller.
#[derive(Debug, Clone)]
pub struct BodyConfig {
    /// Horizontal radius of the body box, in blocks.
    pub radius: f32,
    /// Height of the body box, in blocks.
    pub height: f32,
    /// Height of the view origin above the foot anchor.
    pub eye_height: f32,
    /// Walking speed, in blocks per second.
    pub speed: f32,
    /// Speed multiplier while the sprint intent is held.
    pub sprint_multiplier: f32,
    /// Upward velocity impulse of a jump, in blocks per second.
    pub jump_speed: f32,
    /// Downward acceleration while airborne, in blocks per second squared.
    pub gravity: f32,
    /// Vertical speed while flying, in blocks per second.
    pub fly_speed: f32,
    /// Maximum block-targeting distance, in blocks.
    pub reach: f32,
    /// Radians of rotation per unit of look delta.
    pub look_sensitivity: f32,
}

impl Default for BodyConfig {
    fn default() -> Self {
        BodyConfig {
            radius: 0.3,
            height: 1.8,
            eye_height: 1.62,
            speed: 4.5,
            sprint_multiplier: 1.6,
            jump_speed: 8.0,
            gravity: 25.0,
            fly_speed: 8.0,
            reach: 5.0,
            look_sensitivity: 0.002,
        }
    }
}
