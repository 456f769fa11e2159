//! # Player Module
//!
//! The first-person kinematic body: look integration, axis-decomposed
//! movement against the voxel grid, gravity and ground probing, fly mode,
//! and block targeting.
//!
//! The player never owns world data. Movement reads the grid through the
//! world's bounded block queries, and block edits flow back through the
//! world so dirtiness propagates normally.

pub mod collision;
pub mod raycast;

use std::f32::consts::FRAC_PI_2;

use cgmath::{InnerSpace, Point3, Rad, Vector3};

use collision::collides;
use raycast::{raycast, RaycastHit};

use super::config::BodyConfig;
use super::persistence::PlayerSave;
use super::voxels::block::block_type::BlockType;
use super::voxels::world::World;
use super::PlayerAction;

/// Safe limit for pitch to prevent gimbal lock
const SAFE_FRAC_PI_2: f32 = FRAC_PI_2 - 0.0001;

/// Length of the downward probe that decides whether the body stands on
/// ground. Longer than the largest resting gap the blocked-step integrator
/// can leave under the body.
const GROUND_PROBE: f32 = 0.08;

/// The player's kinematic state and controller.
pub struct Player {
    /// Foot position of the body box in world space.
    pub position: Point3<f32>,
    /// Current vertical velocity, negative while falling.
    pub vertical_velocity: f32,
    /// Horizontal view rotation around Y, in radians.
    pub yaw: Rad<f32>,
    /// Vertical view rotation, in radians, clamped short of straight up/down.
    pub pitch: Rad<f32>,
    /// Whether the downward probe found ground this tick.
    pub grounded: bool,
    /// Whether fly mode is active.
    pub flying: bool,
    /// The block type the next placement writes.
    pub selected_block: BlockType,
    config: BodyConfig,
}

impl Player {
    /// Creates a player standing at the given foot position.
    ///
    /// # Arguments
    /// * `position` - Initial foot position in world space
    /// * `config` - Body and motion parameters
    pub fn new(position: Point3<f32>, config: BodyConfig) -> Self {
        Player {
            position,
            vertical_velocity: 0.0,
            yaw: Rad(0.0),
            pitch: Rad(0.0),
            grounded: false,
            flying: false,
            selected_block: BlockType::GRASS,
            config,
        }
    }

    /// The body parameters this player moves with.
    pub fn config(&self) -> &BodyConfig {
        &self.config
    }

    /// Integrates an accumulated look delta into yaw and pitch.
    ///
    /// # Arguments
    /// * `delta` - Look delta (x, y) accumulated since the previous tick
    pub fn apply_look(&mut self, delta: (f64, f64)) {
        self.yaw += Rad(delta.0 as f32 * self.config.look_sensitivity);
        self.pitch -= Rad(delta.1 as f32 * self.config.look_sensitivity);

        // Clamp pitch to prevent gimbal lock
        if self.pitch < -Rad(SAFE_FRAC_PI_2) {
            self.pitch = -Rad(SAFE_FRAC_PI_2);
        } else if self.pitch > Rad(SAFE_FRAC_PI_2) {
            self.pitch = Rad(SAFE_FRAC_PI_2);
        }
    }

    /// The normalized direction the player looks along.
    pub fn view_direction(&self) -> Vector3<f32> {
        let (pitch_sin, pitch_cos) = self.pitch.0.sin_cos();
        let (yaw_sin, yaw_cos) = self.yaw.0.sin_cos();
        Vector3::new(pitch_cos * yaw_cos, pitch_sin, pitch_cos * yaw_sin).normalize()
    }

    /// The ray origin for block targeting.
    pub fn eye_position(&self) -> Point3<f32> {
        self.position + Vector3::new(0.0, self.config.eye_height, 0.0)
    }

    /// Whether the body box, displaced by `offset`, would overlap a solid
    /// cell.
    pub fn collision_at(&self, world: &World, offset: Vector3<f32>) -> bool {
        collides(
            world,
            self.position + offset,
            self.config.radius,
            self.config.height,
        )
    }

    /// Advances the body one tick.
    ///
    /// The intended displacement decomposes into three independent
    /// sub-moves (X, then Z, then Y) and each is applied only when free,
    /// so the body slides along a wall on one axis while blocked on another
    /// instead of stopping dead.
    ///
    /// When not flying, gravity accumulates into the vertical velocity, a
    /// short downward probe decides groundedness, grounded contact clamps
    /// downward velocity to zero, and a jump intent launches upward. Flying
    /// bypasses all of that and drives vertical motion directly from the
    /// up/down intents. The world floor at y = 0 is absolute.
    ///
    /// # Arguments
    /// * `world` - The world to collide against
    /// * `actions` - This tick's decoded intents
    /// * `dt` - Tick duration in seconds
    pub fn update_movement(&mut self, world: &World, actions: &PlayerAction, dt: f32) {
        let (yaw_sin, yaw_cos) = self.yaw.0.sin_cos();
        let forward = Vector3::new(yaw_cos, 0.0, yaw_sin);
        let right = Vector3::new(-yaw_sin, 0.0, yaw_cos);

        let mut direction = forward * actions.move_forward + right * actions.move_strafe;
        if direction.magnitude2() > 1.0 {
            direction = direction.normalize();
        }
        let speed = self.config.speed
            * if actions.sprint {
                self.config.sprint_multiplier
            } else {
                1.0
            };

        let delta_x = direction.x * speed * dt;
        let delta_z = direction.z * speed * dt;
        let delta_y;

        if self.flying {
            self.grounded = false;
            self.vertical_velocity = 0.0;
            let vertical = (actions.jump as i32 - actions.fly_down as i32) as f32;
            delta_y = vertical * self.config.fly_speed * dt;
        } else {
            self.vertical_velocity -= self.config.gravity * dt;
            self.grounded = self.collision_at(world, Vector3::new(0.0, -GROUND_PROBE, 0.0));
            if self.grounded {
                if self.vertical_velocity < 0.0 {
                    self.vertical_velocity = 0.0;
                }
                if actions.jump {
                    self.vertical_velocity = self.config.jump_speed;
                }
            }
            delta_y = self.vertical_velocity * dt;
        }

        if delta_x != 0.0 && !self.collision_at(world, Vector3::new(delta_x, 0.0, 0.0)) {
            self.position.x += delta_x;
        }
        if delta_z != 0.0 && !self.collision_at(world, Vector3::new(0.0, 0.0, delta_z)) {
            self.position.z += delta_z;
        }
        if delta_y != 0.0 {
            if !self.collision_at(world, Vector3::new(0.0, delta_y, 0.0)) {
                self.position.y += delta_y;
            } else {
                self.vertical_velocity = 0.0;
            }
        }

        // The world has no geometry below y = 0; the floor is absolute.
        if self.position.y < 0.0 {
            self.position.y = 0.0;
            self.vertical_velocity = 0.0;
        }
    }

    /// The solid cell under the crosshair, if any lies within reach.
    pub fn target_block(&self, world: &World) -> Option<RaycastHit> {
        raycast(
            world,
            self.eye_position(),
            self.view_direction(),
            self.config.reach,
        )
    }

    /// Whether the given cell's unit cube overlaps the body's current box.
    ///
    /// Placement into such a cell would trap the body inside its own block,
    /// so placements test this first.
    pub fn intersects_cell(&self, cell: Point3<i32>) -> bool {
        let min_x = self.position.x - self.config.radius;
        let max_x = self.position.x + self.config.radius;
        let min_y = self.position.y;
        let max_y = self.position.y + self.config.height;
        let min_z = self.position.z - self.config.radius;
        let max_z = self.position.z + self.config.radius;

        (cell.x as f32) < max_x
            && (cell.x + 1) as f32 > min_x
            && (cell.y as f32) < max_y
            && (cell.y + 1) as f32 > min_y
            && (cell.z as f32) < max_z
            && (cell.z + 1) as f32 > min_z
    }

    /// Snapshots the player into its persistence payload.
    pub fn to_save(&self) -> PlayerSave {
        PlayerSave {
            position: [
                self.position.x as f64,
                self.position.y as f64,
                self.position.z as f64,
            ],
            pitch: self.pitch.0 as f64,
            yaw: self.yaw.0 as f64,
            selected_block: self.selected_block as u8,
            is_flying: self.flying,
        }
    }

    /// Reconstructs a player from a validated persistence payload.
    ///
    /// # Arguments
    /// * `save` - The decoded payload
    /// * `config` - Body and motion parameters for the restored player
    pub fn from_save(save: PlayerSave, config: BodyConfig) -> Self {
        Player {
            position: Point3::new(
                save.position[0] as f32,
                save.position[1] as f32,
                save.position[2] as f32,
            ),
            vertical_velocity: 0.0,
            yaw: Rad(save.yaw as f32),
            pitch: Rad(save.pitch as f32),
            grounded: false,
            flying: save.is_flying,
            selected_block: BlockType::get_block_type_from_int(save.selected_block),
            config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::config::WorldConfig;
    use crate::engine_state::voxels::block::block_type::BlockType;
    use crate::engine_state::voxels::chunk::{Chunk, CHUNK_DIMENSION};
    use cgmath::Point2;

    fn empty_world() -> World {
        World::new(0, WorldConfig::default())
    }

    /// A world with a solid stone floor plane at y = 9 in chunk (0, 0).
    fn floored_world() -> World {
        let mut world = empty_world();
        let mut chunk = Chunk::empty(Point2::new(0, 0));
        for z in 0..CHUNK_DIMENSION {
            for x in 0..CHUNK_DIMENSION {
                chunk.set_block(x, 9, z, BlockType::STONE);
            }
        }
        world.chunks.insert(Point2::new(0, 0), chunk);
        world
    }

    fn standing_player() -> Player {
        Player::new(Point3::new(8.5, 10.0, 8.5), BodyConfig::default())
    }

    #[test]
    fn falling_stops_at_the_world_floor() {
        let world = empty_world();
        let mut player = Player::new(Point3::new(8.5, 0.5, 8.5), BodyConfig::default());

        for _ in 0..20 {
            player.update_movement(&world, &PlayerAction::default(), 0.1);
        }
        assert_eq!(player.position.y, 0.0);
        assert_eq!(player.vertical_velocity, 0.0);
    }

    #[test]
    fn a_grounded_jump_launches_upward() {
        let world = floored_world();
        let mut player = standing_player();

        let actions = PlayerAction {
            jump: true,
            ..PlayerAction::default()
        };
        player.update_movement(&world, &actions, 0.016);

        assert!(player.grounded);
        assert!(player.position.y > 10.0);
        assert!(player.vertical_velocity > 0.0);
    }

    #[test]
    fn an_airborne_jump_does_nothing() {
        let world = empty_world();
        let mut player = Player::new(Point3::new(8.5, 30.0, 8.5), BodyConfig::default());

        let actions = PlayerAction {
            jump: true,
            ..PlayerAction::default()
        };
        player.update_movement(&world, &actions, 0.016);

        assert!(!player.grounded);
        assert!(player.vertical_velocity < 0.0);
        assert!(player.position.y < 30.0);
    }

    #[test]
    fn walking_slides_along_free_axes() {
        let world = floored_world();
        let mut player = standing_player();

        // Yaw 0 faces +X; a forward intent moves along X only.
        let actions = PlayerAction {
            move_forward: 1.0,
            ..PlayerAction::default()
        };
        for _ in 0..10 {
            player.update_movement(&world, &actions, 0.016);
        }

        assert!(player.position.x > 8.5);
        assert_eq!(player.position.z, 8.5);
    }

    #[test]
    fn sprint_scales_horizontal_speed() {
        let world = empty_world();
        let mut walker = Player::new(Point3::new(0.5, 30.0, 0.5), BodyConfig::default());
        let mut sprinter = Player::new(Point3::new(0.5, 30.0, 0.5), BodyConfig::default());

        let walk = PlayerAction {
            move_forward: 1.0,
            ..PlayerAction::default()
        };
        let sprint = PlayerAction {
            move_forward: 1.0,
            sprint: true,
            ..PlayerAction::default()
        };
        walker.update_movement(&world, &walk, 0.1);
        sprinter.update_movement(&world, &sprint, 0.1);

        assert!(sprinter.position.x > walker.position.x);
    }

    #[test]
    fn flying_moves_vertically_from_intents() {
        let world = empty_world();
        let mut player = Player::new(Point3::new(8.5, 20.0, 8.5), BodyConfig::default());
        player.flying = true;

        let up = PlayerAction {
            jump: true,
            ..PlayerAction::default()
        };
        player.update_movement(&world, &up, 0.1);
        assert!(player.position.y > 20.0);

        let down = PlayerAction {
            fly_down: true,
            ..PlayerAction::default()
        };
        let before = player.position.y;
        player.update_movement(&world, &down, 0.1);
        assert!(player.position.y < before);
        assert!(!player.grounded);
    }

    #[test]
    fn pitch_clamps_short_of_vertical() {
        let mut player = standing_player();
        player.apply_look((0.0, -1.0e6));
        assert!(player.pitch.0 <= SAFE_FRAC_PI_2);

        player.apply_look((0.0, 1.0e6));
        assert!(player.pitch.0 >= -SAFE_FRAC_PI_2);
    }

    #[test]
    fn the_body_box_knows_which_cells_it_occupies() {
        let player = standing_player();

        assert!(player.intersects_cell(Point3::new(8, 10, 8)));
        assert!(player.intersects_cell(Point3::new(8, 11, 8)));
        assert!(!player.intersects_cell(Point3::new(8, 13, 8)));
        assert!(!player.intersects_cell(Point3::new(10, 10, 8)));
        assert!(!player.intersects_cell(Point3::new(8, 8, 8)));
    }

    #[test]
    fn save_roundtrip_preserves_the_kinematic_state() {
        let mut player = standing_player();
        player.yaw = Rad(1.25);
        player.pitch = Rad(-0.5);
        player.flying = true;
        player.selected_block = BlockType::WOOD;

        let restored = Player::from_save(player.to_save(), BodyConfig::default());
        assert_eq!(restored.position, player.position);
        assert_eq!(restored.yaw, player.yaw);
        assert_eq!(restored.pitch, player.pitch);
        assert_eq!(restored.flying, player.flying);
        assert_eq!(restored.selected_block, BlockType::WOOD);
    }
}
