//! Fixed-step voxel raycasting for block targeting.

use cgmath::{Point3, Vector3};

use crate::engine_state::voxels::block::block_type::BlockType;
use crate::engine_state::voxels::world::World;

/// Step length of the ray march, in blocks. Small enough that a ray cannot
/// skip over a whole cell within the reach distances this core uses.
const RAY_STEP: f32 = 0.05;

/// A successful raycast: the first solid cell along the ray, together with
/// the last air cell sampled immediately before it. The air cell is the
/// placement anchor for new blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RaycastHit {
    /// The solid cell the ray hit.
    pub block: Point3<i32>,
    /// The air cell sampled just before the hit, adjacent toward the origin.
    pub adjacent: Point3<i32>,
}

/// Marches a ray through the voxel grid in fixed steps.
///
/// Starting at `origin` and walking along `direction`, the voxel under every
/// sampled point is inspected until either a non-air cell is found or the
/// reach distance is exhausted.
///
/// # Arguments
/// * `world` - The world to sample
/// * `origin` - The ray origin (typically the eye position)
/// * `direction` - The normalized ray direction
/// * `reach` - The maximum march distance, in blocks
///
/// # Returns
/// The hit and its placement anchor, or `None` when no solid cell lies
/// within reach.
pub fn raycast(
    world: &World,
    origin: Point3<f32>,
    direction: Vector3<f32>,
    reach: f32,
) -> Option<RaycastHit> {
    let mut last_air = Point3::new(
        origin.x.floor() as i32,
        origin.y.floor() as i32,
        origin.z.floor() as i32,
    );

    let mut distance = 0.0f32;
    while distance <= reach {
        let point = origin + direction * distance;
        let cell = Point3::new(
            point.x.floor() as i32,
            point.y.floor() as i32,
            point.z.floor() as i32,
        );

        if world.get_block_at(cell) != BlockType::AIR {
            return Some(RaycastHit {
                block: cell,
                adjacent: last_air,
            });
        }

        last_air = cell;
        distance += RAY_STEP;
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::config::WorldConfig;
    use crate::engine_state::voxels::chunk::Chunk;
    use cgmath::Point2;

    fn world_with_block_at(cell: Point3<i32>) -> World {
        let mut world = World::new(0, WorldConfig::default());
        world
            .chunks
            .insert(Point2::new(0, 0), Chunk::empty(Point2::new(0, 0)));
        world.set_block_at(cell, BlockType::STONE);
        world
    }

    #[test]
    fn the_first_solid_cell_is_hit_with_its_anchor() {
        let world = world_with_block_at(Point3::new(3, 10, 0));

        let hit = raycast(
            &world,
            Point3::new(0.5, 10.5, 0.5),
            Vector3::new(1.0, 0.0, 0.0),
            5.0,
        )
        .expect("expected a hit");

        assert_eq!(hit.block, Point3::new(3, 10, 0));
        assert_eq!(hit.adjacent, Point3::new(2, 10, 0));
    }

    #[test]
    fn cells_beyond_reach_are_not_hit() {
        let world = world_with_block_at(Point3::new(9, 10, 0));

        let hit = raycast(
            &world,
            Point3::new(0.5, 10.5, 0.5),
            Vector3::new(1.0, 0.0, 0.0),
            5.0,
        );
        assert!(hit.is_none());
    }

    #[test]
    fn an_empty_world_reports_no_hit() {
        let world = World::new(0, WorldConfig::default());
        let hit = raycast(
            &world,
            Point3::new(0.5, 30.0, 0.5),
            Vector3::new(0.0, -1.0, 0.0),
            5.0,
        );
        assert!(hit.is_none());
    }

    #[test]
    fn diagonal_rays_anchor_adjacent_to_the_hit() {
        let world = world_with_block_at(Point3::new(4, 10, 4));

        let direction = Vector3::new(1.0, 0.0, 1.0) / 2.0f32.sqrt();
        let hit = raycast(&world, Point3::new(0.5, 10.5, 0.5), direction, 8.0)
            .expect("expected a hit");

        assert_eq!(hit.block, Point3::new(4, 10, 4));
        let delta = hit.block - hit.adjacent;
        assert!(delta.x.abs() + delta.y.abs() + delta.z.abs() <= 2);
    }
}
