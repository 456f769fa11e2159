//! Body-box collision tests against the voxel grid.

use cgmath::Point3;

use crate::engine_state::voxels::world::World;

/// Tests an axis-aligned body box against the voxel grid.
///
/// The box is anchored at its foot position with a horizontal `radius` and a
/// `height`. Every cell between the inclusive floor/ceil bounds of the box
/// on all three axes is examined, and the box is blocked if any such cell
/// holds a solid block. The bounds over-approximate: a box flush against a
/// cell face counts the neighboring row.
///
/// An unloaded chunk reads as air, so a body at the streaming boundary is
/// never blocked by terrain that has not been generated yet.
///
/// # Arguments
/// * `world` - The world to test against
/// * `position` - The foot position of the candidate box
/// * `radius` - Horizontal half-extent of the box
/// * `height` - Vertical extent of the box above the foot
///
/// # Returns
/// `true` when the box overlaps any solid cell.
pub fn collides(world: &World, position: Point3<f32>, radius: f32, height: f32) -> bool {
    let min_x = (position.x - radius).floor() as i32;
    let max_x = (position.x + radius).ceil() as i32;
    let min_y = position.y.floor() as i32;
    let max_y = (position.y + height).ceil() as i32;
    let min_z = (position.z - radius).floor() as i32;
    let max_z = (position.z + radius).ceil() as i32;

    for z in min_z..=max_z {
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                if world.get_block(x, y, z).is_solid() {
                    return true;
                }
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::config::WorldConfig;
    use crate::engine_state::voxels::block::block_type::BlockType;
    use crate::engine_state::voxels::chunk::Chunk;
    use cgmath::Point2;

    #[test]
    fn a_box_surrounded_by_air_is_free() {
        // An empty world is all air everywhere, including non-resident chunks.
        let world = World::new(0, WorldConfig::default());
        for offset in [-0.9f32, -0.3, 0.0, 0.3, 0.9] {
            assert!(!collides(
                &world,
                Point3::new(8.5 + offset, 30.0, 8.5 + offset),
                0.3,
                1.8
            ));
        }
    }

    #[test]
    fn a_box_enclosed_on_all_sides_is_blocked_for_any_displacement() {
        let mut world = World::new(0, WorldConfig::default());
        let mut chunk = Chunk::solid(Point2::new(0, 0), BlockType::STONE);
        chunk.set_block(8, 10, 8, BlockType::AIR);
        world.chunks.insert(Point2::new(0, 0), chunk);

        let center = Point3::new(8.5, 10.1, 8.5);
        for offset in [
            Point3::new(0.1, 0.0, 0.0),
            Point3::new(-0.1, 0.0, 0.0),
            Point3::new(0.0, 0.1, 0.0),
            Point3::new(0.0, -0.1, 0.0),
            Point3::new(0.0, 0.0, 0.1),
            Point3::new(0.0, 0.0, -0.1),
        ] {
            let candidate = Point3::new(
                center.x + offset.x,
                center.y + offset.y,
                center.z + offset.z,
            );
            assert!(collides(&world, candidate, 0.3, 0.7));
        }
    }

    #[test]
    fn the_bounds_are_inclusive_on_every_axis() {
        let mut world = World::new(0, WorldConfig::default());
        let mut chunk = Chunk::empty(Point2::new(0, 0));
        chunk.set_block(9, 10, 8, BlockType::STONE);
        world.chunks.insert(Point2::new(0, 0), chunk);

        // The box spans x [8.2, 8.8]; ceil(8.8) = 9 reaches the solid cell.
        assert!(collides(&world, Point3::new(8.5, 10.2, 8.5), 0.3, 0.6));
        // Shifted a whole cell away it no longer does.
        assert!(!collides(&world, Point3::new(7.5, 10.2, 8.5), 0.3, 0.6));
    }
}
