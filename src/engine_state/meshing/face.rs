use cgmath::Point3;

use crate::engine_state::voxels::block::block_side::BlockSide;

/// Represents a single quad face of a voxel in the mesh.
///
/// A face is defined by four corner points (lower-left, lower-right,
/// upper-right, upper-left) in world block coordinates and records which
/// side of the block it covers. Every exposed face becomes one independent
/// quad; coplanar faces are never merged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    /// Lower-right corner of the face in world block coordinates
    pub lr: Point3<i32>,
    /// Lower-left corner of the face in world block coordinates
    pub ll: Point3<i32>,
    /// Upper-right corner of the face in world block coordinates
    pub ur: Point3<i32>,
    /// Upper-left corner of the face in world block coordinates
    pub ul: Point3<i32>,
    /// Which side of the block this face represents
    pub block_side: BlockSide,
}

impl Face {
    /// Creates a new face for a voxel at the given coordinates.
    ///
    /// # Arguments
    /// * `i`, `j`, `k` - The world block coordinates of the voxel
    /// * `block_side` - Which side of the block this face represents
    ///
    /// # Returns
    /// A new `Face` with its corners placed for the given side, wound so the
    /// two triangles formed with `indices_for` point out of the block.
    pub fn new(i: i32, j: i32, k: i32, block_side: BlockSide) -> Self {
        match block_side {
            BlockSide::FRONT => Face {
                ll: Point3::new(i, j, k),
                lr: Point3::new(i, j, k + 1),
                ul: Point3::new(i, j + 1, k),
                ur: Point3::new(i, j + 1, k + 1),
                block_side,
            },

            BlockSide::BACK => Face {
                ll: Point3::new(i + 1, j, k + 1),
                lr: Point3::new(i + 1, j, k),
                ul: Point3::new(i + 1, j + 1, k + 1),
                ur: Point3::new(i + 1, j + 1, k),
                block_side,
            },

            BlockSide::BOTTOM => Face {
                ll: Point3::new(i, j, k + 1),
                lr: Point3::new(i, j, k),
                ul: Point3::new(i + 1, j, k + 1),
                ur: Point3::new(i + 1, j, k),
                block_side,
            },

            BlockSide::TOP => Face {
                ll: Point3::new(i, j + 1, k),
                lr: Point3::new(i, j + 1, k + 1),
                ul: Point3::new(i + 1, j + 1, k),
                ur: Point3::new(i + 1, j + 1, k + 1),
                block_side,
            },

            BlockSide::LEFT => Face {
                ll: Point3::new(i + 1, j, k),
                lr: Point3::new(i, j, k),
                ul: Point3::new(i + 1, j + 1, k),
                ur: Point3::new(i, j + 1, k),
                block_side,
            },

            BlockSide::RIGHT => Face {
                ll: Point3::new(i, j, k + 1),
                lr: Point3::new(i + 1, j, k + 1),
                ul: Point3::new(i, j + 1, k + 1),
                ur: Point3::new(i + 1, j + 1, k + 1),
                block_side,
            },
        }
    }

    /// The face's corners in the order they enter the vertex buffer:
    /// lower-left, lower-right, upper-left, upper-right.
    pub fn corners(&self) -> [Point3<i32>; 4] {
        [self.ll, self.lr, self.ul, self.ur]
    }
}
