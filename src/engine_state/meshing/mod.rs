//! # Meshing Module
//!
//! Converts a chunk's block grid into a renderable triangle mesh descriptor.
//!
//! The algorithm is face culling: every non-air block contributes one quad
//! per side whose neighboring cell is air, and nothing else. Neighbors
//! inside the chunk resolve locally; neighbors across the chunk border
//! resolve through the world, where a non-resident chunk reads as air (the
//! known streaming-boundary caveat). No coplanar quads are merged.
//!
//! The output is plain CPU-side data in world-space coordinates. The
//! external renderer owns every GPU resource; this module never sees one.

mod face;

use cgmath::Point2;

use face::Face;

use super::voxels::block::block_side::BlockSide;
use super::voxels::block::block_type::BlockType;
use super::voxels::chunk::{Chunk, CHUNK_DIMENSION, CHUNK_HEIGHT};
use super::voxels::world::World;

/// A chunk's renderable geometry: three parallel buffers in world space.
///
/// Each exposed block face contributes four vertices (with a flat per-vertex
/// color) and six indices forming two triangles. An all-air chunk yields an
/// empty descriptor, which is still a valid rebuild result.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ChunkMesh {
    /// Vertex positions, one `[x, y, z]` per vertex.
    pub positions: Vec<[f32; 3]>,
    /// Flat per-vertex colors, parallel to `positions`.
    pub colors: Vec<[f32; 3]>,
    /// Triangle indices into the vertex buffers.
    pub indices: Vec<u32>,
}

impl ChunkMesh {
    /// Whether the descriptor holds any geometry at all.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// The number of quads in the mesh.
    pub fn quad_count(&self) -> usize {
        self.positions.len() / 4
    }

    /// The position buffer as raw bytes, for vertex-buffer upload.
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    /// The color buffer as raw bytes, for vertex-buffer upload.
    pub fn color_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.colors)
    }

    /// The index buffer as raw bytes, for index-buffer upload.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

/// Generates index data for a face, adjusted by the number of previously
/// generated faces.
///
/// # Arguments
/// * `num_faces_generated` - The number of faces that have been generated so far
///
/// # Returns
/// Six indices forming the face's two triangles, pointing at the four
/// vertices pushed for that face.
fn generate_face_indices(num_faces_generated: u32) -> [u32; 6] {
    [
        num_faces_generated * 4,
        1 + num_faces_generated * 4,
        3 + num_faces_generated * 4,
        num_faces_generated * 4,
        3 + num_faces_generated * 4,
        2 + num_faces_generated * 4,
    ]
}

/// The flat color for one face of a block: the base color, or the top/bottom
/// override where the block defines one.
fn face_color(block_type: BlockType, side: BlockSide) -> [f32; 3] {
    let properties = block_type.properties();
    match side {
        BlockSide::TOP => properties.top_color.unwrap_or(properties.color),
        BlockSide::BOTTOM => properties.bottom_color.unwrap_or(properties.color),
        _ => properties.color,
    }
}

/// Builds the face-culled mesh descriptor for the chunk at `position`.
///
/// Walks every block of the chunk and emits a quad for each face whose
/// neighboring cell is air. Cells inside the chunk are read locally; cells
/// across the border are read through the world at world coordinates.
///
/// # Arguments
/// * `world` - The world the chunk lives in, for cross-border lookups
/// * `position` - The chunk coordinates to mesh
///
/// # Returns
/// The finished descriptor. A missing or all-air chunk yields an empty one.
pub fn build_chunk_mesh(world: &World, position: Point2<i32>) -> ChunkMesh {
    let mut mesh = ChunkMesh::default();
    let chunk = match world.get_chunk(position) {
        Some(chunk) => chunk,
        None => return mesh,
    };

    let base_x = position.x * CHUNK_DIMENSION;
    let base_z = position.y * CHUNK_DIMENSION;
    let mut faces_generated = 0u32;

    for y in 0..CHUNK_HEIGHT {
        for z in 0..CHUNK_DIMENSION {
            for x in 0..CHUNK_DIMENSION {
                let block_type = chunk.get_block(x, y, z);
                if block_type == BlockType::AIR {
                    continue;
                }

                for side in BlockSide::all() {
                    if !neighbor_is_air(world, chunk, x, y, z, side) {
                        continue;
                    }

                    let face = Face::new(base_x + x, y, base_z + z, side);
                    let color = face_color(block_type, side);
                    for corner in face.corners() {
                        mesh.positions
                            .push([corner.x as f32, corner.y as f32, corner.z as f32]);
                        mesh.colors.push(color);
                    }
                    mesh.indices
                        .extend_from_slice(&generate_face_indices(faces_generated));
                    faces_generated += 1;
                }
            }
        }
    }

    mesh
}

/// Whether the cell a face looks into is air.
///
/// Vertical overflow and in-chunk neighbors resolve through the chunk's own
/// bounded reads; horizontal neighbors outside the chunk go through the
/// world, where a non-resident chunk reads as air.
fn neighbor_is_air(world: &World, chunk: &Chunk, x: i32, y: i32, z: i32, side: BlockSide) -> bool {
    let offset = side.offset();
    let (nx, ny, nz) = (x + offset.x, y + offset.y, z + offset.z);

    let neighbor = if (0..CHUNK_DIMENSION).contains(&nx) && (0..CHUNK_DIMENSION).contains(&nz) {
        chunk.get_block(nx, ny, nz)
    } else {
        let base_x = chunk.position.x * CHUNK_DIMENSION;
        let base_z = chunk.position.y * CHUNK_DIMENSION;
        world.get_block(base_x + nx, ny, base_z + nz)
    };

    neighbor == BlockType::AIR
}
