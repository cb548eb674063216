//! Mesh builder (spec §4.G): rasterizes a tile's surface into a
//! watertight grid and triangulates it with a fixed winding.

use crate::address::{get_bounding_tile, Hemisphere};
use crate::ellipsoid::{cartographic_to_cartesian, Ellipsoid};
use crate::error::TerrainError;
use crate::height::sample_height;

/// A generated tile surface, laid out ready for binary packing: every
/// array is indexed in row-major `(i, j)` grid order, `i, j ∈ [0, steps]`.
pub struct TileMesh {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u16>,
    pub min: [f32; 3],
    pub max: [f32; 3],
}

fn grid_index(i: u32, j: u32, steps: u32) -> usize {
    (i * (steps + 1) + j) as usize
}

/// Build the triangle mesh for `(hemisphere, index)` under `ellipsoid`,
/// subdividing into `2^content_generation_depth` steps per side.
pub fn build(
    hemisphere: Hemisphere,
    index: u64,
    ellipsoid: &Ellipsoid,
    persistence: f64,
    level_displacement: f64,
    content_generation_depth: u32,
) -> Result<TileMesh, TerrainError> {
    let steps = 1u32 << content_generation_depth;
    let vertex_count = (steps as u64 + 1) * (steps as u64 + 1);
    if vertex_count > 65536 {
        return Err(TerrainError::VertexOverflow {
            hemisphere,
            index,
            content_generation_depth,
            vertex_count,
        });
    }

    let (region, depth) = get_bounding_tile(hemisphere, index);
    let sample_level = depth + content_generation_depth;
    let step = 1.0 / steps as f64;

    let mut positions = Vec::with_capacity(vertex_count as usize);
    let mut normals = Vec::with_capacity(vertex_count as usize);
    let mut uvs = Vec::with_capacity(vertex_count as usize);
    let mut min = [f32::INFINITY; 3];
    let mut max = [f32::NEG_INFINITY; 3];

    for i in 0..=steps {
        for j in 0..=steps {
            let lon = region.w + i as f64 * step * (region.e - region.w);
            let lat = region.s + j as f64 * step * (region.n - region.s);
            let h = sample_height(lon, lat, sample_level, persistence, level_displacement);
            let (pos, nrm) = cartographic_to_cartesian(lon, lat, h, ellipsoid);
            let pos32 = [pos[0] as f32, pos[1] as f32, pos[2] as f32];
            for axis in 0..3 {
                min[axis] = min[axis].min(pos32[axis]);
                max[axis] = max[axis].max(pos32[axis]);
            }
            positions.push(pos32);
            normals.push([nrm[0] as f32, nrm[1] as f32, nrm[2] as f32]);
            uvs.push([i as f32 / steps as f32, j as f32 / steps as f32]);
        }
    }

    let triangle_count = 2 * steps as usize * steps as usize;
    let mut indices = Vec::with_capacity(triangle_count * 3);
    for i in 0..steps {
        for j in 0..steps {
            let a = grid_index(i, j, steps) as u16;
            let b = grid_index(i + 1, j, steps) as u16;
            let c = grid_index(i + 1, j + 1, steps) as u16;
            let d = grid_index(i, j + 1, steps) as u16;
            indices.extend_from_slice(&[a, b, c, a, c, d]);
        }
    }

    Ok(TileMesh { positions, normals, uvs, indices, min, max })
}
