//! Height field to triangle mesh conversion.
//!
//! Two triangles per raster quad, raster column/row as UVs, and four
//! elevation-partitioned submeshes (grass, rock, snow, sand) so the rendering
//! host can bind one material per bucket. Normals and bounds are recomputed
//! from the final buffers as pure post-processing.

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};

use crate::heightfield::HeightField;

/// Submesh slot order expected by the rendering host's material array.
pub const SUBMESH_GRASS: usize = 0;
pub const SUBMESH_ROCK: usize = 1;
pub const SUBMESH_SNOW: usize = 2;
pub const SUBMESH_SAND: usize = 3;

/// Ascending elevation cutoffs driving submesh assignment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialCutoffs {
    /// Below this, sand creeps inland from the shoreline.
    pub sand_creep_inland: f32,
    /// Below this (and above sand), grass.
    pub grass_to_rock: f32,
    /// Below this (and above grass), rock; above it, snow caps.
    pub rock_to_snow: f32,
    /// How many of a triangle's three vertices must sit below a cutoff for
    /// the triangle to take that bucket.
    pub vertex_cutoff_tolerance: u32,
}

impl Default for MaterialCutoffs {
    fn default() -> Self {
        Self {
            sand_creep_inland: 10.0,
            grass_to_rock: 25.0,
            rock_to_snow: 50.0,
            vertex_cutoff_tolerance: 1,
        }
    }
}

/// Axis-aligned bounding box over the mesh vertices.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

/// Interleaved vertex for GPU upload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct TerrainVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

/// Plain mesh buffers, consumed verbatim by the rendering/collision host.
#[derive(Debug, Clone, Default)]
pub struct MeshOutput {
    pub vertices: Vec<Vec3>,
    pub triangles: Vec<u32>,
    pub uvs: Vec<Vec2>,
    pub normals: Vec<Vec3>,
    /// Triangle index lists per material: grass, rock, snow, sand. Together
    /// they partition `triangles` exactly.
    pub submeshes: [Vec<u32>; 4],
    pub bounds: Aabb,
}

impl MeshOutput {
    pub fn triangle_count(&self) -> usize {
        self.triangles.len() / 3
    }

    /// Interleave position/normal/uv for the host's vertex buffer.
    pub fn interleaved(&self) -> Vec<TerrainVertex> {
        self.vertices
            .iter()
            .zip(self.normals.iter())
            .zip(self.uvs.iter())
            .map(|((p, n), uv)| TerrainVertex {
                position: p.to_array(),
                normal: n.to_array(),
                uv: uv.to_array(),
            })
            .collect()
    }
}

/// Convert a height field into mesh buffers with material submeshes.
pub fn build_mesh(field: &HeightField, cutoffs: &MaterialCutoffs) -> MeshOutput {
    let width = field.width;
    let depth = field.depth;

    let vertices = field.vertices.clone();

    // Raster column/row as UV: the host tiles its textures per cell.
    let uvs: Vec<Vec2> = (0..vertices.len() as i32)
        .map(|i| Vec2::new((i % width) as f32, (i / width) as f32))
        .collect();

    let mut triangles = Vec::with_capacity(((width - 1) * (depth - 1) * 6) as usize);
    for z in 0..depth - 1 {
        for x in 0..width - 1 {
            let k = (z * width + x) as u32;
            let w = width as u32;
            triangles.extend([k, k + w, k + 1]);
            triangles.extend([k + 1, k + w, k + w + 1]);
        }
    }

    let submeshes = partition_submeshes(&vertices, &triangles, cutoffs);
    let normals = calculate_normals(&vertices, &triangles);
    let bounds = calculate_bounds(&vertices);

    MeshOutput {
        vertices,
        triangles,
        uvs,
        normals,
        submeshes,
        bounds,
    }
}

/// Assign every triangle to exactly one material bucket: the lowest cutoff
/// satisfied by at least `vertex_cutoff_tolerance` of its vertices wins,
/// checked sand, then grass, then rock; what remains is snow.
fn partition_submeshes(
    vertices: &[Vec3],
    triangles: &[u32],
    cutoffs: &MaterialCutoffs,
) -> [Vec<u32>; 4] {
    let mut submeshes: [Vec<u32>; 4] = Default::default();

    for tri in triangles.chunks_exact(3) {
        let heights = [
            vertices[tri[0] as usize].y,
            vertices[tri[1] as usize].y,
            vertices[tri[2] as usize].y,
        ];
        let below = |cutoff: f32| {
            heights.iter().filter(|&&h| h < cutoff).count() as u32 >= cutoffs.vertex_cutoff_tolerance
        };

        let bucket = if below(cutoffs.sand_creep_inland) {
            SUBMESH_SAND
        } else if below(cutoffs.grass_to_rock) {
            SUBMESH_GRASS
        } else if below(cutoffs.rock_to_snow) {
            SUBMESH_ROCK
        } else {
            SUBMESH_SNOW
        };
        submeshes[bucket].extend_from_slice(tri);
    }

    submeshes
}

/// Accumulate face normals per vertex and normalize.
fn calculate_normals(vertices: &[Vec3], triangles: &[u32]) -> Vec<Vec3> {
    let mut normals = vec![Vec3::ZERO; vertices.len()];

    for tri in triangles.chunks_exact(3) {
        let (i0, i1, i2) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
        let n = (vertices[i1] - vertices[i0])
            .cross(vertices[i2] - vertices[i0])
            .normalize_or_zero();
        normals[i0] += n;
        normals[i1] += n;
        normals[i2] += n;
    }

    for n in &mut normals {
        *n = n.normalize_or(Vec3::Y);
    }
    normals
}

fn calculate_bounds(vertices: &[Vec3]) -> Aabb {
    let mut bounds = match vertices.first() {
        Some(&v) => Aabb { min: v, max: v },
        None => return Aabb::default(),
    };
    for v in vertices {
        bounds.min = bounds.min.min(*v);
        bounds.max = bounds.max.max(*v);
    }
    bounds
}
