//! Gene evaluation over a vertex raster.
//!
//! **Seed-based determinism:** the Perlin instance and the noise-space offset
//! are both derived only from the supplied seed, so the same seed and
//! chromosome reproduce the terrain byte for byte on every participant.

use glam::{Vec2, Vec3};
use grid_core::Bounds2DInt;
use noise::{NoiseFn, Perlin};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::gene::{TerrainChromosome, TerrainGene};

/// Derive a deterministic u32 noise seed from the terrain seed.
/// Same seed always gives the same result so terrain is reproducible.
#[inline]
fn deterministic_noise_seed(seed: i64, offset: u64) -> u32 {
    (((seed as u64).wrapping_add(offset))
        .wrapping_mul(0x9e3779b97f4a7c15_u64)
        .wrapping_add(offset.wrapping_mul(0x6c078965_u64))
        >> 32) as u32
}

/// A row-major raster of `(x, height, z)` vertices, owned by one generation
/// pass and rebuilt from scratch on every call.
#[derive(Debug, Clone, PartialEq)]
pub struct HeightField {
    /// Vertices per row: `boundary.size().x + 1`.
    pub width: i32,
    /// Rows: `boundary.size().y + 1` (the bounds Y channel carries Z).
    pub depth: i32,
    /// `sqrt(width * depth)`, the island falloff normalizer.
    pub root_area: f32,
    /// World-space center of the terrain footprint.
    pub origin: Vec2,
    /// Row-major vertex positions, local to the terrain origin.
    pub vertices: Vec<Vec3>,
}

impl HeightField {
    #[inline]
    pub fn index(&self, x: i32, z: i32) -> usize {
        (z * self.width + x) as usize
    }

    pub fn vertex(&self, x: i32, z: i32) -> Vec3 {
        self.vertices[self.index(x, z)]
    }

    /// Island falloff at a local offset from the raster center: grows with
    /// the square of distance, floored to whole height steps. Monotonically
    /// non-decreasing in distance for any `falloff_scale >= 0`.
    pub fn falloff(&self, dx: f32, dz: f32, falloff_scale: f32) -> f32 {
        let dist_sq = dx * dx + dz * dz;
        (dist_sq * falloff_scale / self.root_area).floor()
    }
}

/// Evaluates a chromosome's genes over a vertex raster.
///
/// Genes compose sequentially per vertex and are never reordered; each
/// vertex's chain is a pure function of its coordinates, the chromosome and
/// the seed, so vertices are independent of one another.
pub struct GeneEngine {
    perlin: Perlin,
    /// Noise-space offset drawn once per generation from the seeded RNG.
    offset: f64,
}

impl GeneEngine {
    /// Seed the engine. The offset mirrors the source's one `Range(0, 65535)`
    /// draw after re-seeding, as an explicit RNG instance rather than global
    /// state.
    pub fn new(seed: i64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed as u64);
        let offset = rng.gen_range(0..65535) as f64;
        Self {
            perlin: Perlin::new(deterministic_noise_seed(seed, 0)),
            offset,
        }
    }

    /// Raster-initialize the height field over `boundary` and apply every
    /// gene, in chromosome order, to every vertex.
    pub fn generate_height_field(
        &self,
        chromosome: &TerrainChromosome,
        boundary: Bounds2DInt,
    ) -> HeightField {
        let size = boundary.size();
        let width = size.x + 1;
        let depth = size.y + 1;
        let center = boundary.center();
        let mut field = HeightField {
            width,
            depth,
            root_area: ((width * depth) as f32).sqrt(),
            origin: Vec2::new(center.x as f32, center.y as f32),
            vertices: Vec::with_capacity((width * depth) as usize),
        };

        // Integer halving, so odd rasters sit half a cell off exact center
        // like the source terrain does.
        let base_y = chromosome.position.y;
        for z in 0..depth {
            for x in 0..width {
                field
                    .vertices
                    .push(Vec3::new((x - width / 2) as f32, base_y, (z - depth / 2) as f32));
            }
        }

        for z in 0..depth {
            for x in 0..width {
                for gene in &chromosome.genes {
                    self.apply_gene(&mut field, gene, chromosome, x, z);
                }
            }
        }

        field
    }

    fn apply_gene(
        &self,
        field: &mut HeightField,
        gene: &TerrainGene,
        chromosome: &TerrainChromosome,
        x: i32,
        z: i32,
    ) {
        match *gene {
            TerrainGene::Noise {
                scale,
                height_steps,
            } => {
                let i = field.index(x, z);
                field.vertices[i].y += self.noise_elevation(x, z, scale, height_steps);
            }
            TerrainGene::Plane {
                bounds,
                height,
                relative_to_seed,
                plateau,
            } => {
                let i = field.index(x, z);
                let current = field.vertices[i];
                let world = current + chromosome.position;
                if !bounds.contains(world.x, world.z) {
                    return;
                }
                // The plateau check reads the same frame the write uses, so
                // it never lowers a vertex in either mode.
                let reference = if relative_to_seed { world.y } else { current.y };
                if plateau && reference >= height as f32 {
                    return;
                }
                field.vertices[i].y = if relative_to_seed {
                    height as f32 - chromosome.position.y
                } else {
                    height as f32
                };
            }
            TerrainGene::Island { falloff } => {
                let i = field.index(x, z);
                let v = field.vertices[i];
                let drop = field.falloff(v.x, v.z, falloff);
                field.vertices[i].y -= drop;
            }
            TerrainGene::None => {}
        }
    }

    /// Stepped noise contribution in `[1, height_steps]`.
    fn noise_elevation(&self, x: i32, z: i32, scale: f32, height_steps: u32) -> f32 {
        let nx = x as f64 * scale as f64 + self.offset;
        let nz = z as f64 * scale as f64 + self.offset;
        // Perlin yields [-1, 1]; normalize to [0, 1) so the floored step
        // count stays within height_steps.
        let v = ((self.perlin.get([nx, nz]) + 1.0) * 0.5).clamp(0.0, 1.0 - f64::EPSILON);
        (v * height_steps as f64 + 1.0).floor() as f32
    }
}

/// One-shot generation: seed the engine and evaluate the chromosome.
pub fn generate_height_field(
    chromosome: &TerrainChromosome,
    seed: i64,
    boundary: Bounds2DInt,
) -> HeightField {
    GeneEngine::new(seed).generate_height_field(chromosome, boundary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boundary_5x5() -> Bounds2DInt {
        Bounds2DInt::new(0, 0, 4, 4)
    }

    #[test]
    fn same_seed_same_field() {
        let chromosome = TerrainChromosome::new(
            vec![
                TerrainGene::Noise {
                    scale: 0.1,
                    height_steps: 10,
                },
                TerrainGene::Island { falloff: 0.5 },
            ],
            Vec3::ZERO,
            Vec3::ONE,
        );
        let boundary = Bounds2DInt::new(-8, -8, 8, 8);
        let a = generate_height_field(&chromosome, 42, boundary);
        let b = generate_height_field(&chromosome, 42, boundary);
        assert_eq!(a.vertices, b.vertices);
    }

    #[test]
    fn different_seed_different_field() {
        let chromosome = TerrainChromosome::new(
            vec![TerrainGene::Noise {
                scale: 0.1,
                height_steps: 10,
            }],
            Vec3::ZERO,
            Vec3::ONE,
        );
        let a = generate_height_field(&chromosome, 11111, boundary_5x5());
        let b = generate_height_field(&chromosome, 22222, boundary_5x5());
        assert_ne!(a.vertices, b.vertices);
    }

    #[test]
    fn noise_contribution_stays_in_step_range() {
        let chromosome = TerrainChromosome::new(
            vec![TerrainGene::Noise {
                scale: 0.1,
                height_steps: 10,
            }],
            Vec3::ZERO,
            Vec3::ONE,
        );
        let field = generate_height_field(&chromosome, 7, boundary_5x5());
        for v in &field.vertices {
            assert!(
                v.y >= 1.0 && v.y <= 10.0,
                "noise height {} outside [1, 10]",
                v.y
            );
        }
    }

    #[test]
    fn empty_chromosome_is_flat() {
        let chromosome = TerrainChromosome {
            position: Vec3::new(0.0, 3.0, 0.0),
            ..Default::default()
        };
        let field = generate_height_field(&chromosome, 5, boundary_5x5());
        assert_eq!(field.width, 5);
        assert_eq!(field.depth, 5);
        assert!(field.vertices.iter().all(|v| v.y == 3.0));
    }

    #[test]
    fn none_gene_is_a_no_op() {
        let flat = TerrainChromosome::default();
        let with_none = TerrainChromosome {
            genes: vec![TerrainGene::None],
            ..Default::default()
        };
        let a = generate_height_field(&flat, 3, boundary_5x5());
        let b = generate_height_field(&with_none, 3, boundary_5x5());
        assert_eq!(a.vertices, b.vertices);
    }

    #[test]
    fn falloff_monotonic_in_distance() {
        let field = generate_height_field(&TerrainChromosome::default(), 1, boundary_5x5());
        let mut last = 0.0f32;
        for d in 0..200 {
            let dist = d as f32 * 0.25;
            let f = field.falloff(dist, 0.0, 0.7);
            assert!(f >= last, "falloff decreased at distance {dist}");
            last = f;
        }
    }

    #[test]
    fn island_lowers_edges_not_center() {
        let chromosome = TerrainChromosome::new(
            vec![TerrainGene::Island { falloff: 1.0 }],
            Vec3::ZERO,
            Vec3::ONE,
        );
        let field = generate_height_field(&chromosome, 1, Bounds2DInt::new(0, 0, 10, 10));
        let center = field.vertex(5, 5).y;
        let corner = field.vertex(0, 0).y;
        assert!(corner < center, "corner {corner} not below center {center}");
    }

    #[test]
    fn plane_sets_absolute_height_inside_bounds() {
        let chromosome = TerrainChromosome::new(
            vec![TerrainGene::Plane {
                bounds: Bounds2DInt::new(-1, -1, 1, 1),
                height: 6,
                relative_to_seed: false,
                plateau: false,
            }],
            Vec3::ZERO,
            Vec3::ONE,
        );
        let field = generate_height_field(&chromosome, 1, boundary_5x5());
        // width 5 -> local x in [-2, 2]; bounds cover the inner 3x3.
        assert_eq!(field.vertex(2, 2).y, 6.0);
        assert_eq!(field.vertex(1, 3).y, 6.0);
        assert_eq!(field.vertex(0, 0).y, 0.0);
    }

    #[test]
    fn relative_plane_lands_at_world_height() {
        let chromosome = TerrainChromosome::new(
            vec![TerrainGene::Plane {
                bounds: Bounds2DInt::new(-10, -10, 10, 10),
                height: 12,
                relative_to_seed: true,
                plateau: false,
            }],
            Vec3::new(0.0, 5.0, 0.0),
            Vec3::ONE,
        );
        let field = generate_height_field(&chromosome, 1, boundary_5x5());
        // Local height + placement offset == world plane height.
        assert!(field.vertices.iter().all(|v| v.y == 7.0));
    }

    #[test]
    fn plateau_never_lowers() {
        let noisy = vec![TerrainGene::Noise {
            scale: 0.3,
            height_steps: 30,
        }];
        let with_plateau = {
            let mut genes = noisy.clone();
            genes.push(TerrainGene::Plane {
                bounds: Bounds2DInt::new(-20, -20, 20, 20),
                height: 15,
                relative_to_seed: false,
                plateau: true,
            });
            genes
        };
        let boundary = Bounds2DInt::new(0, 0, 12, 12);
        let before = generate_height_field(
            &TerrainChromosome::new(noisy, Vec3::ZERO, Vec3::ONE),
            9,
            boundary,
        );
        let after = generate_height_field(
            &TerrainChromosome::new(with_plateau, Vec3::ZERO, Vec3::ONE),
            9,
            boundary,
        );
        for (a, b) in before.vertices.iter().zip(after.vertices.iter()) {
            assert!(b.y >= a.y, "plateau lowered {} to {}", a.y, b.y);
            assert_eq!(b.y, a.y.max(15.0));
        }
    }

    #[test]
    fn gene_order_matters() {
        let bounds = Bounds2DInt::new(-20, -20, 20, 20);
        let plane = TerrainGene::Plane {
            bounds,
            height: 3,
            relative_to_seed: false,
            plateau: false,
        };
        let noise = TerrainGene::Noise {
            scale: 0.1,
            height_steps: 10,
        };
        let plane_then_noise = TerrainChromosome::new(vec![plane, noise], Vec3::ZERO, Vec3::ONE);
        let noise_then_plane = TerrainChromosome::new(vec![noise, plane], Vec3::ZERO, Vec3::ONE);
        let a = generate_height_field(&plane_then_noise, 4, boundary_5x5());
        let b = generate_height_field(&noise_then_plane, 4, boundary_5x5());
        // Plane last flattens everything; noise last re-raises it.
        assert!(b.vertices.iter().all(|v| v.y == 3.0));
        assert!(a.vertices.iter().all(|v| v.y > 3.0));
    }
}
