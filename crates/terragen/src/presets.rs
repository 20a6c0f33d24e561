//! Named chromosome presets and the generation front door.
//!
//! The map-loading collaborator normally supplies chromosomes as assets; the
//! presets here cover the shipped maps and give tests a realistic input.

use glam::Vec3;
use grid_core::Bounds2DInt;

use crate::gene::{TerrainChromosome, TerrainGene};
use crate::heightfield::{GeneEngine, HeightField};
use crate::mesh::{build_mesh, MaterialCutoffs, MeshOutput};

/// Shipped terrain variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerrainPreset {
    /// Rolling noise terrain with a central rise.
    Hill,
    /// Noise terrain with a sunken channel cut through the middle.
    Chasm,
}

impl TerrainPreset {
    /// The gene list for this preset.
    pub fn chromosome(self) -> TerrainChromosome {
        match self {
            TerrainPreset::Hill => TerrainChromosome::new(
                vec![
                    TerrainGene::Noise {
                        scale: 0.1,
                        height_steps: 10,
                    },
                    TerrainGene::Plane {
                        bounds: Bounds2DInt::new(-12, -12, 12, 12),
                        height: 14,
                        relative_to_seed: false,
                        plateau: true,
                    },
                    TerrainGene::Island { falloff: 0.5 },
                ],
                Vec3::ZERO,
                Vec3::ONE,
            ),
            TerrainPreset::Chasm => TerrainChromosome::new(
                vec![
                    TerrainGene::Noise {
                        scale: 0.1,
                        height_steps: 12,
                    },
                    TerrainGene::Plane {
                        bounds: Bounds2DInt::new(-6, -64, 6, 64),
                        height: -9,
                        relative_to_seed: false,
                        plateau: false,
                    },
                ],
                Vec3::ZERO,
                Vec3::ONE,
            ),
        }
    }
}

/// Owns one terrain's generation inputs and produces its mesh.
///
/// Generation is single-pass and stateless across calls: every
/// [`generate`](TerrainGenerator::generate) rebuilds the height field from
/// scratch and returns fresh buffers.
#[derive(Debug, Clone)]
pub struct TerrainGenerator {
    pub chromosome: TerrainChromosome,
    pub seed: i64,
    pub boundary: Bounds2DInt,
    pub cutoffs: MaterialCutoffs,
}

impl TerrainGenerator {
    pub fn new(chromosome: TerrainChromosome, seed: i64, boundary: Bounds2DInt) -> Self {
        Self {
            chromosome,
            seed,
            boundary,
            cutoffs: MaterialCutoffs::default(),
        }
    }

    pub fn from_preset(preset: TerrainPreset, seed: i64, boundary: Bounds2DInt) -> Self {
        Self::new(preset.chromosome(), seed, boundary)
    }

    /// Evaluate the chromosome into a height field.
    pub fn generate_height_field(&self) -> HeightField {
        GeneEngine::new(self.seed).generate_height_field(&self.chromosome, self.boundary)
    }

    /// Full pipeline: height field, then mesh buffers with submeshes.
    pub fn generate(&self) -> MeshOutput {
        build_mesh(&self.generate_height_field(), &self.cutoffs)
    }
}
