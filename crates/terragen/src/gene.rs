//! Terrain genes and chromosomes.
//!
//! A gene is one declarative height modifier; a chromosome is an ordered list
//! of genes plus the placement transform of the terrain they describe. Gene
//! order is significant: each gene reads the height already mutated by the
//! genes before it.

use glam::Vec3;
use grid_core::Bounds2DInt;
use serde::{Deserialize, Serialize};

/// One declarative terrain modifier.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum TerrainGene {
    /// Add stepped Perlin noise: `floor(noise * height_steps + 1)` per vertex.
    Noise { scale: f32, height_steps: u32 },
    /// Flatten vertices inside `bounds` to a plane.
    ///
    /// With `relative_to_seed` the plane height is world-space: the written
    /// local height is `height - position.y` so the plane lands at world
    /// `height` once the chromosome's placement offset is applied. With
    /// `plateau` the gene never lowers a vertex already at or above the
    /// target.
    Plane {
        bounds: Bounds2DInt,
        height: i32,
        relative_to_seed: bool,
        plateau: bool,
    },
    /// Radial falloff toward the raster edges, sculpting an island
    /// silhouette. `falloff` of 0 is flat; values past 1 give extreme cliffs.
    Island { falloff: f32 },
    /// Explicit no-op placeholder.
    #[default]
    None,
}

/// An ordered gene list plus the terrain's placement transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerrainChromosome {
    pub genes: Vec<TerrainGene>,
    pub position: Vec3,
    pub scale: Vec3,
}

impl Default for TerrainChromosome {
    fn default() -> Self {
        Self {
            genes: Vec::new(),
            position: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl TerrainChromosome {
    pub fn new(genes: Vec<TerrainGene>, position: Vec3, scale: Vec3) -> Self {
        Self {
            genes,
            position,
            scale,
        }
    }
}
