//! Gene-based procedural terrain generation.
//!
//! A [`TerrainChromosome`] (ordered gene list plus placement transform) and a
//! seed drive [`GeneEngine`] to produce a height field; [`build_mesh`] turns
//! the field into triangle buffers with material submeshes for the rendering
//! and collision host.

pub mod gene;
pub mod heightfield;
pub mod mesh;
pub mod presets;

pub use gene::*;
pub use heightfield::*;
pub use mesh::*;
pub use presets::*;
