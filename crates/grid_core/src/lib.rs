//! Lattice addressing and placement occupancy for the terrain engine.
//!
//! This crate provides the foundational grid types:
//! - Integer lattice coordinates and inclusive 2D bounds
//! - The indexed point grid with its linear/non-linear index bijection
//! - The placement grid's voxel-state overlay and placement records

pub mod bounds;
pub mod error;
pub mod indexed_grid;
pub mod placement;
pub mod placement_grid;
pub mod point;

pub use bounds::*;
pub use error::*;
pub use indexed_grid::*;
pub use placement::*;
pub use placement_grid::*;
pub use point::*;

// Re-export commonly used math types
pub use glam::{IVec2, IVec3, Vec2, Vec3};
