//! Grid error taxonomy.
//!
//! Every error here is absorbed at the public absorbing APIs (logged, default
//! value returned); the checked `try_*` variants surface them as `Result` so
//! tests and defensive callers can fail loudly.

use crate::point::Point;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    /// Voxel state requested by linear index outside the seeded range.
    #[error("no state seeded for linear index {index} (grid has {num_points} points)")]
    Lookup { index: usize, num_points: usize },

    /// Voxel state requested for a point outside the grid.
    #[error("no state seeded for point {point:?} (dimensions {dimensions:?})")]
    LookupPoint { point: Point, dimensions: Point },

    /// Coordinate outside the grid's dimensions.
    #[error("point {point:?} out of bounds for dimensions {dimensions:?}")]
    OutOfBounds { point: Point, dimensions: Point },
}
